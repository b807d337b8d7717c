mod builder;

pub use builder::SessionBuilder;
