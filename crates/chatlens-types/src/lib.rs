pub mod collaborators;
pub mod domain;
mod util;

pub use collaborators::*;
pub use domain::*;
pub use util::*;
