mod agent;
mod conversation;
mod message;
mod session;

pub use agent::*;
pub use conversation::*;
pub use message::*;
pub use session::*;
