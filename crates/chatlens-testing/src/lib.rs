//! Testing infrastructure for chatlens unit and integration tests.
//!
//! - `fixtures`: conversation payload builders
//! - `fakes`: in-memory agent directory, pricing and session store
//! - `assertions`: checks over analyzer JSON output
//! - `TestWorld`: isolated data dir plus CLI execution

pub mod assertions;
pub mod fakes;
pub mod fixtures;
pub mod world;

pub use fixtures::ConversationBuilder;
pub use world::{CliResult, TestWorld};
