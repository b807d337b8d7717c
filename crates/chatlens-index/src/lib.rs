// SQLite session index
// Agents are the directory consulted during analysis; sessions hold the
// finished records, with the queryable fields lifted into columns

mod db;
mod error;
mod queries;
mod records;
mod schema;

// Public API
pub use db::Database;
pub use error::{Error, Result};
pub use records::{SessionFilter, SessionSummary};
pub use schema::SCHEMA_VERSION;
