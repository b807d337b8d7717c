// Runtime - workspace configuration, pricing and batch orchestration
// The CLI talks to ChatLens; ChatLens wires the engine to the index

pub mod analyzer;
pub mod config;
pub mod error;
pub mod export;
pub mod pricing;
pub mod stats;
pub mod workspace;

pub use analyzer::{Analyzer, BatchReport, ItemFailure, split_document};
pub use config::{Config, ModelPrice, resolve_data_dir};
pub use error::{Error, Result};
pub use pricing::PriceTable;
pub use stats::SessionStats;
pub use workspace::{ChatLens, InitResult, NewAgent};

pub use chatlens_index::{SessionFilter, SessionSummary};
