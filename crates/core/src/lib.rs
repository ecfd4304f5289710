//! Chatter Core Library
//!
//! Request lifecycle for summarizing a YouTube video's comments through a
//! remote summarization backend.

pub mod backend;
pub mod config;
pub mod controller;
pub mod error;
pub mod format;
pub mod lifecycle;
pub mod types;

// Re-export commonly used items at crate root
pub use backend::{HttpBackend, SummaryBackend};
pub use config::BackendConfig;
pub use controller::{Completion, InFlight, RequestLifecycleController};
pub use error::{ConfigError, SubmitRejected, SummarizeError};
pub use format::{format_percent, format_sentiment, format_summary_readable};
pub use lifecycle::{LifecycleEvent, LifecycleState, reduce};
pub use types::{ErrorBody, SummaryRequest, SummaryResult};
