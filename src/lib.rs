//! Receipt Points Service Library
//!
//! Scores retail receipts with a fixed, ordered set of reward-point rules
//! and serves the results over HTTP. The scoring core lives in
//! [`services::points_service`] and [`services::rules`]; everything else is
//! plumbing around it.

pub mod config;
pub mod errors;
pub mod handlers;
pub mod infrastructure;
pub mod models;
pub mod routes;
pub mod server;
pub mod services;
pub mod state;
pub mod telemetry;

// Re-export commonly used types for convenience
pub use models::*;
pub use services::cancel::{CancelCause, CancelSignal, Canceller};
pub use services::points_service::{calculate_points, RuleEngine, ScoreBreakdown};
pub use state::AppState;
