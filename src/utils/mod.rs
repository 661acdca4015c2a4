//! # Utility Modules
//!
//! Supporting pieces shared by the session layer.
//!
//! ## Components
//! - **Logging**: tracing subscriber configuration
//! - **Metrics**: per-session atomic counters and exchange timing

pub mod logging;
pub mod metrics;

pub use metrics::{Metrics, MetricsSnapshot};
