//! Data models for responses from the detection service.

mod detection;
mod stats;

pub use detection::{DEFAULT_FAILURE_MESSAGE, Detection, DetectionKind, DetectionResponse};
pub use stats::{DashboardStats, RecentAlert};
