//! Dashboard statistics served by the stats endpoint.

use serde::{Deserialize, Serialize};

use crate::error::PageError;

/// Aggregate detection counts and the latest alerts.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DashboardStats {
    /// All logged detections
    #[serde(default)]
    pub total_detections: u64,
    /// Detections logged as fire
    #[serde(default)]
    pub fire_detections: u64,
    /// Detections logged as smoke
    #[serde(default)]
    pub smoke_detections: u64,
    /// Most recent detections that raised an alert
    #[serde(default)]
    pub recent_alerts: Vec<RecentAlert>,
    /// Server time the stats were computed at
    #[serde(default)]
    pub timestamp: String,
}

impl DashboardStats {
    /// Parse a stats body.
    pub fn from_json(body: &str) -> Result<Self, PageError> {
        Ok(serde_json::from_str(body)?)
    }
}

/// A logged detection that raised an alert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecentAlert {
    /// Log entry id
    pub id: u64,
    /// `fire`, `smoke` or `both`
    pub detection_type: String,
    /// Confidence in percent
    pub confidence: f64,
    /// Formatted detection time
    pub detected_at: String,
}

impl RecentAlert {
    /// Human readable detection type.
    pub fn type_label(&self) -> String {
        match self.detection_type.as_str() {
            "fire" => "Fire".to_string(),
            "smoke" => "Smoke".to_string(),
            "both" => "Fire & Smoke".to_string(),
            other => capitalize(other),
        }
    }

    /// Confidence with one decimal and a percent sign.
    pub fn confidence_label(&self) -> String {
        format!("{:.1}%", self.confidence)
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
