//! Detection results returned by the image detection endpoint.

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::PageError;

/// Message shown when the server reports a failure without one.
pub const DEFAULT_FAILURE_MESSAGE: &str = "Detection failed";

/// Value of `status` for a successful detection.
const STATUS_SUCCESS: &str = "success";

/// One detected object instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    /// Class name as reported by the model (e.g. "Fire", "smoke")
    #[serde(rename = "class")]
    pub class_name: String,
    /// Confidence in `[0, 1]`
    pub confidence: f64,
}

impl Detection {
    /// Create a detection.
    pub fn new(class_name: impl Into<String>, confidence: f64) -> Self {
        Self {
            class_name: class_name.into(),
            confidence,
        }
    }

    /// Which kind of detection this is, for icon selection.
    pub fn kind(&self) -> DetectionKind {
        DetectionKind::from_class(&self.class_name)
    }

    /// Confidence as a percentage.
    pub fn confidence_percent(&self) -> f64 {
        self.confidence * 100.0
    }

    /// Confidence percentage with one decimal, e.g. `"87.3"`.
    ///
    /// Halves round away from zero, so 56.25 shows as `"56.3"`.
    pub fn confidence_label(&self) -> String {
        format!("{:.1}", (self.confidence_percent() * 10.0).round() / 10.0)
    }
}

/// Kind of a detection.
///
/// The model only knows fire and smoke, so any class that is not fire is
/// shown as smoke.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetectionKind {
    /// Flames
    Fire,
    /// Smoke, and anything else the model reports
    Smoke,
}

impl DetectionKind {
    /// Classify a class name (case-insensitive).
    pub fn from_class(class_name: &str) -> Self {
        if class_name.eq_ignore_ascii_case("fire") {
            Self::Fire
        } else {
            Self::Smoke
        }
    }

    /// Icon shown next to the detection.
    pub fn icon(&self) -> &'static str {
        match self {
            Self::Fire => "🔥",
            Self::Smoke => "💨",
        }
    }
}

/// The full reply of the detection endpoint.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DetectionResponse {
    /// `"success"` or anything else for a failure
    #[serde(default)]
    pub status: String,

    /// Detected objects (absent or null means none)
    #[serde(default, deserialize_with = "null_as_empty")]
    pub detections: Vec<Detection>,

    /// URL or data URI of the annotated image
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result_image: Option<String>,

    /// Failure message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<Detection>, D::Error> {
    Option::<Vec<Detection>>::deserialize(deserializer).map(Option::unwrap_or_default)
}

impl DetectionResponse {
    /// A successful response with the given detections.
    pub fn success(detections: Vec<Detection>) -> Self {
        Self {
            status: STATUS_SUCCESS.to_string(),
            detections,
            ..Default::default()
        }
    }

    /// A failed response carrying a message.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            status: "error".to_string(),
            message: Some(message.into()),
            ..Default::default()
        }
    }

    /// Set the annotated result image.
    pub fn with_result_image(mut self, url: impl Into<String>) -> Self {
        self.result_image = Some(url.into());
        self
    }

    /// Parse a response body.
    pub fn from_json(body: &str) -> Result<Self, PageError> {
        Ok(serde_json::from_str(body)?)
    }

    /// Whether the server reported success.
    pub fn is_success(&self) -> bool {
        self.status == STATUS_SUCCESS
    }

    /// The result image, if one was sent and is non-empty.
    pub fn result_image(&self) -> Option<&str> {
        self.result_image.as_deref().filter(|url| !url.is_empty())
    }

    /// The server's failure message, or [`DEFAULT_FAILURE_MESSAGE`].
    pub fn failure_message(&self) -> &str {
        self.message
            .as_deref()
            .filter(|m| !m.is_empty())
            .unwrap_or(DEFAULT_FAILURE_MESSAGE)
    }

    /// Turn a failure status into an error.
    pub fn into_result(self) -> Result<Self, PageError> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(PageError::server(self.failure_message()))
        }
    }
}
