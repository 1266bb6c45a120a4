//! Error types for page operations.

use thiserror::Error;

use crate::alert::Severity;

/// Errors that can occur while handling a page event.
///
/// None of these are fatal to the page. Each one is reported to the user
/// through an alert of the severity given by [`PageError::severity`].
#[derive(Error, Debug)]
pub enum PageError {
    /// The form was submitted without a file
    #[error("Please select an image first")]
    NoFileSelected,

    /// A file with a non-image media type was picked
    #[error("Please select an image file")]
    NotAnImage {
        /// Media type reported by the browser (may be empty)
        media_type: String,
    },

    /// An element the operation needs is not on the page
    #[error("Element not found: #{id}")]
    MissingElement {
        /// Id or selector that was looked up
        id: String,
    },

    /// The request could not be sent or the body could not be read
    #[error("{0}")]
    Network(String),

    /// The response body was not the JSON shape we expect
    #[error("{0}")]
    Json(#[from] serde_json::Error),

    /// The server answered but reported a failure
    #[error("{message}")]
    Server {
        /// Message from the server, or a default
        message: String,
    },

    /// Camera access was denied or no device is available
    #[error("{0}")]
    Camera(String),

    /// Any other exception thrown by a browser API
    #[error("{0}")]
    Js(String),
}

impl PageError {
    /// Create a missing element error.
    pub fn missing_element(id: impl Into<String>) -> Self {
        Self::MissingElement { id: id.into() }
    }

    /// Create a not-an-image error.
    pub fn not_an_image(media_type: impl Into<String>) -> Self {
        Self::NotAnImage {
            media_type: media_type.into(),
        }
    }

    /// Create a server failure error.
    pub fn server(message: impl Into<String>) -> Self {
        Self::Server {
            message: message.into(),
        }
    }

    /// Severity of the alert this error is reported with.
    ///
    /// User input mistakes are warnings, everything else is a danger alert.
    pub fn severity(&self) -> Severity {
        match self {
            Self::NoFileSelected | Self::NotAnImage { .. } => Severity::Warning,
            _ => Severity::Danger,
        }
    }
}
