//! Alert notifications.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PageError;
use crate::view::{ElementNode, el};

/// Severity of an alert, mapped to the `alert-<name>` CSS class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Neutral information
    #[default]
    Info,
    /// An operation completed
    Success,
    /// The user needs to correct their input
    Warning,
    /// An operation failed
    Danger,
}

impl Severity {
    /// Lowercase name, as used in CSS classes.
    pub fn name(&self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Success => "success",
            Severity::Warning => "warning",
            Severity::Danger => "danger",
        }
    }

    /// Capitalized label shown in front of the message.
    pub fn label(&self) -> &'static str {
        match self {
            Severity::Info => "Info",
            Severity::Success => "Success",
            Severity::Warning => "Warning",
            Severity::Danger => "Danger",
        }
    }

    /// Parse a severity name, falling back to [`Severity::Info`] for unknown
    /// names so scripts passing arbitrary strings still get an alert.
    pub fn parse_lenient(name: &str) -> Self {
        name.parse().unwrap_or_default()
    }
}

impl FromStr for Severity {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "info" => Ok(Severity::Info),
            "success" => Ok(Severity::Success),
            "warning" => Ok(Severity::Warning),
            "danger" => Ok(Severity::Danger),
            _ => Err(()),
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A notification shown in the alert container.
#[derive(Debug, Clone, PartialEq)]
pub struct Alert {
    /// How the alert is styled
    pub severity: Severity,
    /// Message text
    pub message: String,
}

impl Alert {
    /// Create an alert.
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            message: message.into(),
        }
    }

    /// Info alert.
    pub fn info(message: impl Into<String>) -> Self {
        Self::new(Severity::Info, message)
    }

    /// Success alert.
    pub fn success(message: impl Into<String>) -> Self {
        Self::new(Severity::Success, message)
    }

    /// Warning alert.
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, message)
    }

    /// Danger alert.
    pub fn danger(message: impl Into<String>) -> Self {
        Self::new(Severity::Danger, message)
    }

    /// Alert for an error, with an optional context prefix such as
    /// `"Error processing image: "`. Input errors never get a prefix.
    pub fn from_error(err: &PageError, prefix: &str) -> Self {
        let severity = err.severity();
        let message = match severity {
            Severity::Warning => err.to_string(),
            _ => format!("{prefix}{err}"),
        };
        Self::new(severity, message)
    }

    /// Build the alert box.
    pub fn view(&self) -> ElementNode {
        el("div")
            .class("alert")
            .class(format!("alert-{}", self.severity.name()))
            .push(el("strong").push(format!("{}:", self.severity.label())))
            .push(format!(" {}", self.message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::Node;

    #[test]
    fn test_parse_severity() {
        assert_eq!("warning".parse(), Ok(Severity::Warning));
        assert_eq!("Danger".parse(), Ok(Severity::Danger));
        assert_eq!(Severity::parse_lenient("unknown"), Severity::Info);
        assert_eq!(Severity::parse_lenient(""), Severity::Info);
    }

    #[test]
    fn test_alert_view() {
        let node: Node = Alert::warning("Please select an image first").view().into();

        assert_eq!(
            node.to_html(),
            r#"<div class="alert alert-warning"><strong>Warning:</strong> Please select an image first</div>"#
        );
    }

    #[test]
    fn test_alert_message_is_not_markup() {
        let node: Node = Alert::danger("<b>bad</b>").view().into();
        assert!(node.to_html().contains("&lt;b&gt;bad&lt;/b&gt;"));
    }

    #[test]
    fn test_from_error_prefixes_only_failures() {
        let input = Alert::from_error(&PageError::NoFileSelected, "Error processing image: ");
        assert_eq!(input.severity, Severity::Warning);
        assert_eq!(input.message, "Please select an image first");

        let network = Alert::from_error(
            &PageError::Network("Failed to fetch".into()),
            "Error processing image: ",
        );
        assert_eq!(network.severity, Severity::Danger);
        assert_eq!(network.message, "Error processing image: Failed to fetch");
    }
}
