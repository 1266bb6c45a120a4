//! Page configuration.
//!
//! The page can embed a JSON block
//! `<script type="application/json" id="firewatch-config">` to rename the
//! elements the controller binds to or tune timings. Every field is optional;
//! anything left out keeps its default.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants;

/// Log level setting for the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Show only errors
    Error,
    /// Show errors and warnings
    Warn,
    /// Show errors, warnings, and info messages
    #[default]
    Info,
    /// Show debug-level logging
    Debug,
    /// Show all log messages including trace
    Trace,
}

impl LogLevel {
    /// Convert to log crate's LevelFilter.
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Current configuration format version.
/// Increment this when making breaking changes to the config format.
pub const CONFIG_VERSION: u32 = 1;

/// Page configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    /// Version of the configuration format
    pub version: u32,

    /// Console log verbosity
    pub log_level: LogLevel,

    /// Ids of the elements the controller binds to
    pub elements: ElementIds,

    /// Selectors for element groups
    pub selectors: Selectors,

    /// How long alerts stay visible, in milliseconds
    pub alert_lifetime_ms: u64,

    /// Counter animation duration, in milliseconds
    pub counter_duration_ms: u64,

    /// Scroll offset after which the nav bar is styled as scrolled
    pub scroll_threshold_px: f64,

    /// Webcam request
    pub webcam: WebcamConfig,

    /// Dashboard statistics
    pub stats: StatsConfig,
}

/// Element ids used by the page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ElementIds {
    /// Click/drop target for files
    pub upload_area: String,
    /// Hidden `<input type="file">`
    pub file_input: String,
    /// Where the local preview goes
    pub preview: String,
    /// The upload form
    pub form: String,
    /// Where detection results go
    pub results: String,
    /// Container of the live stream image
    pub video_container: String,
    /// Live/Stopped indicator
    pub stream_status: String,
    /// `<video>` element for the webcam
    pub webcam_video: String,
}

impl Default for ElementIds {
    fn default() -> Self {
        Self {
            upload_area: "upload-area".to_string(),
            file_input: "file-input".to_string(),
            preview: "preview".to_string(),
            form: "detect-form".to_string(),
            results: "results".to_string(),
            video_container: "video-container".to_string(),
            stream_status: "stream-status".to_string(),
            webcam_video: "webcam".to_string(),
        }
    }
}

/// CSS selectors for element groups.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Selectors {
    /// The navigation bar
    pub nav: String,
    /// Links inside the navigation bar
    pub nav_links: String,
    /// Counters animated on load
    pub counters: String,
    /// Cards revealed on scroll
    pub cards: String,
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            nav: "nav".to_string(),
            nav_links: ".nav-links a".to_string(),
            counters: ".stat-value".to_string(),
            cards: ".card".to_string(),
        }
    }
}

/// Webcam resolution request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WebcamConfig {
    /// Requested width in pixels
    pub width: u32,
    /// Requested height in pixels
    pub height: u32,
}

impl Default for WebcamConfig {
    fn default() -> Self {
        Self {
            width: constants::WEBCAM_WIDTH,
            height: constants::WEBCAM_HEIGHT,
        }
    }
}

/// Where dashboard statistics come from and go to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatsConfig {
    /// Stats endpoint; statistics are only loaded on start when this is set
    pub url: Option<String>,
    /// Counter showing the total number of detections
    pub total_id: String,
    /// Counter showing fire detections
    pub fire_id: String,
    /// Counter showing smoke detections
    pub smoke_id: String,
    /// Container for the recent alerts list
    pub recent_alerts_id: String,
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            url: None,
            total_id: "stat-total".to_string(),
            fire_id: "stat-fire".to_string(),
            smoke_id: "stat-smoke".to_string(),
            recent_alerts_id: "recent-alerts".to_string(),
        }
    }
}

/// Milliseconds for a browser timer. Delays beyond `i32::MAX` saturate.
pub fn timer_millis(delay: Duration) -> i32 {
    i32::try_from(delay.as_millis()).unwrap_or(i32::MAX)
}

impl PageConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self {
            version: CONFIG_VERSION,
            log_level: LogLevel::default(),
            elements: ElementIds::default(),
            selectors: Selectors::default(),
            alert_lifetime_ms: constants::ALERT_LIFETIME.as_millis() as u64,
            counter_duration_ms: constants::COUNTER_DURATION.as_millis() as u64,
            scroll_threshold_px: constants::SCROLL_THRESHOLD_PX,
            webcam: WebcamConfig::default(),
            stats: StatsConfig::default(),
        }
    }

    /// Alert lifetime as a duration.
    pub fn alert_lifetime(&self) -> Duration {
        Duration::from_millis(self.alert_lifetime_ms)
    }

    /// Counter animation duration.
    pub fn counter_duration(&self) -> Duration {
        Duration::from_millis(self.counter_duration_ms)
    }

    /// Serialize the configuration to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;

        // Validate version compatibility
        if config.version > CONFIG_VERSION {
            return Err(ConfigError::VersionTooNew {
                file_version: config.version,
                supported_version: CONFIG_VERSION,
            });
        }

        Ok(config)
    }

    /// Load configuration from the page's config block.
    /// Falls back to defaults if the block is missing or invalid.
    #[cfg(target_arch = "wasm32")]
    pub fn load_from_page() -> Self {
        let json = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(constants::CONFIG_SCRIPT_ID))
            .and_then(|el| el.text_content());

        let Some(json) = json else {
            log::debug!("No #{} block on page, using defaults", constants::CONFIG_SCRIPT_ID);
            return Self::default();
        };

        match Self::from_json(&json) {
            Ok(config) => {
                log::debug!("Loaded configuration from #{}", constants::CONFIG_SCRIPT_ID);
                config
            }
            Err(e) => {
                log::warn!("Ignoring page configuration: {}", e);
                Self::default()
            }
        }
    }
}

impl Default for PageConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// JSON parsing error
    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),

    /// Configuration version is newer than supported
    #[error(
        "Configuration version {file_version} is newer than supported version {supported_version}"
    )]
    VersionTooNew {
        /// Version found in the config block
        file_version: u32,
        /// Highest version this build understands
        supported_version: u32,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_object_is_default() {
        let config = PageConfig::from_json("{}").unwrap();
        assert_eq!(config, PageConfig::default());
        assert_eq!(config.alert_lifetime(), Duration::from_secs(5));
        assert_eq!(config.counter_duration(), Duration::from_millis(2000));
        assert_eq!(config.webcam, WebcamConfig { width: 1280, height: 720 });
    }

    #[test]
    fn test_partial_override() {
        let json = r#"{
            "log_level": "debug",
            "elements": { "form": "upload-form" },
            "stats": { "url": "/api/stats/" }
        }"#;

        let config = PageConfig::from_json(json).unwrap();
        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.elements.form, "upload-form");
        assert_eq!(config.elements.results, "results", "untouched fields keep defaults");
        assert_eq!(config.stats.url.as_deref(), Some("/api/stats/"));
        assert_eq!(config.stats.total_id, "stat-total");
    }

    #[test]
    fn test_roundtrip() {
        let mut config = PageConfig::new();
        config.scroll_threshold_px = 80.0;
        config.selectors.cards = ".panel".to_string();

        let json = config.to_json().unwrap();
        assert_eq!(PageConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn test_rejects_newer_version() {
        let err = PageConfig::from_json(r#"{"version": 99}"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::VersionTooNew {
                file_version: 99,
                supported_version: CONFIG_VERSION
            }
        ));
    }

    #[test]
    fn test_rejects_invalid_json() {
        assert!(matches!(
            PageConfig::from_json("not json"),
            Err(ConfigError::ParseError(_))
        ));
    }

    #[test]
    fn test_long_alert_lifetime_saturates_timer() {
        let config = PageConfig {
            alert_lifetime_ms: u64::from(u32::MAX) + 10,
            ..PageConfig::default()
        };
        assert_eq!(timer_millis(config.alert_lifetime()), i32::MAX);
        assert_eq!(timer_millis(Duration::from_millis(5000)), 5000);
        assert_eq!(timer_millis(Duration::ZERO), 0);
    }

    #[test]
    fn test_log_level_mapping() {
        assert_eq!(LogLevel::Warn.to_level_filter(), log::LevelFilter::Warn);
        assert_eq!(LogLevel::Trace.to_level_filter(), log::LevelFilter::Trace);
    }
}
