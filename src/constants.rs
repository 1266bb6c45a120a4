//! Global constants for the firewatch page

use std::time::Duration;

/// Id of the lazily created container that holds alert boxes
pub const ALERT_CONTAINER_ID: &str = "alert-container";

/// Inline style of the alert container
pub const ALERT_CONTAINER_STYLE: &str =
    "position: fixed; top: 80px; right: 20px; z-index: 1000; max-width: 400px;";

/// How long an alert stays on screen before it starts fading out
pub const ALERT_LIFETIME: Duration = Duration::from_secs(5);

/// Length of the alert fade-out animation
pub const ALERT_FADE: Duration = Duration::from_millis(400);

/// Id of the single loading spinner element
pub const LOADER_ID: &str = "main-loader";

/// Vertical scroll offset (px) past which the nav bar gets the `scrolled` class
pub const SCROLL_THRESHOLD_PX: f64 = 50.0;

/// Default counter animation duration
pub const COUNTER_DURATION: Duration = Duration::from_millis(2000);

/// Counter animation tick, roughly one frame at 60 Hz
pub const COUNTER_TICK: Duration = Duration::from_millis(16);

/// Requested webcam resolution
pub const WEBCAM_WIDTH: u32 = 1280;
/// Requested webcam resolution
pub const WEBCAM_HEIGHT: u32 = 720;

/// Visibility ratio at which a card is revealed
pub const REVEAL_THRESHOLD: f64 = 0.1;

/// Root margin for the reveal observer (reveal slightly before the bottom edge)
pub const REVEAL_ROOT_MARGIN: &str = "0px 0px -100px 0px";

/// Animation applied to a card when it is revealed
pub const REVEAL_ANIMATION: &str = "fadeInUp 0.6s ease forwards";

/// Header marking the upload as a scripted request
pub const REQUESTED_WITH_HEADER: (&str, &str) = ("X-Requested-With", "XMLHttpRequest");

/// Id of the optional JSON config block embedded in the page
pub const CONFIG_SCRIPT_ID: &str = "firewatch-config";
