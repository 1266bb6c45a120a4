//! Navigation bar styling rules.

/// Class toggled on the nav bar once the page is scrolled.
pub const SCROLLED_CLASS: &str = "scrolled";

/// Class put on the nav link of the current page.
pub const ACTIVE_CLASS: &str = "active";

/// Whether the nav bar should carry [`SCROLLED_CLASS`] at this scroll offset.
pub fn is_scrolled(scroll_y: f64, threshold: f64) -> bool {
    scroll_y > threshold
}

/// Whether a nav link points at the current page.
///
/// The `href` attribute is compared verbatim with the location path, so
/// `"/logs/"` matches `/logs/` but not `/logs`.
pub fn is_active_link(href: Option<&str>, current_path: &str) -> bool {
    href == Some(current_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::SCROLL_THRESHOLD_PX;

    #[test]
    fn test_scroll_threshold_is_exclusive() {
        assert!(!is_scrolled(0.0, SCROLL_THRESHOLD_PX));
        assert!(!is_scrolled(50.0, SCROLL_THRESHOLD_PX));
        assert!(is_scrolled(50.5, SCROLL_THRESHOLD_PX));
        assert!(is_scrolled(11.0, 10.0));
    }

    #[test]
    fn test_active_link() {
        assert!(is_active_link(Some("/image-detect/"), "/image-detect/"));
        assert!(!is_active_link(Some("/image-detect/"), "/image-detect"));
        assert!(!is_active_link(Some("/"), "/logs/"));
        assert!(!is_active_link(None, "/"));
    }
}
