//! The UI context the controller writes through.
//!
//! The controller never touches the document directly. It is handed a
//! [`UiSurface`] that knows where each [`Region`] lives and owns the alert
//! container and the loading spinner. The browser implementation is
//! `web::DomSurface`; tests use a recording fake.

use crate::alert::Alert;
use crate::view::Node;

/// Page regions the controller renders into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    /// Local preview of the picked file
    Preview,
    /// Detection results
    Results,
    /// Live stream container
    VideoContainer,
    /// Live/Stopped indicator
    StreamStatus,
    /// Recent alerts list on the dashboard
    RecentAlerts,
}

/// Dashboard counters fed by the stats endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stat {
    /// All detections
    Total,
    /// Fire detections
    Fire,
    /// Smoke detections
    Smoke,
}

/// Everything the controller may do to the page.
///
/// Methods take `&self`: the surface is shared by every handler on the page.
/// A region whose element is missing is skipped silently.
pub trait UiSurface {
    /// Append an alert to the alert container. It expires on its own.
    fn show_alert(&self, alert: &Alert);

    /// Replace the content of a region.
    fn render(&self, region: Region, node: Node);

    /// Mark a region as shown (adds the `show` class).
    fn reveal(&self, region: Region);

    /// Clear a region and put the single loading spinner in it.
    fn show_loading(&self, region: Region);

    /// Remove the loading spinner if it is on the page.
    fn hide_loading(&self);

    /// Animate a dashboard counter from zero to `value`.
    fn animate_stat(&self, stat: Stat, value: u64);
}

/// Removes the loading spinner when dropped, however the guarded
/// operation ends.
#[must_use = "the spinner is removed when the guard is dropped"]
pub struct LoadingGuard<'a, U: UiSurface + ?Sized> {
    surface: &'a U,
}

impl<'a, U: UiSurface + ?Sized> LoadingGuard<'a, U> {
    /// Show the spinner in `region` and return the guard.
    pub fn show(surface: &'a U, region: Region) -> Self {
        surface.show_loading(region);
        Self { surface }
    }
}

impl<U: UiSurface + ?Sized> Drop for LoadingGuard<'_, U> {
    fn drop(&mut self) {
        self.surface.hide_loading();
    }
}
