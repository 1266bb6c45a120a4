//! The detection service seam.

use std::future::Future;

use crate::error::PageError;
use crate::model::{DashboardStats, DetectionResponse};

/// Talks to the detection service.
///
/// The browser implementation posts the upload form with `fetch`; tests
/// substitute canned replies. Futures are not `Send`: everything runs on the
/// page's event loop.
pub trait DetectionClient {
    /// What gets uploaded (the form data in the browser).
    type Upload;

    /// Post an upload and parse the reply.
    ///
    /// A reply that parses but reports a failure status is `Ok`; only
    /// transport and decoding problems are errors.
    fn detect(
        &self,
        upload: &Self::Upload,
    ) -> impl Future<Output = Result<DetectionResponse, PageError>>;

    /// Fetch dashboard statistics.
    fn fetch_stats(&self, url: &str) -> impl Future<Output = Result<DashboardStats, PageError>>;
}
