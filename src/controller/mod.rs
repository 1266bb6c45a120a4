//! Page controller.
//!
//! Maps page events to effects on a [`UiSurface`]. Each handler is
//! independent: there is no state carried between events, and repeating an
//! event repeats its effect. Concurrent submissions are not serialized; two
//! quick submits each show and remove the spinner and render whichever reply
//! arrives last.

use std::future::Future;

use web_time::Instant;

use crate::alert::Alert;
use crate::camera::{self, CaptureDevice, VideoConstraints, VideoSink};
use crate::client::DetectionClient;
use crate::error::PageError;
use crate::model::DashboardStats;
use crate::render::{self, StreamStatus};
use crate::surface::{LoadingGuard, Region, Stat, UiSurface};
use crate::upload::{self, PickedFile};

/// Prefix of the alert shown when an upload fails in transit.
pub const SUBMIT_ERROR_PREFIX: &str = "Error processing image: ";
/// Prefix of the alert shown when the camera cannot be opened.
pub const WEBCAM_ERROR_PREFIX: &str = "Error accessing webcam: ";
/// Prefix of the alert shown when statistics cannot be loaded.
pub const STATS_ERROR_PREFIX: &str = "Error loading statistics: ";

/// A file the user picked, readable as a data URL for the preview.
pub trait PreviewFile {
    /// Name, media type and size.
    fn info(&self) -> PickedFile;

    /// Decode the file to a `data:` URL.
    fn read_data_url(&self) -> impl Future<Output = Result<String, PageError>>;
}

/// How a submission ended.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Nothing was selected; no request was made
    NoFile,
    /// Results were rendered
    Rendered {
        /// Number of detections in the reply
        detections: usize,
    },
    /// The server answered with a failure status
    Rejected,
    /// The request or the reply decoding failed
    Failed,
}

/// Event handlers for the detection page.
pub struct PageController<U, C> {
    surface: U,
    client: C,
}

impl<U, C> PageController<U, C> {
    /// Create a controller writing to `surface` and talking to `client`.
    ///
    /// Handlers that never hit the network work with any `client`, `()` included.
    pub fn new(surface: U, client: C) -> Self {
        Self { surface, client }
    }
}

impl<U: UiSurface, C> PageController<U, C> {
    /// The surface this controller writes to.
    pub fn surface(&self) -> &U {
        &self.surface
    }

    /// Show an alert.
    pub fn show_alert(&self, alert: &Alert) {
        self.surface.show_alert(alert);
    }

    /// Report a submission that failed before or during the request.
    pub fn report_submit_error(&self, error: &PageError) -> SubmitOutcome {
        log::error!("Detection request failed: {}", error);
        self.surface
            .show_alert(&Alert::from_error(error, SUBMIT_ERROR_PREFIX));
        SubmitOutcome::Failed
    }

    /// Handle files from the file dialog or a drop.
    ///
    /// Only the first file is looked at. A non-image file is reported with a
    /// warning and never read. Returns whether a preview was rendered.
    pub async fn handle_files<F: PreviewFile>(&self, files: &[F]) -> bool {
        let infos: Vec<PickedFile> = files.iter().map(PreviewFile::info).collect();

        match upload::select_image(&infos) {
            Ok(None) => {
                log::debug!("Empty file selection");
                false
            }
            Ok(Some(picked)) => {
                log::debug!("Previewing {} ({} bytes)", picked.name, picked.size);
                match files[0].read_data_url().await {
                    Ok(url) => {
                        self.surface
                            .render(Region::Preview, render::render_preview(&url).into());
                        true
                    }
                    Err(e) => {
                        log::error!("Failed to read {}: {}", picked.name, e);
                        self.surface.show_alert(&Alert::from_error(&e, ""));
                        false
                    }
                }
            }
            Err(e) => {
                log::warn!("Rejected file: {}", e);
                self.surface.show_alert(&Alert::from_error(&e, ""));
                false
            }
        }
    }

    /// Show the live stream image and mark the status as live.
    pub fn start_stream(&self, feed_url: &str) {
        log::info!("Starting video stream from {}", feed_url);
        self.surface
            .render(Region::VideoContainer, render::render_stream(feed_url).into());
        self.surface.render(
            Region::StreamStatus,
            render::render_stream_status(StreamStatus::Live).into(),
        );
    }

    /// Replace the stream with a placeholder and mark the status as stopped.
    pub fn stop_stream(&self) {
        log::info!("Stopping video stream");
        self.surface
            .render(Region::VideoContainer, render::render_stream_stopped().into());
        self.surface.render(
            Region::StreamStatus,
            render::render_stream_status(StreamStatus::Stopped).into(),
        );
    }

    /// Open the camera and show it in `sink`.
    pub async fn start_webcam<D, S>(&self, device: &D, sink: &S, constraints: VideoConstraints) -> bool
    where
        D: CaptureDevice,
        S: VideoSink<Stream = D::Stream>,
    {
        match camera::start(device, sink, constraints).await {
            Ok(()) => {
                log::info!("Webcam started at {}x{}", constraints.width, constraints.height);
                self.surface
                    .show_alert(&Alert::success("Webcam started successfully"));
                true
            }
            Err(e) => {
                log::error!("Webcam failed: {}", e);
                self.surface
                    .show_alert(&Alert::from_error(&e, WEBCAM_ERROR_PREFIX));
                false
            }
        }
    }

    /// Release the camera shown in `sink`. Does nothing if none is attached.
    pub fn stop_webcam<S: VideoSink>(&self, sink: &S) -> bool {
        let stopped = camera::stop(sink);
        if stopped {
            log::info!("Webcam stopped");
            self.surface.show_alert(&Alert::info("Webcam stopped"));
        }
        stopped
    }
}

impl<U: UiSurface, C: DetectionClient> PageController<U, C> {
    /// Submit an upload, or warn if nothing was selected.
    ///
    /// The spinner is shown in the results region for the whole request and
    /// removed afterwards on every path.
    pub async fn submit(&self, upload: Option<C::Upload>) -> SubmitOutcome {
        let Some(upload) = upload else {
            log::warn!("Submit without a selected file");
            self.surface
                .show_alert(&Alert::from_error(&PageError::NoFileSelected, ""));
            return SubmitOutcome::NoFile;
        };

        let _loading = LoadingGuard::show(&self.surface, Region::Results);
        let started = Instant::now();
        let reply = self.client.detect(&upload).await;
        log::debug!("Detection request finished in {:?}", started.elapsed());

        match reply {
            Ok(response) if response.is_success() => {
                log::info!("Detection succeeded with {} detections", response.detections.len());
                self.surface
                    .render(Region::Results, render::render_results(&response).into());
                self.surface.reveal(Region::Results);
                self.surface
                    .show_alert(&Alert::success("Detection completed successfully!"));
                SubmitOutcome::Rendered {
                    detections: response.detections.len(),
                }
            }
            Ok(response) => {
                log::warn!("Detection rejected: {}", response.failure_message());
                self.surface
                    .show_alert(&Alert::danger(response.failure_message()));
                SubmitOutcome::Rejected
            }
            Err(e) => self.report_submit_error(&e),
        }
    }

    /// Load dashboard statistics and update the counters and alert list.
    pub async fn load_stats(&self, url: &str) -> Option<DashboardStats> {
        match self.client.fetch_stats(url).await {
            Ok(stats) => {
                log::debug!("Loaded stats: {} detections", stats.total_detections);
                self.surface.animate_stat(Stat::Total, stats.total_detections);
                self.surface.animate_stat(Stat::Fire, stats.fire_detections);
                self.surface.animate_stat(Stat::Smoke, stats.smoke_detections);
                self.surface
                    .render(Region::RecentAlerts, render::render_recent_alerts(&stats).into());
                Some(stats)
            }
            Err(e) => {
                log::error!("Failed to load stats from {}: {}", url, e);
                self.surface
                    .show_alert(&Alert::from_error(&e, STATS_ERROR_PREFIX));
                None
            }
        }
    }
}

#[cfg(test)]
mod tests;
