//! Controller scenarios against recording fakes.

use std::cell::Cell;

use pollster::block_on;

use super::*;
use crate::alert::Severity;
use crate::camera::testing::{FakeDevice, FakeVideo};
use crate::model::{Detection, DetectionResponse, RecentAlert};
use crate::render::{NO_DETECTION_MESSAGE, STREAM_STOPPED_MESSAGE};
use crate::surface::testing::{Call, RecordingSurface};

/// Canned reply for the stub client.
enum Reply {
    Response(DetectionResponse),
    Network(&'static str),
    BadJson,
}

struct StubClient {
    reply: Reply,
    stats: Option<DashboardStats>,
    detect_calls: Cell<u32>,
}

impl StubClient {
    fn replying(reply: Reply) -> Self {
        Self {
            reply,
            stats: None,
            detect_calls: Cell::new(0),
        }
    }
}

impl DetectionClient for StubClient {
    type Upload = &'static str;

    async fn detect(&self, _upload: &&'static str) -> Result<DetectionResponse, PageError> {
        self.detect_calls.set(self.detect_calls.get() + 1);
        match &self.reply {
            Reply::Response(response) => Ok(response.clone()),
            Reply::Network(message) => Err(PageError::Network((*message).to_string())),
            Reply::BadJson => DetectionResponse::from_json("<!doctype html>"),
        }
    }

    async fn fetch_stats(&self, _url: &str) -> Result<DashboardStats, PageError> {
        self.stats
            .clone()
            .ok_or_else(|| PageError::Network("503 Service Unavailable".into()))
    }
}

struct FakeFile {
    info: PickedFile,
    reads: Cell<u32>,
}

impl FakeFile {
    fn new(name: &str, media_type: &str) -> Self {
        Self {
            info: PickedFile::new(name, media_type, 2048),
            reads: Cell::new(0),
        }
    }
}

impl PreviewFile for FakeFile {
    fn info(&self) -> PickedFile {
        self.info.clone()
    }

    async fn read_data_url(&self) -> Result<String, PageError> {
        self.reads.set(self.reads.get() + 1);
        Ok(format!("data:{};base64,AAAA", self.info.media_type))
    }
}

fn controller(reply: Reply) -> PageController<RecordingSurface, StubClient> {
    PageController::new(RecordingSurface::default(), StubClient::replying(reply))
}

fn fire_reply() -> Reply {
    Reply::Response(
        DetectionResponse::success(vec![Detection::new("Fire", 0.873)]).with_result_image("x.jpg"),
    )
}

#[test]
fn test_non_image_file_warns_and_skips_preview() {
    let page = controller(fire_reply());
    let files = [FakeFile::new("report.pdf", "application/pdf")];

    assert!(!block_on(page.handle_files(&files)));

    assert_eq!(files[0].reads.get(), 0, "file must not be read");
    assert!(page.surface().renders(Region::Preview).is_empty());
    let alerts = page.surface().alerts();
    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0].severity, Severity::Warning);
    assert_eq!(alerts[0].message, "Please select an image file");
}

#[test]
fn test_image_file_renders_preview() {
    let page = controller(fire_reply());
    let files = [FakeFile::new("cam.png", "image/png"), FakeFile::new("b.png", "image/png")];

    assert!(block_on(page.handle_files(&files)));

    assert_eq!(files[0].reads.get(), 1);
    assert_eq!(files[1].reads.get(), 0, "only the first file is used");
    let previews = page.surface().renders(Region::Preview);
    assert_eq!(previews.len(), 1);
    assert_eq!(
        previews[0].find_by_tag("img")[0].get_attr("src"),
        Some("data:image/png;base64,AAAA")
    );
    assert!(page.surface().alerts().is_empty());
}

#[test]
fn test_empty_selection_does_nothing() {
    let page = controller(fire_reply());
    let files: [FakeFile; 0] = [];

    assert!(!block_on(page.handle_files(&files)));
    assert!(page.surface().calls().is_empty());
}

#[test]
fn test_submit_without_file_never_calls_client() {
    let page = controller(fire_reply());

    assert_eq!(block_on(page.submit(None)), SubmitOutcome::NoFile);

    assert_eq!(page.client.detect_calls.get(), 0);
    assert_eq!(
        page.surface().calls(),
        vec![Call::Alert(Alert::warning("Please select an image first"))],
        "no spinner, no render"
    );
}

#[test]
fn test_successful_submit_renders_results() {
    let page = controller(fire_reply());

    let outcome = block_on(page.submit(Some("form")));
    assert_eq!(outcome, SubmitOutcome::Rendered { detections: 1 });
    assert_eq!(page.client.detect_calls.get(), 1);

    let results = page.surface().renders(Region::Results);
    assert_eq!(results.len(), 1);
    let text = results[0].text_content();
    assert!(text.contains("87.3% confident"));
    assert!(text.contains("🔥"));
    assert_eq!(results[0].find_by_tag("img").len(), 1);

    assert_eq!(
        page.surface().alerts(),
        vec![Alert::success("Detection completed successfully!")]
    );
    assert!(page.surface().position(&Call::Reveal(Region::Results)).is_some());
}

#[test]
fn test_spinner_wraps_request_and_is_removed_last() {
    let page = controller(fire_reply());
    block_on(page.submit(Some("form")));

    let calls = page.surface().calls();
    assert_eq!(calls.first(), Some(&Call::ShowLoading(Region::Results)));
    assert_eq!(calls.last(), Some(&Call::HideLoading));
    assert_eq!(calls.iter().filter(|c| **c == Call::HideLoading).count(), 1);
}

#[test]
fn test_submit_with_no_detections() {
    let page = controller(Reply::Response(DetectionResponse::success(Vec::new())));

    let outcome = block_on(page.submit(Some("form")));
    assert_eq!(outcome, SubmitOutcome::Rendered { detections: 0 });

    let results = page.surface().renders(Region::Results);
    assert!(results[0].text_content().contains(NO_DETECTION_MESSAGE));
    assert!(results[0].find_by_class("detection-item").is_empty());
}

#[test]
fn test_server_failure_uses_server_message() {
    let page = controller(Reply::Response(DetectionResponse::failure(
        "Error processing image: cannot identify image file",
    )));

    assert_eq!(block_on(page.submit(Some("form"))), SubmitOutcome::Rejected);

    assert!(page.surface().renders(Region::Results).is_empty());
    assert_eq!(
        page.surface().alerts(),
        vec![Alert::danger("Error processing image: cannot identify image file")]
    );
    assert_eq!(page.surface().calls().last(), Some(&Call::HideLoading));
}

#[test]
fn test_server_failure_without_message_uses_default() {
    let mut response = DetectionResponse::failure("");
    response.message = None;
    let page = controller(Reply::Response(response));

    block_on(page.submit(Some("form")));
    assert_eq!(page.surface().alerts(), vec![Alert::danger("Detection failed")]);
}

#[test]
fn test_network_error_is_danger_alert() {
    let page = controller(Reply::Network("Failed to fetch"));

    assert_eq!(block_on(page.submit(Some("form"))), SubmitOutcome::Failed);

    assert_eq!(
        page.surface().alerts(),
        vec![Alert::danger("Error processing image: Failed to fetch")]
    );
    assert_eq!(page.surface().calls().last(), Some(&Call::HideLoading));
}

#[test]
fn test_invalid_json_is_danger_alert() {
    let page = controller(Reply::BadJson);

    assert_eq!(block_on(page.submit(Some("form"))), SubmitOutcome::Failed);

    let alerts = page.surface().alerts();
    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0].severity, Severity::Danger);
    assert!(alerts[0].message.starts_with(SUBMIT_ERROR_PREFIX));
    assert_eq!(page.surface().calls().last(), Some(&Call::HideLoading));
}

#[test]
fn test_unreadable_form_is_danger_not_missing_file() {
    let page = controller(fire_reply());

    let outcome = page.report_submit_error(&PageError::Js("form is detached".to_string()));

    assert_eq!(outcome, SubmitOutcome::Failed);
    assert_eq!(page.client.detect_calls.get(), 0);
    assert_eq!(
        page.surface().calls(),
        vec![Call::Alert(Alert::danger("Error processing image: form is detached"))]
    );
}

#[test]
fn test_stream_start_and_stop() {
    let page = controller(fire_reply());

    page.start_stream("/video-feed/");
    let live = page.surface().renders(Region::VideoContainer);
    assert_eq!(live[0].as_element().unwrap().get_attr("src"), Some("/video-feed/"));
    assert_eq!(
        page.surface().renders(Region::StreamStatus)[0].text_content(),
        "● Live"
    );

    page.stop_stream();
    let containers = page.surface().renders(Region::VideoContainer);
    assert_eq!(containers[1].text_content(), STREAM_STOPPED_MESSAGE);
    assert_eq!(
        page.surface().renders(Region::StreamStatus)[1].text_content(),
        "● Stopped"
    );
}

#[test]
fn test_webcam_start_then_stop() {
    let page = controller(fire_reply());
    let device = FakeDevice::default();
    let video = FakeVideo::default();

    assert!(block_on(page.start_webcam(&device, &video, VideoConstraints::default())));
    assert!(page.stop_webcam(&video));

    assert!(device.opened.borrow().iter().all(|t| t.stopped.get()));
    assert!(video.stream.borrow().is_none());
    assert_eq!(
        page.surface().alerts(),
        vec![
            Alert::success("Webcam started successfully"),
            Alert::info("Webcam stopped"),
        ]
    );
}

#[test]
fn test_webcam_denied() {
    let page = controller(fire_reply());
    let device = FakeDevice {
        deny: true,
        ..Default::default()
    };
    let video = FakeVideo::default();

    assert!(!block_on(page.start_webcam(&device, &video, VideoConstraints::default())));
    assert_eq!(
        page.surface().alerts(),
        vec![Alert::danger("Error accessing webcam: Permission denied")]
    );
}

#[test]
fn test_stop_webcam_without_stream_is_silent() {
    let page = controller(fire_reply());
    let video = FakeVideo::default();

    assert!(!page.stop_webcam(&video));
    assert!(page.surface().calls().is_empty());
}

#[test]
fn test_load_stats_updates_counters() {
    let mut client = StubClient::replying(fire_reply());
    client.stats = Some(DashboardStats {
        total_detections: 9,
        fire_detections: 6,
        smoke_detections: 3,
        recent_alerts: vec![RecentAlert {
            id: 9,
            detection_type: "fire".into(),
            confidence: 88.0,
            detected_at: "2026-10-16 10:00:00".into(),
        }],
        timestamp: "2026-10-16 10:00:05".into(),
    });
    let page = PageController::new(RecordingSurface::default(), client);

    assert!(block_on(page.load_stats("/api/stats/")).is_some());

    let calls = page.surface().calls();
    assert!(calls.contains(&Call::AnimateStat(Stat::Total, 9)));
    assert!(calls.contains(&Call::AnimateStat(Stat::Fire, 6)));
    assert!(calls.contains(&Call::AnimateStat(Stat::Smoke, 3)));
    let list = page.surface().renders(Region::RecentAlerts);
    assert_eq!(list[0].find_by_class("recent-alert").len(), 1);
}

#[test]
fn test_load_stats_failure() {
    let page = controller(fire_reply());

    assert!(block_on(page.load_stats("/api/stats/")).is_none());
    assert_eq!(
        page.surface().alerts(),
        vec![Alert::danger("Error loading statistics: 503 Service Unavailable")]
    );
}
