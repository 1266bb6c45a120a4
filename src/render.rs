//! Pure renderers from data to view trees.
//!
//! Everything the page shows that is more than a class toggle is produced
//! here, so it can be checked without a document.

use crate::model::{DashboardStats, Detection, DetectionResponse, RecentAlert};
use crate::view::{ElementNode, el};

/// Shown instead of the detection list when nothing was found.
pub const NO_DETECTION_MESSAGE: &str = "No fire or smoke detected ✓";

/// Shown in the video container after the stream is stopped.
pub const STREAM_STOPPED_MESSAGE: &str = "Video stream stopped";

/// State of the live video stream indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamStatus {
    /// Stream image is attached
    Live,
    /// Stream was stopped
    Stopped,
}

impl StreamStatus {
    fn label(&self) -> &'static str {
        match self {
            StreamStatus::Live => "● Live",
            StreamStatus::Stopped => "● Stopped",
        }
    }

    fn color(&self) -> &'static str {
        match self {
            StreamStatus::Live => "var(--success-color)",
            StreamStatus::Stopped => "var(--danger-color)",
        }
    }
}

/// Render the results card for a detection response.
pub fn render_results(response: &DetectionResponse) -> ElementNode {
    let image = response.result_image().map(|url| {
        el("div")
            .class("result-image-container")
            .push(el("img").attr("src", url).attr("alt", "Detection Result"))
    });

    let body = if response.detections.is_empty() {
        el("p")
            .style("text-align", "center")
            .style("color", "var(--success-color)")
            .push(NO_DETECTION_MESSAGE)
    } else {
        el("div").class("detections-list").extend(
            response
                .detections
                .iter()
                .enumerate()
                .map(|(index, detection)| render_detection_item(index, detection)),
        )
    };

    el("div").class("card").push(
        el("div")
            .class("card-content")
            .push(el("h2").push("Detection Results"))
            .push_maybe(image)
            .push(body),
    )
}

/// Render one entry of the detection list. `index` staggers the entry animation.
pub fn render_detection_item(index: usize, detection: &Detection) -> ElementNode {
    let confidence = detection.confidence_label();
    let delay = format!("{}s", index as f64 / 10.0);

    el("div")
        .class("detection-item")
        .style("animation-delay", delay)
        .push(el("div").class("detection-icon").push(detection.kind().icon()))
        .push(
            el("div")
                .class("detection-info")
                .push(el("h4").push(detection.class_name.as_str()))
                .push(el("p").push(format!("{confidence}% confident")))
                .push(
                    el("div").class("confidence-bar").push(
                        el("div")
                            .class("confidence-fill")
                            .style("width", format!("{confidence}%")),
                    ),
                ),
        )
}

/// Render the local preview of a picked file.
pub fn render_preview(data_url: &str) -> ElementNode {
    el("div")
        .class("result-image-container")
        .style("animation", "zoomIn 0.6s ease")
        .push(el("img").attr("src", data_url).attr("alt", "Preview"))
}

/// Render the live stream image.
pub fn render_stream(feed_url: &str) -> ElementNode {
    el("img")
        .attr("src", feed_url)
        .attr("alt", "Live Video Feed")
        .style("width", "100%")
        .style("height", "auto")
}

/// Render the placeholder shown after the stream is stopped.
pub fn render_stream_stopped() -> ElementNode {
    el("p")
        .style("text-align", "center")
        .style("padding", "3rem")
        .push(STREAM_STOPPED_MESSAGE)
}

/// Render the stream status indicator.
pub fn render_stream_status(status: StreamStatus) -> ElementNode {
    el("span").style("color", status.color()).push(status.label())
}

/// Render the loading spinner.
pub fn render_loader() -> ElementNode {
    el("div").class("loader").id(crate::constants::LOADER_ID)
}

/// Render the list of recent alerts from the stats endpoint.
pub fn render_recent_alerts(stats: &DashboardStats) -> ElementNode {
    if stats.recent_alerts.is_empty() {
        return el("p").class("no-alerts").push("No recent alerts");
    }
    el("ul")
        .class("recent-alerts")
        .extend(stats.recent_alerts.iter().map(render_recent_alert))
}

fn render_recent_alert(alert: &RecentAlert) -> ElementNode {
    el("li")
        .class("recent-alert")
        .class(format!("recent-alert-{}", alert.detection_type))
        .attr("data-id", alert.id.to_string())
        .push(el("strong").push(alert.type_label()))
        .push(el("span").class("recent-alert-confidence").push(alert.confidence_label()))
        .push(el("time").push(alert.detected_at.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::Node;

    fn fire_response() -> DetectionResponse {
        DetectionResponse::success(vec![Detection::new("Fire", 0.873)]).with_result_image("x.jpg")
    }

    #[test]
    fn test_render_fire_detection() {
        let node: Node = render_results(&fire_response()).into();
        let text = node.text_content();

        assert!(text.contains("87.3% confident"));
        assert!(text.contains("🔥"));
        assert!(!text.contains("💨"));

        let images = node.find_by_tag("img");
        assert_eq!(images.len(), 1);
        assert_eq!(images[0].get_attr("src"), Some("x.jpg"));
    }

    #[test]
    fn test_confidence_bar_width() {
        let node: Node = render_results(&fire_response()).into();
        let fills = node.find_by_class("confidence-fill");

        assert_eq!(fills.len(), 1);
        assert_eq!(fills[0].get_style("width"), Some("87.3%"));
    }

    #[test]
    fn test_half_percent_rounds_up() {
        let response = DetectionResponse::success(vec![Detection::new("Fire", 0.5625)]);
        let node: Node = render_results(&response).into();

        assert!(node.text_content().contains("56.3% confident"));
        assert_eq!(
            node.find_by_class("confidence-fill")[0].get_style("width"),
            Some("56.3%")
        );
    }

    #[test]
    fn test_null_detections_render_nothing_found() {
        let response =
            DetectionResponse::from_json(r#"{"status": "success", "detections": null}"#).unwrap();
        let node: Node = render_results(&response).into();

        assert!(node.text_content().contains(NO_DETECTION_MESSAGE));
        assert!(node.find_by_class("detection-item").is_empty());
    }

    #[test]
    fn test_render_no_detections() {
        let node: Node = render_results(&DetectionResponse::success(Vec::new())).into();

        assert!(node.text_content().contains(NO_DETECTION_MESSAGE));
        assert!(node.find_by_class("detection-item").is_empty());
        assert!(node.find_by_class("detections-list").is_empty());
        assert!(node.find_by_tag("img").is_empty());
    }

    #[test]
    fn test_items_are_staggered() {
        let response = DetectionResponse::success(vec![
            Detection::new("Fire", 0.9),
            Detection::new("Smoke", 0.5),
            Detection::new("Smoke", 0.4),
        ]);
        let node: Node = render_results(&response).into();
        let items = node.find_by_class("detection-item");

        assert_eq!(items.len(), 3);
        assert_eq!(items[0].get_style("animation-delay"), Some("0s"));
        assert_eq!(items[1].get_style("animation-delay"), Some("0.1s"));
        assert_eq!(items[2].get_style("animation-delay"), Some("0.2s"));
        assert!(items[1].children[0].text_content().contains("💨"));
    }

    #[test]
    fn test_class_name_is_escaped() {
        let response = DetectionResponse::success(vec![Detection::new("<img onerror=x>", 0.5)]);
        let html = Node::from(render_results(&response)).to_html();
        assert!(html.contains("&lt;img onerror=x&gt;"));
    }

    #[test]
    fn test_stream_views() {
        let live: Node = render_stream("/video-feed/").into();
        assert_eq!(live.as_element().unwrap().get_attr("src"), Some("/video-feed/"));

        let stopped: Node = render_stream_stopped().into();
        assert_eq!(stopped.text_content(), STREAM_STOPPED_MESSAGE);

        let status: Node = render_stream_status(StreamStatus::Live).into();
        assert_eq!(status.text_content(), "● Live");
        let status: Node = render_stream_status(StreamStatus::Stopped).into();
        assert_eq!(status.text_content(), "● Stopped");
    }

    #[test]
    fn test_loader_has_fixed_id() {
        let loader = render_loader();
        assert_eq!(loader.get_attr("id"), Some(crate::constants::LOADER_ID));
        assert!(loader.has_class("loader"));
    }

    #[test]
    fn test_recent_alerts() {
        let mut stats = DashboardStats::default();
        let empty: Node = render_recent_alerts(&stats).into();
        assert_eq!(empty.text_content(), "No recent alerts");

        stats.recent_alerts.push(RecentAlert {
            id: 3,
            detection_type: "smoke".into(),
            confidence: 64.0,
            detected_at: "2026-10-16 09:30:00".into(),
        });
        let list: Node = render_recent_alerts(&stats).into();
        let items = list.find_by_class("recent-alert");
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].get_attr("data-id"), Some("3"));
        assert!(list.text_content().contains("64.0%"));
    }
}
