//! DOM-backed [`UiSurface`].

use std::time::Duration;

use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement};

use crate::alert::Alert;
use crate::config::{ElementIds, PageConfig, StatsConfig};
use crate::constants::{ALERT_CONTAINER_ID, ALERT_CONTAINER_STYLE, ALERT_FADE, LOADER_ID};
use crate::counter::CounterAnimation;
use crate::error::PageError;
use crate::render;
use crate::surface::{Region, Stat, UiSurface};
use crate::view::Node;

use super::dom;

/// Class that makes a region visible.
const SHOW_CLASS: &str = "show";

/// The page as seen by the controller.
///
/// Holds the document and the ids of every region. Cloning is cheap; each
/// bound handler keeps its own copy.
#[derive(Clone)]
pub struct DomSurface {
    document: Document,
    elements: ElementIds,
    stats: StatsConfig,
    alert_lifetime: Duration,
    counter_duration: Duration,
}

impl DomSurface {
    /// A surface over the current document using the configured ids.
    pub fn new(config: &PageConfig) -> Result<Self, PageError> {
        Ok(Self {
            document: dom::document()?,
            elements: config.elements.clone(),
            stats: config.stats.clone(),
            alert_lifetime: config.alert_lifetime(),
            counter_duration: config.counter_duration(),
        })
    }

    /// Point a region at a different element id.
    pub fn with_region_id(mut self, region: Region, id: impl Into<String>) -> Self {
        let id = id.into();
        match region {
            Region::Preview => self.elements.preview = id,
            Region::Results => self.elements.results = id,
            Region::VideoContainer => self.elements.video_container = id,
            Region::StreamStatus => self.elements.stream_status = id,
            Region::RecentAlerts => self.stats.recent_alerts_id = id,
        }
        self
    }

    fn region_id(&self, region: Region) -> &str {
        match region {
            Region::Preview => &self.elements.preview,
            Region::Results => &self.elements.results,
            Region::VideoContainer => &self.elements.video_container,
            Region::StreamStatus => &self.elements.stream_status,
            Region::RecentAlerts => &self.stats.recent_alerts_id,
        }
    }

    fn stat_id(&self, stat: Stat) -> &str {
        match stat {
            Stat::Total => &self.stats.total_id,
            Stat::Fire => &self.stats.fire_id,
            Stat::Smoke => &self.stats.smoke_id,
        }
    }

    fn region(&self, region: Region) -> Option<Element> {
        self.document.get_element_by_id(self.region_id(region))
    }

    fn alert_container(&self) -> Result<Element, PageError> {
        if let Some(container) = self.document.get_element_by_id(ALERT_CONTAINER_ID) {
            return Ok(container);
        }
        let body = self
            .document
            .body()
            .ok_or_else(|| PageError::missing_element("body"))?;
        let container = self.document.create_element("div").map_err(dom::js_error)?;
        container.set_id(ALERT_CONTAINER_ID);
        container
            .set_attribute("style", ALERT_CONTAINER_STYLE)
            .map_err(dom::js_error)?;
        body.append_child(&container).map_err(dom::js_error)?;
        Ok(container)
    }

    fn try_show_alert(&self, alert: &Alert) -> Result<(), PageError> {
        let container = self.alert_container()?;
        let node: Node = alert.view().into();
        let built = dom::build(&self.document, &node).map_err(dom::js_error)?;
        container.append_child(&built).map_err(dom::js_error)?;

        let Ok(element) = built.dyn_into::<HtmlElement>() else {
            return Ok(());
        };
        dom::set_timeout(
            move || {
                let _ = element
                    .style()
                    .set_property("animation", "fadeOut 0.4s ease");
                let _ = dom::set_timeout(move || element.remove(), ALERT_FADE);
            },
            self.alert_lifetime,
        )?;
        Ok(())
    }
}

impl UiSurface for DomSurface {
    fn show_alert(&self, alert: &Alert) {
        if let Err(e) = self.try_show_alert(alert) {
            log::error!("Could not show alert {:?}: {}", alert.message, e);
        }
    }

    fn render(&self, region: Region, node: Node) {
        let Some(target) = self.region(region) else {
            log::debug!("Skipping render into missing {:?}", region);
            return;
        };
        if let Err(e) = dom::mount(&target, &node) {
            log::error!("Rendering {:?} failed: {}", region, dom::js_message(&e));
        }
    }

    fn reveal(&self, region: Region) {
        if let Some(target) = self.region(region) {
            let _ = target.class_list().add_1(SHOW_CLASS);
        }
    }

    fn show_loading(&self, region: Region) {
        let Some(target) = self.region(region) else {
            return;
        };
        if let Err(e) = dom::mount(&target, &render::render_loader().into()) {
            log::error!("Showing spinner failed: {}", dom::js_message(&e));
            return;
        }
        let _ = target.class_list().add_1(SHOW_CLASS);
    }

    fn hide_loading(&self) {
        if let Some(loader) = self.document.get_element_by_id(LOADER_ID) {
            loader.remove();
        }
    }

    fn animate_stat(&self, stat: Stat, value: u64) {
        let Some(element) = self.document.get_element_by_id(self.stat_id(stat)) else {
            log::debug!("No counter for {:?}", stat);
            return;
        };
        let target = i64::try_from(value).unwrap_or(i64::MAX);
        let animation = CounterAnimation::new(target, self.counter_duration);
        if let Err(e) = dom::animate_counter(element, animation) {
            log::error!("Counter animation failed: {}", e);
        }
    }
}
