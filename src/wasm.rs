//! Browser entry point and the `window.FireDetection` API.

use std::rc::Rc;
use std::time::Duration;

use js_sys::{Promise, Reflect};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::future_to_promise;
use web_sys::{Element, HtmlFormElement, HtmlInputElement, HtmlVideoElement};

use crate::alert::{Alert, Severity};
use crate::camera::VideoConstraints;
use crate::config::PageConfig;
use crate::controller::{PageController, WEBCAM_ERROR_PREFIX};
use crate::counter::CounterAnimation;
use crate::error::PageError;
use crate::surface::{Region, UiSurface};
use crate::web::{BrowserCamera, DomSurface, FetchClient, VideoElement, bindings, dom};

/// Name of the API object installed on `window`.
const GLOBAL_NAME: &str = "FireDetection";

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
    if let Err(e) = console_log::init_with_level(log::Level::Trace) {
        web_sys::console::warn_1(&format!("Logger already initialized: {}", e).into());
    }

    let config = Rc::new(PageConfig::load_from_page());
    log::set_max_level(config.log_level.to_level_filter());
    log::info!("Fire detection page starting");

    let api = FireDetection {
        config: Rc::clone(&config),
    };
    if let Err(e) = install(api) {
        log::error!("Could not install window.{}: {}", GLOBAL_NAME, e);
    }
    if let Err(e) = on_ready(move || init_page(&config)) {
        log::error!("Could not schedule page setup: {}", e);
    }
}

fn install(api: FireDetection) -> Result<(), PageError> {
    let window = dom::window()?;
    Reflect::set(&window, &GLOBAL_NAME.into(), &JsValue::from(api)).map_err(dom::js_error)?;
    Ok(())
}

/// Run `f` once the document is parsed, immediately if it already is.
fn on_ready(f: impl FnOnce() + 'static) -> Result<(), PageError> {
    let document = dom::document()?;
    if document.ready_state() != "loading" {
        f();
        return Ok(());
    }
    let callback = Closure::once_into_js(f);
    document
        .add_event_listener_with_callback("DOMContentLoaded", callback.unchecked_ref())
        .map_err(dom::js_error)
}

/// Page-wide behavior every page gets.
fn init_page(config: &PageConfig) {
    let (window, document) = match (dom::window(), dom::document()) {
        (Ok(window), Ok(document)) => (window, document),
        (Err(e), _) | (_, Err(e)) => {
            log::error!("Page setup skipped: {}", e);
            return;
        }
    };

    if let Err(e) = bindings::bind_navigation(&window, &document, config) {
        log::error!("Navigation setup failed: {}", e);
    }
    bindings::animate_counters(&document, config);
    if let Err(e) = bindings::observe_cards(&document, config) {
        log::error!("Scroll reveal setup failed: {}", e);
    }

    let Some(url) = config.stats.url.clone() else {
        return;
    };
    match DomSurface::new(config) {
        Ok(surface) => wasm_bindgen_futures::spawn_local(async move {
            let page = PageController::new(surface, FetchClient::new(url.clone()));
            page.load_stats(&url).await;
        }),
        Err(e) => log::error!("Statistics skipped: {}", e),
    }
}

fn to_js(e: PageError) -> JsValue {
    js_sys::Error::new(&e.to_string()).into()
}

/// Page API callable from templates, installed as `window.FireDetection`.
///
/// Element id arguments are optional and default to the configured ids.
#[wasm_bindgen]
pub struct FireDetection {
    config: Rc<PageConfig>,
}

impl FireDetection {
    fn surface(&self) -> Result<DomSurface, JsValue> {
        DomSurface::new(&self.config).map_err(to_js)
    }

    fn video(&self, video_id: Option<String>) -> Result<Option<VideoElement>, JsValue> {
        let id = video_id.unwrap_or_else(|| self.config.elements.webcam_video.clone());
        let document = dom::document().map_err(to_js)?;
        Ok(dom::by_id::<HtmlVideoElement>(&document, &id).map(VideoElement))
    }

    fn stream_surface(&self, container_id: Option<String>, status_id: Option<String>) -> Result<DomSurface, JsValue> {
        let mut surface = self.surface()?;
        if let Some(id) = container_id {
            surface = surface.with_region_id(Region::VideoContainer, id);
        }
        if let Some(id) = status_id {
            surface = surface.with_region_id(Region::StreamStatus, id);
        }
        Ok(surface)
    }
}

#[wasm_bindgen]
impl FireDetection {
    /// A standalone API object reading the page's configuration.
    #[wasm_bindgen(constructor)]
    pub fn new() -> FireDetection {
        Self {
            config: Rc::new(PageConfig::load_from_page()),
        }
    }

    #[wasm_bindgen(js_name = initializeFileUpload)]
    pub fn initialize_file_upload(
        &self,
        upload_area_id: Option<String>,
        file_input_id: Option<String>,
        preview_id: Option<String>,
    ) -> Result<(), JsValue> {
        let ids = &self.config.elements;
        let area_id = upload_area_id.unwrap_or_else(|| ids.upload_area.clone());
        let input_id = file_input_id.unwrap_or_else(|| ids.file_input.clone());

        let document = dom::document().map_err(to_js)?;
        let Some(area) = dom::by_id::<Element>(&document, &area_id) else {
            return Ok(());
        };
        let Some(input) = dom::by_id::<HtmlInputElement>(&document, &input_id) else {
            return Ok(());
        };

        let mut surface = self.surface()?;
        if let Some(id) = preview_id {
            surface = surface.with_region_id(Region::Preview, id);
        }
        bindings::bind_file_upload(surface, &area, input).map_err(to_js)?;
        log::debug!("File upload bound to #{}", area_id);
        Ok(())
    }

    #[wasm_bindgen(js_name = detectImage)]
    pub fn detect_image(&self, form_id: Option<String>, results_id: Option<String>) -> Result<(), JsValue> {
        let form_id = form_id.unwrap_or_else(|| self.config.elements.form.clone());
        let document = dom::document().map_err(to_js)?;
        let Some(form) = dom::by_id::<HtmlFormElement>(&document, &form_id) else {
            return Ok(());
        };

        let mut surface = self.surface()?;
        if let Some(id) = results_id {
            surface = surface.with_region_id(Region::Results, id);
        }
        bindings::bind_detection_form(surface, form).map_err(to_js)
    }

    #[wasm_bindgen(js_name = startVideoStream)]
    pub fn start_video_stream(
        &self,
        feed_url: String,
        container_id: Option<String>,
        status_id: Option<String>,
    ) -> Result<(), JsValue> {
        let surface = self.stream_surface(container_id, status_id)?;
        PageController::new(surface, ()).start_stream(&feed_url);
        Ok(())
    }

    #[wasm_bindgen(js_name = stopVideoStream)]
    pub fn stop_video_stream(&self, container_id: Option<String>, status_id: Option<String>) -> Result<(), JsValue> {
        let surface = self.stream_surface(container_id, status_id)?;
        PageController::new(surface, ()).stop_stream();
        Ok(())
    }

    /// Show a transient alert. Unknown severities are shown as info.
    #[wasm_bindgen(js_name = showAlert)]
    pub fn show_alert(&self, message: String, severity: Option<String>) -> Result<(), JsValue> {
        let severity = severity
            .as_deref()
            .map(Severity::parse_lenient)
            .unwrap_or_default();
        self.surface()?.show_alert(&Alert::new(severity, message));
        Ok(())
    }

    /// Resolves to whether the camera started.
    #[wasm_bindgen(js_name = startWebcam)]
    pub fn start_webcam(&self, video_id: Option<String>) -> Result<Promise, JsValue> {
        let surface = self.surface()?;
        let video = self.video(video_id)?;
        let constraints = VideoConstraints::from(self.config.webcam);

        Ok(future_to_promise(async move {
            let Some(video) = video else {
                return Ok(JsValue::FALSE);
            };
            let page = PageController::new(surface, ());
            let camera = match BrowserCamera::new() {
                Ok(camera) => camera,
                Err(e) => {
                    log::error!("No camera access: {}", e);
                    page.show_alert(&Alert::from_error(&e, WEBCAM_ERROR_PREFIX));
                    return Ok(JsValue::FALSE);
                }
            };
            let started = page.start_webcam(&camera, &video, constraints).await;
            Ok(JsValue::from_bool(started))
        }))
    }

    /// Returns whether a stream was stopped.
    #[wasm_bindgen(js_name = stopWebcam)]
    pub fn stop_webcam(&self, video_id: Option<String>) -> Result<bool, JsValue> {
        let Some(video) = self.video(video_id)? else {
            return Ok(false);
        };
        Ok(PageController::new(self.surface()?, ()).stop_webcam(&video))
    }

    /// Count `element`'s text up from zero to `target`.
    #[wasm_bindgen(js_name = animateCounter)]
    pub fn animate_counter(&self, element: Element, target: f64, duration_ms: Option<u32>) -> Result<(), JsValue> {
        let duration = duration_ms
            .map(|ms| Duration::from_millis(u64::from(ms)))
            .unwrap_or_else(|| self.config.counter_duration());
        let animation = CounterAnimation::new(target.trunc() as i64, duration);
        dom::animate_counter(element, animation).map_err(to_js)
    }

    /// Resolves to the loaded statistics, or `null` when loading failed.
    #[wasm_bindgen(js_name = loadStats)]
    pub fn load_stats(&self, url: Option<String>) -> Result<Promise, JsValue> {
        let Some(url) = url.or_else(|| self.config.stats.url.clone()) else {
            return Err(js_sys::Error::new("No statistics URL configured").into());
        };
        let surface = self.surface()?;

        Ok(future_to_promise(async move {
            let page = PageController::new(surface, FetchClient::new(url.clone()));
            let Some(stats) = page.load_stats(&url).await else {
                return Ok(JsValue::NULL);
            };
            let json = serde_json::to_string(&stats).map_err(|e| to_js(e.into()))?;
            js_sys::JSON::parse(&json)
        }))
    }
}

impl Default for FireDetection {
    fn default() -> Self {
        Self::new()
    }
}
