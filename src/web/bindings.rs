//! Event listener wiring.
//!
//! Listeners live as long as the page, so their closures are leaked with
//! `forget` once registered.

use std::cell::RefCell;
use std::rc::Rc;

use js_sys::Array;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    Document, DragEvent, Element, Event, FormData, HtmlElement, HtmlFormElement, HtmlInputElement,
    IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit, Window,
};

use crate::config::PageConfig;
use crate::controller::PageController;
use crate::counter::{self, CounterAnimation};
use crate::error::PageError;
use crate::nav::{self, ACTIVE_CLASS, SCROLLED_CLASS};
use crate::reveal::{RevealOptions, RevealTracker};

use super::dom;
use super::fetch::FetchClient;
use super::media;
use super::surface::DomSurface;

/// Class on the upload area while a file is dragged over it.
const DRAG_OVER_CLASS: &str = "drag-over";

fn listen(
    target: &web_sys::EventTarget,
    event: &str,
    handler: impl FnMut(Event) + 'static,
) -> Result<(), PageError> {
    let closure = Closure::<dyn FnMut(Event)>::new(handler);
    target
        .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
        .map_err(dom::js_error)?;
    closure.forget(); // Leak the closure to keep it alive
    Ok(())
}

/// Toggle the nav bar's scrolled style and highlight the current page's link.
pub fn bind_navigation(window: &Window, document: &Document, config: &PageConfig) -> Result<(), PageError> {
    let path = window.location().pathname().map_err(dom::js_error)?;
    for link in dom::query_all(document, &config.selectors.nav_links) {
        if nav::is_active_link(link.get_attribute("href").as_deref(), &path) {
            let _ = link.class_list().add_1(ACTIVE_CLASS);
        }
    }

    let Ok(Some(nav_bar)) = document.query_selector(&config.selectors.nav) else {
        log::warn!("No navigation bar matches {:?}", config.selectors.nav);
        return Ok(());
    };
    let threshold = config.scroll_threshold_px;
    let scrolled_window = window.clone();
    listen(window, "scroll", move |_: Event| {
        let y = scrolled_window.scroll_y().unwrap_or(0.0);
        let _ = nav_bar
            .class_list()
            .toggle_with_force(SCROLLED_CLASS, nav::is_scrolled(y, threshold));
    })
}

/// Reset every counter element to zero and animate it back to its value.
pub fn animate_counters(document: &Document, config: &PageConfig) {
    for element in dom::query_all(document, &config.selectors.counters) {
        let Some(target) = element.text_content().as_deref().and_then(counter::parse_counter_text) else {
            continue;
        };
        element.set_text_content(Some("0"));
        let animation = CounterAnimation::new(target, config.counter_duration());
        if let Err(e) = dom::animate_counter(element, animation) {
            log::error!("Counter animation failed: {}", e);
        }
    }
}

/// Hide cards and fade each one in the first time it scrolls into view.
pub fn observe_cards(document: &Document, config: &PageConfig) -> Result<(), PageError> {
    let cards = dom::query_all(document, &config.selectors.cards);
    if cards.is_empty() {
        return Ok(());
    }
    let options = RevealOptions::default();

    let tracker = Rc::new(RefCell::new(RevealTracker::new()));
    for index in 0..cards.len() {
        tracker.borrow_mut().observe(index);
    }

    let animation = options.animation.clone();
    let observed = cards.clone();
    let callback = Closure::<dyn FnMut(Array, IntersectionObserver)>::new(
        move |entries: Array, observer: IntersectionObserver| {
            for entry in entries.iter() {
                let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                    continue;
                };
                let target = entry.target();
                let target_node: &web_sys::Node = &target;
                let Some(index) = observed.iter().position(|c| c.is_same_node(Some(target_node))) else {
                    continue;
                };
                if tracker.borrow_mut().on_visibility(&index, entry.is_intersecting()) {
                    if let Some(card) = target.dyn_ref::<HtmlElement>() {
                        let _ = card.style().set_property("animation", &animation);
                    }
                    observer.unobserve(&target);
                }
            }
            if tracker.borrow().pending() == 0 {
                log::debug!("All cards revealed");
                observer.disconnect();
            }
        },
    );

    let init = IntersectionObserverInit::new();
    init.set_threshold(&JsValue::from(options.threshold));
    init.set_root_margin(&options.root_margin);
    let observer = IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)
        .map_err(dom::js_error)?;
    callback.forget();

    for card in &cards {
        if let Some(card) = card.dyn_ref::<HtmlElement>() {
            let _ = card.style().set_property("opacity", "0");
        }
        observer.observe(card);
    }
    log::debug!("Observing {} cards for reveal", cards.len());
    Ok(())
}

/// Wire click-to-browse, file selection and drag-and-drop on an upload area.
pub fn bind_file_upload(
    surface: DomSurface,
    upload_area: &Element,
    input: HtmlInputElement,
) -> Result<(), PageError> {
    let page = Rc::new(PageController::new(surface, ()));

    let picker = input.clone();
    listen(upload_area, "click", move |_: Event| picker.click())?;

    let changed = Rc::clone(&page);
    let source = input.clone();
    listen(&input, "change", move |_: Event| {
        let files = source.files().map(|list| media::files(&list)).unwrap_or_default();
        let page = Rc::clone(&changed);
        wasm_bindgen_futures::spawn_local(async move {
            page.handle_files(&files).await;
        });
    })?;

    let area = upload_area.clone();
    listen(upload_area, "dragover", move |event: Event| {
        event.prevent_default();
        let _ = area.class_list().add_1(DRAG_OVER_CLASS);
    })?;

    let area = upload_area.clone();
    listen(upload_area, "dragleave", move |_: Event| {
        let _ = area.class_list().remove_1(DRAG_OVER_CLASS);
    })?;

    let area = upload_area.clone();
    listen(upload_area, "drop", move |event: Event| {
        event.prevent_default();
        let _ = area.class_list().remove_1(DRAG_OVER_CLASS);
        let files = event
            .dyn_ref::<DragEvent>()
            .and_then(DragEvent::data_transfer)
            .and_then(|transfer| transfer.files())
            .map(|list| media::files(&list))
            .unwrap_or_default();
        let page = Rc::clone(&page);
        wasm_bindgen_futures::spawn_local(async move {
            page.handle_files(&files).await;
        });
    })
}

/// Intercept form submission and post it with `fetch` instead.
pub fn bind_detection_form(surface: DomSurface, form: HtmlFormElement) -> Result<(), PageError> {
    let client = FetchClient::for_form(&form)?;
    log::debug!("Detection form posts to {}", client.endpoint());
    let page = Rc::new(PageController::new(surface, client));

    let submitted = form.clone();
    listen(&form, "submit", move |event: Event| {
        event.prevent_default();

        let has_file = submitted
            .query_selector("input[type=\"file\"]")
            .ok()
            .flatten()
            .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
            .and_then(|input| input.files())
            .is_some_and(|files| files.length() > 0);

        let upload = if has_file {
            match FormData::new_with_form(&submitted) {
                Ok(data) => Some(data),
                Err(e) => {
                    page.report_submit_error(&dom::js_error(e));
                    return;
                }
            }
        } else {
            None
        };

        let page = Rc::clone(&page);
        wasm_bindgen_futures::spawn_local(async move {
            page.submit(upload).await;
        });
    })
}
