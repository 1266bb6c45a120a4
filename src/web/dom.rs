//! Thin helpers over web_sys for the rest of the web layer.

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, NodeList, Window};

use crate::config::timer_millis;
use crate::constants::COUNTER_TICK;
use crate::counter::CounterAnimation;
use crate::error::PageError;
use crate::view::Node;

/// The global window.
pub fn window() -> Result<Window, PageError> {
    web_sys::window().ok_or_else(|| PageError::Js("No global window exists".to_string()))
}

/// The window's document.
pub fn document() -> Result<Document, PageError> {
    window()?
        .document()
        .ok_or_else(|| PageError::Js("No document in window".to_string()))
}

/// Best-effort message of a thrown JS value.
pub fn js_message(value: &JsValue) -> String {
    if let Some(err) = value.dyn_ref::<js_sys::Error>() {
        return String::from(err.message());
    }
    if let Some(s) = value.as_string() {
        return s;
    }
    // DOMException and friends that are not Error instances in older engines
    js_sys::Reflect::get(value, &"message".into())
        .ok()
        .and_then(|m| m.as_string())
        .unwrap_or_else(|| format!("{:?}", value))
}

/// Wrap a thrown JS value as a page error.
pub fn js_error(value: JsValue) -> PageError {
    PageError::Js(js_message(&value))
}

/// Elements of a node list, skipping non-element nodes.
pub fn elements(list: &NodeList) -> Vec<Element> {
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

/// All elements matching `selector`. An invalid selector yields nothing.
pub fn query_all(document: &Document, selector: &str) -> Vec<Element> {
    match document.query_selector_all(selector) {
        Ok(list) => elements(&list),
        Err(e) => {
            log::warn!("Invalid selector {:?}: {}", selector, js_message(&e));
            Vec::new()
        }
    }
}

/// Look up an element by id and cast it, logging when it is missing.
pub fn by_id<T: JsCast>(document: &Document, id: &str) -> Option<T> {
    let Some(element) = document.get_element_by_id(id) else {
        log::debug!("Element #{} not on page", id);
        return None;
    };
    match element.dyn_into::<T>() {
        Ok(element) => Some(element),
        Err(_) => {
            log::warn!("Element #{} has an unexpected type", id);
            None
        }
    }
}

/// Create live DOM nodes for a view tree.
pub fn build(document: &Document, node: &Node) -> Result<web_sys::Node, JsValue> {
    match node {
        Node::Text(content) => Ok(document.create_text_node(content).into()),
        Node::Element(element) => {
            let el = document.create_element(element.tag)?;
            if !element.classes.is_empty() {
                el.set_class_name(&element.classes.join(" "));
            }
            for (name, value) in &element.attrs {
                el.set_attribute(name, value)?;
            }
            if let Some(style) = element.style_text() {
                el.set_attribute("style", &style)?;
            }
            for child in &element.children {
                el.append_child(&build(document, child)?)?;
            }
            Ok(el.into())
        }
    }
}

/// Replace the children of `target` with a view tree.
pub fn mount(target: &Element, node: &Node) -> Result<(), JsValue> {
    let document = target
        .owner_document()
        .ok_or_else(|| JsValue::from_str("element has no owner document"))?;
    let built = build(&document, node)?;
    target.set_text_content(None);
    target.append_child(&built)?;
    Ok(())
}

/// Run `f` once after `delay`.
pub fn set_timeout(f: impl FnOnce() + 'static, delay: Duration) -> Result<i32, PageError> {
    let callback = Closure::once_into_js(f);
    window()?
        .set_timeout_with_callback_and_timeout_and_arguments_0(
            callback.unchecked_ref(),
            timer_millis(delay),
        )
        .map_err(js_error)
}

/// Drive a counter animation on an element's text, one frame per tick.
pub fn animate_counter(element: Element, mut animation: CounterAnimation) -> Result<(), PageError> {
    let window = window()?;
    log::debug!("Counting up to {}", animation.target());
    let handle: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));

    let handle_inner = Rc::clone(&handle);
    let window_inner = window.clone();
    let tick = Closure::<dyn FnMut()>::new(move || {
        if let Some(value) = animation.tick() {
            element.set_text_content(Some(&value.to_string()));
        }
        if animation.is_finished() {
            if let Some(id) = handle_inner.take() {
                window_inner.clear_interval_with_handle(id);
            }
        }
    });

    let id = window
        .set_interval_with_callback_and_timeout_and_arguments_0(
            tick.as_ref().unchecked_ref(),
            timer_millis(COUNTER_TICK),
        )
        .map_err(js_error)?;
    handle.set(Some(id));
    // Hand the closure to the JS GC; the interval is cleared when the animation ends
    let _ = tick.into_js_value();
    Ok(())
}
