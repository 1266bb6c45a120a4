//! Firewatch - fire and smoke detection page logic
//!
//! Upload preview, detection submission and result rendering, live stream
//! and webcam control, alerts, counters and scroll reveal for the detection
//! service's web pages. The page logic is plain Rust driven through the
//! [`surface::UiSurface`] and [`client::DetectionClient`] seams; the browser
//! implementations live behind `target_arch = "wasm32"`.

pub mod alert;
pub mod camera;
pub mod client;
pub mod config;
pub mod constants;
pub mod controller;
pub mod counter;
pub mod error;
pub mod model;
pub mod nav;
pub mod render;
pub mod reveal;
pub mod surface;
pub mod upload;
pub mod view;

pub use controller::PageController;
pub use error::PageError;

// WASM entry point
#[cfg(target_arch = "wasm32")]
mod web;

#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(target_arch = "wasm32")]
pub use wasm::*;
