//! Browser implementations of the page seams.

pub mod bindings;
pub mod dom;
pub mod fetch;
pub mod media;
pub mod surface;

pub use fetch::FetchClient;
pub use media::{BrowserCamera, VideoElement};
pub use surface::DomSurface;
