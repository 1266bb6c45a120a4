//! File intake rules for the upload area.

use crate::error::PageError;

/// Media type prefix accepted by the upload area.
const IMAGE_MEDIA_PREFIX: &str = "image/";

/// What the browser tells us about a picked file before it is read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickedFile {
    /// File name
    pub name: String,
    /// Media type, possibly empty when the browser cannot guess it
    pub media_type: String,
    /// Size in bytes
    pub size: u64,
}

impl PickedFile {
    /// Describe a picked file.
    pub fn new(name: impl Into<String>, media_type: impl Into<String>, size: u64) -> Self {
        Self {
            name: name.into(),
            media_type: media_type.into(),
            size,
        }
    }

    /// Whether the media type is an image type.
    pub fn is_image(&self) -> bool {
        self.media_type.starts_with(IMAGE_MEDIA_PREFIX)
    }
}

/// Pick the file to preview from a selection.
///
/// Only the first file counts. An empty selection is `Ok(None)`; a first
/// file that is not an image is an error and nothing is previewed.
pub fn select_image(files: &[PickedFile]) -> Result<Option<&PickedFile>, PageError> {
    let Some(first) = files.first() else {
        return Ok(None);
    };
    if !first.is_image() {
        return Err(PageError::not_an_image(first.media_type.as_str()));
    }
    Ok(Some(first))
}
