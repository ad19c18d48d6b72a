/// Artwork reference
use serde::{Deserialize, Serialize};

/// Remote image (album cover, playlist cover or avatar)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Image {
    /// Image URL
    pub url: String,

    /// Width in pixels, when the API reports it
    #[serde(default)]
    pub width: Option<u32>,

    /// Height in pixels, when the API reports it
    #[serde(default)]
    pub height: Option<u32>,
}

impl Image {
    /// Create an image reference without known dimensions
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            width: None,
            height: None,
        }
    }

    /// Create an image reference with known dimensions
    pub fn sized(url: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            url: url.into(),
            width: Some(width),
            height: Some(height),
        }
    }

    /// Pick the image with the requested height, falling back to the first one.
    pub fn preferred(images: &[Image], height: u32) -> Option<&Image> {
        images
            .iter()
            .find(|img| img.height == Some(height))
            .or_else(|| images.first())
    }
}
