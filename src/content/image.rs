use log::info;
use std::path::Path;

use crate::traits::content::{ContentError, ContentSource, Pixels};

/// Static image source, decoded once at load time
#[derive(Debug, Clone)]
pub struct ImageContent {
    pixels: Pixels,
}

impl ImageContent {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, ContentError> {
        let path = path.as_ref();
        let decoded = image::open(path)?.to_rgba8();
        let (width, height) = decoded.dimensions();
        info!("Loaded image {:?}: {}x{}", path, width, height);

        Ok(Self {
            pixels: Pixels::new(width, height, decoded.into_raw()),
        })
    }
}

impl ContentSource for ImageContent {
    fn dimensions(&self) -> Option<(u32, u32)> {
        Some((self.pixels.width, self.pixels.height))
    }

    fn snapshot(&mut self) -> Result<Pixels, ContentError> {
        Ok(self.pixels.clone())
    }
}
