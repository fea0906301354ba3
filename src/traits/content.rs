use thiserror::Error;

#[derive(Debug, Error)]
pub enum ContentError {
    /// The source exists but has nothing to show yet (feed not started,
    /// stream still buffering). Callers skip the tick and retry later.
    #[error("source not ready")]
    NotReady,
    #[error("fetch failed: {0}")]
    Fetch(#[from] reqwest::Error),
    #[error("decode failed: {0}")]
    Decode(#[from] image::ImageError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// One decoded frame of content, tightly packed RGBA8
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pixels {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl Pixels {
    pub fn new(width: u32, height: u32, rgba: Vec<u8>) -> Self {
        debug_assert_eq!(rgba.len(), (width * height * 4) as usize);
        Self {
            width,
            height,
            rgba,
        }
    }
}

/// Anything that can be projected onto the screen plane.
///
/// The locator and fitter are agnostic to which kind of source is bound:
/// a still image, a remote snapshot, or a live feed fed by an external
/// decoder all come through here.
pub trait ContentSource {
    /// Native pixel dimensions, once known
    fn dimensions(&self) -> Option<(u32, u32)>;

    /// Acquire one snapshot of the current content
    fn snapshot(&mut self) -> Result<Pixels, ContentError>;
}
