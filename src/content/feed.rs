use crate::traits::content::{ContentError, ContentSource, Pixels};

/// Live feed source, filled by an external decoder (the HLS client stays
/// outside this crate).
///
/// Pushes and snapshots happen on the same cooperative loop, so no lock is
/// needed. A decoder running on its own thread must wrap this in a mutex
/// before sharing it.
#[derive(Debug, Default)]
pub struct FeedContent {
    latest: Option<Pixels>,
}

impl FeedContent {
    pub fn new() -> Self {
        Self::default()
    }

    /// Called by the decoder whenever a new frame is available
    pub fn push(&mut self, frame: Pixels) {
        self.latest = Some(frame);
    }
}

impl ContentSource for FeedContent {
    fn dimensions(&self) -> Option<(u32, u32)> {
        self.latest.as_ref().map(|p| (p.width, p.height))
    }

    fn snapshot(&mut self) -> Result<Pixels, ContentError> {
        self.latest.clone().ok_or(ContentError::NotReady)
    }
}
