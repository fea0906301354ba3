use chrono::{DateTime, Utc};
use log::debug;
use std::collections::VecDeque;
use std::io::Cursor;
use thiserror::Error;

use crate::traits::content::{ContentError, ContentSource};

/// Frames held back before time-shifted display becomes available
pub const DELAY_CAPACITY: usize = 10;
/// Frames kept for the scrolling filmstrip
pub const STRIP_CAPACITY: usize = 20;

#[derive(Debug, Error)]
pub enum CaptureError {
    /// The tick could not acquire a snapshot; buffers are left untouched
    /// and the next tick retries. No backoff at a fixed 1 s cadence.
    #[error("capture unavailable: {0}")]
    Unavailable(#[from] ContentError),
    #[error("frame encode failed: {0}")]
    Encode(#[from] image::ImageError),
    #[error("frame buffer size does not match dimensions")]
    BadFrame,
}

/// One captured frame, PNG-encoded at tick time
#[derive(Debug, Clone)]
pub struct FrameSnapshot {
    pub taken_at: DateTime<Utc>,
    pub width: u32,
    pub height: u32,
    pub png: Vec<u8>,
}

/// Strict FIFO ring of frames: pushing onto a full store evicts the oldest
/// entry, and the length never exceeds the capacity.
#[derive(Debug)]
pub struct FrameStore {
    frames: VecDeque<FrameSnapshot>,
    capacity: usize,
}

impl FrameStore {
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "frame store needs room for at least one frame");
        Self {
            frames: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn push(&mut self, frame: FrameSnapshot) {
        if self.frames.len() == self.capacity {
            self.frames.pop_front();
        }
        self.frames.push_back(frame);
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.frames.len() == self.capacity
    }

    pub fn oldest(&self) -> Option<&FrameSnapshot> {
        self.frames.front()
    }

    /// Oldest first
    pub fn iter(&self) -> impl Iterator<Item = &FrameSnapshot> {
        self.frames.iter()
    }
}

/// Periodic frame capture feeding two independent buffers: a playback-delay
/// queue and a filmstrip of recent captures.
///
/// Mutation here is atomic with respect to reads because everything runs on
/// one cooperative loop; a multi-threaded capture worker would need a lock
/// around the whole session.
#[derive(Debug)]
pub struct CaptureSession {
    delay: FrameStore,
    strip: FrameStore,
    captured: u64,
}

impl CaptureSession {
    pub fn new() -> Self {
        Self::with_capacities(DELAY_CAPACITY, STRIP_CAPACITY)
    }

    pub fn with_capacities(delay: usize, strip: usize) -> Self {
        Self {
            delay: FrameStore::new(delay),
            strip: FrameStore::new(strip),
            captured: 0,
        }
    }

    /// Acquires one snapshot and appends it to both buffers, each evicting
    /// its own oldest entry independently once full. A failed acquisition
    /// leaves both buffers exactly as they were.
    pub fn capture(&mut self, source: &mut dyn ContentSource) -> Result<(), CaptureError> {
        let pixels = source.snapshot()?;
        let frame = encode_frame(pixels.width, pixels.height, pixels.rgba)?;

        self.delay.push(frame.clone());
        self.strip.push(frame);
        self.captured += 1;
        debug!(
            "Captured frame #{} (delay {}/{}, strip {}/{})",
            self.captured,
            self.delay.len(),
            self.delay.capacity,
            self.strip.len(),
            self.strip.capacity
        );
        Ok(())
    }

    /// The time-shifted frame: the oldest delay-buffer entry, available
    /// only once that buffer is full. Until then the display has nothing
    /// valid to show, so this reports unavailable rather than a partial
    /// delay.
    pub fn delayed_frame(&self) -> Option<&FrameSnapshot> {
        if self.delay.is_full() {
            self.delay.oldest()
        } else {
            None
        }
    }

    /// Filmstrip contents, oldest first; empty before the first capture
    pub fn recent_frames(&self) -> impl Iterator<Item = &FrameSnapshot> {
        self.strip.iter()
    }

    /// Total successful captures over the session's lifetime
    pub fn captured(&self) -> u64 {
        self.captured
    }
}

impl Default for CaptureSession {
    fn default() -> Self {
        Self::new()
    }
}

fn encode_frame(width: u32, height: u32, rgba: Vec<u8>) -> Result<FrameSnapshot, CaptureError> {
    let taken_at = Utc::now();
    let img = image::RgbaImage::from_raw(width, height, rgba).ok_or(CaptureError::BadFrame)?;

    let mut png = Vec::new();
    img.write_to(&mut Cursor::new(&mut png), image::ImageFormat::Png)?;

    Ok(FrameSnapshot {
        taken_at,
        width,
        height,
        png,
    })
}
