use roomcast::capture::{CaptureSession, DELAY_CAPACITY, STRIP_CAPACITY};
use roomcast::traits::content::{ContentError, ContentSource, Pixels};

/// Produces 2x2 frames whose pixels carry a running sequence number
struct CountingSource {
    next: u8,
    failing: bool,
}

impl CountingSource {
    fn new() -> Self {
        Self {
            next: 0,
            failing: false,
        }
    }
}

impl ContentSource for CountingSource {
    fn dimensions(&self) -> Option<(u32, u32)> {
        Some((2, 2))
    }

    fn snapshot(&mut self) -> Result<Pixels, ContentError> {
        if self.failing {
            return Err(ContentError::NotReady);
        }
        let value = self.next;
        self.next = self.next.wrapping_add(1);
        Ok(Pixels::new(2, 2, vec![value; 16]))
    }
}

/// Reads back the sequence number stamped into a captured frame
fn sequence_of(png: &[u8]) -> u8 {
    let decoded = image::load_from_memory(png).expect("valid png").to_rgba8();
    decoded.as_raw()[0]
}

#[test]
fn test_delayed_frame_unavailable_until_buffer_fills() {
    let mut session = CaptureSession::new();
    let mut source = CountingSource::new();

    for _ in 0..DELAY_CAPACITY - 1 {
        session.capture(&mut source).unwrap();
        assert!(
            session.delayed_frame().is_none(),
            "no delayed frame before the buffer is full"
        );
    }

    session.capture(&mut source).unwrap();
    let delayed = session.delayed_frame().expect("buffer is full now");
    assert_eq!(sequence_of(&delayed.png), 0, "delayed frame is the 1st capture");
}

#[test]
fn test_delayed_frame_advances_after_eviction() {
    let mut session = CaptureSession::new();
    let mut source = CountingSource::new();

    for _ in 0..DELAY_CAPACITY + 1 {
        session.capture(&mut source).unwrap();
    }

    let delayed = session.delayed_frame().expect("buffer stays full");
    assert_eq!(
        sequence_of(&delayed.png),
        1,
        "11th capture evicts the 1st, exposing the 2nd"
    );
}

#[test]
fn test_strip_is_bounded_and_ordered() {
    let mut session = CaptureSession::new();
    let mut source = CountingSource::new();

    for _ in 0..50 {
        session.capture(&mut source).unwrap();
        assert!(session.recent_frames().count() <= STRIP_CAPACITY);
    }

    let sequences: Vec<u8> = session
        .recent_frames()
        .map(|f| sequence_of(&f.png))
        .collect();
    let expected: Vec<u8> = (30..50).collect();
    assert_eq!(sequences, expected, "strip holds the last 20, oldest first");
}

#[test]
fn test_strip_reflects_contents_before_capacity() {
    let mut session = CaptureSession::new();
    let mut source = CountingSource::new();

    assert_eq!(session.recent_frames().count(), 0);

    for n in 1..=5 {
        session.capture(&mut source).unwrap();
        assert_eq!(session.recent_frames().count(), n);
    }
}

#[test]
fn test_failed_capture_leaves_buffers_untouched() {
    let mut session = CaptureSession::new();
    let mut source = CountingSource::new();

    for _ in 0..3 {
        session.capture(&mut source).unwrap();
    }

    source.failing = true;
    assert!(session.capture(&mut source).is_err());

    assert_eq!(session.captured(), 3);
    assert_eq!(session.recent_frames().count(), 3);
    let sequences: Vec<u8> = session
        .recent_frames()
        .map(|f| sequence_of(&f.png))
        .collect();
    assert_eq!(sequences, vec![0, 1, 2]);

    // The next tick simply retries
    source.failing = false;
    session.capture(&mut source).unwrap();
    assert_eq!(session.captured(), 4);
}

#[test]
fn test_buffers_evict_independently() {
    let mut session = CaptureSession::with_capacities(2, 4);
    let mut source = CountingSource::new();

    for _ in 0..4 {
        session.capture(&mut source).unwrap();
    }

    // Delay buffer (capacity 2) has evicted down to frames 2..3
    let delayed = session.delayed_frame().expect("small buffer fills fast");
    assert_eq!(sequence_of(&delayed.png), 2);

    // Strip buffer (capacity 4) still holds everything
    assert_eq!(session.recent_frames().count(), 4);
}
