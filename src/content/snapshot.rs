use log::debug;

use crate::traits::content::{ContentError, ContentSource, Pixels};

/// Remote still-image source, refetched on every snapshot.
///
/// The endpoint serves a continuously updated capture of a live stream, so
/// every request carries a timestamp query parameter to defeat caches along
/// the way.
#[derive(Debug)]
pub struct SnapshotContent {
    url: String,
    client: reqwest::blocking::Client,
    last_dimensions: Option<(u32, u32)>,
}

/// Appends a cache-busting timestamp query parameter to `url`
pub fn cache_busted(url: &str, timestamp_millis: i64) -> String {
    format!("{}?{}", url, timestamp_millis)
}

impl SnapshotContent {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            client: reqwest::blocking::Client::new(),
            last_dimensions: None,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl ContentSource for SnapshotContent {
    fn dimensions(&self) -> Option<(u32, u32)> {
        self.last_dimensions
    }

    fn snapshot(&mut self) -> Result<Pixels, ContentError> {
        let url = cache_busted(&self.url, chrono::Utc::now().timestamp_millis());
        debug!("Fetching snapshot: {}", url);

        let bytes = self
            .client
            .get(url.as_str())
            .send()?
            .error_for_status()?
            .bytes()?;

        let decoded = image::load_from_memory(&bytes)?.to_rgba8();
        let (width, height) = decoded.dimensions();
        self.last_dimensions = Some((width, height));

        Ok(Pixels::new(width, height, decoded.into_raw()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cache_busting_appends_timestamp() {
        let url = "https://demo.streamplanet.tv/screens/seinfeld.png";
        assert_eq!(
            cache_busted(url, 1700000000000),
            "https://demo.streamplanet.tv/screens/seinfeld.png?1700000000000"
        );
    }

    #[test]
    fn cache_busting_varies_only_in_query() {
        let url = "https://example.com/still.png";
        let a = cache_busted(url, 1);
        let b = cache_busted(url, 2);
        assert_ne!(a, b);
        assert_eq!(a.split('?').next(), b.split('?').next());
    }
}
