pub mod feed;
pub mod image;
pub mod snapshot;

pub use self::feed::FeedContent;
pub use self::image::ImageContent;
pub use self::snapshot::{cache_busted, SnapshotContent};
