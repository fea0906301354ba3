pub mod content;
pub mod renderer;

pub use content::{ContentError, ContentSource, Pixels};
pub use renderer::{LogRenderer, ScreenRenderer, ScreenUpdate};
