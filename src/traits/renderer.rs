use glam::Vec3;
use log::{debug, info};

use crate::config::{CameraConfig, LightConfig};
use crate::graph::SceneGraph;
use crate::math::FitRect;
use crate::traits::content::Pixels;

/// Geometry and material parameters for one screen refresh
#[derive(Debug)]
pub struct ScreenUpdate<'a> {
    pub position: Vec3,
    pub rect: FitRect,
    pub pixels: &'a Pixels,
}

/// Display abstraction. The actual GPU pipeline, lighting, and camera
/// controls live behind this seam; this crate only hands over parameters.
pub trait ScreenRenderer {
    /// Scene-level setup: camera pose and lights
    fn setup(&mut self, camera: &CameraConfig, lights: &LightConfig);

    /// Hand over the loaded (and decorated) scene graph
    fn present_scene(&mut self, graph: &SceneGraph);

    /// Apply a new fitted rectangle and texture to the screen plane
    fn update_screen(&mut self, update: &ScreenUpdate);
}

/// Headless renderer that logs what it is handed. Used by the CLI binary
/// and by tests; a GPU implementation would live in a downstream crate.
#[derive(Debug, Default)]
pub struct LogRenderer {
    updates: u64,
}

impl LogRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn updates(&self) -> u64 {
        self.updates
    }
}

impl ScreenRenderer for LogRenderer {
    fn setup(&mut self, camera: &CameraConfig, lights: &LightConfig) {
        info!(
            "Renderer setup: camera at {:?} looking at {:?}, fov {}, ambient {}",
            camera.position, camera.target, camera.fov_deg, lights.ambient_intensity
        );
    }

    fn present_scene(&mut self, graph: &SceneGraph) {
        info!("Scene presented: {} nodes", graph.len());
    }

    fn update_screen(&mut self, update: &ScreenUpdate) {
        self.updates += 1;
        debug!(
            "Screen update #{}: {}x{} plane at {:?} ({}x{} texture)",
            self.updates,
            update.rect.width,
            update.rect.height,
            update.position,
            update.pixels.width,
            update.pixels.height
        );
    }
}
