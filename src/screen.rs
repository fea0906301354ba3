use glam::{Vec2, Vec3};
use log::info;
use thiserror::Error;

use crate::graph::{Geometry, NodeId, SceneGraph, SceneNode};
use crate::math::{fit, FitError, FitRect};

pub const SCREEN_NAME: &str = "tv_face";
/// The screen sits just in front of the TV cabinet
pub const SCREEN_OFFSET_Z: f32 = 2.0;

#[derive(Debug, Error)]
pub enum ScreenError {
    #[error("target node '{0}' has no mesh geometry to size against")]
    NoGeometry(String),
    #[error(transparent)]
    Fit(#[from] FitError),
}

/// The plane carrying projected content, placed over the located TV mesh
#[derive(Debug)]
pub struct ScreenPlane {
    pub node: NodeId,
    pub position: Vec3,
    /// Width/height of the TV's bounding box, the fit target for content
    pub tv_size: Vec2,
    pub rect: FitRect,
}

/// Sizes and positions a screen plane over the TV node and attaches it to
/// the scene root.
///
/// The plane takes the TV's world position pushed forward along Z, and a
/// rectangle aspect-fitted from the content's native dimensions into the
/// TV face. Content dimension problems propagate as `InvalidDimension`.
pub fn place_screen(
    graph: &mut SceneGraph,
    tv: NodeId,
    content_dims: (u32, u32),
) -> Result<ScreenPlane, ScreenError> {
    let tv_node = graph.node(tv);
    let mesh = tv_node
        .mesh()
        .ok_or_else(|| ScreenError::NoGeometry(tv_node.name.clone()))?;

    let size = mesh.bounds.size();
    let tv_size = Vec2::new(size.x, size.y);
    let position = tv_node.world_position() + Vec3::new(0.0, 0.0, SCREEN_OFFSET_Z);

    let rect = fit_to_face(content_dims, tv_size)?;

    let node = graph.add_node(
        graph.root(),
        SceneNode::new(
            SCREEN_NAME,
            glam::Mat4::from_translation(position),
            Some(Geometry::Plane(rect)),
        ),
    );

    info!(
        "Screen placed at {:?}: {}x{} over a {:.1}x{:.1} face",
        position, rect.width, rect.height, tv_size.x, tv_size.y
    );

    Ok(ScreenPlane {
        node,
        position,
        tv_size,
        rect,
    })
}

impl ScreenPlane {
    /// Refits the plane for newly bound content and updates its geometry
    pub fn refit(&mut self, graph: &mut SceneGraph, content_dims: (u32, u32)) -> Result<(), ScreenError> {
        self.rect = fit_to_face(content_dims, self.tv_size)?;
        graph.node_mut(self.node).geometry = Some(Geometry::Plane(self.rect));
        Ok(())
    }
}

fn fit_to_face(content_dims: (u32, u32), tv_size: Vec2) -> Result<FitRect, FitError> {
    fit(
        content_dims.0 as f32,
        content_dims.1 as f32,
        tv_size.x,
        tv_size.y,
    )
}
