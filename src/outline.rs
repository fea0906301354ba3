use glam::Vec3;
use log::warn;
use std::collections::HashMap;

use crate::graph::{Geometry, MeshData, NodeId, SceneGraph, SceneNode};

/// Wood-brown used for furniture outlines (0x5C4033)
pub const OUTLINE_COLOR: [f32; 3] = [92.0 / 255.0, 64.0 / 255.0, 51.0 / 255.0];

/// Edges whose adjacent faces meet at more than this angle are "hard"
pub const DEFAULT_EDGE_THRESHOLD_DEG: f32 = 1.0;

/// Extracts the hard-edge subset of a mesh: boundary edges (used by a
/// single face) plus edges whose two faces meet at more than `threshold_deg`
/// degrees. Degenerate (zero-area) triangles are ignored.
pub fn hard_edges(mesh: &MeshData, threshold_deg: f32) -> Vec<[Vec3; 2]> {
    let min_dot = threshold_deg.to_radians().cos();

    // Canonical (low, high) index pair -> normals of incident faces
    let mut edge_faces: HashMap<(u32, u32), Vec<Vec3>> = HashMap::new();
    let mut edge_order: Vec<(u32, u32)> = Vec::new();

    for tri in mesh.indices.chunks(3) {
        if tri.len() != 3 {
            continue;
        }
        let [i0, i1, i2] = [tri[0], tri[1], tri[2]];
        let p0 = mesh.positions[i0 as usize];
        let p1 = mesh.positions[i1 as usize];
        let p2 = mesh.positions[i2 as usize];

        let normal = (p1 - p0).cross(p2 - p0);
        if normal.length_squared() <= f32::EPSILON {
            continue;
        }
        let normal = normal.normalize();

        for (a, b) in [(i0, i1), (i1, i2), (i2, i0)] {
            let key = if a < b { (a, b) } else { (b, a) };
            let faces = edge_faces.entry(key).or_insert_with(|| {
                edge_order.push(key);
                Vec::new()
            });
            faces.push(normal);
        }
    }

    let mut segments = Vec::new();
    for key in edge_order {
        let normals = &edge_faces[&key];
        let hard = match normals.as_slice() {
            [_] => true,
            [a, b] => a.dot(*b) < min_dot,
            // Non-manifold edge: keep it visible
            _ => true,
        };
        if hard {
            segments.push([
                mesh.positions[key.0 as usize],
                mesh.positions[key.1 as usize],
            ]);
        }
    }

    segments
}

/// Attaches a wireframe overlay child to each target node.
///
/// This is the scene-mutating decoration pass, deliberately separate from
/// `locate`: the overlay is a `Lines` node (never drawable for matching),
/// so locating again afterwards returns the same result. Targets without
/// mesh geometry are skipped. Returns the ids of the overlay nodes.
pub fn decorate_outlines(graph: &mut SceneGraph, targets: &[NodeId]) -> Vec<NodeId> {
    let mut overlays = Vec::with_capacity(targets.len());

    for &target in targets {
        let node = graph.node(target);
        let Some(mesh) = node.mesh() else {
            warn!("Outline target '{}' has no mesh geometry; skipping", node.name);
            continue;
        };

        let segments = hard_edges(mesh, DEFAULT_EDGE_THRESHOLD_DEG);
        let name = format!("{}_outline", node.name);
        // Segments are already world-space, so the overlay's own transform
        // stays identity.
        let overlay = SceneNode::new(
            name,
            glam::Mat4::IDENTITY,
            Some(Geometry::Lines {
                segments,
                color: OUTLINE_COLOR,
            }),
        );
        overlays.push(graph.add_node(target, overlay));
    }

    overlays
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Mat4;

    /// Unit cube, 8 shared vertices, 12 triangles
    fn cube() -> MeshData {
        let positions = vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(1.0, 1.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::new(0.0, 0.0, 1.0),
            Vec3::new(1.0, 0.0, 1.0),
            Vec3::new(1.0, 1.0, 1.0),
            Vec3::new(0.0, 1.0, 1.0),
        ];
        let indices = vec![
            0, 2, 1, 0, 3, 2, // back
            4, 5, 6, 4, 6, 7, // front
            0, 1, 5, 0, 5, 4, // bottom
            3, 7, 6, 3, 6, 2, // top
            0, 4, 7, 0, 7, 3, // left
            1, 2, 6, 1, 6, 5, // right
        ];
        MeshData::new(positions, indices)
    }

    /// Flat quad split along the diagonal, coplanar faces
    fn flat_quad() -> MeshData {
        let positions = vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(1.0, 1.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
        ];
        let indices = vec![0, 1, 2, 0, 2, 3];
        MeshData::new(positions, indices)
    }

    #[test]
    fn cube_has_twelve_hard_edges() {
        let segments = hard_edges(&cube(), DEFAULT_EDGE_THRESHOLD_DEG);
        // 12 geometric edges; the 6 face diagonals are smooth
        assert_eq!(segments.len(), 12);
    }

    #[test]
    fn flat_quad_keeps_only_boundary() {
        let segments = hard_edges(&flat_quad(), DEFAULT_EDGE_THRESHOLD_DEG);
        // 4 boundary edges; the shared diagonal is coplanar
        assert_eq!(segments.len(), 4);
    }

    #[test]
    fn decorate_attaches_line_children() {
        let mut graph = SceneGraph::new("root");
        let root = graph.root();
        let table = graph.add_node(
            root,
            SceneNode::new("Mesa_Wood_0", Mat4::IDENTITY, Some(Geometry::Mesh(cube()))),
        );

        let overlays = decorate_outlines(&mut graph, &[table]);

        assert_eq!(overlays.len(), 1);
        let overlay = graph.node(overlays[0]);
        assert_eq!(overlay.name, "Mesa_Wood_0_outline");
        assert!(matches!(
            overlay.geometry,
            Some(Geometry::Lines { ref segments, color }) if segments.len() == 12 && color == OUTLINE_COLOR
        ));
        assert_eq!(graph.node(table).children(), &[overlays[0]]);
    }

    #[test]
    fn decorate_skips_groups() {
        let mut graph = SceneGraph::new("root");
        let root = graph.root();
        let group = graph.add_node(root, SceneNode::group("Mesa_Group"));

        let overlays = decorate_outlines(&mut graph, &[group]);
        assert!(overlays.is_empty());
    }
}
