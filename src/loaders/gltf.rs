use anyhow::{Context, Result};
use glam::{Mat4, Vec3};
use log::{debug, info, warn};
use std::path::Path;

use crate::graph::{Geometry, MeshData, NodeId, SceneGraph, SceneNode};

/// Loads a glTF file into a [`SceneGraph`] rooted at a single group node.
///
/// Every glTF node becomes a scene node carrying its accumulated world
/// transform; mesh nodes additionally carry world-space positions, a
/// triangle index list, and tight bounds. Load failures surface to the
/// caller; retry policy belongs to the calling orchestration.
pub fn load_gltf_scene(path: impl AsRef<Path>) -> Result<SceneGraph> {
    let path = path.as_ref();
    info!("Loading glTF file: {:?}", path);

    let (gltf, buffers, _images) =
        gltf::import(path).context(format!("Failed to load glTF file: {:?}", path))?;

    debug!(
        "glTF loaded: {} scenes, {} nodes, {} meshes",
        gltf.scenes().count(),
        gltf.nodes().count(),
        gltf.meshes().count()
    );

    let mut graph = SceneGraph::new("room_scene");
    let root = graph.root();

    for scene in gltf.scenes() {
        for node in scene.nodes() {
            process_node(&node, &buffers, &Mat4::IDENTITY, &mut graph, root)?;
        }
    }

    if graph.len() == 1 {
        warn!("No nodes found in glTF file: {:?}", path);
    }

    info!("Scene graph built: {} nodes", graph.len());
    Ok(graph)
}

/// Recursively converts glTF nodes, accumulating parent transforms
fn process_node(
    node: &gltf::Node,
    buffers: &[gltf::buffer::Data],
    parent_transform: &Mat4,
    graph: &mut SceneGraph,
    parent: NodeId,
) -> Result<()> {
    let local_transform = Mat4::from_cols_array_2d(&node.transform().matrix());
    let global_transform = *parent_transform * local_transform;

    let name = node.name().unwrap_or("").to_string();

    let geometry = match node.mesh() {
        Some(mesh) => read_mesh(&mesh, buffers, &global_transform)?.map(Geometry::Mesh),
        None => None,
    };

    let id = graph.add_node(parent, SceneNode::new(name, global_transform, geometry));

    for child in node.children() {
        process_node(&child, buffers, &global_transform, graph, id)?;
    }

    Ok(())
}

/// Flattens a glTF mesh's primitives into one world-space triangle list
fn read_mesh(
    mesh: &gltf::Mesh,
    buffers: &[gltf::buffer::Data],
    transform: &Mat4,
) -> Result<Option<MeshData>> {
    let mut positions: Vec<Vec3> = Vec::new();
    let mut indices: Vec<u32> = Vec::new();

    for primitive in mesh.primitives() {
        let reader = primitive.reader(|buffer| Some(&buffers[buffer.index()]));

        let Some(prim_positions) = reader.read_positions() else {
            debug!("Skipping primitive without positions in {:?}", mesh.name());
            continue;
        };

        let base = positions.len() as u32;
        positions.extend(prim_positions.map(|pos| {
            let v = Vec3::from_array(pos);
            transform.transform_point3(v)
        }));

        match reader.read_indices() {
            Some(prim_indices) => {
                indices.extend(prim_indices.into_u32().map(|i| base + i));
            }
            None => {
                // Unindexed primitive: treat positions as a raw triangle list
                let count = positions.len() as u32 - base;
                indices.extend(base..base + count - count % 3);
            }
        }
    }

    if positions.is_empty() {
        return Ok(None);
    }

    Ok(Some(MeshData::new(positions, indices)))
}
