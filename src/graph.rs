use glam::{Mat4, Vec3};

use crate::math::{FitRect, AABB};

/// Index of a node inside its owning [`SceneGraph`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Triangle mesh in world space
#[derive(Debug, Clone)]
pub struct MeshData {
    pub positions: Vec<Vec3>,
    /// Triangle list, three indices per face
    pub indices: Vec<u32>,
    pub bounds: AABB,
}

impl MeshData {
    pub fn new(positions: Vec<Vec3>, indices: Vec<u32>) -> Self {
        let bounds = AABB::from_points(&positions);
        Self {
            positions,
            indices,
            bounds,
        }
    }
}

/// Geometry attached to a scene node.
///
/// Only `Mesh` nodes count as drawable surfaces for locating purposes;
/// `Lines` and `Plane` are synthesized decorations, which keeps repeated
/// locates over a decorated graph stable.
#[derive(Debug, Clone)]
pub enum Geometry {
    Mesh(MeshData),
    /// Wireframe overlay: world-space segments plus an RGB color
    Lines {
        segments: Vec<[Vec3; 2]>,
        color: [f32; 3],
    },
    /// Flat screen rectangle, sized in whole units
    Plane(FitRect),
}

#[derive(Debug, Clone)]
pub struct SceneNode {
    pub name: String,
    /// World transform accumulated down from the root
    pub transform: Mat4,
    pub geometry: Option<Geometry>,
    children: Vec<NodeId>,
}

impl SceneNode {
    pub fn new(name: impl Into<String>, transform: Mat4, geometry: Option<Geometry>) -> Self {
        Self {
            name: name.into(),
            transform,
            geometry,
            children: Vec::new(),
        }
    }

    pub fn group(name: impl Into<String>) -> Self {
        Self::new(name, Mat4::IDENTITY, None)
    }

    pub fn is_drawable(&self) -> bool {
        matches!(self.geometry, Some(Geometry::Mesh(_)))
    }

    pub fn mesh(&self) -> Option<&MeshData> {
        match &self.geometry {
            Some(Geometry::Mesh(data)) => Some(data),
            _ => None,
        }
    }

    /// Translation component of the world transform
    pub fn world_position(&self) -> Vec3 {
        self.transform.w_axis.truncate()
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}

/// Arena-backed node tree produced by the model loader.
///
/// Nodes are append-only; decoration passes attach children but nothing is
/// ever removed, so `NodeId`s stay valid for the graph's lifetime.
#[derive(Debug)]
pub struct SceneGraph {
    nodes: Vec<SceneNode>,
    root: NodeId,
}

impl SceneGraph {
    pub fn new(root_name: impl Into<String>) -> Self {
        Self {
            nodes: vec![SceneNode::group(root_name)],
            root: NodeId(0),
        }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: NodeId) -> &SceneNode {
        &self.nodes[id.0]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut SceneNode {
        &mut self.nodes[id.0]
    }

    /// Appends `node` as a child of `parent` and returns its id
    pub fn add_node(&mut self, parent: NodeId, node: SceneNode) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(node);
        self.nodes[parent.0].children.push(id);
        id
    }

    /// Depth-first pre-order walk over `start` and every descendant.
    ///
    /// Implemented with an explicit stack so arbitrarily deep models cannot
    /// overflow the call stack; children are visited in insertion order.
    pub fn walk(&self, start: NodeId) -> Walk<'_> {
        Walk {
            graph: self,
            stack: vec![start],
        }
    }
}

pub struct Walk<'a> {
    graph: &'a SceneGraph,
    stack: Vec<NodeId>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.stack.pop()?;
        // Reversed push keeps pre-order equal to child insertion order
        for &child in self.graph.node(id).children().iter().rev() {
            self.stack.push(child);
        }
        Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(name: &str) -> SceneNode {
        SceneNode::group(name)
    }

    #[test]
    fn walk_visits_preorder() {
        let mut graph = SceneGraph::new("root");
        let root = graph.root();
        let a = graph.add_node(root, leaf("a"));
        let b = graph.add_node(root, leaf("b"));
        graph.add_node(a, leaf("a1"));
        graph.add_node(a, leaf("a2"));
        graph.add_node(b, leaf("b1"));

        let names: Vec<&str> = graph
            .walk(root)
            .map(|id| graph.node(id).name.as_str())
            .collect();

        assert_eq!(names, vec!["root", "a", "a1", "a2", "b", "b1"]);
    }

    #[test]
    fn walk_from_subtree_only_covers_descendants() {
        let mut graph = SceneGraph::new("root");
        let root = graph.root();
        let a = graph.add_node(root, leaf("a"));
        graph.add_node(root, leaf("b"));
        graph.add_node(a, leaf("a1"));

        let names: Vec<&str> = graph
            .walk(a)
            .map(|id| graph.node(id).name.as_str())
            .collect();

        assert_eq!(names, vec!["a", "a1"]);
    }

    #[test]
    fn walk_handles_deep_chains() {
        let mut graph = SceneGraph::new("root");
        let mut parent = graph.root();
        for i in 0..10_000 {
            parent = graph.add_node(parent, leaf(&format!("n{}", i)));
        }

        assert_eq!(graph.walk(graph.root()).count(), 10_001);
    }

    #[test]
    fn world_position_is_translation() {
        let transform = Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0));
        let node = SceneNode::new("n", transform, None);
        assert_eq!(node.world_position(), Vec3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn only_mesh_nodes_are_drawable() {
        let mesh = SceneNode::new(
            "m",
            Mat4::IDENTITY,
            Some(Geometry::Mesh(MeshData::new(vec![Vec3::ZERO], vec![]))),
        );
        let lines = SceneNode::new(
            "l",
            Mat4::IDENTITY,
            Some(Geometry::Lines {
                segments: vec![],
                color: [1.0, 1.0, 1.0],
            }),
        );

        assert!(mesh.is_drawable());
        assert!(!lines.is_drawable());
        assert!(!SceneNode::group("g").is_drawable());
    }
}
