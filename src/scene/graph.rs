use nalgebra as na;
use serde::Serialize;

use crate::kinematics::transforms::{decompose, local_matrix, transform_point};

/// Stable handle to a node in a [`SceneGraph`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Local transform of a node relative to its parent
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub translation: na::Vector3<f64>,
    pub rotation: na::UnitQuaternion<f64>,
    pub scale: na::Vector3<f64>,
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transform {
    pub fn identity() -> Self {
        Self {
            translation: na::Vector3::zeros(),
            rotation: na::UnitQuaternion::identity(),
            scale: na::Vector3::repeat(1.0),
        }
    }

    pub fn from_translation(x: f64, y: f64, z: f64) -> Self {
        Self {
            translation: na::Vector3::new(x, y, z),
            ..Self::identity()
        }
    }

    pub fn to_matrix(&self) -> na::Matrix4<f64> {
        local_matrix(&self.translation, &self.rotation, &self.scale)
    }
}

#[derive(Debug, Clone)]
pub struct Node {
    pub name: String,
    pub transform: Transform,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// Arena-backed transform hierarchy with a single root
#[derive(Debug, Clone)]
pub struct SceneGraph {
    nodes: Vec<Node>,
    root: NodeId,
}

impl Default for SceneGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneGraph {
    pub fn new() -> Self {
        let root = Node {
            name: "scene".into(),
            transform: Transform::identity(),
            parent: None,
            children: Vec::new(),
        };

        Self {
            nodes: vec![root],
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
        // the root always exists
        false
    }

    /// Create a node with an identity transform under `parent`
    pub fn create_node(&mut self, name: impl Into<String>, parent: NodeId) -> NodeId {
        self.create_node_with(name, parent, Transform::identity())
    }

    pub fn create_node_with(
        &mut self,
        name: impl Into<String>,
        parent: NodeId,
        transform: Transform,
    ) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            name: name.into(),
            transform,
            parent: Some(parent),
            children: Vec::new(),
        });
        self.nodes[parent.0].children.push(id);
        id
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    pub fn node_name(&self, id: NodeId) -> &str {
        &self.nodes[id.0].name
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    /// True when `ancestor` is `node` or lies on its parent chain
    pub fn is_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.nodes[id.0].parent;
        }
        false
    }

    /// Move `node` under `new_parent`, keeping its local transform
    pub fn reparent(&mut self, node: NodeId, new_parent: NodeId) {
        debug_assert!(node != self.root, "the scene root cannot be reparented");
        debug_assert!(
            !self.is_ancestor(node, new_parent),
            "cannot move {} under its own subtree",
            self.nodes[node.0].name
        );

        if let Some(old_parent) = self.nodes[node.0].parent {
            self.nodes[old_parent.0].children.retain(|child| *child != node);
        }
        self.nodes[new_parent.0].children.push(node);
        self.nodes[node.0].parent = Some(new_parent);
    }

    /// Move `node` under `new_parent` so that it stays where it is in world space
    pub fn attach(&mut self, node: NodeId, new_parent: NodeId) {
        let world = self.world_matrix(node);
        let parent_world = self.world_matrix(new_parent);

        let local = match parent_world.try_inverse() {
            Some(inverse) => inverse * world,
            // degenerate parent scale; fall back to the plain reparent
            None => self.nodes[node.0].transform.to_matrix(),
        };

        self.reparent(node, new_parent);
        self.nodes[node.0].transform = decompose(&local);
    }

    pub fn transform(&self, id: NodeId) -> &Transform {
        &self.nodes[id.0].transform
    }

    pub fn transform_mut(&mut self, id: NodeId) -> &mut Transform {
        &mut self.nodes[id.0].transform
    }

    pub fn position(&self, id: NodeId) -> na::Vector3<f64> {
        self.nodes[id.0].transform.translation
    }

    pub fn set_position(&mut self, id: NodeId, position: na::Vector3<f64>) {
        self.nodes[id.0].transform.translation = position;
    }

    pub fn set_rotation(&mut self, id: NodeId, rotation: na::UnitQuaternion<f64>) {
        self.nodes[id.0].transform.rotation = rotation;
    }

    pub fn scale(&self, id: NodeId) -> na::Vector3<f64> {
        self.nodes[id.0].transform.scale
    }

    pub fn set_scale(&mut self, id: NodeId, scale: na::Vector3<f64>) {
        self.nodes[id.0].transform.scale = scale;
    }

    /// Matrix taking `node`-local coordinates to `ancestor`-local coordinates
    ///
    /// If `ancestor` is not on the parent chain this is the full world matrix.
    pub fn matrix_relative_to(&self, node: NodeId, ancestor: NodeId) -> na::Matrix4<f64> {
        let mut matrix = na::Matrix4::identity();
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                break;
            }
            let entry = &self.nodes[id.0];
            matrix = entry.transform.to_matrix() * matrix;
            current = entry.parent;
        }
        matrix
    }

    pub fn world_matrix(&self, node: NodeId) -> na::Matrix4<f64> {
        self.matrix_relative_to(node, self.root)
    }

    pub fn world_position(&self, node: NodeId) -> na::Point3<f64> {
        self.world_point(node, na::Point3::origin())
    }

    /// Transform a point given in `node`-local coordinates into world space
    pub fn world_point(&self, node: NodeId, local: na::Point3<f64>) -> na::Point3<f64> {
        transform_point(&self.world_matrix(node), local)
    }

    /// Position of `node`'s origin expressed in `ancestor`'s frame
    pub fn position_relative_to(&self, node: NodeId, ancestor: NodeId) -> na::Point3<f64> {
        transform_point(&self.matrix_relative_to(node, ancestor), na::Point3::origin())
    }

    /// Depth-first walk of the subtree rooted at `node`, parents before children
    pub fn descendants(&self, node: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![node];
        while let Some(id) = stack.pop() {
            out.push(id);
            stack.extend(self.nodes[id.0].children.iter().rev().copied());
        }
        out
    }
}
