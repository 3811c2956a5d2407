use nalgebra as na;
use serde::Serialize;

use crate::scene::{BoundingSphere, NodeId, SceneGraph, Transform};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct CargoId(pub usize);

/// Where a cargo item currently lives
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CargoState {
    /// Standing in the scene, eligible for collision checks
    Free,
    /// Carried by the claw
    Held,
    /// Dropped in the container, never checked again
    Delivered,
}

/// A loose prop the claw can pick up
#[derive(Debug, Clone)]
pub struct CargoItem {
    pub id: CargoId,
    pub node: NodeId,
    pub sphere: BoundingSphere,
    pub state: CargoState,
}

impl CargoItem {
    /// Create the cargo node under `parent` with its centre at `position`
    pub fn spawn(
        graph: &mut SceneGraph,
        parent: NodeId,
        id: CargoId,
        position: na::Vector3<f64>,
        radius: f64,
    ) -> Self {
        let node = graph.create_node_with(
            format!("cargo{}", id.0),
            parent,
            Transform::from_translation(position.x, position.y, position.z),
        );

        Self {
            id,
            node,
            sphere: BoundingSphere::new(radius),
            state: CargoState::Free,
        }
    }

    pub fn is_free(&self) -> bool {
        self.state == CargoState::Free
    }

    pub fn world_center(&self, graph: &SceneGraph) -> na::Point3<f64> {
        self.sphere.world_center(graph, self.node)
    }
}

/// Fixed drop point for delivered cargo
#[derive(Debug, Clone)]
pub struct ContainerTarget {
    pub node: NodeId,
    pub sphere: BoundingSphere,
    pub width: f64,
    pub height: f64,
}

impl ContainerTarget {
    /// The container node sits on its floor at `position`
    pub fn build(
        graph: &mut SceneGraph,
        parent: NodeId,
        position: na::Vector3<f64>,
        width: f64,
        height: f64,
    ) -> Self {
        let node = graph.create_node_with(
            "container",
            parent,
            Transform::from_translation(position.x, position.y, position.z),
        );

        let half = width / 2.0;
        let walls = [
            ("container.wall.east", half, 0.0),
            ("container.wall.west", -half, 0.0),
            ("container.wall.north", 0.0, -half),
            ("container.wall.south", 0.0, half),
        ];
        for (name, x, z) in walls {
            graph.create_node_with(name, node, Transform::from_translation(x, height / 2.0, z));
        }

        let radius = (half * half * 2.0 + (height / 2.0).powi(2)).sqrt();
        Self {
            node,
            sphere: BoundingSphere::with_offset(na::Vector3::new(0.0, height / 2.0, 0.0), radius),
            width,
            height,
        }
    }

    /// Local resting spot for a delivered item, flush against the floor
    pub fn drop_point(&self) -> na::Vector3<f64> {
        na::Vector3::new(0.0, self.height / 2.0, 0.0)
    }

    /// Move `item` under the container and mark it delivered
    pub fn receive(&self, graph: &mut SceneGraph, item: &mut CargoItem) {
        graph.reparent(item.node, self.node);
        let transform = graph.transform_mut(item.node);
        transform.translation = self.drop_point();
        transform.rotation = na::UnitQuaternion::identity();
        item.state = CargoState::Delivered;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_receive_reparents_and_rests_on_floor() {
        let mut graph = SceneGraph::new();
        let root = graph.root();
        let container = ContainerTarget::build(&mut graph, root, na::Vector3::new(6.0, 0.0, 6.0), 5.0, 4.0);
        let mut item = CargoItem::spawn(&mut graph, root, CargoId(0), na::Vector3::new(10.0, 1.0, 0.0), 1.0);

        container.receive(&mut graph, &mut item);

        assert_eq!(graph.parent(item.node), Some(container.node));
        assert!(!graph.children(root).contains(&item.node));
        assert_relative_eq!(graph.position(item.node).y, 2.0);
        assert_eq!(item.state, CargoState::Delivered);
        assert!(!item.is_free());
    }

    #[test]
    fn test_container_sphere_covers_box() {
        let mut graph = SceneGraph::new();
        let root = graph.root();
        let container = ContainerTarget::build(&mut graph, root, na::Vector3::zeros(), 4.0, 2.0);

        let corner = na::Point3::new(2.0, 2.0, 2.0);
        let center = container.sphere.world_center(&graph, container.node);
        assert!(na::distance(&center, &corner) <= container.sphere.radius + 1e-12);
    }
}
