use nalgebra as na;
use serde::Serialize;

use crate::scene::graph::{NodeId, SceneGraph};

/// Sphere approximation of a node's extent, offset from the node origin
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BoundingSphere {
    /// Centre in the owning node's local frame
    pub center: na::Vector3<f64>,
    pub radius: f64,
}

impl BoundingSphere {
    pub fn new(radius: f64) -> Self {
        Self {
            center: na::Vector3::zeros(),
            radius,
        }
    }

    pub fn with_offset(center: na::Vector3<f64>, radius: f64) -> Self {
        Self { center, radius }
    }

    /// Centre of the sphere in world space when carried by `node`
    pub fn world_center(&self, graph: &SceneGraph, node: NodeId) -> na::Point3<f64> {
        graph.world_point(node, na::Point3::from(self.center))
    }
}

/// Inclusive sphere-sphere overlap: touching spheres count as overlapping
pub fn spheres_overlap(
    a_center: &na::Point3<f64>,
    a_radius: f64,
    b_center: &na::Point3<f64>,
    b_radius: f64,
) -> bool {
    na::distance(a_center, b_center) <= a_radius + b_radius
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::Transform;
    use approx::assert_relative_eq;

    #[test]
    fn test_touching_spheres_overlap() {
        let a = na::Point3::new(0.0, 0.0, 0.0);
        let b = na::Point3::new(3.0, 0.0, 0.0);
        assert!(spheres_overlap(&a, 1.0, &b, 2.0));
        assert!(!spheres_overlap(&a, 1.0, &b, 1.999));
    }

    #[test]
    fn test_world_center_follows_node() {
        let mut graph = SceneGraph::new();
        let root = graph.root();
        let node = graph.create_node_with("box", root, Transform::from_translation(4.0, 0.0, 0.0));
        let sphere = BoundingSphere::with_offset(na::Vector3::new(0.0, 1.5, 0.0), 1.0);

        let center = sphere.world_center(&graph, node);
        assert_relative_eq!(center, na::Point3::new(4.0, 1.5, 0.0));
    }
}
