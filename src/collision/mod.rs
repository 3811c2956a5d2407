//! Discrete sphere-sphere collision between the claw and loose cargo.
//!
//! Sampling happens once per frame, so a fast-moving claw can pass through a
//! small item between frames without a hit.

use std::collections::VecDeque;

use log::trace;
use nalgebra as na;

use crate::equipment::{CargoId, CargoItem};
use crate::scene::{spheres_overlap, BoundingSphere, NodeId, SceneGraph};

#[derive(Debug, Clone, Copy, Default)]
pub struct CollisionDetector;

impl CollisionDetector {
    pub fn new() -> Self {
        Self
    }

    /// Every free item whose sphere touches or overlaps the claw's
    pub fn detect(
        &self,
        graph: &SceneGraph,
        claw: NodeId,
        claw_sphere: &BoundingSphere,
        items: &[CargoItem],
    ) -> Vec<CargoId> {
        let claw_center = claw_sphere.world_center(graph, claw);

        items
            .iter()
            .filter(|item| item.is_free())
            .filter(|item| {
                let center = item.world_center(graph);
                let hit = spheres_overlap(&claw_center, claw_sphere.radius, &center, item.sphere.radius);
                if hit {
                    trace!(
                        "claw touches cargo {} at distance {:.3}",
                        item.id.0,
                        na::distance(&claw_center, &center)
                    );
                }
                hit
            })
            .map(|item| item.id)
            .collect()
    }
}

/// FIFO of collided items awaiting delivery, without duplicates
#[derive(Debug, Clone, Default)]
pub struct CollisionQueue {
    pending: VecDeque<CargoId>,
}

impl CollisionQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns false if `id` was already queued
    pub fn push(&mut self, id: CargoId) -> bool {
        if self.pending.contains(&id) {
            return false;
        }
        self.pending.push_back(id);
        true
    }

    pub fn front(&self) -> Option<CargoId> {
        self.pending.front().copied()
    }

    pub fn pop_front(&mut self) -> Option<CargoId> {
        self.pending.pop_front()
    }

    pub fn contains(&self, id: CargoId) -> bool {
        self.pending.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CargoId> {
        self.pending.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::equipment::CargoState;

    fn scene_with_claw_at_origin() -> (SceneGraph, NodeId, BoundingSphere) {
        let mut graph = SceneGraph::new();
        let root = graph.root();
        let claw = graph.create_node("claw", root);
        (graph, claw, BoundingSphere::new(1.5))
    }

    #[test]
    fn test_boundary_distance_counts_as_hit() {
        let (mut graph, claw, sphere) = scene_with_claw_at_origin();
        let root = graph.root();
        let items = vec![
            CargoItem::spawn(&mut graph, root, CargoId(0), na::Vector3::new(2.5, 0.0, 0.0), 1.0),
            CargoItem::spawn(&mut graph, root, CargoId(1), na::Vector3::new(2.5001, 0.0, 0.0), 1.0),
        ];

        let hits = CollisionDetector::new().detect(&graph, claw, &sphere, &items);
        assert_eq!(hits, vec![CargoId(0)]);
    }

    #[test]
    fn test_only_free_items_checked() {
        let (mut graph, claw, sphere) = scene_with_claw_at_origin();
        let root = graph.root();
        let mut items = vec![
            CargoItem::spawn(&mut graph, root, CargoId(0), na::Vector3::zeros(), 1.0),
            CargoItem::spawn(&mut graph, root, CargoId(1), na::Vector3::zeros(), 1.0),
        ];
        items[0].state = CargoState::Delivered;

        let hits = CollisionDetector::new().detect(&graph, claw, &sphere, &items);
        assert_eq!(hits, vec![CargoId(1)]);
    }

    #[test]
    fn test_queue_is_fifo_without_duplicates() {
        let mut queue = CollisionQueue::new();
        assert!(queue.push(CargoId(3)));
        assert!(queue.push(CargoId(1)));
        assert!(!queue.push(CargoId(3)));

        assert_eq!(queue.len(), 2);
        assert_eq!(queue.pop_front(), Some(CargoId(3)));
        assert_eq!(queue.front(), Some(CargoId(1)));
        assert!(!queue.contains(CargoId(3)));
    }
}
