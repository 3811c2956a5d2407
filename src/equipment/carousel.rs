use std::f64::consts::PI;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::control::Key;
use crate::scene::{NodeId, SceneGraph, Transform};

/// Fixed carousel geometry and animation rate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CarouselDimensions {
    pub cylinder_height: f64,
    pub cylinder_radius: f64,
    pub ring_height: f64,
    /// Inner and outer radius of each ring, innermost first
    pub ring_radii: [(f64, f64); 3],
    /// Base rate driving both the ring travel and the spin
    pub step_rate: f64,
}

impl Default for CarouselDimensions {
    fn default() -> Self {
        Self {
            cylinder_height: 20.0,
            cylinder_radius: 5.0,
            ring_height: 1.0,
            ring_radii: [(5.0, 10.0), (10.0, 15.0), (15.0, 20.0)],
            step_rate: 6.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RingId {
    Inner,
    Middle,
    Outer,
}

impl RingId {
    pub const ALL: [RingId; 3] = [RingId::Inner, RingId::Middle, RingId::Outer];

    pub fn toggle_key(self) -> Key {
        match self {
            RingId::Inner => Key::Digit1,
            RingId::Middle => Key::Digit2,
            RingId::Outer => Key::Digit3,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Ring {
    pub id: RingId,
    pub node: NodeId,
    pub animating: bool,
    pub direction: f64,
}

/// Three concentric rings riding up and down a spinning central cylinder
#[derive(Debug, Clone)]
pub struct Carousel {
    pub dims: CarouselDimensions,
    pub root: NodeId,
    pub cylinder: NodeId,
    pub rings: [Ring; 3],
    rotation: f64,
}

impl Carousel {
    pub fn build(graph: &mut SceneGraph, parent: NodeId, dims: CarouselDimensions, x: f64, z: f64) -> Self {
        let root = graph.create_node_with("carousel", parent, Transform::from_translation(x, 0.0, z));
        let cylinder = graph.create_node("carousel.cylinder", root);

        // rings start staggered so they do not move in lockstep
        let starts = [-2.0, -1.0, 0.0];
        let rings = [0usize, 1, 2].map(|i| {
            let id = RingId::ALL[i];
            let node = graph.create_node_with(
                format!("carousel.ring.{id:?}").to_lowercase(),
                root,
                Transform::from_translation(0.0, starts[i], 0.0),
            );
            Ring {
                id,
                node,
                animating: false,
                direction: 1.0,
            }
        });

        Self {
            dims,
            root,
            cylinder,
            rings,
            rotation: 0.0,
        }
    }

    /// Highest ring position; the lowest is its negation
    pub fn travel_limit(&self) -> f64 {
        self.dims.cylinder_height / 2.0 - 2.0
    }

    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    pub fn ring(&self, id: RingId) -> &Ring {
        &self.rings[id as usize]
    }

    pub fn toggle(&mut self, id: RingId) {
        let ring = &mut self.rings[id as usize];
        ring.animating = !ring.animating;
        debug!("carousel ring {:?} animating = {}", id, ring.animating);
    }

    /// Returns true when the key toggled a ring
    pub fn on_key_down(&mut self, key: Key) -> bool {
        match RingId::ALL.into_iter().find(|id| id.toggle_key() == key) {
            Some(id) => {
                self.toggle(id);
                true
            }
            None => false,
        }
    }

    pub fn update(&mut self, graph: &mut SceneGraph, dt: f64) {
        let dt = if dt.is_finite() && dt > 0.0 { dt } else { 0.0 };
        let step = self.dims.step_rate * dt;

        self.rotation += self.dims.step_rate * PI * dt * 0.03;
        graph.set_rotation(self.root, crate::kinematics::yaw(self.rotation));

        let limit = self.travel_limit();
        for ring in self.rings.iter_mut().filter(|ring| ring.animating) {
            let mut position = graph.position(ring.node);
            position.y += ring.direction * step;

            if position.y >= limit || position.y <= -limit {
                position.y = position.y.clamp(-limit, limit);
                ring.direction = -ring.direction;
            }
            graph.set_position(ring.node, position);
        }
    }
}
