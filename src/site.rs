//! The whole scene behind one handle: crane, cargo, container and carousel.

use log::{debug, info};
use nalgebra as na;
use serde::Serialize;

use crate::collision::CollisionDetector;
use crate::config::{ConfigError, ResolvedConfig, SimulationConfig};
use crate::control::{Key, KeyBindings, ManualControlState};
use crate::delivery::{DeliveryContext, DeliverySequencer, DeliveryStep};
use crate::equipment::carousel::RingId;
use crate::equipment::{CargoId, CargoItem, CargoState, Carousel, ContainerTarget, CraneRig};
use crate::kinematics::{JointState, KinematicsUpdater};
use crate::scene::{NodeId, SceneGraph};
use crate::telemetry::{FrameRecord, FrameTrace};
use crate::types::*;

pub struct CraneSite {
    graph: SceneGraph,
    rig: CraneRig,
    bindings: KeyBindings,
    controls: ManualControlState,
    updater: KinematicsUpdater,
    detector: CollisionDetector,
    sequencer: DeliverySequencer,
    cargo: Vec<CargoItem>,
    container: ContainerTarget,
    carousel: Option<Carousel>,
    trace: Option<FrameTrace>,
    frame: u64,
    time: f64,
}

impl CraneSite {
    /// Build the scene described by `config`
    pub fn new(config: &SimulationConfig) -> Result<Self, ConfigError> {
        Ok(Self::from_resolved(config.resolve()?))
    }

    pub fn from_resolved(config: ResolvedConfig) -> Self {
        let mut graph = SceneGraph::new();
        let scene_root = graph.root();

        let rig = CraneRig::build(&mut graph, scene_root, config.dimensions, config.crane_position);
        let container = ContainerTarget::build(
            &mut graph,
            scene_root,
            config.container_position,
            config.container_width,
            config.container_height,
        );
        let carousel = config
            .carousel
            .map(|(dims, x, z)| Carousel::build(&mut graph, scene_root, dims, x, z));

        let mut site = Self {
            graph,
            rig,
            bindings: config.bindings,
            controls: ManualControlState::new(),
            updater: config.updater,
            detector: CollisionDetector::new(),
            sequencer: DeliverySequencer::new(config.plan),
            cargo: Vec::new(),
            container,
            carousel,
            trace: config.record_trace.then(FrameTrace::new),
            frame: 0,
            time: 0.0,
        };
        for (position, radius) in config.cargo {
            site.add_cargo(position, radius);
        }

        info!(
            "crane site ready: jib {}, slew {}, travel {}, {} cargo item(s), carousel {}",
            DisplayLength(from_coord(site.rig.dims.jib_length)),
            DisplayAngularVelocity(AngularVelocity::new::<radian_per_second>(site.updater.rotation_speed)),
            DisplayVelocity(Velocity::new::<meter_per_second>(site.updater.linear_speed)),
            site.cargo.len(),
            if site.carousel.is_some() { "on" } else { "off" }
        );
        debug!(
            "delivery bearing {}, drop x {}",
            DisplayAngle(from_radians(site.sequencer.plan.target_bearing)),
            DisplayLength(from_coord(site.sequencer.plan.trolley_target_x))
        );
        site
    }

    pub fn rig_root(&self) -> NodeId {
        self.rig.root
    }

    pub fn rig(&self) -> &CraneRig {
        &self.rig
    }

    pub fn graph(&self) -> &SceneGraph {
        &self.graph
    }

    pub fn bindings(&self) -> &KeyBindings {
        &self.bindings
    }

    pub fn controls(&self) -> &ManualControlState {
        &self.controls
    }

    pub fn sequencer(&self) -> &DeliverySequencer {
        &self.sequencer
    }

    pub fn step(&self) -> DeliveryStep {
        self.sequencer.step()
    }

    pub fn container(&self) -> &ContainerTarget {
        &self.container
    }

    pub fn carousel(&self) -> Option<&Carousel> {
        self.carousel.as_ref()
    }

    pub fn trace(&self) -> Option<&FrameTrace> {
        self.trace.as_ref()
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Place a free cargo item with its centre at `position` (scene frame)
    pub fn add_cargo(&mut self, position: na::Vector3<f64>, radius: f64) -> CargoId {
        let id = CargoId(self.cargo.len());
        let root = self.graph.root();
        self.cargo
            .push(CargoItem::spawn(&mut self.graph, root, id, position, radius));
        debug!("cargo {} placed at {:?}", id.0, position);
        id
    }

    pub fn cargo(&self, id: CargoId) -> Option<&CargoItem> {
        self.cargo.iter().find(|item| item.id == id)
    }

    pub fn cargo_items(&self) -> &[CargoItem] {
        &self.cargo
    }

    /// Returns true when some part of the scene reacted to the key
    pub fn on_key_down(&mut self, key: Key) -> bool {
        if self.bindings.is_movement_key(key) {
            return self.controls.key_down(&self.bindings, key);
        }
        match self.carousel.as_mut() {
            Some(carousel) => carousel.on_key_down(key),
            None => false,
        }
    }

    pub fn on_key_up(&mut self, key: Key) -> bool {
        self.controls.key_up(&self.bindings, key)
    }

    /// Advance the scene by `dt` seconds
    pub fn update(&mut self, dt: f64) {
        if self.sequencer.is_idle() {
            let directives = *self.controls.directives();
            self.updater.apply(&mut self.graph, &mut self.rig, &directives, dt);
        } else {
            let directives = *self.sequencer.directives();
            let targets = *self.sequencer.targets();
            self.updater
                .apply_toward(&mut self.graph, &mut self.rig, &directives, &targets, dt);
        }

        let hits = if self.sequencer.is_idle() {
            self.detector
                .detect(&self.graph, self.rig.claw, &self.rig.claw_sphere, &self.cargo)
        } else {
            Vec::new()
        };
        for id in &hits {
            if self.sequencer.enqueue(*id) {
                debug!("cargo {} queued for delivery", id.0);
            }
        }

        self.sequencer.tick(DeliveryContext {
            graph: &mut self.graph,
            rig: &self.rig,
            cargo: &mut self.cargo,
            container: &self.container,
            controls: &mut self.controls,
            touching: &hits,
        });

        if let Some(carousel) = self.carousel.as_mut() {
            carousel.update(&mut self.graph, dt);
        }

        self.frame += 1;
        if dt.is_finite() && dt > 0.0 {
            self.time += dt;
        }

        if self.trace.is_some() {
            let record = self.frame_record();
            if let Some(trace) = self.trace.as_mut() {
                trace.record(record);
            }
        }
    }

    fn frame_record(&self) -> FrameRecord {
        let joints = self.rig.state();
        let claw = self.rig.claw_world_center(&self.graph);
        FrameRecord {
            frame: self.frame,
            time: self.time,
            step: format!("{:?}", self.sequencer.step()),
            rotation: self.rig.wrapped_rotation(),
            trolley_offset: joints.trolley_offset,
            hook_height: joints.hook_height,
            claw_angle: joints.claw_angle,
            claw_x: claw.x,
            claw_y: claw.y,
            claw_z: claw.z,
            queued: self.sequencer.queue().len(),
            delivered: self.sequencer.delivered_count(),
        }
    }

    pub fn snapshot(&self) -> SiteSnapshot {
        let claw = self.rig.claw_world_center(&self.graph);
        SiteSnapshot {
            frame: self.frame,
            time: self.time,
            step: self.sequencer.step(),
            joints: *self.rig.state(),
            claw_center: [claw.x, claw.y, claw.z],
            manual_suppressed: self.controls.is_suppressed(),
            queued: self.sequencer.queue().iter().map(|id| id.0).collect(),
            delivered: self.sequencer.delivered_count(),
            cargo: self
                .cargo
                .iter()
                .map(|item| {
                    let center = item.world_center(&self.graph);
                    CargoSnapshot {
                        id: item.id.0,
                        state: item.state,
                        parent: self
                            .graph
                            .parent(item.node)
                            .map(|parent| self.graph.node_name(parent).to_string())
                            .unwrap_or_default(),
                        world_center: [center.x, center.y, center.z],
                    }
                })
                .collect(),
            carousel: self.carousel.as_ref().map(|carousel| CarouselSnapshot {
                rotation: carousel.rotation(),
                ring_heights: RingId::ALL.map(|id| self.graph.position(carousel.ring(id).node).y),
            }),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SiteSnapshot {
    pub frame: u64,
    pub time: f64,
    pub step: DeliveryStep,
    pub joints: JointState,
    pub claw_center: [f64; 3],
    pub manual_suppressed: bool,
    pub queued: Vec<usize>,
    pub delivered: usize,
    pub cargo: Vec<CargoSnapshot>,
    pub carousel: Option<CarouselSnapshot>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CargoSnapshot {
    pub id: usize,
    pub state: CargoState,
    /// Name of the node currently holding the item
    pub parent: String,
    pub world_center: [f64; 3],
}

#[derive(Debug, Clone, Serialize)]
pub struct CarouselSnapshot {
    pub rotation: f64,
    pub ring_heights: [f64; 3],
}

impl SiteSnapshot {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const DT: f64 = 1.0 / 60.0;

    fn site() -> CraneSite {
        CraneSite::new(&SimulationConfig::default()).unwrap()
    }

    #[test]
    fn test_site_builds_at_rest() {
        let site = site();
        let claw = site.rig().claw_world_center(site.graph());

        assert_eq!(site.step(), DeliveryStep::Idle);
        assert_relative_eq!(claw.x, 10.0, epsilon = 1e-9);
        assert_relative_eq!(claw.y, 15.5, epsilon = 1e-9);
        assert_eq!(site.graph().parent(site.rig_root()), Some(site.graph().root()));
        assert!(site.carousel().is_none());
        assert!(site.trace().is_none());
    }

    #[test]
    fn test_manual_keys_drive_joints() {
        let mut site = site();
        assert!(site.on_key_down(Key::W));
        for _ in 0..60 {
            site.update(DT);
        }
        assert!(site.on_key_up(Key::W));
        site.update(DT);

        assert_relative_eq!(site.rig().trolley_offset(), 15.0, epsilon = 1e-9);
    }

    #[test]
    fn test_unbound_key_ignored() {
        let mut site = site();
        assert!(!site.on_key_down(Key::Z));
        assert!(!site.on_key_down(Key::Digit1));
        site.update(DT);
        assert!(site.controls().directives().is_idle());
    }

    #[test]
    fn test_touching_cargo_arms_same_frame() {
        let mut site = site();
        let id = site.add_cargo(na::Vector3::new(10.0, 15.5, 2.0), 1.0);

        site.update(DT);

        assert_eq!(site.step(), DeliveryStep::LiftClaw);
        assert_eq!(site.cargo(id).map(|item| item.state), Some(CargoState::Held));
        assert_eq!(site.graph().parent(site.cargo(id).unwrap().node), Some(site.rig().claw));
        assert!(site.controls().is_suppressed());
    }

    #[test]
    fn test_snapshot_serializes() {
        let mut site = site();
        site.add_cargo(na::Vector3::new(-5.0, 1.0, 0.0), 1.0);
        site.update(DT);

        let snapshot = site.snapshot();
        assert_eq!(snapshot.frame, 1);
        assert_eq!(snapshot.cargo[0].parent, "scene");

        let json = snapshot.to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["step"], "Idle");
        assert_eq!(value["cargo"][0]["state"], "Free");
        assert!(value["carousel"].is_null());
    }
}
