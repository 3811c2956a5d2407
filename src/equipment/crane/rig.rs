use nalgebra as na;
use std::f64::consts::FRAC_PI_2;

use crate::equipment::crane::{CraneDimensions, JointLimits};
use crate::kinematics::forward::JointState;
use crate::kinematics::transforms::yaw;
use crate::scene::{BoundingSphere, NodeId, SceneGraph, Transform};
use crate::types::wrap_angle;

/// The crane's transform hierarchy
///
/// ```text
/// root ─ base (static) ─ upper_assembly (yaw)
///                           └─ trolley (x along the jib)
///                                ├─ cable (y position + y scale)
///                                └─ hook (y)
///                                     ├─ claw ─ teeth[4]
///                                     └─ camera_mount
/// ```
#[derive(Debug, Clone)]
pub struct CraneRig {
    pub dims: CraneDimensions,
    pub limits: JointLimits,

    pub root: NodeId,
    pub base: NodeId,
    pub upper_assembly: NodeId,
    pub trolley: NodeId,
    pub cable: NodeId,
    pub hook: NodeId,
    pub claw: NodeId,
    pub teeth: [NodeId; 4],
    pub camera_mount: NodeId,

    /// Claw bounding sphere in the claw node's frame
    pub claw_sphere: BoundingSphere,

    state: JointState,
}

impl CraneRig {
    /// Build the rig under `parent` with its base centred at `position`
    ///
    /// At rest the hook hangs straight below the trolley.
    pub fn build(
        graph: &mut SceneGraph,
        parent: NodeId,
        dims: CraneDimensions,
        position: na::Vector3<f64>,
    ) -> Self {
        let limits = dims.limits();

        let root = graph.create_node_with(
            "crane",
            parent,
            Transform::from_translation(position.x, position.y, position.z),
        );

        let base = graph.create_node("crane.base", root);
        graph.create_node_with(
            "crane.base.footing",
            base,
            Transform::from_translation(0.0, dims.base_height / 2.0, 0.0),
        );
        graph.create_node_with(
            "crane.base.tower",
            base,
            Transform::from_translation(0.0, dims.base_height + dims.tower_height / 2.0, 0.0),
        );
        graph.create_node_with(
            "crane.base.turntable",
            base,
            Transform::from_translation(
                0.0,
                dims.base_height + dims.tower_height + dims.turntable_height / 2.0,
                0.0,
            ),
        );

        let upper_assembly = graph.create_node_with(
            "crane.upper",
            root,
            Transform::from_translation(0.0, dims.pivot_height(), 0.0),
        );
        graph.create_node_with(
            "crane.upper.jib",
            upper_assembly,
            Transform::from_translation(dims.jib_length / 2.0, dims.jib_height, 0.0),
        );
        graph.create_node_with(
            "crane.upper.counter_jib",
            upper_assembly,
            Transform::from_translation(-dims.counter_jib_length / 2.0, dims.jib_height, 0.0),
        );

        let trolley = graph.create_node_with(
            "crane.trolley",
            upper_assembly,
            Transform::from_translation(dims.rest_trolley_offset, dims.trolley_local_y(), 0.0),
        );
        let cable = graph.create_node_with(
            "crane.cable",
            trolley,
            Transform::from_translation(0.0, dims.cable_rest_y(), 0.0),
        );
        let hook = graph.create_node_with(
            "crane.hook",
            trolley,
            Transform::from_translation(0.0, dims.hook_rest_y(), 0.0),
        );
        let claw = graph.create_node_with(
            "crane.claw",
            hook,
            Transform::from_translation(0.0, dims.claw_offset_y(), 0.0),
        );

        let tooth_radius = dims.hook_block_height / 2.0;
        let teeth = [0usize, 1, 2, 3].map(|i| {
            let bearing = i as f64 * FRAC_PI_2;
            let offset = yaw(bearing) * na::Vector3::new(tooth_radius, 0.0, 0.0);
            graph.create_node_with(
                format!("crane.claw.tooth{i}"),
                claw,
                Transform {
                    translation: offset,
                    rotation: yaw(bearing),
                    ..Transform::identity()
                },
            )
        });

        let camera_mount = graph.create_node_with(
            "crane.hook.camera",
            hook,
            Transform::from_translation(0.0, dims.claw_offset_y() - dims.claw_tooth_length, 0.0),
        );

        let state = JointState {
            rotation_angle: 0.0,
            trolley_offset: dims.rest_trolley_offset,
            hook_height: dims.hook_rest_y(),
            claw_angle: 0.0,
        };

        Self {
            dims,
            limits,
            root,
            base,
            upper_assembly,
            trolley,
            cable,
            hook,
            claw,
            teeth,
            camera_mount,
            claw_sphere: BoundingSphere::new(dims.claw_radius),
            state,
        }
    }

    pub fn state(&self) -> &JointState {
        &self.state
    }

    pub fn rotation_angle(&self) -> f64 {
        self.state.rotation_angle
    }

    /// Rotation accumulator wrapped into [0, 2π), used for comparisons
    pub fn wrapped_rotation(&self) -> f64 {
        wrap_angle(self.state.rotation_angle)
    }

    pub fn trolley_offset(&self) -> f64 {
        self.state.trolley_offset
    }

    pub fn hook_height(&self) -> f64 {
        self.state.hook_height
    }

    pub fn claw_angle(&self) -> f64 {
        self.state.claw_angle
    }

    /// Node position relative to the rig root
    pub fn current_world_position(&self, graph: &SceneGraph, node: NodeId) -> na::Point3<f64> {
        graph.position_relative_to(node, self.root)
    }

    pub fn claw_world_center(&self, graph: &SceneGraph) -> na::Point3<f64> {
        self.claw_sphere.world_center(graph, self.claw)
    }

    pub fn set_rotation(&mut self, graph: &mut SceneGraph, angle: f64) {
        self.state.rotation_angle = angle;
        graph.set_rotation(self.upper_assembly, yaw(angle));
    }

    /// Clamped to the trolley travel range
    pub fn set_trolley_offset(&mut self, graph: &mut SceneGraph, offset: f64) {
        let offset = self.limits.clamp_trolley(offset);
        self.state.trolley_offset = offset;

        let mut position = graph.position(self.trolley);
        position.x = offset;
        graph.set_position(self.trolley, position);
    }

    /// Clamped to the hook travel range; keeps the cable spanning trolley to hook
    pub fn set_hook_height(&mut self, graph: &mut SceneGraph, height: f64) {
        let height = self.limits.clamp_hook(height);
        self.state.hook_height = height;

        let mut position = graph.position(self.hook);
        position.y = height;
        graph.set_position(self.hook, position);

        self.sync_cable(graph);
    }

    /// Clamped to ±π/4; every tooth tilts by the same amount
    pub fn set_claw_angle(&mut self, graph: &mut SceneGraph, angle: f64) {
        let angle = self.limits.clamp_claw(angle);
        self.state.claw_angle = angle;

        for (i, tooth) in self.teeth.iter().enumerate() {
            let bearing = i as f64 * FRAC_PI_2;
            let tilt = na::UnitQuaternion::from_axis_angle(&na::Vector3::z_axis(), angle);
            graph.set_rotation(*tooth, yaw(bearing) * tilt);
        }
    }

    fn sync_cable(&self, graph: &mut SceneGraph) {
        let delta = self.state.hook_height - self.dims.hook_rest_y();

        let mut position = graph.position(self.cable);
        position.y = self.dims.cable_rest_y() + delta / 2.0;
        graph.set_position(self.cable, position);

        let mut scale = graph.scale(self.cable);
        scale.y = 1.0 - delta / self.dims.cable_length;
        graph.set_scale(self.cable, scale);
    }

    /// Ends of the rendered cable in the trolley frame, as (top, bottom) y
    ///
    /// The cable mesh is a unit-length segment of `cable_length` centred on its
    /// node, so its ends follow from the node's position and y scale.
    pub fn cable_span(&self, graph: &SceneGraph) -> (f64, f64) {
        let center = graph.position(self.cable).y;
        let half = graph.scale(self.cable).y * self.dims.cable_length / 2.0;
        (center + half, center - half)
    }
}
