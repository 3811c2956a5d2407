use nalgebra as na;
use serde::Serialize;

use crate::equipment::crane::CraneDimensions;
use crate::kinematics::transforms::*;

/// The four values the updater drives; everything else follows from these
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct JointState {
    /// Slew accumulator in radians, unbounded
    pub rotation_angle: f64,

    /// Trolley distance from the tower axis along the jib
    pub trolley_offset: f64,

    /// Hook block centre relative to the trolley (negative is below)
    pub hook_height: f64,

    /// Claw tooth tilt, shared by all four teeth
    pub claw_angle: f64,
}

/// Forward kinematics solver
///
/// Given joint values, calculate part positions relative to the rig root
/// without walking the scene graph.
#[derive(Debug, Clone, Copy)]
pub struct ForwardKinematics {
    pub dims: CraneDimensions,
}

impl ForwardKinematics {
    pub fn new(dims: CraneDimensions) -> Self {
        Self { dims }
    }

    fn pivot(&self) -> na::Vector3<f64> {
        na::Vector3::new(0.0, self.dims.pivot_height(), 0.0)
    }

    /// Point at height `drop` below the trolley, expressed in the rig frame
    fn under_trolley(&self, joints: &JointState, drop: f64) -> na::Point3<f64> {
        let local = na::Vector3::new(
            joints.trolley_offset,
            self.dims.trolley_local_y() + drop,
            0.0,
        );
        let swung = rotation_y(joints.rotation_angle) * local;
        na::Point3::from(self.pivot() + swung)
    }

    pub fn hook_position(&self, joints: &JointState) -> na::Point3<f64> {
        self.under_trolley(joints, joints.hook_height)
    }

    pub fn claw_center(&self, joints: &JointState) -> na::Point3<f64> {
        self.under_trolley(joints, joints.hook_height + self.dims.claw_offset_y())
    }

    /// Hook height (trolley frame) that puts the claw tips at `tip_height` above the rig root
    pub fn hook_height_for_tip(&self, tip_height: f64) -> f64 {
        let trolley_y = self.dims.pivot_height() + self.dims.trolley_local_y();
        tip_height + self.dims.hook_block_height / 2.0 + self.dims.claw_tooth_length - trolley_y
    }

    /// Expected cable ends (top, bottom) in the trolley frame for a hook height
    pub fn cable_span(&self, hook_height: f64) -> (f64, f64) {
        (
            -self.dims.trolley_thickness / 2.0,
            hook_height + self.dims.hook_block_height / 2.0,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::equipment::crane::CraneRig;
    use crate::scene::SceneGraph;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_2;

    fn rest(dims: &CraneDimensions) -> JointState {
        JointState {
            rotation_angle: 0.0,
            trolley_offset: dims.rest_trolley_offset,
            hook_height: dims.hook_rest_y(),
            claw_angle: 0.0,
        }
    }

    #[test]
    fn test_rest_pose() {
        let dims = CraneDimensions::default();
        let fk = ForwardKinematics::new(dims);
        let joints = rest(&dims);

        let hook = fk.hook_position(&joints);
        assert_relative_eq!(hook.x, 10.0);
        assert_relative_eq!(hook.y, 16.75);
        assert_relative_eq!(hook.z, 0.0);
    }

    #[test]
    fn test_slew_quarter_turn() {
        let dims = CraneDimensions::default();
        let fk = ForwardKinematics::new(dims);
        let joints = JointState {
            rotation_angle: FRAC_PI_2,
            ..rest(&dims)
        };

        // +X swung by +π/2 about Y lands on -Z
        let hook = fk.hook_position(&joints);
        assert_relative_eq!(hook.x, 0.0, epsilon = 1e-9);
        assert_relative_eq!(hook.z, -10.0, epsilon = 1e-9);
    }

    #[test]
    fn test_matches_scene_graph() {
        let dims = CraneDimensions::default();
        let mut graph = SceneGraph::new();
        let root = graph.root();
        let mut rig = CraneRig::build(&mut graph, root, dims, na::Vector3::zeros());

        rig.set_rotation(&mut graph, 2.3);
        rig.set_trolley_offset(&mut graph, 14.0);
        rig.set_hook_height(&mut graph, -18.0);

        let fk = ForwardKinematics::new(dims);
        let joints = *rig.state();

        assert_relative_eq!(
            fk.hook_position(&joints),
            rig.current_world_position(&graph, rig.hook),
            epsilon = 1e-9
        );
        assert_relative_eq!(fk.claw_center(&joints), rig.claw_world_center(&graph), epsilon = 1e-9);
    }

    #[test]
    fn test_hook_height_for_tip_round_trip() {
        let dims = CraneDimensions::default();
        let fk = ForwardKinematics::new(dims);
        let joints = JointState {
            hook_height: fk.hook_height_for_tip(4.5),
            ..rest(&dims)
        };
        let tips = fk.hook_position(&joints).y - dims.hook_block_height / 2.0 - dims.claw_tooth_length;
        assert_relative_eq!(tips, 4.5, epsilon = 1e-12);
        assert_relative_eq!(fk.hook_height_for_tip(0.0), dims.limits().hook_min, epsilon = 1e-12);
    }
}
