use crate::control::{Axis, Directives};
use crate::equipment::crane::CraneRig;
use crate::scene::SceneGraph;
use crate::types::wrap_angle;
use std::f64::consts::TAU;

/// Values a driven joint must stop on instead of stepping past
///
/// `rotation` is a bearing in [0, 2π); `trolley_offset` is in jib coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct JointTargets {
    pub rotation: Option<f64>,
    pub trolley_offset: Option<f64>,
}

/// Applies per-axis directives to the rig once per frame
///
/// Joint limits are absorbed by clamping: a directive pushing against a bound
/// simply has no effect.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KinematicsUpdater {
    /// Slew and claw speed, rad/s
    pub rotation_speed: f64,
    /// Trolley and hook speed, m/s
    pub linear_speed: f64,
}

impl Default for KinematicsUpdater {
    fn default() -> Self {
        Self {
            rotation_speed: 0.5,
            linear_speed: 5.0,
        }
    }
}

impl KinematicsUpdater {
    pub fn new(rotation_speed: f64, linear_speed: f64) -> Self {
        Self {
            rotation_speed,
            linear_speed,
        }
    }

    pub fn apply(&self, graph: &mut SceneGraph, rig: &mut CraneRig, directives: &Directives, dt: f64) {
        self.apply_toward(graph, rig, directives, &JointTargets::default(), dt);
    }

    /// Like [`apply`](Self::apply), but a joint whose step would cross its
    /// target lands on it exactly
    pub fn apply_toward(
        &self,
        graph: &mut SceneGraph,
        rig: &mut CraneRig,
        directives: &Directives,
        targets: &JointTargets,
        dt: f64,
    ) {
        let dt = if dt.is_finite() && dt > 0.0 { dt } else { 0.0 };

        let rotate = directives.get(Axis::Rotate);
        if rotate != 0 {
            let sign = f64::from(rotate);
            let mut step = self.rotation_speed * dt;
            if let Some(target) = targets.rotation {
                // arc still to travel in the driven direction; a hair short of a
                // full turn means the slew is already on the target
                let remaining = wrap_angle(sign * (target - rig.wrapped_rotation()));
                let remaining = if TAU - remaining < 1e-9 { 0.0 } else { remaining };
                step = step.min(remaining);
            }
            rig.set_rotation(graph, rig.rotation_angle() + sign * step);
        }

        let trolley = directives.get(Axis::Trolley);
        if trolley != 0 {
            let sign = f64::from(trolley);
            let mut offset = rig.trolley_offset() + sign * self.linear_speed * dt;
            if let Some(target) = targets.trolley_offset {
                let ahead = sign * (target - rig.trolley_offset()) >= 0.0;
                if ahead && sign * (offset - target) > 0.0 {
                    offset = target;
                }
            }
            rig.set_trolley_offset(graph, offset);
        }

        let hook = directives.get(Axis::Hook);
        if hook != 0 {
            let height = rig.hook_height() + f64::from(hook) * self.linear_speed * dt;
            rig.set_hook_height(graph, height);
        }

        let claw = directives.get(Axis::Claw);
        if claw != 0 {
            let angle = rig.claw_angle() + f64::from(claw) * self.rotation_speed * dt;
            rig.set_claw_angle(graph, angle);
        }
    }
}
