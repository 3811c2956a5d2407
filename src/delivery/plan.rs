use std::f64::consts::PI;

use serde::Serialize;

use crate::equipment::crane::{CraneDimensions, JointLimits};
use crate::kinematics::{ForwardKinematics, IkError, InverseKinematics};

/// Fixed targets and tolerances for one delivery
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DeliveryPlan {
    /// Slew bearing of the container, radians in [0, 2π)
    pub target_bearing: f64,
    /// Trolley x relative to the crane base once over the container
    pub trolley_target_x: f64,
    /// Hook height (trolley frame) the claw is lifted to before and after the drop
    pub lift_height: f64,
    /// Hook height (trolley frame) at which the cargo is let go
    pub release_height: f64,
    pub angle_tolerance: f64,
    pub position_tolerance: f64,
}

pub const DEFAULT_TARGET_BEARING: f64 = 7.0 * PI / 4.0;
pub const DEFAULT_TROLLEY_TARGET_X: f64 = 6.0;
pub const DEFAULT_ANGLE_TOLERANCE: f64 = 0.01;
pub const DEFAULT_POSITION_TOLERANCE: f64 = 0.1;

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum PlanError {
    #[error("{name} {value} outside hook travel [{min}, {max}]")]
    HeightOutOfRange {
        name: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("Release height {release} must be below lift height {lift}")]
    ReleaseAboveLift { release: f64, lift: f64 },

    #[error("Tolerance {name} must be positive, got {value}")]
    BadTolerance { name: &'static str, value: f64 },

    #[error("Container unreachable: {0}")]
    Unreachable(#[from] IkError),
}

impl DeliveryPlan {
    /// Plan with the standard bearing and drop offset
    ///
    /// `lift_clearance` is the claw tip height above the crane base while
    /// travelling; `release_tip_height` is the claw tip height at release.
    pub fn for_rig(dims: &CraneDimensions, lift_clearance: f64, release_tip_height: f64) -> Self {
        let fk = ForwardKinematics::new(*dims);
        Self {
            target_bearing: DEFAULT_TARGET_BEARING,
            trolley_target_x: DEFAULT_TROLLEY_TARGET_X,
            lift_height: fk.hook_height_for_tip(lift_clearance),
            release_height: fk.hook_height_for_tip(release_tip_height),
            angle_tolerance: DEFAULT_ANGLE_TOLERANCE,
            position_tolerance: DEFAULT_POSITION_TOLERANCE,
        }
    }

    /// Reject plans whose thresholds the rig could never reach
    pub fn validate(&self, limits: &JointLimits) -> Result<(), PlanError> {
        for (name, value) in [("lift_height", self.lift_height), ("release_height", self.release_height)] {
            if !(limits.hook_min..=limits.hook_max).contains(&value) {
                return Err(PlanError::HeightOutOfRange {
                    name,
                    value,
                    min: limits.hook_min,
                    max: limits.hook_max,
                });
            }
        }
        if self.release_height >= self.lift_height {
            return Err(PlanError::ReleaseAboveLift {
                release: self.release_height,
                lift: self.lift_height,
            });
        }
        for (name, value) in [
            ("angle_tolerance", self.angle_tolerance),
            ("position_tolerance", self.position_tolerance),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(PlanError::BadTolerance { name, value });
            }
        }

        InverseKinematics::new(*limits)
            .trolley_offset_for_world_x(self.target_bearing, self.trolley_target_x)?;
        Ok(())
    }
}
