pub mod rig;

pub use rig::CraneRig;

use serde::{Deserialize, Serialize};
use std::f64::consts::FRAC_PI_4;

/// Fixed part dimensions of the tower crane, in scene units (metres)
///
/// Everything the kinematics needs (pivot height, travel ranges, rest pose)
/// is derived from these once at build time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CraneDimensions {
    pub base_width: f64,
    pub base_height: f64,
    pub tower_width: f64,
    pub tower_height: f64,
    pub turntable_height: f64,
    /// Height of the jib's centreline above the slewing pivot
    pub jib_height: f64,
    pub jib_length: f64,
    pub jib_thickness: f64,
    pub counter_jib_length: f64,
    pub trolley_width: f64,
    pub trolley_thickness: f64,
    /// Cable length with the hook at rest
    pub cable_length: f64,
    /// Shortest the cable may get when the hook is fully raised
    pub min_cable_length: f64,
    pub hook_block_height: f64,
    pub claw_tooth_length: f64,
    pub claw_radius: f64,
    /// Trolley distance from the tower axis at rest
    pub rest_trolley_offset: f64,
}

impl Default for CraneDimensions {
    fn default() -> Self {
        Self {
            base_width: 6.0,
            base_height: 3.0,
            tower_width: 3.0,
            tower_height: 20.0,
            turntable_height: 2.0,
            jib_height: 4.0,
            jib_length: 20.0,
            jib_thickness: 1.5,
            counter_jib_length: 8.0,
            trolley_width: 2.0,
            trolley_thickness: 1.0,
            cable_length: 10.0,
            min_cable_length: 1.0,
            hook_block_height: 1.0,
            claw_tooth_length: 1.5,
            claw_radius: 1.5,
            rest_trolley_offset: 10.0,
        }
    }
}

impl CraneDimensions {
    /// Every length multiplied by `factor` (unit conversion)
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            base_width: self.base_width * factor,
            base_height: self.base_height * factor,
            tower_width: self.tower_width * factor,
            tower_height: self.tower_height * factor,
            turntable_height: self.turntable_height * factor,
            jib_height: self.jib_height * factor,
            jib_length: self.jib_length * factor,
            jib_thickness: self.jib_thickness * factor,
            counter_jib_length: self.counter_jib_length * factor,
            trolley_width: self.trolley_width * factor,
            trolley_thickness: self.trolley_thickness * factor,
            cable_length: self.cable_length * factor,
            min_cable_length: self.min_cable_length * factor,
            hook_block_height: self.hook_block_height * factor,
            claw_tooth_length: self.claw_tooth_length * factor,
            claw_radius: self.claw_radius * factor,
            rest_trolley_offset: self.rest_trolley_offset * factor,
        }
    }

    /// Height of the slewing pivot above the rig root
    pub fn pivot_height(&self) -> f64 {
        self.base_height + self.tower_height + self.turntable_height
    }

    /// Trolley centre height in the upper assembly frame (it rides under the jib)
    pub fn trolley_local_y(&self) -> f64 {
        self.jib_height - self.jib_thickness / 2.0 - self.trolley_thickness / 2.0
    }

    /// Cable centre under the trolley with the hook at rest
    pub fn cable_rest_y(&self) -> f64 {
        -(self.trolley_thickness + self.cable_length) / 2.0
    }

    /// Hook block centre under the trolley at rest
    pub fn hook_rest_y(&self) -> f64 {
        -(self.trolley_thickness / 2.0 + self.cable_length + self.hook_block_height / 2.0)
    }

    /// Claw centre relative to the hook block
    pub fn claw_offset_y(&self) -> f64 {
        -(self.hook_block_height / 2.0 + self.claw_tooth_length / 2.0)
    }

    pub fn limits(&self) -> JointLimits {
        let trolley_world_y = self.pivot_height() + self.trolley_local_y();
        // lowest hook height puts the claw tips on the ground
        let hook_floor = self.hook_block_height / 2.0 + self.claw_tooth_length;

        JointLimits {
            trolley_min: 1.5 * self.tower_width,
            trolley_max: self.jib_length,
            hook_min: hook_floor - trolley_world_y,
            hook_max: self.hook_rest_y() + (self.cable_length - self.min_cable_length),
            claw_min: -FRAC_PI_4,
            claw_max: FRAC_PI_4,
        }
    }

    pub fn validate(&self) -> Result<(), DimensionError> {
        let named = [
            ("base_width", self.base_width),
            ("base_height", self.base_height),
            ("tower_width", self.tower_width),
            ("tower_height", self.tower_height),
            ("turntable_height", self.turntable_height),
            ("jib_height", self.jib_height),
            ("jib_length", self.jib_length),
            ("jib_thickness", self.jib_thickness),
            ("counter_jib_length", self.counter_jib_length),
            ("trolley_width", self.trolley_width),
            ("trolley_thickness", self.trolley_thickness),
            ("cable_length", self.cable_length),
            ("min_cable_length", self.min_cable_length),
            ("hook_block_height", self.hook_block_height),
            ("claw_tooth_length", self.claw_tooth_length),
            ("claw_radius", self.claw_radius),
        ];
        for (name, value) in named {
            if !(value.is_finite() && value > 0.0) {
                return Err(DimensionError::NotPositive { name, value });
            }
        }

        if self.min_cable_length >= self.cable_length {
            return Err(DimensionError::CableTooShort {
                min: self.min_cable_length,
                rest: self.cable_length,
            });
        }

        let limits = self.limits();
        if limits.trolley_min >= limits.trolley_max {
            return Err(DimensionError::JibTooShort {
                jib_length: self.jib_length,
                min_offset: limits.trolley_min,
            });
        }
        if !(limits.trolley_min..=limits.trolley_max).contains(&self.rest_trolley_offset) {
            return Err(DimensionError::RestTrolleyOutOfRange {
                offset: self.rest_trolley_offset,
                min: limits.trolley_min,
                max: limits.trolley_max,
            });
        }
        if limits.hook_min >= self.hook_rest_y() {
            return Err(DimensionError::TowerTooShort {
                tower_height: self.tower_height,
            });
        }

        Ok(())
    }
}

/// Travel ranges for the rig's degrees of freedom (rotation is unbounded)
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct JointLimits {
    pub trolley_min: f64,
    pub trolley_max: f64,
    pub hook_min: f64,
    pub hook_max: f64,
    pub claw_min: f64,
    pub claw_max: f64,
}

impl JointLimits {
    pub fn clamp_trolley(&self, offset: f64) -> f64 {
        offset.clamp(self.trolley_min, self.trolley_max)
    }

    pub fn clamp_hook(&self, height: f64) -> f64 {
        height.clamp(self.hook_min, self.hook_max)
    }

    pub fn clamp_claw(&self, angle: f64) -> f64 {
        angle.clamp(self.claw_min, self.claw_max)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DimensionError {
    #[error("Dimension {name} must be positive, got {value}")]
    NotPositive { name: &'static str, value: f64 },

    #[error("Minimum cable length {min} must be shorter than the rest length {rest}")]
    CableTooShort { min: f64, rest: f64 },

    #[error("Jib length {jib_length} leaves no trolley travel past {min_offset}")]
    JibTooShort { jib_length: f64, min_offset: f64 },

    #[error("Rest trolley offset {offset} outside travel range [{min}, {max}]")]
    RestTrolleyOutOfRange { offset: f64, min: f64, max: f64 },

    #[error("Tower height {tower_height} leaves no room to lower the hook")]
    TowerTooShort { tower_height: f64 },
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_limits() {
        let dims = CraneDimensions::default();
        let limits = dims.limits();

        assert_relative_eq!(dims.pivot_height(), 25.0);
        assert_relative_eq!(limits.trolley_min, 4.5);
        assert_relative_eq!(limits.trolley_max, 20.0);
        assert_relative_eq!(dims.hook_rest_y(), -11.0);
        assert_relative_eq!(limits.hook_max, -2.0);
        // trolley centre sits at 27.75, claw tips touch the ground
        assert_relative_eq!(limits.hook_min, -25.75);
        assert!(dims.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_dimensions() {
        let dims = CraneDimensions {
            jib_length: -1.0,
            ..Default::default()
        };
        assert!(matches!(
            dims.validate(),
            Err(DimensionError::NotPositive { name: "jib_length", .. })
        ));

        let dims = CraneDimensions {
            rest_trolley_offset: 2.0,
            ..Default::default()
        };
        assert!(matches!(dims.validate(), Err(DimensionError::RestTrolleyOutOfRange { .. })));

        let dims = CraneDimensions {
            min_cable_length: 12.0,
            ..Default::default()
        };
        assert!(matches!(dims.validate(), Err(DimensionError::CableTooShort { .. })));

        let dims = CraneDimensions {
            tower_height: 1.0,
            ..Default::default()
        };
        assert!(matches!(dims.validate(), Err(DimensionError::TowerTooShort { .. })));
    }

    #[test]
    fn test_scaled_from_centimeters() {
        let dims = CraneDimensions::default().scaled(100.0).scaled(0.01);
        assert_relative_eq!(dims.jib_length, 20.0, epsilon = 1e-12);
        assert!(dims.validate().is_ok());
    }

    #[test]
    fn test_clamps() {
        let limits = CraneDimensions::default().limits();
        assert_relative_eq!(limits.clamp_trolley(100.0), 20.0);
        assert_relative_eq!(limits.clamp_hook(-100.0), -25.75);
        assert_relative_eq!(limits.clamp_claw(1.0), FRAC_PI_4);
    }
}
