use crate::equipment::crane::JointLimits;

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum IkError {
    #[error("Bearing {bearing} rad runs parallel to the target plane x = {x}")]
    Unreachable { bearing: f64, x: f64 },

    #[error("Trolley offset {requested} outside travel range [{min}, {max}]")]
    OutOfTravel { requested: f64, min: f64, max: f64 },
}

/// Inverse kinematics for the trolley axis
///
/// Given a slew bearing, find the trolley offset that puts the trolley at a
/// desired x relative to the tower axis.
#[derive(Debug, Clone, Copy)]
pub struct InverseKinematics {
    pub limits: JointLimits,
}

impl InverseKinematics {
    pub fn new(limits: JointLimits) -> Self {
        Self { limits }
    }

    pub fn trolley_offset_for_world_x(&self, bearing: f64, x: f64) -> Result<f64, IkError> {
        // the jib axis swings to (cos θ, 0, -sin θ)
        let c = bearing.cos();
        if c.abs() < 1e-9 {
            return Err(IkError::Unreachable { bearing, x });
        }

        let offset = x / c;
        if offset < self.limits.trolley_min || offset > self.limits.trolley_max {
            return Err(IkError::OutOfTravel {
                requested: offset,
                min: self.limits.trolley_min,
                max: self.limits.trolley_max,
            });
        }

        Ok(offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::equipment::crane::CraneDimensions;
    use approx::assert_relative_eq;
    use std::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_container_bearing() {
        let ik = InverseKinematics::new(CraneDimensions::default().limits());
        let offset = ik.trolley_offset_for_world_x(7.0 * PI / 4.0, 6.0).unwrap();
        assert_relative_eq!(offset, 6.0 * 2f64.sqrt(), epsilon = 1e-9);
    }

    #[test]
    fn test_unreachable_targets() {
        let ik = InverseKinematics::new(CraneDimensions::default().limits());

        assert!(matches!(
            ik.trolley_offset_for_world_x(FRAC_PI_2, 6.0),
            Err(IkError::Unreachable { .. })
        ));
        // behind the tower at this bearing
        assert!(matches!(
            ik.trolley_offset_for_world_x(0.0, -6.0),
            Err(IkError::OutOfTravel { .. })
        ));
        assert!(matches!(
            ik.trolley_offset_for_world_x(0.0, 30.0),
            Err(IkError::OutOfTravel { .. })
        ));
    }
}
