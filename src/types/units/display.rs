use std::fmt;
use uom::si::{
    angle::{degree, radian},
    angular_velocity::{degree_per_second, radian_per_second},
    f64::{Angle, AngularVelocity, Length, Velocity},
    length::{foot, meter},
    velocity::{kilometer_per_hour, meter_per_second},
};

#[derive(Debug, Clone, Copy)]
pub struct DisplayLength(pub Length);
#[derive(Debug, Clone, Copy)]
pub struct DisplayAngle(pub Angle);
#[derive(Debug, Clone, Copy)]
pub struct DisplayVelocity(pub Velocity);
#[derive(Debug, Clone, Copy)]
pub struct DisplayAngularVelocity(pub AngularVelocity);

impl fmt::Display for DisplayLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let meters = self.0.get::<meter>();
        let feet = self.0.get::<foot>();
        write!(f, "{:.3}m ({:.2}ft)", meters, feet)
    }
}

impl fmt::Display for DisplayAngle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}° ({:.4}rad)", self.0.get::<degree>(), self.0.get::<radian>())
    }
}

impl fmt::Display for DisplayVelocity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mps = self.0.get::<meter_per_second>();
        let kph = self.0.get::<kilometer_per_hour>();
        write!(f, "{:.2}m/s ({:.1}kph)", mps, kph)
    }
}

impl fmt::Display for DisplayAngularVelocity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rad = self.0.get::<radian_per_second>();
        let deg = self.0.get::<degree_per_second>();
        write!(f, "{:.3}rad/s ({:.1}°/s)", rad, deg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_display() {
        let shown = DisplayLength(Length::new::<meter>(20.0)).to_string();
        assert!(shown.starts_with("20.000m"));
    }

    #[test]
    fn test_angle_display() {
        let shown = DisplayAngle(Angle::new::<degree>(315.0)).to_string();
        assert!(shown.starts_with("315.00°"));
    }
}
