use uom::si::{
    angle::radian,
    angular_velocity::radian_per_second,
    f64::{Angle, AngularVelocity, Length, Velocity},
    length::meter,
    velocity::meter_per_second,
};

/// Convert a UOM length to a scene coordinate (metres)
#[inline]
pub fn to_coord(length: Length) -> f64 {
    length.get::<meter>()
}

/// Convert a scene coordinate (metres) back to a UOM length
#[inline]
pub fn from_coord(value: f64) -> Length {
    Length::new::<meter>(value)
}

/// Convert a UOM angle to scene radians
#[inline]
pub fn to_radians(angle: Angle) -> f64 {
    angle.get::<radian>()
}

#[inline]
pub fn from_radians(value: f64) -> Angle {
    Angle::new::<radian>(value)
}

/// Linear speed in scene units per second
#[inline]
pub fn to_scene_speed(speed: Velocity) -> f64 {
    speed.get::<meter_per_second>()
}

/// Angular speed in radians per second
#[inline]
pub fn to_scene_angular_speed(speed: AngularVelocity) -> f64 {
    speed.get::<radian_per_second>()
}

/// Wrap an unbounded angle accumulator into [0, 2π)
pub fn wrap_angle(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(std::f64::consts::TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if wrapped >= std::f64::consts::TAU { 0.0 } else { wrapped }
}

/// Smallest absolute difference between two angles, in [0, π]
pub fn angular_distance(a: f64, b: f64) -> f64 {
    let d = wrap_angle(a - b);
    d.min(std::f64::consts::TAU - d)
}
