pub mod conversion;
pub mod units;

pub use uom::si::f64::{Angle, AngularVelocity, Length, Velocity};
pub use uom::si::{
    angle::{degree, radian, revolution},
    angular_velocity::{degree_per_second, radian_per_second, revolution_per_minute},
    length::{centimeter, foot, inch, meter, millimeter},
    velocity::{centimeter_per_second, foot_per_second, kilometer_per_hour, meter_per_second},
};

pub use conversion::*;
pub use units::{
    AngleValue, AngularVelocityValue, DisplayAngle, DisplayAngularVelocity, DisplayLength,
    DisplayVelocity, LengthValue, UnitError, VelocityValue, WithUnit,
};

// Re-export nalgebra
pub use nalgebra as na;
