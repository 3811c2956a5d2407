mod display;
mod explicit_unit_values;

pub use display::{DisplayAngle, DisplayAngularVelocity, DisplayLength, DisplayVelocity};
pub use explicit_unit_values::{
    AngleValue, AngularVelocityValue, LengthValue, UnitError, VelocityValue, WithUnit,
};
