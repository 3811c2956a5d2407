use serde::{self, Deserialize, Serialize};
use std::marker::PhantomData;
use uom::si::{
    angle::{degree, radian, revolution},
    angular_velocity::{degree_per_second, radian_per_second, revolution_per_minute},
    f64::{Angle, AngularVelocity, Length, Velocity},
    length::{centimeter, foot, inch, meter, millimeter},
    velocity::{centimeter_per_second, foot_per_second, kilometer_per_hour, meter_per_second},
};

/// A number paired with the unit it was written in, as found in config files
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct WithUnit<T> {
    pub value: f64,
    pub unit: String,
    #[serde(skip)]
    _marker: PhantomData<T>,
}

pub type LengthValue = WithUnit<Length>;
pub type AngleValue = WithUnit<Angle>;
pub type VelocityValue = WithUnit<Velocity>;
pub type AngularVelocityValue = WithUnit<AngularVelocity>;

impl<T> WithUnit<T> {
    pub fn new(value: f64, unit: impl Into<String>) -> Self {
        Self {
            value,
            unit: unit.into(),
            _marker: PhantomData,
        }
    }
}

impl<T> PartialEq for WithUnit<T> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value && self.unit == other.unit
    }
}

#[derive(Debug, thiserror::Error)]
pub enum UnitError {
    #[error("Unknown length unit: {0}")]
    UnknownLengthUnit(String),

    #[error("Unknown angle unit: {0}")]
    UnknownAngleUnit(String),

    #[error("Unknown velocity unit: {0}")]
    UnknownVelocityUnit(String),

    #[error("Unknown angular velocity unit: {0}")]
    UnknownAngularVelocityUnit(String),
}

impl WithUnit<Length> {
    pub fn to_length(&self) -> Result<Length, UnitError> {
        match self.unit.as_str() {
            "m" | "M"
            | "meter" | "Meter" | "METER"
            | "metre" | "Metre" | "METRE"
            | "meters" | "Meters" | "METERS"
            | "metres" | "Metres" | "METRES" => Ok(Length::new::<meter>(self.value)),
            "cm" | "Cm" | "CM"
            | "centimeter" | "centimeters"
            | "centimetre" | "centimetres" => Ok(Length::new::<centimeter>(self.value)),
            "mm" | "Mm" | "MM"
            | "millimeter" | "millimeters"
            | "millimetre" | "millimetres" => Ok(Length::new::<millimeter>(self.value)),
            "ft" | "Ft" | "FT"
            | "foot" | "Foot" | "FOOT"
            | "feet" | "Feet" | "FEET" => Ok(Length::new::<foot>(self.value)),
            "in" | "In" | "IN"
            | "inch" | "Inch" | "INCH"
            | "inches" | "Inches" | "INCHES" => Ok(Length::new::<inch>(self.value)),
            _ => Err(UnitError::UnknownLengthUnit(self.unit.clone())),
        }
    }

    pub fn meters(value: f64) -> Self {
        Self::new(value, "m")
    }
}

impl WithUnit<Angle> {
    pub fn to_angle(&self) -> Result<Angle, UnitError> {
        match self.unit.as_str() {
            "deg" | "Deg" | "DEG"
            | "degree" | "Degree" | "DEGREE"
            | "degrees" | "Degrees" | "DEGREES" | "°" => Ok(Angle::new::<degree>(self.value)),
            "rad" | "Rad" | "RAD"
            | "radian" | "Radian" | "RADIAN"
            | "radians" | "Radians" | "RADIANS" => Ok(Angle::new::<radian>(self.value)),
            "rev" | "revolution" | "revolutions"
            | "turn" | "turns" => Ok(Angle::new::<revolution>(self.value)),
            _ => Err(UnitError::UnknownAngleUnit(self.unit.clone())),
        }
    }

    pub fn radians(value: f64) -> Self {
        Self::new(value, "rad")
    }
}

impl WithUnit<Velocity> {
    pub fn to_velocity(&self) -> Result<Velocity, UnitError> {
        match self.unit.as_str() {
            "m/s" | "mps" | "meters per second"
            | "metres per second" => Ok(Velocity::new::<meter_per_second>(self.value)),
            "cm/s" | "centimeters per second" => Ok(Velocity::new::<centimeter_per_second>(self.value)),
            "km/h" | "kph" | "kmh" => Ok(Velocity::new::<kilometer_per_hour>(self.value)),
            "ft/s" | "fps" | "feet per second" => Ok(Velocity::new::<foot_per_second>(self.value)),
            _ => Err(UnitError::UnknownVelocityUnit(self.unit.clone())),
        }
    }

    pub fn meters_per_second(value: f64) -> Self {
        Self::new(value, "m/s")
    }
}

impl WithUnit<AngularVelocity> {
    pub fn to_angular_velocity(&self) -> Result<AngularVelocity, UnitError> {
        match self.unit.as_str() {
            "rad/s" | "radians per second" => Ok(AngularVelocity::new::<radian_per_second>(self.value)),
            "deg/s" | "°/s" | "degrees per second" => Ok(AngularVelocity::new::<degree_per_second>(self.value)),
            "rpm" | "RPM" | "rev/min" => Ok(AngularVelocity::new::<revolution_per_minute>(self.value)),
            _ => Err(UnitError::UnknownAngularVelocityUnit(self.unit.clone())),
        }
    }

    pub fn radians_per_second(value: f64) -> Self {
        Self::new(value, "rad/s")
    }
}
