//! Simulation configuration loaded from TOML.
//!
//! Every section has defaults, so an empty file describes the stock scene:
//! the crane at the origin, the container at (6, 0, 6), no cargo.

use std::f64::consts::PI;
use std::fs;
use std::path::Path;

use nalgebra as na;
use serde::{Deserialize, Serialize};

use crate::control::{Axis, ControlError, Key, KeyBindings};
use crate::delivery::{DeliveryPlan, PlanError};
use crate::equipment::carousel::CarouselDimensions;
use crate::equipment::crane::{CraneDimensions, DimensionError};
use crate::kinematics::{ForwardKinematics, KinematicsUpdater};
use crate::types::*;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Unit error: {0}")]
    Unit(#[from] UnitError),

    #[error("Crane dimensions: {0}")]
    Dimension(#[from] DimensionError),

    #[error("Delivery plan: {0}")]
    Plan(#[from] PlanError),

    #[error("Key bindings: {0}")]
    Control(#[from] ControlError),

    #[error("Invalid value: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub crane: CraneSection,
    pub motion: MotionSection,
    pub delivery: DeliverySection,
    pub container: ContainerSection,
    pub bindings: BindingsSection,
    pub cargo: Vec<CargoSection>,
    pub carousel: Option<CarouselSection>,
    pub telemetry: TelemetrySection,
}

fn meters() -> String {
    "m".into()
}

/// Crane placement and part sizes, all in `unit`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CraneSection {
    pub unit: String,
    pub position: [f64; 3],
    #[serde(flatten)]
    pub dimensions: CraneDimensions,
}

impl Default for CraneSection {
    fn default() -> Self {
        Self {
            unit: meters(),
            position: [0.0; 3],
            dimensions: CraneDimensions::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionSection {
    /// Slew and claw speed
    pub rotation_speed: AngularVelocityValue,
    /// Trolley and hook speed
    pub linear_speed: VelocityValue,
}

impl Default for MotionSection {
    fn default() -> Self {
        let updater = KinematicsUpdater::default();
        Self {
            rotation_speed: AngularVelocityValue::radians_per_second(updater.rotation_speed),
            linear_speed: VelocityValue::meters_per_second(updater.linear_speed),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DeliverySection {
    pub target_bearing: AngleValue,
    /// Trolley x relative to the crane base when over the container
    pub trolley_target_x: LengthValue,
    /// Claw tip height above the crane base while carrying cargo
    pub lift_clearance: LengthValue,
    /// Claw tip height above the container rim at release
    pub release_clearance: LengthValue,
    pub angle_tolerance: AngleValue,
    pub position_tolerance: LengthValue,
}

impl Default for DeliverySection {
    fn default() -> Self {
        Self {
            target_bearing: AngleValue::radians(7.0 * PI / 4.0),
            trolley_target_x: LengthValue::meters(6.0),
            lift_clearance: LengthValue::meters(20.0),
            release_clearance: LengthValue::meters(0.5),
            angle_tolerance: AngleValue::radians(0.01),
            position_tolerance: LengthValue::meters(0.1),
        }
    }
}

/// Container placement relative to the crane base, in `unit`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ContainerSection {
    pub unit: String,
    pub position: [f64; 3],
    pub width: f64,
    pub height: f64,
}

impl Default for ContainerSection {
    fn default() -> Self {
        Self {
            unit: meters(),
            position: [6.0, 0.0, 6.0],
            width: 4.0,
            height: 4.0,
        }
    }
}

/// One (positive, negative) key pair per axis
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BindingsSection {
    pub rotate: [Key; 2],
    pub trolley: [Key; 2],
    pub hook: [Key; 2],
    pub claw: [Key; 2],
}

impl Default for BindingsSection {
    fn default() -> Self {
        Self {
            rotate: [Key::Q, Key::A],
            trolley: [Key::W, Key::S],
            hook: [Key::E, Key::D],
            claw: [Key::R, Key::F],
        }
    }
}

/// Cargo position relative to the scene origin, in `unit`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CargoSection {
    #[serde(default = "meters")]
    pub unit: String,
    pub position: [f64; 3],
    pub radius: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CarouselSection {
    pub position: [f64; 2],
    #[serde(flatten)]
    pub dimensions: CarouselDimensions,
}

impl Default for CarouselSection {
    fn default() -> Self {
        Self {
            position: [-30.0, 0.0],
            dimensions: CarouselDimensions::default(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TelemetrySection {
    /// Keep a per-frame trace in memory
    pub record: bool,
}

/// Config values converted to scene units and validated
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub dimensions: CraneDimensions,
    pub crane_position: na::Vector3<f64>,
    pub updater: KinematicsUpdater,
    pub plan: DeliveryPlan,
    pub bindings: KeyBindings,
    pub container_position: na::Vector3<f64>,
    pub container_width: f64,
    pub container_height: f64,
    pub cargo: Vec<(na::Vector3<f64>, f64)>,
    pub carousel: Option<(CarouselDimensions, f64, f64)>,
    pub record_trace: bool,
}

fn unit_factor(unit: &str) -> Result<f64, ConfigError> {
    Ok(to_coord(LengthValue::new(1.0, unit).to_length()?))
}

fn scaled_point(point: [f64; 3], factor: f64) -> na::Vector3<f64> {
    na::Vector3::new(point[0], point[1], point[2]) * factor
}

fn positive(name: &str, value: f64) -> Result<f64, ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(ConfigError::Invalid(format!("{name} must be positive, got {value}")))
    }
}

impl SimulationConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Convert to scene units and check everything the simulation relies on
    pub fn resolve(&self) -> Result<ResolvedConfig, ConfigError> {
        let crane_factor = unit_factor(&self.crane.unit)?;
        let dimensions = self.crane.dimensions.scaled(crane_factor);
        dimensions.validate()?;
        let crane_position = scaled_point(self.crane.position, crane_factor);

        let updater = KinematicsUpdater::new(
            positive(
                "rotation_speed",
                to_scene_angular_speed(self.motion.rotation_speed.to_angular_velocity()?),
            )?,
            positive("linear_speed", to_scene_speed(self.motion.linear_speed.to_velocity()?))?,
        );

        let container_factor = unit_factor(&self.container.unit)?;
        let container_offset = scaled_point(self.container.position, container_factor);
        let container_width = positive("container width", self.container.width * container_factor)?;
        let container_height = positive("container height", self.container.height * container_factor)?;

        let d = &self.delivery;
        let fk = ForwardKinematics::new(dimensions);
        let rim = container_offset.y + container_height;
        let plan = DeliveryPlan {
            target_bearing: wrap_angle(to_radians(d.target_bearing.to_angle()?)),
            trolley_target_x: to_coord(d.trolley_target_x.to_length()?),
            lift_height: fk.hook_height_for_tip(to_coord(d.lift_clearance.to_length()?)),
            release_height: fk.hook_height_for_tip(rim + to_coord(d.release_clearance.to_length()?)),
            angle_tolerance: to_radians(d.angle_tolerance.to_angle()?),
            position_tolerance: to_coord(d.position_tolerance.to_length()?),
        };
        plan.validate(&dimensions.limits())?;

        let b = &self.bindings;
        let bindings = KeyBindings::from_pairs(&[
            (Axis::Rotate, b.rotate[0], b.rotate[1]),
            (Axis::Trolley, b.trolley[0], b.trolley[1]),
            (Axis::Hook, b.hook[0], b.hook[1]),
            (Axis::Claw, b.claw[0], b.claw[1]),
        ])?;

        let cargo = self
            .cargo
            .iter()
            .map(|section| {
                let factor = unit_factor(&section.unit)?;
                let radius = positive("cargo radius", section.radius * factor)?;
                Ok((scaled_point(section.position, factor), radius))
            })
            .collect::<Result<Vec<_>, ConfigError>>()?;

        if let Some(carousel) = &self.carousel {
            positive("carousel cylinder_height", carousel.dimensions.cylinder_height)?;
            positive("carousel step_rate", carousel.dimensions.step_rate)?;
        }

        Ok(ResolvedConfig {
            dimensions,
            crane_position,
            updater,
            plan,
            bindings,
            container_position: crane_position + container_offset,
            container_width,
            container_height,
            cargo,
            carousel: self
                .carousel
                .as_ref()
                .map(|c| (c.dimensions, c.position[0], c.position[1])),
            record_trace: self.telemetry.record,
        })
    }
}
