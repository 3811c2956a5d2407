//! Keyboard-driven manual control of the rig.

pub mod keys;
pub mod manual;

pub use keys::*;
pub use manual::*;

use serde::{Deserialize, Serialize};

/// One degree of freedom of the rig
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    Rotate,
    Trolley,
    Hook,
    Claw,
}

impl Axis {
    pub const ALL: [Axis; 4] = [Axis::Rotate, Axis::Trolley, Axis::Hook, Axis::Claw];
}

/// Signed per-axis intentions, each -1, 0 or +1
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Directives {
    pub rotate: i8,
    pub trolley: i8,
    pub hook: i8,
    pub claw: i8,
}

impl Directives {
    pub fn get(&self, axis: Axis) -> i8 {
        match axis {
            Axis::Rotate => self.rotate,
            Axis::Trolley => self.trolley,
            Axis::Hook => self.hook,
            Axis::Claw => self.claw,
        }
    }

    /// Any non-zero value is reduced to its sign
    pub fn set(&mut self, axis: Axis, value: i8) {
        let value = value.signum();
        match axis {
            Axis::Rotate => self.rotate = value,
            Axis::Trolley => self.trolley = value,
            Axis::Hook => self.hook = value,
            Axis::Claw => self.claw = value,
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_idle(&self) -> bool {
        Axis::ALL.iter().all(|axis| self.get(*axis) == 0)
    }
}
