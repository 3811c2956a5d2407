use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::control::Axis;

/// Physical key identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Key {
    A, B, C, D, E, F, G, H, I, J, K, L, M,
    N, O, P, Q, R, S, T, U, V, W, X, Y, Z,
    Digit0, Digit1, Digit2, Digit3, Digit4,
    Digit5, Digit6, Digit7, Digit8, Digit9,
}

const LETTERS: [Key; 26] = [
    Key::A, Key::B, Key::C, Key::D, Key::E, Key::F, Key::G, Key::H, Key::I,
    Key::J, Key::K, Key::L, Key::M, Key::N, Key::O, Key::P, Key::Q, Key::R,
    Key::S, Key::T, Key::U, Key::V, Key::W, Key::X, Key::Y, Key::Z,
];

const DIGITS: [Key; 10] = [
    Key::Digit0, Key::Digit1, Key::Digit2, Key::Digit3, Key::Digit4,
    Key::Digit5, Key::Digit6, Key::Digit7, Key::Digit8, Key::Digit9,
];

impl Key {
    /// Case-insensitive letter or digit
    pub fn from_char(c: char) -> Option<Key> {
        let c = c.to_ascii_uppercase();
        match c {
            'A'..='Z' => Some(LETTERS[(c as u8 - b'A') as usize]),
            '0'..='9' => Some(DIGITS[(c as u8 - b'0') as usize]),
            _ => None,
        }
    }

    /// Browser-style key codes: 65..=90 for letters (97..=122 as char codes), 48..=57 for digits
    pub fn from_key_code(code: u32) -> Option<Key> {
        match code {
            48..=57 | 65..=90 | 97..=122 => char::from_u32(code).and_then(Key::from_char),
            _ => None,
        }
    }

    pub fn to_char(self) -> char {
        if let Some(i) = LETTERS.iter().position(|k| *k == self) {
            return (b'A' + i as u8) as char;
        }
        let i = DIGITS.iter().position(|k| *k == self).unwrap_or(0);
        (b'0' + i as u8) as char
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

impl FromStr for Key {
    type Err = ControlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.trim().chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Key::from_char(c).ok_or_else(|| ControlError::UnknownKey(s.to_string())),
            _ => Err(ControlError::UnknownKey(s.to_string())),
        }
    }
}

impl TryFrom<String> for Key {
    type Error = ControlError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Key> for String {
    fn from(key: Key) -> Self {
        key.to_char().to_string()
    }
}

/// What a movement key drives
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Binding {
    pub axis: Axis,
    pub sign: i8,
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ControlError {
    #[error("Unknown key: {0:?}")]
    UnknownKey(String),

    #[error("Key {key} is bound more than once")]
    DuplicateKey { key: Key },

    #[error("Axis {axis:?} has no key for direction {sign:+}")]
    MissingDirection { axis: Axis, sign: i8 },

    #[error("Binding sign must be +1 or -1, got {0}")]
    InvalidSign(i8),
}

/// Map from movement keys to (axis, sign)
#[derive(Debug, Clone, PartialEq)]
pub struct KeyBindings {
    map: HashMap<Key, Binding>,
}

impl Default for KeyBindings {
    /// Q/A slew, W/S trolley out/in, E/D hook up/down, R/F claw open/close
    fn default() -> Self {
        let pairs = [
            (Axis::Rotate, Key::Q, Key::A),
            (Axis::Trolley, Key::W, Key::S),
            (Axis::Hook, Key::E, Key::D),
            (Axis::Claw, Key::R, Key::F),
        ];

        let mut map = HashMap::new();
        for (axis, positive, negative) in pairs {
            map.insert(positive, Binding { axis, sign: 1 });
            map.insert(negative, Binding { axis, sign: -1 });
        }
        Self { map }
    }
}

impl KeyBindings {
    pub fn empty() -> Self {
        Self { map: HashMap::new() }
    }

    /// Build from one (positive, negative) key pair per axis and validate
    pub fn from_pairs(pairs: &[(Axis, Key, Key)]) -> Result<Self, ControlError> {
        let mut bindings = Self::empty();
        for (axis, positive, negative) in pairs {
            bindings.bind(*positive, *axis, 1)?;
            bindings.bind(*negative, *axis, -1)?;
        }
        bindings.validate()?;
        Ok(bindings)
    }

    pub fn bind(&mut self, key: Key, axis: Axis, sign: i8) -> Result<(), ControlError> {
        if sign != 1 && sign != -1 {
            return Err(ControlError::InvalidSign(sign));
        }
        if self.map.contains_key(&key) {
            return Err(ControlError::DuplicateKey { key });
        }
        self.map.insert(key, Binding { axis, sign });
        Ok(())
    }

    /// Every axis must be reachable in both directions
    pub fn validate(&self) -> Result<(), ControlError> {
        for axis in Axis::ALL {
            for sign in [1, -1] {
                let bound = self
                    .map
                    .values()
                    .any(|binding| binding.axis == axis && binding.sign == sign);
                if !bound {
                    return Err(ControlError::MissingDirection { axis, sign });
                }
            }
        }
        Ok(())
    }

    pub fn lookup(&self, key: Key) -> Option<Binding> {
        self.map.get(&key).copied()
    }

    pub fn is_movement_key(&self, key: Key) -> bool {
        self.map.contains_key(&key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_codes_accept_both_cases() {
        assert_eq!(Key::from_key_code(81), Some(Key::Q));
        assert_eq!(Key::from_key_code(113), Some(Key::Q));
        assert_eq!(Key::from_key_code(49), Some(Key::Digit1));
        assert_eq!(Key::from_key_code(13), None);
    }

    #[test]
    fn test_key_string_round_trip() {
        for c in ['A', 'z', '7'] {
            let key = Key::from_char(c).unwrap();
            let back: Key = String::from(key).parse().unwrap();
            assert_eq!(key, back);
        }
        assert!("QQ".parse::<Key>().is_err());
        assert!("?".parse::<Key>().is_err());
    }

    #[test]
    fn test_default_bindings_are_valid() {
        let bindings = KeyBindings::default();
        assert!(bindings.validate().is_ok());
        assert_eq!(bindings.lookup(Key::E), Some(Binding { axis: Axis::Hook, sign: 1 }));
        assert_eq!(bindings.lookup(Key::S), Some(Binding { axis: Axis::Trolley, sign: -1 }));
        assert!(!bindings.is_movement_key(Key::Digit1));
    }

    #[test]
    fn test_duplicate_key_rejected() {
        let result = KeyBindings::from_pairs(&[
            (Axis::Rotate, Key::Q, Key::A),
            (Axis::Trolley, Key::Q, Key::S),
            (Axis::Hook, Key::E, Key::D),
            (Axis::Claw, Key::R, Key::F),
        ]);
        assert_eq!(result, Err(ControlError::DuplicateKey { key: Key::Q }));
    }

    #[test]
    fn test_missing_direction_rejected() {
        let mut bindings = KeyBindings::empty();
        bindings.bind(Key::Q, Axis::Rotate, 1).unwrap();
        assert_eq!(
            bindings.validate(),
            Err(ControlError::MissingDirection { axis: Axis::Rotate, sign: -1 })
        );
        assert_eq!(bindings.bind(Key::Z, Axis::Rotate, 0), Err(ControlError::InvalidSign(0)));
    }
}
