// SPDX-FileCopyrightText: 2021 Kent Gibson <warthog618@gmail.com>
//
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::{Error, Result};
#[cfg(feature = "serde")]
use serde_derive::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An identifier for a pin in the global sysfs GPIO number space.
pub type PinNumber = u32;

/// The direction of a pin.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Direction {
    /// The pin is an input.
    #[default]
    Input,

    /// The pin is an output.
    Output,
}

impl Direction {
    /// The string written to, and read from, the direction attribute.
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Input => "in",
            Direction::Output => "out",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Direction {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "in" => Ok(Direction::Input),
            "out" => Ok(Direction::Output),
            _ => Err(Error::InvalidArgument(format!(
                "unknown direction '{s}', expected 'in' or 'out'"
            ))),
        }
    }
}

/// The edge that triggers the pin's value attribute to signal pollers.
///
/// The trigger is only configured, it is never waited upon.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Edge {
    /// No edge triggers.
    #[default]
    None,

    /// Transitions from inactive to active trigger.
    Rising,

    /// Transitions from active to inactive trigger.
    Falling,

    /// All transitions trigger.
    Both,
}

impl Edge {
    /// The string written to, and read from, the edge attribute.
    pub fn as_str(&self) -> &'static str {
        match self {
            Edge::None => "none",
            Edge::Rising => "rising",
            Edge::Falling => "falling",
            Edge::Both => "both",
        }
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Edge {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "none" => Ok(Edge::None),
            "rising" => Ok(Edge::Rising),
            "falling" => Ok(Edge::Falling),
            "both" => Ok(Edge::Both),
            _ => Err(Error::InvalidArgument(format!(
                "unknown edge '{s}', expected 'none', 'rising', 'falling' or 'both'"
            ))),
        }
    }
}

/// The logical value of a pin.
///
/// sysfs reports `0` for inactive and `1` for active.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Value {
    /// The pin is inactive.
    #[default]
    Inactive,
    /// The pin is active.
    Active,
}

impl Value {
    /// The value opposite the current value.
    pub fn not(&self) -> Value {
        match self {
            Value::Active => Value::Inactive,
            Value::Inactive => Value::Active,
        }
    }

    /// The digit written to, and read from, the value attribute.
    pub fn as_str(&self) -> &'static str {
        match self {
            Value::Inactive => "0",
            Value::Active => "1",
        }
    }

    // the direction attribute form that sets an output to this value
    pub(crate) fn as_level_str(&self) -> &'static str {
        match self {
            Value::Inactive => "low",
            Value::Active => "high",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Value::Active => "active",
            Value::Inactive => "inactive",
        };
        write!(f, "{}", s)
    }
}

impl From<Value> for bool {
    fn from(l: Value) -> bool {
        match l {
            Value::Inactive => false,
            Value::Active => true,
        }
    }
}
impl From<Value> for u8 {
    fn from(l: Value) -> u8 {
        match l {
            Value::Inactive => 0,
            Value::Active => 1,
        }
    }
}
impl From<bool> for Value {
    fn from(b: bool) -> Value {
        match b {
            false => Value::Inactive,
            true => Value::Active,
        }
    }
}

impl TryFrom<u8> for Value {
    type Error = Error;

    /// Only 0 and 1 are valid pin values.
    fn try_from(i: u8) -> Result<Value> {
        match i {
            0 => Ok(Value::Inactive),
            1 => Ok(Value::Active),
            _ => Err(Error::InvalidArgument(format!(
                "invalid value {i}, expected 0 or 1"
            ))),
        }
    }
}

impl FromStr for Value {
    type Err = Error;

    /// Parses the content of a value attribute, so only "0" and "1".
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "0" => Ok(Value::Inactive),
            "1" => Ok(Value::Active),
            _ => Err(Error::InvalidArgument(format!(
                "invalid value '{s}', expected '0' or '1'"
            ))),
        }
    }
}
