// SPDX-FileCopyrightText: 2021 Kent Gibson <warthog618@gmail.com>
//
// SPDX-License-Identifier: Apache-2.0 OR MIT

use clap::{Parser, ValueEnum};
use gpiosysfs::{Direction, Edge, PinNumber, Value};
use std::str::FromStr;

// common command line parser options

#[derive(Clone, Copy, Debug, Default, Parser)]
pub struct EmitOpts {
    #[arg(from_global)]
    pub verbose: bool,

    /// Emit output in JSON format
    #[cfg(feature = "json")]
    #[arg(long)]
    pub json: bool,
}

pub fn emit_error(opts: &EmitOpts, e: &anyhow::Error) {
    let e_str = format_error(opts, e);
    #[cfg(feature = "json")]
    if opts.json {
        println!("{{\"error\":{:?}}}", e_str);
        return;
    }
    eprintln!("{e_str}");
}

pub fn format_error(opts: &EmitOpts, e: &anyhow::Error) -> String {
    if opts.verbose {
        format!("{e:#}")
    } else {
        format!("{e}")
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum DirectionFlags {
    /// An input
    In,
    /// An output, retaining the current value
    Out,
    /// An output, initially high
    High,
    /// An output, initially low
    Low,
}

impl DirectionFlags {
    /// The direction and, for outputs with a level, the initial value.
    pub fn split(self) -> (Direction, Option<Value>) {
        match self {
            DirectionFlags::In => (Direction::Input, None),
            DirectionFlags::Out => (Direction::Output, None),
            DirectionFlags::High => (Direction::Output, Some(Value::Active)),
            DirectionFlags::Low => (Direction::Output, Some(Value::Inactive)),
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum EdgeFlags {
    None,
    Rising,
    Falling,
    Both,
}

impl From<EdgeFlags> for Edge {
    fn from(e: EdgeFlags) -> Self {
        match e {
            EdgeFlags::None => Edge::None,
            EdgeFlags::Rising => Edge::Rising,
            EdgeFlags::Falling => Edge::Falling,
            EdgeFlags::Both => Edge::Both,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct PinValue(pub Value);

impl FromStr for PinValue {
    type Err = InvalidPinValue;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let lower_s = s.to_lowercase();
        let v = match lower_s.as_str() {
            "0" | "inactive" | "off" | "false" => Value::Inactive,
            "1" | "active" | "on" | "true" => Value::Active,
            _ => {
                return Err(InvalidPinValue(s.into()));
            }
        };
        Ok(PinValue(v))
    }
}

#[derive(Debug, Eq, PartialEq, thiserror::Error)]
#[error("invalid pin value: '{0}'")]
pub struct InvalidPinValue(String);

/// Parse a `pin=value` pair.
pub fn parse_pin_value(s: &str) -> Result<(PinNumber, Value), Error> {
    let pos = s.find('=').ok_or_else(|| Error::NoEquals(s.into()))?;
    let pin = s[..pos]
        .parse::<PinNumber>()
        .map_err(|_| Error::InvalidPin(s[..pos].into()))?;
    let value = s[pos + 1..].parse::<PinValue>()?;
    Ok((pin, value.0))
}

/// Errors returned by cli functions.
#[derive(Debug, thiserror::Error, Eq, PartialEq)]
pub enum Error {
    #[error("invalid pin=value: no '=' found in '{0}'")]
    NoEquals(String),

    #[error("invalid pin number: '{0}'")]
    InvalidPin(String),

    #[error(transparent)]
    InvalidValue(#[from] InvalidPinValue),

    #[error("pin {0} is repeated")]
    RepeatedPin(PinNumber),
}

/// Check that no pin is listed more than once.
pub fn check_unique(pins: &[PinNumber]) -> Result<(), Error> {
    for (idx, pin) in pins.iter().enumerate() {
        if pins[..idx].contains(pin) {
            return Err(Error::RepeatedPin(*pin));
        }
    }
    Ok(())
}
