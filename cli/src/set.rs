// SPDX-FileCopyrightText: 2021 Kent Gibson <warthog618@gmail.com>
//
// SPDX-License-Identifier: Apache-2.0 OR MIT

use super::common::{self, emit_error, EmitOpts};
use anyhow::Context;
use clap::Parser;
use gpiosysfs::{PinNumber, Sysfs, Value};
use std::thread;
use std::time::Duration;

#[derive(Debug, Parser)]
#[command(alias("s"))]
pub struct Opts {
    /// The pin values to set
    ///
    /// The values are specified in pin=value format, where the pin is
    /// the pin number and the value is one of:
    ///     0, inactive, off, false, 1, active, on, or true
    /// e.g.
    ///     17=1 22=off
    #[arg(value_name = "pin=value", required = true, value_parser = common::parse_pin_value, verbatim_doc_comment)]
    pin_values: Vec<(PinNumber, Value)>,

    /// Switch the pins to outputs at the given values
    ///
    /// If not specified then the pins must already be outputs.
    #[arg(short = 'o', long)]
    as_output: bool,

    /// The minimum time period to hold pins at the requested values
    /// before returning.
    ///
    /// The period is taken as milliseconds unless otherwise specified.
    #[arg(short = 'p', long, value_name = "period", value_parser = parse_duration)]
    hold_period: Option<Duration>,

    #[command(flatten)]
    emit: EmitOpts,
}

pub fn cmd(sysfs: &Sysfs, opts: &Opts) -> bool {
    let pins: Vec<PinNumber> = opts.pin_values.iter().map(|pv| pv.0).collect();
    if let Err(e) = common::check_unique(&pins) {
        emit_error(&opts.emit, &e.into());
        return false;
    }
    let mut success = true;
    for &(pin, value) in &opts.pin_values {
        let res = if opts.as_output {
            sysfs.set_output(pin, value)
        } else {
            sysfs.write(pin, value)
        };
        if let Err(e) = res.with_context(|| format!("failed to set pin {pin} to {value}")) {
            emit_error(&opts.emit, &e);
            success = false;
        }
    }
    if let Some(period) = opts.hold_period {
        thread::sleep(period);
    }
    success
}

#[derive(Debug, Eq, PartialEq, thiserror::Error)]
pub enum ParseDurationError {
    #[error("'{0}' unknown units - use 's', 'ms' or 'us'.")]
    Units(String),
    #[error("'{0}' must start with a digit")]
    NoDigits(String),
    #[error("'{0}' {1}")]
    ParseDigits(String, std::num::ParseIntError),
    #[error("'{0}' is too large")]
    Overflow(String),
}

pub fn parse_duration(s: &str) -> std::result::Result<Duration, ParseDurationError> {
    if s == "0" {
        return Ok(Duration::ZERO);
    }
    let t = match s.find(|c: char| !c.is_ascii_digit()) {
        Some(0) => return Err(ParseDurationError::NoDigits(s.into())),
        Some(n) => {
            let (num, units) = s.split_at(n);
            let t = num
                .parse::<u64>()
                .map_err(|e| ParseDurationError::ParseDigits(num.into(), e))?;
            let scale = match units {
                "us" => 1000,
                "ms" => 1000000,
                "s" => 1000000000,
                _ => return Err(ParseDurationError::Units(s.into())),
            };
            t.checked_mul(scale)
        }
        None => s
            .parse::<u64>()
            .map_err(|e| ParseDurationError::ParseDigits(s.into(), e))?
            .checked_mul(1000000),
    };
    t.map(Duration::from_nanos)
        .ok_or_else(|| ParseDurationError::Overflow(s.into()))
}
