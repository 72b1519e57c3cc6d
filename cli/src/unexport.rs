// SPDX-FileCopyrightText: 2021 Kent Gibson <warthog618@gmail.com>
//
// SPDX-License-Identifier: Apache-2.0 OR MIT

use super::common::{self, emit_error, EmitOpts};
use anyhow::Context;
use clap::Parser;
use gpiosysfs::{PinNumber, Sysfs};

#[derive(Debug, Parser)]
#[command(alias("u"))]
pub struct Opts {
    /// The pins to unexport
    ///
    /// If none are specified then all exported pins are unexported.
    #[arg(value_name = "pin")]
    pins: Vec<PinNumber>,

    #[command(flatten)]
    emit: EmitOpts,
}

pub fn cmd(sysfs: &Sysfs, opts: &Opts) -> bool {
    if let Err(e) = common::check_unique(&opts.pins) {
        emit_error(&opts.emit, &e.into());
        return false;
    }
    let pins = if opts.pins.is_empty() {
        match sysfs
            .exported_pins()
            .context("unable to find exported pins")
        {
            Ok(pins) => pins,
            Err(e) => {
                emit_error(&opts.emit, &e);
                return false;
            }
        }
    } else {
        opts.pins.clone()
    };
    let mut success = true;
    for pin in pins {
        if let Err(e) = sysfs
            .unexport(pin)
            .with_context(|| format!("failed to unexport pin {pin}"))
        {
            emit_error(&opts.emit, &e);
            success = false;
        }
    }
    success
}
