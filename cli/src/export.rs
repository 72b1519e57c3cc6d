// SPDX-FileCopyrightText: 2021 Kent Gibson <warthog618@gmail.com>
//
// SPDX-License-Identifier: Apache-2.0 OR MIT

use super::common::{self, emit_error, EmitOpts};
use anyhow::Context;
use clap::Parser;
use gpiosysfs::{PinNumber, Sysfs};

#[derive(Debug, Parser)]
#[command(alias("x"))]
pub struct Opts {
    /// The pins to export
    #[arg(value_name = "pin", required = true)]
    pins: Vec<PinNumber>,

    /// Skip pins that are already exported rather than reporting an error
    #[arg(short, long)]
    skip_exported: bool,

    #[command(flatten)]
    emit: EmitOpts,
}

pub fn cmd(sysfs: &Sysfs, opts: &Opts) -> bool {
    if let Err(e) = common::check_unique(&opts.pins) {
        emit_error(&opts.emit, &e.into());
        return false;
    }
    let mut success = true;
    for &pin in &opts.pins {
        if opts.skip_exported && sysfs.is_exported(pin) {
            continue;
        }
        if let Err(e) = sysfs
            .export(pin)
            .with_context(|| format!("failed to export pin {pin}"))
        {
            emit_error(&opts.emit, &e);
            success = false;
        }
    }
    success
}
