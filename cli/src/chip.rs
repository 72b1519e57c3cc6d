// SPDX-FileCopyrightText: 2021 Kent Gibson <warthog618@gmail.com>
//
// SPDX-License-Identifier: MIT

use super::common::{emit_error, EmitOpts};
use anyhow::{anyhow, Context, Result};
use clap::Parser;
use gpiosysfs::{ChipInfo, PinNumber, Sysfs};

#[derive(Debug, Parser)]
#[command(aliases(["c", "detect"]))]
pub struct Opts {
    /// Only report the chip providing this pin
    #[arg(short, long, value_name = "pin")]
    pin: Option<PinNumber>,

    #[command(flatten)]
    emit: EmitOpts,
}

pub fn cmd(sysfs: &Sysfs, opts: &Opts) -> bool {
    match find_chips(sysfs, opts) {
        Ok(chips) => {
            emit_chips(opts, &chips);
            true
        }
        Err(e) => {
            emit_error(&opts.emit, &e);
            false
        }
    }
}

fn find_chips(sysfs: &Sysfs, opts: &Opts) -> Result<Vec<ChipInfo>> {
    let chips = sysfs.chips().context("unable to find any chips")?;
    match opts.pin {
        None => Ok(chips),
        Some(pin) => chips
            .into_iter()
            .find(|c| c.contains(pin))
            .map(|c| vec![c])
            .ok_or_else(|| anyhow!("no chip provides pin {pin}")),
    }
}

fn format_chip(c: &ChipInfo) -> String {
    let pins = c.pins();
    if pins.is_empty() {
        return format!("{} [{}] (0 lines)", c.name, c.label);
    }
    format!(
        "{} [{}] ({} lines, pins {}-{})",
        c.name,
        c.label,
        c.ngpio,
        pins.start,
        pins.end - 1
    )
}

fn emit_chips(opts: &Opts, chips: &[ChipInfo]) {
    #[cfg(feature = "json")]
    if opts.emit.json {
        match serde_json::to_string(chips) {
            Ok(s) => println!("{}", s),
            Err(e) => eprintln!("{}", e),
        }
        return;
    }
    for c in chips {
        println!("{}", format_chip(c));
    }
}
