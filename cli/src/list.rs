// SPDX-FileCopyrightText: 2021 Kent Gibson <warthog618@gmail.com>
//
// SPDX-License-Identifier: Apache-2.0 OR MIT

use super::common::{emit_error, EmitOpts};
use anyhow::{anyhow, Context};
use clap::Parser;
use gpiosysfs::{Direction, Edge, PinNumber, Sysfs, Value};
#[cfg(feature = "serde")]
use serde_derive::Serialize;

#[derive(Debug, Parser)]
#[command(aliases(["l", "ls", "exported"]))]
pub struct Opts {
    #[command(flatten)]
    emit: EmitOpts,
}

pub fn cmd(sysfs: &Sysfs, opts: &Opts) -> bool {
    let pins = match sysfs
        .exported_pins()
        .context("unable to find exported pins")
    {
        Ok(pins) => pins,
        Err(e) => {
            emit_error(&opts.emit, &e);
            return false;
        }
    };
    let mut success = true;
    let mut infos = Vec::new();
    for pin in pins {
        match pin_info(sysfs, pin) {
            Ok(info) => infos.push(info),
            Err(e) => {
                emit_error(&opts.emit, &e);
                success = false;
            }
        }
    }
    emit_infos(opts, &infos);
    success
}

#[derive(Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
struct PinInfo {
    pin: PinNumber,
    direction: Direction,
    value: Value,
    // absent for pins that do not support edge triggers
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    edge: Option<Edge>,
}

fn pin_info(sysfs: &Sysfs, pin: PinNumber) -> anyhow::Result<PinInfo> {
    let ctx = || format!("unable to read attributes of pin {pin}");
    let direction = sysfs.direction(pin).with_context(ctx)?;
    let value = sysfs.read(pin).with_context(ctx)?;
    let edge = match sysfs.edge(pin) {
        Ok(edge) => Some(edge),
        Err(e) if e.io_kind() == Some(std::io::ErrorKind::NotFound) => None,
        Err(e) => return Err(anyhow!(e).context(ctx())),
    };
    Ok(PinInfo {
        pin,
        direction,
        value,
        edge,
    })
}

fn format_info(info: &PinInfo) -> String {
    let mut s = format!(
        "gpio{}\t{}\t{}",
        info.pin,
        info.direction,
        u8::from(info.value)
    );
    if let Some(edge) = info.edge {
        s += &format!("\tedge={}", edge);
    }
    s
}

fn emit_infos(opts: &Opts, infos: &[PinInfo]) {
    #[cfg(feature = "json")]
    if opts.emit.json {
        match serde_json::to_string(infos) {
            Ok(s) => println!("{}", s),
            Err(e) => eprintln!("{}", e),
        }
        return;
    }
    for info in infos {
        println!("{}", format_info(info));
    }
}
