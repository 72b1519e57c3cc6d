// SPDX-FileCopyrightText: 2021 Kent Gibson <warthog618@gmail.com>
//
// SPDX-License-Identifier: Apache-2.0 OR MIT

use super::common::{emit_error, EdgeFlags, EmitOpts};
use anyhow::Context;
use clap::Parser;
use gpiosysfs::{Edge, PinNumber, Sysfs};

#[derive(Debug, Parser)]
#[command(alias("e"))]
pub struct Opts {
    /// The pin to get or set
    #[arg(value_name = "pin")]
    pin: PinNumber,

    /// The edge trigger to set
    ///
    /// If not specified then the current edge trigger is reported.
    #[arg(value_name = "edge", value_enum, ignore_case = true)]
    edge: Option<EdgeFlags>,

    #[command(flatten)]
    emit: EmitOpts,
}

pub fn cmd(sysfs: &Sysfs, opts: &Opts) -> bool {
    let res = match opts.edge {
        Some(edge) => sysfs
            .set_edge(opts.pin, edge.into())
            .with_context(|| format!("failed to set edge of pin {}", opts.pin)),
        None => sysfs
            .edge(opts.pin)
            .with_context(|| format!("failed to read edge of pin {}", opts.pin))
            .map(|e| emit_edge(opts, e)),
    };
    match res {
        Ok(()) => true,
        Err(e) => {
            emit_error(&opts.emit, &e);
            false
        }
    }
}

fn emit_edge(opts: &Opts, edge: Edge) {
    #[cfg(feature = "json")]
    if opts.emit.json {
        println!("{{\"pin\":{},\"edge\":\"{}\"}}", opts.pin, edge.as_str());
        return;
    }
    println!("{}", edge);
}
