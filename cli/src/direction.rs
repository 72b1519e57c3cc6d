// SPDX-FileCopyrightText: 2021 Kent Gibson <warthog618@gmail.com>
//
// SPDX-License-Identifier: Apache-2.0 OR MIT

use super::common::{emit_error, DirectionFlags, EmitOpts};
use anyhow::{Context, Result};
use clap::Parser;
use gpiosysfs::{Direction, PinNumber, Sysfs};

#[derive(Debug, Parser)]
#[command(alias("d"))]
pub struct Opts {
    /// The pin to get or set
    #[arg(value_name = "pin")]
    pin: PinNumber,

    /// The direction to set
    ///
    /// If not specified then the current direction is reported.
    ///
    /// The high and low directions set the pin to an output with the
    /// corresponding value, without glitching.
    #[arg(value_name = "direction", value_enum, ignore_case = true)]
    direction: Option<DirectionFlags>,

    #[command(flatten)]
    emit: EmitOpts,
}

pub fn cmd(sysfs: &Sysfs, opts: &Opts) -> bool {
    let res = match opts.direction {
        Some(flags) => set_direction(sysfs, opts.pin, flags),
        None => sysfs
            .direction(opts.pin)
            .with_context(|| format!("failed to read direction of pin {}", opts.pin))
            .map(|d| emit_direction(opts, d)),
    };
    match res {
        Ok(()) => true,
        Err(e) => {
            emit_error(&opts.emit, &e);
            false
        }
    }
}

fn set_direction(sysfs: &Sysfs, pin: PinNumber, flags: DirectionFlags) -> Result<()> {
    let res = match flags.split() {
        (Direction::Output, Some(value)) => sysfs.set_output(pin, value),
        (direction, _) => sysfs.set_direction(pin, direction),
    };
    res.with_context(|| format!("failed to set direction of pin {pin}"))
}

fn emit_direction(opts: &Opts, direction: Direction) {
    #[cfg(feature = "json")]
    if opts.emit.json {
        println!(
            "{{\"pin\":{},\"direction\":\"{}\"}}",
            opts.pin,
            direction.as_str()
        );
        return;
    }
    println!("{}", direction);
}

#[cfg(test)]
mod tests {
    use super::*;
    use gpiosysfs_sim::{builder, Chip, Level, Sim};

    fn opts(args: &[&str]) -> Opts {
        let mut argv = vec!["direction"];
        argv.extend_from_slice(args);
        match crate::parse_command(&argv).unwrap() {
            crate::Command::Direction(opts) => opts,
            _ => unreachable!(),
        }
    }

    fn sim() -> Sim {
        builder()
            .with_chip(Chip::new(0, 32, "direction"))
            .with_exported(17)
            .live()
            .unwrap()
    }

    #[test]
    fn parse() {
        let o = opts(&["17"]);
        assert_eq!(o.pin, 17);
        assert!(o.direction.is_none());
        assert_eq!(opts(&["17", "OUT"]).direction, Some(DirectionFlags::Out));
        assert!(crate::parse_command(&["direction", "17", "sideways"]).is_err());
    }

    #[test]
    fn get() {
        let sim = sim();
        let sysfs = Sysfs::with_root(sim.root());

        assert!(cmd(&sysfs, &opts(&["17"])));
    }

    #[test]
    fn set() {
        let sim = sim();
        let sysfs = Sysfs::with_root(sim.root());

        assert!(cmd(&sysfs, &opts(&["17", "out"])));
        assert_eq!(sim.direction(17).unwrap(), "out");
        assert!(cmd(&sysfs, &opts(&["17", "in"])));
        assert_eq!(sim.direction(17).unwrap(), "in");
    }

    #[test]
    fn set_level() {
        let sim = sim();
        let sysfs = Sysfs::with_root(sim.root());

        assert!(cmd(&sysfs, &opts(&["17", "high"])));
        assert_eq!(sim.direction(17).unwrap(), "out");
        assert_eq!(sim.level(17).unwrap(), Level::High);
        assert!(cmd(&sysfs, &opts(&["17", "low"])));
        assert_eq!(sim.level(17).unwrap(), Level::Low);
    }

    #[test]
    fn unexported() {
        let sim = sim();
        let sysfs = Sysfs::with_root(sim.root());

        assert!(!cmd(&sysfs, &opts(&["5"])));
        assert!(!cmd(&sysfs, &opts(&["5", "out"])));
    }
}
