// SPDX-FileCopyrightText: 2021 Kent Gibson <warthog618@gmail.com>
//
// SPDX-License-Identifier: Apache-2.0 OR MIT

use super::common::{self, format_error, EmitOpts};
use anyhow::anyhow;
use clap::Parser;
use gpiosysfs::{PinNumber, Sysfs, Value};
#[cfg(feature = "serde")]
use serde_derive::Serialize;

#[derive(Debug, Parser)]
#[command(alias("g"))]
pub struct Opts {
    /// The pins to get
    #[arg(value_name = "pin", required = true)]
    pins: Vec<PinNumber>,

    /// Switch the pins to inputs before reading
    ///
    /// If not specified then the direction is left as-is, making it
    /// possible to read back the values of output pins.
    #[arg(short = 'i', long)]
    as_input: bool,

    /// Display pin values as '0' (inactive) or '1' (active)
    #[arg(long)]
    pub numeric: bool,

    #[command(flatten)]
    emit: EmitOpts,
}

pub fn cmd(sysfs: &Sysfs, opts: &Opts) -> bool {
    let res = do_cmd(sysfs, opts);
    res.emit(opts);
    res.errors.is_empty()
}

fn do_cmd(sysfs: &Sysfs, opts: &Opts) -> CmdResult {
    let mut res = CmdResult::default();
    if let Err(e) = common::check_unique(&opts.pins) {
        res.push_error(&opts.emit, &e.into());
        return res;
    }
    for &pin in &opts.pins {
        if opts.as_input {
            if let Err(e) = sysfs.set_direction(pin, gpiosysfs::Direction::Input) {
                res.push_error(
                    &opts.emit,
                    &anyhow!(e).context(format!("failed to set pin {pin} to input")),
                );
                continue;
            }
        }
        match sysfs.read(pin) {
            Ok(value) => res.values.push(PinValue { pin, value }),
            Err(e) => res.push_error(
                &opts.emit,
                &anyhow!(e).context(format!("failed to read value of pin {pin}")),
            ),
        }
    }
    res
}

#[derive(Default)]
#[cfg_attr(feature = "serde", derive(Serialize))]
struct CmdResult {
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Vec::is_empty"))]
    values: Vec<PinValue>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Vec::is_empty"))]
    errors: Vec<String>,
}

impl CmdResult {
    fn emit(&self, opts: &Opts) {
        #[cfg(feature = "json")]
        if opts.emit.json {
            match serde_json::to_string(self) {
                Ok(s) => println!("{}", s),
                Err(e) => eprintln!("{}", e),
            }
            return;
        }
        self.print(opts);
    }

    fn push_error(&mut self, opts: &EmitOpts, e: &anyhow::Error) {
        self.errors.push(format_error(opts, e))
    }

    fn format_values(&self, numeric: bool) -> String {
        self.values
            .iter()
            .map(|pv| {
                if numeric {
                    pv.value.as_str().to_string()
                } else {
                    format!("{}={}", pv.pin, pv.value)
                }
            })
            .collect::<Vec<String>>()
            .join(" ")
    }

    fn print(&self, opts: &Opts) {
        if !self.values.is_empty() {
            println!("{}", self.format_values(opts.numeric));
        }
        for e in &self.errors {
            eprintln!("{}", e);
        }
    }
}

struct PinValue {
    pin: PinNumber,
    value: Value,
}

#[cfg(feature = "serde")]
impl serde::Serialize for PinValue {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        use serde::ser::SerializeMap;
        let mut s = serializer.serialize_map(Some(1))?;
        s.serialize_entry(&self.pin.to_string(), &self.value)?;
        s.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gpiosysfs_sim::{builder, Chip, Level, Sim};

    fn opts(args: &[&str]) -> Opts {
        let mut argv = vec!["get"];
        argv.extend_from_slice(args);
        match crate::parse_command(&argv).unwrap() {
            crate::Command::Get(opts) => opts,
            _ => unreachable!(),
        }
    }

    fn sim() -> Sim {
        builder()
            .with_chip(Chip::new(0, 32, "get"))
            .with_exported(3)
            .with_exported(17)
            .live()
            .unwrap()
    }

    #[test]
    fn values() {
        let sim = sim();
        let sysfs = Sysfs::with_root(sim.root());
        sim.set_level(17, Level::High).unwrap();

        let o = opts(&["17", "3"]);
        let res = do_cmd(&sysfs, &o);
        assert!(res.errors.is_empty());
        assert_eq!(res.format_values(false), "17=active 3=inactive");
        assert_eq!(res.format_values(true), "1 0");
        assert!(cmd(&sysfs, &o));
    }

    #[test]
    fn unexported() {
        let sim = sim();
        let sysfs = Sysfs::with_root(sim.root());

        let res = do_cmd(&sysfs, &opts(&["3", "5"]));
        assert_eq!(res.values.len(), 1);
        assert_eq!(res.errors.len(), 1);
        assert!(res.errors[0].contains("pin 5"));
        assert!(!cmd(&sysfs, &opts(&["5"])));
    }

    #[test]
    fn as_input() {
        let sim = sim();
        let sysfs = Sysfs::with_root(sim.root());
        sim.set_raw_attr(3, "direction", "out\n").unwrap();

        assert!(cmd(&sysfs, &opts(&["--as-input", "3"])));
        assert_eq!(sim.direction(3).unwrap(), "in");
    }

    #[test]
    fn repeated_pin() {
        let sim = sim();
        let sysfs = Sysfs::with_root(sim.root());

        let res = do_cmd(&sysfs, &opts(&["3", "3"]));
        assert!(res.values.is_empty());
        assert_eq!(res.errors, vec!["pin 3 is repeated".to_string()]);
    }

    #[cfg(feature = "json")]
    #[test]
    fn json() {
        let sim = sim();
        let sysfs = Sysfs::with_root(sim.root());
        sim.set_level(17, Level::High).unwrap();

        let res = do_cmd(&sysfs, &opts(&["17"]));
        assert_eq!(
            serde_json::to_string(&res).unwrap(),
            "{\"values\":[{\"17\":\"Active\"}]}"
        );
    }
}
