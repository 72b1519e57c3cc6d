// SPDX-FileCopyrightText: 2023 Kent Gibson <warthog618@gmail.com>
//
// SPDX-License-Identifier: Apache-2.0 OR MIT

use super::common::EmitOpts;
use clap::Parser;
use gpiosysfs::Sysfs;
#[cfg(feature = "serde")]
use serde_derive::Serialize;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(aliases(["p"]))]
pub struct Opts {
    #[command(flatten)]
    emit: EmitOpts,
}

pub fn cmd(sysfs: &Sysfs, opts: &Opts) -> bool {
    let kernel = fs::read_to_string("/proc/version")
        .ok()
        .and_then(|v| kernel_release(&v).map(String::from));
    let info = platform_info(sysfs, kernel);
    emit_info(opts, &info);
    info.support == Support::Available
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
enum Support {
    Available,
    NoGpioClass,
    NoExport,
}

#[derive(Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
struct PlatformInfo {
    kernel: Option<String>,
    root: PathBuf,
    support: Support,
    // only populated if the interface is available
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    chips: Option<usize>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pins: Option<u64>,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    error: Option<String>,
}

fn platform_info(sysfs: &Sysfs, kernel: Option<String>) -> PlatformInfo {
    let root = sysfs.root();
    let mut info = PlatformInfo {
        kernel,
        root: root.to_path_buf(),
        support: Support::Available,
        chips: None,
        pins: None,
        error: None,
    };
    if !root.is_dir() {
        info.support = Support::NoGpioClass;
    } else if !root.join("export").exists() {
        info.support = Support::NoExport;
    } else {
        match sysfs.chips() {
            Ok(chips) => {
                info.chips = Some(chips.len());
                info.pins = Some(chips.iter().map(|c| u64::from(c.ngpio)).sum());
            }
            Err(e) => info.error = Some(e.to_string()),
        }
    }
    info
}

fn emit_info(opts: &Opts, info: &PlatformInfo) {
    #[cfg(feature = "json")]
    if opts.emit.json {
        match serde_json::to_string(info) {
            Ok(s) => println!("{}", s),
            Err(e) => eprintln!("{}", e),
        }
        return;
    }
    for line in format_info(info, opts.emit.verbose) {
        println!("{}", line);
    }
}

fn format_info(info: &PlatformInfo, verbose: bool) -> Vec<String> {
    let mut lines = Vec::new();
    match &info.kernel {
        Some(v) => lines.push(format!("Kernel {}", v)),
        None => lines.push("Kernel unknown".to_string()),
    }
    let root = info.root.display();
    match info.support {
        Support::NoGpioClass => {
            lines.push(format!(
                "{} not found - kernel built without CONFIG_GPIO_SYSFS?",
                root
            ));
            return lines;
        }
        Support::NoExport => {
            lines.push(format!("{} has no export attribute.", root));
            return lines;
        }
        Support::Available => {
            lines.push(format!("GPIO sysfs interface is available at {}.", root))
        }
    }
    match (info.chips, info.pins, &info.error) {
        (_, _, Some(e)) => lines.push(e.clone()),
        (Some(0), _, _) => lines.push("No available gpiochips".to_string()),
        (Some(chips), Some(pins), _) => {
            lines.push(format!("{} gpiochips providing {} pins.", chips, pins))
        }
        _ => {}
    }
    if verbose {
        if let Some((major, minor)) = info.kernel.as_deref().and_then(parse_version) {
            if is_deprecated(major, minor) {
                lines.push(
                    "GPIO sysfs interface is deprecated in favour of the GPIO character device."
                        .to_string(),
                );
            }
        }
    }
    lines
}

fn is_deprecated(major: u32, minor: u32) -> bool {
    major > 4 || (major == 4 && minor >= 8)
}

fn kernel_release(proc_version: &str) -> Option<&str> {
    proc_version.split_ascii_whitespace().nth(2)
}

fn parse_version(version: &str) -> Option<(u32, u32)> {
    let mut f = version.split('.');
    let major = f.next()?.parse().ok()?;
    let minor = f
        .next()?
        .split(|c: char| !c.is_ascii_digit())
        .next()?
        .parse()
        .ok()?;
    Some((major, minor))
}
