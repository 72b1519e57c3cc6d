// SPDX-FileCopyrightText: 2021 Kent Gibson <warthog618@gmail.com>
//
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A command line tool for accessing GPIO pins via sysfs.

use clap::Parser;
use gpiosysfs::Sysfs;
use std::path::PathBuf;
use std::process::ExitCode;

mod chip;
mod common;
mod direction;
mod edge;
mod export;
mod get;
mod list;
mod platform;
mod set;
mod unexport;

fn main() -> ExitCode {
    match Opts::try_parse() {
        Ok(opt) => {
            init_logger(opt.verbose);
            let sysfs = Sysfs::with_root(&opt.root);
            let res = match opt.cmd {
                Command::Chip(cfg) => chip::cmd(&sysfs, &cfg),
                Command::Direction(cfg) => direction::cmd(&sysfs, &cfg),
                Command::Edge(cfg) => edge::cmd(&sysfs, &cfg),
                Command::Export(cfg) => export::cmd(&sysfs, &cfg),
                Command::Get(cfg) => get::cmd(&sysfs, &cfg),
                Command::List(cfg) => list::cmd(&sysfs, &cfg),
                Command::Platform(cfg) => platform::cmd(&sysfs, &cfg),
                Command::Set(cfg) => set::cmd(&sysfs, &cfg),
                Command::Unexport(cfg) => unexport::cmd(&sysfs, &cfg),
            };
            return if res {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            };
        }
        Err(e) => eprintln!("{e}"),
    }
    ExitCode::FAILURE
}

fn init_logger(verbose: bool) {
    let mut bld =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if verbose {
        bld.filter_level(log::LevelFilter::Debug);
    }
    bld.init();
}

#[derive(Parser)]
#[command(
    name = "gpiosysfs",
    about = "A utility to control GPIO pins on Linux using the sysfs GPIO interface.",
    version,
    propagate_version = true
)]
struct Opts {
    /// Provide more detailed error messages and log each attribute access.
    #[arg(short = 'v', long, global = true, display_order = 800)]
    pub verbose: bool,

    /// The root of the sysfs GPIO tree.
    #[arg(
        long,
        value_name = "path",
        env = "GPIOSYSFS_ROOT",
        default_value = gpiosysfs::SYSFS_GPIO_PATH,
        global = true,
        display_order = 801
    )]
    pub root: PathBuf,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Parser)]
enum Command {
    /// Get information about GPIO chips.
    Chip(chip::Opts),

    /// Get or set the direction of a GPIO pin.
    Direction(direction::Opts),

    /// Get or set the edge trigger of a GPIO pin.
    Edge(edge::Opts),

    /// Export GPIO pins.
    Export(export::Opts),

    /// Read the values of GPIO pins.
    Get(get::Opts),

    /// List the exported GPIO pins and their attributes.
    List(list::Opts),

    /// Get information about the platform sysfs GPIO support.
    Platform(platform::Opts),

    /// Set the values of GPIO pins.
    Set(set::Opts),

    /// Unexport GPIO pins.
    Unexport(unexport::Opts),
}

// Parse the command from args, excluding the program name.
#[cfg(test)]
fn parse_command(args: &[&str]) -> Result<Command, clap::Error> {
    let mut argv = vec!["gpiosysfs"];
    argv.extend_from_slice(args);
    Opts::try_parse_from(argv).map(|opts| opts.cmd)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Opts::command().debug_assert();
    }

    #[test]
    fn default_root() {
        let opts = Opts::try_parse_from(["gpiosysfs", "list"]).unwrap();
        if std::env::var_os("GPIOSYSFS_ROOT").is_none() {
            assert_eq!(opts.root, PathBuf::from("/sys/class/gpio"));
        }
        assert!(!opts.verbose);
    }

    #[test]
    fn root_option() {
        let opts = Opts::try_parse_from(["gpiosysfs", "get", "--root", "/tmp/gpio", "17"]).unwrap();
        assert_eq!(opts.root, PathBuf::from("/tmp/gpio"));
    }
}
