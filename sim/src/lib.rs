// SPDX-FileCopyrightText: 2022 Kent Gibson <warthog618@gmail.com>
//
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A library for simulating the Linux sysfs GPIO interface, for testing
//! code that accesses GPIO pins via sysfs.
//!
//! Simulators are built using the [`Builder`], which creates a tree
//! resembling `/sys/class/gpio` in a temporary directory.
//! The tree contains the `export` and `unexport` control files and a
//! `gpiochip<base>` directory for each simulated chip.
//!
//! The tree is a plain directory, so writes to the control files do not
//! take effect immediately.  [`Sim::sync`] applies them the way the kernel
//! would, exporting and unexporting pins and resolving `high` and `low`
//! direction writes.  The accessors on [`Sim`] sync before inspecting the tree.
//!
//! Each write to a control file replaces the previous content, so only the
//! most recent export and unexport survive until the next sync.
//!
//! The tree cannot reject writes the way the kernel does.  Writing the
//! `value` of an input pin succeeds (the kernel returns `EPERM`), and
//! exporting a pin that is already exported is silently ignored by
//! [`Sim::sync`] (the kernel returns `EBUSY`).  Code paths handling those
//! errors must be tested against real hardware.
//!
//! No root permissions are required.
//!
//! [`Builder`]: fn.builder.html

use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process;

#[macro_use]
extern crate global_counter;

/// The number identifying a pin.
pub type PinNumber = u32;

/// A live simulator of a sysfs GPIO tree.
#[derive(Debug, Eq, PartialEq)]
pub struct Sim {
    /// The name of the simulator directory.
    name: String,

    /// The chips being simulated.
    chips: Vec<Chip>,

    /// The root of the simulated tree.
    root: PathBuf,
}

impl Sim {
    /// The chips being simulated.
    pub fn chips(&self) -> &[Chip] {
        self.chips.as_slice()
    }

    /// The name of the simulator directory.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The root of the simulated tree, equivalent to `/sys/class/gpio`.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The path of the directory of an exported pin.
    pub fn pin_path(&self, pin: PinNumber) -> PathBuf {
        self.root.join(format!("gpio{}", pin))
    }

    /// Check if a pin is provided by one of the simulated chips.
    pub fn provides(&self, pin: PinNumber) -> bool {
        self.chips.iter().any(|c| c.contains(pin))
    }

    /// Apply any pending writes to the tree, as the kernel would.
    ///
    /// Pins written to `export` are exported, if provided by a chip and not
    /// already exported, and pins written to `unexport` are unexported.
    /// Requests for pins not provided by a chip are discarded.
    /// Exported pins with a direction of `high` or `low` are switched
    /// to outputs with the corresponding value.
    pub fn sync(&self) -> Result<()> {
        for pin in take_pins(&self.root.join("export"))? {
            if self.provides(pin) && !self.pin_path(pin).exists() {
                self.create_pin(pin)?;
            }
        }
        for pin in take_pins(&self.root.join("unexport"))? {
            let dir = self.pin_path(pin);
            if dir.exists() {
                fs::remove_dir_all(dir)?;
            }
        }
        for pin in self.exported()? {
            let dir = self.pin_path(pin);
            let value = match read_attr(&dir, "direction")?.as_str() {
                "high" => "1",
                "low" => "0",
                _ => continue,
            };
            write_attr(&dir, "direction", "out\n")?;
            write_attr(&dir, "value", format!("{}\n", value))?;
        }
        Ok(())
    }

    /// Export a pin directly, without going through the export control file.
    pub fn export(&self, pin: PinNumber) -> Result<()> {
        if !self.provides(pin) {
            return Err(Error::UnknownPin(pin));
        }
        if !self.pin_path(pin).exists() {
            self.create_pin(pin)?;
        }
        Ok(())
    }

    /// The pins currently exported, in ascending order.
    pub fn exported(&self) -> Result<Vec<PinNumber>> {
        let mut pins: Vec<PinNumber> = fs::read_dir(&self.root)?
            .filter_map(|x| x.ok())
            .filter_map(|de| {
                de.file_name()
                    .to_str()
                    .and_then(|n| n.strip_prefix("gpio"))
                    .and_then(|n| n.parse::<PinNumber>().ok())
            })
            .collect();
        pins.sort_unstable();
        Ok(pins)
    }

    /// Check if a pin is exported.
    pub fn is_exported(&self, pin: PinNumber) -> Result<bool> {
        self.sync()?;
        Ok(self.pin_path(pin).exists())
    }

    /// Get the direction of an exported pin, as reported by sysfs.
    pub fn direction(&self, pin: PinNumber) -> Result<String> {
        self.sync()?;
        read_attr(&self.pin_path(pin), "direction")
    }

    /// Get the edge trigger of an exported pin, as reported by sysfs.
    pub fn edge(&self, pin: PinNumber) -> Result<String> {
        self.sync()?;
        read_attr(&self.pin_path(pin), "edge")
    }

    /// Get the current level of an exported pin.
    pub fn level(&self, pin: PinNumber) -> Result<Level> {
        self.sync()?;
        let val = read_attr(&self.pin_path(pin), "value")?;
        match val.as_str() {
            "0" => Ok(Level::Low),
            "1" => Ok(Level::High),
            _ => Err(Error::UnexpectedValue(val)),
        }
    }

    /// Drive an exported pin to simulate it being externally driven.
    pub fn set_level(&self, pin: PinNumber, level: Level) -> Result<()> {
        self.sync()?;
        let dir = self.pin_path(pin);
        if !dir.exists() {
            return Err(Error::NotExported(pin));
        }
        let value = match level {
            Level::Low => "0\n",
            Level::High => "1\n",
        };
        write_attr(&dir, "value", value)
    }

    /// Overwrite the raw content of an attribute of an exported pin.
    ///
    /// Useful for simulating a misbehaving driver.
    pub fn set_raw_attr(&self, pin: PinNumber, attr: &str, content: &str) -> Result<()> {
        write_attr(&self.pin_path(pin), attr, content)
    }

    /// Remove an attribute of an exported pin.
    ///
    /// Useful for simulating pins that do not support edge triggers.
    pub fn remove_attr(&self, pin: PinNumber, attr: &str) -> Result<()> {
        fs::remove_file(self.pin_path(pin).join(attr)).map_err(Error::IoError)
    }

    fn create_pin(&self, pin: PinNumber) -> Result<()> {
        let dir = self.pin_path(pin);
        fs::create_dir(&dir)?;
        write_attr(&dir, "direction", "in\n")?;
        write_attr(&dir, "value", "0\n")?;
        write_attr(&dir, "edge", "none\n")?;
        Ok(())
    }

    fn live(&mut self) -> Result<()> {
        fs::create_dir_all(&self.root)?;
        write_attr(&self.root, "export", "")?;
        write_attr(&self.root, "unexport", "")?;
        for c in &self.chips {
            let dir = self.root.join(&c.name);
            fs::create_dir(&dir)?;
            write_attr(&dir, "base", format!("{}\n", c.base))?;
            write_attr(&dir, "ngpio", format!("{}\n", c.ngpio))?;
            write_attr(&dir, "label", format!("{}\n", c.label))?;
        }
        Ok(())
    }
}

impl Drop for Sim {
    fn drop(&mut self) {
        _ = fs::remove_dir_all(&self.root);
    }
}

/// A simulated chip.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Chip {
    /// The name of the chip directory, `gpiochip<base>`.
    pub name: String,

    /// The number of the first pin provided by the chip.
    pub base: PinNumber,

    /// The number of pins provided by the chip.
    pub ngpio: u32,

    /// The label of the chip.
    pub label: String,
}

impl Chip {
    /// Basic constructor.
    pub fn new<N: Into<String>>(base: PinNumber, ngpio: u32, label: N) -> Chip {
        Chip {
            name: format!("gpiochip{}", base),
            base,
            ngpio,
            label: label.into(),
        }
    }

    /// Check if the chip provides the pin.
    pub fn contains(&self, pin: PinNumber) -> bool {
        pin >= self.base && pin - self.base < self.ngpio
    }
}

/// Start building a simulator.
pub fn builder() -> Builder {
    Builder::default()
}

/// Build a sim with a single chip providing pins `0..ngpio` and take it live.
///
/// This is sufficient for tests that do not require multiple chips.
///
/// Panics if the sim cannot be taken live.
pub fn simpleton(ngpio: u32) -> Sim {
    builder()
        .with_chip(Chip::new(0, ngpio, "simpleton"))
        .live()
        .unwrap()
}

/// A builder of simulators.
///
/// Collects the configuration for the simulator, and then creates
/// the simulator when taken live.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Builder {
    /// The name for the simulator directory.
    ///
    /// If None when [`live`] is called then a unique name is generated.
    ///
    /// [`live`]: Builder::live
    pub name: Option<String>,

    /// The chips to be simulated.
    pub chips: Vec<Chip>,

    /// The pins exported when the simulator goes live.
    pub exported: Vec<PinNumber>,
}

impl Builder {
    /// Add a chip to the configuration.
    pub fn with_chip(&mut self, chip: Chip) -> &mut Self {
        self.chips.push(chip);
        self
    }

    /// Specify the name for the simulator directory.
    ///
    /// The name must be unique or going live will fail.
    pub fn with_name<N: Into<String>>(&mut self, name: N) -> &mut Self {
        self.name = Some(name.into());
        self
    }

    /// Export a pin when the simulator goes live.
    pub fn with_exported(&mut self, pin: PinNumber) -> &mut Self {
        self.exported.push(pin);
        self
    }

    /// Take the builder config live and return the created simulator.
    ///
    /// If no name has been provided for the builder then one is generated
    /// in the format `<app>-p<pid>-<N>` where:
    ///  - the app name is drawn from `argv[0]` of the executable
    ///  - pid is the process id
    ///  - N is a counter of sims taken live by this process, starting at 0
    pub fn live(&mut self) -> Result<Sim> {
        let name = match &self.name {
            Some(n) => n.clone(),
            None => default_name(),
        };
        let root = env::temp_dir().join(&name);
        if root.exists() {
            return Err(Error::SimulatorExists(name));
        }
        let mut sim = Sim {
            name,
            chips: self.chips.clone(),
            root,
        };
        sim.live()?;
        for pin in &self.exported {
            sim.export(*pin)?;
        }
        Ok(sim)
    }
}

/// The physical level of a pin.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Level {
    /// The pin is physically high.
    High,

    /// The pin is physically low.
    Low,
}

/// Create a unique, but predictable, name for the simulator.
///
/// The name format is `<app>-p<pid>-<N>[-<instance>]`
/// where:
///   - the app name provided by the caller
///   - pid is the process id
///   - N is a counter of the sims created, starting at 0
///   - instance is optionally provided by the caller
pub fn unique_name(app: &str, instance: Option<&str>) -> String {
    global_counter!(SIM_COUNT, u32, 0);

    let mut name = format!("{}-p{}-{}", app, process::id(), SIM_COUNT.inc_cloning());
    if let Some(i) = instance {
        name += "-";
        name += i;
    }
    name
}

// Helper to write simulated attribute files.
fn write_attr<D: AsRef<[u8]>>(p: &Path, file: &str, data: D) -> Result<()> {
    let path = p.join(file);
    fs::write(path, data).map_err(Error::IoError)
}

// Helper to read simulated attribute files.
fn read_attr(p: &Path, file: &str) -> Result<String> {
    let path = p.join(file);
    fs::read_to_string(path)
        .map(|s| s.trim().to_string())
        .map_err(Error::IoError)
}

// Reads the pin numbers written to a control file, then empties it.
fn take_pins(path: &Path) -> Result<Vec<PinNumber>> {
    let content = fs::read_to_string(path)?;
    if content.is_empty() {
        return Ok(Vec::new());
    }
    fs::write(path, "")?;
    Ok(content
        .split_ascii_whitespace()
        .filter_map(|s| s.parse::<PinNumber>().ok())
        .collect())
}

fn app_name() -> String {
    if let Some(app) = env::args_os().next() {
        if let Some(path) = Path::new(app.as_os_str()).file_name() {
            if let Some(app) = path.to_str() {
                return app.into();
            }
        }
    }
    "gpiosysfs".into()
}

fn default_name() -> String {
    unique_name(&app_name(), None)
}

/// The result for [`gpiosysfs_sim`] functions.
///
/// [`gpiosysfs_sim`]: crate
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by [`gpiosysfs_sim`] functions.
///
/// [`gpiosysfs_sim`]: crate
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Attempt to take a simulator live with a name of an active simulator.
    #[error("Simulator with name {0:?} already exists")]
    SimulatorExists(String),

    /// The pin is not provided by any simulated chip.
    #[error("Pin {0} is not provided by any chip")]
    UnknownPin(PinNumber),

    /// The pin is not exported.
    #[error("Pin {0} is not exported")]
    NotExported(PinNumber),

    /// An unexpected value was read from an attribute file.
    #[error("Read unexpected attr value {0:?}")]
    UnexpectedValue(String),

    /// An IO error detected while accessing an attribute file.
    #[error(transparent)]
    IoError(#[from] io::Error),
}
