// SPDX-FileCopyrightText: 2021 Kent Gibson <warthog618@gmail.com>
//
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::attr::{Direction, Edge, PinNumber, Value};
use crate::{Error, Result};
#[cfg(feature = "serde")]
use serde_derive::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::ops::Range;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// The location of the GPIO class in sysfs.
pub const SYSFS_GPIO_PATH: &str = "/sys/class/gpio";

/// The root of a sysfs GPIO tree.
///
/// All attribute paths are derived from the root, which is
/// [`SYSFS_GPIO_PATH`] unless otherwise specified.
///
/// Every operation performs a single open, read or write, and close of the
/// relevant attribute file.  Nothing is cached.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Sysfs {
    root: PathBuf,
}

impl Default for Sysfs {
    fn default() -> Self {
        Sysfs {
            root: SYSFS_GPIO_PATH.into(),
        }
    }
}

impl Sysfs {
    /// Constructs a Sysfs rooted at the given path.
    ///
    /// # Examples
    ///```no_run
    /// # fn example() -> gpiosysfs::Result<()> {
    /// let sysfs = gpiosysfs::Sysfs::with_root("/sys/class/gpio");
    /// sysfs.export(17)?;
    /// # Ok(())
    /// # }
    ///```
    pub fn with_root<P: Into<PathBuf>>(root: P) -> Sysfs {
        Sysfs { root: root.into() }
    }

    /// The root directory of the GPIO tree.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The path of the directory containing the attributes of an exported pin.
    pub fn pin_path(&self, pin: PinNumber) -> PathBuf {
        self.root.join(format!("gpio{}", pin))
    }

    fn attr_path(&self, pin: PinNumber, attr: &str) -> PathBuf {
        let mut p = self.pin_path(pin);
        p.push(attr);
        p
    }

    /// Export a pin so its attributes become available.
    pub fn export(&self, pin: PinNumber) -> Result<()> {
        write_attr(&self.root.join("export"), &pin.to_string())
    }

    /// Unexport a pin, removing its attributes.
    pub fn unexport(&self, pin: PinNumber) -> Result<()> {
        write_attr(&self.root.join("unexport"), &pin.to_string())
    }

    /// Check if the pin is currently exported.
    pub fn is_exported(&self, pin: PinNumber) -> bool {
        self.pin_path(pin).is_dir()
    }

    /// The numbers of all the currently exported pins, in ascending order.
    pub fn exported_pins(&self) -> Result<Vec<PinNumber>> {
        let mut pins: Vec<PinNumber> = fs::read_dir(&self.root)
            .map_err(|e| Error::io(&self.root, e))?
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

    /// Set the direction of an exported pin.
    pub fn set_direction(&self, pin: PinNumber, direction: Direction) -> Result<()> {
        write_attr(&self.attr_path(pin, "direction"), direction.as_str())
    }

    /// Set an exported pin to output at the given value.
    ///
    /// The kernel switches the direction and sets the value in one step,
    /// so the pin does not glitch to a stale value.
    pub fn set_output(&self, pin: PinNumber, value: Value) -> Result<()> {
        write_attr(&self.attr_path(pin, "direction"), value.as_level_str())
    }

    /// Get the direction of an exported pin.
    pub fn direction(&self, pin: PinNumber) -> Result<Direction> {
        parse_attr(&self.attr_path(pin, "direction"))
    }

    /// Read the value of an exported pin.
    pub fn read(&self, pin: PinNumber) -> Result<Value> {
        parse_attr(&self.attr_path(pin, "value"))
    }

    /// Write the value of an exported output pin.
    ///
    /// The kernel rejects writes to input pins.
    pub fn write(&self, pin: PinNumber, value: Value) -> Result<()> {
        write_attr(&self.attr_path(pin, "value"), value.as_str())
    }

    /// Get the edge trigger of an exported pin.
    pub fn edge(&self, pin: PinNumber) -> Result<Edge> {
        parse_attr(&self.attr_path(pin, "edge"))
    }

    /// Set the edge trigger of an exported pin.
    ///
    /// Not all pins support edge triggers, in which case the edge attribute
    /// is absent and this fails with a not found error.
    pub fn set_edge(&self, pin: PinNumber, edge: Edge) -> Result<()> {
        write_attr(&self.attr_path(pin, "edge"), edge.as_str())
    }

    /// Returns the info for all the GPIO chips listed in the tree.
    ///
    /// The chips are sorted by base.
    pub fn chips(&self) -> Result<Vec<ChipInfo>> {
        let mut chips = Vec::new();
        for de in fs::read_dir(&self.root).map_err(|e| Error::io(&self.root, e))? {
            let de = de.map_err(|e| Error::io(&self.root, e))?;
            let name = de.file_name().to_string_lossy().into_owned();
            if !name.starts_with("gpiochip") {
                continue;
            }
            let dir = de.path();
            chips.push(ChipInfo {
                base: parse_attr(&dir.join("base"))?,
                ngpio: parse_attr(&dir.join("ngpio"))?,
                label: read_attr(&dir.join("label"))?,
                name,
            });
        }
        chips.sort_unstable_by_key(|c| c.base);
        Ok(chips)
    }

    /// Find the chip providing a pin.
    pub fn chip_for_pin(&self, pin: PinNumber) -> Result<Option<ChipInfo>> {
        Ok(self.chips()?.into_iter().find(|c| c.contains(pin)))
    }
}

/// The publicly available information for a GPIO chip.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ChipInfo {
    /// The name of the chip directory, e.g. `gpiochip32`.
    pub name: String,

    /// The number of the first pin provided by the chip.
    pub base: PinNumber,

    /// The number of pins provided by the chip.
    pub ngpio: u32,

    /// A functional name for the chip, such as a product number.
    pub label: String,
}

impl ChipInfo {
    /// The range of pin numbers provided by the chip.
    pub fn pins(&self) -> Range<PinNumber> {
        self.base..self.base.saturating_add(self.ngpio)
    }

    /// Check if the chip provides the pin.
    pub fn contains(&self, pin: PinNumber) -> bool {
        self.pins().contains(&pin)
    }
}

// Writes the whole of data to an existing attribute.
//
// The attribute is never created, so a missing pin or GPIO class is reported
// as not found.
fn write_attr(path: &Path, data: &str) -> Result<()> {
    log::debug!("writing {:?} to {}", data, path.display());
    let mut f = fs::OpenOptions::new()
        .write(true)
        .truncate(true)
        .open(path)
        .map_err(|e| Error::io(path, e))?;
    f.write_all(data.as_bytes()).map_err(|e| Error::io(path, e))
}

fn read_attr(path: &Path) -> Result<String> {
    let s = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    let s = s.trim_end().to_string();
    log::debug!("read {:?} from {}", s, path.display());
    Ok(s)
}

fn parse_attr<T: FromStr>(path: &Path) -> Result<T> {
    let content = read_attr(path)?;
    content.parse::<T>().map_err(|_| Error::Parse {
        path: path.to_path_buf(),
        content,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_root() {
        assert_eq!(Sysfs::default().root(), Path::new("/sys/class/gpio"));
    }

    #[test]
    fn paths() {
        let s = Sysfs::with_root("/tmp/gpio");
        assert_eq!(s.root(), Path::new("/tmp/gpio"));
        assert_eq!(s.pin_path(17), PathBuf::from("/tmp/gpio/gpio17"));
        assert_eq!(
            s.attr_path(17, "direction"),
            PathBuf::from("/tmp/gpio/gpio17/direction")
        );
        assert_eq!(
            Sysfs::default().attr_path(0, "value"),
            PathBuf::from("/sys/class/gpio/gpio0/value")
        );
    }

    #[test]
    fn chip_info_pins() {
        let c = ChipInfo {
            name: "gpiochip32".into(),
            base: 32,
            ngpio: 16,
            label: "pca9555".into(),
        };
        assert_eq!(c.pins(), 32..48);
        assert!(!c.contains(31));
        assert!(c.contains(32));
        assert!(c.contains(47));
        assert!(!c.contains(48));
    }

    #[test]
    fn chip_info_saturates() {
        let c = ChipInfo {
            base: u32::MAX - 1,
            ngpio: 8,
            ..Default::default()
        };
        assert_eq!(c.pins(), u32::MAX - 1..u32::MAX);
    }
}
