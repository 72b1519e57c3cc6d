// SPDX-FileCopyrightText: 2021 Kent Gibson <warthog618@gmail.com>
//
// SPDX-License-Identifier: MIT

//! A library for accessing GPIO pins on Linux platforms
//! using the sysfs GPIO interface.
//!
//! Pins are exported, configured, read and written via the attribute files
//! under `/sys/class/gpio`.  Each operation opens, reads or writes, and closes
//! a single attribute file.  There is no caching, so the sysfs tree is always
//! the source of truth.
//!
//! The simplest interface is the set of free functions, which operate on the
//! standard sysfs location:
//! ```no_run
//! # fn main() -> gpiosysfs::Result<()> {
//! use gpiosysfs::{Direction, Value};
//!
//! gpiosysfs::export(17)?;
//! gpiosysfs::set_direction(17, Direction::Output)?;
//! gpiosysfs::write(17, Value::Active)?;
//! assert_eq!(gpiosysfs::read(17)?, Value::Active);
//! gpiosysfs::unexport(17)?;
//! # Ok(())
//! # }
//! ```
//!
//! The same operations are available on a [`Sysfs`] with an alternative root,
//! and a [`Pin`] handle can be requested using a [`Builder`](pin::Builder).

use std::io;
use std::path::{Path, PathBuf};

/// Types describing pin attributes.
pub mod attr;
pub use attr::{Direction, Edge, PinNumber, Value};

/// The pin handle and its builder.
pub mod pin;
pub use pin::Pin;

mod sysfs;
pub use sysfs::{ChipInfo, Sysfs, SYSFS_GPIO_PATH};

/// Errors returned by [`gpiosysfs`] functions.
///
/// [`gpiosysfs`]: crate
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An error returned when accessing an attribute file.
    #[error("\"{}\" {}", .path.display(), .source)]
    Io {
        /// The attribute being accessed.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: io::Error,
    },

    /// An attribute contained unexpected content.
    #[error("\"{}\" contains unexpected content {:?}", .path.display(), .content)]
    Parse {
        /// The attribute that was read.
        path: PathBuf,
        /// The content of the attribute, trimmed of trailing whitespace.
        content: String,
    },

    /// An error returned when there is a problem with an argument.
    #[error("{0}")]
    InvalidArgument(String),

    /// The pin attributes did not appear after the pin was exported.
    #[error("pin {0} not available after export")]
    ExportTimeout(PinNumber),

    /// An attribute did not read back as written.
    #[error("\"{}\" reads {:?} after writing {:?}", .path.display(), .actual, .expected)]
    Unconfirmed {
        /// The attribute that was written.
        path: PathBuf,
        /// The content written.
        expected: String,
        /// The content read back.
        actual: String,
    },
}

impl Error {
    pub(crate) fn io(path: &Path, source: io::Error) -> Error {
        Error::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    /// The kind of the underlying I/O error, if any.
    ///
    /// Accessing the attributes of a pin that is not exported returns
    /// [`io::ErrorKind::NotFound`].
    pub fn io_kind(&self) -> Option<io::ErrorKind> {
        match self {
            Error::Io { source, .. } => Some(source.kind()),
            _ => None,
        }
    }
}

/// The result for [`gpiosysfs`] functions.
///
/// [`gpiosysfs`]: crate
pub type Result<T> = std::result::Result<T, Error>;

/// Export a pin.
///
/// Writes the pin number to `/sys/class/gpio/export`.
pub fn export(pin: PinNumber) -> Result<()> {
    Sysfs::default().export(pin)
}

/// Unexport a pin.
///
/// Writes the pin number to `/sys/class/gpio/unexport`.
pub fn unexport(pin: PinNumber) -> Result<()> {
    Sysfs::default().unexport(pin)
}

/// Check if a pin is exported.
pub fn is_exported(pin: PinNumber) -> bool {
    Sysfs::default().is_exported(pin)
}

/// Set the direction of an exported pin.
pub fn set_direction(pin: PinNumber, direction: Direction) -> Result<()> {
    Sysfs::default().set_direction(pin, direction)
}

/// Get the direction of an exported pin.
pub fn direction(pin: PinNumber) -> Result<Direction> {
    Sysfs::default().direction(pin)
}

/// Read the value of an exported pin.
pub fn read(pin: PinNumber) -> Result<Value> {
    Sysfs::default().read(pin)
}

/// Write the value of an exported output pin.
pub fn write(pin: PinNumber, value: Value) -> Result<()> {
    Sysfs::default().write(pin, value)
}

/// Set an exported pin to output at the given value.
pub fn set_output(pin: PinNumber, value: Value) -> Result<()> {
    Sysfs::default().set_output(pin, value)
}

/// Get the edge trigger of an exported pin.
pub fn edge(pin: PinNumber) -> Result<Edge> {
    Sysfs::default().edge(pin)
}

/// Set the edge trigger of an exported pin.
pub fn set_edge(pin: PinNumber, edge: Edge) -> Result<()> {
    Sysfs::default().set_edge(pin, edge)
}

/// The numbers of all the currently exported pins, in ascending order.
pub fn exported_pins() -> Result<Vec<PinNumber>> {
    Sysfs::default().exported_pins()
}

/// Returns the info for all the GPIO chips in the system.
pub fn chips() -> Result<Vec<ChipInfo>> {
    Sysfs::default().chips()
}
