// SPDX-FileCopyrightText: 2021 Kent Gibson <warthog618@gmail.com>
//
// SPDX-License-Identifier: Apache-2.0 OR MIT

use crate::attr::{Direction, Edge, PinNumber, Value};
use crate::sysfs::Sysfs;
use crate::{Error, Result};
use std::path::{Path, PathBuf};
use std::thread;
use std::time::{Duration, Instant};

const DEFAULT_EXPORT_TIMEOUT: Duration = Duration::from_secs(1);
const EXPORT_POLL_PERIOD: Duration = Duration::from_millis(10);

/// A handle to an exported pin.
///
/// The handle only holds the location of the pin, so each accessor
/// performs a single access to the corresponding sysfs attribute.
///
/// Pins are created using the [`Builder`], which exports the pin if necessary.
///
/// # Examples
/// ```no_run
/// # fn example() -> gpiosysfs::Result<()> {
/// use gpiosysfs::{Pin, Value};
///
/// let led = Pin::builder()
///     .with_number(17)
///     .as_output(Value::Inactive)
///     .request()?;
/// led.set_value(Value::Active)?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct Pin {
    sysfs: Sysfs,
    number: PinNumber,
    exported: bool,
    unexport_on_drop: bool,
}

impl Pin {
    /// Start building a new pin.
    pub fn builder() -> Builder {
        Builder::default()
    }

    /// The number identifying the pin.
    pub fn number(&self) -> PinNumber {
        self.number
    }

    /// True if the pin was exported when this handle was requested.
    ///
    /// False if the pin had already been exported.
    pub fn exported(&self) -> bool {
        self.exported
    }

    /// The path of the directory containing the pin's attributes.
    pub fn path(&self) -> PathBuf {
        self.sysfs.pin_path(self.number)
    }

    /// The root of the sysfs tree containing the pin.
    pub fn root(&self) -> &Path {
        self.sysfs.root()
    }

    /// Get the current direction of the pin.
    pub fn direction(&self) -> Result<Direction> {
        self.sysfs.direction(self.number)
    }

    /// Set the direction of the pin.
    ///
    /// The direction is read back to confirm the change has been applied.
    pub fn set_direction(&self, direction: Direction) -> Result<()> {
        self.sysfs.set_direction(self.number, direction)?;
        let actual = self.direction()?;
        if actual != direction {
            return Err(Error::Unconfirmed {
                path: self.path().join("direction"),
                expected: direction.to_string(),
                actual: actual.to_string(),
            });
        }
        Ok(())
    }

    /// Switch the pin to an output with the given value.
    pub fn set_output(&self, value: Value) -> Result<()> {
        self.sysfs.set_output(self.number, value)
    }

    /// Read the current value of the pin.
    pub fn value(&self) -> Result<Value> {
        self.sysfs.read(self.number)
    }

    /// Set the value of an output pin.
    pub fn set_value(&self, value: Value) -> Result<()> {
        self.sysfs.write(self.number, value)
    }

    /// Get the current edge trigger of the pin.
    pub fn edge(&self) -> Result<Edge> {
        self.sysfs.edge(self.number)
    }

    /// Set the edge trigger of the pin.
    ///
    /// The edge is read back to confirm the change has been applied.
    pub fn set_edge(&self, edge: Edge) -> Result<()> {
        self.sysfs.set_edge(self.number, edge)?;
        let actual = self.edge()?;
        if actual != edge {
            return Err(Error::Unconfirmed {
                path: self.path().join("edge"),
                expected: edge.to_string(),
                actual: actual.to_string(),
            });
        }
        Ok(())
    }

    /// Unexport the pin, consuming the handle.
    pub fn unexport(mut self) -> Result<()> {
        self.unexport_on_drop = false;
        self.sysfs.unexport(self.number)
    }
}

impl Drop for Pin {
    fn drop(&mut self) {
        if self.unexport_on_drop && self.exported {
            if let Err(e) = self.sysfs.unexport(self.number) {
                log::warn!("failed to unexport pin {}: {}", self.number, e);
            }
        }
    }
}

/// A builder of [`Pin`]s.
///
/// Collects the configuration for the pin, then exports and configures
/// the pin when [`request`] is called.
///
/// [`request`]: Builder::request
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Builder {
    sysfs: Sysfs,
    number: Option<PinNumber>,
    direction: Option<Direction>,
    value: Option<Value>,
    edge: Option<Edge>,
    export_timeout: Duration,
    unexport_on_drop: bool,
}

impl Default for Builder {
    fn default() -> Self {
        Builder {
            sysfs: Sysfs::default(),
            number: None,
            direction: None,
            value: None,
            edge: None,
            export_timeout: DEFAULT_EXPORT_TIMEOUT,
            unexport_on_drop: false,
        }
    }
}

impl Builder {
    /// Export, if necessary, and configure the pin.
    ///
    /// If the pin is not already exported then it is exported, and the request
    /// waits up to the export timeout for the pin's value attribute to appear.
    ///
    /// Direction and edge are only written if specified.
    pub fn request(&self) -> Result<Pin> {
        let number = self
            .number
            .ok_or_else(|| Error::InvalidArgument("No pin specified.".into()))?;
        let mut pin = Pin {
            sysfs: self.sysfs.clone(),
            number,
            exported: false,
            unexport_on_drop: false,
        };
        if !self.sysfs.is_exported(number) {
            self.sysfs.export(number)?;
            pin.exported = true;
            pin.unexport_on_drop = self.unexport_on_drop;
            self.wait_for_export(number)?;
        }
        match (self.direction, self.value) {
            (Some(Direction::Output), Some(value)) => pin.set_output(value)?,
            (Some(direction), _) => pin.set_direction(direction)?,
            (None, _) => {}
        }
        if let Some(edge) = self.edge {
            pin.set_edge(edge)?;
        }
        Ok(pin)
    }

    // The export only completes once the value attribute is accessible,
    // which may lag the directory appearing.
    fn wait_for_export(&self, number: PinNumber) -> Result<()> {
        let value = self.sysfs.pin_path(number).join("value");
        let start = Instant::now();
        loop {
            if value.exists() {
                return Ok(());
            }
            if start.elapsed() >= self.export_timeout {
                return Err(Error::ExportTimeout(number));
            }
            thread::sleep(EXPORT_POLL_PERIOD);
        }
    }

    /// Specify the root of the sysfs GPIO tree.
    ///
    /// The default is [`SYSFS_GPIO_PATH`](crate::SYSFS_GPIO_PATH).
    pub fn with_root<P: Into<PathBuf>>(&mut self, root: P) -> &mut Self {
        self.sysfs = Sysfs::with_root(root);
        self
    }

    /// Specify the pin to request.
    pub fn with_number(&mut self, number: PinNumber) -> &mut Self {
        self.number = Some(number);
        self
    }

    /// Set the pin to an input.
    pub fn as_input(&mut self) -> &mut Self {
        self.direction = Some(Direction::Input);
        self.value = None;
        self
    }

    /// Set the pin to an output with the given value.
    pub fn as_output(&mut self, value: Value) -> &mut Self {
        self.direction = Some(Direction::Output);
        self.value = Some(value);
        self
    }

    /// Set the direction of the pin.
    ///
    /// An output retains whatever value the pin currently has.
    pub fn with_direction(&mut self, direction: Direction) -> &mut Self {
        self.direction = Some(direction);
        self.value = None;
        self
    }

    /// Set the edge trigger of the pin.
    pub fn with_edge(&mut self, edge: Edge) -> &mut Self {
        self.edge = Some(edge);
        self
    }

    /// Set how long to wait for an export to complete.
    pub fn with_export_timeout(&mut self, timeout: Duration) -> &mut Self {
        self.export_timeout = timeout;
        self
    }

    /// Unexport the pin when it is dropped, if the request exported it.
    pub fn with_unexport_on_drop(&mut self) -> &mut Self {
        self.unexport_on_drop = true;
        self
    }
}
