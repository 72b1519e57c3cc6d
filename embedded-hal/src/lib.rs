// SPDX-FileCopyrightText: 2024 Kent Gibson <warthog618@gmail.com>
//
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A library providing [`embedded_hal::digital`] traits for
//! [`gpiosysfs::Pin`] and therefore for any Linux platform still
//! supporting the sysfs GPIO interface.
//!
//! Each wrapper contains a single pin which must be configured as an
//! input or output.
//!
//! # Example Usage
//!
//! Reading an input pin:
//!
//! ```no_run
//! # fn example() -> Result<(), gpiosysfs_embedded_hal::Error> {
//! use embedded_hal::digital::InputPin;
//!
//! let mut pin = gpiosysfs_embedded_hal::InputPin::new(4)?;
//! if pin.is_high()? {
//!     println!("Input is high.");
//! }
//! # Ok(())
//! # }
//! ```
//! Setting an output pin:
//!
//! ```no_run
//! # fn example() -> Result<(), gpiosysfs_embedded_hal::Error> {
//! use embedded_hal::digital::{OutputPin, PinState};
//!
//! // level is set as part of the request
//! let mut led0 = gpiosysfs_embedded_hal::OutputPin::new(17, PinState::High)?;
//!
//! // change the level later
//! led0.set_low()?;
//! # Ok(())
//! # }
//! ```
use embedded_hal::digital::PinState;
use gpiosysfs::{Direction, Pin, PinNumber, Value};

/// Provides [`embedded_hal::digital`] traits for a [`gpiosysfs::Pin`]
/// configured as an input.
///
/// Do NOT drop the [`InputPin`] until you are completely done with it.
/// Dropping and re-requesting the pin is far more expensive than getting the
/// value.
#[derive(Debug)]
pub struct InputPin(Pin);

impl InputPin {
    /// Creates a new input pin for the given pin `number`, exporting it
    /// if necessary.
    ///
    /// ```no_run
    /// # fn example() -> Result<(), gpiosysfs_embedded_hal::Error> {
    /// use embedded_hal::digital::InputPin;
    ///
    /// let mut pin = gpiosysfs_embedded_hal::InputPin::new(4)?;
    /// if pin.is_high()? {
    ///     println!("Input is high.");
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(number: PinNumber) -> Result<Self, Error> {
        let pin = Pin::builder().with_number(number).as_input().request()?;
        Ok(InputPin(pin))
    }

    /// Set this pin to output mode.
    pub fn into_output_pin(self, state: PinState) -> Result<OutputPin, Error> {
        let value = state_to_value(state);
        self.0.set_output(value)?;
        Ok(OutputPin {
            pin: self.0,
            value,
        })
    }
}

impl TryFrom<Pin> for InputPin {
    type Error = Error;

    /// Convert a [`gpiosysfs::Pin`] that is an input into an [`InputPin`].
    ///
    /// This allows for advanced configurations such as an alternate sysfs
    /// root or setting an edge trigger.
    /// [`InputPin::new()`] should be used for less complex configurations.
    fn try_from(pin: Pin) -> Result<Self, Self::Error> {
        if pin.direction()? != Direction::Input {
            return Err(Error::RequiresInputMode);
        }
        Ok(InputPin(pin))
    }
}

impl From<InputPin> for Pin {
    /// Convert the [`InputPin`] into the contained [`Pin`].
    fn from(pin: InputPin) -> Self {
        pin.0
    }
}

impl embedded_hal::digital::InputPin for InputPin {
    #[inline]
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        is_high(&self.0)
    }

    #[inline]
    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(!is_high(&self.0)?)
    }
}

impl embedded_hal::digital::ErrorType for InputPin {
    /// Errors returned by [`InputPin`].
    type Error = Error;
}

/// Provides [`embedded_hal::digital`] traits for a [`gpiosysfs::Pin`]
/// configured as an output.
///
/// The wrapper tracks the value it last set, so [`StatefulOutputPin`]
/// queries do not touch the pin.
///
/// [`StatefulOutputPin`]: embedded_hal::digital::StatefulOutputPin
#[derive(Debug)]
pub struct OutputPin {
    pin: Pin,
    value: Value,
}

impl OutputPin {
    /// Creates a new output pin for the given pin `number`, exporting it
    /// if necessary.
    ///
    /// ```no_run
    /// # fn example() -> Result<(), gpiosysfs_embedded_hal::Error> {
    /// use embedded_hal::digital::{OutputPin, PinState};
    ///
    /// let mut pin = gpiosysfs_embedded_hal::OutputPin::new(17, PinState::Low)?;
    /// // later...
    /// pin.set_high()?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(number: PinNumber, state: PinState) -> Result<Self, Error> {
        let value = state_to_value(state);
        let pin = Pin::builder()
            .with_number(number)
            .as_output(value)
            .request()?;
        Ok(OutputPin { pin, value })
    }

    /// Set this pin to input mode.
    pub fn into_input_pin(self) -> Result<InputPin, Error> {
        self.pin.set_direction(Direction::Input)?;
        Ok(InputPin(self.pin))
    }
}

impl TryFrom<Pin> for OutputPin {
    type Error = Error;

    /// Convert a [`gpiosysfs::Pin`] that is an output into an [`OutputPin`].
    ///
    /// The tracked state is initialised from the current value of the pin.
    fn try_from(pin: Pin) -> Result<Self, Self::Error> {
        if pin.direction()? != Direction::Output {
            return Err(Error::RequiresOutputMode);
        }
        let value = pin.value()?;
        Ok(OutputPin { pin, value })
    }
}

impl From<OutputPin> for Pin {
    /// Convert the [`OutputPin`] into the contained [`Pin`].
    fn from(pin: OutputPin) -> Self {
        pin.pin
    }
}

impl embedded_hal::digital::InputPin for OutputPin {
    // Reads the value attribute, which for outputs reports the driven value.

    #[inline]
    /// Is the pin high?
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        is_high(&self.pin)
    }

    #[inline]
    /// Is the pin low?
    fn is_low(&mut self) -> Result<bool, Self::Error> {
        Ok(!is_high(&self.pin)?)
    }
}

impl embedded_hal::digital::OutputPin for OutputPin {
    #[inline]
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.set_state(PinState::Low)
    }

    #[inline]
    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.set_state(PinState::High)
    }

    fn set_state(&mut self, state: PinState) -> Result<(), Error> {
        let value = state_to_value(state);
        if self.value != value {
            self.pin.set_value(value)?;
            self.value = value;
        }
        Ok(())
    }
}

impl embedded_hal::digital::StatefulOutputPin for OutputPin {
    fn is_set_high(&mut self) -> Result<bool, Self::Error> {
        Ok(self.value == Value::Active)
    }

    fn is_set_low(&mut self) -> Result<bool, Self::Error> {
        Ok(self.value == Value::Inactive)
    }

    fn toggle(&mut self) -> Result<(), Self::Error> {
        let value = self.value.not();
        self.pin.set_value(value)?;
        self.value = value;
        Ok(())
    }
}

impl embedded_hal::digital::ErrorType for OutputPin {
    /// Errors returned by [`OutputPin`].
    type Error = Error;
}

fn is_high(pin: &Pin) -> Result<bool, Error> {
    Ok(pin.value()? == Value::Active)
}

/// Converts a [`PinState`] to the gpiosysfs [`Value`].
fn state_to_value(state: PinState) -> Value {
    match state {
        PinState::High => Value::Active,
        PinState::Low => Value::Inactive,
    }
}

/// Errors returned by [`gpiosysfs_embedded_hal`](crate) types.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// InputPins must be in input mode.
    #[error("Requested pin must be in input mode")]
    RequiresInputMode,

    /// OutputPins must be in output mode.
    #[error("Requested pin must be in output mode")]
    RequiresOutputMode,

    /// An error returned from an underlying gpiosysfs call.
    #[error("gpiosysfs returned: {0}")]
    Sysfs(#[source] gpiosysfs::Error),
}

impl From<gpiosysfs::Error> for Error {
    fn from(err: gpiosysfs::Error) -> Self {
        Self::Sysfs(err)
    }
}

impl embedded_hal::digital::Error for Error {
    fn kind(&self) -> embedded_hal::digital::ErrorKind {
        embedded_hal::digital::ErrorKind::Other
    }
}
