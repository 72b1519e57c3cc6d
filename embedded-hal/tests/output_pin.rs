// SPDX-FileCopyrightText: 2024 Kent Gibson <warthog618@gmail.com>
//
// SPDX-License-Identifier: Apache-2.0 OR MIT

use embedded_hal::digital::{OutputPin as _, PinState, StatefulOutputPin};
use gpiosysfs::{Direction, Pin, Value};
use gpiosysfs_embedded_hal::OutputPin;
use gpiosysfs_sim::{Level, Sim};

fn sim() -> Sim {
    gpiosysfs_sim::builder()
        .with_chip(gpiosysfs_sim::Chip::new(0, 8, "output_pin"))
        .with_exported(2)
        .with_exported(3)
        .live()
        .unwrap()
}

fn output_pin(s: &Sim, number: u32, value: Value) -> OutputPin {
    let pin = Pin::builder()
        .with_root(s.root())
        .with_number(number)
        .as_output(value)
        .request()
        .unwrap();
    // apply the level written to the direction attribute
    s.sync().unwrap();
    OutputPin::try_from(pin).unwrap()
}

#[test]
fn set_high() {
    let s = sim();

    let number = 3;
    let mut pin = output_pin(&s, number, Value::Inactive);

    assert_eq!(s.level(number).unwrap(), Level::Low);
    pin.set_high().unwrap();
    assert_eq!(s.level(number).unwrap(), Level::High);
}

#[test]
fn set_low() {
    let s = sim();

    let number = 2;
    let mut pin = output_pin(&s, number, Value::Active);

    assert_eq!(s.level(number).unwrap(), Level::High);
    pin.set_low().unwrap();
    assert_eq!(s.level(number).unwrap(), Level::Low);
}

#[test]
fn set_state() {
    let s = sim();

    let number = 2;
    let mut pin = output_pin(&s, number, Value::Inactive);

    pin.set_state(PinState::High).unwrap();
    assert_eq!(s.level(number).unwrap(), Level::High);
    pin.set_state(PinState::Low).unwrap();
    assert_eq!(s.level(number).unwrap(), Level::Low);
}

#[test]
fn is_set_high() {
    let s = sim();

    let number = 3;
    let mut pin = output_pin(&s, number, Value::Inactive);

    assert!(!pin.is_set_high().unwrap());
    pin.set_high().unwrap();
    assert!(pin.is_set_high().unwrap());
    pin.set_low().unwrap();
    assert!(!pin.is_set_high().unwrap());
}

#[test]
fn is_set_low() {
    let s = sim();

    let number = 3;
    let mut pin = output_pin(&s, number, Value::Inactive);

    assert!(pin.is_set_low().unwrap());
    pin.set_high().unwrap();
    assert!(!pin.is_set_low().unwrap());
    pin.set_low().unwrap();
    assert!(pin.is_set_low().unwrap());
}

#[test]
fn toggle() {
    let s = sim();

    let number = 2;
    let mut pin = output_pin(&s, number, Value::Active);

    assert_eq!(s.level(number).unwrap(), Level::High);
    pin.toggle().unwrap();
    assert_eq!(s.level(number).unwrap(), Level::Low);
    pin.toggle().unwrap();
    assert_eq!(s.level(number).unwrap(), Level::High);
}

#[test]
fn read_back() {
    use embedded_hal::digital::InputPin as _;

    let s = sim();

    let number = 2;
    let mut pin = output_pin(&s, number, Value::Active);

    assert!(pin.is_high().unwrap());
    pin.set_low().unwrap();
    assert!(pin.is_low().unwrap());
}

#[test]
fn into_input_pin() {
    use embedded_hal::digital::InputPin as _;

    let s = sim();

    let number = 2;
    let pin = output_pin(&s, number, Value::Inactive);

    // convert to input
    let mut pin = pin.into_input_pin().unwrap();

    assert_eq!(s.direction(number).unwrap(), "in");
    s.set_level(number, Level::High).unwrap();
    assert!(pin.is_high().unwrap());
}

#[test]
fn try_from_pin() {
    let s = sim();

    let pin = Pin::builder()
        .with_root(s.root())
        .with_number(3)
        .as_input()
        .request()
        .unwrap();
    let res = OutputPin::try_from(pin);
    assert!(matches!(
        res,
        Err(gpiosysfs_embedded_hal::Error::RequiresOutputMode)
    ));

    // tracked state is taken from the pin
    s.set_raw_attr(3, "direction", "out\n").unwrap();
    s.set_level(3, Level::High).unwrap();
    let pin = Pin::builder()
        .with_root(s.root())
        .with_number(3)
        .request()
        .unwrap();
    let mut pin = OutputPin::try_from(pin).unwrap();
    assert!(pin.is_set_high().unwrap());
}

#[test]
fn into_pin() {
    let s = sim();

    let pin: Pin = output_pin(&s, 3, Value::Active).into();
    assert_eq!(pin.number(), 3);
    assert_eq!(pin.direction().unwrap(), Direction::Output);
}
