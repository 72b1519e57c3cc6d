// SPDX-FileCopyrightText: 2022 Kent Gibson <warthog618@gmail.com>
//
// SPDX-License-Identifier: Apache-2.0 OR MIT

// Basic example of toggling a single pin.

use anyhow::Context;
use gpiosysfs::{Pin, Value};
use std::thread;
use std::time::Duration;

fn main() -> anyhow::Result<()> {
    let number = 22;
    let mut value = Value::Active;

    let pin = Pin::builder()
        .with_number(number)
        .as_output(value)
        .request()
        .context("Failed to request pin")?;

    loop {
        println!("{}={:?}", number, value);
        thread::sleep(Duration::from_millis(500));
        value = value.not();
        pin.set_value(value).context("Failed to set value")?;
    }
}
