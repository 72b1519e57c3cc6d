// SPDX-FileCopyrightText: 2024 Kent Gibson <warthog618@gmail.com>
//
// SPDX-License-Identifier: Apache-2.0 OR MIT

// Basic example of toggling a single pin.

use anyhow::Context;
use embedded_hal::digital::{PinState, StatefulOutputPin};
use std::thread;
use std::time::Duration;

fn main() -> anyhow::Result<()> {
    let mut pin = gpiosysfs_embedded_hal::OutputPin::new(22, PinState::High)
        .context("Failed to request pin")?;

    loop {
        thread::sleep(Duration::from_millis(500));
        println!("toggle pin...");
        pin.toggle().context("Failed to toggle pin")?;
    }
}
