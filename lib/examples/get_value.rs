// SPDX-FileCopyrightText: 2022 Kent Gibson <warthog618@gmail.com>
//
// SPDX-License-Identifier: Apache-2.0 OR MIT

// Basic example of reading a single pin.

use anyhow::Context;
use gpiosysfs::Pin;

fn main() -> anyhow::Result<()> {
    let number = 22;
    // export the pin, if necessary, as an input
    let pin = Pin::builder()
        .with_number(number)
        .as_input()
        .with_unexport_on_drop()
        .request()
        .context("Failed to request pin")?;

    let value = pin.value().context("Failed to read value")?;
    println!("{number}={value}");

    Ok(())
}
