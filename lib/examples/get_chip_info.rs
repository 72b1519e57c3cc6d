// SPDX-FileCopyrightText: 2023 Kent Gibson <warthog618@gmail.com>
//
// SPDX-License-Identifier: Apache-2.0 OR MIT

// Basic example of listing the GPIO chips.

fn main() -> gpiosysfs::Result<()> {
    for chip in gpiosysfs::chips()? {
        println!(
            "{} [{}] ({} lines, base {})",
            chip.name, chip.label, chip.ngpio, chip.base
        );
    }
    Ok(())
}
