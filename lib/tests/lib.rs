// SPDX-FileCopyrightText: 2022 Kent Gibson <warthog618@gmail.com>
//
// SPDX-License-Identifier: MIT

// The free functions operate on the real sysfs tree, so only pins that
// cannot exist are accessed.

use gpiosysfs::{Direction, Edge, Error, Value};

const ABSENT: u32 = u32::MAX;

#[test]
fn read_absent_pin() {
    let e = gpiosysfs::read(ABSENT).unwrap_err();
    assert!(matches!(e, Error::Io { .. }));
    assert_eq!(e.io_kind(), Some(std::io::ErrorKind::NotFound));
}

#[test]
fn write_absent_pin() {
    assert!(matches!(
        gpiosysfs::write(ABSENT, Value::Active),
        Err(Error::Io { .. })
    ));
    assert!(matches!(
        gpiosysfs::set_output(ABSENT, Value::Inactive),
        Err(Error::Io { .. })
    ));
}

#[test]
fn direction_absent_pin() {
    assert!(matches!(
        gpiosysfs::set_direction(ABSENT, Direction::Output),
        Err(Error::Io { .. })
    ));
    assert!(matches!(gpiosysfs::direction(ABSENT), Err(Error::Io { .. })));
}

#[test]
fn edge_absent_pin() {
    assert!(matches!(
        gpiosysfs::set_edge(ABSENT, Edge::Both),
        Err(Error::Io { .. })
    ));
    assert!(matches!(gpiosysfs::edge(ABSENT), Err(Error::Io { .. })));
}

#[test]
fn is_exported_absent_pin() {
    assert!(!gpiosysfs::is_exported(ABSENT));
}
