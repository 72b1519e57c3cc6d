// SPDX-FileCopyrightText: 2022 Kent Gibson <warthog618@gmail.com>
//
// SPDX-License-Identifier: MIT

// Tests run against a simulated sysfs tree provided by gpiosysfs-sim.

mod pin {
    use gpiosysfs::{Direction, Edge, Error, Pin, Value};
    use gpiosysfs_sim::{builder, simpleton, Chip, Level, Sim};
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::thread;
    use std::time::Duration;

    fn sim_with_exported(pin: u32) -> Sim {
        builder()
            .with_chip(Chip::new(0, 32, "pin"))
            .with_exported(pin)
            .live()
            .unwrap()
    }

    // Services the sim control files while the request waits for the export.
    fn request_exporting(sim: &Sim, bld: &gpiosysfs::pin::Builder) -> gpiosysfs::Result<Pin> {
        let done = AtomicBool::new(false);
        thread::scope(|s| {
            s.spawn(|| {
                while !done.load(Ordering::Relaxed) {
                    sim.sync().unwrap();
                    thread::sleep(Duration::from_millis(1));
                }
            });
            let res = bld.request();
            done.store(true, Ordering::Relaxed);
            res
        })
    }

    #[test]
    fn request_exports() {
        let sim = simpleton(32);
        let mut bld = Pin::builder();
        bld.with_root(sim.root()).with_number(17);

        let pin = request_exporting(&sim, &bld).unwrap();
        assert_eq!(pin.number(), 17);
        assert!(pin.exported());
        assert_eq!(pin.path(), sim.pin_path(17));
        assert_eq!(pin.root(), sim.root());
        assert!(sim.is_exported(17).unwrap());
    }

    #[test]
    fn request_already_exported() {
        let sim = sim_with_exported(17);

        let pin = Pin::builder()
            .with_root(sim.root())
            .with_number(17)
            .request()
            .unwrap();
        assert!(!pin.exported());
        assert_eq!(pin.direction().unwrap(), Direction::Input);
    }

    #[test]
    fn request_export_timeout() {
        // pin 40 is not provided by the chip, so the export never completes
        let sim = simpleton(32);
        let mut bld = Pin::builder();
        bld.with_root(sim.root())
            .with_number(40)
            .with_export_timeout(Duration::from_millis(50));

        let res = request_exporting(&sim, &bld);
        assert!(matches!(res, Err(Error::ExportTimeout(40))));
    }

    #[test]
    fn request_without_gpio_class() {
        let res = Pin::builder()
            .with_root("/nonexistent/sys/class/gpio")
            .with_number(17)
            .request();
        assert_eq!(
            res.unwrap_err().io_kind(),
            Some(std::io::ErrorKind::NotFound)
        );
    }

    #[test]
    fn request_as_input() {
        let sim = sim_with_exported(4);
        sim.set_raw_attr(4, "direction", "out\n").unwrap();

        let pin = Pin::builder()
            .with_root(sim.root())
            .with_number(4)
            .as_input()
            .request()
            .unwrap();
        assert_eq!(pin.direction().unwrap(), Direction::Input);
        assert_eq!(sim.direction(4).unwrap(), "in");
    }

    #[test]
    fn request_as_output() {
        let sim = sim_with_exported(4);

        let pin = Pin::builder()
            .with_root(sim.root())
            .with_number(4)
            .as_output(Value::Active)
            .request()
            .unwrap();
        assert_eq!(sim.level(4).unwrap(), Level::High);
        assert_eq!(pin.direction().unwrap(), Direction::Output);
        assert_eq!(pin.value().unwrap(), Value::Active);
    }

    #[test]
    fn request_with_direction() {
        let sim = sim_with_exported(4);
        sim.set_level(4, Level::High).unwrap();

        let pin = Pin::builder()
            .with_root(sim.root())
            .with_number(4)
            .with_direction(Direction::Output)
            .request()
            .unwrap();
        assert_eq!(pin.direction().unwrap(), Direction::Output);
        // value retained
        assert_eq!(pin.value().unwrap(), Value::Active);
    }

    #[test]
    fn request_with_edge() {
        let sim = sim_with_exported(9);

        let pin = Pin::builder()
            .with_root(sim.root())
            .with_number(9)
            .as_input()
            .with_edge(Edge::Falling)
            .request()
            .unwrap();
        assert_eq!(pin.edge().unwrap(), Edge::Falling);
        assert_eq!(sim.edge(9).unwrap(), "falling");
    }

    #[test]
    fn set_direction() {
        let sim = sim_with_exported(9);
        let pin = Pin::builder()
            .with_root(sim.root())
            .with_number(9)
            .request()
            .unwrap();

        pin.set_direction(Direction::Output).unwrap();
        assert_eq!(sim.direction(9).unwrap(), "out");
        pin.set_direction(Direction::Input).unwrap();
        assert_eq!(sim.direction(9).unwrap(), "in");
    }

    #[test]
    fn set_edge() {
        let sim = sim_with_exported(9);
        let pin = Pin::builder()
            .with_root(sim.root())
            .with_number(9)
            .request()
            .unwrap();

        pin.set_edge(Edge::Both).unwrap();
        assert_eq!(sim.edge(9).unwrap(), "both");
        assert_eq!(pin.edge().unwrap(), Edge::Both);
    }

    #[test]
    fn set_value() {
        let sim = sim_with_exported(12);
        let pin = Pin::builder()
            .with_root(sim.root())
            .with_number(12)
            .as_output(Value::Inactive)
            .request()
            .unwrap();
        assert_eq!(sim.level(12).unwrap(), Level::Low);

        pin.set_value(Value::Active).unwrap();
        assert_eq!(pin.value().unwrap(), Value::Active);
        assert_eq!(sim.level(12).unwrap(), Level::High);

        pin.set_value(Value::Inactive).unwrap();
        assert_eq!(pin.value().unwrap(), Value::Inactive);
        assert_eq!(sim.level(12).unwrap(), Level::Low);
    }

    #[test]
    fn set_output() {
        let sim = sim_with_exported(12);
        let pin = Pin::builder()
            .with_root(sim.root())
            .with_number(12)
            .request()
            .unwrap();

        pin.set_output(Value::Active).unwrap();
        assert_eq!(sim.level(12).unwrap(), Level::High);
        assert_eq!(sim.direction(12).unwrap(), "out");
    }

    #[test]
    fn value_follows_sysfs() {
        let sim = sim_with_exported(12);
        let pin = Pin::builder()
            .with_root(sim.root())
            .with_number(12)
            .as_input()
            .request()
            .unwrap();

        assert_eq!(pin.value().unwrap(), Value::Inactive);
        sim.set_level(12, Level::High).unwrap();
        assert_eq!(pin.value().unwrap(), Value::Active);
    }

    #[test]
    fn unexport() {
        let sim = sim_with_exported(12);
        let pin = Pin::builder()
            .with_root(sim.root())
            .with_number(12)
            .request()
            .unwrap();

        pin.unexport().unwrap();
        assert!(!sim.is_exported(12).unwrap());
    }

    #[test]
    fn unexport_on_drop() {
        let sim = simpleton(32);
        let mut bld = Pin::builder();
        bld.with_root(sim.root())
            .with_number(6)
            .with_unexport_on_drop();

        let pin = request_exporting(&sim, &bld).unwrap();
        assert!(sim.is_exported(6).unwrap());
        drop(pin);
        assert!(!sim.is_exported(6).unwrap());
    }

    #[test]
    fn unexport_on_drop_only_if_exported() {
        let sim = sim_with_exported(6);

        let pin = Pin::builder()
            .with_root(sim.root())
            .with_number(6)
            .with_unexport_on_drop()
            .request()
            .unwrap();
        drop(pin);
        assert!(sim.is_exported(6).unwrap());
    }

    #[test]
    fn accessors_after_external_unexport() {
        let sim = sim_with_exported(6);
        let pin = Pin::builder()
            .with_root(sim.root())
            .with_number(6)
            .request()
            .unwrap();

        gpiosysfs::Sysfs::with_root(sim.root()).unexport(6).unwrap();
        sim.sync().unwrap();
        assert!(matches!(pin.value(), Err(Error::Io { .. })));
        assert!(matches!(
            pin.set_value(Value::Active),
            Err(Error::Io { .. })
        ));
        assert!(matches!(
            pin.set_direction(Direction::Output),
            Err(Error::Io { .. })
        ));
    }
}
