#[cfg(test)]
mod tests {
    use log::{Level, LevelFilter, Log, Metadata, Record};
    use parking_lot::Mutex;
    use strider::{nested, shape, Nested, StridedArray};

    struct Capture(Mutex<Vec<String>>);

    impl Log for Capture {
        fn enabled(&self, metadata: &Metadata) -> bool {
            metadata.level() <= Level::Warn
        }

        fn log(&self, record: &Record) {
            if self.enabled(record.metadata()) {
                self.0.lock().push(record.args().to_string());
            }
        }

        fn flush(&self) {}
    }

    static CAPTURE: Capture = Capture(parking_lot::const_mutex(Vec::new()));

    fn warnings() -> Vec<String> {
        std::mem::take(&mut *CAPTURE.0.lock())
    }

    fn ragged() -> Nested<i32> {
        Nested::list([Nested::from(vec![1, 2]), Nested::from(vec![3])])
    }

    // One test per binary: the logger is process global.
    #[test]
    fn inferred_ragged_shape_warns() -> anyhow::Result<()> {
        log::set_logger(&CAPTURE).map_err(|e| anyhow::anyhow!("{e}"))?;
        log::set_max_level(LevelFilter::Warn);

        let a = StridedArray::from_nested(&ragged());
        assert_eq!(a.shape(), &shape![2, 2]);
        let logged = warnings();
        assert_eq!(logged.len(), 1);
        assert_eq!(
            logged[0],
            "Nested input is not rectangular: inferred [2x2] but found 3 leaves"
        );

        let b = StridedArray::from_nested_with(&ragged(), None, None)?;
        assert_eq!(b.storage().len(), 3);
        assert_eq!(warnings().len(), 1);

        // An explicit shape is taken as given.
        StridedArray::from_nested_with(&ragged(), Some(shape![3]), None)?;
        assert!(warnings().is_empty());

        StridedArray::from_nested(&nested!([[1, 2], [3, 4]]));
        assert!(warnings().is_empty());
        Ok(())
    }
}
