use ::log::{LevelFilter, Log, Metadata, Record};

/// Logger that writes to stderr so that stdout stays machine-readable.
struct PaceLogger {
    level: LevelFilter,
}

impl Log for PaceLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!("[{:<5}] {}", record.level(), record.args());
        }
    }

    fn flush(&self) {}
}

pub fn build_pace_logger_for_level(level: LevelFilter) {
    // a second registration (e.g. from tests) is a no-op
    if ::log::set_boxed_logger(Box::new(PaceLogger { level })).is_ok() {
        ::log::set_max_level(level);
    }
}

/// Increases the base level by `verbosity` many steps (-v, -vv, ...).
pub fn build_pace_logger_for_verbosity(base: LevelFilter, verbosity: u8) {
    let levels = [
        LevelFilter::Off,
        LevelFilter::Error,
        LevelFilter::Warn,
        LevelFilter::Info,
        LevelFilter::Debug,
        LevelFilter::Trace,
    ];

    let base_idx = levels.iter().position(|&l| l == base).unwrap_or(0);
    let level = levels[(base_idx + verbosity as usize).min(levels.len() - 1)];
    build_pace_logger_for_level(level);
}
