// Copyright 2022 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use log::{Level, Metadata, Record, SetLoggerError};

/// Writes `<timestamp> <LEVEL> [<label>] <message>` lines. Errors and
/// warnings go to stderr, everything else to stdout.
pub struct Logger {
    label: String,
    level: Level,
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl Logger {
    pub fn new() -> Self {
        Self {
            label: env!("CARGO_PKG_NAME").to_owned(),
            level: Level::Info,
        }
    }

    pub fn label(mut self, label: &str) -> Self {
        self.label = label.to_owned();
        self
    }

    pub fn level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// install as the global logger
    pub fn init(self) -> Result<(), SetLoggerError> {
        let level = self.level;
        log::set_boxed_logger(Box::new(self))?;
        log::set_max_level(level.to_level_filter());
        Ok(())
    }

    fn format(&self, record: &Record) -> String {
        // module path is only useful when debugging
        let target = if record.level() >= Level::Debug {
            record.target()
        } else {
            self.label.as_str()
        };
        format!(
            "{} {:<5} [{}] {}",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
            record.level(),
            target,
            record.args()
        )
    }
}

impl log::Log for Logger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let line = self.format(record);
            if record.level() <= Level::Warn {
                eprintln!("{}", line);
            } else {
                println!("{}", line);
            }
        }
    }

    fn flush(&self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use log::Log;

    #[test]
    fn filters_by_level() {
        let logger = Logger::new().level(Level::Info);
        let info = Metadata::builder().level(Level::Info).build();
        let debug = Metadata::builder().level(Level::Debug).build();
        assert!(logger.enabled(&info));
        assert!(!logger.enabled(&debug));
    }

    #[test]
    fn line_format() {
        let logger = Logger::new().label("perf_graph");
        let line = logger.format(
            &Record::builder()
                .level(Level::Info)
                .target("solver_perf::series")
                .args(format_args!("Saving chart"))
                .build(),
        );
        assert!(line.ends_with("INFO  [perf_graph] Saving chart"), "{}", line);

        let line = logger.format(
            &Record::builder()
                .level(Level::Debug)
                .target("solver_perf::series")
                .args(format_args!("loading"))
                .build(),
        );
        assert!(line.ends_with("DEBUG [solver_perf::series] loading"), "{}", line);
    }
}
