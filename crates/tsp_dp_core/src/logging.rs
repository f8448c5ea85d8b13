use std::{fs::File, io::Write};

use env_logger::{Builder, Target, WriteStyle, fmt::Formatter};
use log::{Level, Record};

use crate::options::{LogFormat, SolverOptions};
use crate::{Error, Result};

/// Installs the global logger described by `--log-*` options. Fails if a logger is
/// already installed.
pub fn init_logger(options: &SolverOptions) -> Result<()> {
    let format = options.log_format;
    let timestamp = options.log_timestamp;

    let mut builder = Builder::new();
    builder
        .filter_level(options.log_level.to_filter())
        .write_style(WriteStyle::Never)
        .format(move |buf, record| write_record(buf, record, format, timestamp))
        .target(log_target(options)?);

    builder
        .try_init()
        .map_err(|e| Error::other(format!("logger init failed: {e}")))
}

fn log_target(options: &SolverOptions) -> Result<Target> {
    let Some(path) = options.log_output_path() else {
        return Ok(Target::Stderr);
    };

    let file = File::create(path).map_err(|e| {
        Error::other(format!(
            "failed to create log output file {}: {e}",
            path.display()
        ))
    })?;
    Ok(Target::Pipe(Box::new(file)))
}

fn write_record(
    buf: &mut Formatter,
    record: &Record<'_>,
    format: LogFormat,
    timestamp: bool,
) -> std::io::Result<()> {
    if timestamp {
        write!(buf, "{} ", buf.timestamp_millis())?;
    }

    let tag = level_tag(record.level());
    match format {
        LogFormat::Compact => writeln!(buf, "{tag} {}", record.args()),
        LogFormat::Pretty => writeln!(buf, "{tag} [{}] {}", record.target(), record.args()),
    }
}

fn level_tag(level: Level) -> &'static str {
    match level {
        Level::Error => "ERROR",
        Level::Warn => "WARN",
        Level::Info => "INFO",
        Level::Debug => "DEBUG",
        Level::Trace => "TRACE",
    }
}

#[cfg(test)]
mod tests {
    use log::Level;

    use super::{level_tag, log_target};
    use crate::SolverOptions;

    #[test]
    fn level_tags_are_upper_case() {
        assert_eq!(level_tag(Level::Error), "ERROR");
        assert_eq!(level_tag(Level::Warn), "WARN");
        assert_eq!(level_tag(Level::Trace), "TRACE");
    }

    #[test]
    fn log_target_reports_unwritable_path() {
        let options = SolverOptions {
            log_output: "/nonexistent-dir/tsp-dp/run.log".to_string(),
            ..SolverOptions::default()
        };
        let err = log_target(&options).expect_err("unwritable path should fail");
        assert!(err.to_string().contains("failed to create log output file"));
    }
}
