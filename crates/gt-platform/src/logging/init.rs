use std::fs::File;
use std::io::{self, LineWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, Once};

use super::level::{format_line, LogLevel, FAST_TARGET};

/// Logger configuration.
///
/// `env_filter` follows the `env_logger` filter syntax (e.g. "info", "warn",
/// "gt_platform=debug").
///
/// `write_style` controls ANSI coloring behavior.
///
/// `log_file` receives a plain copy of every line except console-only ones.
/// It is truncated when logging starts.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub env_filter: Option<String>,
    pub write_style: env_logger::WriteStyle,
    pub log_file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            env_filter: None,
            write_style: env_logger::WriteStyle::Auto,
            log_file: Some(PathBuf::from("LogFile.txt")),
        }
    }
}

type FileSink = Arc<Mutex<LineWriter<File>>>;

static INIT: Once = Once::new();

/// Initializes the global logger once.
///
/// This function is idempotent; subsequent calls are ignored.
/// Intended usage is early in `main`.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let (sink, file_error) = match &config.log_file {
            Some(path) => match open_sink(path) {
                Ok(sink) => (Some(sink), None),
                Err(e) => (None, Some((path.clone(), e))),
            },
            None => (None, None),
        };

        if logger_builder(&config, sink).try_init().is_err() {
            // Another logger owns the facade; leave it in place.
            return;
        }

        if let Some((path, e)) = file_error {
            log::warn!("cannot open log file {}: {e}", path.display());
        }
        log::debug!("logging initialized");
    });
}

fn open_sink(path: &Path) -> io::Result<FileSink> {
    Ok(Arc::new(Mutex::new(LineWriter::new(File::create(path)?))))
}

fn logger_builder(config: &LoggingConfig, sink: Option<FileSink>) -> env_logger::Builder {
    let mut builder = env_logger::Builder::new();

    if let Some(filter) = &config.env_filter {
        builder.parse_filters(filter);
    } else if let Ok(filter) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filter);
    } else {
        builder.filter_level(log::LevelFilter::Info);
    }

    builder.write_style(config.write_style);
    builder.format(move |buf, record| write_record(buf, sink.as_ref(), record));
    builder
}

/// Writes one coloured console line and mirrors it to the log file.
fn write_record(buf: &mut impl Write, sink: Option<&FileSink>, record: &log::Record<'_>) -> io::Result<()> {
    let level = LogLevel::of(record.level(), record.target());
    let context = record.file().zip(record.line());
    let line = format_line(level, record.args(), context);

    let style = level.style();
    writeln!(buf, "{style}{line}{style:#}")?;

    if mirrors(record.target()) {
        mirror(sink, &line);
    }
    Ok(())
}

/// Console-only records stay out of the log file.
fn mirrors(target: &str) -> bool {
    target != FAST_TARGET
}

fn mirror(sink: Option<&FileSink>, line: &str) {
    let Some(sink) = sink else {
        return;
    };
    // File errors never reach the console logger.
    if let Ok(mut file) = sink.lock() {
        let _ = writeln!(file, "{line}");
    }
}

#[cfg(test)]
mod tests {
    use std::io::Read;

    use log::{Level, Log, Metadata, Record};

    use super::*;
    use crate::logging::{FATAL_TARGET, SUCCESS_TARGET};

    fn temp_log(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("gt-log-{name}-{}.txt", std::process::id()))
    }

    fn read(path: &Path) -> String {
        let mut text = String::new();
        File::open(path).unwrap().read_to_string(&mut text).unwrap();
        text
    }

    fn record<'a>(target: &'a str, level: Level, args: std::fmt::Arguments<'a>) -> Record<'a> {
        Record::builder().target(target).level(level).args(args).build()
    }

    #[test]
    fn default_config_writes_log_file() {
        let config = LoggingConfig::default();
        assert_eq!(config.log_file.as_deref(), Some(Path::new("LogFile.txt")));
        assert!(config.env_filter.is_none());
    }

    #[test]
    fn mirror_appends_plain_lines() {
        let path = temp_log("mirror");
        let sink = open_sink(&path).unwrap();

        mirror(Some(&sink), "[LOG INFO] => one");
        mirror(Some(&sink), "[LOG ERROR] => two src/a.rs:3");
        mirror(None, "dropped");
        drop(sink);

        assert_eq!(read(&path), "[LOG INFO] => one\n[LOG ERROR] => two src/a.rs:3\n");
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn fast_records_reach_console_but_not_file() {
        let path = temp_log("fast");
        let sink = open_sink(&path).unwrap();
        let mut console = Vec::new();

        write_record(&mut console, Some(&sink), &record("gt_platform::window", Level::Info, format_args!("alpha")))
            .unwrap();
        write_record(&mut console, Some(&sink), &record(FAST_TARGET, Level::Info, format_args!("beta"))).unwrap();
        write_record(&mut console, Some(&sink), &record(SUCCESS_TARGET, Level::Info, format_args!("gamma")))
            .unwrap();
        drop(sink);

        let console = String::from_utf8(console).unwrap();
        assert!(console.contains("[LOG INFO] => alpha"));
        assert!(console.contains("[LOG INFO] => beta"));
        assert!(console.contains("[LOG SUCCESS] => gamma"));

        assert_eq!(read(&path), "[LOG INFO] => alpha\n[LOG SUCCESS] => gamma\n");
        assert!(!mirrors(FAST_TARGET));
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn crate_filter_keeps_engine_levels() {
        let config = LoggingConfig { env_filter: Some("gt_platform=debug".into()), log_file: None, ..Default::default() };
        let logger = logger_builder(&config, None).build();

        for (target, level) in [(FATAL_TARGET, Level::Error), (SUCCESS_TARGET, Level::Info), (FAST_TARGET, Level::Info)] {
            let metadata = Metadata::builder().target(target).level(level).build();
            assert!(logger.enabled(&metadata), "{target} filtered out");
        }

        let foreign = Metadata::builder().target("wgpu_core").level(Level::Error).build();
        assert!(!logger.enabled(&foreign));
    }
}
