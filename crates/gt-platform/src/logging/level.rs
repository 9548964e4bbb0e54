use std::fmt;

use env_logger::fmt::style::{AnsiColor, Style};

/// Target carrying `Success` records.
///
/// Targets sit under the crate path so `gt_platform=<level>` filters cover them.
pub const SUCCESS_TARGET: &str = "gt_platform::success";

/// Target carrying `Fatal` records.
pub const FATAL_TARGET: &str = "gt_platform::fatal";

/// Target for console-only records.
pub const FAST_TARGET: &str = "gt_platform::fast";

/// Engine log levels, as printed in the line tag.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum LogLevel {
    Debug,
    Info,
    Success,
    Warning,
    Error,
    Fatal,
}

impl LogLevel {
    /// Resolves the engine level of a `log` record.
    pub fn of(level: log::Level, target: &str) -> Self {
        match (level, target) {
            (_, SUCCESS_TARGET) => LogLevel::Success,
            (_, FATAL_TARGET) => LogLevel::Fatal,
            (log::Level::Error, _) => LogLevel::Error,
            (log::Level::Warn, _) => LogLevel::Warning,
            (log::Level::Info, _) => LogLevel::Info,
            (log::Level::Debug | log::Level::Trace, _) => LogLevel::Debug,
        }
    }

    pub fn tag(self) -> &'static str {
        match self {
            LogLevel::Debug => "[LOG DEBUG] =>",
            LogLevel::Info => "[LOG INFO] =>",
            LogLevel::Success => "[LOG SUCCESS] =>",
            LogLevel::Warning => "[LOG WARNING] =>",
            LogLevel::Error => "[LOG ERROR] =>",
            LogLevel::Fatal => "[LOG FATAL] =>",
        }
    }

    /// Console colour of the whole line.
    pub fn style(self) -> Style {
        match self {
            LogLevel::Debug => AnsiColor::BrightBlack.on_default(),
            LogLevel::Info => AnsiColor::BrightWhite.on_default(),
            LogLevel::Success => AnsiColor::BrightGreen.on_default(),
            LogLevel::Warning => AnsiColor::BrightYellow.on_default(),
            LogLevel::Error => AnsiColor::BrightRed.on_default(),
            LogLevel::Fatal => AnsiColor::Red.on_default(),
        }
    }

    /// Info lines are printed without their source location.
    pub fn shows_context(self) -> bool {
        self != LogLevel::Info
    }
}

/// Renders one log line without colour or trailing newline.
pub fn format_line(level: LogLevel, message: &fmt::Arguments<'_>, context: Option<(&str, u32)>) -> String {
    match context {
        Some((file, line)) if level.shows_context() => {
            format!("{} {} {}:{}", level.tag(), message, file, line)
        }
        _ => format!("{} {}", level.tag(), message),
    }
}
