//! Logging utilities.
//!
//! Console logging goes through the standard `log` facade with an
//! `env_logger` backend. Lines are tagged and coloured per level and mirrored
//! to a log file. `Success` and `Fatal` have no `log::Level`; they ride on
//! dedicated targets, reachable through [`log_success!`](crate::log_success)
//! and [`log_fatal!`](crate::log_fatal).

mod init;
mod level;

pub use init::{init_logging, LoggingConfig};
pub use level::{format_line, LogLevel, FAST_TARGET, FATAL_TARGET, SUCCESS_TARGET};

/// Logs at the `Success` level.
#[macro_export]
macro_rules! log_success {
    ($($arg:tt)+) => {
        ::log::info!(target: $crate::logging::SUCCESS_TARGET, $($arg)+)
    };
}

/// Logs at the `Fatal` level.
#[macro_export]
macro_rules! log_fatal {
    ($($arg:tt)+) => {
        ::log::error!(target: $crate::logging::FATAL_TARGET, $($arg)+)
    };
}

/// Logs an info line to the console only, skipping the log file.
///
/// Meant for per-frame chatter that would bloat the file.
#[macro_export]
macro_rules! log_fast {
    ($($arg:tt)+) => {
        ::log::info!(target: $crate::logging::FAST_TARGET, $($arg)+)
    };
}
