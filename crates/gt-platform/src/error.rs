//! Error types for the platform layer.

use thiserror::Error;

/// Errors raised while bringing up platform services.
#[derive(Error, Debug)]
pub enum PlatformError {
    /// A shared library could not be opened.
    #[error("failed to load module `{name}`: {source}")]
    ModuleLoad {
        name: String,
        #[source]
        source: libloading::Error,
    },

    /// None of the candidate library names could be opened.
    #[error("no loadable module among {0:?}")]
    ModuleNotFound(Vec<String>),

    /// A module loaded but lacks functions the caller cannot work without.
    #[error("module `{module}` is missing required symbols: {missing:?}")]
    MissingSymbols {
        module: String,
        missing: Vec<&'static str>,
    },

    /// The display server refused the connection.
    #[error("cannot open display")]
    DisplayUnavailable,

    /// Window creation or management errors
    #[error("window error: {0}")]
    Window(String),

    /// The requested window backend is not compiled for this target.
    #[error("window backend `{0}` is not available on this platform")]
    BackendUnavailable(&'static str),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias using the platform's error type.
pub type Result<T> = std::result::Result<T, PlatformError>;
