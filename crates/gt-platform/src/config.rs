//! Engine configuration.

use crate::logging::LoggingConfig;
use crate::window::{BackendKind, WindowConfig};

/// Environment variable selecting the window backend (`auto`, `x11`, `winit`, `headless`).
pub const ENV_WINDOW_BACKEND: &str = "GT_WINDOW_BACKEND";

/// Environment variable overriding the target frame rate (`0` = uncapped).
pub const ENV_TARGET_FPS: &str = "GT_TARGET_FPS";

/// Everything the engine needs to bring the platform layer up.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub window: WindowConfig,

    /// Frame pacing target. `0` runs uncapped.
    pub target_fps: u32,

    pub backend: BackendKind,
    pub logging: LoggingConfig,

    /// Log every function resolved from platform libraries.
    pub verbose_modules: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            target_fps: 60,
            backend: BackendKind::Auto,
            logging: LoggingConfig::default(),
            verbose_modules: false,
        }
    }
}

impl EngineConfig {
    pub fn with_window(mut self, title: impl Into<String>, width: u32, height: u32) -> Self {
        self.window = WindowConfig { title: title.into(), width, height };
        self
    }

    /// Applies overrides from the process environment.
    pub fn from_env(self) -> Self {
        self.apply_overrides(|name| std::env::var(name).ok())
    }

    /// Applies overrides looked up through `var`. Invalid values are logged and ignored.
    pub fn apply_overrides(mut self, var: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(value) = var(ENV_WINDOW_BACKEND) {
            match value.parse::<BackendKind>() {
                Ok(kind) => self.backend = kind,
                Err(e) => log::warn!("ignoring {ENV_WINDOW_BACKEND}: {e}"),
            }
        }

        if let Some(value) = var(ENV_TARGET_FPS) {
            match value.trim().parse::<u32>() {
                Ok(fps) => self.target_fps = fps,
                Err(e) => log::warn!("ignoring {ENV_TARGET_FPS}={value:?}: {e}"),
            }
        }

        self
    }
}
