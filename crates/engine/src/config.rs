//! Game configuration.

use std::env;

use tracing::warn;

use crate::types::TARGET_FPS;

/// Environment variable overriding the frame rate cap.
pub const FPS_ENV: &str = "TUI_SPRITE_FPS";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    pub title: String,
    pub columns: u16,
    pub rows: u16,
    /// Frame rate cap; `None` or `Some(0)` runs ticks back to back.
    pub fps_limit: Option<u32>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            title: "tui-sprite".to_string(),
            columns: 80,
            rows: 24,
            fps_limit: Some(TARGET_FPS),
        }
    }
}

impl GameConfig {
    pub fn new(title: impl Into<String>, columns: u16, rows: u16) -> Self {
        Self {
            title: title.into(),
            columns,
            rows,
            ..Self::default()
        }
    }

    pub fn with_fps_limit(mut self, fps_limit: Option<u32>) -> Self {
        self.fps_limit = fps_limit;
        self
    }

    /// Apply `TUI_SPRITE_FPS` when set.
    pub fn with_env_overrides(self) -> Self {
        let value = env::var(FPS_ENV).ok();
        self.with_fps_override(value.as_deref())
    }

    fn with_fps_override(mut self, value: Option<&str>) -> Self {
        let Some(value) = value else {
            return self;
        };
        match value.trim().parse::<u32>() {
            Ok(0) => self.fps_limit = None,
            Ok(fps) => self.fps_limit = Some(fps),
            Err(_) => warn!(value, "ignoring invalid {}", FPS_ENV),
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_to_target_fps() {
        let config = GameConfig::new("demo", 10, 5);
        assert_eq!(config.fps_limit, Some(60));
        assert_eq!((config.columns, config.rows), (10, 5));
    }

    #[test]
    fn test_fps_override_parses_and_disables() {
        let base = GameConfig::default();
        assert_eq!(base.clone().with_fps_override(Some("30")).fps_limit, Some(30));
        assert_eq!(base.clone().with_fps_override(Some("0")).fps_limit, None);
        assert_eq!(base.clone().with_fps_override(Some("fast")).fps_limit, Some(60));
        assert_eq!(base.with_fps_override(None).fps_limit, Some(60));
    }
}
