use crate::error::Error;
use crate::render::Color;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable pointing at a JSON config file
pub const CONFIG_ENV: &str = "RLWM_CONFIG";
const DEFAULT_CONFIG_FILE: &str = "rlwm.json";

/// Colors used by the window chrome and the taskbar
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Theme {
    pub window_bg: Color,
    pub window_text: Color,
    pub title_bg: Color,
    pub title_unfocused: Color,
    pub title_text: Color,
    pub taskbar_bg: Color,
    pub taskbar_text: Color,
    pub shadow: Color,
    pub shadow_offset: (i32, i32),
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            window_bg: Color::rgb(192, 176, 176),
            window_text: Color::rgb(0, 0, 0),
            title_bg: Color::rgb(64, 80, 144),
            title_unfocused: Color::rgb(80, 80, 96),
            title_text: Color::rgb(255, 255, 255),
            taskbar_bg: Color::rgb(192, 176, 176),
            taskbar_text: Color::rgb(0, 0, 0),
            shadow: Color::rgba(0, 0, 0, 128),
            shadow_offset: (2, 2),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub screen_width: u32,
    pub screen_height: u32,
    /// Screen pixels per render unit
    pub scale: f32,
    /// Number of regular window slots
    pub window_limit: usize,
    pub target_fps: u32,
    pub tiled_background: bool,
    /// Show the move/resize state in the top-left corner
    pub debug_move_resize: bool,
    /// Outline the rectangle of every window-local text draw
    pub debug_window_text: bool,
    pub log_file: PathBuf,
    pub theme: Theme,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            screen_width: 1024,
            screen_height: 768,
            scale: 2.0,
            window_limit: 8,
            target_fps: 60,
            tiled_background: true,
            debug_move_resize: false,
            debug_window_text: false,
            log_file: PathBuf::from("rlwm.log"),
            theme: Theme::default(),
        }
    }
}

impl Config {
    /// Logical render-space size every core coordinate lives in
    pub fn render_size(&self) -> (i32, i32) {
        (
            (self.screen_width as f32 / self.scale) as i32,
            (self.screen_height as f32 / self.scale) as i32,
        )
    }

    /// Load and validate a JSON config file
    pub fn load(path: &Path) -> Result<Self, Error> {
        let text = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&text).map_err(|source| Error::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// `$RLWM_CONFIG`, then `./rlwm.json`. None means built-in defaults.
    pub fn discover_path() -> Option<PathBuf> {
        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            return Some(PathBuf::from(path));
        }
        let local = Path::new(DEFAULT_CONFIG_FILE);
        local.exists().then(|| local.to_path_buf())
    }

    pub fn validate(&self) -> Result<(), Error> {
        if self.window_limit == 0 {
            return Err(Error::InvalidConfig("window_limit must be at least 1".into()));
        }
        if !(self.scale > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "scale must be positive, got {}",
                self.scale
            )));
        }
        let (w, h) = self.render_size();
        if w < 160 || h < 120 {
            return Err(Error::InvalidConfig(format!(
                "render area {}x{} is smaller than 160x120",
                w, h
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_render_size() {
        let config = Config::default();
        assert_eq!(config.render_size(), (512, 384));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config: Config =
            serde_json::from_str(r#"{ "window_limit": 3, "theme": { "title_bg": { "r": 1, "g": 2, "b": 3 } } }"#)
                .unwrap();
        assert_eq!(config.window_limit, 3);
        assert_eq!(config.screen_width, 1024);
        assert_eq!(config.theme.title_bg, Color::rgb(1, 2, 3));
        assert_eq!(config.theme.title_text, Theme::default().title_text);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let zero = Config {
            window_limit: 0,
            ..Config::default()
        };
        assert!(matches!(zero.validate(), Err(Error::InvalidConfig(_))));

        let tiny = Config {
            scale: 16.0,
            ..Config::default()
        };
        assert!(matches!(tiny.validate(), Err(Error::InvalidConfig(_))));
    }

    #[test]
    fn test_load_reports_parse_errors() {
        let path = std::env::temp_dir().join(format!("rlwm-bad-{}.json", uuid::Uuid::new_v4()));
        std::fs::write(&path, "{ not json").unwrap();
        let result = Config::load(&path);
        let _ = std::fs::remove_file(&path);
        assert!(matches!(result, Err(Error::ConfigParse { .. })));
    }

    #[test]
    fn test_load_validates() {
        let path = std::env::temp_dir().join(format!("rlwm-zero-{}.json", uuid::Uuid::new_v4()));
        std::fs::write(&path, r#"{ "window_limit": 0 }"#).unwrap();
        let result = Config::load(&path);
        let _ = std::fs::remove_file(&path);
        assert!(matches!(result, Err(Error::InvalidConfig(_))));
    }
}
