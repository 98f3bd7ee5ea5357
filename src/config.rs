use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{AppError, AppResult};

#[derive(Debug, Clone, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Config {
    pub view: ViewConfig,
    pub find: FindConfig,
    pub fullscreen: FullscreenConfig,
    pub codecs: CodecConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct ViewConfig {
    pub zoom_step: f32,
    pub min_zoom: f32,
    pub max_zoom: f32,
    pub viewport_width: u32,
    pub viewport_height: u32,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            zoom_step: 1.2,
            min_zoom: 0.25,
            max_zoom: 4.0,
            viewport_width: 1024,
            viewport_height: 768,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct FindConfig {
    pub case_sensitive: bool,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct FullscreenConfig {
    pub find_bar_height: i32,
    pub popup_width: i32,
    pub popup_height: i32,
    pub right_to_left: bool,
}

impl Default for FullscreenConfig {
    fn default() -> Self {
        Self {
            find_bar_height: 32,
            popup_width: 140,
            popup_height: 30,
            right_to_left: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq, Default)]
#[serde(default)]
pub struct CodecConfig {
    pub disabled_mime_types: Vec<String>,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct LoggingConfig {
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "dvw=info".to_string(),
        }
    }
}

impl Config {
    pub fn load() -> AppResult<Self> {
        let Some(path) = default_config_path() else {
            return Ok(Self::default());
        };
        Self::load_from_path(path)
    }

    pub fn load_from_path(path: impl AsRef<Path>) -> AppResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        if !path.is_file() {
            return Err(AppError::invalid_argument(format!(
                "config path is not a regular file: {}",
                path.display()
            )));
        }

        let raw = fs::read_to_string(path).map_err(|source| {
            AppError::io_with_context(source, format!("failed to read config: {}", path.display()))
        })?;
        let parsed = toml::from_str::<Self>(&raw).map_err(|source| {
            AppError::invalid_argument(format!(
                "failed to parse config {}: {source}",
                path.display()
            ))
        })?;
        Ok(parsed.sanitized())
    }

    fn sanitized(mut self) -> Self {
        let defaults = ViewConfig::default();
        if !self.view.zoom_step.is_finite() || self.view.zoom_step <= 1.0 {
            self.view.zoom_step = defaults.zoom_step;
        }
        if !self.view.min_zoom.is_finite() || self.view.min_zoom <= 0.0 {
            self.view.min_zoom = defaults.min_zoom;
        }
        if !self.view.max_zoom.is_finite() || self.view.max_zoom < self.view.min_zoom {
            self.view.max_zoom = defaults.max_zoom.max(self.view.min_zoom);
        }
        self.view.viewport_width = self.view.viewport_width.max(1);
        self.view.viewport_height = self.view.viewport_height.max(1);
        self.fullscreen.find_bar_height = self.fullscreen.find_bar_height.max(0);
        self.fullscreen.popup_width = self.fullscreen.popup_width.max(1);
        self.fullscreen.popup_height = self.fullscreen.popup_height.max(1);
        if self.logging.filter.trim().is_empty() {
            self.logging.filter = LoggingConfig::default().filter;
        }
        self
    }
}

pub fn default_config_path() -> Option<PathBuf> {
    if let Some(explicit) = std::env::var_os("DVW_CONFIG_PATH")
        && !explicit.is_empty()
    {
        return Some(PathBuf::from(explicit));
    }

    if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME")
        && !xdg.is_empty()
    {
        return Some(PathBuf::from(xdg).join("dvw").join("config.toml"));
    }
    if let Some(home) = std::env::var_os("HOME")
        && !home.is_empty()
    {
        return Some(
            PathBuf::from(home)
                .join(".config")
                .join("dvw")
                .join("config.toml"),
        );
    }
    if let Some(appdata) = std::env::var_os("APPDATA")
        && !appdata.is_empty()
    {
        return Some(PathBuf::from(appdata).join("dvw").join("config.toml"));
    }
    None
}

#[cfg(test)]
mod tests {
    use std::fs;

    use crate::error::AppError;
    use crate::test_support::unique_temp_path;

    use super::Config;

    #[test]
    fn load_from_path_returns_defaults_for_missing_file() {
        let missing = unique_temp_path("missing.toml");
        let config = Config::load_from_path(&missing).expect("missing config should fallback");
        assert_eq!(config, Config::default());
    }

    #[test]
    fn load_from_path_applies_partial_overrides_and_sanitizes() {
        let path = unique_temp_path("custom.toml");
        fs::write(
            &path,
            r#"
            [view]
            zoom_step = 0.5
            min_zoom = -1.0
            max_zoom = 8.0
            viewport_width = 0

            [find]
            case_sensitive = true

            [fullscreen]
            find_bar_height = -4
            right_to_left = true

            [codecs]
            disabled_mime_types = ["image/gif"]

            [logging]
            filter = "  "
            "#,
        )
        .expect("config file should be written");

        let config = Config::load_from_path(&path).expect("config should parse");
        assert_eq!(config.view.zoom_step, 1.2);
        assert_eq!(config.view.min_zoom, 0.25);
        assert_eq!(config.view.max_zoom, 8.0);
        assert_eq!(config.view.viewport_width, 1);
        assert_eq!(config.view.viewport_height, 768);
        assert!(config.find.case_sensitive);
        assert_eq!(config.fullscreen.find_bar_height, 0);
        assert_eq!(config.fullscreen.popup_width, 140);
        assert!(config.fullscreen.right_to_left);
        assert_eq!(config.codecs.disabled_mime_types, vec!["image/gif"]);
        assert_eq!(config.logging.filter, "dvw=info");

        fs::remove_file(&path).expect("config file should be removed");
    }

    #[test]
    fn load_from_path_reports_parse_errors() {
        let path = unique_temp_path("broken.toml");
        fs::write(&path, "[view\nzoom_step = ").expect("config file should be written");

        let err = Config::load_from_path(&path).expect_err("broken config should fail");
        assert!(matches!(err, AppError::InvalidArgument(message) if message.contains("failed to parse config")));

        fs::remove_file(&path).expect("config file should be removed");
    }

    #[test]
    fn load_from_path_rejects_directories() {
        let dir = unique_temp_path("config_dir");
        fs::create_dir_all(&dir).expect("test directory should be created");

        assert!(matches!(
            Config::load_from_path(&dir),
            Err(AppError::InvalidArgument(_))
        ));

        fs::remove_dir_all(&dir).expect("test directory should be removed");
    }
}
