//! Runtime configuration.
//!
//! # Responsibility
//! - Describe chart geometry, timing and palette.
//! - Resolve store and logging locations.
//! - Load JSON config files and apply `SPENDPIE_*` environment overrides.
//!
//! # Invariants
//! - A loaded config has passed `validate()`.
//! - Defaults reproduce the 300x300 donut with Set2 colors.

use crate::chart::color::{Rgb, SET2};
use crate::logging::default_log_level;
use serde::Deserialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const ENV_DB_PATH: &str = "SPENDPIE_DB_PATH";
pub const ENV_LOG_LEVEL: &str = "SPENDPIE_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "SPENDPIE_LOG_DIR";
const DEFAULT_DB_FILE_NAME: &str = "spendpie.sqlite3";

#[derive(Debug)]
pub enum ConfigError {
    Io { path: PathBuf, source: std::io::Error },
    Parse(serde_json::Error),
    Invalid(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "failed to read config `{}`: {source}", path.display())
            }
            Self::Parse(err) => write!(f, "invalid config json: {err}"),
            Self::Invalid(message) => write!(f, "invalid config: {message}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse(err) => Some(err),
            Self::Invalid(_) => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(value: serde_json::Error) -> Self {
        Self::Parse(value)
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SpendPieConfig {
    pub chart: ChartConfig,
    pub store: StoreConfig,
    pub log: LogConfig,
}

/// Geometry, timing and colors of the donut chart.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ChartConfig {
    pub width: f64,
    pub height: f64,
    pub radius: f64,
    /// Inner radius as a fraction of `radius`.
    pub inner_radius_ratio: f64,
    pub transition_ms: u64,
    pub hover_ms: u64,
    pub highlight_color: String,
    pub stroke_color: String,
    pub stroke_width: f64,
    pub legend_text_color: String,
    pub legend_shape_padding: f64,
    pub legend_shape_radius: f64,
    pub palette: Vec<String>,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: 300.0,
            height: 300.0,
            radius: 150.0,
            inner_radius_ratio: 0.5,
            transition_ms: 800,
            hover_ms: 300,
            highlight_color: "#333".to_string(),
            stroke_color: "white".to_string(),
            stroke_width: 3.0,
            legend_text_color: "white".to_string(),
            legend_shape_padding: 10.0,
            legend_shape_radius: 6.0,
            palette: SET2.iter().map(|hex| (*hex).to_string()).collect(),
        }
    }
}

impl ChartConfig {
    pub fn transition(&self) -> Duration {
        Duration::from_millis(self.transition_ms)
    }

    pub fn hover_transition(&self) -> Duration {
        Duration::from_millis(self.hover_ms)
    }

    pub fn inner_radius(&self) -> f64 {
        self.radius * self.inner_radius_ratio
    }

    /// Chart group origin inside the SVG canvas.
    pub fn center(&self) -> (f64, f64) {
        (self.width / 2.0 + 5.0, self.height / 2.0 + 5.0)
    }

    /// Legend group origin inside the SVG canvas.
    pub fn legend_origin(&self) -> (f64, f64) {
        (self.width + 30.0, 10.0)
    }

    /// Full SVG canvas size (chart plus legend margin).
    pub fn canvas_size(&self) -> (f64, f64) {
        (self.width + 150.0, self.height + 150.0)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.radius.is_finite() && self.radius > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "chart.radius must be > 0, got {}",
                self.radius
            )));
        }
        if !(0.0..1.0).contains(&self.inner_radius_ratio) {
            return Err(ConfigError::Invalid(format!(
                "chart.inner_radius_ratio must be in [0, 1), got {}",
                self.inner_radius_ratio
            )));
        }
        if self.palette.is_empty() {
            return Err(ConfigError::Invalid("chart.palette cannot be empty".to_string()));
        }
        let named = [
            ("chart.highlight_color", &self.highlight_color),
            ("chart.stroke_color", &self.stroke_color),
            ("chart.legend_text_color", &self.legend_text_color),
        ];
        let palette = self.palette.iter().map(|color| ("chart.palette", color));
        for (field, color) in named.into_iter().chain(palette) {
            if Rgb::parse(color).is_none() {
                return Err(ConfigError::Invalid(format!(
                    "{field}: `{color}` is not a CSS color"
                )));
            }
        }
        Ok(())
    }
}

/// Location of the bundled SQLite expense store.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StoreConfig {
    pub db_path: Option<PathBuf>,
    /// Maximum change-log entries delivered per feed poll.
    pub batch_limit: Option<u32>,
}

impl StoreConfig {
    /// Configured path, or `spendpie.sqlite3` under the temp dir.
    pub fn resolve_db_path(&self) -> PathBuf {
        self.db_path
            .clone()
            .unwrap_or_else(|| std::env::temp_dir().join(DEFAULT_DB_FILE_NAME))
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LogConfig {
    pub level: String,
    /// Absolute directory for rolling log files; logging stays off when unset.
    pub dir: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level().to_string(),
            dir: None,
        }
    }
}

impl SpendPieConfig {
    /// Parses and validates a JSON document.
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.chart.validate()?;
        Ok(config)
    }

    /// Reads and validates a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&raw)
    }

    /// Applies `SPENDPIE_*` overrides from the process environment.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Applies overrides from an arbitrary key lookup; blank values are ignored.
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let lookup = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        if let Some(path) = lookup(ENV_DB_PATH) {
            self.store.db_path = Some(PathBuf::from(path));
        }
        if let Some(level) = lookup(ENV_LOG_LEVEL) {
            self.log.level = level;
        }
        if let Some(dir) = lookup(ENV_LOG_DIR) {
            self.log.dir = Some(PathBuf::from(dir));
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::{ChartConfig, ConfigError, SpendPieConfig, ENV_DB_PATH, ENV_LOG_LEVEL};
    use std::path::PathBuf;
    use std::time::Duration;

    #[test]
    fn defaults_match_reference_layout() {
        let chart = ChartConfig::default();
        assert_eq!(chart.inner_radius(), 75.0);
        assert_eq!(chart.center(), (155.0, 155.0));
        assert_eq!(chart.legend_origin(), (330.0, 10.0));
        assert_eq!(chart.canvas_size(), (450.0, 450.0));
        assert_eq!(chart.transition(), Duration::from_millis(800));
        assert_eq!(chart.palette.len(), 8);
        chart.validate().unwrap();
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config =
            SpendPieConfig::from_json_str(r#"{ "chart": { "radius": 100 } }"#).unwrap();
        assert_eq!(config.chart.radius, 100.0);
        assert_eq!(config.chart.width, 300.0);
        assert_eq!(config.store.db_path, None);
    }

    #[test]
    fn invalid_palette_is_rejected() {
        let err = SpendPieConfig::from_json_str(r#"{ "chart": { "palette": ["teal", "tael"] } }"#)
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(message) if message.contains("`tael`")));
    }

    #[test]
    fn named_css_colors_are_accepted_for_every_color_field() {
        let config = SpendPieConfig::from_json_str(
            r##"{ "chart": {
                "highlight_color": "black",
                "stroke_color": "rgb(250, 250, 250)",
                "legend_text_color": "ivory",
                "palette": ["teal", "#fc8d62"]
            } }"##,
        )
        .unwrap();
        assert_eq!(config.chart.highlight_color, "black");
        assert_eq!(config.chart.palette.len(), 2);
    }

    #[test]
    fn stroke_and_legend_colors_are_validated() {
        for field in ["stroke_color", "legend_text_color"] {
            let json = format!(r#"{{ "chart": {{ "{field}": "chalk" }} }}"#);
            let err = SpendPieConfig::from_json_str(&json).unwrap_err();
            assert!(
                matches!(&err, ConfigError::Invalid(message) if message.contains(field)),
                "{field}: {err}"
            );
        }
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let err = SpendPieConfig::from_json_str(r#"{ "charts": {} }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn overrides_skip_blank_values() {
        let config = SpendPieConfig::default().with_overrides(|key| match key {
            ENV_DB_PATH => Some("/tmp/expenses.db".to_string()),
            ENV_LOG_LEVEL => Some("   ".to_string()),
            _ => None,
        });
        assert_eq!(config.store.db_path, Some(PathBuf::from("/tmp/expenses.db")));
        assert_eq!(config.log.level, SpendPieConfig::default().log.level);
    }
}
