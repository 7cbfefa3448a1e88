use std::path::Path;
use std::time::Duration;

use log::warn;

use crate::ai::{RandomPolicy, SearchParams, TieBreak, Variant};
use crate::error::{BoardError, ConfigError};
use crate::game::{MnkBoard, MIN_NUM_WIN};

/// Top-level application configuration, loadable from TOML.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub board: BoardConfig,
    pub search: SearchConfig,
    pub random: RandomConfig,
}

/// Board shape and placement rule.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    pub rows: usize,
    pub cols: usize,
    pub num_win: usize,
    pub gravity: bool,
}

impl Default for BoardConfig {
    fn default() -> Self {
        BoardConfig {
            rows: 6,
            cols: 7,
            num_win: 4,
            gravity: true,
        }
    }
}

impl BoardConfig {
    pub fn build(&self) -> Result<MnkBoard, BoardError> {
        MnkBoard::new(self.rows, self.cols, self.num_win, self.gravity)
    }
}

/// Settings for the search agent.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub variant: Variant,
    pub time_budget_secs: f64,
    pub soft: bool,
    pub max_depth: Option<usize>,
    pub tie_break: TieBreak,
    /// Seed for tie-breaking; fresh OS entropy when absent
    pub seed: Option<u64>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        let params = SearchParams::default();
        SearchConfig {
            variant: params.variant,
            time_budget_secs: params.time_budget.as_secs_f64(),
            soft: params.soft,
            max_depth: params.max_depth,
            tie_break: params.tie_break,
            seed: None,
        }
    }
}

impl SearchConfig {
    pub fn params(&self) -> SearchParams {
        SearchParams {
            variant: self.variant,
            time_budget: Duration::from_secs_f64(self.time_budget_secs),
            soft: self.soft,
            max_depth: self.max_depth,
            tie_break: self.tie_break,
        }
    }
}

/// Settings for the random opponent.
#[derive(Debug, Clone, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct RandomConfig {
    pub policy: RandomPolicy,
    pub seed: Option<u64>,
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: AppConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file, falling back to defaults if the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            warn!("config file '{}' not found, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.board.num_win < MIN_NUM_WIN {
            return Err(ConfigError::Validation(format!(
                "board.num_win must be >= {MIN_NUM_WIN}"
            )));
        }
        self.board.build()?;

        let secs = self.search.time_budget_secs;
        if !secs.is_finite() || secs <= 0.0 {
            return Err(ConfigError::Validation(
                "search.time_budget_secs must be > 0".into(),
            ));
        }
        if secs > 86_400.0 {
            return Err(ConfigError::Validation(
                "search.time_budget_secs must be at most one day".into(),
            ));
        }
        if self.search.max_depth == Some(0) {
            return Err(ConfigError::Validation(
                "search.max_depth must be >= 1".into(),
            ));
        }

        Ok(())
    }

    /// Generate a TOML string with all default values (useful for creating
    /// example config files).
    pub fn default_toml() -> String {
        toml::to_string_pretty(&AppConfig::default()).expect("default config serializes")
    }
}
