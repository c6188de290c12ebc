//! Game configuration.
//!
//! Values come from, in increasing priority: built-in defaults, an optional
//! JSON file named by `MATCH3_CONFIG`, and individual environment variables.
//!
//! | Variable | Field | Example |
//! |----------|-------|---------|
//! | `MATCH3_WIDTH` | `width` | `8` |
//! | `MATCH3_HEIGHT` | `height` | `6` |
//! | `MATCH3_PALETTE` | `palette` | `red,blue,green` |
//! | `MATCH3_SETTLE_MS` | `settle_delay_ms` | `500` |
//! | `MATCH3_SEED` | `seed` | `42` |

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::{ColorPalette, GameActivity, GridError, SwapCoordinator};
use crate::types::{Color, TileLayout, DEFAULT_HEIGHT, DEFAULT_WIDTH, SETTLE_DELAY_MS};

pub const CONFIG_PATH_VAR: &str = "MATCH3_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("reading config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parsing config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid value for {var}: {value:?}")]
    InvalidEnv { var: &'static str, value: String },

    #[error("unknown color {0:?}")]
    UnknownColor(String),

    #[error(transparent)]
    Grid(#[from] GridError),
}

/// Game setup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    pub width: u16,
    pub height: u16,
    /// Color names, parsed case-insensitively
    pub palette: Vec<String>,
    pub settle_delay_ms: u32,
    /// Fixed seed for reproducible grids; random when absent
    pub seed: Option<u64>,
    pub tile_w: f32,
    pub tile_h: f32,
    pub spacing: f32,
}

impl Default for GameConfig {
    fn default() -> Self {
        let layout = TileLayout::default();
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            palette: ColorPalette::classic()
                .colors()
                .iter()
                .map(|c| c.as_str().to_string())
                .collect(),
            settle_delay_ms: SETTLE_DELAY_MS,
            seed: None,
            tile_w: layout.tile_w,
            tile_h: layout.tile_h,
            spacing: layout.spacing,
        }
    }
}

impl GameConfig {
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(s)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    /// Defaults, then `MATCH3_CONFIG`, then per-field variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Same as [`GameConfig::from_env`] with an injectable variable source
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |var: &str| {
            lookup(var)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };

        let mut config = match get(CONFIG_PATH_VAR) {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };

        if let Some(v) = get("MATCH3_WIDTH") {
            config.width = parse_var("MATCH3_WIDTH", v)?;
        }
        if let Some(v) = get("MATCH3_HEIGHT") {
            config.height = parse_var("MATCH3_HEIGHT", v)?;
        }
        if let Some(v) = get("MATCH3_PALETTE") {
            config.palette = v
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }
        if let Some(v) = get("MATCH3_SETTLE_MS") {
            config.settle_delay_ms = parse_var("MATCH3_SETTLE_MS", v)?;
        }
        if let Some(v) = get("MATCH3_SEED") {
            config.seed = Some(parse_var("MATCH3_SEED", v)?);
        }

        Ok(config)
    }

    /// Parse the palette names
    pub fn palette(&self) -> Result<ColorPalette, ConfigError> {
        let colors = self
            .palette
            .iter()
            .map(|name| Color::from_str(name).ok_or_else(|| ConfigError::UnknownColor(name.clone())))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(ColorPalette::new(colors)?)
    }

    pub fn layout(&self) -> TileLayout {
        TileLayout {
            tile_w: self.tile_w,
            tile_h: self.tile_h,
            spacing: self.spacing,
        }
    }

    /// Generate a coordinator from this configuration
    pub fn build<A: GameActivity>(&self, activity: A) -> Result<SwapCoordinator<A>, ConfigError> {
        let game = SwapCoordinator::generate(
            self.width,
            self.height,
            self.palette()?,
            activity,
            self.seed,
        )?;
        Ok(game.with_settle_delay(self.settle_delay_ms))
    }
}

fn parse_var<T: std::str::FromStr>(var: &'static str, value: String) -> Result<T, ConfigError> {
    value
        .parse()
        .map_err(|_| ConfigError::InvalidEnv { var, value })
}
