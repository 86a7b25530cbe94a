use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use ratatui::style::Color;
use ratatui::symbols::border;
use serde::Deserialize;
use thiserror::Error;

const APP_DIR_NAME: &str = "grid-snake";
const CONFIG_FILE_NAME: &str = "config.json";

/// Side length of the default square board.
pub const GRID_SIZE: u16 = 20;

/// Tick interval at score zero, in milliseconds.
pub const INITIAL_SPEED_MS: u64 = 150;

/// Floor for the tick interval, in milliseconds.
pub const MIN_SPEED_MS: u64 = 50;

/// Interval reduction applied per speed step, in milliseconds.
pub const SPEED_STEP_MS: u64 = 10;

/// Score needed per speed step.
pub const POINTS_PER_SPEED_STEP: u32 = 30;

/// Score granted per food eaten.
pub const FOOD_POINTS: u32 = 10;

/// Segment count of the snake after a reset.
pub const INITIAL_SNAKE_LENGTH: u16 = 3;

/// Smallest board that still fits the starting snake below the center cell.
pub const MIN_GRID_SIZE: u16 = 5;

/// Logical grid dimensions passed through the game as a named type.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct GridSize {
    pub width: u16,
    pub height: u16,
}

impl GridSize {
    /// Creates a square grid with `size` cells per side.
    #[must_use]
    pub fn square(size: u16) -> Self {
        Self {
            width: size,
            height: size,
        }
    }

    /// Returns the total number of cells in the grid.
    #[must_use]
    pub fn total_cells(self) -> usize {
        usize::from(self.width) * usize::from(self.height)
    }

    /// Grows each side up to [`MIN_GRID_SIZE`] so the starting snake and its
    /// food always fit.
    #[must_use]
    pub fn playable(self) -> Self {
        Self {
            width: self.width.max(MIN_GRID_SIZE),
            height: self.height.max(MIN_GRID_SIZE),
        }
    }
}

impl Default for GridSize {
    fn default() -> Self {
        Self::square(GRID_SIZE)
    }
}

/// Errors raised while loading or validating a [`GameConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid config: {0}")]
    Invalid(String),
}

impl From<ConfigError> for io::Error {
    fn from(error: ConfigError) -> Self {
        let kind = match &error {
            ConfigError::Io { source, .. } => source.kind(),
            ConfigError::Parse { .. } => io::ErrorKind::InvalidData,
            ConfigError::Invalid(_) => io::ErrorKind::InvalidInput,
        };
        io::Error::new(kind, error)
    }
}

/// Runtime settings for one session.
///
/// Every field is optional in the JSON file; missing fields fall back to the
/// compiled-in constants.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    /// Cells per side of the square board.
    pub grid_size: u16,
    pub initial_speed_ms: u64,
    pub min_speed_ms: u64,
    /// Fixed RNG seed for reproducible food placement.
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_size: GRID_SIZE,
            initial_speed_ms: INITIAL_SPEED_MS,
            min_speed_ms: MIN_SPEED_MS,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Loads and validates a config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let config: Self = serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Loads the per-user config file, or defaults when it does not exist.
    pub fn load_default() -> Result<Self, ConfigError> {
        match default_config_path() {
            Some(path) if path.is_file() => Self::load(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Checks that the settings describe a playable board and a sane speed curve.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_size < MIN_GRID_SIZE {
            return Err(ConfigError::Invalid(format!(
                "grid_size must be at least {MIN_GRID_SIZE}, got {}",
                self.grid_size
            )));
        }

        if self.min_speed_ms == 0 {
            return Err(ConfigError::Invalid(
                "min_speed_ms must be greater than zero".to_owned(),
            ));
        }

        if self.min_speed_ms > self.initial_speed_ms {
            return Err(ConfigError::Invalid(format!(
                "min_speed_ms ({}) must not exceed initial_speed_ms ({})",
                self.min_speed_ms, self.initial_speed_ms
            )));
        }

        Ok(())
    }

    /// Board for this config, never smaller than [`MIN_GRID_SIZE`].
    #[must_use]
    pub fn bounds(&self) -> GridSize {
        GridSize::square(self.grid_size).playable()
    }

    /// Returns the scheduler interval for the given score.
    ///
    /// `max(min, initial - floor(score / 30) * 10)` milliseconds.
    #[must_use]
    pub fn tick_interval(&self, score: u32) -> Duration {
        let steps = u64::from(score / POINTS_PER_SPEED_STEP);
        let penalty_ms = steps.saturating_mul(SPEED_STEP_MS);
        let clamped_ms = self
            .initial_speed_ms
            .saturating_sub(penalty_ms)
            .max(self.min_speed_ms);
        Duration::from_millis(clamped_ms)
    }
}

/// Returns the platform-correct per-user config path, if the platform has one.
#[must_use]
pub fn default_config_path() -> Option<PathBuf> {
    let mut base = dirs::config_dir()?;
    base.push(APP_DIR_NAME);
    base.push(CONFIG_FILE_NAME);
    Some(base)
}

/// Colors applied to the play area and overlays.
#[derive(Debug)]
pub struct Theme {
    pub snake_head: Color,
    pub snake_body: Color,
    pub snake_tail: Color,
    pub food: Color,
    pub play_bg: Color,
    pub border_fg: Color,
    pub border_bg: Color,
    pub hud_value: Color,
    pub hud_label: Color,
    pub menu_title: Color,
    pub menu_footer: Color,
}

pub const THEME: Theme = Theme {
    snake_head: Color::White,
    snake_body: Color::Green,
    snake_tail: Color::DarkGray,
    food: Color::Red,
    play_bg: Color::Black,
    border_fg: Color::White,
    border_bg: Color::DarkGray,
    hud_value: Color::White,
    hud_label: Color::DarkGray,
    menu_title: Color::Green,
    menu_footer: Color::DarkGray,
};

/// Half-block border set: solid side faces the play area.
pub const BORDER_HALF_BLOCK: border::Set = border::Set {
    top_left: "▄",
    top_right: "▄",
    bottom_left: "▀",
    bottom_right: "▀",
    vertical_left: "█",
    vertical_right: "█",
    horizontal_top: "▄",
    horizontal_bottom: "▀",
};

/// Each logical cell is two terminal columns wide so the board looks square.
pub const CELL_WIDTH: u16 = 2;

pub const GLYPH_SNAKE_HEAD: &str = "██";
pub const GLYPH_SNAKE_BODY: &str = "▓▓";
pub const GLYPH_SNAKE_TAIL: &str = "▒▒";
pub const GLYPH_FOOD: &str = "●";

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;
    use std::time::{Duration, SystemTime, UNIX_EPOCH};

    use super::{
        ConfigError, GameConfig, GridSize, GRID_SIZE, INITIAL_SPEED_MS, MIN_GRID_SIZE, MIN_SPEED_MS,
    };

    #[test]
    fn default_grid_is_twenty_by_twenty() {
        let bounds = GameConfig::default().bounds();
        assert_eq!(bounds, GridSize::square(GRID_SIZE));
        assert_eq!(bounds.total_cells(), 400);
    }

    #[test]
    fn tick_interval_steps_down_every_thirty_points() {
        let config = GameConfig::default();

        assert_eq!(config.tick_interval(0), Duration::from_millis(INITIAL_SPEED_MS));
        assert_eq!(config.tick_interval(20), Duration::from_millis(INITIAL_SPEED_MS));
        assert_eq!(config.tick_interval(30), Duration::from_millis(INITIAL_SPEED_MS - 10));
        assert_eq!(config.tick_interval(90), Duration::from_millis(INITIAL_SPEED_MS - 30));
    }

    #[test]
    fn tick_interval_never_drops_below_floor() {
        let config = GameConfig::default();

        assert_eq!(config.tick_interval(10_000), Duration::from_millis(MIN_SPEED_MS));
        assert_eq!(config.tick_interval(u32::MAX), Duration::from_millis(MIN_SPEED_MS));
    }

    #[test]
    fn partial_config_file_keeps_defaults() {
        let path = unique_test_path("partial");
        write_test_file(&path, r#"{ "grid_size": 12, "seed": 9 }"#);

        let config = GameConfig::load(&path).expect("partial config should load");

        assert_eq!(config.grid_size, 12);
        assert_eq!(config.seed, Some(9));
        assert_eq!(config.initial_speed_ms, INITIAL_SPEED_MS);
        cleanup_test_path(&path);
    }

    #[test]
    fn malformed_config_file_returns_parse_error() {
        let path = unique_test_path("malformed");
        write_test_file(&path, "not-json");

        let result = GameConfig::load(&path);

        assert!(matches!(result, Err(ConfigError::Parse { .. })));
        cleanup_test_path(&path);
    }

    #[test]
    fn missing_config_file_returns_io_error() {
        let path = unique_test_path("missing");

        assert!(matches!(
            GameConfig::load(&path),
            Err(ConfigError::Io { .. })
        ));
    }

    #[test]
    fn bounds_are_raised_to_the_playable_minimum() {
        for grid_size in [0, 1, 3, 4] {
            let config = GameConfig {
                grid_size,
                ..GameConfig::default()
            };
            assert_eq!(config.bounds(), GridSize::square(MIN_GRID_SIZE));
        }

        let wide = GridSize {
            width: 12,
            height: 2,
        };
        assert_eq!(
            wide.playable(),
            GridSize {
                width: 12,
                height: MIN_GRID_SIZE
            }
        );
    }

    #[test]
    fn tiny_grid_is_rejected() {
        let config = GameConfig {
            grid_size: 4,
            ..GameConfig::default()
        };

        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn inverted_speed_range_is_rejected() {
        let config = GameConfig {
            initial_speed_ms: 40,
            min_speed_ms: 80,
            ..GameConfig::default()
        };

        assert!(config.validate().is_err());
    }

    fn unique_test_path(label: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time should be after epoch")
            .as_nanos();

        std::env::temp_dir()
            .join("grid-snake-config-tests")
            .join(format!("{label}-{nanos}.json"))
    }

    fn write_test_file(path: &PathBuf, contents: &str) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("test parent directory should be creatable");
        }
        fs::write(path, contents).expect("test file write should succeed");
    }

    fn cleanup_test_path(path: &PathBuf) {
        let _ = fs::remove_file(path);
    }
}
