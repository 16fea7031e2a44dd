//! Configuration for landscapes and game rules.
//!
//! YAML configuration files with sensible defaults, mirroring the two
//! environments the original game shipped: `easy` (20 moves, staying put
//! allowed) and `hard` (50 moves, no staying in place).

use crate::error::GameError;
use crate::field::{Field, Gaussian};
use crate::grid::Grid;
use crate::visibility::Variant;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub landscape: LandscapeConfig,
    pub game: GameConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Landscape/discretization configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LandscapeConfig {
    /// Matrix rows (row 0 = top = maximum y)
    pub rows: usize,
    /// Matrix columns (column 0 = minimum x)
    pub cols: usize,
    /// Continuous region the grid discretizes
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
    /// Gaussian peaks summed into the scalar field
    pub peaks: Vec<Gaussian>,
}

/// Game-rule configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    /// Observability variant code (0..=3)
    pub variant: u8,
    /// Move budget per game
    pub max_moves: u32,
    /// Whether `Stay` is a legal move
    pub allow_stay: bool,
    /// Fixed starting (row, col); random placement when absent
    #[serde(default)]
    pub start: Option<(i64, i64)>,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self::easy()
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// The gentle environment: one broad peak, 20 moves, staying allowed.
    pub fn easy() -> Self {
        Self {
            landscape: LandscapeConfig {
                rows: 20,
                cols: 20,
                x_min: -3.0,
                x_max: 3.0,
                y_min: -3.0,
                y_max: 3.0,
                peaks: vec![Gaussian {
                    amplitude: 100.0,
                    x0: 0.0,
                    y0: 0.0,
                    sigma_x: 1.0,
                    sigma_y: 1.0,
                }],
            },
            game: GameConfig {
                variant: Variant::Rearview.code(),
                max_moves: 20,
                allow_stay: true,
                start: None,
            },
            logging: LoggingConfig::default(),
        }
    }

    /// The rugged environment: several uneven peaks, 50 moves, and the
    /// no-staying-in-place rule.
    pub fn hard() -> Self {
        Self {
            landscape: LandscapeConfig {
                rows: 20,
                cols: 20,
                x_min: -3.0,
                x_max: 3.0,
                y_min: -3.0,
                y_max: 3.0,
                peaks: vec![
                    Gaussian {
                        amplitude: 80.0,
                        x0: -1.5,
                        y0: 1.5,
                        sigma_x: 0.6,
                        sigma_y: 0.6,
                    },
                    Gaussian {
                        amplitude: 120.0,
                        x0: 1.8,
                        y0: -1.2,
                        sigma_x: 0.5,
                        sigma_y: 0.9,
                    },
                    Gaussian {
                        amplitude: 60.0,
                        x0: 0.2,
                        y0: 2.4,
                        sigma_x: 1.2,
                        sigma_y: 0.4,
                    },
                ],
            },
            game: GameConfig {
                variant: Variant::Rearview.code(),
                max_moves: 50,
                allow_stay: false,
                start: None,
            },
            logging: LoggingConfig::default(),
        }
    }

    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, GameError> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a YAML file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), GameError> {
        let yaml = serde_yaml::to_string(self)?;
        std::fs::write(path, yaml)?;
        Ok(())
    }

    /// Validate configuration values. Nothing is silently defaulted; every
    /// malformed value is rejected here, at construction time.
    pub fn validate(&self) -> Result<(), GameError> {
        let l = &self.landscape;
        if l.rows == 0 || l.cols == 0 {
            return Err(GameError::InvalidParameter(
                "landscape rows/cols must be > 0".to_string(),
            ));
        }
        if !(l.x_max > l.x_min) || !(l.y_max > l.y_min) {
            return Err(GameError::InvalidParameter(
                "landscape coordinate range must be non-empty".to_string(),
            ));
        }
        if l.peaks.is_empty() {
            return Err(GameError::InvalidParameter(
                "landscape needs at least one peak".to_string(),
            ));
        }
        for peak in &l.peaks {
            // Re-run the constructor checks; deserialization bypasses them.
            Gaussian::new(peak.amplitude, peak.x0, peak.y0, peak.sigma_x, peak.sigma_y)?;
        }
        Variant::from_code(self.game.variant)?;
        if self.game.max_moves == 0 {
            return Err(GameError::InvalidParameter(
                "max_moves must be > 0".to_string(),
            ));
        }
        Ok(())
    }

    /// The configured observability variant.
    pub fn variant(&self) -> Result<Variant, GameError> {
        Variant::from_code(self.game.variant)
    }

    /// Assemble the scalar field from the configured peaks.
    pub fn build_field(&self) -> Result<Field, GameError> {
        let mut terms = Vec::with_capacity(self.landscape.peaks.len());
        for peak in &self.landscape.peaks {
            terms.push(Gaussian::new(
                peak.amplitude,
                peak.x0,
                peak.y0,
                peak.sigma_x,
                peak.sigma_y,
            )?);
        }
        Field::new(terms)
    }

    /// Discretize the configured field into a grid.
    pub fn build_grid(&self) -> Result<Grid, GameError> {
        let field = self.build_field()?;
        let l = &self.landscape;
        Grid::build(
            |x, y| field.sample(x, y),
            l.rows,
            l.cols,
            l.x_min,
            l.x_max,
            l.y_min,
            l.y_max,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_valid() {
        assert!(Config::default().validate().is_ok());
        assert!(Config::easy().validate().is_ok());
        assert!(Config::hard().validate().is_ok());
    }

    #[test]
    fn test_presets_match_deployment() {
        assert_eq!(Config::easy().game.max_moves, 20);
        assert_eq!(Config::hard().game.max_moves, 50);
        assert!(Config::easy().game.allow_stay);
        assert!(!Config::hard().game.allow_stay);
    }

    #[test]
    fn test_config_roundtrip() {
        let config = Config::hard();
        let yaml = serde_yaml::to_string(&config).unwrap();
        let loaded: Config = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(config.landscape.rows, loaded.landscape.rows);
        assert_eq!(config.landscape.peaks, loaded.landscape.peaks);
        assert_eq!(config.game.max_moves, loaded.game.max_moves);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = Config::easy();
        config.game.variant = 7;
        assert!(config.validate().is_err());

        let mut config = Config::easy();
        config.landscape.peaks[0].sigma_x = 0.0;
        assert!(config.validate().is_err());

        let mut config = Config::easy();
        config.landscape.peaks.clear();
        assert!(config.validate().is_err());

        let mut config = Config::easy();
        config.game.max_moves = 0;
        assert!(config.validate().is_err());

        let mut config = Config::easy();
        config.landscape.rows = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_build_grid_from_config() {
        let grid = Config::easy().build_grid().unwrap();
        assert_eq!(grid.rows(), 20);
        assert_eq!(grid.cols(), 20);
        assert!(grid.max_value() > grid.min_value());
    }
}
