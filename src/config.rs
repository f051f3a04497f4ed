use anyhow::{anyhow, Result};
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

use crate::games::falling_letters::Settings;

#[derive(Parser, Debug, Clone)]
#[command(name = "letterfall")]
#[command(about = "Type the falling letters before they reach the bottom")]
pub struct Config {
    /// Letters that can fall (upper-cased on load)
    #[arg(long, env = "LETTERFALL_ALPHABET", default_value = "ABCDEFGHIJKLMNOPQRSTUVWXYZ")]
    pub alphabet: String,

    /// Milliseconds between spawns
    #[arg(long, env = "LETTERFALL_SPAWN_MS", default_value = "800")]
    pub spawn_ms: u64,

    /// Milliseconds between advance ticks
    #[arg(long, env = "LETTERFALL_ADVANCE_MS", default_value = "30")]
    pub advance_ms: u64,

    /// Slowest fall speed, per advance tick (inclusive)
    #[arg(long, env = "LETTERFALL_MIN_SPEED", default_value = "1.0")]
    pub min_speed: f64,

    /// Fastest fall speed, per advance tick (exclusive)
    #[arg(long, env = "LETTERFALL_MAX_SPEED", default_value = "3.0")]
    pub max_speed: f64,

    /// Starting position of new letters
    #[arg(long, env = "LETTERFALL_SPAWN_OFFSET", default_value = "-20", allow_negative_numbers = true)]
    pub spawn_offset: f64,

    /// Playfield height; letters past it are dropped
    #[arg(long, env = "LETTERFALL_BOTTOM", default_value = "600")]
    pub bottom: f64,

    /// Position that ends the game
    #[arg(long, env = "LETTERFALL_GAME_OVER_AT", default_value = "580")]
    pub game_over_at: f64,

    /// Points per match before the multiplier
    #[arg(long, env = "LETTERFALL_POINTS", default_value = "10")]
    pub points: u64,

    /// Seed for a reproducible letter sequence
    #[arg(long, env = "LETTERFALL_SEED")]
    pub seed: Option<u64>,

    /// Write logs here; nothing is logged without it
    #[arg(long, env = "LETTERFALL_LOG_FILE")]
    pub log_file: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "LETTERFALL_LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Write the final game state here as JSON
    #[arg(long)]
    pub final_state: Option<PathBuf>,

    /// Go straight into the game
    #[arg(long)]
    pub skip_title: bool,
}

impl Config {
    pub fn log_level(&self) -> Result<tracing::Level> {
        self.log_level
            .parse()
            .map_err(|_| anyhow!("invalid log level '{}'", self.log_level))
    }

    /// Game settings built from the flags, already validated
    pub fn settings(&self) -> Result<Settings> {
        let settings = Settings {
            alphabet: self
                .alphabet
                .chars()
                .filter(|c| !c.is_whitespace())
                .flat_map(char::to_uppercase)
                .collect(),
            spawn_period: Duration::from_millis(self.spawn_ms),
            advance_period: Duration::from_millis(self.advance_ms),
            speed: self.min_speed..self.max_speed,
            spawn_offset: self.spawn_offset,
            bottom: self.bottom,
            game_over_threshold: self.game_over_at,
            points_per_match: self.points,
        };
        settings.validate()?;
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_settings() {
        let config = Config::try_parse_from(["letterfall"]).unwrap();
        assert_eq!(config.log_level().unwrap(), tracing::Level::INFO);
        assert_eq!(config.settings().unwrap(), Settings::default());
    }

    #[test]
    fn test_overrides() {
        let config = Config::try_parse_from([
            "letterfall",
            "--alphabet", "abc",
            "--spawn-offset", "-40",
            "--spawn-ms", "500",
            "--seed", "9",
        ])
        .unwrap();
        let settings = config.settings().unwrap();

        assert_eq!(settings.alphabet, vec!['A', 'B', 'C']);
        assert_eq!(settings.spawn_offset, -40.0);
        assert_eq!(settings.spawn_period, Duration::from_millis(500));
        assert_eq!(config.seed, Some(9));
    }

    #[test]
    fn test_rejects_bad_values() {
        let empty = Config::try_parse_from(["letterfall", "--alphabet", " "]).unwrap();
        let inverted = Config::try_parse_from(["letterfall", "--game-over-at", "700"]).unwrap();
        let noisy = Config::try_parse_from(["letterfall", "--log-level", "loud"]).unwrap();

        let unbounded = Config::try_parse_from(["letterfall", "--max-speed", "inf"]).unwrap();
        let endless = Config::try_parse_from(["letterfall", "--game-over-at", "NaN"]).unwrap();

        assert!(empty.settings().is_err());
        assert!(inverted.settings().is_err());
        assert!(noisy.log_level().is_err());
        assert!(unbounded.settings().is_err());
        assert!(endless.settings().is_err());
    }
}
