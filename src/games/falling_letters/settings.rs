use std::ops::Range;
use std::time::Duration;

use anyhow::{anyhow, Result};

/// Tunables for one falling-letters session
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub alphabet: Vec<char>,
    pub spawn_period: Duration,
    pub advance_period: Duration,
    /// Half-open range fall speeds are drawn from
    pub speed: Range<f64>,
    /// Where new letters start, just above the visible top
    pub spawn_offset: f64,
    /// Letters at or past this position are dropped silently
    pub bottom: f64,
    /// Any letter at or past this position ends the game
    pub game_over_threshold: f64,
    /// Base points, multiplied by the current multiplier
    pub points_per_match: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            alphabet: ('A'..='Z').collect(),
            spawn_period: Duration::from_millis(800),
            advance_period: Duration::from_millis(30),
            speed: 1.0..3.0,
            spawn_offset: -20.0,
            bottom: 600.0,
            game_over_threshold: 580.0,
            points_per_match: 10,
        }
    }
}

impl Settings {
    pub fn validate(&self) -> Result<()> {
        let bounds = [
            ("speed start", self.speed.start),
            ("speed end", self.speed.end),
            ("spawn offset", self.spawn_offset),
            ("bottom boundary", self.bottom),
            ("game over threshold", self.game_over_threshold),
        ];
        if let Some((name, value)) = bounds.iter().find(|(_, v)| !v.is_finite()) {
            return Err(anyhow!("{name} must be a finite number, got {value}"));
        }

        if self.alphabet.is_empty() {
            return Err(anyhow!("alphabet cannot be empty"));
        }

        if self.spawn_period.is_zero() || self.advance_period.is_zero() {
            return Err(anyhow!("spawn and advance periods must be greater than 0"));
        }

        if !(self.speed.start > 0.0 && self.speed.start < self.speed.end) {
            return Err(anyhow!(
                "speed range {}..{} must be non-empty and positive",
                self.speed.start,
                self.speed.end
            ));
        }

        if self.game_over_threshold >= self.bottom {
            return Err(anyhow!(
                "game over threshold ({}) must be below the bottom boundary ({})",
                self.game_over_threshold,
                self.bottom
            ));
        }

        if self.spawn_offset >= self.game_over_threshold {
            return Err(anyhow!(
                "spawn offset ({}) must be above the game over threshold ({})",
                self.spawn_offset,
                self.game_over_threshold
            ));
        }

        if self.points_per_match == 0 {
            return Err(anyhow!("points per match must be greater than 0"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.alphabet.len(), 26);
        assert_eq!(settings.spawn_period, Duration::from_millis(800));
        assert_eq!(settings.advance_period, Duration::from_millis(30));
    }

    #[test]
    fn test_rejects_threshold_past_bottom() {
        let settings = Settings { game_over_threshold: 600.0, ..Settings::default() };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_rejects_bad_speed_range() {
        let empty = Settings { speed: 2.0..2.0, ..Settings::default() };
        let negative = Settings { speed: -1.0..2.0, ..Settings::default() };
        assert!(empty.validate().is_err());
        assert!(negative.validate().is_err());
    }

    #[test]
    fn test_rejects_non_finite_values() {
        let cases = [
            Settings { speed: 1.0..f64::INFINITY, ..Settings::default() },
            Settings { speed: f64::NAN..3.0, ..Settings::default() },
            Settings { spawn_offset: f64::NEG_INFINITY, ..Settings::default() },
            Settings { bottom: f64::NAN, ..Settings::default() },
            Settings { bottom: f64::INFINITY, ..Settings::default() },
            Settings { game_over_threshold: f64::NAN, ..Settings::default() },
        ];

        for settings in cases {
            assert!(settings.validate().is_err(), "accepted {settings:?}");
        }
    }

    #[test]
    fn test_rejects_empty_alphabet_and_zero_period() {
        let no_letters = Settings { alphabet: vec![], ..Settings::default() };
        let frozen = Settings { advance_period: Duration::ZERO, ..Settings::default() };
        assert!(no_letters.validate().is_err());
        assert!(frozen.validate().is_err());
    }
}
