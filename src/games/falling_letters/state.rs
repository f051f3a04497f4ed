//! Falling-letters state machine.
//!
//! All mutation goes through [`GameState::spawn`], [`GameState::advance`] and
//! [`GameState::press`]. Each call is a single step over `&mut self`, so a
//! caller that serialises them (the engine loop does) never observes a half
//! applied transition. Once the phase flips to [`Phase::Over`] every one of
//! them becomes a no-op and the last frame stays frozen.

use serde::Serialize;

use super::registry::{Letter, LetterId, Registry};
use super::rng::SpawnRng;
use super::score::ScoreBoard;
use super::settings::Settings;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Phase {
    Running,
    Over,
}

/// Result of one advance tick
#[derive(Debug, Clone, PartialEq)]
pub struct Advance {
    /// Letters that left through the bottom this tick. No penalty.
    pub escaped: Vec<Letter>,
    /// The tick that ended the game
    pub game_over: bool,
}

/// Result of a key press that hit a letter
#[derive(Debug, Clone, PartialEq)]
pub struct Hit {
    pub id: LetterId,
    pub glyph: char,
    pub points: u64,
    /// Multiplier after this hit
    pub multiplier: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LetterView {
    pub id: LetterId,
    pub glyph: char,
    pub position: f64,
}

/// Read-only view handed to the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub letters: Vec<LetterView>,
    pub score: u64,
    pub multiplier: u64,
    pub is_over: bool,
    /// Playfield height, used to scale positions on screen
    pub bottom: f64,
}

#[derive(Debug)]
pub struct GameState {
    settings: Settings,
    registry: Registry,
    scores: ScoreBoard,
    phase: Phase,
}

impl GameState {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            registry: Registry::new(),
            scores: ScoreBoard::default(),
            phase: Phase::Running,
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn score(&self) -> u64 {
        self.scores.score()
    }

    pub fn multiplier(&self) -> u64 {
        self.scores.multiplier()
    }

    pub fn is_over(&self) -> bool {
        self.phase == Phase::Over
    }

    /// Spawn timer: drops one new letter in above the top edge.
    pub fn spawn(&mut self, rng: &mut impl SpawnRng) -> Option<Letter> {
        if self.is_over() {
            return None;
        }

        let glyph = rng.pick_glyph(&self.settings.alphabet);
        let speed = rng.pick_speed(&self.settings.speed);
        let id = self.registry.insert(glyph, self.settings.spawn_offset, speed);

        Some(Letter { id, glyph, position: self.settings.spawn_offset, speed })
    }

    /// Advance timer: moves every letter by its own speed, silently drops
    /// whatever fell through the bottom, then runs the game-over check on
    /// the letters that are left.
    pub fn advance(&mut self) -> Option<Advance> {
        if self.is_over() {
            return None;
        }

        for letter in self.registry.iter_mut() {
            letter.position += letter.speed;
        }

        let bottom = self.settings.bottom;
        let escaped = self.registry.remove_where(|l| l.position >= bottom);

        let game_over = self.check_game_over();

        Some(Advance { escaped, game_over })
    }

    /// Flips to `Over` if any live letter reached the threshold. Returns true
    /// only on the call that made the transition.
    pub fn check_game_over(&mut self) -> bool {
        if self.is_over() {
            return false;
        }

        let threshold = self.settings.game_over_threshold;
        if self.registry.iter().any(|l| l.position >= threshold) {
            self.phase = Phase::Over;
            return true;
        }
        false
    }

    /// Key press: consumes the oldest letter showing the key, if any.
    pub fn press(&mut self, key: char) -> Option<Hit> {
        if self.is_over() {
            return None;
        }

        let glyph = normalize_key(key)?;
        let id = self.registry.find_first_by_glyph(glyph)?.id;
        self.registry.remove_by_id(id)?;
        let points = self.scores.record_match(self.settings.points_per_match);

        Some(Hit { id, glyph, points, multiplier: self.scores.multiplier() })
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            letters: self
                .registry
                .iter()
                .map(|l| LetterView { id: l.id, glyph: l.glyph, position: l.position })
                .collect(),
            score: self.scores.score(),
            multiplier: self.scores.multiplier(),
            is_over: self.is_over(),
            bottom: self.settings.bottom,
        }
    }
}

/// Upper-cases a key press. Keys whose upper case is not a single char
/// can never match a glyph.
pub fn normalize_key(key: char) -> Option<char> {
    let mut upper = key.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(c), None) => Some(c),
        _ => None,
    }
}
