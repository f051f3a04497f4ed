use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tracing::info;

use crate::{Context, Game};
use super::registry::LetterId;
use super::rng::SpawnRng;
use super::settings::Settings;
use super::state::{GameState, Snapshot};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallTimer {
    Spawn,
    Advance,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FallEvent {
    Spawned { id: LetterId, glyph: char, speed: f64 },
    Matched { id: LetterId, glyph: char, points: u64, multiplier: u64 },
    /// Letters that slipped out the bottom, for accounting only
    Escaped { ids: Vec<LetterId> },
    GameOver { score: u64, multiplier: u64 },
}

/// Falling letters wired up to the engine's timers and keyboard
pub struct FallingLettersGame<R> {
    state: GameState,
    rng: R,
}

impl<R: SpawnRng> FallingLettersGame<R> {
    pub fn new(settings: Settings, rng: R) -> Self {
        Self { state: GameState::new(settings), rng }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    fn spawn(&mut self, ctx: &Context<FallEvent>) {
        if let Some(letter) = self.state.spawn(&mut self.rng) {
            ctx.emit(FallEvent::Spawned { id: letter.id, glyph: letter.glyph, speed: letter.speed });
        }
    }

    fn advance(&mut self, ctx: &Context<FallEvent>) {
        let Some(tick) = self.state.advance() else { return };

        if !tick.escaped.is_empty() {
            ctx.emit(FallEvent::Escaped { ids: tick.escaped.iter().map(|l| l.id).collect() });
        }

        if tick.game_over {
            let (score, multiplier) = (self.state.score(), self.state.multiplier());
            info!(score, multiplier, "letter reached the bottom, game over");
            ctx.emit(FallEvent::GameOver { score, multiplier });
        }
    }

    fn press(&mut self, key: char, ctx: &Context<FallEvent>) {
        if let Some(hit) = self.state.press(key) {
            ctx.emit(FallEvent::Matched {
                id: hit.id,
                glyph: hit.glyph,
                points: hit.points,
                multiplier: hit.multiplier,
            });
        }
    }
}

impl<R: SpawnRng + Send + 'static> Game for FallingLettersGame<R> {
    type Timer = FallTimer;
    type Event = FallEvent;
    type Snapshot = Snapshot;

    fn timers(&self) -> Vec<(FallTimer, Duration)> {
        let settings = self.state.settings();
        vec![
            (FallTimer::Spawn, settings.spawn_period),
            (FallTimer::Advance, settings.advance_period),
        ]
    }

    fn on_timer(&mut self, timer: FallTimer, ctx: &Context<FallEvent>) {
        match timer {
            FallTimer::Spawn => self.spawn(ctx),
            FallTimer::Advance => self.advance(ctx),
        }
    }

    fn handle_input(&mut self, event: KeyEvent, ctx: &Context<FallEvent>) {
        if event.kind != KeyEventKind::Press {
            return;
        }
        if event.modifiers.intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) {
            return;
        }

        if let KeyCode::Char(c) = event.code {
            self.press(c, ctx);
        }
    }

    fn is_finished(&self) -> bool {
        self.state.is_over()
    }

    fn snapshot(&self) -> Snapshot {
        self.state.snapshot()
    }
}
