use crate::core::game::{Context, Game};
use crossterm::event::KeyEvent;
use futures_util::future::select_all;
use tokio::sync::{mpsc, watch};
use tokio::time::{interval_at, Instant, Interval, MissedTickBehavior};
use tracing::{debug, info};

/// Everything the outside world can feed into a running engine
#[derive(Debug, Clone)]
pub enum Input {
    Key(KeyEvent),
    Quit,
}

/// Single-threaded driver for a [`Game`].
///
/// Timer ticks and key presses are handled one at a time, each handler
/// running to completion before the next event is looked at. A snapshot is
/// published after every handler.
pub struct Engine<G: Game> {
    game: G,
    inputs: mpsc::UnboundedReceiver<Input>,
    snapshots: watch::Sender<G::Snapshot>,
}

impl<G: Game> Engine<G> {
    pub fn new(game: G, inputs: mpsc::UnboundedReceiver<Input>) -> Self {
        let (snapshots, _) = watch::channel(game.snapshot());
        Self { game, inputs, snapshots }
    }

    /// Receiver for the snapshots published while running
    pub fn subscribe(&self) -> watch::Receiver<G::Snapshot> {
        self.snapshots.subscribe()
    }

    /// Runs until `Input::Quit` arrives or every input sender is gone, then
    /// hands the game back.
    pub async fn run(mut self) -> G {
        let (outbox_tx, mut outbox_rx) = mpsc::unbounded_channel::<G::Event>();
        let ctx = Context::new(outbox_tx);

        let mut timers = if self.game.is_finished() { Vec::new() } else { start_timers(&self.game) };
        info!(timers = timers.len(), "engine started");

        loop {
            tokio::select! {
                biased;

                input = self.inputs.recv() => match input {
                    Some(Input::Key(key)) => self.game.handle_input(key, &ctx),
                    Some(Input::Quit) | None => {
                        info!("quit requested, stopping engine");
                        break;
                    }
                },

                timer = next_tick(&mut timers) => {
                    self.game.on_timer(timer, &ctx);
                }
            }

            while let Ok(event) = outbox_rx.try_recv() {
                debug!(?event, "game event");
            }

            if self.game.is_finished() && !timers.is_empty() {
                info!("game finished, cancelling timers");
                timers.clear();
            }

            self.snapshots.send_replace(self.game.snapshot());
        }

        self.game
    }
}

fn start_timers<G: Game>(game: &G) -> Vec<(G::Timer, Interval)> {
    game.timers()
        .into_iter()
        .map(|(timer, period)| {
            // First tick lands one full period after start
            let mut interval = interval_at(Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            (timer, interval)
        })
        .collect()
}

/// Resolves with whichever timer fires next. Never resolves without timers.
async fn next_tick<T: Copy>(timers: &mut [(T, Interval)]) -> T {
    if timers.is_empty() {
        return std::future::pending().await;
    }

    let ticks = timers.iter_mut().map(|(timer, interval)| {
        Box::pin(async move {
            interval.tick().await;
            *timer
        })
    });
    let (timer, _, _) = select_all(ticks).await;
    timer
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};
    use std::time::Duration;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Beat {
        Slow,
        Fast,
    }

    /// Counts ticks per timer and finishes after `limit` fast ticks.
    #[derive(Default)]
    struct Metronome {
        slow: u32,
        fast: u32,
        keys: u32,
        limit: u32,
    }

    impl Game for Metronome {
        type Timer = Beat;
        type Event = Beat;
        type Snapshot = (u32, u32, u32);

        fn timers(&self) -> Vec<(Beat, Duration)> {
            vec![(Beat::Slow, Duration::from_millis(100)), (Beat::Fast, Duration::from_millis(10))]
        }

        fn on_timer(&mut self, timer: Beat, ctx: &Context<Beat>) {
            match timer {
                Beat::Slow => self.slow += 1,
                Beat::Fast => self.fast += 1,
            }
            ctx.emit(timer);
        }

        fn handle_input(&mut self, _event: KeyEvent, _ctx: &Context<Beat>) {
            self.keys += 1;
        }

        fn is_finished(&self) -> bool {
            self.fast >= self.limit
        }

        fn snapshot(&self) -> (u32, u32, u32) {
            (self.slow, self.fast, self.keys)
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_timers_fire_on_their_own_periods() {
        let (tx, rx) = mpsc::unbounded_channel();
        let engine = Engine::new(Metronome { limit: u32::MAX, ..Default::default() }, rx);
        let snapshots = engine.subscribe();
        let handle = tokio::spawn(engine.run());

        tokio::time::sleep(Duration::from_millis(305)).await;
        let (slow, fast, _) = *snapshots.borrow();
        assert_eq!(slow, 3);
        assert_eq!(fast, 30);

        tx.send(Input::Quit).unwrap();
        handle.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_finished_game_stops_ticking() {
        let (tx, rx) = mpsc::unbounded_channel();
        let engine = Engine::new(Metronome { limit: 5, ..Default::default() }, rx);
        let snapshots = engine.subscribe();
        let handle = tokio::spawn(engine.run());

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert_eq!(snapshots.borrow().1, 5);

        tx.send(Input::Key(KeyEvent::new(KeyCode::Char('x'), KeyModifiers::NONE))).unwrap();
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert_eq!(*snapshots.borrow(), (0, 5, 1));

        drop(tx);
        let game = handle.await.unwrap();
        assert_eq!(game.fast, 5);
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropping_inputs_stops_engine() {
        let (tx, rx) = mpsc::unbounded_channel::<Input>();
        let engine = Engine::new(Metronome { limit: u32::MAX, ..Default::default() }, rx);
        drop(tx);

        let game = engine.run().await;
        assert_eq!(game.keys, 0);
    }
}
