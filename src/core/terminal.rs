/// Terminal plumbing: keyboard listener, render loop and the glue that runs
/// an engine between them
use std::time::Duration;

use anyhow::{anyhow, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::DefaultTerminal;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::core::engine::{Engine, Input};
use crate::core::game::{Game, Renderer};

const INPUT_POLL: Duration = Duration::from_millis(50);
const REDRAW: Duration = Duration::from_millis(250);

/// Esc or Ctrl+C. Letters can't be quit keys since any of them may be a glyph.
pub fn is_quit(key: &KeyEvent) -> bool {
    key.kind == KeyEventKind::Press
        && (key.code == KeyCode::Esc
            || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL)))
}

/// Forwards key presses to the engine until it drops its receiver.
pub fn spawn_key_listener(tx: mpsc::UnboundedSender<Input>) -> JoinHandle<Result<()>> {
    tokio::task::spawn_blocking(move || -> Result<()> {
        while !tx.is_closed() {
            if !event::poll(INPUT_POLL)? {
                continue;
            }

            if let Event::Key(key) = event::read()? {
                let input = if is_quit(&key) { Input::Quit } else { Input::Key(key) };
                if tx.send(input).is_err() {
                    break;
                }
            }
        }
        debug!("key listener released");
        Ok(())
    })
}

/// Redraws on every snapshot and every `REDRAW` (to pick up resizes).
/// Ends when the snapshot sender goes away and hands the terminal back.
pub fn spawn_render_loop<S, R>(
    mut terminal: DefaultTerminal,
    mut snapshots: watch::Receiver<S>,
) -> JoinHandle<Result<DefaultTerminal>>
where
    S: Clone + Send + Sync + 'static,
    R: Renderer<S> + 'static,
{
    tokio::spawn(async move {
        let mut redraw = tokio::time::interval(REDRAW);
        loop {
            let snapshot = snapshots.borrow_and_update().clone();
            terminal.draw(|f| R::render(f, &snapshot))?;

            tokio::select! {
                changed = snapshots.changed() => {
                    if changed.is_err() {
                        break;
                    }
                }
                _ = redraw.tick() => {}
            }
        }
        Ok::<_, anyhow::Error>(terminal)
    })
}

/// Runs `game` against the real keyboard and terminal until the player quits.
pub async fn play<G, R>(game: G, terminal: DefaultTerminal) -> Result<(G, DefaultTerminal)>
where
    G: Game,
    R: Renderer<G::Snapshot> + 'static,
{
    let (input_tx, input_rx) = mpsc::unbounded_channel();
    let engine = Engine::new(game, input_rx);

    let mut renderer = spawn_render_loop::<_, R>(terminal, engine.subscribe());
    let listener = spawn_key_listener(input_tx);

    info!("session started");
    let run = engine.run();
    tokio::pin!(run);

    let game = tokio::select! {
        game = &mut run => game,
        // Only reachable if drawing failed; dropping `run` releases the listener
        drawn = &mut renderer => {
            drawn??;
            return Err(anyhow!("render loop stopped before the game ended"));
        }
    };

    // The engine is gone, so both tasks wind down on their own
    let terminal = renderer.await??;
    listener.await??;
    info!("session ended");

    Ok((game, terminal))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quit_keys() {
        assert!(is_quit(&KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE)));
        assert!(is_quit(&KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)));
        assert!(!is_quit(&KeyEvent::new(KeyCode::Char('c'), KeyModifiers::NONE)));
        assert!(!is_quit(&KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE)));
    }
}
