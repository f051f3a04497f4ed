pub mod game;
pub mod registry;
pub mod renderer;
pub mod rng;
pub mod score;
pub mod settings;
pub mod state;

pub use game::{FallEvent, FallTimer, FallingLettersGame};
pub use renderer::FallingLettersRenderer;
pub use rng::{Sampler, SpawnRng};
pub use settings::Settings;
pub use state::{GameState, Snapshot};

use crate::core::terminal::play;
use crate::games::GameInfo;
use anyhow::Result;
use ratatui::DefaultTerminal;

pub const INFO: GameInfo = GameInfo {
    id: "falling_letters",
    name: "Letterfall",
    description: "Type each falling letter before it reaches the bottom",
    author: "Letterfall Team",
};

/// Game runner for Letterfall. Returns the final snapshot and the terminal.
pub async fn run_game<R>(
    settings: Settings,
    rng: R,
    terminal: DefaultTerminal,
) -> Result<(Snapshot, DefaultTerminal)>
where
    R: SpawnRng + Send + 'static,
{
    let game = FallingLettersGame::new(settings, rng);
    let (game, terminal) = play::<_, FallingLettersRenderer>(game, terminal).await?;
    Ok((game.state().snapshot(), terminal))
}
