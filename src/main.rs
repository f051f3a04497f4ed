use std::fs::File;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use letterfall::config::Config;
use letterfall::core::menu::{TitleChoice, TitleScreen};
use letterfall::games::falling_letters::{self, Sampler, Settings, Snapshot};
use ratatui::DefaultTerminal;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::parse();
    let settings = config.settings()?;
    init_tracing(&config)?;

    info!(?settings, seed = ?config.seed, "starting letterfall");

    let terminal = ratatui::init();
    let result = session(&config, settings, terminal).await;
    ratatui::restore();

    let Some(snapshot) = result? else {
        return Ok(());
    };

    println!("Final score: {}  Multiplier: x{}", snapshot.score, snapshot.multiplier);

    if let Some(path) = &config.final_state {
        let json = serde_json::to_string_pretty(&snapshot)?;
        std::fs::write(path, json)
            .with_context(|| format!("failed to write final state to {}", path.display()))?;
        info!(path = %path.display(), "final state written");
    }

    Ok(())
}

/// Title screen, then one game. `None` if the player backed out at the title.
async fn session(config: &Config, settings: Settings, mut terminal: DefaultTerminal) -> Result<Option<Snapshot>> {
    if !config.skip_title {
        let details = vec![
            "Press the key shown on a falling letter to clear it".to_string(),
            "Every hit raises the multiplier by one".to_string(),
            format!("A letter reaching {} ends the game", settings.game_over_threshold),
        ];
        let title = TitleScreen::new(&falling_letters::INFO, details);
        if title.run(&mut terminal)? == TitleChoice::Quit {
            info!("quit from title screen");
            return Ok(None);
        }
    }

    let rng = config.seed.map(Sampler::seeded).unwrap_or_else(Sampler::from_entropy);
    let (snapshot, _terminal) = falling_letters::run_game(settings, rng, terminal).await?;
    info!(score = snapshot.score, multiplier = snapshot.multiplier, over = snapshot.is_over, "game ended");

    Ok(Some(snapshot))
}

/// Logs go to a file, never to the terminal the game is drawing on
fn init_tracing(config: &Config) -> Result<()> {
    let Some(path) = &config.log_file else {
        return Ok(());
    };

    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_writer(Arc::new(file))
        .with_ansi(false)
        .with_max_level(config.log_level()?)
        .init();
    Ok(())
}
