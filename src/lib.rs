pub mod core {
	pub mod engine;
	pub mod game;
	pub mod menu;
	pub mod terminal;
}

pub mod config;
pub mod games;

// Re-export for convenience
pub use crate::core::game::{Context, Game, Renderer};
