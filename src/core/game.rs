/// Core game interface for the letterfall engine
use std::fmt::Debug;
use std::time::Duration;

use crossterm::event::KeyEvent;
use tokio::sync::mpsc::UnboundedSender;

/// Handle passed into every game callback
pub struct Context<E> {
    pub(crate) tx: UnboundedSender<E>,
}

impl<E> Context<E> {
    pub fn new(tx: UnboundedSender<E>) -> Self {
        Self { tx }
    }

    /// Queue an event for the engine to pick up once the handler returns
    pub fn emit(&self, event: E) {
        let _ = self.tx.send(event);
    }
}

/// Main game trait driven by [`crate::core::engine::Engine`]
///
/// The engine owns the game and calls exactly one handler at a time, so
/// implementations work on `&mut self` without any locking.
pub trait Game: Send + 'static {
    /// Names the periodic timers the game asked for
    type Timer: Copy + Eq + Debug + Send;

    /// Notifications the game emits through its [`Context`]
    type Event: Debug + Send + 'static;

    /// Read-only view published after every handler
    type Snapshot: Clone + Send + Sync + 'static;

    /// Periodic timers to run while the game is live
    fn timers(&self) -> Vec<(Self::Timer, Duration)>;

    fn on_timer(&mut self, timer: Self::Timer, ctx: &Context<Self::Event>);

    fn handle_input(&mut self, event: KeyEvent, ctx: &Context<Self::Event>);

    /// Once true the engine cancels every timer for good
    fn is_finished(&self) -> bool;

    fn snapshot(&self) -> Self::Snapshot;
}

/// Renderer trait for drawing a snapshot using Ratatui
pub trait Renderer<S> {
    fn render(frame: &mut ratatui::Frame, state: &S);
}
