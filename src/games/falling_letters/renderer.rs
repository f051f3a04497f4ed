use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
    layout::{Layout, Constraint, Direction},
};

use crate::core::game::Renderer;
use super::registry::LetterId;
use super::state::Snapshot;

#[derive(Debug)]
pub struct FallingLettersRenderer;

impl Renderer<Snapshot> for FallingLettersRenderer {
    fn render(frame: &mut Frame, state: &Snapshot) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1), // Score
                Constraint::Min(3),    // Playfield
                Constraint::Length(1), // Footer
            ])
            .split(frame.area());

        let header = Paragraph::new(format!("Score: {}  Multiplier: x{}", state.score, state.multiplier))
            .style(Style::default().fg(Color::White).add_modifier(Modifier::BOLD));
        frame.render_widget(header, chunks[0]);

        let block = Block::default().borders(Borders::ALL).title(" LETTERFALL ");
        let field = block.inner(chunks[1]);
        frame.render_widget(block, chunks[1]);

        let letter_style = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);
        for letter in &state.letters {
            if let Some((x, y)) = cell_for(letter.id, letter.position, state.bottom, field) {
                frame.buffer_mut().set_string(x, y, letter.glyph.to_string(), letter_style);
            }
        }

        if state.is_over && field.height > 0 {
            let banner = Rect::new(field.x, field.y + field.height / 2, field.width, 1);
            frame.render_widget(
                Paragraph::new("GAME OVER")
                    .alignment(Alignment::Center)
                    .style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)),
                banner,
            );
        }

        let footer = if state.is_over {
            format!("Final score {}  [Esc] Quit", state.score)
        } else {
            "Type the falling letters  [Esc] Quit".to_string()
        };
        frame.render_widget(
            Paragraph::new(footer).alignment(Alignment::Center).style(Style::default().fg(Color::Gray)),
            chunks[2],
        );
    }
}

/// Screen cell for a letter, or `None` while it sits above the top edge.
/// Rows scale `0..bottom` onto the field; the column depends on the id only,
/// so a letter keeps its lane for its whole fall.
pub fn cell_for(id: LetterId, position: f64, bottom: f64, field: Rect) -> Option<(u16, u16)> {
    if field.width == 0 || field.height == 0 || position < 0.0 || position >= bottom {
        return None;
    }

    let row = ((position / bottom) * f64::from(field.height)) as u16;
    let row = row.min(field.height - 1);
    Some((field.x + lane(id, field.width), field.y + row))
}

// Fibonacci hashing spreads consecutive ids over the left 90% of the field
fn lane(id: LetterId, width: u16) -> u16 {
    let lanes = (u64::from(width) * 9 / 10).max(1);
    ((id.wrapping_mul(0x9E37_79B9_7F4A_7C15) >> 32) % lanes) as u16
}
