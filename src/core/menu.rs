use ratatui::{
    widgets::{Block, Borders, List, ListItem, Paragraph},
    layout::{Layout, Constraint, Direction, Alignment},
    style::{Style, Color, Modifier},
    Frame,
};
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use std::time::Duration;
use anyhow::Result;

use crate::core::terminal::is_quit;
use crate::games::GameInfo;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TitleChoice {
    Start,
    Quit,
}

/// Title screen shown before a session starts
pub struct TitleScreen<'a> {
    info: &'a GameInfo,
    details: Vec<String>,
}

impl<'a> TitleScreen<'a> {
    pub fn new(info: &'a GameInfo, details: Vec<String>) -> Self {
        Self { info, details }
    }

    pub fn run(&self, terminal: &mut ratatui::DefaultTerminal) -> Result<TitleChoice> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if event::poll(Duration::from_millis(16))? {
                if let Event::Key(key) = event::read()? {
                    if is_quit(&key) {
                        return Ok(TitleChoice::Quit);
                    }
                    if key.kind == KeyEventKind::Press && key.code == KeyCode::Enter {
                        return Ok(TitleChoice::Start);
                    }
                }
            }
        }
    }

    pub fn render(&self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(2)
            .constraints([Constraint::Length(3), Constraint::Min(0), Constraint::Length(3)])
            .split(f.area());

        f.render_widget(
            Paragraph::new(format!(" {} ", self.info.name.to_uppercase()))
                .block(Block::default().borders(Borders::ALL))
                .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
                .alignment(Alignment::Center),
            chunks[0]
        );

        let mut items = vec![ListItem::new(format!(" » {}", self.info.description))];
        items.extend(self.details.iter().map(|d| ListItem::new(format!("   {d}"))));
        f.render_widget(
            List::new(items).block(Block::default().title(" HOW TO PLAY ").borders(Borders::ALL)),
            chunks[1]
        );

        f.render_widget(
            Paragraph::new("[Enter] Start  [Esc] Quit").alignment(Alignment::Center),
            chunks[2]
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::falling_letters::INFO;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    #[test]
    fn test_title_lists_details() {
        let screen = TitleScreen::new(&INFO, vec!["Spawn every 800 ms".to_string()]);
        let mut terminal = Terminal::new(TestBackend::new(60, 16)).unwrap();
        terminal.draw(|f| screen.render(f)).unwrap();

        let text: String = terminal.backend().buffer().content().iter().map(|c| c.symbol()).collect();
        assert!(text.contains("LETTERFALL"));
        assert!(text.contains("Spawn every 800 ms"));
        assert!(text.contains("[Enter] Start"));
    }
}
