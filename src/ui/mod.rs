pub mod layout;
mod quiz;
mod results;
mod settings;

use crate::app::{App, StatusKind, StatusMessage};
use crate::models::AppState;
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

pub use layout::{calculate_quiz_chunks, calculate_screen_chunks, centered_rect};
pub use quiz::draw_quiz;
pub use results::draw_results;
pub use settings::{draw_generating, draw_settings};

pub const APP_TITLE: &str = "Study Buddy AI";

pub fn draw(f: &mut Frame, app: &App) {
    match app.state {
        AppState::Settings => draw_settings(f, app),
        AppState::Generating => {
            draw_settings(f, app);
            draw_generating(f, app);
        }
        AppState::Quiz => draw_quiz(f, app),
        AppState::Results => draw_results(f, app),
    }
}

fn draw_header(f: &mut Frame, area: Rect, title: &str) {
    let header = Paragraph::new(title.to_string())
        .style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(header, area);
}

fn draw_status(f: &mut Frame, area: Rect, status: Option<&StatusMessage>) {
    let Some(status) = status else {
        return;
    };
    let color = match status.kind {
        StatusKind::Success => Color::Green,
        StatusKind::Warning => Color::Yellow,
        StatusKind::Error => Color::Red,
    };
    let line = Paragraph::new(status.text.as_str())
        .style(Style::default().fg(color))
        .alignment(Alignment::Center);
    f.render_widget(line, area);
}

fn key_hint(key: &'static str, label: &'static str) -> [Span<'static>; 2] {
    [
        Span::styled(
            key,
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::from(label),
    ]
}

fn draw_help(f: &mut Frame, area: Rect, lines: Vec<Line<'static>>) {
    let help = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, area);
}
