use super::{draw_header, draw_help, draw_status, key_hint, layout};
use crate::app::App;
use ratatui::{
    Frame,
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
};

pub fn draw_results(f: &mut Frame, app: &App) {
    let layout = layout::calculate_screen_chunks(f.area());
    draw_header(f, layout.header_area, "Quiz Results");

    let table = app.manager.summarize();
    let mut text = Text::default();

    if table.is_empty() {
        text.push_line(Line::from(Span::styled(
            "No results yet.",
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        )));
    } else {
        text.push_line(Line::from(Span::styled(
            format!(
                "Score: {:.2}%  ({} / {} correct)",
                table.percentage(),
                table.correct(),
                table.total()
            ),
            Style::default().add_modifier(Modifier::BOLD),
        )));
        text.push_line(Line::from(""));

        for row in &table.rows {
            let (verdict, color) = if row.is_correct {
                ("is correct", Color::Green)
            } else {
                ("is not correct", Color::Red)
            };
            text.push_line(Line::from(Span::styled(
                format!(
                    "Question {}: {} {}",
                    row.question_number,
                    row.question,
                    verdict
                ),
                Style::default().fg(color),
            )));

            if !row.is_correct {
                text.push_line(Line::from(format!("   Your answer: {}", row.user_answer)));
                text.push_line(Line::from(format!(
                    "   Correct answer: {}",
                    row.correct_answer
                )));
            }
            text.push_line(Line::from(Span::styled(
                "-----------",
                Style::default().fg(Color::DarkGray),
            )));
        }
    }

    let results = Paragraph::new(text)
        .wrap(Wrap { trim: true })
        .scroll((app.results_scroll, 0))
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(results, layout.content_area);

    draw_status(f, layout.status_area, app.status.as_ref());

    let mut spans = Vec::new();
    spans.extend(key_hint("s", " Save Results  "));
    spans.extend(key_hint("n", " New Quiz  "));
    spans.extend(key_hint("↑/↓", " Scroll  "));
    spans.extend(key_hint("q", " Quit"));
    draw_help(f, layout.help_area, vec![Line::from(spans)]);
}
