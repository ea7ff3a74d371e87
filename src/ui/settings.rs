use super::{APP_TITLE, draw_header, draw_help, draw_status, key_hint, layout};
use crate::app::{App, SettingsField};
use crate::models::{Difficulty, MAX_QUESTIONS, MIN_QUESTIONS, QuestionKind};
use ratatui::{
    Frame,
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

const TOPIC_PLACEHOLDER: &str = "e.g. Indian History, Geography";

fn field_label(field: SettingsField) -> &'static str {
    match field {
        SettingsField::QuestionType => "Question Type",
        SettingsField::Topic => "Topic",
        SettingsField::Difficulty => "Difficulty",
        SettingsField::Count => "Number of Questions",
    }
}

fn choice_spans(labels: &[&'static str], selected: usize) -> Vec<Span<'static>> {
    let mut spans = Vec::new();
    for (i, label) in labels.iter().enumerate() {
        if i > 0 {
            spans.push(Span::from("  "));
        }
        if i == selected {
            spans.push(Span::styled(
                format!("({})", label),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ));
        } else {
            spans.push(Span::styled(
                format!(" {} ", label),
                Style::default().fg(Color::DarkGray),
            ));
        }
    }
    spans
}

fn field_value(app: &App, field: SettingsField) -> Vec<Span<'static>> {
    let settings = &app.settings;
    match field {
        SettingsField::QuestionType => {
            let labels = QuestionKind::ALL.map(QuestionKind::label);
            let selected = QuestionKind::ALL
                .iter()
                .position(|k| *k == settings.kind)
                .unwrap_or(0);
            choice_spans(&labels, selected)
        }
        SettingsField::Difficulty => {
            let labels = Difficulty::ALL.map(Difficulty::label);
            let selected = Difficulty::ALL
                .iter()
                .position(|d| *d == settings.difficulty)
                .unwrap_or(0);
            choice_spans(&labels, selected)
        }
        SettingsField::Topic => {
            if settings.topic.is_empty() {
                vec![Span::styled(
                    TOPIC_PLACEHOLDER,
                    Style::default()
                        .fg(Color::DarkGray)
                        .add_modifier(Modifier::ITALIC),
                )]
            } else {
                vec![Span::from(settings.topic.clone())]
            }
        }
        SettingsField::Count => vec![Span::from(format!(
            "< {} >   ({}-{})",
            settings.count, MIN_QUESTIONS, MAX_QUESTIONS
        ))],
    }
}

pub fn draw_settings(f: &mut Frame, app: &App) {
    let layout = layout::calculate_screen_chunks(f.area());
    draw_header(f, layout.header_area, APP_TITLE);

    let mut text = Text::default();
    text.push_line(Line::from(
        "Generate a quiz on any topic, answer it, and save your results.",
    ));
    text.push_line(Line::from(""));

    for field in SettingsField::ALL {
        let focused = field == app.focused_field;
        let marker = if focused { "> " } else { "  " };
        let label_style = if focused {
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        };

        text.push_line(Line::from(Span::styled(
            format!("{}{}", marker, field_label(field)),
            label_style,
        )));
        let mut value = vec![Span::from("    ")];
        value.extend(field_value(app, field));
        if focused && field == SettingsField::Topic {
            value.push(Span::styled("_", Style::default().fg(Color::Cyan)));
        }
        text.push_line(Line::from(value));
        text.push_line(Line::from(""));
    }

    let form = Paragraph::new(text)
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title("Quiz Settings"));
    f.render_widget(form, layout.content_area);

    draw_status(f, layout.status_area, app.status.as_ref());

    let mut spans = Vec::new();
    spans.extend(key_hint("Tab/↑↓", " Field  "));
    spans.extend(key_hint("←/→", " Change  "));
    spans.extend(key_hint("Enter", " Generate Quiz  "));
    spans.extend(key_hint("Esc", " Quit"));
    draw_help(f, layout.help_area, vec![Line::from(spans)]);
}

pub fn draw_generating(f: &mut Frame, app: &App) {
    let area = super::centered_rect(60, 5, f.area());
    let message = format!(
        "Generating {} {} question(s) about \"{}\" ({})...",
        app.settings.count,
        app.settings.kind.label(),
        app.settings.topic.trim(),
        app.settings.difficulty
    );

    let popup = Paragraph::new(message)
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title("Please wait"));
    f.render_widget(Clear, area);
    f.render_widget(popup, area);
}
