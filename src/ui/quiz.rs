use super::{draw_help, draw_status, key_hint, layout::calculate_quiz_chunks};
use crate::app::App;
use crate::models::Question;
use crate::utils::truncate_string;
use ratatui::{
    Frame,
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
};

pub fn draw_quiz(f: &mut Frame, app: &App) {
    let layout = calculate_quiz_chunks(f.area());
    let index = app.form.current_index;
    let Some(question) = app.manager.questions().get(index) else {
        return;
    };

    let progress = format!(
        "Question {} / {} - {} ({}, {})",
        index + 1,
        app.manager.questions().len(),
        app.settings.topic.trim(),
        question.kind(),
        app.settings.difficulty
    );
    let title_width = layout.header_area.width.saturating_sub(2) as usize;
    super::draw_header(f, layout.header_area, &truncate_string(&progress, title_width));

    let question_text = Paragraph::new(Text::from(question.text()))
        .style(Style::default().add_modifier(Modifier::BOLD))
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!("Question {}", index + 1)),
        );
    f.render_widget(question_text, layout.question_area);

    let (answer_title, answer_content) = match question {
        Question::MultipleChoice { options, .. } => {
            let selected = app.form.selections.get(index).copied().unwrap_or(0);
            let mut text = Text::default();
            for (i, option) in options.iter().enumerate() {
                let line = if i == selected {
                    Line::from(Span::styled(
                        format!("(•) {}. {}", i + 1, option),
                        Style::default()
                            .fg(Color::Yellow)
                            .add_modifier(Modifier::BOLD),
                    ))
                } else {
                    Line::from(format!("( ) {}. {}", i + 1, option))
                };
                text.push_line(line);
            }
            ("Select an answer", text)
        }
        Question::FillInBlank { .. } => {
            let input = app.form.inputs.get(index).map(String::as_str).unwrap_or("");
            let text = if input.is_empty() {
                Text::from(Span::styled(
                    "[Type your answer here...]",
                    Style::default().fg(Color::DarkGray),
                ))
            } else {
                Text::from(input)
            };
            ("Fill in the blank", text)
        }
    };

    let answer = Paragraph::new(answer_content)
        .wrap(Wrap { trim: false })
        .block(Block::default().borders(Borders::ALL).title(answer_title));
    f.render_widget(answer, layout.answer_area);

    if let Question::FillInBlank { .. } = question {
        let input_width = app.form.inputs.get(index).map(|s| s.chars().count()).unwrap_or(0) as u16;
        let inner_width = layout.answer_area.width.saturating_sub(2).max(1);
        let cursor_x = layout.answer_area.x + 1 + input_width % inner_width;
        let cursor_y = layout.answer_area.y + 1 + input_width / inner_width;
        f.set_cursor_position((cursor_x, cursor_y));
    }

    draw_status(f, layout.status_area, app.status.as_ref());

    let mut basic_spans = Vec::new();
    basic_spans.extend(key_hint("↑/↓", " Previous/Next  "));
    if app.form.is_last() {
        basic_spans.extend(key_hint("Enter", " Submit Quiz  "));
    } else {
        basic_spans.extend(key_hint("Enter", " Next  "));
    }
    basic_spans.extend(key_hint("Esc", " Back to Settings"));

    let mut answer_spans = Vec::new();
    if question.options().is_empty() {
        answer_spans.extend(key_hint("Type", " Answer  "));
        answer_spans.extend(key_hint("Backspace", " Delete"));
    } else {
        answer_spans.extend(key_hint("←/→", " Change Option  "));
        answer_spans.extend(key_hint("1-9", " Pick Option"));
    }

    draw_help(
        f,
        layout.help_area,
        vec![Line::from(basic_spans), Line::from(answer_spans)],
    );
}
