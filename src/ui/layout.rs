use ratatui::layout::{Constraint, Direction, Layout, Rect};

pub struct ScreenLayout {
    pub header_area: Rect,
    pub content_area: Rect,
    pub status_area: Rect,
    pub help_area: Rect,
}

pub struct QuizLayout {
    pub header_area: Rect,
    pub question_area: Rect,
    pub answer_area: Rect,
    pub status_area: Rect,
    pub help_area: Rect,
}

/// Header, body, one status line and a help footer. Used by the settings and results screens.
pub fn calculate_screen_chunks(area: Rect) -> ScreenLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(1),
            Constraint::Length(3),
        ])
        .split(area);

    ScreenLayout {
        header_area: chunks[0],
        content_area: chunks[1],
        status_area: chunks[2],
        help_area: chunks[3],
    }
}

pub fn calculate_quiz_chunks(area: Rect) -> QuizLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(4),
            Constraint::Percentage(50),
            Constraint::Length(1),
            Constraint::Length(4),
        ])
        .split(area);

    QuizLayout {
        header_area: chunks[0],
        question_area: chunks[1],
        answer_area: chunks[2],
        status_area: chunks[3],
        help_area: chunks[4],
    }
}

/// A rectangle of `width` x `height` centred in `area`, clipped to it.
pub fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_screen_layout() {
        let area = Rect::new(0, 0, 100, 100);
        let layout = calculate_screen_chunks(area);

        // margin 1 leaves 98 rows: 3 + 1 + 3 fixed
        assert_eq!(layout.header_area.height, 3);
        assert_eq!(layout.status_area.height, 1);
        assert_eq!(layout.help_area.height, 3);
        assert_eq!(layout.content_area.height, 98 - 7);
    }

    #[test]
    fn test_quiz_layout() {
        let area = Rect::new(0, 0, 100, 100);
        let layout = calculate_quiz_chunks(area);

        assert_eq!(layout.header_area.height, 3);
        assert_eq!(layout.status_area.height, 1);
        assert_eq!(layout.help_area.height, 4);
        assert!(layout.question_area.height >= 4);
        assert!(layout.answer_area.height > 0);
    }

    #[test]
    fn test_centered_rect() {
        let area = Rect::new(0, 0, 100, 40);
        let rect = centered_rect(50, 10, area);
        assert_eq!(rect, Rect::new(25, 15, 50, 10));

        let clipped = centered_rect(200, 100, area);
        assert_eq!(clipped, area);
    }
}
