use ratatui::layout::{Constraint, Direction, Layout, Rect};

pub struct PracticeLayout {
    pub header_area: Rect,
    pub card_area: Rect,
    pub status_area: Rect,
    pub help_area: Rect,
}

pub struct BookmarksLayout {
    pub header_area: Rect,
    pub tabs_area: Rect,
    pub list_area: Rect,
    pub help_area: Rect,
}

pub fn calculate_practice_chunks(area: Rect) -> PracticeLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(3),
            Constraint::Length(4),
        ])
        .split(area);

    PracticeLayout {
        header_area: chunks[0],
        card_area: chunks[1],
        status_area: chunks[2],
        help_area: chunks[3],
    }
}

pub fn calculate_bookmarks_chunks(area: Rect) -> BookmarksLayout {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(3),
        ])
        .split(area);

    BookmarksLayout {
        header_area: chunks[0],
        tabs_area: chunks[1],
        list_area: chunks[2],
        help_area: chunks[3],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_practice_layout() {
        let area = Rect::new(0, 0, 100, 40);
        let layout = calculate_practice_chunks(area);

        // Margin 1 leaves 38 rows; fixed rows take 3 + 3 + 4.
        assert_eq!(layout.header_area.height, 3);
        assert_eq!(layout.status_area.height, 3);
        assert_eq!(layout.help_area.height, 4);
        assert_eq!(layout.card_area.height, 28);
        assert_eq!(layout.card_area.width, 98);
    }

    #[test]
    fn test_practice_layout_small_terminal() {
        let layout = calculate_practice_chunks(Rect::new(0, 0, 40, 20));
        assert!(layout.card_area.height >= 5);
    }

    #[test]
    fn test_bookmarks_layout() {
        let area = Rect::new(0, 0, 80, 30);
        let layout = calculate_bookmarks_chunks(area);

        assert_eq!(layout.header_area.height, 3);
        assert_eq!(layout.tabs_area.height, 3);
        assert_eq!(layout.help_area.height, 3);
        assert_eq!(layout.list_area.height, 28 - 9);
    }
}
