pub mod layout;
mod bookmarks;
mod home;
mod notice;
mod practice;

pub use bookmarks::draw_bookmarks;
pub use home::{draw_glossary_menu, draw_home};
pub use layout::{calculate_bookmarks_chunks, calculate_practice_chunks};
pub use notice::draw_notice;
pub use practice::draw_practice;

use crate::app::App;
use crate::models::Screen;
use crate::speech::SpeechEngine;
use ratatui::{
    Frame,
    style::{Color, Modifier, Style},
    text::Span,
};

/// Draws the active screen, then the notice on top if one is pending.
pub fn draw<E: SpeechEngine>(f: &mut Frame, app: &App<E>) {
    match app.screen {
        Screen::Home => draw_home(f, app.home_index, app.bank.is_loaded()),
        Screen::GlossaryMenu => draw_glossary_menu(f, &app.categories, app.category_index),
        Screen::Practice => {
            if let Some(session) = &app.session {
                draw_practice(
                    f,
                    session,
                    app.current_is_bookmarked(),
                    app.speech.is_animating(),
                );
            }
        }
        Screen::Bookmarks => draw_bookmarks(
            f,
            app.bookmark_tab,
            app.bookmarks.list(app.bookmark_tab),
            app.bookmark_index,
            &app.bank,
            app.speech.is_animating(),
        ),
    }

    if let Some(message) = &app.notice {
        draw_notice(f, message);
    }
}

fn key_hint<'a>(key: &'a str, label: &'a str) -> [Span<'a>; 2] {
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

fn title_style() -> Style {
    Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bank::tests::sample_bank;
    use crate::bookmarks::tests::memory_store;
    use crate::speech::engine::testing::ScriptedEngine;
    use crate::speech::{SpeechSequencer, SpeechSettings};
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use ratatui::{Terminal, backend::TestBackend, buffer::Buffer};

    fn app() -> App<ScriptedEngine> {
        App::with_rng(
            sample_bank(),
            SpeechSequencer::new(ScriptedEngine::default(), SpeechSettings::default()),
            memory_store(),
            StdRng::seed_from_u64(9),
        )
    }

    fn render(app: &App<ScriptedEngine>) -> String {
        let mut terminal = Terminal::new(TestBackend::new(90, 30)).unwrap();
        terminal.draw(|f| draw(f, app)).unwrap();
        buffer_text(terminal.backend().buffer())
    }

    fn buffer_text(buffer: &Buffer) -> String {
        let width = buffer.area.width as usize;
        let mut text = String::new();
        for row in buffer.content.chunks(width) {
            for cell in row {
                text.push_str(cell.symbol());
            }
            text.push('\n');
        }
        text
    }

    #[test]
    fn test_home_lists_every_entry() {
        let screen = render(&app());
        for label in ["Personal Questions", "Part 9 Questions", "Glossary", "Bookmarks"] {
            assert!(screen.contains(label), "missing {label}");
        }
    }

    #[test]
    fn test_home_warns_when_bank_missing() {
        let app = App::with_rng(
            crate::bank::QuestionBank::default(),
            SpeechSequencer::new(ScriptedEngine::default(), SpeechSettings::default()),
            memory_store(),
            StdRng::seed_from_u64(9),
        );
        assert!(render(&app).contains("No questions loaded"));
    }

    #[test]
    fn test_glossary_menu_lists_categories() {
        let mut app = app();
        app.screen = Screen::GlossaryMenu;
        let screen = render(&app);
        assert!(screen.contains("Category 1"));
        assert!(screen.contains("Category 2"));
    }

    #[test]
    fn test_practice_hides_until_revealed() {
        let mut app = app();
        app.start_session(crate::models::Mode::Personal, 0);
        app.session.as_mut().unwrap().begin();

        let hidden = render(&app);
        assert!(hidden.contains("Question 1 / 2"));
        assert!(hidden.contains("press r to reveal"));
        assert!(!hidden.contains("Q1") && !hidden.contains("Q2"));

        app.session.as_mut().unwrap().toggle_reveal();
        let shown = render(&app);
        assert!(shown.contains("Q1") || shown.contains("Q2"));
    }

    #[test]
    fn test_practice_before_start() {
        let mut app = app();
        app.start_session(crate::models::Mode::Part9, 0);
        assert!(render(&app).contains("Press Space to start"));
    }

    #[test]
    fn test_reveal_before_start_shows_card() {
        let mut app = app();
        app.start_session(crate::models::Mode::Personal, 0);
        app.session.as_mut().unwrap().toggle_reveal();

        let screen = render(&app);
        assert!(screen.contains("Q1") || screen.contains("Q2"));
        assert!(!screen.contains("Press Space to start"));

        app.session.as_mut().unwrap().toggle_reveal();
        assert!(render(&app).contains("Press Space to start"));
    }

    #[test]
    fn test_bookmarks_show_glossary_translation() {
        let mut app = app();
        app.bookmarks
            .toggle(crate::models::Mode::Glossary, "oath")
            .unwrap();
        app.screen = Screen::Bookmarks;
        app.bookmark_tab = crate::models::Mode::Glossary;
        let screen = render(&app);
        assert!(screen.contains("oath"));
        assert!(screen.contains("oath-翻譯") || screen.contains("oath-翻"));
    }

    #[test]
    fn test_empty_bookmark_tab() {
        let mut app = app();
        app.screen = Screen::Bookmarks;
        assert!(render(&app).contains("No bookmarks yet"));
    }

    #[test]
    fn test_notice_overlays_screen() {
        let mut app = app();
        app.notice = Some(crate::app::COMPLETE_NOTICE.to_string());
        assert!(render(&app).contains("Practice complete!"));
    }
}
