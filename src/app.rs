use crate::bank::QuestionBank;
use crate::bookmarks::BookmarkStore;
use crate::models::{HomeEntry, Mode, QuestionItem, Screen};
use crate::session::{Advance, SessionError, SessionQueue};
use crate::speech::{SpeechEngine, SpeechRequest, SpeechSequencer};
use crate::utils::step_index;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::time::Instant;

pub const EMPTY_LIST_NOTICE: &str = "This list is empty.";
pub const COMPLETE_NOTICE: &str = "Practice complete!";

/// All interactive state. `main` owns one and feeds it key events and ticks.
pub struct App<E: SpeechEngine> {
    pub screen: Screen,
    pub bank: QuestionBank,
    pub session: Option<SessionQueue>,
    pub speech: SpeechSequencer<E>,
    pub bookmarks: BookmarkStore,
    pub home_index: usize,
    pub categories: Vec<u32>,
    pub category_index: usize,
    pub bookmark_tab: Mode,
    pub bookmark_index: usize,
    pub notice: Option<String>,
    pub should_quit: bool,
    rng: StdRng,
}

impl<E: SpeechEngine> App<E> {
    pub fn new(bank: QuestionBank, speech: SpeechSequencer<E>, bookmarks: BookmarkStore) -> Self {
        Self::with_rng(bank, speech, bookmarks, StdRng::from_entropy())
    }

    pub fn with_rng(
        bank: QuestionBank,
        speech: SpeechSequencer<E>,
        bookmarks: BookmarkStore,
        rng: StdRng,
    ) -> Self {
        let categories = bank.glossary_categories();
        Self {
            screen: Screen::Home,
            bank,
            session: None,
            speech,
            bookmarks,
            home_index: 0,
            categories,
            category_index: 0,
            bookmark_tab: Mode::Personal,
            bookmark_index: 0,
            notice: None,
            should_quit: false,
            rng,
        }
    }

    pub fn tick(&mut self, now: Instant) {
        self.speech.tick(now);
    }

    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.quit();
            return;
        }

        if self.notice.take().is_some() {
            return;
        }

        match self.screen {
            Screen::Home => self.handle_home_key(key),
            Screen::GlossaryMenu => self.handle_glossary_menu_key(key),
            Screen::Practice => self.handle_practice_key(key, now),
            Screen::Bookmarks => self.handle_bookmarks_key(key, now),
        }
    }

    fn handle_home_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Up => self.home_index = step_index(self.home_index, HomeEntry::ALL.len(), false),
            KeyCode::Down => self.home_index = step_index(self.home_index, HomeEntry::ALL.len(), true),
            KeyCode::Enter => match HomeEntry::ALL[self.home_index] {
                HomeEntry::Practice(Mode::Glossary) => {
                    self.categories = self.bank.glossary_categories();
                    self.category_index = 0;
                    self.screen = Screen::GlossaryMenu;
                }
                HomeEntry::Practice(mode) => self.start_session(mode, 0),
                HomeEntry::Bookmarks => {
                    self.bookmark_index = 0;
                    self.screen = Screen::Bookmarks;
                }
            },
            KeyCode::Char('q') | KeyCode::Esc => self.quit(),
            _ => {}
        }
    }

    fn handle_glossary_menu_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Up => {
                self.category_index = step_index(self.category_index, self.categories.len(), false)
            }
            KeyCode::Down => {
                self.category_index = step_index(self.category_index, self.categories.len(), true)
            }
            KeyCode::Enter => {
                let category_id = self.categories.get(self.category_index).copied().unwrap_or(0);
                self.start_session(Mode::Glossary, category_id);
            }
            KeyCode::Esc => self.screen = Screen::Home,
            _ => {}
        }
    }

    fn handle_practice_key(&mut self, key: KeyEvent, now: Instant) {
        match key.code {
            KeyCode::Char(' ') | KeyCode::Enter => self.main_action(now),
            KeyCode::Char('r') => {
                if let Some(session) = self.session.as_mut() {
                    session.toggle_reveal();
                }
            }
            KeyCode::Char('p') => self.play_current(now),
            KeyCode::Char('d') => self.speak_definition(now),
            KeyCode::Char('s') => self.toggle_current_bookmark(),
            KeyCode::Char('R') => self.restart_session(),
            KeyCode::Esc => self.exit_session(),
            _ => {}
        }
    }

    fn handle_bookmarks_key(&mut self, key: KeyEvent, now: Instant) {
        match key.code {
            KeyCode::Left => self.select_bookmark_tab(self.bookmark_tab.previous()),
            KeyCode::Right => self.select_bookmark_tab(self.bookmark_tab.next()),
            KeyCode::Char(c @ '1'..='3') => {
                let index = c as usize - '1' as usize;
                self.select_bookmark_tab(Mode::ALL[index]);
            }
            KeyCode::Up => {
                let len = self.bookmarks.list(self.bookmark_tab).len();
                self.bookmark_index = step_index(self.bookmark_index, len, false);
            }
            KeyCode::Down => {
                let len = self.bookmarks.list(self.bookmark_tab).len();
                self.bookmark_index = step_index(self.bookmark_index, len, true);
            }
            KeyCode::Enter | KeyCode::Char('p') => self.play_selected_bookmark(now),
            KeyCode::Char('x') | KeyCode::Delete => self.remove_selected_bookmark(),
            KeyCode::Esc => {
                self.speech.cancel();
                self.screen = Screen::Home;
            }
            _ => {}
        }
    }

    /// Starts a session and switches to the practice screen. An unloaded bank does nothing.
    pub fn start_session(&mut self, mode: Mode, category_id: u32) {
        match SessionQueue::start(&self.bank, mode, category_id, &mut self.rng) {
            Ok(session) => {
                self.speech.cancel();
                self.session = Some(session);
                self.screen = Screen::Practice;
            }
            Err(SessionError::BankNotLoaded) => {}
            Err(SessionError::EmptyPool(_)) => self.notice = Some(EMPTY_LIST_NOTICE.to_string()),
        }
    }

    /// First press begins the interview, later presses move on. Both auto-play the item.
    pub fn main_action(&mut self, now: Instant) {
        let Some(session) = self.session.as_mut() else {
            return;
        };

        if !session.started {
            session.begin();
        } else {
            match session.advance() {
                Advance::Next(_) => {}
                Advance::Completed => {
                    self.exit_session();
                    self.notice = Some(COMPLETE_NOTICE.to_string());
                    return;
                }
                Advance::Ignored => return,
            }
        }

        if let Some(request) = self.current_request() {
            let delay = self.speech.settings().autoplay_delay;
            self.speech.schedule(delay, &request, now);
        }
    }

    pub fn play_current(&mut self, now: Instant) {
        if let Some(request) = self.current_request() {
            self.speech.play(&request, now);
        }
    }

    pub fn speak_definition(&mut self, now: Instant) {
        let Some(session) = self.session.as_ref() else {
            return;
        };
        if !session.revealed {
            return;
        }
        if let Some(QuestionItem::Glossary(entry)) = session.current() {
            let definition = entry.definition.clone();
            self.speech.speak_text(&definition, now);
        }
    }

    pub fn toggle_current_bookmark(&mut self) {
        let Some(session) = self.session.as_ref() else {
            return;
        };
        let Some(item) = session.current() else {
            return;
        };
        let mode = session.mode;
        let identifier = item.identifier().to_string();
        if let Err(e) = self.bookmarks.toggle(mode, &identifier) {
            log::error!("Failed to save bookmarks: {}", e);
        }
    }

    pub fn restart_session(&mut self) {
        let Some(session) = self.session.as_ref() else {
            return;
        };
        match session.restart(&self.bank, &mut self.rng) {
            Ok(fresh) => {
                self.speech.cancel();
                self.session = Some(fresh);
            }
            Err(e) => log::warn!("Restart failed: {}", e),
        }
    }

    /// Leaves practice for the screen the session was started from.
    pub fn exit_session(&mut self) {
        self.speech.cancel();
        let mode = self.session.take().map(|session| session.mode);
        self.screen = if mode == Some(Mode::Glossary) {
            Screen::GlossaryMenu
        } else {
            Screen::Home
        };
    }

    pub fn current_is_bookmarked(&self) -> bool {
        self.session
            .as_ref()
            .and_then(|session| {
                session
                    .current()
                    .map(|item| self.bookmarks.is_bookmarked(session.mode, item.identifier()))
            })
            .unwrap_or(false)
    }

    fn current_request(&self) -> Option<SpeechRequest> {
        let item = self.session.as_ref()?.current()?;
        Some(match item {
            QuestionItem::Glossary(entry) => SpeechRequest::GlossaryPrompt(entry.word.clone()),
            QuestionItem::Plain(prompt) => SpeechRequest::Text(prompt.clone()),
        })
    }

    fn select_bookmark_tab(&mut self, mode: Mode) {
        self.bookmark_tab = mode;
        self.bookmark_index = 0;
    }

    fn selected_bookmark(&self) -> Option<String> {
        self.bookmarks
            .list(self.bookmark_tab)
            .get(self.bookmark_index)
            .cloned()
    }

    fn play_selected_bookmark(&mut self, now: Instant) {
        let Some(identifier) = self.selected_bookmark() else {
            return;
        };
        let request = match self.bookmark_tab {
            Mode::Glossary => SpeechRequest::GlossaryPrompt(identifier),
            _ => SpeechRequest::Text(identifier),
        };
        self.speech.play(&request, now);
    }

    fn remove_selected_bookmark(&mut self) {
        let Some(identifier) = self.selected_bookmark() else {
            return;
        };
        if let Err(e) = self.bookmarks.remove(self.bookmark_tab, &identifier) {
            log::error!("Failed to save bookmarks: {}", e);
        }
        let len = self.bookmarks.list(self.bookmark_tab).len();
        self.bookmark_index = self.bookmark_index.min(len.saturating_sub(1));
    }

    fn quit(&mut self) {
        self.speech.cancel();
        self.should_quit = true;
    }
}
