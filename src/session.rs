use crate::bank::QuestionBank;
use crate::models::{Mode, QuestionItem};
use rand::Rng;
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SessionError {
    #[error("question bank is not loaded yet")]
    BankNotLoaded,
    #[error("no questions available for {0}")]
    EmptyPool(Mode),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// Cursor moved to the given index.
    Next(usize),
    /// Cursor reached the end of the queue.
    Completed,
    /// The session had already completed.
    Ignored,
}

/// One practice run over a shuffled queue.
#[derive(Debug, Clone)]
pub struct SessionQueue {
    pub mode: Mode,
    pub category_id: u32,
    pub items: Vec<QuestionItem>,
    pub cursor: usize,
    pub started: bool,
    pub revealed: bool,
}

impl SessionQueue {
    pub fn start<R: Rng + ?Sized>(
        bank: &QuestionBank,
        mode: Mode,
        category_id: u32,
        rng: &mut R,
    ) -> Result<SessionQueue, SessionError> {
        if !bank.is_loaded() {
            log::info!("Question bank not ready, ignoring {} session start", mode);
            return Err(SessionError::BankNotLoaded);
        }

        let mut items = bank.pool(mode, category_id);
        if items.is_empty() {
            return Err(SessionError::EmptyPool(mode));
        }
        shuffle(&mut items, rng);

        log::info!(
            "Started {} session (category {}) with {} items",
            mode,
            category_id,
            items.len()
        );

        Ok(SessionQueue {
            mode,
            category_id,
            items,
            cursor: 0,
            started: false,
            revealed: false,
        })
    }

    pub fn restart<R: Rng + ?Sized>(
        &self,
        bank: &QuestionBank,
        rng: &mut R,
    ) -> Result<SessionQueue, SessionError> {
        SessionQueue::start(bank, self.mode, self.category_id, rng)
    }

    pub fn current(&self) -> Option<&QuestionItem> {
        self.items.get(self.cursor)
    }

    pub fn is_completed(&self) -> bool {
        self.cursor >= self.items.len()
    }

    pub fn begin(&mut self) {
        self.started = true;
    }

    pub fn advance(&mut self) -> Advance {
        if self.is_completed() {
            return Advance::Ignored;
        }
        self.cursor += 1;
        self.revealed = false;
        if self.is_completed() {
            log::info!("{} session completed", self.mode);
            Advance::Completed
        } else {
            Advance::Next(self.cursor)
        }
    }

    pub fn toggle_reveal(&mut self) {
        self.revealed = !self.revealed;
    }
}

/// Fisher–Yates: every permutation is equally likely for a uniform `rng`.
pub fn shuffle<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.gen_range(0..=i);
        items.swap(i, j);
    }
}
