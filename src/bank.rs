use crate::models::{Mode, QuestionItem};

/// The three question collections, loaded once at startup.
#[derive(Debug, Clone, Default)]
pub struct QuestionBank {
    pub personal: Vec<QuestionItem>,
    pub part9: Vec<QuestionItem>,
    pub glossary: Vec<QuestionItem>,
}

impl QuestionBank {
    /// A failed load leaves every collection empty.
    pub fn is_loaded(&self) -> bool {
        !(self.personal.is_empty() && self.part9.is_empty() && self.glossary.is_empty())
    }

    /// Items a session for `mode` draws from. An unmatched glossary category falls back
    /// to the whole glossary.
    pub fn pool(&self, mode: Mode, category_id: u32) -> Vec<QuestionItem> {
        match mode {
            Mode::Personal => self.personal.clone(),
            Mode::Part9 => self.part9.clone(),
            Mode::Glossary => {
                let pool: Vec<QuestionItem> = self
                    .glossary
                    .iter()
                    .filter(|item| {
                        matches!(item, QuestionItem::Glossary(entry) if entry.category_id == category_id)
                    })
                    .cloned()
                    .collect();

                if pool.is_empty() && !self.glossary.is_empty() {
                    log::warn!(
                        "No glossary entries in category {}, using the whole glossary",
                        category_id
                    );
                    return self.glossary.clone();
                }
                pool
            }
        }
    }

    /// Distinct glossary category ids, ascending.
    pub fn glossary_categories(&self) -> Vec<u32> {
        let mut categories: Vec<u32> = self
            .glossary
            .iter()
            .filter_map(|item| match item {
                QuestionItem::Glossary(entry) => Some(entry.category_id),
                QuestionItem::Plain(_) => None,
            })
            .collect();
        categories.sort_unstable();
        categories.dedup();
        categories
    }

    pub fn find_glossary_entry(&self, word: &str) -> Option<&QuestionItem> {
        self.glossary.iter().find(|item| item.identifier() == word)
    }
}
