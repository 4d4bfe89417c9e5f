use std::fmt;

/// Practice mode, also the name of the matching bookmark list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    Personal,
    Part9,
    Glossary,
}

impl Mode {
    pub const ALL: [Mode; 3] = [Mode::Personal, Mode::Part9, Mode::Glossary];

    pub fn key(self) -> &'static str {
        match self {
            Mode::Personal => "personal",
            Mode::Part9 => "part9",
            Mode::Glossary => "glossary",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Mode::Personal => "Personal Questions",
            Mode::Part9 => "Part 9 Questions",
            Mode::Glossary => "Glossary",
        }
    }

    pub fn from_key(key: &str) -> Option<Mode> {
        match key.trim().to_ascii_lowercase().as_str() {
            "personal" => Some(Mode::Personal),
            "part9" => Some(Mode::Part9),
            "glossary" => Some(Mode::Glossary),
            _ => None,
        }
    }

    pub fn next(self) -> Mode {
        match self {
            Mode::Personal => Mode::Part9,
            Mode::Part9 => Mode::Glossary,
            Mode::Glossary => Mode::Personal,
        }
    }

    pub fn previous(self) -> Mode {
        match self {
            Mode::Personal => Mode::Glossary,
            Mode::Part9 => Mode::Personal,
            Mode::Glossary => Mode::Part9,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlossaryEntry {
    pub word: String,
    pub translation: String,
    pub definition: String,
    pub phonetic: String,
    pub category_id: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuestionItem {
    /// Prompt text followed by its translation, e.g. `"What is your name? 你叫什麼名字？"`.
    Plain(String),
    Glossary(GlossaryEntry),
}

impl QuestionItem {
    /// The string saved in bookmark lists: the whole prompt, or the glossary word.
    pub fn identifier(&self) -> &str {
        match self {
            QuestionItem::Plain(prompt) => prompt,
            QuestionItem::Glossary(entry) => &entry.word,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Home,
    GlossaryMenu,
    Practice,
    Bookmarks,
}

/// Entries of the home screen menu, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HomeEntry {
    Practice(Mode),
    Bookmarks,
}

impl HomeEntry {
    pub const ALL: [HomeEntry; 4] = [
        HomeEntry::Practice(Mode::Personal),
        HomeEntry::Practice(Mode::Part9),
        HomeEntry::Practice(Mode::Glossary),
        HomeEntry::Bookmarks,
    ];

    pub fn label(self) -> &'static str {
        match self {
            HomeEntry::Practice(mode) => mode.title(),
            HomeEntry::Bookmarks => "Bookmarks",
        }
    }
}
