use crate::db::kv;
use crate::error::Result;
use crate::models::Mode;
use rusqlite::Connection;
use serde::{Deserialize, Serialize};

pub const BOOKMARKS_KEY: &str = "n400_bookmarks_v2";

/// The persisted blob: one identifier list per mode.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookmarkSet {
    #[serde(default)]
    pub personal: Vec<String>,
    #[serde(default)]
    pub part9: Vec<String>,
    #[serde(default)]
    pub glossary: Vec<String>,
}

impl BookmarkSet {
    pub fn list(&self, mode: Mode) -> &[String] {
        match mode {
            Mode::Personal => &self.personal,
            Mode::Part9 => &self.part9,
            Mode::Glossary => &self.glossary,
        }
    }

    fn list_mut(&mut self, mode: Mode) -> &mut Vec<String> {
        match mode {
            Mode::Personal => &mut self.personal,
            Mode::Part9 => &mut self.part9,
            Mode::Glossary => &mut self.glossary,
        }
    }
}

/// Bookmarks kept in memory and written through to the key/value table on every change.
pub struct BookmarkStore {
    conn: Connection,
    set: BookmarkSet,
}

impl BookmarkStore {
    /// Reads the blob once. A missing or malformed blob yields empty lists.
    pub fn open(conn: Connection) -> Result<Self> {
        let set = match kv::get_value(&conn, BOOKMARKS_KEY)? {
            Some(raw) => serde_json::from_str(&raw).unwrap_or_else(|e| {
                log::warn!("Ignoring malformed bookmark data: {}", e);
                BookmarkSet::default()
            }),
            None => BookmarkSet::default(),
        };
        Ok(Self { conn, set })
    }

    pub fn list(&self, mode: Mode) -> &[String] {
        self.set.list(mode)
    }

    pub fn is_bookmarked(&self, mode: Mode, identifier: &str) -> bool {
        self.set.list(mode).iter().any(|saved| saved == identifier)
    }

    /// Returns whether `identifier` is bookmarked afterwards.
    pub fn toggle(&mut self, mode: Mode, identifier: &str) -> Result<bool> {
        let list = self.set.list_mut(mode);
        let now_bookmarked = match list.iter().position(|saved| saved == identifier) {
            Some(index) => {
                list.remove(index);
                false
            }
            None => {
                list.push(identifier.to_string());
                true
            }
        };
        self.save()?;
        Ok(now_bookmarked)
    }

    /// Returns whether anything was removed.
    pub fn remove(&mut self, mode: Mode, identifier: &str) -> Result<bool> {
        let list = self.set.list_mut(mode);
        let Some(index) = list.iter().position(|saved| saved == identifier) else {
            return Ok(false);
        };
        list.remove(index);
        self.save()?;
        Ok(true)
    }

    fn save(&self) -> Result<()> {
        let raw = serde_json::to_string(&self.set)?;
        kv::set_value(&self.conn, BOOKMARKS_KEY, &raw)?;
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::db::{init_db, run_migrations};

    pub(crate) fn memory_store() -> BookmarkStore {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        BookmarkStore::open(conn).unwrap()
    }

    #[test]
    fn test_empty_by_default() {
        let store = memory_store();
        for mode in Mode::ALL {
            assert!(store.list(mode).is_empty());
        }
    }

    #[test]
    fn test_toggle_is_self_inverse() {
        let mut store = memory_store();
        for id in ["Q1 翻譯1", "oath", ""] {
            for mode in Mode::ALL {
                let before = store.is_bookmarked(mode, id);
                store.toggle(mode, id).unwrap();
                assert_ne!(store.is_bookmarked(mode, id), before);
                store.toggle(mode, id).unwrap();
                assert_eq!(store.is_bookmarked(mode, id), before);
            }
        }
    }

    #[test]
    fn test_toggle_reports_membership() {
        let mut store = memory_store();
        assert!(store.toggle(Mode::Glossary, "oath").unwrap());
        assert!(!store.toggle(Mode::Glossary, "oath").unwrap());
    }

    #[test]
    fn test_lists_are_independent() {
        let mut store = memory_store();
        store.toggle(Mode::Personal, "Q1").unwrap();
        assert!(store.is_bookmarked(Mode::Personal, "Q1"));
        assert!(!store.is_bookmarked(Mode::Part9, "Q1"));
    }

    #[test]
    fn test_exact_string_matching() {
        let mut store = memory_store();
        store.toggle(Mode::Glossary, "oath").unwrap();
        assert!(!store.is_bookmarked(Mode::Glossary, "Oath"));
        assert!(!store.is_bookmarked(Mode::Glossary, "oath "));
    }

    #[test]
    fn test_remove() {
        let mut store = memory_store();
        store.toggle(Mode::Part9, "A").unwrap();
        store.toggle(Mode::Part9, "B").unwrap();
        assert!(store.remove(Mode::Part9, "A").unwrap());
        assert!(!store.remove(Mode::Part9, "A").unwrap());
        assert_eq!(store.list(Mode::Part9), ["B".to_string()]);
    }

    #[test]
    fn test_insertion_order_kept() {
        let mut store = memory_store();
        for id in ["c", "a", "b"] {
            store.toggle(Mode::Personal, id).unwrap();
        }
        assert_eq!(store.list(Mode::Personal), ["c", "a", "b"]);
    }

    #[test]
    fn test_persists_across_reopen() {
        let temp_dir = tempfile::tempdir().unwrap();
        let db_path = temp_dir.path().join("test.db");
        {
            let mut store = BookmarkStore::open(init_db(&db_path).unwrap()).unwrap();
            store.toggle(Mode::Glossary, "allegiance").unwrap();
            store.toggle(Mode::Personal, "Q1 翻譯1").unwrap();
            store.toggle(Mode::Personal, "Q2 翻譯2").unwrap();
            store.remove(Mode::Personal, "Q2 翻譯2").unwrap();
        }
        let store = BookmarkStore::open(init_db(&db_path).unwrap()).unwrap();
        assert_eq!(store.list(Mode::Glossary), ["allegiance"]);
        assert_eq!(store.list(Mode::Personal), ["Q1 翻譯1"]);
        assert!(store.list(Mode::Part9).is_empty());
    }

    #[test]
    fn test_blob_format() {
        let mut store = memory_store();
        store.toggle(Mode::Part9, "Q").unwrap();
        let raw = kv::get_value(&store.conn, BOOKMARKS_KEY).unwrap().unwrap();
        assert_eq!(raw, r#"{"personal":[],"part9":["Q"],"glossary":[]}"#);
    }

    #[test]
    fn test_malformed_blob_reads_as_empty() {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        kv::set_value(&conn, BOOKMARKS_KEY, "{not json").unwrap();

        let store = BookmarkStore::open(conn).unwrap();
        for mode in Mode::ALL {
            assert!(store.list(mode).is_empty());
        }
    }

    #[test]
    fn test_partial_blob_fills_missing_lists() {
        let conn = Connection::open_in_memory().unwrap();
        run_migrations(&conn).unwrap();
        kv::set_value(&conn, BOOKMARKS_KEY, r#"{"glossary":["oath"]}"#).unwrap();

        let store = BookmarkStore::open(conn).unwrap();
        assert_eq!(store.list(Mode::Glossary), ["oath"]);
        assert!(store.list(Mode::Personal).is_empty());
    }
}
