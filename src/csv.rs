use crate::bank::QuestionBank;
use crate::error::Result;
use crate::models::{GlossaryEntry, Mode, QuestionItem};
use std::fs;
use std::path::Path;

pub fn load_question_bank(path: &Path) -> Result<QuestionBank> {
    let content = fs::read_to_string(path)?;
    Ok(parse_question_bank(&content))
}

/// Parses `type,content,translation,extra,category_id` rows after a header row.
/// Rows that fail to parse or carry an unknown type are skipped.
pub fn parse_question_bank(content: &str) -> QuestionBank {
    let mut reader = ::csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(::csv::Trim::All)
        .from_reader(content.as_bytes());

    let mut bank = QuestionBank::default();

    for (row, result) in reader.records().enumerate() {
        let record = match result {
            Ok(record) => record,
            Err(e) => {
                log::debug!("Skipping unparseable row {}: {}", row + 1, e);
                continue;
            }
        };

        let field = |i: usize| record.get(i).unwrap_or("").to_string();

        let Some(mode) = Mode::from_key(&field(0)) else {
            log::debug!("Skipping row {} with unknown type {:?}", row + 1, field(0));
            continue;
        };

        let content = field(1);
        let translation = field(2);

        match mode {
            Mode::Personal | Mode::Part9 => {
                let prompt = format!("{} {}", content, translation).trim().to_string();
                if prompt.is_empty() {
                    continue;
                }
                if mode == Mode::Personal {
                    bank.personal.push(QuestionItem::Plain(prompt));
                } else {
                    bank.part9.push(QuestionItem::Plain(prompt));
                }
            }
            Mode::Glossary => {
                if content.is_empty() {
                    continue;
                }
                bank.glossary.push(QuestionItem::Glossary(GlossaryEntry {
                    word: content,
                    translation,
                    definition: field(3),
                    phonetic: String::new(),
                    category_id: parse_category(&field(4)),
                }));
            }
        }
    }

    bank
}

fn parse_category(value: &str) -> u32 {
    value.trim().parse().unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "type,content,translation,extra,category_id\n";

    fn glossary_entry(item: &QuestionItem) -> &GlossaryEntry {
        match item {
            QuestionItem::Glossary(entry) => entry,
            other => panic!("expected glossary entry, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_simple_rows() {
        let content = format!(
            "{}personal,What is your name?,你叫什麼名字？,,\npart9,Have you ever voted?,你投過票嗎？,,\nglossary,allegiance,效忠,loyalty to a country,2\n",
            HEADER
        );
        let bank = parse_question_bank(&content);

        assert_eq!(
            bank.personal,
            vec![QuestionItem::Plain("What is your name? 你叫什麼名字？".to_string())]
        );
        assert_eq!(
            bank.part9,
            vec![QuestionItem::Plain("Have you ever voted? 你投過票嗎？".to_string())]
        );
        assert_eq!(bank.glossary.len(), 1);
        let entry = glossary_entry(&bank.glossary[0]);
        assert_eq!(entry.word, "allegiance");
        assert_eq!(entry.translation, "效忠");
        assert_eq!(entry.definition, "loyalty to a country");
        assert_eq!(entry.category_id, 2);
    }

    #[test]
    fn test_header_row_is_not_data() {
        let bank = parse_question_bank(HEADER);
        assert!(bank.personal.is_empty());
        assert!(bank.part9.is_empty());
        assert!(bank.glossary.is_empty());
    }

    #[test]
    fn test_quoted_fields_keep_commas() {
        let content = format!(
            "{}glossary,\"bear arms\",攜帶武器,\"to carry, or own, weapons\",3\n",
            HEADER
        );
        let bank = parse_question_bank(&content);
        let entry = glossary_entry(&bank.glossary[0]);
        assert_eq!(entry.word, "bear arms");
        assert_eq!(entry.definition, "to carry, or own, weapons");
    }

    #[test]
    fn test_escaped_quotes() {
        let content = format!("{}personal,\"Do you use the name \"\"Joe\"\"?\",,,\n", HEADER);
        let bank = parse_question_bank(&content);
        assert_eq!(
            bank.personal,
            vec![QuestionItem::Plain("Do you use the name \"Joe\"?".to_string())]
        );
    }

    #[test]
    fn test_short_rows_and_bad_category() {
        let content = format!(
            "{}glossary,oath\nglossary,citizen,公民,a member of a country,abc\n",
            HEADER
        );
        let bank = parse_question_bank(&content);
        assert_eq!(bank.glossary.len(), 2);
        let oath = glossary_entry(&bank.glossary[0]);
        assert_eq!(oath.translation, "");
        assert_eq!(oath.category_id, 0);
        let citizen = glossary_entry(&bank.glossary[1]);
        assert_eq!(citizen.category_id, 0);
    }

    #[test]
    fn test_type_is_case_insensitive_and_unknown_types_skipped() {
        let content = format!(
            "{} Personal ,Where do you live?,你住在哪裡？,,\ncivics,Who was the first president?,,,\n",
            HEADER
        );
        let bank = parse_question_bank(&content);
        assert_eq!(bank.personal.len(), 1);
        assert!(bank.part9.is_empty());
        assert!(bank.glossary.is_empty());
    }

    #[test]
    fn test_blank_lines_and_empty_content_skipped() {
        let content = format!("{}\npersonal,,,,\n\npart9,Q1,翻譯1,,\n", HEADER);
        let bank = parse_question_bank(&content);
        assert!(bank.personal.is_empty());
        assert_eq!(bank.part9, vec![QuestionItem::Plain("Q1 翻譯1".to_string())]);
    }

    #[test]
    fn test_load_question_bank_from_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("bank.csv");
        fs::write(&path, format!("{}personal,Q1,翻譯1,,\n", HEADER)).unwrap();

        let bank = load_question_bank(&path).unwrap();
        assert_eq!(bank.personal.len(), 1);
    }

    #[test]
    fn test_load_question_bank_missing_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let result = load_question_bank(&temp_dir.path().join("missing.csv"));
        assert!(result.is_err());
    }
}
