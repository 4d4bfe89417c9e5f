use regex::Regex;

lazy_static::lazy_static! {
    static ref TRANSLATION_START: Regex =
        Regex::new(r"[\p{Han}\p{Hiragana}\p{Katakana}\p{Hangul}\x{3000}-\x{303F}\x{FF00}-\x{FFEF}]")
            .unwrap();
}

/// Marks a pause between spoken segments inside one prompt.
pub const SEGMENT_DELIMITER: char = '|';

/// Everything before the first CJK character or full-width punctuation, i.e. the prompt
/// without its translation.
pub fn speakable_part(text: &str) -> &str {
    let end = TRANSLATION_START
        .find(text)
        .map(|m| m.start())
        .unwrap_or(text.len());
    text[..end].trim()
}

pub fn speakable_segments(text: &str) -> Vec<String> {
    speakable_part(text)
        .split(SEGMENT_DELIMITER)
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
        .collect()
}
