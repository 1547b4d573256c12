//! Vocabulary records and the lexical inference applied while reading them.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::unicode::char_len;

/// Annotation characters that appear inside headwords in the source material:
/// difficulty stars, fullwidth parens around な, circled sense numbers.
/// Stripped before matching; difficulty and category inference look at the
/// unstripped form.
const MARKER_CHARS: &[char] = &[
    '＊', '*', '+', '（', '）', '(', ')', '①', '②', '③', '④', '⑤',
];

/// Coarse lexical category, selecting which conjugation rules apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WordCategory {
    Verb,
    IAdjective,
    NaAdjective,
    Noun,
    Other,
}

impl fmt::Display for WordCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            WordCategory::Verb => "verb",
            WordCategory::IAdjective => "i-adjective",
            WordCategory::NaAdjective => "na-adjective",
            WordCategory::Noun => "noun",
            WordCategory::Other => "other",
        })
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown word category '{0}' (expected verb, i-adjective, na-adjective, noun, or other)")]
pub struct ParseCategoryError(String);

impl FromStr for WordCategory {
    type Err = ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "verb" => Ok(WordCategory::Verb),
            "i-adjective" | "i-adj" => Ok(WordCategory::IAdjective),
            "na-adjective" | "na-adj" => Ok(WordCategory::NaAdjective),
            "noun" => Ok(WordCategory::Noun),
            "other" => Ok(WordCategory::Other),
            _ => Err(ParseCategoryError(s.to_string())),
        }
    }
}

/// Position of an entry in the study schedule (1-based week and day).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleKey {
    pub week: u8,
    pub day: u8,
}

/// One vocabulary record as read from a level file.
///
/// Read-only input to the segmenter. `lemma` is the cleaned dictionary form
/// used for matching; presentation fields (reading, meaning, hint) are carried
/// through untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VocabularyEntry {
    pub level: String,
    pub ref_no: Option<u32>,
    pub lemma: String,
    pub reading: Option<String>,
    pub meaning: Option<String>,
    pub hint: Option<String>,
    pub full_sentence: Option<String>,
    pub word_category: WordCategory,
    pub difficulty: u8,
    pub page_no: Option<u32>,
    pub schedule: Option<ScheduleKey>,
}

impl VocabularyEntry {
    /// Entry carrying only the fields segmentation needs, for one-off use.
    pub fn adhoc(lemma: &str, category: WordCategory, sentence: &str) -> Self {
        Self {
            level: "adhoc".to_string(),
            ref_no: None,
            lemma: clean_lemma(lemma),
            reading: None,
            meaning: None,
            hint: None,
            full_sentence: Some(sentence.to_string()),
            word_category: category,
            difficulty: 1,
            page_no: None,
            schedule: None,
        }
    }
}

/// Strip marker characters and surrounding whitespace from a raw headword.
///
/// Note that the な of 「静か（な）」 survives (only the parens are markers),
/// so na-adjective lemmas come out with their trailing な attached.
pub fn clean_lemma(raw: &str) -> String {
    let stripped: String = raw.chars().filter(|c| !MARKER_CHARS.contains(c)).collect();
    stripped.trim().to_string()
}

/// Difficulty 1-3 from the star/plus markers on the raw headword.
pub fn difficulty_from_raw(raw: &str) -> u8 {
    if raw.contains("＊＊") || raw.contains("**") {
        3
    } else if raw.contains('＊') || raw.contains('*') || raw.contains('+') {
        2
    } else {
        1
    }
}

/// Guess the word category from the raw headword and its English meaning.
///
/// The 「（な）」 marker is decisive; an English meaning starting with "to "
/// marks a verb; otherwise the cleaned ending decides. Words matching none of
/// the heuristics come back as `Other` and are matched without conjugation.
pub fn infer_word_category(raw: &str, meaning: Option<&str>) -> WordCategory {
    if raw.contains("(な)") || raw.contains("（な）") {
        return WordCategory::NaAdjective;
    }
    if let Some(m) = meaning {
        if m.to_lowercase().starts_with("to ") {
            return WordCategory::Verb;
        }
    }
    let clean = clean_lemma(raw);
    if clean.ends_with('い') && char_len(&clean) > 1 {
        return WordCategory::IAdjective;
    }
    if clean.ends_with(|c| matches!(c, 'る' | 'す' | 'く' | 'ぐ' | 'む' | 'ぶ' | 'つ' | 'う')) {
        return WordCategory::Verb;
    }
    WordCategory::Other
}
