//! Morpheme segmentation behind a trait.
//!
//! The matcher only needs surfaces, lemmas and character offsets, so the
//! analyzer is abstracted to that. `VibratoTokenizer` (behind the `vibrato`
//! feature) is the production backend; `NullTokenizer` runs without any
//! morphological dictionary, which disables lemma alignment but leaves the
//! exact and stem paths working.

use serde::Serialize;

#[cfg(feature = "vibrato")]
pub mod vibrato;

#[cfg(feature = "vibrato")]
pub use vibrato::{DictLoadError, VibratoTokenizer};

/// Coarse grammatical category of a morpheme, mapped from the analyzer's
/// leading part-of-speech field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum MorphemeCategory {
    Verb,
    /// 形容詞 (i-adjective).
    Adjective,
    /// 形状詞 (na-adjective stem in UniDic).
    AdjectivalNoun,
    Noun,
    Particle,
    Auxiliary,
    Symbol,
    Other,
}

/// One morpheme of a tokenized sentence. Offsets are character positions
/// into the original sentence, `start..end` exclusive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Morpheme {
    pub surface: String,
    /// Dictionary form as reported by the analyzer; falls back to the
    /// surface when the analyzer has none.
    pub lemma: String,
    pub category: MorphemeCategory,
    pub start: usize,
    pub end: usize,
}

/// A sentence tokenizer. The backing dictionary is loaded once and shared
/// read-only, so implementations must be `Send + Sync`.
pub trait Tokenizer: Send + Sync {
    /// Segment `sentence` into morphemes with character offsets.
    ///
    /// Never fails: input the backend cannot segment yields an empty
    /// sequence, which callers treat as "no morpheme information".
    fn tokenize(&self, sentence: &str) -> Vec<Morpheme>;
}

/// Tokenizer for environments without a morphological dictionary.
pub struct NullTokenizer;

impl Tokenizer for NullTokenizer {
    fn tokenize(&self, _sentence: &str) -> Vec<Morpheme> {
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_tokenizer_returns_no_morphemes() {
        let t = NullTokenizer;
        assert!(t.tokenize("彼女は愛想がいい。").is_empty());
        assert!(t.tokenize("").is_empty());
    }
}
