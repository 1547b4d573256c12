
use std::collections::HashMap;
use std::sync::Arc;

use crate::entry::{VocabularyEntry, WordCategory};
use crate::settings::Settings;
use crate::tokenizer::{Morpheme, MorphemeCategory, Tokenizer};

use super::Segmenter;

/// Tokenizer backed by canned analyses. Sentences it has never seen come
/// back empty, which exercises the no-morpheme fallbacks.
pub(super) struct FixtureTokenizer {
    analyses: HashMap<String, Vec<Morpheme>>,
}

impl FixtureTokenizer {
    pub(super) fn new() -> Self {
        FixtureTokenizer {
            analyses: HashMap::new(),
        }
    }

    /// Register `sentence` with morphemes given as (surface, lemma) pairs;
    /// offsets are derived from the surfaces.
    pub(super) fn with(mut self, sentence: &str, pairs: &[(&str, &str)]) -> Self {
        let mut start = 0;
        let mut morphemes = Vec::new();
        for (surface, lemma) in pairs {
            let end = start + surface.chars().count();
            morphemes.push(Morpheme {
                surface: surface.to_string(),
                lemma: lemma.to_string(),
                category: MorphemeCategory::Other,
                start,
                end,
            });
            start = end;
        }
        self.analyses.insert(sentence.to_string(), morphemes);
        self
    }
}

impl Tokenizer for FixtureTokenizer {
    fn tokenize(&self, sentence: &str) -> Vec<Morpheme> {
        self.analyses.get(sentence).cloned().unwrap_or_default()
    }
}

pub(super) fn segmenter(tokenizer: impl Tokenizer + 'static) -> Segmenter {
    Segmenter::new(Arc::new(tokenizer), Settings::default().matcher)
}

pub(super) fn entry(lemma: &str, category: WordCategory, sentence: &str) -> VocabularyEntry {
    VocabularyEntry::adhoc(lemma, category, sentence)
}

/// A matched result must reassemble into the original sentence.
pub(super) fn assert_reassembles(result: &super::SegmentationResult, sentence: &str) {
    let joined = format!(
        "{}{}{}",
        result.before.as_deref().unwrap_or_default(),
        result.matched.as_deref().unwrap_or_default(),
        result.after.as_deref().unwrap_or_default(),
    );
    assert_eq!(joined, sentence);
}
