//! Splitting an example sentence into the text before, inside, and after the
//! headword occurrence.
//!
//! The `Segmenter` ties the pieces together: it runs the tokenizer over the
//! sentence, asks the matcher for a span, and slices the sentence at that
//! span. When nothing matches, all three fragments are absent and the method
//! reports as "none".

#[cfg(test)]
mod tests;

use std::sync::Arc;

use serde::Serialize;
use tracing::debug_span;

use crate::entry::VocabularyEntry;
use crate::matcher;
use crate::settings::MatcherSettings;
use crate::tokenizer::Tokenizer;
use crate::unicode::char_span_to_byte_span;

pub use crate::matcher::{MatchMethod, MatchSpan};

/// One segmented sentence. For a successful match all three fragments are
/// present (possibly empty at the edges) and concatenate back to the input
/// sentence; for a failed one they are all `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SegmentationResult {
    pub before: Option<String>,
    pub matched: Option<String>,
    pub after: Option<String>,
    pub method: MatchMethod,
}

impl SegmentationResult {
    pub fn is_matched(&self) -> bool {
        self.method != MatchMethod::Unmatched
    }

    fn unmatched() -> Self {
        SegmentationResult {
            before: None,
            matched: None,
            after: None,
            method: MatchMethod::Unmatched,
        }
    }
}

/// Conjugation-aware sentence splitter.
///
/// Holds a shared tokenizer plus the matcher settings; `segment` is `&self`
/// and carries no per-call state, so one instance serves all worker threads.
pub struct Segmenter {
    tokenizer: Arc<dyn Tokenizer>,
    matcher: MatcherSettings,
}

impl Segmenter {
    pub fn new(tokenizer: Arc<dyn Tokenizer>, matcher: MatcherSettings) -> Self {
        Segmenter { tokenizer, matcher }
    }

    /// Segment the entry's own example sentence. Entries without one come
    /// back unmatched.
    pub fn segment(&self, entry: &VocabularyEntry) -> SegmentationResult {
        match entry.full_sentence.as_deref() {
            Some(sentence) => self.segment_sentence(entry, sentence),
            None => SegmentationResult::unmatched(),
        }
    }

    /// Segment an arbitrary sentence against the entry's headword.
    pub fn segment_sentence(&self, entry: &VocabularyEntry, sentence: &str) -> SegmentationResult {
        let _span = debug_span!("segment", lemma = %entry.lemma).entered();
        if sentence.is_empty() {
            return SegmentationResult::unmatched();
        }

        let morphemes = self.tokenizer.tokenize(sentence);
        let Some(found) = matcher::find_match(entry, sentence, &morphemes, &self.matcher) else {
            return SegmentationResult::unmatched();
        };

        match char_span_to_byte_span(sentence, found.start, found.end) {
            Some((b, e)) => SegmentationResult {
                before: Some(sentence[..b].to_string()),
                matched: Some(sentence[b..e].to_string()),
                after: Some(sentence[e..].to_string()),
                method: found.method,
            },
            None => SegmentationResult::unmatched(),
        }
    }
}
