//! Locating a headword, or an inflected form of it, inside a sentence.
//!
//! Three passes in fixed priority order: exact substring, lemma alignment
//! over the morpheme sequence, stem alignment via conjugation candidates.
//! All offsets are character positions.

use std::collections::HashSet;
use std::fmt;

use serde::Serialize;
use tracing::{debug, debug_span};

use crate::conjugation::{self, Candidate, CandidateOrigin};
use crate::entry::VocabularyEntry;
use crate::settings::MatcherSettings;
use crate::tokenizer::Morpheme;
use crate::unicode::{byte_to_char, char_len};

/// How a match was found. `Unmatched` reads as "none" in output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum MatchMethod {
    Exact,
    LemmaAligned,
    StemAligned,
    #[serde(rename = "none")]
    Unmatched,
}

impl fmt::Display for MatchMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            MatchMethod::Exact => "exact",
            MatchMethod::LemmaAligned => "lemma-aligned",
            MatchMethod::StemAligned => "stem-aligned",
            MatchMethod::Unmatched => "none",
        })
    }
}

/// A located occurrence: character span into the sentence plus the method
/// that found it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatchSpan {
    pub start: usize,
    pub end: usize,
    pub method: MatchMethod,
}

/// Find the span of `entry.lemma` (or an inflected occurrence) in `sentence`.
///
/// Returns `None` when nothing matches; the caller records that as a failed
/// attempt rather than an error.
pub(crate) fn find_match(
    entry: &VocabularyEntry,
    sentence: &str,
    morphemes: &[Morpheme],
    cfg: &MatcherSettings,
) -> Option<MatchSpan> {
    let _span = debug_span!("find_match", lemma = %entry.lemma, level = %entry.level).entered();
    if sentence.is_empty() || entry.lemma.is_empty() {
        return None;
    }

    let found = exact_match(&entry.lemma, sentence)
        .or_else(|| lemma_aligned(&entry.lemma, morphemes, cfg.max_lemma_run))
        .or_else(|| stem_aligned(entry, sentence, morphemes, cfg));

    match found {
        Some(span) => debug!(method = %span.method, start = span.start, end = span.end),
        None => debug!("no match"),
    }
    found
}

/// Leftmost verbatim occurrence of the lemma.
fn exact_match(lemma: &str, sentence: &str) -> Option<MatchSpan> {
    let byte_idx = sentence.find(lemma)?;
    let start = byte_to_char(sentence, byte_idx)?;
    Some(MatchSpan {
        start,
        end: start + char_len(lemma),
        method: MatchMethod::Exact,
    })
}

/// Leftmost contiguous morpheme run whose concatenated lemmas equal the
/// headword. A single inflected morpheme is the common case (食べ with lemma
/// 食べる); runs cover compounds the analyzer splits apart.
fn lemma_aligned(lemma: &str, morphemes: &[Morpheme], max_run: usize) -> Option<MatchSpan> {
    for i in 0..morphemes.len() {
        let mut concat = String::new();
        for j in i..morphemes.len().min(i + max_run) {
            if j > i && morphemes[j].start != morphemes[j - 1].end {
                break;
            }
            concat.push_str(&morphemes[j].lemma);
            if concat.len() > lemma.len() {
                break;
            }
            if concat == lemma {
                return Some(MatchSpan {
                    start: morphemes[i].start,
                    end: morphemes[j].end,
                    method: MatchMethod::LemmaAligned,
                });
            }
        }
    }
    None
}

/// Try conjugation candidates in priority order; for each, pick the best
/// occurrence in the sentence.
fn stem_aligned(
    entry: &VocabularyEntry,
    sentence: &str,
    morphemes: &[Morpheme],
    cfg: &MatcherSettings,
) -> Option<MatchSpan> {
    let boundaries: HashSet<usize> = morphemes.iter().map(|m| m.start).collect();

    for cand in conjugation::candidates(&entry.lemma, entry.word_category) {
        if cand.origin == CandidateOrigin::Lemma {
            // the exact pass already searched the lemma verbatim
            continue;
        }
        if char_len(&cand.text) < cfg.min_stem_chars {
            continue;
        }
        if let Some(span) = best_occurrence(&cand, sentence, &boundaries) {
            return Some(span);
        }
    }
    None
}

/// Rank the occurrences of a candidate: inflection evidence (a known
/// continuation suffix follows) outranks morpheme-boundary alignment, which
/// outranks neither; leftmost wins inside a rank. With no morphemes and no
/// continuation hit this degrades to plain leftmost.
fn best_occurrence(
    cand: &Candidate,
    sentence: &str,
    boundaries: &HashSet<usize>,
) -> Option<MatchSpan> {
    let cand_chars = char_len(&cand.text);
    let step = cand.text.chars().next().map(char::len_utf8).unwrap_or(1);
    let mut best: Option<(u8, usize)> = None;

    let mut search_from = 0;
    while let Some(rel) = sentence[search_from..].find(&cand.text) {
        let byte_idx = search_from + rel;
        search_from = byte_idx + step;

        let Some(start) = byte_to_char(sentence, byte_idx) else {
            continue;
        };
        let following = &sentence[byte_idx + cand.text.len()..];

        let mut score = 0u8;
        if cand.continues_into(following) {
            score += 2;
        }
        if boundaries.contains(&start) {
            score += 1;
        }

        if best.map_or(true, |(s, _)| score > s) {
            best = Some((score, start));
        }
        if score == 3 {
            break;
        }
    }

    best.map(|(_, start)| MatchSpan {
        start,
        end: start + cand_chars,
        method: MatchMethod::StemAligned,
    })
}
