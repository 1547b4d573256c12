//! Candidate generation for inflected-form matching.
//!
//! Given a dictionary-form lemma and its word category, enumerate the surface
//! prefixes worth searching for in a sentence: the lemma itself, the bare stem
//! from the conjugation rule table, and particle-compound variants.

use std::collections::HashSet;

mod table;

pub use table::{ConjugationRule, RULES};

use crate::entry::WordCategory;
use crate::unicode::char_len;

/// Particles that may sit inside a compound headword (愛想がいい, 気にする).
const COMPOUND_PARTICLES: &[char] = &['が', 'を', 'に', 'で', 'と', 'の'];

/// Where a candidate came from. Declaration order is priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum CandidateOrigin {
    /// The cleaned lemma itself.
    Lemma,
    /// Bare stem from a conjugation rule.
    Stem,
    /// The compound with an internal particle removed.
    CompoundJoined,
    /// One part of a particle compound.
    CompoundPart,
}

/// A surface prefix to search for in a sentence.
#[derive(Debug, Clone)]
pub struct Candidate {
    pub text: String,
    pub origin: CandidateOrigin,
    /// Rule behind a `Stem` candidate; carries the continuation suffixes
    /// used as inflection evidence when ranking occurrences.
    pub rule: Option<&'static ConjugationRule>,
}

impl Candidate {
    /// True when `following` (the sentence text after an occurrence) starts
    /// with one of this candidate's continuation suffixes or its stripped
    /// dictionary ending.
    pub fn continues_into(&self, following: &str) -> bool {
        match self.rule {
            Some(rule) => {
                following.starts_with(rule.ending)
                    || rule.continuations.iter().any(|c| following.starts_with(c))
            }
            None => false,
        }
    }
}

/// First rule matching `lemma` under `category`, if any. The stripped stem
/// must be non-empty, so single-morpheme endings like 「する」 itself get no
/// rule.
pub fn rule_for(lemma: &str, category: WordCategory) -> Option<&'static ConjugationRule> {
    RULES.iter().find(|rule| {
        rule.category == category && lemma.ends_with(rule.ending) && lemma.len() > rule.ending.len()
    })
}

/// Enumerate match candidates for `lemma`, ordered by priority: origin tier
/// first, longer candidates before shorter within a tier. Duplicates and
/// empty strings are dropped.
pub fn candidates(lemma: &str, category: WordCategory) -> Vec<Candidate> {
    let mut out: Vec<Candidate> = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();
    let mut push = |out: &mut Vec<Candidate>,
                    text: String,
                    origin: CandidateOrigin,
                    rule: Option<&'static ConjugationRule>| {
        if !text.is_empty() && seen.insert(text.clone()) {
            out.push(Candidate { text, origin, rule });
        }
    };

    if lemma.is_empty() {
        return out;
    }

    push(&mut out, lemma.to_string(), CandidateOrigin::Lemma, None);

    if let Some(rule) = rule_for(lemma, category) {
        if let Some(stem) = lemma.strip_suffix(rule.ending) {
            push(&mut out, stem.to_string(), CandidateOrigin::Stem, Some(rule));
        }
    }

    for &particle in COMPOUND_PARTICLES {
        if lemma.contains(particle) {
            let joined: String = lemma.chars().filter(|&c| c != particle).collect();
            push(&mut out, joined, CandidateOrigin::CompoundJoined, None);
            for part in lemma.split(particle) {
                push(
                    &mut out,
                    part.to_string(),
                    CandidateOrigin::CompoundPart,
                    None,
                );
            }
        }
    }

    out.sort_by(|a, b| {
        a.origin
            .cmp(&b.origin)
            .then_with(|| char_len(&b.text).cmp(&char_len(&a.text)))
    });
    out
}
