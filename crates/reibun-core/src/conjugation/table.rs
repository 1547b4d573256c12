//! Conjugation rule data.
//!
//! One row per dictionary-form ending. A rule contributes the bare stem as a
//! match candidate; its continuation list is the inflection evidence the
//! matcher uses to rank occurrences. Adding a word category means adding rows
//! here, not logic elsewhere.

use crate::entry::WordCategory;

/// A transformation rule: strip `ending` from the lemma to get the stem;
/// `continuations` are the suffixes that stem takes in running text.
#[derive(Debug)]
pub struct ConjugationRule {
    pub category: WordCategory,
    pub ending: &'static str,
    pub continuations: &'static [&'static str],
}

/// Ordered rule table. The first rule whose category and ending match wins,
/// so する precedes る (勉強する must yield 勉強, not 勉強す).
pub static RULES: &[ConjugationRule] = &[
    ConjugationRule {
        category: WordCategory::Verb,
        ending: "する",
        continuations: &[
            "し",
            "して",
            "した",
            "しない",
            "します",
            "しました",
            "しません",
            "しよう",
            "すれば",
            "される",
            "させる",
            "させられる",
            "している",
            "していた",
            "したい",
            "したら",
            "したり",
            "しろ",
            "せよ",
            "せず",
            "しなかった",
        ],
    },
    // る covers ichidan directly; って/った keep godan-る stems recognizable.
    ConjugationRule {
        category: WordCategory::Verb,
        ending: "る",
        continuations: &[
            "て",
            "た",
            "ない",
            "ます",
            "れば",
            "よう",
            "られる",
            "させる",
            "ている",
            "ていた",
            "てる",
            "てた",
            "ず",
            "ずに",
            "たい",
            "たら",
            "たり",
            "ろ",
            "れ",
            "させ",
            "られ",
            "なかった",
            "ません",
            "って",
            "った",
        ],
    },
    ConjugationRule {
        category: WordCategory::Verb,
        ending: "う",
        continuations: &[
            "わ",
            "い",
            "って",
            "った",
            "わない",
            "います",
            "えば",
            "おう",
            "わず",
            "いたい",
            "ったら",
            "ったり",
            "え",
            "わなかった",
        ],
    },
    ConjugationRule {
        category: WordCategory::Verb,
        ending: "く",
        continuations: &[
            "か",
            "き",
            "いて",
            "いた",
            "かない",
            "きます",
            "けば",
            "こう",
            "かず",
            "きたい",
            "いたら",
            "いたり",
            "け",
            "かなかった",
        ],
    },
    ConjugationRule {
        category: WordCategory::Verb,
        ending: "ぐ",
        continuations: &[
            "が",
            "ぎ",
            "いで",
            "いだ",
            "がない",
            "ぎます",
            "げば",
            "ごう",
            "がず",
            "ぎたい",
            "いだら",
            "いだり",
            "げ",
            "がなかった",
        ],
    },
    ConjugationRule {
        category: WordCategory::Verb,
        ending: "す",
        continuations: &[
            "さ",
            "し",
            "して",
            "した",
            "さない",
            "します",
            "せば",
            "そう",
            "さず",
            "したい",
            "したら",
            "したり",
            "せ",
            "さなかった",
        ],
    },
    ConjugationRule {
        category: WordCategory::Verb,
        ending: "つ",
        continuations: &[
            "た",
            "ち",
            "って",
            "った",
            "たない",
            "ちます",
            "てば",
            "とう",
            "たず",
            "ちたい",
            "ったら",
            "ったり",
            "て",
            "たなかった",
        ],
    },
    ConjugationRule {
        category: WordCategory::Verb,
        ending: "ぬ",
        continuations: &[
            "な",
            "に",
            "んで",
            "んだ",
            "なない",
            "にます",
            "ねば",
            "のう",
            "なず",
            "にたい",
            "んだら",
            "んだり",
            "ね",
            "ななかった",
        ],
    },
    ConjugationRule {
        category: WordCategory::Verb,
        ending: "ぶ",
        continuations: &[
            "ば",
            "び",
            "んで",
            "んだ",
            "ばない",
            "びます",
            "べば",
            "ぼう",
            "ばず",
            "びたい",
            "んだら",
            "んだり",
            "べ",
            "ばなかった",
        ],
    },
    ConjugationRule {
        category: WordCategory::Verb,
        ending: "む",
        continuations: &[
            "ま",
            "み",
            "んで",
            "んだ",
            "まない",
            "みます",
            "めば",
            "もう",
            "まず",
            "みたい",
            "んだら",
            "んだり",
            "め",
            "まなかった",
        ],
    },
    ConjugationRule {
        category: WordCategory::IAdjective,
        ending: "い",
        continuations: &[
            "く",
            "くて",
            "かった",
            "くない",
            "くなかった",
            "ければ",
            "さ",
            "そう",
            "すぎる",
            "すぎ",
            "み",
        ],
    },
    ConjugationRule {
        category: WordCategory::NaAdjective,
        ending: "な",
        continuations: &["に", "だ", "で", "だった", "ではない", "じゃない"],
    },
];
