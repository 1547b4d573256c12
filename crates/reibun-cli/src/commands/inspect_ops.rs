use std::fs;
use std::process;
use std::sync::Arc;

use serde::Serialize;
use unicode_width::UnicodeWidthStr;

use reibun_core::conjugation::{self, Candidate, CandidateOrigin};
use reibun_core::entry::{clean_lemma, infer_word_category, VocabularyEntry, WordCategory};
use reibun_core::segmenter::{MatchMethod, SegmentationResult, Segmenter};
use reibun_core::settings::{self, Settings, TokenizerSettings};
use reibun_core::tokenizer::{NullTokenizer, Tokenizer};

macro_rules! die {
    ($result:expr, $($arg:tt)*) => {
        $result.unwrap_or_else(|e| {
            eprintln!($($arg)*, e);
            process::exit(1);
        })
    };
}

fn load_settings(settings_file: Option<&str>) -> Settings {
    match settings_file {
        Some(path) => {
            let content = die!(fs::read_to_string(path), "Error reading {path}: {}");
            die!(settings::parse_settings_toml(&content), "Error: {}")
        }
        None => Settings::default(),
    }
}

#[cfg_attr(not(feature = "vibrato"), allow(unused_variables))]
fn build_tokenizer(dict_file: Option<&str>, cfg: &TokenizerSettings) -> Arc<dyn Tokenizer> {
    match dict_file {
        #[cfg(feature = "vibrato")]
        Some(path) => {
            let tokenizer = die!(
                reibun_core::tokenizer::VibratoTokenizer::from_path(std::path::Path::new(path), cfg),
                "Error loading dictionary: {}"
            );
            Arc::new(tokenizer)
        }
        #[cfg(not(feature = "vibrato"))]
        Some(_) => {
            eprintln!("This build has no dictionary support; rebuild with --features vibrato to use --dict");
            process::exit(1);
        }
        None => Arc::new(NullTokenizer),
    }
}

fn resolve_category(word: &str, category: Option<&str>) -> WordCategory {
    match category {
        Some(s) => die!(s.parse::<WordCategory>(), "Error: {}"),
        None => infer_word_category(word, None),
    }
}

#[derive(Serialize)]
struct SplitReport<'a> {
    word: &'a str,
    category: WordCategory,
    sentence: &'a str,
    before: Option<&'a str>,
    matched: Option<&'a str>,
    after: Option<&'a str>,
    method: MatchMethod,
}

fn format_split_text(lemma: &str, category: WordCategory, sentence: &str, result: &SegmentationResult) -> String {
    let mut out = String::new();
    out.push_str(&format!("=== Split 「{lemma}」 ({category}) ===\n\n"));
    out.push_str(&format!("  {sentence}\n"));

    if !result.is_matched() {
        out.push_str("\nNo match found.\n");
        return out;
    }

    let before = result.before.as_deref().unwrap_or("");
    let matched = result.matched.as_deref().unwrap_or("");
    let after = result.after.as_deref().unwrap_or("");

    // Caret line under the matched span; widths are display columns, so
    // fullwidth characters count double.
    let lead = UnicodeWidthStr::width(before);
    let span = UnicodeWidthStr::width(matched).max(1);
    out.push_str(&format!("  {}{}\n", " ".repeat(lead), "^".repeat(span)));

    out.push_str(&format!("\n  method:  {}\n", result.method));
    out.push_str(&format!("  before:  「{before}」\n"));
    out.push_str(&format!("  matched: 「{matched}」\n"));
    out.push_str(&format!("  after:   「{after}」\n"));
    out
}

/// Segment one word/sentence pair and print the fragments.
pub fn split_cmd(
    word: &str,
    sentence: &str,
    category: Option<&str>,
    settings_file: Option<&str>,
    dict_file: Option<&str>,
    json: bool,
) {
    let settings = load_settings(settings_file);
    let category = resolve_category(word, category);
    let tokenizer = build_tokenizer(dict_file, &settings.tokenizer);
    let segmenter = Segmenter::new(tokenizer, settings.matcher.clone());

    let entry = VocabularyEntry::adhoc(word, category, sentence);
    let result = segmenter.segment(&entry);

    if json {
        let report = SplitReport {
            word: &entry.lemma,
            category,
            sentence,
            before: result.before.as_deref(),
            matched: result.matched.as_deref(),
            after: result.after.as_deref(),
            method: result.method,
        };
        println!(
            "{}",
            serde_json::to_string_pretty(&report).expect("JSON serialization failed")
        );
    } else {
        print!("{}", format_split_text(&entry.lemma, category, sentence, &result));
    }
}

fn origin_label(origin: CandidateOrigin) -> &'static str {
    match origin {
        CandidateOrigin::Lemma => "lemma",
        CandidateOrigin::Stem => "stem",
        CandidateOrigin::CompoundJoined => "compound-joined",
        CandidateOrigin::CompoundPart => "compound-part",
    }
}

#[derive(Serialize)]
struct CandidateReport<'a> {
    text: &'a str,
    origin: &'static str,
    ending: Option<&'static str>,
    continuations: Option<&'static [&'static str]>,
}

impl<'a> CandidateReport<'a> {
    fn new(c: &'a Candidate) -> Self {
        CandidateReport {
            text: &c.text,
            origin: origin_label(c.origin),
            ending: c.rule.map(|r| r.ending),
            continuations: c.rule.map(|r| r.continuations),
        }
    }
}

fn format_candidates_text(lemma: &str, category: WordCategory, cands: &[Candidate]) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "=== Candidates for 「{lemma}」 ({category}, {} candidates) ===\n",
        cands.len(),
    ));
    for (i, c) in cands.iter().enumerate() {
        let pad_width = 16;
        let display_width = UnicodeWidthStr::width(c.text.as_str());
        let padded = if display_width < pad_width {
            format!("{}{}", c.text, " ".repeat(pad_width - display_width))
        } else {
            c.text.clone()
        };
        let rule_note = match c.rule {
            Some(rule) => format!(
                "  (strips 「{}」, {} continuations)",
                rule.ending,
                rule.continuations.len(),
            ),
            None => String::new(),
        };
        out.push_str(&format!(
            "  #{:<2} {} {}{}\n",
            i + 1,
            padded,
            origin_label(c.origin),
            rule_note,
        ));
    }
    out
}

/// List the match candidates generated for a headword.
pub fn candidates_cmd(word: &str, category: Option<&str>, json: bool) {
    let category = resolve_category(word, category);
    let lemma = clean_lemma(word);
    let cands = conjugation::candidates(&lemma, category);

    if json {
        let reports: Vec<CandidateReport> = cands.iter().map(CandidateReport::new).collect();
        println!(
            "{}",
            serde_json::to_string_pretty(&reports).expect("JSON serialization failed")
        );
    } else {
        print!("{}", format_candidates_text(&lemma, category, &cands));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reibun_core::settings::MatcherSettings;

    fn split_text(word: &str, category: WordCategory, sentence: &str) -> String {
        let segmenter = Segmenter::new(
            Arc::new(NullTokenizer),
            MatcherSettings {
                min_stem_chars: 2,
                max_lemma_run: 6,
            },
        );
        let entry = VocabularyEntry::adhoc(word, category, sentence);
        let result = segmenter.segment(&entry);
        format_split_text(&entry.lemma, category, sentence, &result)
    }

    #[test]
    fn split_text_shows_fragments_and_method() {
        let out = split_text("食べる", WordCategory::Verb, "ご飯を食べた。");
        assert!(out.contains("=== Split 「食べる」 (verb) ==="));
        assert!(out.contains("method:  stem-aligned"));
        assert!(out.contains("before:  「ご飯を」"));
        assert!(out.contains("matched: 「食べ」"));
        assert!(out.contains("after:   「た。」"));
    }

    #[test]
    fn split_text_caret_line_sits_under_the_match() {
        let out = split_text("食べる", WordCategory::Verb, "ご飯を食べた。");
        // ご飯を is 3 fullwidth chars = 6 columns; 食べ is 2 = 4 columns
        assert!(out.contains(&format!("  {}{}\n", " ".repeat(6), "^".repeat(4))));
    }

    #[test]
    fn split_text_reports_misses() {
        let out = split_text("留守", WordCategory::Other, "今日はいい天気ですね。");
        assert!(out.contains("No match found."));
    }

    #[test]
    fn candidates_text_lists_origin_tiers() {
        let cands = conjugation::candidates("愛想がいい", WordCategory::IAdjective);
        let out = format_candidates_text("愛想がいい", WordCategory::IAdjective, &cands);
        assert!(out.contains("#1"));
        assert!(out.contains("lemma"));
        assert!(out.contains("stem"));
        assert!(out.contains("compound-joined"));
        assert!(out.contains("compound-part"));
    }

    #[test]
    fn candidates_text_notes_the_rule() {
        let cands = conjugation::candidates("食べる", WordCategory::Verb);
        let out = format_candidates_text("食べる", WordCategory::Verb, &cands);
        assert!(out.contains("strips 「る」"));
    }

    #[test]
    fn explicit_category_overrides_inference() {
        assert_eq!(resolve_category("食べる", Some("noun")), WordCategory::Noun);
        assert_eq!(resolve_category("食べる", None), WordCategory::Verb);
    }

    #[test]
    fn split_report_serializes_method_and_nulls() {
        let report = SplitReport {
            word: "食べる",
            category: WordCategory::Verb,
            sentence: "ご飯を食べた。",
            before: Some("ご飯を"),
            matched: Some("食べ"),
            after: Some("た。"),
            method: MatchMethod::StemAligned,
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["word"], "食べる");
        assert_eq!(json["category"], "verb");
        assert_eq!(json["before"], "ご飯を");
        assert_eq!(json["method"], "stem-aligned");

        let report = SplitReport {
            word: "留守",
            category: WordCategory::Other,
            sentence: "今日はいい天気ですね。",
            before: None,
            matched: None,
            after: None,
            method: MatchMethod::Unmatched,
        };
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["method"], "none");
        assert!(json["before"].is_null());
        assert!(json["matched"].is_null());
        assert!(json["after"].is_null());
    }

    #[test]
    fn candidate_report_carries_rule_fields() {
        let cands = conjugation::candidates("食べる", WordCategory::Verb);
        let reports: Vec<CandidateReport> = cands.iter().map(CandidateReport::new).collect();
        let json = serde_json::to_value(&reports).unwrap();
        assert_eq!(json[0]["text"], "食べる");
        assert_eq!(json[0]["origin"], "lemma");
        assert!(json[0]["ending"].is_null());
        assert!(json[0]["continuations"].is_null());
        assert_eq!(json[1]["text"], "食べ");
        assert_eq!(json[1]["origin"], "stem");
        assert_eq!(json[1]["ending"], "る");
        let conts = json[1]["continuations"].as_array().unwrap();
        assert!(conts.iter().any(|c| *c == "ている"));
    }
}
