use std::collections::BTreeMap;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::process;
use std::sync::Arc;

use serde::Serialize;

use reibun_core::batch;
use reibun_core::entry::{VocabularyEntry, WordCategory};
use reibun_core::segmenter::{MatchMethod, SegmentationResult, Segmenter};
use reibun_core::settings::{self, Settings, TokenizerSettings};
use reibun_core::tokenizer::{NullTokenizer, Tokenizer};

use crate::source::{self, SourceRecord};
use crate::sql::{self, VocabularyRow};

macro_rules! die {
    ($result:expr, $($arg:tt)*) => {
        $result.unwrap_or_else(|e| {
            eprintln!($($arg)*, e);
            process::exit(1);
        })
    };
}

enum OutputFormat {
    Sql,
    Jsonl,
}

/// A converted row as emitted in JSONL output, one object per vocabulary row.
#[derive(Serialize)]
struct JsonRecord<'a> {
    level: &'a str,
    ref_no: Option<u32>,
    kanji: &'a str,
    reading: Option<&'a str>,
    meaning: Option<&'a str>,
    full_sentence: Option<&'a str>,
    before: Option<&'a str>,
    matched: Option<&'a str>,
    after: Option<&'a str>,
    method: MatchMethod,
}

impl<'a> JsonRecord<'a> {
    fn new(record: &'a SourceRecord, result: &'a SegmentationResult) -> Self {
        JsonRecord {
            level: &record.entry.level,
            ref_no: record.entry.ref_no,
            kanji: &record.kanji,
            reading: record.entry.reading.as_deref(),
            meaning: record.entry.meaning.as_deref(),
            full_sentence: record.entry.full_sentence.as_deref(),
            before: result.before.as_deref(),
            matched: result.matched.as_deref(),
            after: result.after.as_deref(),
            method: result.method,
        }
    }
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
                reibun_core::tokenizer::VibratoTokenizer::from_path(Path::new(path), cfg),
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

fn word_type_label(category: WordCategory) -> Option<String> {
    match category {
        WordCategory::Other => None,
        c => Some(c.to_string()),
    }
}

/// Map one source row and its segmentation result to a SQL row.
///
/// Empty fragments become NULL; when segmentation failed but the row has a
/// sentence, the sheet's supporting-word columns fill in instead.
fn to_row(record: &SourceRecord, result: &SegmentationResult) -> VocabularyRow {
    let (example_before, example_after) = if result.is_matched() {
        (
            result.before.clone().filter(|s| !s.is_empty()),
            result.after.clone().filter(|s| !s.is_empty()),
        )
    } else if record.entry.full_sentence.is_some() {
        (record.support_before.clone(), record.support_after.clone())
    } else {
        (None, None)
    };

    VocabularyRow {
        level: record.entry.level.clone(),
        ref_no: record.entry.ref_no,
        kanji: record.kanji.clone(),
        hiragana: record.entry.reading.clone(),
        meaning_en: record.entry.meaning.clone(),
        example_before,
        example_after,
        hint: record.entry.hint.clone(),
        full_sentence: record.entry.full_sentence.clone(),
        page_no: record.entry.page_no,
        schedule: record.entry.schedule,
        word_type: word_type_label(record.entry.word_category),
        difficulty_level: record.entry.difficulty,
    }
}

/// Read every level CSV, segment all example sentences, and write the
/// combined output file. The success report goes to stderr.
pub fn convert(
    sources: &[(String, String)],
    output: &str,
    format: &str,
    settings_file: Option<&str>,
    dict_file: Option<&str>,
    workers: Option<usize>,
) {
    let format = match format {
        "sql" => OutputFormat::Sql,
        "jsonl" => OutputFormat::Jsonl,
        other => {
            eprintln!("Unknown output format: {other} (expected sql or jsonl)");
            process::exit(1);
        }
    };

    let settings = load_settings(settings_file);
    let tokenizer = build_tokenizer(dict_file, &settings.tokenizer);
    let segmenter = Segmenter::new(tokenizer, settings.matcher.clone());
    let workers = workers.unwrap_or(settings.batch.workers);

    let mut records: Vec<SourceRecord> = Vec::new();
    for (level, path) in sources {
        eprintln!("Reading {path} ({level})...");
        let level_records = die!(
            source::read_level_csv(Path::new(path), level),
            "Error reading {path}: {}"
        );
        eprintln!("  {} entries", level_records.len());
        records.extend(level_records);
    }
    if records.is_empty() {
        eprintln!("No vocabulary rows found");
        process::exit(1);
    }

    let entries: Vec<VocabularyEntry> = records.iter().map(|r| r.entry.clone()).collect();
    let batch::BatchOutput { results, outcomes } = batch::run(&segmenter, &entries, workers);

    let file = die!(fs::File::create(output), "Error creating {output}: {}");
    let mut writer = BufWriter::new(file);
    match format {
        OutputFormat::Sql => {
            let rows: Vec<VocabularyRow> = records
                .iter()
                .zip(&results)
                .map(|(record, result)| to_row(record, result))
                .collect();
            let source_desc: Vec<&str> = sources.iter().map(|(level, _)| level.as_str()).collect();
            let generated_at = chrono::Utc::now()
                .format("%Y-%m-%d %H:%M:%S UTC")
                .to_string();
            let script = sql::generate(
                &rows,
                settings.sql.rows_per_insert,
                &source_desc.join(" + "),
                &generated_at,
            );
            die!(writer.write_all(script.as_bytes()), "Error writing {output}: {}");
        }
        OutputFormat::Jsonl => {
            for (record, result) in records.iter().zip(&results) {
                let line = serde_json::to_string(&JsonRecord::new(record, result))
                    .expect("JSON serialization failed");
                die!(writeln!(writer, "{line}"), "Error writing {output}: {}");
            }
        }
    }
    die!(writer.flush(), "Error writing {output}: {}");

    let mut level_words: BTreeMap<&str, usize> = BTreeMap::new();
    for record in &records {
        *level_words.entry(record.entry.level.as_str()).or_default() += 1;
    }

    eprintln!();
    eprint!("{outcomes}");
    eprintln!();
    eprintln!("--- Summary by level ---");
    for (level, count) in &level_words {
        eprintln!("  {level}: {count} words");
    }
    eprintln!("Output written to {output}");
}
