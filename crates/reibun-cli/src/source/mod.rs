//! Tabular vocabulary ingestion.
//!
//! Each level arrives as a CSV export of the course spreadsheet. Columns are
//! looked up through the header row, so their order does not matter; rows
//! without a serial number or a headword are skipped and counted.

use std::path::Path;

use reibun_core::entry::{self, ScheduleKey, VocabularyEntry};

/// Errors from reading a vocabulary CSV.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("parse error: {0}")]
    Parse(String),
}

/// One vocabulary row: the parsed entry plus the display and fallback fields
/// the converter needs verbatim.
#[derive(Debug, Clone)]
pub struct SourceRecord {
    pub entry: VocabularyEntry,
    /// Headword exactly as the sheet displays it, markers included.
    pub kanji: String,
    pub support_before: Option<String>,
    pub support_after: Option<String>,
}

struct Columns {
    sr_no: Option<usize>,
    kanji: Option<usize>,
    raw: Option<usize>,
    hiragana: Option<usize>,
    meaning: Option<usize>,
    hint: Option<usize>,
    sentence: Option<usize>,
    support_before: Option<usize>,
    support_after: Option<usize>,
    page_no: Option<usize>,
    lecture: Option<usize>,
}

impl Columns {
    fn resolve(headers: &csv::StringRecord) -> Self {
        let find = |name: &str| headers.iter().position(|h| h.trim() == name);
        Columns {
            sr_no: find("Sr no"),
            kanji: find("Kanji"),
            raw: find("Raw"),
            hiragana: find("Hiragana"),
            meaning: find("Meaning"),
            hint: find("Hint"),
            sentence: find("Sentence"),
            support_before: find("Supporting word 1"),
            support_after: find("Supporting word 2"),
            page_no: find("Page no."),
            lecture: find("Lecture"),
        }
    }
}

fn field(row: &csv::StringRecord, idx: Option<usize>) -> Option<String> {
    idx.and_then(|i| row.get(i))
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// Integer cells exported from spreadsheets often carry a float suffix
/// ("12.0"); accept both forms.
fn lenient_u32(raw: &str) -> Option<u32> {
    if let Ok(v) = raw.parse::<u32>() {
        return Some(v);
    }
    let f = raw.parse::<f64>().ok()?;
    if f.is_finite() && f >= 0.0 && f <= u32::MAX as f64 {
        Some(f as u32)
    } else {
        None
    }
}

/// Parse a schedule cell like 1週3日 into week and day numbers.
fn parse_week_day(raw: &str) -> Option<ScheduleKey> {
    let (week, rest) = raw.trim().split_once('週')?;
    let day = rest.strip_suffix('日')?;
    Some(ScheduleKey {
        week: week.parse().ok()?,
        day: day.parse().ok()?,
    })
}

/// Read every usable row of a level's CSV.
pub fn read_level_csv(path: &Path, level: &str) -> Result<Vec<SourceRecord>, SourceError> {
    let mut reader = csv::Reader::from_path(path)?;
    let headers = reader.headers()?.clone();
    let columns = Columns::resolve(&headers);
    if columns.sr_no.is_none() {
        return Err(SourceError::Parse(format!(
            "no 'Sr no' column in {}",
            path.display()
        )));
    }
    if columns.kanji.is_none() && columns.raw.is_none() {
        return Err(SourceError::Parse(format!(
            "no 'Kanji' or 'Raw' column in {}",
            path.display()
        )));
    }

    let mut records = Vec::new();
    let mut total = 0u64;
    let mut skipped = 0u64;

    for row in reader.records() {
        let row = row?;
        total += 1;

        let ref_no = field(&row, columns.sr_no).and_then(|s| lenient_u32(&s));
        if ref_no.is_none() {
            skipped += 1;
            continue;
        }
        let Some(kanji) = field(&row, columns.kanji).or_else(|| field(&row, columns.raw)) else {
            skipped += 1;
            continue;
        };

        // Difficulty markers live on the raw cell; fall back to the display
        // form when the sheet has no separate Raw column.
        let raw = field(&row, columns.raw).unwrap_or_else(|| kanji.clone());
        let meaning = field(&row, columns.meaning);
        let word_category = entry::infer_word_category(&raw, meaning.as_deref());
        let difficulty = entry::difficulty_from_raw(&raw);
        let schedule = field(&row, columns.lecture).and_then(|s| parse_week_day(&s));

        let entry = VocabularyEntry {
            level: level.to_string(),
            ref_no,
            lemma: entry::clean_lemma(&kanji),
            reading: field(&row, columns.hiragana),
            meaning,
            hint: field(&row, columns.hint),
            full_sentence: field(&row, columns.sentence),
            word_category,
            difficulty,
            page_no: field(&row, columns.page_no).and_then(|s| lenient_u32(&s)),
            schedule,
        };

        records.push(SourceRecord {
            entry,
            kanji,
            support_before: field(&row, columns.support_before),
            support_after: field(&row, columns.support_after),
        });
    }

    eprintln!("  (skipped {skipped} of {total} rows)");
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use reibun_core::entry::WordCategory;

    const SAMPLE: &str = "\
Sr no,Raw,Kanji,Hiragana,Meaning,Hint,Sentence,Supporting word 1,Supporting word 2,Page no.,Lecture
1,＊食べる,食べる,たべる,\"to eat, to have a meal\",,私は毎日ご飯を食べている。,ご飯を,もの,12.0,1週1日
2,静か（な）,静か（な）,しずか,quiet,図書館,,,,13,2週3日
,,,,,,,,,,
x,愛想がいい,愛想がいい,あいそがいい,amiable,,,,,,
";

    fn write_sample() -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("n3.csv");
        std::fs::write(&path, SAMPLE).unwrap();
        (dir, path)
    }

    #[test]
    fn reads_rows_and_skips_incomplete_ones() {
        let (_dir, path) = write_sample();
        let records = read_level_csv(&path, "N3").unwrap();
        assert_eq!(records.len(), 2);

        let first = &records[0];
        assert_eq!(first.entry.level, "N3");
        assert_eq!(first.entry.ref_no, Some(1));
        assert_eq!(first.kanji, "食べる");
        assert_eq!(first.entry.lemma, "食べる");
        assert_eq!(first.entry.reading.as_deref(), Some("たべる"));
        assert_eq!(first.entry.meaning.as_deref(), Some("to eat, to have a meal"));
        assert_eq!(first.entry.word_category, WordCategory::Verb);
        assert_eq!(first.entry.difficulty, 2);
        assert_eq!(first.entry.page_no, Some(12));
        assert_eq!(first.entry.schedule, Some(ScheduleKey { week: 1, day: 1 }));
        assert_eq!(first.support_before.as_deref(), Some("ご飯を"));
        assert_eq!(first.support_after.as_deref(), Some("もの"));

        let second = &records[1];
        assert_eq!(second.kanji, "静か（な）");
        assert_eq!(second.entry.lemma, "静かな");
        assert_eq!(second.entry.word_category, WordCategory::NaAdjective);
        assert_eq!(second.entry.difficulty, 1);
        assert!(second.entry.full_sentence.is_none());
        assert_eq!(second.entry.schedule, Some(ScheduleKey { week: 2, day: 3 }));
    }

    #[test]
    fn missing_key_columns_are_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.csv");
        std::fs::write(&path, "Kanji,Meaning\nfoo,bar\n").unwrap();
        assert!(matches!(
            read_level_csv(&path, "N3"),
            Err(SourceError::Parse(_))
        ));
    }

    #[test]
    fn parse_week_day_cells() {
        assert_eq!(
            parse_week_day("1週1日"),
            Some(ScheduleKey { week: 1, day: 1 })
        );
        assert_eq!(
            parse_week_day(" 12週3日 "),
            Some(ScheduleKey { week: 12, day: 3 })
        );
        assert_eq!(parse_week_day("1週"), None);
        assert_eq!(parse_week_day("週日"), None);
        assert_eq!(parse_week_day("later"), None);
    }

    #[test]
    fn lenient_integer_cells() {
        assert_eq!(lenient_u32("12"), Some(12));
        assert_eq!(lenient_u32("12.0"), Some(12));
        assert_eq!(lenient_u32("-3"), None);
        assert_eq!(lenient_u32("abc"), None);
    }
}
