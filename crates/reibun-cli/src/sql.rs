//! SQL generation for the vocabulary schema.
//!
//! Output is a single transaction of multi-row INSERTs plus verification
//! queries, written to be fed straight to psql. Schedule references go
//! through a subselect so the file works against any schedule id assignment.

use std::fmt::Write as _;

use reibun_core::entry::ScheduleKey;

/// One row of the vocabulary table, ready to render.
#[derive(Debug, Clone)]
pub struct VocabularyRow {
    pub level: String,
    pub ref_no: Option<u32>,
    pub kanji: String,
    pub hiragana: Option<String>,
    pub meaning_en: Option<String>,
    pub example_before: Option<String>,
    pub example_after: Option<String>,
    pub hint: Option<String>,
    pub full_sentence: Option<String>,
    pub page_no: Option<u32>,
    pub schedule: Option<ScheduleKey>,
    pub word_type: Option<String>,
    pub difficulty_level: u8,
}

/// Quote a string literal, doubling embedded single quotes.
pub fn quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

fn text_or_null(value: Option<&str>) -> String {
    match value {
        Some(v) => quote(v),
        None => "NULL".to_string(),
    }
}

fn int_or_null(value: Option<u32>) -> String {
    match value {
        Some(v) => v.to_string(),
        None => "NULL".to_string(),
    }
}

fn schedule_ref(schedule: Option<ScheduleKey>) -> String {
    match schedule {
        Some(key) => format!(
            "(SELECT id FROM schedule WHERE week = {} AND day = {})",
            key.week, key.day
        ),
        None => "NULL".to_string(),
    }
}

fn render_row(row: &VocabularyRow) -> String {
    format!(
        "    ({}, {}, {}, {}, {}, {}, {}, {}, {}, {}, {}, {}, {})",
        quote(&row.level),
        int_or_null(row.ref_no),
        quote(&row.kanji),
        text_or_null(row.hiragana.as_deref()),
        text_or_null(row.meaning_en.as_deref()),
        text_or_null(row.example_before.as_deref()),
        text_or_null(row.example_after.as_deref()),
        text_or_null(row.hint.as_deref()),
        text_or_null(row.full_sentence.as_deref()),
        int_or_null(row.page_no),
        schedule_ref(row.schedule),
        text_or_null(row.word_type.as_deref()),
        row.difficulty_level,
    )
}

const INSERT_HEAD: &str = "INSERT INTO vocabulary (
    level, ref_no, kanji, hiragana, meaning_en,
    example_before, example_after, hint, full_sentence,
    page_no, schedule_id, word_type, difficulty_level
) VALUES
";

/// Render the whole import script. `source_desc` names the levels covered
/// (e.g. "N2 + N3"); `generated_at` is a preformatted timestamp.
pub fn generate(
    rows: &[VocabularyRow],
    rows_per_insert: usize,
    source_desc: &str,
    generated_at: &str,
) -> String {
    let mut out = String::new();
    out.push_str("-- =====================================================\n");
    let _ = writeln!(out, "-- JLPT Vocabulary Data Import ({source_desc})");
    let _ = writeln!(out, "-- Generated by reibun convert on {generated_at}");
    out.push_str("-- example_before and example_after are AUTO-GENERATED\n");
    out.push_str("-- =====================================================\n");
    out.push('\n');
    out.push_str("-- Make sure the schema migration has been applied first!\n");
    out.push('\n');
    out.push_str("BEGIN;\n");

    let chunk_size = rows_per_insert.max(1);
    for chunk in rows.chunks(chunk_size) {
        out.push('\n');
        out.push_str("-- Insert vocabulary data\n");
        out.push_str(INSERT_HEAD);
        let rendered: Vec<String> = chunk.iter().map(render_row).collect();
        out.push_str(&rendered.join(",\n"));
        out.push_str(";\n");
    }

    out.push('\n');
    out.push_str("COMMIT;\n");
    out.push('\n');
    out.push_str("-- Verify the import\n");
    out.push_str("SELECT level, COUNT(*) as count FROM vocabulary GROUP BY level ORDER BY level;\n");
    out.push_str("SELECT 'Total:' as level, COUNT(*) as count FROM vocabulary;\n");
    out
}
