//! Runtime settings loaded from TOML.
//!
//! Defaults are embedded via `include_str!("default_settings.toml")`. Callers
//! parse once with `parse_settings_toml` (or take `Settings::default()`) and
//! pass the struct to whatever needs it; there is no process-global settings
//! state.

use serde::Deserialize;

pub const DEFAULT_SETTINGS_TOML: &str = include_str!("default_settings.toml");

/// Returns the embedded default settings TOML content.
pub fn default_toml() -> &'static str {
    DEFAULT_SETTINGS_TOML
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("TOML parse error: {0}")]
    Parse(String),
    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
}

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub matcher: MatcherSettings,
    pub batch: BatchSettings,
    pub tokenizer: TokenizerSettings,
    pub sql: SqlSettings,
}

impl Default for Settings {
    fn default() -> Self {
        parse_settings_toml(DEFAULT_SETTINGS_TOML).expect("default settings TOML must be valid")
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct MatcherSettings {
    /// Stem candidates shorter than this many characters are discarded.
    pub min_stem_chars: usize,
    /// Longest run of consecutive morphemes considered for lemma alignment.
    pub max_lemma_run: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BatchSettings {
    /// Worker threads for batch segmentation. 0 means available parallelism.
    pub workers: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TokenizerSettings {
    /// Column of the morphological feature CSV holding the lemma.
    /// 7 for UniDic output, 6 for IPADIC.
    pub lemma_index: usize,
    /// Column holding the coarse part-of-speech tag.
    pub pos_index: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SqlSettings {
    /// Rows per generated INSERT statement.
    pub rows_per_insert: usize,
}

pub fn parse_settings_toml(toml_str: &str) -> Result<Settings, SettingsError> {
    let s: Settings = toml::from_str(toml_str).map_err(|e| SettingsError::Parse(e.to_string()))?;
    validate(&s)?;
    Ok(s)
}

fn validate(s: &Settings) -> Result<(), SettingsError> {
    macro_rules! check_positive_usize {
        ($section:ident . $field:ident) => {
            if s.$section.$field == 0 {
                return Err(SettingsError::InvalidValue {
                    field: concat!(stringify!($section), ".", stringify!($field)).to_string(),
                    reason: "must be positive".to_string(),
                });
            }
        };
    }

    check_positive_usize!(matcher.min_stem_chars);
    check_positive_usize!(matcher.max_lemma_run);
    check_positive_usize!(sql.rows_per_insert);

    // batch.workers = 0 is meaningful (use available parallelism), and the
    // tokenizer column indices are free-form to cover any analyzer layout.

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_default_toml() {
        let s = parse_settings_toml(DEFAULT_SETTINGS_TOML).unwrap();
        assert_eq!(s.matcher.min_stem_chars, 2);
        assert_eq!(s.matcher.max_lemma_run, 6);
        assert_eq!(s.batch.workers, 0);
        assert_eq!(s.tokenizer.lemma_index, 7);
        assert_eq!(s.tokenizer.pos_index, 0);
        assert_eq!(s.sql.rows_per_insert, 500);
    }

    #[test]
    fn parse_valid_custom_toml() {
        let toml = r#"
[matcher]
min_stem_chars = 1
max_lemma_run = 3

[batch]
workers = 4

[tokenizer]
lemma_index = 6
pos_index = 0

[sql]
rows_per_insert = 100
"#;
        let s = parse_settings_toml(toml).unwrap();
        assert_eq!(s.matcher.min_stem_chars, 1);
        assert_eq!(s.batch.workers, 4);
        assert_eq!(s.tokenizer.lemma_index, 6);
        assert_eq!(s.sql.rows_per_insert, 100);
    }

    #[test]
    fn error_zero_min_stem_chars() {
        let toml = r#"
[matcher]
min_stem_chars = 0
max_lemma_run = 6

[batch]
workers = 0

[tokenizer]
lemma_index = 7
pos_index = 0

[sql]
rows_per_insert = 500
"#;
        let err = parse_settings_toml(toml).unwrap_err();
        assert!(matches!(err, SettingsError::InvalidValue { .. }));
        assert!(err.to_string().contains("matcher.min_stem_chars"));
    }

    #[test]
    fn error_zero_rows_per_insert() {
        let toml = r#"
[matcher]
min_stem_chars = 2
max_lemma_run = 6

[batch]
workers = 0

[tokenizer]
lemma_index = 7
pos_index = 0

[sql]
rows_per_insert = 0
"#;
        let err = parse_settings_toml(toml).unwrap_err();
        assert!(err.to_string().contains("sql.rows_per_insert"));
    }

    #[test]
    fn error_invalid_toml() {
        let err = parse_settings_toml("not valid toml {{{").unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }

    #[test]
    fn error_missing_section() {
        let toml = r#"
[matcher]
min_stem_chars = 2
max_lemma_run = 6
"#;
        let err = parse_settings_toml(toml).unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }
}
