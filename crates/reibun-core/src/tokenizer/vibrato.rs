//! Tokenizer backend over the vibrato morphological analyzer.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use tracing::debug;

use crate::settings::TokenizerSettings;
use crate::tokenizer::{Morpheme, MorphemeCategory, Tokenizer};

#[derive(Debug, thiserror::Error)]
pub enum DictLoadError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("dictionary error: {0}")]
    Dictionary(#[from] ::vibrato::errors::VibratoError),
}

/// Sentence tokenizer backed by a vibrato system dictionary.
///
/// The dictionary is loaded once at construction; `tokenize` allocates a
/// per-call worker, so a single instance can be shared across batch threads.
pub struct VibratoTokenizer {
    tokenizer: ::vibrato::Tokenizer,
    lemma_index: usize,
    pos_index: usize,
}

impl VibratoTokenizer {
    /// Load a system dictionary from `path`, transparently decompressing
    /// `.zst` files.
    pub fn from_path(path: &Path, cfg: &TokenizerSettings) -> Result<Self, DictLoadError> {
        let file = File::open(path)?;
        let dict = if path.extension().is_some_and(|ext| ext == "zst") {
            ::vibrato::Dictionary::read(zstd::Decoder::new(file)?)?
        } else {
            ::vibrato::Dictionary::read(BufReader::new(file))?
        };
        debug!(path = %path.display(), "loaded system dictionary");
        Ok(Self {
            tokenizer: ::vibrato::Tokenizer::new(dict),
            lemma_index: cfg.lemma_index,
            pos_index: cfg.pos_index,
        })
    }
}

impl Tokenizer for VibratoTokenizer {
    fn tokenize(&self, sentence: &str) -> Vec<Morpheme> {
        let mut worker = self.tokenizer.new_worker();
        worker.reset_sentence(sentence);
        worker.tokenize();

        worker
            .token_iter()
            .map(|token| {
                let range = token.range_char();
                let feature = token.feature();
                let lemma = csv_field(feature, self.lemma_index)
                    .filter(|f| !f.is_empty() && *f != "*")
                    .unwrap_or_else(|| token.surface())
                    .to_string();
                let category = csv_field(feature, self.pos_index)
                    .map(category_for)
                    .unwrap_or(MorphemeCategory::Other);
                Morpheme {
                    surface: token.surface().to_string(),
                    lemma,
                    category,
                    start: range.start,
                    end: range.end,
                }
            })
            .collect()
    }
}

/// Field `idx` of a MeCab-style comma-separated feature string. Quoting is
/// not handled; the POS and lemma columns read here carry no embedded commas
/// in UniDic or IPADIC output.
fn csv_field(feature: &str, idx: usize) -> Option<&str> {
    feature.split(',').nth(idx)
}

fn category_for(pos: &str) -> MorphemeCategory {
    match pos {
        "動詞" => MorphemeCategory::Verb,
        "形容詞" => MorphemeCategory::Adjective,
        "形状詞" => MorphemeCategory::AdjectivalNoun,
        "名詞" | "代名詞" => MorphemeCategory::Noun,
        "助詞" => MorphemeCategory::Particle,
        "助動詞" => MorphemeCategory::Auxiliary,
        "記号" | "補助記号" => MorphemeCategory::Symbol,
        _ => MorphemeCategory::Other,
    }
}
