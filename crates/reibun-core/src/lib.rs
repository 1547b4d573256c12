pub mod batch;
pub mod conjugation;
pub mod entry;
pub mod matcher;
pub mod outcome;
pub mod segmenter;
pub mod settings;
pub mod tokenizer;
pub mod unicode;
