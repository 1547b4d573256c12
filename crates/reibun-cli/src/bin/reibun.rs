use std::process;

use clap::{Parser, Subcommand};

use reibun_cli::commands::{config_ops, convert_ops, inspect_ops};
use reibun_cli::trace_init;

#[derive(Parser)]
#[command(name = "reibun", about = "JLPT vocabulary example-sentence segmenter")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Convert level CSV files into a SQL import script or JSONL
    Convert {
        /// Level source as LEVEL=PATH (repeatable, e.g. --source N3=n3.csv)
        #[arg(long = "source", value_name = "LEVEL=PATH", required = true)]
        sources: Vec<String>,
        /// Output file
        #[arg(short, long)]
        output: String,
        /// Output format: sql or jsonl
        #[arg(long, default_value = "sql")]
        format: String,
        /// Settings TOML file (optional)
        #[arg(long)]
        settings: Option<String>,
        /// Tokenizer dictionary file (optional, requires --features vibrato)
        #[arg(long)]
        dict: Option<String>,
        /// Worker threads (0 = one per core)
        #[arg(long)]
        workers: Option<usize>,
    },
    /// Split one sentence around a headword
    Split {
        /// Headword, markers allowed (＊取り組む, 静か（な）)
        word: String,
        /// Sentence to split
        sentence: String,
        /// Word category (verb, i-adjective, na-adjective, noun, other); inferred when omitted
        #[arg(long)]
        category: Option<String>,
        /// Settings TOML file (optional)
        #[arg(long)]
        settings: Option<String>,
        /// Tokenizer dictionary file (optional, requires --features vibrato)
        #[arg(long)]
        dict: Option<String>,
        /// Output as JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// List the match candidates generated for a headword
    Candidates {
        /// Headword, markers allowed
        word: String,
        /// Word category; inferred when omitted
        #[arg(long)]
        category: Option<String>,
        /// Output as JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Export default settings as TOML
    SettingsExport,
    /// Validate a custom settings TOML file
    SettingsValidate {
        /// Path to the TOML file
        file: String,
    },
}

fn parse_source(arg: &str) -> (String, String) {
    match arg.split_once('=') {
        Some((level, path)) if !level.is_empty() && !path.is_empty() => {
            (level.to_string(), path.to_string())
        }
        _ => {
            eprintln!("Invalid --source '{arg}' (expected LEVEL=PATH, e.g. N3=n3.csv)");
            process::exit(1);
        }
    }
}

fn main() {
    trace_init::init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::Convert {
            sources,
            output,
            format,
            settings,
            dict,
            workers,
        } => {
            let sources: Vec<(String, String)> =
                sources.iter().map(|s| parse_source(s)).collect();
            convert_ops::convert(
                &sources,
                &output,
                &format,
                settings.as_deref(),
                dict.as_deref(),
                workers,
            )
        }
        Command::Split {
            word,
            sentence,
            category,
            settings,
            dict,
            json,
        } => inspect_ops::split_cmd(
            &word,
            &sentence,
            category.as_deref(),
            settings.as_deref(),
            dict.as_deref(),
            json,
        ),
        Command::Candidates {
            word,
            category,
            json,
        } => inspect_ops::candidates_cmd(&word, category.as_deref(), json),
        Command::SettingsExport => config_ops::settings_export(),
        Command::SettingsValidate { file } => config_ops::settings_validate(&file),
    }
}
