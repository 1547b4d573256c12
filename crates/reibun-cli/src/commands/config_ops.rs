use std::fs;
use std::process;

macro_rules! die {
    ($result:expr, $($arg:tt)*) => {
        $result.unwrap_or_else(|e| {
            eprintln!($($arg)*, e);
            process::exit(1);
        })
    };
}

pub fn settings_export() {
    print!("{}", reibun_core::settings::default_toml());
}

pub fn settings_validate(file: &str) {
    let content = die!(fs::read_to_string(file), "Error reading {file}: {}");
    let s = die!(
        reibun_core::settings::parse_settings_toml(&content),
        "Error: {}"
    );
    println!(
        "OK: matcher.min_stem_chars={}, matcher.max_lemma_run={}, batch.workers={}, sql.rows_per_insert={}",
        s.matcher.min_stem_chars, s.matcher.max_lemma_run, s.batch.workers, s.sql.rows_per_insert
    );
}
