//! Command-line entry point.
//!
//! # Responsibility
//! - Parse arguments into a `RunConfig`.
//! - Initialize logging, open the dictionary and run one extraction.
//! - Print the end-of-run summary; exit non-zero on aborting failures.

use chrono::Local;
use clap::Parser;
use kobonotes_core::{
    default_log_level, init_logging, AnnotationQuery, ExtractService, OrgHeader, OutputPaths,
    RunConfig, RunReport, WordNet,
};
use log::error;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "kobonotes")]
#[command(about = "Extract Kobo highlights into an Org quote file and an Anki vocabulary deck")]
#[command(version)]
struct Cli {
    /// Path to the device database (KoboReader.sqlite)
    #[arg(long, env = "KOBO_DB")]
    kobo_db: PathBuf,

    /// SQL file returning Text, Title, Attribution and DateLastRead columns
    #[arg(long)]
    sql_extract_annotations: Option<PathBuf>,

    /// WordNet `dict` directory
    #[arg(long, env = "WORDNET_DIR")]
    wordnet_dir: PathBuf,

    /// Highlights with at most this many words become vocabulary candidates
    #[arg(long, default_value_t = 2)]
    max_word_len: usize,

    #[arg(long, default_value = "annotations.org")]
    org_file: PathBuf,

    #[arg(long, default_value = "anki.csv")]
    anki_csv: PathBuf,

    #[arg(long, default_value = "Kobo Annotations")]
    org_title: String,

    #[arg(long, env = "USER", default_value = "")]
    org_user: String,

    /// Defaults to today's date
    #[arg(long)]
    org_date: Option<String>,

    #[arg(long, default_value = "fold")]
    org_initial_visibility: String,

    /// Abort on the first dictionary failure instead of recording it
    #[arg(long)]
    strict: bool,

    #[arg(long, default_value = "logs")]
    logs_dir: PathBuf,

    /// trace|debug|info|warn|error
    #[arg(long)]
    log_level: Option<String>,
}

impl Cli {
    fn run_config(&self) -> RunConfig {
        RunConfig {
            max_word_len: self.max_word_len,
            org: OrgHeader {
                title: self.org_title.clone(),
                user: self.org_user.clone(),
                date: self
                    .org_date
                    .clone()
                    .unwrap_or_else(|| Local::now().format("%Y-%m-%d").to_string()),
                visibility: self.org_initial_visibility.clone(),
            },
            output: OutputPaths {
                org_file: self.org_file.clone(),
                anki_csv: self.anki_csv.clone(),
            },
            strict: self.strict,
        }
    }

    fn annotation_query(&self) -> AnnotationQuery {
        match &self.sql_extract_annotations {
            Some(path) => AnnotationQuery::File(path.clone()),
            None => AnnotationQuery::Bundled,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let logs_dir = match std::path::absolute(&cli.logs_dir) {
        Ok(path) => path,
        Err(err) => {
            eprintln!("invalid logs dir `{}`: {err}", cli.logs_dir.display());
            return ExitCode::FAILURE;
        }
    };
    let level = cli.log_level.as_deref().unwrap_or(default_log_level());
    if let Err(err) = init_logging(level, &logs_dir.to_string_lossy()) {
        eprintln!("failed to initialize logging: {err}");
        return ExitCode::FAILURE;
    }

    let dictionary = match WordNet::open(&cli.wordnet_dir) {
        Ok(dictionary) => dictionary,
        Err(err) => {
            error!("event=dictionary_open module=cli status=error error={err}");
            eprintln!("error: {err}");
            return ExitCode::FAILURE;
        }
    };

    let service = ExtractService::new(dictionary, cli.run_config());
    match service.run_from_db(&cli.kobo_db, &cli.annotation_query()) {
        Ok(report) => {
            print_report(&report);
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn print_report(report: &RunReport) {
    println!("{}", report.summary());
    if let Some(path) = &report.org_file {
        println!("quotes written to {}", path.display());
    }
    if let Some(path) = &report.anki_csv {
        println!("flashcards written to {}", path.display());
    }
    for dropped in &report.dropped_duplicates {
        println!(
            "duplicate dropped: {:?} (same as {:?} -> {})",
            dropped.original, dropped.kept, dropped.canonical
        );
    }
    for undefined in &report.undefined_terms {
        println!("undefined: {}", undefined.term);
    }
}
