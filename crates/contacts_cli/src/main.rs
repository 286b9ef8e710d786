//! Contacts demo entry point.
//!
//! # Responsibility
//! - Seed a contact store and print the full listing plus the
//!   excluding-city report.
//! - Keep output deterministic so runs can be diffed.

mod render;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use contacts_core::{
    canonical_contacts, default_log_level, init_logging, load_seed_file, ContactQueryService,
    ContactRepository, MemoryContactRepository, SqliteContactRepository,
};
use log::info;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Backend {
    Memory,
    Sqlite,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    fn as_str(self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "contacts", version = contacts_core::core_version())]
#[command(about = "Seed a contact store and print address reports", long_about = None)]
struct Cli {
    /// Store backend
    #[arg(long, value_enum, default_value_t = Backend::Memory)]
    backend: Backend,
    /// City for the excluding-city report
    #[arg(long, default_value = "Springfield")]
    city: String,
    /// JSON seed file used instead of the built-in contacts
    #[arg(long)]
    seed_file: Option<PathBuf>,
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
    /// Log level; defaults to `debug` in debug builds, `info` otherwise
    #[arg(long, value_enum, requires = "log_dir")]
    log_level: Option<LogLevel>,
    /// Absolute directory for rolling log files; logging is off without it
    #[arg(long)]
    log_dir: Option<String>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(&cli) {
        Ok(output) => {
            print!("{output}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<String> {
    if let Some(log_dir) = &cli.log_dir {
        let level = cli
            .log_level
            .map_or_else(default_log_level, LogLevel::as_str);
        init_logging(level, log_dir).context("failed to initialize logging")?;
    }

    match cli.backend {
        Backend::Memory => report(MemoryContactRepository::new(), cli),
        Backend::Sqlite => report(
            SqliteContactRepository::open_in_memory().context("failed to open sqlite store")?,
            cli,
        ),
    }
}

fn report<R: ContactRepository>(repo: R, cli: &Cli) -> Result<String> {
    let batch = match &cli.seed_file {
        Some(path) => load_seed_file(path)?,
        None => canonical_contacts(),
    };

    let mut service = ContactQueryService::new(repo);
    let outcome = service
        .seed_if_empty(&batch)
        .context("failed to seed contacts")?;
    info!(
        "event=cli_report module=cli status=start backend={:?} seed={:?}",
        cli.backend, outcome
    );

    let listing = service.list_all_with_addresses()?;
    let excluded = service.find_contacts_excluding_city(&cli.city)?;
    render::render(cli.format, &listing, &cli.city, &excluded)
}

#[cfg(test)]
mod tests {
    use super::{run, Cli};
    use clap::Parser;
    use contacts_core::RepoError;
    use std::io::Write;

    fn run_with(args: &[&str]) -> anyhow::Result<String> {
        let cli = Cli::try_parse_from(std::iter::once("contacts").chain(args.iter().copied()))
            .unwrap();
        run(&cli)
    }

    fn outside_city_names(output: &str) -> Vec<&str> {
        let (_, second) = output.split_once("\n\nContacts not in '").unwrap();
        second
            .lines()
            .skip(1)
            .filter_map(|line| line.strip_prefix("- "))
            .collect()
    }

    #[test]
    fn sqlite_backend_prints_same_reports_as_memory() {
        let memory = run_with(&[]).unwrap();
        let sqlite = run_with(&["--backend", "sqlite"]).unwrap();

        assert_eq!(memory, sqlite);
        assert_eq!(memory.matches(" (Addresses: ").count(), 13);
        assert_eq!(outside_city_names(&memory).len(), 11);
    }

    #[test]
    fn city_option_changes_second_report() {
        let output = run_with(&["--city", "Ogdenville"]).unwrap();
        assert!(output.contains("\n\nContacts not in 'Ogdenville':\n"));

        let names = outside_city_names(&output);
        assert_eq!(names.len(), 11);
        assert!(!names.contains(&"Carol White"));
        assert!(!names.contains(&"Liam Garcia"));
        assert!(names.contains(&"Bob Johnson"));
        assert!(names.contains(&"Jack Thompson"));
        assert!(names.contains(&"Henry Brown"));
    }

    #[test]
    fn seed_file_with_null_city_fails_with_invalid_argument() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"name": "Broken", "addresses": [{{"street": "1 A St", "city": null}}]}}]"#
        )
        .unwrap();
        let path = file.path().to_str().unwrap().to_string();

        for backend in ["memory", "sqlite"] {
            let err = run_with(&["--backend", backend, "--seed-file", &path]).unwrap_err();
            assert!(
                err.chain().any(|cause| matches!(
                    cause.downcast_ref::<RepoError>(),
                    Some(RepoError::InvalidArgument(_))
                )),
                "{backend}: unexpected error {err:#}"
            );
        }
    }

    #[test]
    fn seed_file_replaces_built_in_contacts() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"name": "Solo", "addresses": [{{"street": "9 Z St", "city": "Shelbyville"}}]}}]"#
        )
        .unwrap();
        let path = file.path().to_str().unwrap().to_string();

        let output = run_with(&["--seed-file", &path]).unwrap();
        assert_eq!(
            output,
            "All Contacts:\n- Solo (Addresses: 1)\n    9 Z St, Shelbyville\n\n\
             Contacts not in 'Springfield':\n- Solo\n"
        );
    }

    #[test]
    fn json_format_reports_outside_city_names() {
        let output = run_with(&["--format", "json", "--backend", "sqlite"]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["outside_city"].as_array().unwrap().len(), 11);
    }

    #[test]
    fn invalid_log_level_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let log_dir = dir.path().to_str().unwrap();
        assert!(Cli::try_parse_from(["contacts", "--log-level", "bogus"]).is_err());
        assert!(
            Cli::try_parse_from(["contacts", "--log-level", "bogus", "--log-dir", log_dir])
                .is_err()
        );
    }

    #[test]
    fn log_level_requires_log_dir() {
        assert!(Cli::try_parse_from(["contacts", "--log-level", "info"]).is_err());

        let cli = Cli::try_parse_from(["contacts", "--log-level", "warn", "--log-dir", "/tmp/x"])
            .unwrap();
        assert_eq!(cli.log_level.map(super::LogLevel::as_str), Some("warn"));
    }
}
