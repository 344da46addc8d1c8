use anyhow::{Context, Result, bail};
use clap::Parser;
use shortcode_stripper_config::Config;
use shortcode_stripper_engine::{
    ActionTokens, AdministratorsOnly, BatchRunner, Caller, FsDocumentStore, MarkerSet, Role,
    STRIP_ACTION, Stripper, TriggerRequest, TriggerStatus, trigger,
};
use std::process::ExitCode;

mod args;

use args::Cli;

/// Some documents could not be updated
const EXIT_PARTIAL_FAILURE: u8 = 2;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<ExitCode> {
    // Only the default location may be missing
    let config_path = cli.config.clone().unwrap_or_else(Config::config_path);
    let loaded = Config::load_from_path(&config_path).context("Failed to load config file")?;
    let config = match (loaded, &cli.config) {
        (Some(config), _) => config,
        (None, Some(explicit)) => {
            bail!("Config file '{}' does not exist", explicit.display())
        }
        (None, None) => Config::default(),
    };

    let markers = if cli.markers.is_empty() {
        config.marker_set()?
    } else {
        MarkerSet::parse(cli.markers.iter().cloned()).context("Invalid --marker")?
    };

    if cli.list_markers {
        for marker in &markers {
            println!("{marker}");
        }
        return Ok(ExitCode::SUCCESS);
    }

    let Some(documents_path) = cli.documents_path.or(config.documents_path) else {
        bail!(
            "No documents path provided and none set in config file '{}'",
            config_path.display()
        );
    };

    if !cli.dry_run && !cli.yes {
        bail!(
            "Refusing to rewrite documents in '{}' without --yes. \
             This cannot be undone, so make sure you have a backup, \
             or preview the changes with --dry-run.",
            documents_path.display()
        );
    }

    let include = if cli.include.is_empty() {
        config.include
    } else {
        cli.include
    };
    let mut store = FsDocumentStore::open(&documents_path)
        .with_context(|| format!("Documents path '{}' is invalid", documents_path.display()))?
        .with_include(&include)?;

    log::info!("Documents path: {}", documents_path.display());

    // Whoever runs the binary against the directory acts as its administrator
    let operator = std::env::var("USER").unwrap_or_else(|_| "operator".to_string());
    let mut tokens = ActionTokens::new();
    let request = TriggerRequest {
        caller: Caller::new(operator, Role::Administrator),
        token: tokens.issue(STRIP_ACTION),
    };
    let runner = BatchRunner::new(Stripper::new(markers)).dry_run(cli.dry_run);

    let response = trigger(
        &request,
        &AdministratorsOnly,
        &mut tokens,
        &runner,
        &mut store,
    )?;

    let verb = if cli.dry_run { "would rewrite" } else { "rewrote" };
    for id in &response.report.rewritten {
        println!("{verb} {id}");
    }
    for failure in &response.report.failures {
        eprintln!("failed {}: {}", failure.id, failure.message);
    }
    println!("{}", response.notice());

    if let Some(report_path) = &cli.report {
        let content = toml::to_string_pretty(&response.report)?;
        std::fs::write(report_path, content)
            .with_context(|| format!("Failed to write report to '{}'", report_path.display()))?;
    }

    Ok(match response.status {
        TriggerStatus::Completed => ExitCode::SUCCESS,
        TriggerStatus::CompletedWithFailures => ExitCode::from(EXIT_PARTIAL_FAILURE),
    })
}
