use std::io::{self, Write};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;
use undercase_core::{apply_renames, confirm_changes, scan_directory, RealFileSystem, ScanError};

#[derive(Debug, Parser)]
#[command(
    name = "undercase",
    version,
    about = "Rename the items in a directory to lowercase names with underscores instead of spaces."
)]
struct Cli {
    /// Absolute path of the directory whose item names should be cleaned.
    #[arg(value_name = "ABSOLUTE_PATH")]
    path: String,
}

fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err:#}");
            exit_code_for(&err)
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    let fs = RealFileSystem;
    let outcome = scan_directory(&fs, &cli.path)?;
    for warning in &outcome.warnings {
        eprintln!("warning: {warning}");
    }
    tracing::debug!(
        "scan produced {} candidate(s) and {} warning(s)",
        outcome.plan.len(),
        outcome.warnings.len()
    );

    if outcome.plan.is_empty() {
        println!("No item names at {} need changes.", cli.path);
    } else {
        println!("Item names at {} that will be changed:", cli.path);
        println!();
        for entry in outcome.plan.iter() {
            println!(
                "Name: {}, Clean Name: {}, Item Type: {}",
                entry.current_name(),
                entry.cleaned_name(),
                entry.kind
            );
        }
    }

    print!("\nApply changes? (Enter y/n): ");
    io::stdout().flush().context("failed to flush stdout")?;

    let confirmed = confirm_changes(&mut io::stdin().lock(), &mut io::stdout())
        .context("failed to read the confirmation")?;
    if !confirmed {
        println!("No changes applied.");
        return Ok(());
    }

    let renames = apply_renames(&fs, &outcome.plan);
    for failure in &renames.failures {
        eprintln!("warning: rename failed for {failure}");
    }
    if renames.all_succeeded() {
        println!("All item name changes applied.");
    } else {
        println!("Some item name changes not applied.");
    }
    Ok(())
}

fn exit_code_for(err: &anyhow::Error) -> ExitCode {
    let Some(scan_err) = err.downcast_ref::<ScanError>() else {
        return ExitCode::FAILURE;
    };
    let code: u8 = match scan_err {
        ScanError::PathTooLong { .. } => 3,
        ScanError::NotFound { .. } => 4,
        ScanError::NotADirectory { .. } => 5,
        ScanError::SearchPathTooLong { .. } => 6,
        ScanError::EnumerationFailed { .. } => 7,
    };
    ExitCode::from(code)
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}
