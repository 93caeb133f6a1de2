// cli/src/cli.rs

// Entry point for patientor-cli: argument parsing, configuration, logging and
// dispatch to the subcommand handlers.

use std::io::{self, Write};

use anyhow::Result;
use clap::Parser;
use models::DiagnosisCatalog;
use tracing::debug;

use crate::commands::{CliArgs, Commands, EntryAction, PatientAction};
use crate::config::{CliConfig, load_cli_config, resolve_config_path};
use crate::handlers::{
    handle_bmi, handle_diagnoses, handle_entry_add, handle_entry_validate, handle_exercises,
    handle_patient_validate, read_payload,
};
use crate::logging::init_logging;

pub fn start_cli() -> Result<()> {
    dotenvy::dotenv().ok();
    let args = CliArgs::parse();

    let config_path = resolve_config_path(args.config.as_deref());
    let config = load_cli_config(config_path.as_deref())?;
    init_logging(&config.log_filter);
    match &config_path {
        Some(path) => debug!("Loaded CLI config from {}", path.display()),
        None => debug!("No config file found, using defaults"),
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    run_command(args.command, &config, &mut out)?;
    out.flush()?;
    Ok(())
}

/// The catalog used to check entry codes, when strict checking is on.
fn strict_catalog(config: &CliConfig) -> Result<Option<DiagnosisCatalog>> {
    if config.strict_diagnosis_codes {
        config.catalog().map(Some)
    } else {
        Ok(None)
    }
}

pub fn run_command<W: Write>(command: Commands, config: &CliConfig, out: &mut W) -> Result<()> {
    match command {
        Commands::Bmi { args, json } => handle_bmi(&args, json, config, out),
        Commands::Exercises { args } => handle_exercises(&args, config, out),
        Commands::Patient(wrapper) => match wrapper.command {
            PatientAction::Validate { file, assign_id, public } => {
                let content = read_payload(file.as_deref())?;
                let strict = strict_catalog(config)?;
                handle_patient_validate(&content, assign_id, public, strict.as_ref(), config, out)
            }
        },
        Commands::Entry(wrapper) => match wrapper.command {
            EntryAction::Validate { file } => {
                let content = read_payload(file.as_deref())?;
                let strict = strict_catalog(config)?;
                handle_entry_validate(&content, strict.as_ref(), config, out)
            }
            EntryAction::Add { patient, file } => {
                let patient_content = read_payload(Some(&patient))?;
                let entry_content = read_payload(file.as_deref())?;
                let strict = strict_catalog(config)?;
                handle_entry_add(&patient_content, &entry_content, strict.as_ref(), config, out)
            }
        },
        Commands::Diagnoses { code } => {
            let catalog = config.catalog()?;
            handle_diagnoses(code.as_deref(), &catalog, config, out)
        }
    }
}
