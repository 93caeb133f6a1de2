// cli/src/commands.rs

// Command-line arguments and subcommands for patientor-cli.
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::config::CONFIG_ENV_VAR;

#[derive(Parser, Debug)]
#[command(name = "patientor-cli")]
#[command(version)]
#[command(about = "Patient registry validation and fitness calculators")]
pub struct CliArgs {
    /// YAML config file (defaults to ./patientor.yaml when present)
    #[arg(long, short = 'c', global = true, env = CONFIG_ENV_VAR, value_hint = clap::ValueHint::FilePath)]
    pub config: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand, PartialEq)]
pub enum Commands {
    /// Classify the body mass index: `bmi <HEIGHT_CM> <WEIGHT_KG>`
    Bmi {
        #[arg(value_name = "MEASUREMENT", allow_negative_numbers = true)]
        args: Vec<String>,
        /// Print a JSON report instead of the category
        #[arg(long)]
        json: bool,
    },
    /// Rate daily exercise hours against a target: `exercises <TARGET> <HOURS>...`
    Exercises {
        #[arg(value_name = "TARGET_AND_HOURS", allow_negative_numbers = true)]
        args: Vec<String>,
    },
    /// Validate patient records
    Patient(PatientCommandWrapper),
    /// Validate entries and attach them to patients
    Entry(EntryCommandWrapper),
    /// List the diagnosis catalog, or show one diagnosis
    Diagnoses {
        #[arg(value_name = "CODE")]
        code: Option<String>,
    },
}

#[derive(Debug, Args, PartialEq)]
pub struct PatientCommandWrapper {
    #[clap(subcommand)]
    pub command: PatientAction,
}

#[derive(Debug, Args, PartialEq)]
pub struct EntryCommandWrapper {
    #[clap(subcommand)]
    pub command: EntryAction,
}

#[derive(Debug, Subcommand, PartialEq)]
pub enum PatientAction {
    /// Validate a new patient payload and print the normalised record
    Validate {
        /// Payload file; stdin when omitted
        #[clap(long, short = 'f', value_hint = clap::ValueHint::FilePath)]
        file: Option<PathBuf>,
        /// Give the record a fresh id
        #[clap(long)]
        assign_id: bool,
        /// Print only the public fields (implies --assign-id)
        #[clap(long)]
        public: bool,
    },
}

#[derive(Debug, Subcommand, PartialEq)]
pub enum EntryAction {
    /// Validate an entry payload and print the normalised entry
    Validate {
        #[clap(long, short = 'f', value_hint = clap::ValueHint::FilePath)]
        file: Option<PathBuf>,
    },
    /// Validate an entry and append it to a stored patient record
    Add {
        /// Stored patient record (JSON with an id)
        #[clap(long, short = 'p', value_hint = clap::ValueHint::FilePath)]
        patient: PathBuf,
        /// Entry payload file; stdin when omitted
        #[clap(long, short = 'f', value_hint = clap::ValueHint::FilePath)]
        file: Option<PathBuf>,
    },
}
