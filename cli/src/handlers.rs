// cli/src/handlers.rs

// One handler per subcommand. Handlers take the payload text and an output
// sink so they can run against buffers as well as stdin/stdout.

use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;

use anyhow::{Context, Result};
use fitness::{BmiReport, calculate_exercises, parse_bmi_arguments, parse_exercise_arguments};
use models::{DiagnosisCatalog, NewEntry, Patient, to_new_entry, to_new_patient, to_patient};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info};

use crate::config::{CliConfig, OutputFormat};

pub fn write_json<W: Write, T: Serialize>(out: &mut W, value: &T, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Pretty => serde_json::to_writer_pretty(&mut *out, value)?,
        OutputFormat::Compact => serde_json::to_writer(&mut *out, value)?,
    }
    writeln!(out)?;
    Ok(())
}

/// Reads a payload from `file`, or from stdin when no file is given.
pub fn read_payload(file: Option<&Path>) -> Result<String> {
    match file {
        Some(path) => fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display())),
        None => {
            let mut content = String::new();
            io::stdin()
                .read_to_string(&mut content)
                .context("Failed to read payload from stdin")?;
            Ok(content)
        }
    }
}

fn parse_payload(content: &str) -> Result<Value> {
    serde_json::from_str(content).context("Payload is not valid JSON")
}

fn check_entry_codes(entry_codes: Option<&[String]>, strict: Option<&DiagnosisCatalog>) -> Result<()> {
    if let (Some(codes), Some(catalog)) = (entry_codes, strict) {
        catalog.check_codes(codes).context("Invalid entry")?;
    }
    Ok(())
}

fn validate_entry(content: &str, strict: Option<&DiagnosisCatalog>) -> Result<NewEntry> {
    let entry = to_new_entry(&parse_payload(content)?).context("Invalid entry")?;
    check_entry_codes(entry.diagnosis_codes.as_deref(), strict)?;
    Ok(entry)
}

pub fn handle_bmi<W: Write>(args: &[String], json: bool, config: &CliConfig, out: &mut W) -> Result<()> {
    let (height, weight) = parse_bmi_arguments(args)?;
    let report = BmiReport::new(height, weight)?;
    if json {
        write_json(out, &report, config.output)
    } else {
        writeln!(out, "{}", report.bmi)?;
        Ok(())
    }
}

pub fn handle_exercises<W: Write>(args: &[String], config: &CliConfig, out: &mut W) -> Result<()> {
    let (days, target) = parse_exercise_arguments(args)?;
    let report = calculate_exercises(&days, target)?;
    write_json(out, &report, config.output)
}

pub fn handle_patient_validate<W: Write>(
    content: &str,
    assign_id: bool,
    public: bool,
    strict: Option<&DiagnosisCatalog>,
    config: &CliConfig,
    out: &mut W,
) -> Result<()> {
    let patient = to_new_patient(&parse_payload(content)?).context("Invalid patient")?;
    for entry in &patient.entries {
        check_entry_codes(entry.diagnosis_codes.as_deref(), strict)?;
    }

    if !(assign_id || public) {
        return write_json(out, &patient, config.output);
    }

    let patient = Patient::from_new(patient);
    info!(patient = %patient.id, "Created record for {}", patient.name);
    if public {
        write_json(out, &patient.non_sensitive(), config.output)
    } else {
        write_json(out, &patient, config.output)
    }
}

pub fn handle_entry_validate<W: Write>(
    content: &str,
    strict: Option<&DiagnosisCatalog>,
    config: &CliConfig,
    out: &mut W,
) -> Result<()> {
    let entry = validate_entry(content, strict)?;
    write_json(out, &entry, config.output)
}

pub fn handle_entry_add<W: Write>(
    patient_content: &str,
    entry_content: &str,
    strict: Option<&DiagnosisCatalog>,
    config: &CliConfig,
    out: &mut W,
) -> Result<()> {
    let mut patient = to_patient(&parse_payload(patient_content)?).context("Invalid patient record")?;
    if let Some(catalog) = strict {
        catalog
            .check_codes(&patient.diagnosis_codes())
            .context("Invalid patient record")?;
    }
    let entry = validate_entry(entry_content, strict)?;

    let entry_id = patient.add_entry(entry).id.clone();
    info!(patient = %patient.id, entry = %entry_id, "Added entry");
    write_json(out, &patient, config.output)
}

pub fn handle_diagnoses<W: Write>(
    code: Option<&str>,
    catalog: &DiagnosisCatalog,
    config: &CliConfig,
    out: &mut W,
) -> Result<()> {
    match code {
        Some(code) => {
            let diagnosis = catalog
                .get(code.trim())
                .with_context(|| format!("Unknown diagnosis code {code}"))?;
            write_json(out, diagnosis, config.output)
        }
        None => {
            debug!("Listing {} diagnoses", catalog.len());
            let diagnoses: Vec<_> = catalog.iter().collect();
            write_json(out, &diagnoses, config.output)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn compact() -> CliConfig {
        CliConfig {
            output: OutputFormat::Compact,
            ..CliConfig::default()
        }
    }

    fn output_json(buffer: Vec<u8>) -> Value {
        serde_json::from_slice(&buffer).unwrap()
    }

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    const STORED_PATIENT: &str = r#"{
        "id": "d2773598-f723-11e9-8f0b-362b9e155667",
        "name": "Martin Riggs",
        "dateOfBirth": "1979-01-30",
        "ssn": "300179-77A",
        "gender": "male",
        "occupation": "Cop",
        "entries": []
    }"#;

    #[test]
    fn should_print_bmi_category() {
        let mut out = Vec::new();
        handle_bmi(&args(&["180", "74"]), false, &compact(), &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "Normal (healthy weight)\n");
    }

    #[test]
    fn should_print_bmi_report_as_json() {
        let mut out = Vec::new();
        handle_bmi(&args(&["180", "100"]), true, &compact(), &mut out).unwrap();
        assert_eq!(output_json(out)["bmi"], "Overweight");
    }

    #[test]
    fn should_fail_bmi_with_missing_argument() {
        let mut out = Vec::new();
        let err = handle_bmi(&args(&["180"]), false, &compact(), &mut out).unwrap_err();
        assert_eq!(err.to_string(), "Not enough arguments");
        assert!(out.is_empty());
    }

    #[test]
    fn should_print_exercise_report() {
        let mut out = Vec::new();
        handle_exercises(&args(&["2", "3", "0", "2", "4.5", "0", "3", "1"]), &compact(), &mut out).unwrap();
        let report = output_json(out);
        assert_eq!(report["periodLength"], 7);
        assert_eq!(report["rating"], 2);
    }

    #[test]
    fn should_print_normalised_patient() {
        let mut out = Vec::new();
        let payload = r#"{"name":"Hans Gruber","dateOfBirth":"1970-04-25","ssn":"250470-555L","gender":"male","occupation":"Technician"}"#;
        handle_patient_validate(payload, false, false, None, &compact(), &mut out).unwrap();
        let patient = output_json(out);
        assert!(patient.get("id").is_none());
        assert_eq!(patient["entries"], json!([]));
    }

    #[test]
    fn should_print_public_view_with_fresh_id() {
        let mut out = Vec::new();
        let payload = r#"{"name":"Hans Gruber","dateOfBirth":"1970-04-25","ssn":"250470-555L","gender":"male","occupation":"Technician"}"#;
        handle_patient_validate(payload, false, true, None, &compact(), &mut out).unwrap();
        let patient = output_json(out);
        assert_eq!(patient["id"].as_str().unwrap().len(), 36);
        assert!(patient.get("ssn").is_none());
    }

    #[test]
    fn should_explain_invalid_patient() {
        let mut out = Vec::new();
        let payload = r#"{"name":"Hans Gruber","dateOfBirth":"1970-04-25","ssn":"250470-555L","gender":"villain","occupation":"Technician"}"#;
        let err = handle_patient_validate(payload, false, false, None, &compact(), &mut out).unwrap_err();
        assert_eq!(format!("{err:#}"), "Invalid patient: Incorrect or missing gender: villain");
    }

    #[test]
    fn should_reject_malformed_json() {
        let mut out = Vec::new();
        let err = handle_entry_validate("{not json", None, &compact(), &mut out).unwrap_err();
        assert_eq!(err.to_string(), "Payload is not valid JSON");
    }

    #[test]
    fn should_reject_unknown_codes_when_strict() {
        let catalog = DiagnosisCatalog::builtin().unwrap();
        let payload = json!({
            "type": "HealthCheck",
            "description": "Checkup",
            "date": "2019-10-20",
            "specialist": "MD House",
            "diagnosisCodes": ["Q99.9"],
            "healthCheckRating": 1
        })
        .to_string();

        let mut out = Vec::new();
        handle_entry_validate(&payload, None, &compact(), &mut out).unwrap();
        assert_eq!(output_json(out)["diagnosisCodes"], json!(["Q99.9"]));

        let mut out = Vec::new();
        let err = handle_entry_validate(&payload, Some(&catalog), &compact(), &mut out).unwrap_err();
        assert_eq!(format!("{err:#}"), "Invalid entry: Unknown diagnosis code Q99.9");
    }

    #[test]
    fn should_append_entry_to_stored_patient() {
        let entry = json!({
            "type": "OccupationalHealthcare",
            "description": "Sprained ankle on duty.",
            "date": "2019-08-05",
            "specialist": "MD House",
            "employerName": "LAPD",
            "sickLeave": { "startDate": "", "endDate": "" }
        })
        .to_string();

        let mut out = Vec::new();
        handle_entry_add(STORED_PATIENT, &entry, None, &compact(), &mut out).unwrap();
        let patient = output_json(out);

        assert_eq!(patient["id"], "d2773598-f723-11e9-8f0b-362b9e155667");
        let entries = patient["entries"].as_array().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0]["type"], "OccupationalHealthcare");
        assert_eq!(entries[0]["employerName"], "LAPD");
        assert!(entries[0].get("sickLeave").is_none());
        assert!(entries[0]["id"].is_string());
    }

    #[test]
    fn should_check_stored_codes_when_strict() {
        let catalog = DiagnosisCatalog::builtin().unwrap();
        let patient = json!({
            "id": "d2773598-f723-11e9-8f0b-362b9e155667",
            "name": "Martin Riggs",
            "dateOfBirth": "1979-01-30",
            "ssn": "300179-77A",
            "gender": "male",
            "occupation": "Cop",
            "entries": [{
                "id": "fcd59fa6-c4b4-4fec-ac4d-df4fe1f85f62",
                "type": "HealthCheck",
                "description": "Yearly control visit.",
                "date": "2019-10-20",
                "specialist": "MD House",
                "diagnosisCodes": ["Z57.1", "Q99.9"],
                "healthCheckRating": 0
            }]
        })
        .to_string();
        let entry = json!({
            "type": "HealthCheck",
            "description": "Follow-up.",
            "date": "2019-11-02",
            "specialist": "MD House",
            "healthCheckRating": 1
        })
        .to_string();

        let mut out = Vec::new();
        handle_entry_add(&patient, &entry, None, &compact(), &mut out).unwrap();
        assert_eq!(output_json(out)["entries"].as_array().unwrap().len(), 2);

        let mut out = Vec::new();
        let err = handle_entry_add(&patient, &entry, Some(&catalog), &compact(), &mut out).unwrap_err();
        assert_eq!(format!("{err:#}"), "Invalid patient record: Unknown diagnosis code Q99.9");
        assert!(out.is_empty());
    }

    #[test]
    fn should_refuse_entry_for_record_without_id() {
        let patient = r#"{"name":"Martin Riggs","dateOfBirth":"1979-01-30","ssn":"300179-77A","gender":"male","occupation":"Cop"}"#;
        let mut out = Vec::new();
        let err = handle_entry_add(patient, "{}", None, &compact(), &mut out).unwrap_err();
        assert_eq!(format!("{err:#}"), "Invalid patient record: Incorrect or missing patient id: missing");
    }

    #[test]
    fn should_list_and_show_diagnoses() {
        let catalog = DiagnosisCatalog::builtin().unwrap();

        let mut out = Vec::new();
        handle_diagnoses(None, &catalog, &compact(), &mut out).unwrap();
        assert_eq!(output_json(out).as_array().unwrap().len(), 15);

        let mut out = Vec::new();
        handle_diagnoses(Some("J03.0"), &catalog, &compact(), &mut out).unwrap();
        assert_eq!(output_json(out)["name"], "Streptococcal tonsillitis");

        let mut out = Vec::new();
        let err = handle_diagnoses(Some("A00"), &catalog, &compact(), &mut out).unwrap_err();
        assert_eq!(err.to_string(), "Unknown diagnosis code A00");
    }

    #[test]
    fn should_pretty_print_by_default() {
        let mut out = Vec::new();
        handle_exercises(&args(&["1", "1"]), &CliConfig::default(), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("{\n  \"periodLength\": 1"));
    }
}
