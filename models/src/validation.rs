// models/src/validation.rs

//! Turns untyped JSON payloads into validated records.
//!
//! Every function here is pure: it reads the payload, checks the fields it
//! needs and either builds the record or returns the first problem it found.
//! Fields that belong to another entry variant are ignored.

use chrono::NaiveDate;
use serde_json::{Map, Value};
use tracing::debug;

use crate::errors::{ValidationError, ValidationResult};
use crate::identifiers::Identifier;
use crate::medical::{
    Discharge, Entry, EntryDetails, EntryType, Gender, HealthCheckRating, NewEntry, NewPatient,
    Patient, SickLeave,
};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Renders a (possibly absent) value for an error message.
fn describe(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => "missing".to_string(),
        Some(Value::String(text)) => text.clone(),
        Some(other) => other.to_string(),
    }
}

fn is_blank(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(text)) => text.trim().is_empty(),
        Some(_) => false,
    }
}

fn as_object<'a>(what: &'static str, value: &'a Value) -> ValidationResult<&'a Map<String, Value>> {
    value.as_object().ok_or(ValidationError::NotAnObject(what))
}

/// A required, non-blank string.
pub fn parse_string(field: &'static str, value: Option<&Value>) -> ValidationResult<String> {
    match value {
        Some(Value::String(text)) if !text.trim().is_empty() => Ok(text.clone()),
        other => Err(ValidationError::IncorrectOrMissing {
            field,
            found: describe(other),
        }),
    }
}

/// Zero-padded `YYYY-MM-DD`, nothing before or after it.
fn has_date_shape(text: &str) -> bool {
    text.len() == 10
        && text.bytes().enumerate().all(|(position, byte)| match position {
            4 | 7 => byte == b'-',
            _ => byte.is_ascii_digit(),
        })
}

/// A required `YYYY-MM-DD` calendar date.
pub fn parse_date(field: &'static str, value: Option<&Value>) -> ValidationResult<NaiveDate> {
    let text = parse_string(field, value)?;
    if !has_date_shape(&text) {
        return Err(ValidationError::InvalidDateFormat { field, found: text });
    }
    NaiveDate::parse_from_str(&text, DATE_FORMAT).map_err(|_| ValidationError::InvalidDateFormat {
        field,
        found: text,
    })
}

pub fn parse_identifier(field: &'static str, value: Option<&Value>) -> ValidationResult<Identifier> {
    Identifier::new(parse_string(field, value)?)
}

pub fn parse_gender(value: Option<&Value>) -> ValidationResult<Gender> {
    match value {
        Some(Value::String(text)) => text.parse(),
        other => Err(ValidationError::InvalidGender(describe(other))),
    }
}

pub fn parse_entry_type(value: Option<&Value>) -> ValidationResult<EntryType> {
    match value {
        Some(Value::String(text)) => text.parse(),
        other => Err(ValidationError::InvalidEntryType(describe(other))),
    }
}

/// Accepts the rating number (0 to 3) or its name, e.g. `"LowRisk"`.
pub fn parse_health_check_rating(value: Option<&Value>) -> ValidationResult<HealthCheckRating> {
    let rating = match value {
        Some(Value::Number(number)) => number
            .as_u64()
            .and_then(|n| u8::try_from(n).ok())
            .and_then(|n| HealthCheckRating::try_from(n).ok()),
        Some(Value::String(name)) => HealthCheckRating::from_name(name.trim()),
        _ => None,
    };
    rating.ok_or_else(|| ValidationError::InvalidHealthCheckRating(describe(value)))
}

/// Diagnosis codes are optional. Blank codes are dropped, and a list with
/// nothing left in it counts as no codes at all.
pub fn parse_diagnosis_codes(value: Option<&Value>) -> ValidationResult<Option<Vec<String>>> {
    let items = match value {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::Array(items)) => items,
        other => return Err(ValidationError::InvalidDiagnosisCodes(describe(other))),
    };

    let mut codes = Vec::with_capacity(items.len());
    for item in items {
        match item {
            Value::String(code) if code.trim().is_empty() => {}
            Value::String(code) => codes.push(code.trim().to_string()),
            _ => return Err(ValidationError::InvalidDiagnosisCodes(describe(value))),
        }
    }

    Ok(if codes.is_empty() { None } else { Some(codes) })
}

pub fn parse_discharge(value: Option<&Value>) -> ValidationResult<Discharge> {
    let object = match value {
        Some(Value::Object(object)) => object,
        other => return Err(ValidationError::InvalidDischarge(describe(other))),
    };

    Ok(Discharge {
        date: parse_date("discharge date", object.get("date"))?,
        criteria: parse_string("discharge criteria", object.get("criteria"))?,
    })
}

/// Sick leave is optional. A leave whose two dates are both blank is treated
/// as absent; one blank date is an error.
pub fn parse_sick_leave(value: Option<&Value>) -> ValidationResult<Option<SickLeave>> {
    let object = match value {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::Object(object)) => object,
        other => return Err(ValidationError::InvalidSickLeave(describe(other))),
    };

    let start = object.get("startDate");
    let end = object.get("endDate");
    if is_blank(start) && is_blank(end) {
        return Ok(None);
    }

    let leave = SickLeave::new(
        parse_date("sick leave start date", start)?,
        parse_date("sick leave end date", end)?,
    )?;
    Ok(Some(leave))
}

fn parse_entries(value: Option<&Value>) -> ValidationResult<Vec<Entry>> {
    match value {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(items)) => items.iter().map(to_entry).collect(),
        other => Err(ValidationError::InvalidEntries(describe(other))),
    }
}

/// Builds a validated entry from an untyped payload, branching on `type`.
pub fn to_new_entry(value: &Value) -> ValidationResult<NewEntry> {
    let object = as_object("entry", value)?;
    let entry_type = parse_entry_type(object.get("type"))?;

    let description = parse_string("description", object.get("description"))?;
    let date = parse_date("date", object.get("date"))?;
    let specialist = parse_string("specialist", object.get("specialist"))?;
    let diagnosis_codes = parse_diagnosis_codes(object.get("diagnosisCodes"))?;

    let details = match entry_type {
        EntryType::HealthCheck => EntryDetails::HealthCheck {
            health_check_rating: parse_health_check_rating(object.get("healthCheckRating"))?,
        },
        EntryType::Hospital => EntryDetails::Hospital {
            discharge: parse_discharge(object.get("discharge"))?,
        },
        EntryType::OccupationalHealthcare => EntryDetails::OccupationalHealthcare {
            employer_name: parse_string("employer name", object.get("employerName"))?,
            sick_leave: parse_sick_leave(object.get("sickLeave"))?,
        },
    };

    debug!("Validated {} entry dated {}", entry_type, date);
    Ok(NewEntry {
        description,
        date,
        specialist,
        diagnosis_codes,
        details,
    })
}

/// A stored entry: an `id` plus everything [`to_new_entry`] checks.
pub fn to_entry(value: &Value) -> ValidationResult<Entry> {
    let object = as_object("entry", value)?;
    let id = parse_identifier("entry id", object.get("id"))?;
    Ok(Entry::with_id(id, to_new_entry(value)?))
}

pub fn to_new_patient(value: &Value) -> ValidationResult<NewPatient> {
    let object = as_object("patient", value)?;
    let patient = NewPatient {
        name: parse_string("name", object.get("name"))?,
        ssn: parse_string("SSN", object.get("ssn"))?,
        date_of_birth: parse_date("date of birth", object.get("dateOfBirth"))?,
        occupation: parse_string("occupation", object.get("occupation"))?,
        gender: parse_gender(object.get("gender"))?,
        entries: parse_entries(object.get("entries"))?,
    };
    debug!("Validated patient with {} entries", patient.entries.len());
    Ok(patient)
}

/// A stored patient: an `id` plus everything [`to_new_patient`] checks.
pub fn to_patient(value: &Value) -> ValidationResult<Patient> {
    let object = as_object("patient", value)?;
    let id = parse_identifier("patient id", object.get("id"))?;
    Ok(Patient::with_id(id, to_new_patient(value)?))
}
