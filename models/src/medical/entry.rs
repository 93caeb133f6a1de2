// models/src/medical/entry.rs

use std::{fmt, str::FromStr};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::{ValidationError, ValidationResult};
use crate::identifiers::Identifier;

/// The `type` tag of an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryType {
    HealthCheck,
    Hospital,
    OccupationalHealthcare,
}

impl EntryType {
    pub const ALL: [EntryType; 3] = [
        EntryType::HealthCheck,
        EntryType::Hospital,
        EntryType::OccupationalHealthcare,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EntryType::HealthCheck => "HealthCheck",
            EntryType::Hospital => "Hospital",
            EntryType::OccupationalHealthcare => "OccupationalHealthcare",
        }
    }
}

impl FromStr for EntryType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EntryType::ALL
            .into_iter()
            .find(|entry_type| entry_type.as_str() == s)
            .ok_or_else(|| ValidationError::InvalidEntryType(s.to_string()))
    }
}

impl fmt::Display for EntryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of a health check, lowest risk first. Travels as its number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum HealthCheckRating {
    Healthy = 0,
    LowRisk = 1,
    HighRisk = 2,
    CriticalRisk = 3,
}

impl HealthCheckRating {
    pub const ALL: [HealthCheckRating; 4] = [
        HealthCheckRating::Healthy,
        HealthCheckRating::LowRisk,
        HealthCheckRating::HighRisk,
        HealthCheckRating::CriticalRisk,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            HealthCheckRating::Healthy => "Healthy",
            HealthCheckRating::LowRisk => "LowRisk",
            HealthCheckRating::HighRisk => "HighRisk",
            HealthCheckRating::CriticalRisk => "CriticalRisk",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        HealthCheckRating::ALL.into_iter().find(|rating| rating.name() == name)
    }
}

impl TryFrom<u8> for HealthCheckRating {
    type Error = ValidationError;

    fn try_from(value: u8) -> ValidationResult<Self> {
        HealthCheckRating::ALL
            .into_iter()
            .find(|rating| *rating as u8 == value)
            .ok_or_else(|| ValidationError::InvalidHealthCheckRating(value.to_string()))
    }
}

impl From<HealthCheckRating> for u8 {
    fn from(value: HealthCheckRating) -> Self {
        value as u8
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Discharge {
    pub date: NaiveDate,
    pub criteria: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SickLeave {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl SickLeave {
    /// Fails when `end_date` precedes `start_date`. A one-day leave starts and
    /// ends on the same date.
    pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> ValidationResult<Self> {
        if end_date < start_date {
            return Err(ValidationError::SickLeaveEndsBeforeStart {
                start: start_date,
                end: end_date,
            });
        }
        Ok(Self { start_date, end_date })
    }
}

/// The variant-specific part of an entry, tagged by `type` on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum EntryDetails {
    #[serde(rename_all = "camelCase")]
    HealthCheck { health_check_rating: HealthCheckRating },
    Hospital { discharge: Discharge },
    #[serde(rename_all = "camelCase")]
    OccupationalHealthcare {
        employer_name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        sick_leave: Option<SickLeave>,
    },
}

impl EntryDetails {
    pub fn entry_type(&self) -> EntryType {
        match self {
            EntryDetails::HealthCheck { .. } => EntryType::HealthCheck,
            EntryDetails::Hospital { .. } => EntryType::Hospital,
            EntryDetails::OccupationalHealthcare { .. } => EntryType::OccupationalHealthcare,
        }
    }
}

/// An entry that has passed validation but has not been given an id yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEntry {
    pub description: String,
    pub date: NaiveDate,
    pub specialist: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diagnosis_codes: Option<Vec<String>>,
    #[serde(flatten)]
    pub details: EntryDetails,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    pub id: Identifier,
    pub description: String,
    pub date: NaiveDate,
    pub specialist: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diagnosis_codes: Option<Vec<String>>,
    #[serde(flatten)]
    pub details: EntryDetails,
}

impl Entry {
    pub fn with_id(id: Identifier, entry: NewEntry) -> Self {
        Entry {
            id,
            description: entry.description,
            date: entry.date,
            specialist: entry.specialist,
            diagnosis_codes: entry.diagnosis_codes,
            details: entry.details,
        }
    }

    pub fn entry_type(&self) -> EntryType {
        self.details.entry_type()
    }

    pub fn diagnosis_codes(&self) -> &[String] {
        self.diagnosis_codes.as_deref().unwrap_or_default()
    }
}
