// models/src/medical/patient.rs

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::entry::{Entry, NewEntry};
use super::gender::Gender;
use crate::identifiers::Identifier;

// --- Validated patient payload ---
// What a registration request carries once it has been checked. The id is
// assigned when the record is created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPatient {
    pub name: String,
    pub date_of_birth: NaiveDate,
    pub ssn: String,
    pub gender: Gender,
    pub occupation: String,
    #[serde(default)]
    pub entries: Vec<Entry>,
}

// --- Stored patient record ---
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    pub id: Identifier,
    pub name: String,
    pub date_of_birth: NaiveDate,
    pub ssn: String,
    pub gender: Gender,
    pub occupation: String,
    #[serde(default)]
    pub entries: Vec<Entry>,
}

// --- Public view ---
// The patient list hides the social security number and the medical history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NonSensitivePatient {
    pub id: Identifier,
    pub name: String,
    pub date_of_birth: NaiveDate,
    pub gender: Gender,
    pub occupation: String,
}

impl Patient {
    /// Creates a stored record with a freshly generated id.
    pub fn from_new(patient: NewPatient) -> Self {
        Self::with_id(Identifier::generate(), patient)
    }

    pub fn with_id(id: Identifier, patient: NewPatient) -> Self {
        Patient {
            id,
            name: patient.name,
            date_of_birth: patient.date_of_birth,
            ssn: patient.ssn,
            gender: patient.gender,
            occupation: patient.occupation,
            entries: patient.entries,
        }
    }

    pub fn non_sensitive(&self) -> NonSensitivePatient {
        NonSensitivePatient::from(self)
    }

    /// Appends a validated entry under a fresh id and returns the stored entry.
    pub fn add_entry(&mut self, entry: NewEntry) -> &Entry {
        let id = Identifier::generate();
        tracing::debug!(patient = %self.id, entry = %id, "adding {} entry", entry.details.entry_type());
        self.entries.push(Entry::with_id(id, entry));
        &self.entries[self.entries.len() - 1]
    }

    /// Every diagnosis code mentioned across the patient's entries, sorted and
    /// without repeats.
    pub fn diagnosis_codes(&self) -> Vec<&str> {
        let mut codes: Vec<&str> = self
            .entries
            .iter()
            .flat_map(|entry| entry.diagnosis_codes().iter().map(String::as_str))
            .collect();
        codes.sort_unstable();
        codes.dedup();
        codes
    }
}

impl From<&Patient> for NonSensitivePatient {
    fn from(patient: &Patient) -> Self {
        NonSensitivePatient {
            id: patient.id.clone(),
            name: patient.name.clone(),
            date_of_birth: patient.date_of_birth,
            gender: patient.gender,
            occupation: patient.occupation.clone(),
        }
    }
}
