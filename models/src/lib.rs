// models/src/lib.rs

//! Patient registry records and the validation that builds them from
//! untyped JSON payloads.

pub mod errors;
pub mod identifiers;
pub mod medical;
pub mod validation;

pub use errors::{ModelError, ModelResult, ValidationError, ValidationResult};
pub use identifiers::Identifier;
pub use medical::{
    Diagnosis, DiagnosisCatalog, Discharge, Entry, EntryDetails, EntryType, Gender,
    HealthCheckRating, NewEntry, NewPatient, NonSensitivePatient, Patient, SickLeave,
};
pub use validation::{to_entry, to_new_entry, to_new_patient, to_patient};
