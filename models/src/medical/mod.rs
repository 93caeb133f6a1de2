// models/src/medical/mod.rs

pub mod diagnosis;
pub mod entry;
pub mod gender;
pub mod patient;

pub use diagnosis::{Diagnosis, DiagnosisCatalog};
pub use entry::{
    Discharge, Entry, EntryDetails, EntryType, HealthCheckRating, NewEntry, SickLeave,
};
pub use gender::Gender;
pub use patient::{NewPatient, NonSensitivePatient, Patient};
