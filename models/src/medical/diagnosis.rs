// models/src/medical/diagnosis.rs

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::{ModelError, ModelResult, ValidationError, ValidationResult};

const BUILTIN_DIAGNOSES: &str = include_str!("../../data/diagnoses.json");

/// An ICD-10 diagnosis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnosis {
    pub code: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latin: Option<String>,
}

/// Diagnoses keyed by code.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiagnosisCatalog {
    diagnoses: BTreeMap<String, Diagnosis>,
}

impl DiagnosisCatalog {
    /// The catalog shipped with the crate.
    pub fn builtin() -> ModelResult<Self> {
        Self::from_json(BUILTIN_DIAGNOSES)
    }

    /// Reads a JSON array of diagnoses from `path`.
    pub fn load(path: &Path) -> ModelResult<Self> {
        let content = fs::read_to_string(path)?;
        let catalog = Self::from_json(&content)?;
        debug!("Loaded {} diagnoses from {}", catalog.len(), path.display());
        Ok(catalog)
    }

    pub fn from_json(content: &str) -> ModelResult<Self> {
        let list: Vec<Diagnosis> = serde_json::from_str(content)?;
        Self::from_diagnoses(list)
    }

    pub fn from_diagnoses(list: Vec<Diagnosis>) -> ModelResult<Self> {
        let mut diagnoses = BTreeMap::new();
        for diagnosis in list {
            if diagnosis.code.trim().is_empty() {
                return Err(ValidationError::IncorrectOrMissing {
                    field: "code",
                    found: diagnosis.code,
                }
                .into());
            }
            if diagnoses.contains_key(&diagnosis.code) {
                return Err(ModelError::DuplicateDiagnosisCode(diagnosis.code));
            }
            diagnoses.insert(diagnosis.code.clone(), diagnosis);
        }
        Ok(Self { diagnoses })
    }

    pub fn get(&self, code: &str) -> Option<&Diagnosis> {
        self.diagnoses.get(code)
    }

    pub fn contains(&self, code: &str) -> bool {
        self.diagnoses.contains_key(code)
    }

    /// Diagnoses in code order.
    pub fn iter(&self) -> impl Iterator<Item = &Diagnosis> {
        self.diagnoses.values()
    }

    pub fn len(&self) -> usize {
        self.diagnoses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.diagnoses.is_empty()
    }

    /// Fails on the first code the catalog does not know.
    pub fn check_codes<S: AsRef<str>>(&self, codes: &[S]) -> ValidationResult<()> {
        match codes.iter().find(|code| !self.contains(code.as_ref())) {
            Some(unknown) => Err(ValidationError::UnknownDiagnosisCode(unknown.as_ref().to_string())),
            None => Ok(()),
        }
    }
}
