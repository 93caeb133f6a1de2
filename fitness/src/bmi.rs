// fitness/src/bmi.rs

use std::fmt;

use serde::{Serialize, Serializer};
use tracing::debug;

use crate::errors::{FitnessError, FitnessResult};
use crate::parse::parse_number;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BmiCategory {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

impl BmiCategory {
    /// Classifies an index. The upper bounds of `Normal` (25) and
    /// `Overweight` (30) are inclusive; `Underweight` stops below 18.5.
    pub fn from_index(bmi: f64) -> Self {
        if bmi < 18.5 {
            BmiCategory::Underweight
        } else if bmi <= 25.0 {
            BmiCategory::Normal
        } else if bmi <= 30.0 {
            BmiCategory::Overweight
        } else {
            BmiCategory::Obese
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            BmiCategory::Underweight => "Underweight",
            BmiCategory::Normal => "Normal (healthy weight)",
            BmiCategory::Overweight => "Overweight",
            BmiCategory::Obese => "Obese",
        }
    }
}

impl fmt::Display for BmiCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for BmiCategory {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

/// `weight / (height in metres)^2`.
pub fn body_mass_index(height_cm: f64, weight_kg: f64) -> f64 {
    weight_kg / (height_cm / 100.0).powi(2)
}

pub fn calculate_bmi(height_cm: f64, weight_kg: f64) -> FitnessResult<BmiCategory> {
    let usable = |value: f64| value.is_finite() && value > 0.0;
    if !usable(height_cm) || !usable(weight_kg) {
        return Err(FitnessError::MalformattedParameters);
    }

    let bmi = body_mass_index(height_cm, weight_kg);
    debug!("BMI for {height_cm} cm / {weight_kg} kg is {bmi:.2}");
    Ok(BmiCategory::from_index(bmi))
}

/// Reads `<height_cm> <weight_kg>` from command-line arguments.
pub fn parse_bmi_arguments<S: AsRef<str>>(args: &[S]) -> FitnessResult<(f64, f64)> {
    match args {
        [] | [_] => Err(FitnessError::NotEnoughArguments),
        [height, weight] => {
            let number = |arg: &S| {
                parse_number(arg.as_ref()).ok_or_else(|| FitnessError::NotANumber(arg.as_ref().to_string()))
            };
            Ok((number(height)?, number(weight)?))
        }
        _ => Err(FitnessError::TooManyArguments),
    }
}

/// The answer to a height/weight query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BmiReport {
    pub height: f64,
    pub weight: f64,
    pub bmi: BmiCategory,
}

impl BmiReport {
    pub fn new(height_cm: f64, weight_kg: f64) -> FitnessResult<Self> {
        Ok(BmiReport {
            height: height_cm,
            weight: weight_kg,
            bmi: calculate_bmi(height_cm, weight_kg)?,
        })
    }

    /// Query-string semantics: any value that is missing or not a usable
    /// number is reported as malformatted.
    pub fn from_query(height: Option<&str>, weight: Option<&str>) -> FitnessResult<Self> {
        let height = height.and_then(parse_number).ok_or(FitnessError::MalformattedParameters)?;
        let weight = weight.and_then(parse_number).ok_or(FitnessError::MalformattedParameters)?;
        Self::new(height, weight)
    }
}
