// fitness/src/exercise.rs

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::errors::{FitnessError, FitnessResult};
use crate::parse::parse_number;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Rating {
    MuchRoomForImprovement = 1,
    NotBad = 2,
    Perfect = 3,
}

impl Rating {
    /// Perfect when every day reached the target, not bad when at least half
    /// of them did.
    pub fn from_days(days_on_target: usize, period_length: usize) -> Self {
        if days_on_target == period_length {
            Rating::Perfect
        } else if days_on_target * 2 >= period_length {
            Rating::NotBad
        } else {
            Rating::MuchRoomForImprovement
        }
    }

    pub fn value(&self) -> u8 {
        *self as u8
    }

    pub fn description(&self) -> &'static str {
        match self {
            Rating::MuchRoomForImprovement => "Much room for improvement",
            Rating::NotBad => "Not bad but could be better",
            Rating::Perfect => "Perfect",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExerciseReport {
    pub period_length: usize,
    pub training_days: usize,
    pub success: bool,
    pub rating: u8,
    pub rating_description: String,
    pub target: f64,
    pub average: f64,
}

/// Summarises a period of daily exercise hours against a daily target.
///
/// `success` means there was no rest day in the period; the rating is what
/// measures the hours against `target`.
pub fn calculate_exercises(days: &[f64], target: f64) -> FitnessResult<ExerciseReport> {
    if days.is_empty() {
        return Err(FitnessError::NotEnoughArguments);
    }
    if !target.is_finite() {
        return Err(FitnessError::TargetNotANumber(target.to_string()));
    }
    if target < 1.0 {
        return Err(FitnessError::TargetTooLow);
    }
    if days.iter().any(|hours| !hours.is_finite() || *hours < 0.0) {
        return Err(FitnessError::MalformattedParameters);
    }

    let period_length = days.len();
    let training_days = days.iter().filter(|hours| **hours > 0.0).count();
    let days_on_target = days.iter().filter(|hours| **hours >= target).count();
    let rating = Rating::from_days(days_on_target, period_length);
    let average = days.iter().sum::<f64>() / period_length as f64;

    debug!("{days_on_target} of {period_length} days reached the target of {target} hours");
    Ok(ExerciseReport {
        period_length,
        training_days,
        success: training_days == period_length,
        rating: rating.value(),
        rating_description: rating.description().to_string(),
        target,
        average,
    })
}

/// Reads `<target> <hours>...` from command-line arguments.
pub fn parse_exercise_arguments<S: AsRef<str>>(args: &[S]) -> FitnessResult<(Vec<f64>, f64)> {
    let Some((target, days)) = args.split_first() else {
        return Err(FitnessError::NotEnoughArguments);
    };

    let days = days
        .iter()
        .map(|day| parse_number(day.as_ref()).ok_or_else(|| FitnessError::NotANumber(day.as_ref().to_string())))
        .collect::<FitnessResult<Vec<f64>>>()?;
    let target = parse_number(target.as_ref())
        .ok_or_else(|| FitnessError::TargetNotANumber(target.as_ref().to_string()))?;

    if target < 1.0 {
        return Err(FitnessError::TargetTooLow);
    }
    Ok((days, target))
}

/// The `{ "daily_exercises": [...], "target": n }` request body.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ExerciseRequest {
    pub daily_exercises: Option<Vec<f64>>,
    pub target: Option<f64>,
}

impl ExerciseRequest {
    /// Absent fields and a zero target are reported as missing parameters;
    /// anything else that keeps the report from being computed is reported
    /// as malformatted.
    pub fn evaluate(&self) -> FitnessResult<ExerciseReport> {
        let (Some(days), Some(target)) = (&self.daily_exercises, self.target.filter(|target| *target != 0.0))
        else {
            return Err(FitnessError::ParametersMissing);
        };
        calculate_exercises(days, target).map_err(|_| FitnessError::MalformattedParameters)
    }
}

/// Evaluates an untyped request body.
pub fn evaluate_exercise_request(body: &Value) -> FitnessResult<ExerciseReport> {
    let present = |field: &str| body.get(field).is_some_and(|value| !value.is_null());
    if !present("daily_exercises") || !present("target") {
        return Err(FitnessError::ParametersMissing);
    }

    let request = ExerciseRequest::deserialize(body).map_err(|_| FitnessError::MalformattedParameters)?;
    request.evaluate()
}
