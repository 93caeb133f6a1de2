// fitness/src/lib.rs

//! Body mass index and weekly exercise calculators.

pub mod bmi;
pub mod errors;
pub mod exercise;
mod parse;

pub use bmi::{BmiCategory, BmiReport, body_mass_index, calculate_bmi, parse_bmi_arguments};
pub use errors::{FitnessError, FitnessResult};
pub use exercise::{
    ExerciseReport, ExerciseRequest, Rating, calculate_exercises, evaluate_exercise_request, parse_exercise_arguments,
};
