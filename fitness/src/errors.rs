// fitness/src/errors.rs

pub use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum FitnessError {
    #[error("Not enough arguments")]
    NotEnoughArguments,
    #[error("Too many arguments")]
    TooManyArguments,
    #[error("Provided values were not numbers: {0}")]
    NotANumber(String),
    #[error("Provided target is not a number: {0}")]
    TargetNotANumber(String),
    #[error("Provided target must be a 1 or higher")]
    TargetTooLow,
    /// A request body lacked one of the fields it needs.
    #[error("parameters missing")]
    ParametersMissing,
    /// A request carried the fields, but they could not be used.
    #[error("malformatted parameters")]
    MalformattedParameters,
}

pub type FitnessResult<T> = Result<T, FitnessError>;
