use reminder_scheduler_domain::InvalidDurationError;
use std::convert::Infallible;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ReminderError {
    #[error("Invalid data provided: Error message: `{0}`")]
    Validation(String),
    #[error("Not found. Error message: `{0}`")]
    NotFound(String),
    #[error(transparent)]
    InvalidDuration(#[from] InvalidDurationError),
    #[error("There was a conflict with the request. Error message: `{0}`")]
    Conflict(String),
    #[error("The reminder store failed. Error message: `{0}`")]
    Persistence(String),
}

impl From<Infallible> for ReminderError {
    fn from(e: Infallible) -> Self {
        match e {}
    }
}
