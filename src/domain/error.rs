// Domain errors
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AnalysisError {
    #[error("insufficient data: need at least {required} readings, have {actual}")]
    InsufficientData { required: usize, actual: usize },
}
