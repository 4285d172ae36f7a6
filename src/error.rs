use thiserror::Error;

/// Validation failures raised by the similarity core.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SimilarityError {
    /// Threshold was not a number, or fell outside `0..=100`.
    #[error("invalid threshold `{value}`: expected an integer between 0 and 100")]
    InvalidThreshold { value: String },
}
