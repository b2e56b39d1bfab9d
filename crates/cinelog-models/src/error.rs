use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ModelError {
    #[error("rating {0} is outside the 0-5 scale")]
    RatingOutOfRange(f64),

    #[error("rating {0} is not on the half-star scale")]
    RatingOffStep(f64),

    #[error("'{0}' is not a number")]
    InvalidNumber(String),

    #[error("unknown field '{0}'")]
    UnknownField(String),

    #[error("unsupported poster '{0}' (expected a JPEG or PNG file)")]
    UnsupportedPoster(String),

    #[error("invalid entry id '{0}'")]
    InvalidId(String),
}
