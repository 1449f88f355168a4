use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Unsupported individual type: {0}")]
    UnsupportedIndividualType(String),

    #[error("Malformed individual: {0}")]
    MalformedIndividual(String),

    #[error("Overlapping annotations: {first:?} and {second:?}")]
    OverlappingAnnotations {
        first: (usize, usize),
        second: (usize, usize),
    },

    #[error("Invalid span {start}..{end} for narrative of {len} bytes")]
    InvalidSpan { start: usize, end: usize, len: usize },

    #[error("Unknown locale: {0}")]
    UnknownLocale(String),

    #[error("Recognizer failed: {0}")]
    Recognizer(#[source] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
