use thiserror::Error;

#[derive(Error, Debug)]
pub enum TrackError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Missing required columns ({}); available columns: {}", missing.join(", "), available.join(", "))]
    MissingColumns {
        missing: Vec<&'static str>,
        available: Vec<String>,
    },

    #[error("Invalid {column} value {value:?} on line {line}")]
    InvalidValue {
        line: u64,
        column: String,
        value: String,
    },

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, TrackError>;
