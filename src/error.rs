use thiserror::Error;

/// Errors raised by the timeline layout engine for malformed input.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    #[error("invalid time format: {0}")]
    InvalidTimeFormat(String),
    #[error("invalid duration for appointment {id}: {minutes} minutes")]
    InvalidDuration { id: String, minutes: i32 },
    #[error(transparent)]
    InvalidConfig(#[from] ConfigError),
}

impl LayoutError {
    /// Stable machine-readable code used in JSON error bodies.
    pub fn code(&self) -> &'static str {
        match self {
            LayoutError::InvalidTimeFormat(_) => "INVALID_TIME_FORMAT",
            LayoutError::InvalidDuration { .. } => "INVALID_DURATION",
            LayoutError::InvalidConfig(_) => "INVALID_CONFIG",
        }
    }
}

/// Timeline settings that cannot describe a drawable day.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("invalid timeline hours {start}..={end}, expected 0 <= start <= end <= 23")]
    HourRange { start: u8, end: u8 },
    #[error("pixels per hour must be positive, got {0}")]
    PixelsPerHour(f64),
}

/// Errors raised while loading an appointment book from CSV.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("missing required column '{0}'")]
    MissingColumn(&'static str),
    #[error("row {row}: {source}")]
    InvalidRow {
        row: usize,
        #[source]
        source: LayoutError,
    },
    #[error("row {row}: invalid date '{value}'")]
    InvalidDate { row: usize, value: String },
    #[error("row {row}: invalid duration '{value}'")]
    InvalidNumber { row: usize, value: String },
    #[error("row {row}: unknown status '{value}'")]
    UnknownStatus { row: usize, value: String },
}
