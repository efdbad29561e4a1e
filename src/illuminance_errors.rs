use thiserror::Error;

#[derive(Error, Debug)]
pub enum IlluminanceError {
    #[error("Invalid date string (expected YYYY-MM-DD): {0}")]
    InvalidDateFormat(String),

    #[error("Invalid calendar date: {0}")]
    InvalidCalendarDate(String),

    #[error("Latitude out of range [-90, 90]: {0}")]
    LatitudeOutOfRange(f64),

    #[error("Longitude out of range [-180, 360]: {0}")]
    LongitudeOutOfRange(f64),

    #[error("Timezone offset out of range [-14, 14] hours: {0}")]
    TimezoneOffsetOutOfRange(f64),

    #[error("Invalid configuration value for {field}: {value}")]
    InvalidConfig { field: &'static str, value: f64 },

    #[error("Invalid sampling window: {0}")]
    InvalidSamplingWindow(String),

    #[error("Unable to perform file operation: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON (de)serialization error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl PartialEq for IlluminanceError {
    fn eq(&self, other: &Self) -> bool {
        use IlluminanceError::*;
        match (self, other) {
            (InvalidDateFormat(a), InvalidDateFormat(b)) => a == b,
            (InvalidCalendarDate(a), InvalidCalendarDate(b)) => a == b,
            (LatitudeOutOfRange(a), LatitudeOutOfRange(b)) => a == b,
            (LongitudeOutOfRange(a), LongitudeOutOfRange(b)) => a == b,
            (TimezoneOffsetOutOfRange(a), TimezoneOffsetOutOfRange(b)) => a == b,
            (
                InvalidConfig {
                    field: fa,
                    value: va,
                },
                InvalidConfig {
                    field: fb,
                    value: vb,
                },
            ) => fa == fb && (va == vb || (va.is_nan() && vb.is_nan())),
            (InvalidSamplingWindow(a), InvalidSamplingWindow(b)) => a == b,

            // Wrapped errors are not comparable: equal if same variant
            (IoError(_), IoError(_)) => true,
            (JsonError(_), JsonError(_)) => true,

            _ => false,
        }
    }
}
