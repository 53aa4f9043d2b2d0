//! Timestamp display helpers.
//!
//! The understanding service reports segment boundaries in raw seconds;
//! responses carry both the raw value and an `M:SS` display string.

/// Format seconds as an `M:SS` display string.
///
/// Fractional seconds are floored and the seconds field is zero-padded to
/// two digits. An absent value renders as `"0:00"`.
///
/// # Examples
/// ```
/// use adloom_models::timestamp::seconds_to_mmss;
/// assert_eq!(seconds_to_mmss(Some(65.0)), "1:05");
/// assert_eq!(seconds_to_mmss(None), "0:00");
/// ```
pub fn seconds_to_mmss(seconds: Option<f64>) -> String {
    match seconds {
        Some(s) => {
            let total = s as i64;
            format!("{}:{:02}", total / 60, total % 60)
        }
        None => "0:00".to_string(),
    }
}

/// Parse an `M:SS` display string back to seconds.
pub fn mmss_to_seconds(value: &str) -> Result<f64, TimestampError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(TimestampError::Empty);
    }

    let (minutes, seconds) = value
        .split_once(':')
        .ok_or_else(|| TimestampError::InvalidFormat(value.to_string()))?;
    let minutes: f64 = minutes
        .parse()
        .map_err(|_| TimestampError::InvalidValue("minutes", minutes.to_string()))?;
    let seconds: f64 = seconds
        .parse()
        .map_err(|_| TimestampError::InvalidValue("seconds", seconds.to_string()))?;
    if minutes < 0.0 || seconds < 0.0 {
        return Err(TimestampError::Negative);
    }

    Ok(minutes * 60.0 + seconds)
}

/// Timestamp parsing error.
#[derive(Debug, Clone, PartialEq)]
pub enum TimestampError {
    /// Timestamp string is empty
    Empty,
    /// Timestamp contains negative values
    Negative,
    /// Invalid numeric value for a component
    InvalidValue(&'static str, String),
    /// Not an M:SS string
    InvalidFormat(String),
}

impl std::fmt::Display for TimestampError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "Timestamp cannot be empty"),
            Self::Negative => write!(f, "Timestamp cannot be negative"),
            Self::InvalidValue(component, value) => {
                write!(f, "Invalid {} value: {}", component, value)
            }
            Self::InvalidFormat(ts) => {
                write!(f, "Invalid timestamp format '{}'. Use M:SS", ts)
            }
        }
    }
}

impl std::error::Error for TimestampError {}
