//! Relative time-window grammar for the browse endpoint.
//!
//! Operators ask for "the last 2 days" rather than absolute bounds. The
//! browse handler accepts `<count><unit>` offsets (`90m`, `2h`, `3d`,
//! `1w`) and resolves them against a single reference instant.

use chrono::Duration;

/// Why a relative-window offset failed to parse.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TimeWindowError {
    #[error("offset must be <count><unit>, e.g. 90m, 2h, 3d, 1w")]
    InvalidFormat,

    #[error("unknown time unit {0:?}, expected one of m, h, d, w")]
    UnknownUnit(char),
}

/// Parse a `<count><unit>` offset into a duration reaching into the past.
///
/// Units are minutes, hours, days and weeks. A zero count is allowed and
/// means "now" when used as the near edge of a window.
pub fn parse_offset(s: &str) -> Result<Duration, TimeWindowError> {
    let mut chars = s.trim().chars();
    let unit = chars.next_back().ok_or(TimeWindowError::InvalidFormat)?;
    let count: i64 = chars
        .as_str()
        .parse()
        .map_err(|_| TimeWindowError::InvalidFormat)?;
    if count < 0 {
        return Err(TimeWindowError::InvalidFormat);
    }
    match unit {
        'm' => Ok(Duration::minutes(count)),
        'h' => Ok(Duration::hours(count)),
        'd' => Ok(Duration::days(count)),
        'w' => Ok(Duration::weeks(count)),
        other => Err(TimeWindowError::UnknownUnit(other)),
    }
}
