use crate::geometry::wrap_time;
use serde_with::{DeserializeFromStr, SerializeDisplay};
use strum::{Display as StrumDisplay, EnumString};
use thiserror::Error;

/// Text form used when reading and writing times of day.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    SerializeDisplay,
    DeserializeFromStr,
    EnumString,
    StrumDisplay,
)]
#[strum(ascii_case_insensitive)]
pub enum ClockMode {
    #[default]
    #[strum(to_string = "24h", serialize = "24", serialize = "twentyfour")]
    TwentyFour,
    #[strum(to_string = "12h", serialize = "12", serialize = "twelve")]
    Twelve,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimeParseError {
    #[error("Malformed time '{0}', expected HH:MM")]
    Malformed(String),
    #[error("Time '{0}' is out of range")]
    OutOfRange(String),
    #[error("Time '{0}' is missing an AM/PM suffix")]
    MissingMeridiem(String),
}

/// Parses clock text into fractional hours in `[0, 24)`.
///
/// `24:00` is accepted and wraps to midnight.
pub fn parse_time(text: &str, mode: ClockMode) -> Result<f64, TimeParseError> {
    match mode {
        ClockMode::TwentyFour => parse_twenty_four(text),
        ClockMode::Twelve => parse_twelve(text),
    }
}

/// Formats fractional hours as clock text, rounding to the nearest minute.
pub fn format_time(time: f64, mode: ClockMode) -> String {
    let total = (wrap_time(time) * 60.0).round() as u32 % (24 * 60);
    let (hours, minutes) = (total / 60, total % 60);

    match mode {
        ClockMode::TwentyFour => format!("{hours:02}:{minutes:02}"),
        ClockMode::Twelve => {
            let meridiem = if hours < 12 { "AM" } else { "PM" };
            let hours = match hours % 12 {
                0 => 12,
                h => h,
            };
            format!("{hours}:{minutes:02} {meridiem}")
        }
    }
}

fn split_clock(text: &str) -> Result<(u32, u32), TimeParseError> {
    let malformed = || TimeParseError::Malformed(text.to_string());
    let (hours, minutes) = text.trim().split_once(':').ok_or_else(malformed)?;
    if minutes.len() != 2 {
        return Err(malformed());
    }
    let hours = hours.trim().parse::<u32>().map_err(|_| malformed())?;
    let minutes = minutes.parse::<u32>().map_err(|_| malformed())?;
    if minutes >= 60 {
        return Err(TimeParseError::OutOfRange(text.to_string()));
    }
    Ok((hours, minutes))
}

fn parse_twenty_four(text: &str) -> Result<f64, TimeParseError> {
    let (hours, minutes) = split_clock(text)?;
    if hours > 24 || (hours == 24 && minutes > 0) {
        return Err(TimeParseError::OutOfRange(text.to_string()));
    }
    Ok(wrap_time(hours as f64 + minutes as f64 / 60.0))
}

fn parse_twelve(text: &str) -> Result<f64, TimeParseError> {
    let upper = text.trim().to_ascii_uppercase();
    let (clock, pm) = if let Some(clock) = upper.strip_suffix("AM") {
        (clock, false)
    } else if let Some(clock) = upper.strip_suffix("PM") {
        (clock, true)
    } else {
        return Err(TimeParseError::MissingMeridiem(text.to_string()));
    };

    let (hours, minutes) = split_clock(clock).map_err(|_| TimeParseError::Malformed(text.to_string()))?;
    if !(1..=12).contains(&hours) {
        return Err(TimeParseError::OutOfRange(text.to_string()));
    }

    let hours = match (hours, pm) {
        (12, false) => 0,
        (12, true) => 12,
        (h, false) => h,
        (h, true) => h + 12,
    };
    Ok(hours as f64 + minutes as f64 / 60.0)
}
