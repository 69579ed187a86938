use clockface::clock::TimeParseError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PickerError {
    #[error("Invalid time in range {index}: {source}")]
    Time {
        index: usize,
        #[source]
        source: TimeParseError,
    },
    #[error("Invalid color '{color}' in range {index}")]
    Color { index: usize, color: String },
}
