use snafu::{Location, Snafu};
use strum::{AsRefStr, Display};

pub type SourceResult<T> = std::result::Result<T, SourceError>;

/// Failures when talking to the vessel backend.
///
/// All of them are recoverable, consumers keep their last good data and surface the error.
#[derive(Debug, Clone, Snafu)]
#[snafu(visibility(pub))]
pub enum SourceError {
    #[snafu(display("Backend unreachable, url: '{url}', timeout: '{timeout}', error: '{error_stringified}'"))]
    NetworkFailure {
        #[snafu(implicit)]
        location: Location,
        url: String,
        timeout: bool,
        error_stringified: String,
    },
    #[snafu(display("Backend responded with status '{status}', url: '{url}', body: '{body}'"))]
    BadStatus {
        #[snafu(implicit)]
        location: Location,
        url: String,
        status: u16,
        body: String,
    },
    #[snafu(display("Malformed payload, url: '{url}', error: '{error_stringified}'"))]
    MalformedPayload {
        #[snafu(implicit)]
        location: Location,
        url: String,
        error_stringified: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr, Display)]
#[strum(serialize_all = "snake_case")]
pub enum SourceErrorKind {
    NetworkFailure,
    BadStatus,
    MalformedPayload,
}

impl SourceError {
    pub fn kind(&self) -> SourceErrorKind {
        match self {
            SourceError::NetworkFailure { .. } => SourceErrorKind::NetworkFailure,
            SourceError::BadStatus { .. } => SourceErrorKind::BadStatus,
            SourceError::MalformedPayload { .. } => SourceErrorKind::MalformedPayload,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            SourceError::BadStatus { status, .. } => Some(*status),
            SourceError::NetworkFailure { .. } | SourceError::MalformedPayload { .. } => None,
        }
    }
}
