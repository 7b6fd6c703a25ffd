use reqwest::StatusCode;
use snafu::{Location, Snafu};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum Error {
    #[snafu(display("Failed to build HTTP client"))]
    Build {
        #[snafu(implicit)]
        location: Location,
        source: reqwest::Error,
    },
    #[snafu(display("Invalid url, base: '{base}', path: '{path}', error: '{error_stringified}'"))]
    InvalidUrl {
        #[snafu(implicit)]
        location: Location,
        base: String,
        path: String,
        error_stringified: String,
    },
    #[snafu(display("HTTP transport error, url: '{url}'"))]
    Transport {
        #[snafu(implicit)]
        location: Location,
        url: String,
        source: reqwest_middleware::Error,
    },
    #[snafu(display("Failed to read response body, url: '{url}'"))]
    Body {
        #[snafu(implicit)]
        location: Location,
        url: String,
        source: reqwest::Error,
    },
    #[snafu(display("HTTP request failed, status: '{status}', url: '{url}', body: '{body}'"))]
    FailedRequest {
        #[snafu(implicit)]
        location: Location,
        url: String,
        status: StatusCode,
        body: String,
    },
    #[snafu(display("Failed to decode response body, url: '{url}'"))]
    Decode {
        #[snafu(implicit)]
        location: Location,
        url: String,
        source: serde_json::Error,
    },
}

impl Error {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::FailedRequest { status, .. } => Some(*status),
            Error::Build { .. }
            | Error::InvalidUrl { .. }
            | Error::Transport { .. }
            | Error::Body { .. }
            | Error::Decode { .. } => None,
        }
    }

    pub fn body(&self) -> Option<&str> {
        match self {
            Error::FailedRequest { body, .. } => Some(body),
            _ => None,
        }
    }

    pub fn url(&self) -> Option<&str> {
        match self {
            Error::Transport { url, .. }
            | Error::Body { url, .. }
            | Error::FailedRequest { url, .. }
            | Error::Decode { url, .. } => Some(url),
            Error::Build { .. } | Error::InvalidUrl { .. } => None,
        }
    }

    pub fn is_timeout(&self) -> bool {
        match self {
            Error::Transport { source, .. } => match source {
                reqwest_middleware::Error::Reqwest(e) => e.is_timeout(),
                reqwest_middleware::Error::Middleware(e) => e.chain().any(|cause| {
                    cause
                        .downcast_ref::<reqwest::Error>()
                        .is_some_and(|r| r.is_timeout())
                }),
            },
            Error::Body { source, .. } => source.is_timeout(),
            _ => false,
        }
    }

    /// The request never produced a usable response.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Error::Transport { .. } | Error::Body { .. } | Error::Build { .. } | Error::InvalidUrl { .. }
        )
    }
}
