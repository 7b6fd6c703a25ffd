use parkwatch_core::{BadStatusSnafu, MalformedPayloadSnafu, NetworkFailureSnafu, SourceError};
use snafu::{IntoError, Location, Report, Snafu};

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Snafu)]
#[snafu(module, visibility(pub))]
pub enum Error {
    #[snafu(display("Park API request failed"))]
    Http {
        #[snafu(implicit)]
        location: Location,
        source: http_client::Error,
    },
    #[snafu(display("Invalid park API address '{address}', error: '{error_stringified}'"))]
    InvalidAddress {
        #[snafu(implicit)]
        location: Location,
        address: String,
        error_stringified: String,
    },
    #[snafu(display("Invalid boundary geometry, url: '{url}', reason: '{reason}'"))]
    InvalidGeometry {
        #[snafu(implicit)]
        location: Location,
        url: String,
        reason: String,
    },
}

impl From<http_client::Error> for Error {
    #[track_caller]
    fn from(source: http_client::Error) -> Self {
        error::HttpSnafu.into_error(source)
    }
}

impl From<Error> for SourceError {
    fn from(value: Error) -> Self {
        match value {
            Error::Http { source, .. } => {
                let url = source.url().unwrap_or_default().to_string();

                if let Some(status) = source.status() {
                    BadStatusSnafu {
                        url,
                        status: status.as_u16(),
                        body: source.body().unwrap_or_default(),
                    }
                    .build()
                } else if source.is_transport() {
                    NetworkFailureSnafu {
                        url,
                        timeout: source.is_timeout(),
                        error_stringified: Report::from_error(&source).to_string(),
                    }
                    .build()
                } else {
                    MalformedPayloadSnafu {
                        url,
                        error_stringified: Report::from_error(&source).to_string(),
                    }
                    .build()
                }
            }
            Error::InvalidAddress {
                address,
                error_stringified,
                ..
            } => NetworkFailureSnafu {
                url: address,
                timeout: false,
                error_stringified,
            }
            .build(),
            Error::InvalidGeometry { url, reason, .. } => MalformedPayloadSnafu {
                url,
                error_stringified: reason,
            }
            .build(),
        }
    }
}
