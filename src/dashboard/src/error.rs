use std::num::ParseFloatError;

use snafu::{Location, Snafu};
use tokio::task::JoinError;
use tokio_util::codec::LinesCodecError;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Snafu)]
#[snafu(module, visibility(pub))]
pub enum Error {
    #[snafu(display("Failed to create park API client"))]
    ParkApi {
        #[snafu(implicit)]
        location: Location,
        source: park_api::Error,
    },
    #[snafu(display("Failed to join tasks"))]
    Join {
        #[snafu(implicit)]
        location: Location,
        source: JoinError,
    },
    #[snafu(display("Failed to read command input"))]
    Input {
        #[snafu(implicit)]
        location: Location,
        source: LinesCodecError,
    },
    #[snafu(display("Failed to write command output"))]
    Output {
        #[snafu(implicit)]
        location: Location,
        source: std::io::Error,
    },
}

/// Invalid line typed into the command shell, reported back to the operator.
#[derive(Debug, Snafu)]
#[snafu(module(command_error), visibility(pub))]
pub enum CommandError {
    #[snafu(display("Unknown command '{command}'"))]
    Unknown { command: String },
    #[snafu(display("Command '{command}' is missing argument '{argument}'"))]
    MissingArgument {
        command: &'static str,
        argument: &'static str,
    },
    #[snafu(display("Invalid number '{value}'"))]
    InvalidNumber {
        value: String,
        source: ParseFloatError,
    },
    #[snafu(display("Invalid value '{value}' for '{argument}'"))]
    InvalidValue {
        argument: &'static str,
        value: String,
    },
}
