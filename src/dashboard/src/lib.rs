#![deny(warnings)]
#![deny(rust_2018_idioms)]

//! Headless dashboard: polls the park backend and drives one map instance from a line based
//! command shell.

pub mod error;
pub mod settings;
pub mod startup;

mod shell;
mod surface;

pub use error::{Error, Result};
pub use settings::*;
pub use shell::*;
pub use startup::*;
pub use surface::*;
