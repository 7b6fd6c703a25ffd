#![deny(warnings)]
#![deny(rust_2018_idioms)]

//! Adapter for the park monitoring backend, exposes it as a [`parkwatch_core::VesselSource`].

mod client;
mod error;
mod geojson;
mod models;
mod settings;

pub use client::ParkApiClient;
pub use error::{Error, Result};
pub use settings::Settings;
