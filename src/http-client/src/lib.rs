#![deny(warnings)]
#![deny(rust_2018_idioms)]

//! Thin JSON-over-HTTP client with transient retries and request tracing, relative to one base
//! url.

mod client;
mod error;
mod request;
mod response;

pub use client::{HttpClient, HttpClientBuilder};
pub use error::{Error, Result};
pub use request::RequestBuilder;
pub use reqwest::{StatusCode, Url};
pub use response::Response;
