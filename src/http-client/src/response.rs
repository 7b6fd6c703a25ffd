use bytes::Bytes;
use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;
use snafu::ResultExt;

use crate::{
    Result,
    error::{BodySnafu, DecodeSnafu},
};

#[derive(Debug)]
pub struct Response(pub(crate) reqwest::Response);

impl Response {
    pub fn status(&self) -> StatusCode {
        self.0.status()
    }

    pub fn url(&self) -> &Url {
        self.0.url()
    }

    /// Reads the full body before decoding so that transport and decode failures are kept
    /// apart.
    pub async fn json<T: DeserializeOwned>(self) -> Result<T> {
        let url = self.0.url().to_string();
        let bytes = self.bytes().await?;
        serde_json::from_slice(&bytes).context(DecodeSnafu { url })
    }

    pub async fn bytes(self) -> Result<Bytes> {
        let url = self.0.url().to_string();
        self.0.bytes().await.context(BodySnafu { url })
    }
}
