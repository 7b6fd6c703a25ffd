use reqwest::Url;
use serde::Serialize;
use snafu::ResultExt;

use crate::{
    Response, Result,
    error::{BodySnafu, FailedRequestSnafu, TransportSnafu},
};

#[derive(Debug)]
pub struct RequestBuilder {
    inner: reqwest_middleware::RequestBuilder,
    url: Url,
}

impl RequestBuilder {
    pub(crate) fn new(inner: reqwest_middleware::RequestBuilder, url: Url) -> Self {
        Self { inner, url }
    }

    pub fn query(self, query: &impl Serialize) -> Self {
        Self {
            inner: self.inner.query(query),
            url: self.url,
        }
    }

    /// This method will check the status of the response and return an error if it fails
    pub async fn send(self) -> Result<Response> {
        let url = self.url.to_string();

        let response = self
            .inner
            .send()
            .await
            .context(TransportSnafu { url: url.clone() })?;

        let status = response.status();
        if !status.is_success() {
            return FailedRequestSnafu {
                url: response.url().to_string(),
                status,
                body: response.text().await.context(BodySnafu { url })?,
            }
            .fail();
        }

        Ok(Response(response))
    }
}
