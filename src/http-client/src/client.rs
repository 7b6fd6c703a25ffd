use std::time::Duration;

use reqwest::{Client, Url};
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{RetryTransientMiddleware, policies::ExponentialBackoff};
use reqwest_tracing::TracingMiddleware;
use serde::{Serialize, de::DeserializeOwned};
use snafu::ResultExt;

use crate::{
    RequestBuilder, Result,
    error::{BuildSnafu, InvalidUrlSnafu},
};

/// HTTP client bound to a single backend base address.
///
/// Requests are traced and transient failures are retried with exponential backoff.
#[derive(Debug, Clone)]
pub struct HttpClient {
    inner: ClientWithMiddleware,
    base: Url,
}

#[derive(Debug)]
pub struct HttpClientBuilder {
    client: reqwest::ClientBuilder,
    base: Url,
    max_retries: u32,
}

impl HttpClient {
    fn new_with(inner: Client, base: Url, max_retries: u32) -> Self {
        let inner = ClientBuilder::new(inner)
            .with(TracingMiddleware::default())
            .with(RetryTransientMiddleware::new_with_policy(
                ExponentialBackoff::builder().build_with_max_retries(max_retries),
            ))
            .build();

        Self { inner, base }
    }

    pub fn builder(base: Url) -> HttpClientBuilder {
        HttpClientBuilder::new(base)
    }

    /// Resolves `path` against the base address.
    pub fn url(&self, path: &str) -> Result<Url> {
        self.base.join(path).map_err(|e| {
            InvalidUrlSnafu {
                base: self.base.to_string(),
                path,
                error_stringified: e.to_string(),
            }
            .build()
        })
    }

    pub fn get(&self, path: &str) -> Result<RequestBuilder> {
        let url = self.url(path)?;
        Ok(RequestBuilder::new(self.inner.get(url.clone()), url))
    }

    /// Issues a GET request and decodes the JSON body.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: Option<&impl Serialize>,
    ) -> Result<T> {
        let mut req = self.get(path)?;

        if let Some(query) = query {
            req = req.query(query);
        }

        req.send().await?.json().await
    }
}

impl HttpClientBuilder {
    pub fn new(base: Url) -> Self {
        Self {
            client: reqwest::ClientBuilder::new(),
            base,
            max_retries: 3,
        }
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.client = self.client.timeout(timeout);
        self
    }

    pub fn max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    pub fn build(self) -> Result<HttpClient> {
        let inner = self.client.build().context(BuildSnafu)?;
        Ok(HttpClient::new_with(inner, self.base, self.max_retries))
    }
}
