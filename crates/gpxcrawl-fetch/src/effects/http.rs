use std::future::Future;

use bytes::Bytes;

use crate::error::Result;

/// A fully buffered HTTP response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status:         u16,
    /// Value of the `Content-Length` header, if present and numeric.
    pub content_length: Option<u64>,
    pub body:           Bytes,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            content_length: None,
            body: body.into(),
        }
    }

    pub fn with_content_length(mut self, length: u64) -> Self {
        self.content_length = Some(length);
        self
    }
}

/// Asynchronous HTTP client abstraction.
///
/// Non-2xx statuses are not errors: they come back as an [`HttpResponse`] so
/// the caller can tell a 429 from a 500. Implementations map timeouts to
/// [`Error::Timeout`](crate::Error::Timeout) and every other transport failure
/// to [`Error::Network`](crate::Error::Network).
pub trait HttpClient: Send + Sync {
    fn get(&self, url: &str) -> impl Future<Output = Result<HttpResponse>> + Send;
}

impl<C: HttpClient> HttpClient for std::sync::Arc<C> {
    fn get(&self, url: &str) -> impl Future<Output = Result<HttpResponse>> + Send {
        (**self).get(url)
    }
}

#[cfg(feature = "reqwest")]
mod reqwest_impl {
    use std::time::Duration;

    use super::*;
    use crate::error::Error;

    /// Production HTTP client using reqwest.
    #[derive(Debug, Clone)]
    pub struct ReqwestClient {
        client: reqwest::Client,
    }

    impl ReqwestClient {
        /// Build a client whose requests time out after `timeout`.
        pub fn new(timeout: Duration) -> Result<Self> {
            let client = reqwest::Client::builder()
                .timeout(timeout)
                .user_agent(concat!("gpxcrawl/", env!("CARGO_PKG_VERSION")))
                .build()
                .map_err(|e| Error::Client(e.to_string()))?;
            Ok(Self { client })
        }

        fn map_error(e: reqwest::Error) -> Error {
            if e.is_timeout() {
                Error::Timeout
            } else {
                Error::Network(e.to_string())
            }
        }
    }

    impl HttpClient for ReqwestClient {
        async fn get(&self, url: &str) -> Result<HttpResponse> {
            let response = self.client.get(url).send().await.map_err(Self::map_error)?;
            let status = response.status().as_u16();
            let content_length = response
                .headers()
                .get(reqwest::header::CONTENT_LENGTH)
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok());
            let body = response.bytes().await.map_err(Self::map_error)?;

            Ok(HttpResponse {
                status,
                content_length,
                body,
            })
        }
    }
}

#[cfg(feature = "reqwest")]
pub use reqwest_impl::ReqwestClient;
