//! HTTP fetch seam used for remote documents.
//!
//! The loader only needs a method, some headers, a status code, response
//! headers and the body text, so that is all [`Fetch`] exposes. Tests and
//! embedders can swap in their own implementation.

use std::fmt::Debug;

use futures_util::future::BoxFuture;
use reqwest::Method;
use reqwest::header::HeaderMap;
use tracing::debug;
use url::Url;

use crate::error::{Error, Result};

/// Request parameters for a single document fetch.
#[derive(Debug, Clone)]
pub struct FetchRequest {
    /// HTTP method, `GET` unless configured.
    pub method: Method,
    /// User agent, authorization and custom headers.
    pub headers: HeaderMap,
}

/// A fully-read response.
#[derive(Debug, Clone)]
pub struct FetchResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response headers.
    pub headers: HeaderMap,
    /// Body decoded as text.
    pub body: String,
}

impl FetchResponse {
    /// Value of a response header, if present and valid UTF-8.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// The body text.
    pub fn text(&self) -> &str {
        &self.body
    }

    /// Whether the status is 2xx.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Capability to fetch a remote document.
pub trait Fetch: Send + Sync + Debug {
    /// Fetch `url` and read the whole response.
    fn fetch<'a>(
        &'a self,
        url: &'a Url,
        request: &'a FetchRequest,
    ) -> BoxFuture<'a, Result<FetchResponse>>;
}

/// [`Fetch`] backed by a `reqwest` client.
#[derive(Debug, Clone, Default)]
pub struct ReqwestFetch {
    client: reqwest::Client,
}

impl ReqwestFetch {
    /// Use a preconfigured client (proxies, timeouts, TLS roots).
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl Fetch for ReqwestFetch {
    fn fetch<'a>(
        &'a self,
        url: &'a Url,
        request: &'a FetchRequest,
    ) -> BoxFuture<'a, Result<FetchResponse>> {
        Box::pin(async move {
            debug!(%url, method = %request.method, "Sending document request.");
            let response = self
                .client
                .request(request.method.clone(), url.clone())
                .headers(request.headers.clone())
                .send()
                .await
                .map_err(|source| Error::Http {
                    url: url.to_string(),
                    source,
                })?;
            let status = response.status().as_u16();
            let headers = response.headers().clone();
            let body = response.text().await.map_err(|source| Error::Http {
                url: url.to_string(),
                source,
            })?;
            debug!(%url, status, bytes = body.len(), "Received document response.");
            Ok(FetchResponse {
                status,
                headers,
                body,
            })
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use reqwest::header::{CONTENT_TYPE, HeaderValue};

    use super::*;

    #[test]
    fn test_response_accessors() {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let response = FetchResponse {
            status: 204,
            headers,
            body: "{}".to_string(),
        };
        assert_eq!(response.header("content-type"), Some("application/json"));
        assert_eq!(response.header("x-missing"), None);
        assert_eq!(response.text(), "{}");
        assert!(response.is_success());
        assert!(
            !FetchResponse {
                status: 404,
                headers: HeaderMap::new(),
                body: String::new()
            }
            .is_success()
        );
    }
}
