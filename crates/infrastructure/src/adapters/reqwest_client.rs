//! HTTP Client implementation using reqwest.
//!
//! This adapter implements the `HttpClient` port using the reqwest library.
//! It handles all HTTP communication for the workbench.

use std::collections::BTreeMap;

use reqwest::{Client, Method, Url};
use tracing::debug;
use workbench_application::ports::{
    HttpClient, HttpClientError, TransportBody, TransportRequest, TransportResponse,
};
use workbench_domain::HttpMethod;

use crate::http::build_multipart_form;

const MAX_REDIRECTS: u32 = 10;

/// HTTP client implementation using reqwest.
///
/// Wraps a `reqwest::Client` that follows up to ten redirects and verifies
/// TLS certificates. The per-request timeout comes from the request.
pub struct ReqwestHttpClient {
    client: Client,
}

impl ReqwestHttpClient {
    /// Creates a client sending the given `User-Agent`.
    ///
    /// # Errors
    ///
    /// Returns an error if the client cannot be created.
    pub fn new(user_agent: &str) -> Result<Self, HttpClientError> {
        let client = Client::builder()
            .user_agent(user_agent)
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS as usize))
            .build()
            .map_err(|e| HttpClientError::Other(e.to_string()))?;

        Ok(Self { client })
    }

    /// Converts domain `HttpMethod` to reqwest `Method`.
    const fn to_reqwest_method(method: HttpMethod) -> Method {
        match method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
            HttpMethod::Put => Method::PUT,
            HttpMethod::Patch => Method::PATCH,
            HttpMethod::Delete => Method::DELETE,
            HttpMethod::Head => Method::HEAD,
            HttpMethod::Options => Method::OPTIONS,
        }
    }

    /// Parses the URL and appends the query parameters.
    fn build_url(request: &TransportRequest) -> Result<Url, HttpClientError> {
        let mut url = Url::parse(&request.url)
            .map_err(|e| HttpClientError::InvalidUrl(format!("{e}: {}", request.url)))?;
        if !request.query.is_empty() {
            url.query_pairs_mut().extend_pairs(&request.query);
        }
        Ok(url)
    }

    /// Maps reqwest errors to `HttpClientError`.
    fn map_error(error: &reqwest::Error, timeout_ms: u64) -> HttpClientError {
        if error.is_timeout() {
            return HttpClientError::Timeout { timeout_ms };
        }

        let host = || {
            error
                .url()
                .and_then(Url::host_str)
                .unwrap_or("unknown")
                .to_string()
        };

        if error.is_connect() {
            let message = error_chain(error);
            let lowered = message.to_lowercase();
            if lowered.contains("dns") || lowered.contains("resolve") {
                return HttpClientError::DnsError {
                    host: host(),
                    message,
                };
            }
            if lowered.contains("refused") {
                return HttpClientError::ConnectionRefused {
                    host: host(),
                    port: error
                        .url()
                        .and_then(Url::port_or_known_default)
                        .unwrap_or(80),
                };
            }
            if lowered.contains("certificate") || lowered.contains("tls") {
                return HttpClientError::TlsError(message);
            }
            return HttpClientError::ConnectionFailed(message);
        }

        if error.is_redirect() {
            return HttpClientError::TooManyRedirects { max: MAX_REDIRECTS };
        }

        HttpClientError::Other(error_chain(error))
    }
}

/// Joins an error with its sources so the root cause is visible.
fn error_chain(error: &dyn std::error::Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

fn collect_headers(headers: &reqwest::header::HeaderMap) -> BTreeMap<String, String> {
    let mut collected: BTreeMap<String, String> = BTreeMap::new();
    for (name, value) in headers {
        let value = value.to_str().unwrap_or("<binary>");
        collected
            .entry(name.to_string())
            .and_modify(|existing| {
                existing.push_str(", ");
                existing.push_str(value);
            })
            .or_insert_with(|| value.to_string());
    }
    collected
}

impl HttpClient for ReqwestHttpClient {
    async fn execute(
        &self,
        request: &TransportRequest,
    ) -> Result<TransportResponse, HttpClientError> {
        let url = Self::build_url(request)?;
        let timeout_ms = u64::try_from(request.timeout.as_millis()).unwrap_or(u64::MAX);

        let mut builder = self
            .client
            .request(Self::to_reqwest_method(request.method), url)
            .timeout(request.timeout);

        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }

        builder = match &request.body {
            TransportBody::None => builder,
            TransportBody::Text(content) => builder.body(content.clone()),
            TransportBody::Multipart(fields) => {
                builder.multipart(build_multipart_form(fields).await?)
            }
        };

        let response = builder
            .send()
            .await
            .map_err(|e| Self::map_error(&e, timeout_ms))?;

        let status = response.status();
        let status_text = status.canonical_reason().unwrap_or_default().to_string();
        let headers = collect_headers(response.headers());

        debug!(status = status.as_u16(), "response headers received");

        match response.bytes().await {
            Ok(body) => Ok(TransportResponse {
                status: status.as_u16(),
                status_text,
                headers,
                body: body.to_vec(),
            }),
            Err(e) => Err(HttpClientError::Incomplete {
                status: status.as_u16(),
                status_text,
                headers,
                message: format!("Failed to read body: {}", error_chain(&e)),
            }),
        }
    }
}
