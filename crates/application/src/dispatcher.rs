//! Dispatcher use case
//!
//! Turns a [`Request`] plus the active environment into a wire request,
//! executes it through the [`HttpClient`] port and always produces a
//! [`Response`]. Nothing here returns an error to the caller.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use tracing::{debug, info, warn};
use workbench_domain::{
    Auth, DispatchError, DispatchErrorKind, Environment, FormFieldKind, Request, RequestBody,
    Response,
};

use crate::ports::{
    HttpClient, HttpClientError, MultipartField, MultipartValue, TransportBody, TransportRequest,
};
use crate::variable_resolver::VariableResolver;

/// Fixed timeout applied to every dispatch.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

const CONTENT_TYPE: &str = "Content-Type";

/// Use case for dispatching requests.
///
/// # Example
///
/// ```ignore
/// let dispatcher = Dispatcher::new(Arc::new(ReqwestHttpClient::new()?));
/// let response = dispatcher.send(&request, Some(&environment)).await;
/// ```
pub struct Dispatcher<C: HttpClient> {
    client: Arc<C>,
}

impl<C: HttpClient> Dispatcher<C> {
    /// Creates a new `Dispatcher` with the given HTTP client.
    pub const fn new(client: Arc<C>) -> Self {
        Self { client }
    }

    /// Sends the request and returns the response or a failure record.
    ///
    /// Network failures produce a response with status 0. A body that cannot
    /// be built is reported the same way, with time 0, and nothing is sent.
    pub async fn send(&self, request: &Request, environment: Option<&Environment>) -> Response {
        let transport = match prepare(request, environment) {
            Ok(transport) => transport,
            Err(error) => {
                warn!(request = %request.name, error = %error.message, "request could not be built");
                return Response::failed(error, 0);
            }
        };

        debug!(
            method = %transport.method,
            url = %transport.url,
            headers = transport.headers.len(),
            "dispatching request"
        );

        let started = Instant::now();
        let outcome = self.client.execute(&transport).await;
        let time = elapsed_ms(started);

        match outcome {
            Ok(received) => {
                info!(
                    method = %transport.method,
                    url = %transport.url,
                    status = received.status,
                    time_ms = time,
                    "response received"
                );
                Response::received(
                    received.status,
                    received.status_text,
                    received.headers,
                    &received.body,
                    time,
                )
            }
            Err(HttpClientError::Incomplete {
                status,
                status_text,
                headers,
                message,
            }) => {
                warn!(url = %transport.url, status, error = %message, "response body unreadable");
                let error = DispatchError::new(DispatchErrorKind::Unknown, message);
                Response::partial(status, status_text, headers, error, time)
            }
            Err(e) => {
                warn!(url = %transport.url, error = %e, time_ms = time, "request failed");
                Response::failed(DispatchError::new(e.to_error_kind(), e.to_string()), time)
            }
        }
    }
}

/// Builds the wire request for `request` under `environment`.
///
/// Only enabled rows with a non-empty key are sent, keys trimmed and values
/// resolved. Auth headers replace any same-named header. Bodies are attached
/// for POST, PUT and PATCH only.
///
/// # Errors
///
/// Returns an `InvalidBody` error if a JSON body does not parse after
/// resolution.
pub fn prepare(
    request: &Request,
    environment: Option<&Environment>,
) -> Result<TransportRequest, DispatchError> {
    let resolver = VariableResolver::new(environment);

    let mut headers: Vec<(String, String)> = request
        .headers
        .active()
        .map(|h| (h.key.trim().to_string(), resolver.resolve(&h.value)))
        .collect();

    apply_auth(&mut headers, &request.auth, &resolver);

    let query = request
        .params
        .active()
        .map(|p| (p.key.trim().to_string(), resolver.resolve(&p.value)))
        .collect();

    let body = if request.method.has_body() {
        build_body(&request.body, &resolver, &mut headers)?
    } else {
        TransportBody::None
    };

    Ok(TransportRequest {
        method: request.method,
        url: resolver.resolve(&request.url),
        query,
        headers,
        body,
        timeout: REQUEST_TIMEOUT,
    })
}

fn apply_auth(headers: &mut Vec<(String, String)>, auth: &Auth, resolver: &VariableResolver<'_>) {
    match auth {
        Auth::None => {}
        Auth::Bearer { token } => {
            let token = resolver.resolve(token);
            if !token.is_empty() {
                set_header(headers, "Authorization", format!("Bearer {token}"));
            }
        }
        Auth::Basic { username, password } => {
            let username = resolver.resolve(username);
            if !username.is_empty() {
                let password = resolver.resolve(password);
                let encoded = STANDARD.encode(format!("{username}:{password}"));
                set_header(headers, "Authorization", format!("Basic {encoded}"));
            }
        }
        Auth::ApiKey { key, value } => {
            let key = resolver.resolve(key);
            if !key.trim().is_empty() {
                set_header(headers, &key, resolver.resolve(value));
            }
        }
    }
}

fn build_body(
    body: &RequestBody,
    resolver: &VariableResolver<'_>,
    headers: &mut Vec<(String, String)>,
) -> Result<TransportBody, DispatchError> {
    match body {
        RequestBody::None => Ok(TransportBody::None),
        RequestBody::Json { content } => {
            let resolved = resolver.resolve(content);
            if resolved.trim().is_empty() {
                return Ok(TransportBody::None);
            }
            let value: serde_json::Value = serde_json::from_str(&resolved).map_err(|e| {
                DispatchError::new(DispatchErrorKind::InvalidBody, format!("Invalid JSON: {e}"))
            })?;
            let encoded = serde_json::to_string(&value).map_err(|e| {
                DispatchError::new(DispatchErrorKind::InvalidBody, format!("Invalid JSON: {e}"))
            })?;
            default_header(headers, CONTENT_TYPE, "application/json");
            Ok(TransportBody::Text(encoded))
        }
        RequestBody::Raw { content } => {
            default_header(headers, CONTENT_TYPE, "text/plain");
            Ok(TransportBody::Text(resolver.resolve(content)))
        }
        RequestBody::FormData { fields } => {
            let parts: Vec<MultipartField> = fields
                .iter()
                .filter(|f| f.is_active())
                .map(|f| {
                    let value = resolver.resolve(&f.value);
                    MultipartField {
                        name: f.key.clone(),
                        value: match f.kind {
                            FormFieldKind::Text => MultipartValue::Text(value),
                            FormFieldKind::File => MultipartValue::File(PathBuf::from(value)),
                        },
                    }
                })
                .collect();
            if parts.is_empty() {
                Ok(TransportBody::None)
            } else {
                Ok(TransportBody::Multipart(parts))
            }
        }
    }
}

fn set_header(headers: &mut Vec<(String, String)>, name: &str, value: String) {
    headers.retain(|(key, _)| !key.eq_ignore_ascii_case(name));
    headers.push((name.to_string(), value));
}

fn default_header(headers: &mut Vec<(String, String)>, name: &str, value: &str) {
    if !headers.iter().any(|(key, _)| key.eq_ignore_ascii_case(name)) {
        headers.push((name.to_string(), value.to_string()));
    }
}

fn elapsed_ms(started: Instant) -> u64 {
    u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;
    use std::future::Future;

    use parking_lot::Mutex;
    use pretty_assertions::assert_eq;
    use workbench_domain::{FormField, HttpMethod, KeyValue, Variable};

    use crate::ports::TransportResponse;

    /// Mock HTTP client that records what it was asked to send.
    struct MockHttpClient {
        response: Result<TransportResponse, HttpClientError>,
        sent: Mutex<Vec<TransportRequest>>,
    }

    impl MockHttpClient {
        fn success(status: u16, body: &str) -> Self {
            Self {
                response: Ok(TransportResponse {
                    status,
                    status_text: "OK".to_string(),
                    headers: BTreeMap::from([(
                        "content-type".to_string(),
                        "application/json".to_string(),
                    )]),
                    body: body.as_bytes().to_vec(),
                }),
                sent: Mutex::new(Vec::new()),
            }
        }

        fn error(err: HttpClientError) -> Self {
            Self {
                response: Err(err),
                sent: Mutex::new(Vec::new()),
            }
        }

        fn sent(&self) -> Vec<TransportRequest> {
            self.sent.lock().clone()
        }
    }

    impl HttpClient for MockHttpClient {
        fn execute(
            &self,
            request: &TransportRequest,
        ) -> impl Future<Output = Result<TransportResponse, HttpClientError>> + Send {
            self.sent.lock().push(request.clone());
            let result = self.response.clone();
            async move { result }
        }
    }

    fn env() -> Environment {
        Environment::new("Test")
            .with_variable(Variable::new("baseUrl", "http://localhost:3000"))
            .with_variable(Variable::new("token", "abc"))
            .with_variable(Variable::new("name", "Ada"))
    }

    #[tokio::test]
    async fn test_send_success() {
        let client = Arc::new(MockHttpClient::success(200, r#"{"ok":true}"#));
        let dispatcher = Dispatcher::new(Arc::clone(&client));
        let env = env();

        let request = Request::get("Users", "{{baseUrl}}/users");
        let response = dispatcher.send(&request, Some(&env)).await;

        assert_eq!(response.status, 200);
        assert_eq!(response.data, serde_json::json!({"ok": true}));
        assert!(response.error.is_none());
        assert_eq!(client.sent()[0].url, "http://localhost:3000/users");
        assert_eq!(client.sent()[0].timeout, REQUEST_TIMEOUT);
    }

    #[tokio::test]
    async fn test_network_error_becomes_response() {
        let client = Arc::new(MockHttpClient::error(HttpClientError::ConnectionRefused {
            host: "localhost".to_string(),
            port: 1,
        }));
        let dispatcher = Dispatcher::new(client);

        let response = dispatcher
            .send(&Request::get("Down", "http://localhost:1"), None)
            .await;

        assert_eq!(response.status, 0);
        assert_eq!(response.status_text, "Connection Refused");
        assert_eq!(
            response.error.map(|e| e.kind),
            Some(DispatchErrorKind::ConnectionRefused)
        );
    }

    #[tokio::test]
    async fn test_incomplete_keeps_status() {
        let client = Arc::new(MockHttpClient::error(HttpClientError::Incomplete {
            status: 200,
            status_text: "OK".to_string(),
            headers: BTreeMap::new(),
            message: "connection reset".to_string(),
        }));
        let dispatcher = Dispatcher::new(client);

        let response = dispatcher
            .send(&Request::get("Reset", "http://localhost"), None)
            .await;

        assert_eq!(response.status, 200);
        assert!(response.error.is_some());
        assert_eq!(response.data, serde_json::json!("connection reset"));
    }

    #[tokio::test]
    async fn test_invalid_json_body_is_not_sent() {
        let client = Arc::new(MockHttpClient::success(200, "{}"));
        let dispatcher = Dispatcher::new(Arc::clone(&client));

        let request = Request::get("Bad", "http://localhost")
            .with_method(HttpMethod::Post)
            .with_body(RequestBody::json("{not json"));
        let response = dispatcher.send(&request, None).await;

        assert_eq!(response.status, 0);
        assert_eq!(response.time, 0);
        assert_eq!(
            response.error.map(|e| e.kind),
            Some(DispatchErrorKind::InvalidBody)
        );
        assert!(client.sent().is_empty());
    }

    #[test]
    fn test_disabled_and_blank_headers_are_excluded() {
        let request = Request::get("Headers", "http://localhost")
            .with_headers(vec![
                KeyValue::new("X-On", "yes"),
                KeyValue::disabled("X-Off", "no"),
                KeyValue::new("  ", "blank"),
            ]);

        let transport = prepare(&request, None).expect("request should build");

        assert_eq!(
            transport.headers,
            vec![("X-On".to_string(), "yes".to_string())]
        );
    }

    #[test]
    fn test_row_keys_are_trimmed() {
        let request = Request::get("Padded", "http://localhost")
            .with_headers(vec![KeyValue::new(" X-Foo ", "bar")])
            .with_params(vec![KeyValue::new("\tq ", "rust")]);

        let transport = prepare(&request, None).expect("request should build");

        assert_eq!(transport.header("X-Foo"), Some("bar"));
        assert_eq!(transport.headers[0].0, "X-Foo");
        assert_eq!(transport.query, vec![("q".to_string(), "rust".to_string())]);
    }

    #[test]
    fn test_params_become_query() {
        let env = env();
        let request = Request::get("Search", "{{baseUrl}}/search")
            .with_params(vec![
                KeyValue::new("q", "{{name}}"),
                KeyValue::disabled("page", "2"),
            ]);

        let transport = prepare(&request, Some(&env)).expect("request should build");

        assert_eq!(transport.query, vec![("q".to_string(), "Ada".to_string())]);
    }

    #[test]
    fn test_bearer_overrides_header() {
        let env = env();
        let request = Request::get("Auth", "http://localhost")
            .with_header("authorization", "Bearer stale")
            .with_auth(Auth::bearer("{{token}}"));

        let transport = prepare(&request, Some(&env)).expect("request should build");

        assert_eq!(
            transport.headers,
            vec![("Authorization".to_string(), "Bearer abc".to_string())]
        );
    }

    #[test]
    fn test_empty_bearer_adds_nothing() {
        let request = Request::get("Auth", "http://localhost").with_auth(Auth::bearer(""));
        let transport = prepare(&request, None).expect("request should build");
        assert_eq!(transport.header("Authorization"), None);
    }

    #[test]
    fn test_basic_auth_is_base64() {
        let request =
            Request::get("Auth", "http://localhost").with_auth(Auth::basic("user", "pass"));
        let transport = prepare(&request, None).expect("request should build");
        assert_eq!(transport.header("authorization"), Some("Basic dXNlcjpwYXNz"));
    }

    #[test]
    fn test_api_key_header() {
        let request = Request::get("Auth", "http://localhost")
            .with_auth(Auth::api_key("X-Api-Key", "secret"));
        let transport = prepare(&request, None).expect("request should build");
        assert_eq!(transport.header("x-api-key"), Some("secret"));
    }

    #[test]
    fn test_body_ignored_for_get() {
        let request = Request::get("Get", "http://localhost").with_body(RequestBody::json("{bad"));
        let transport = prepare(&request, None).expect("request should build");
        assert!(transport.body.is_none());
    }

    #[test]
    fn test_json_body_is_resolved_and_typed() {
        let env = env();
        let request = Request::get("Create", "http://localhost")
            .with_method(HttpMethod::Post)
            .with_body(RequestBody::json(r#"{ "name": "{{name}}" }"#));

        let transport = prepare(&request, Some(&env)).expect("request should build");

        assert_eq!(
            transport.body,
            TransportBody::Text(r#"{"name":"Ada"}"#.to_string())
        );
        assert_eq!(transport.header("content-type"), Some("application/json"));
    }

    #[test]
    fn test_blank_json_body_sends_nothing() {
        let request = Request::get("Empty", "http://localhost")
            .with_method(HttpMethod::Put)
            .with_body(RequestBody::json("   "));
        let transport = prepare(&request, None).expect("request should build");
        assert!(transport.body.is_none());
    }

    #[test]
    fn test_raw_body_keeps_explicit_content_type() {
        let request = Request::get("Raw", "http://localhost")
            .with_method(HttpMethod::Patch)
            .with_header("Content-Type", "application/xml")
            .with_body(RequestBody::raw("<a/>"));

        let transport = prepare(&request, None).expect("request should build");

        assert_eq!(transport.body, TransportBody::Text("<a/>".to_string()));
        assert_eq!(transport.header("content-type"), Some("application/xml"));
    }

    #[test]
    fn test_form_data_skips_incomplete_rows() {
        let env = env();
        let request = Request::get("Upload", "http://localhost")
            .with_method(HttpMethod::Post)
            .with_body(RequestBody::form_data(vec![
                FormField::text("name", "{{name}}"),
                FormField::file("avatar", "/tmp/a.png"),
                FormField::text("empty", ""),
                FormField::text("off", "x").disabled(),
            ]));

        let transport = prepare(&request, Some(&env)).expect("request should build");

        assert_eq!(
            transport.body,
            TransportBody::Multipart(vec![
                MultipartField {
                    name: "name".to_string(),
                    value: MultipartValue::Text("Ada".to_string()),
                },
                MultipartField {
                    name: "avatar".to_string(),
                    value: MultipartValue::File(PathBuf::from("/tmp/a.png")),
                },
            ])
        );
    }
}
