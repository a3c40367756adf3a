//! Request type

use serde::{Deserialize, Serialize};

use super::{HttpMethod, KeyValue, KeyValueList, RequestBody};
use crate::auth::Auth;
use crate::id::generate_id;

/// Name given to requests the user has not named yet.
pub const DEFAULT_REQUEST_NAME: &str = "Untitled Request";

/// One HTTP call as authored in a tab.
///
/// Treated as immutable by convention: editing goes through the `with_*`
/// setters or a [`super::RequestPatch`], each of which yields a new value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Request {
    /// Unique identifier, stable for this value's lifetime.
    pub id: String,
    /// User label.
    pub name: String,
    /// HTTP method.
    #[serde(default)]
    pub method: HttpMethod,
    /// Target URL. May contain placeholders; only validated at dispatch.
    #[serde(default)]
    pub url: String,
    /// Header rows.
    #[serde(default)]
    pub headers: KeyValueList,
    /// Query parameter rows.
    #[serde(default)]
    pub params: KeyValueList,
    /// Request body.
    #[serde(default)]
    pub body: RequestBody,
    /// Authentication layered over the headers.
    #[serde(default)]
    pub auth: Auth,
    /// Test script text. Stored, never executed.
    #[serde(default)]
    pub tests: String,
    /// Pre-request script text. Stored, never executed.
    #[serde(default)]
    pub pre_request_script: String,
}

impl Request {
    /// Creates the default request: GET, empty URL, one blank header row, one
    /// blank parameter row, no body and no auth.
    #[must_use]
    pub fn new() -> Self {
        Self {
            id: generate_id(),
            name: DEFAULT_REQUEST_NAME.to_string(),
            method: HttpMethod::Get,
            url: String::new(),
            headers: KeyValueList::with_blank_row(),
            params: KeyValueList::with_blank_row(),
            body: RequestBody::None,
            auth: Auth::None,
            tests: String::new(),
            pre_request_script: String::new(),
        }
    }

    /// Creates a GET request with the given name and URL.
    #[must_use]
    pub fn get(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self::new().with_name(name).with_url(url)
    }

    /// Returns a copy of this request under a newly generated id.
    #[must_use]
    pub fn with_fresh_id(mut self) -> Self {
        self.id = generate_id();
        self
    }

    /// Sets the name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the method.
    #[must_use]
    pub const fn with_method(mut self, method: HttpMethod) -> Self {
        self.method = method;
        self
    }

    /// Sets the URL.
    #[must_use]
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    /// Replaces all header rows.
    #[must_use]
    pub fn with_headers(mut self, headers: impl Into<KeyValueList>) -> Self {
        self.headers = headers.into();
        self
    }

    /// Appends an enabled header row.
    #[must_use]
    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.add(KeyValue::new(key, value));
        self
    }

    /// Replaces all parameter rows.
    #[must_use]
    pub fn with_params(mut self, params: impl Into<KeyValueList>) -> Self {
        self.params = params.into();
        self
    }

    /// Appends an enabled parameter row.
    #[must_use]
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.add(KeyValue::new(key, value));
        self
    }

    /// Sets the body.
    #[must_use]
    pub fn with_body(mut self, body: RequestBody) -> Self {
        self.body = body;
        self
    }

    /// Sets the authentication.
    #[must_use]
    pub fn with_auth(mut self, auth: Auth) -> Self {
        self.auth = auth;
        self
    }

    /// Sets the test script text.
    #[must_use]
    pub fn with_tests(mut self, tests: impl Into<String>) -> Self {
        self.tests = tests.into();
        self
    }

    /// Sets the pre-request script text.
    #[must_use]
    pub fn with_pre_request_script(mut self, script: impl Into<String>) -> Self {
        self.pre_request_script = script.into();
        self
    }

    /// Returns true if the URL contains variable placeholders.
    #[must_use]
    pub fn has_variables(&self) -> bool {
        self.url
            .find("{{")
            .is_some_and(|start| self.url[start..].contains("}}"))
    }
}

impl Default for Request {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_request_shape() {
        let req = Request::new();
        assert_eq!(req.name, DEFAULT_REQUEST_NAME);
        assert_eq!(req.method, HttpMethod::Get);
        assert!(req.url.is_empty());
        assert_eq!(req.headers.all(), &[KeyValue::blank()]);
        assert_eq!(req.params.all(), &[KeyValue::blank()]);
        assert!(req.body.is_none());
        assert_eq!(req.auth, Auth::None);
    }

    #[test]
    fn test_setters_keep_id() {
        let req = Request::new();
        let id = req.id.clone();
        let edited = req
            .with_method(HttpMethod::Post)
            .with_url("https://api.example.com/users")
            .with_body(RequestBody::json("{}"));
        assert_eq!(edited.id, id);
        assert_eq!(edited.method, HttpMethod::Post);
    }

    #[test]
    fn test_with_fresh_id_changes_only_id() {
        let req = Request::get("Users", "https://api.example.com/users");
        let copy = req.clone().with_fresh_id();
        assert_ne!(copy.id, req.id);
        assert_eq!(copy.url, req.url);
        assert_eq!(copy.name, req.name);
    }

    #[test]
    fn test_has_variables() {
        let req = Request::get("T", "https://{{host}}/api/{{version}}/users");
        assert!(req.has_variables());

        let req = Request::get("T", "https://api.example.com/users");
        assert!(!req.has_variables());

        let req = Request::get("T", "https://api.example.com/}}{{");
        assert!(!req.has_variables());
    }

    #[test]
    fn test_serialized_field_names_are_camel_case() {
        let req = Request::new().with_pre_request_script("noop");
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["preRequestScript"], "noop");
        assert_eq!(json["body"]["type"], "none");
        assert_eq!(json["auth"]["type"], "none");
    }

    #[test]
    fn test_missing_optional_fields_use_defaults() {
        let req: Request =
            serde_json::from_str(r#"{"id":"r1","name":"Bare","url":"http://x"}"#).unwrap();
        assert_eq!(req.method, HttpMethod::Get);
        assert!(req.headers.is_empty());
        assert!(req.tests.is_empty());
    }
}
