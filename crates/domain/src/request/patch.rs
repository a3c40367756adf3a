//! Partial request edits.

use super::{HttpMethod, KeyValueList, Request, RequestBody};
use crate::auth::Auth;

/// A set of field changes to merge into a [`Request`].
///
/// Unset fields are left untouched. The request id is never patched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestPatch {
    /// New name.
    pub name: Option<String>,
    /// New method.
    pub method: Option<HttpMethod>,
    /// New URL.
    pub url: Option<String>,
    /// New header rows.
    pub headers: Option<KeyValueList>,
    /// New parameter rows.
    pub params: Option<KeyValueList>,
    /// New body.
    pub body: Option<RequestBody>,
    /// New authentication.
    pub auth: Option<Auth>,
    /// New test script.
    pub tests: Option<String>,
    /// New pre-request script.
    pub pre_request_script: Option<String>,
}

impl RequestPatch {
    /// Creates an empty patch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the name.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the method.
    #[must_use]
    pub const fn method(mut self, method: HttpMethod) -> Self {
        self.method = Some(method);
        self
    }

    /// Sets the URL.
    #[must_use]
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Sets the header rows.
    #[must_use]
    pub fn headers(mut self, headers: impl Into<KeyValueList>) -> Self {
        self.headers = Some(headers.into());
        self
    }

    /// Sets the parameter rows.
    #[must_use]
    pub fn params(mut self, params: impl Into<KeyValueList>) -> Self {
        self.params = Some(params.into());
        self
    }

    /// Sets the body.
    #[must_use]
    pub fn body(mut self, body: RequestBody) -> Self {
        self.body = Some(body);
        self
    }

    /// Sets the authentication.
    #[must_use]
    pub fn auth(mut self, auth: Auth) -> Self {
        self.auth = Some(auth);
        self
    }

    /// Sets the test script.
    #[must_use]
    pub fn tests(mut self, tests: impl Into<String>) -> Self {
        self.tests = Some(tests.into());
        self
    }

    /// Sets the pre-request script.
    #[must_use]
    pub fn pre_request_script(mut self, script: impl Into<String>) -> Self {
        self.pre_request_script = Some(script.into());
        self
    }

    /// Returns true if the patch changes nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.method.is_none()
            && self.url.is_none()
            && self.headers.is_none()
            && self.params.is_none()
            && self.body.is_none()
            && self.auth.is_none()
            && self.tests.is_none()
            && self.pre_request_script.is_none()
    }

    /// Produces a new request with this patch merged into `request`.
    #[must_use]
    pub fn apply(self, request: Request) -> Request {
        let mut next = request;
        if let Some(name) = self.name {
            next.name = name;
        }
        if let Some(method) = self.method {
            next.method = method;
        }
        if let Some(url) = self.url {
            next.url = url;
        }
        if let Some(headers) = self.headers {
            next.headers = headers;
        }
        if let Some(params) = self.params {
            next.params = params;
        }
        if let Some(body) = self.body {
            next.body = body;
        }
        if let Some(auth) = self.auth {
            next.auth = auth;
        }
        if let Some(tests) = self.tests {
            next.tests = tests;
        }
        if let Some(script) = self.pre_request_script {
            next.pre_request_script = script;
        }
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::KeyValue;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_patch_is_identity() {
        let req = Request::get("Users", "https://api.example.com/users");
        let patch = RequestPatch::new();
        assert!(patch.is_empty());
        assert_eq!(patch.apply(req.clone()), req);
    }

    #[test]
    fn test_patch_merges_only_set_fields() {
        let req = Request::get("Users", "https://api.example.com/users");
        let patched = RequestPatch::new()
            .name("Create user")
            .method(HttpMethod::Post)
            .headers(vec![KeyValue::new("Accept", "application/json")])
            .apply(req.clone());

        assert_eq!(patched.id, req.id);
        assert_eq!(patched.name, "Create user");
        assert_eq!(patched.method, HttpMethod::Post);
        assert_eq!(patched.url, req.url);
        assert_eq!(patched.headers.len(), 1);
        assert_eq!(patched.params, req.params);
    }
}
