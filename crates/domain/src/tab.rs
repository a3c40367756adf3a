//! Tab domain model: one open request-editing session.

use serde::{Deserialize, Serialize};

use crate::id::generate_id;
use crate::request::{Request, RequestPatch};
use crate::response::Response;
use crate::state::TabState;

/// One open editing session pairing a request with its last response.
///
/// The tab owns its request outright. Saving copies it elsewhere; nothing
/// else holds a reference to it.
///
/// `is_saved` is derived: every request edit bumps a revision counter, and the
/// tab is saved when the last saved revision equals the current one.
///
/// Stored as `{id, request, response, isLoading, isSaved}`. The revision
/// counters restart from zero on load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "TabDocument", from = "TabDocument")]
pub struct Tab {
    id: String,
    request: Request,
    response: Option<Response>,
    state: TabState,
    revision: u64,
    saved_revision: Option<u64>,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TabDocument {
    id: String,
    request: Request,
    #[serde(default)]
    response: Option<Response>,
    #[serde(default)]
    is_loading: bool,
    #[serde(default)]
    is_saved: bool,
}

impl From<Tab> for TabDocument {
    fn from(tab: Tab) -> Self {
        let is_loading = tab.is_loading();
        let is_saved = tab.is_saved();
        Self {
            id: tab.id,
            request: tab.request,
            response: tab.response,
            is_loading,
            is_saved,
        }
    }
}

impl From<TabDocument> for Tab {
    fn from(doc: TabDocument) -> Self {
        Self {
            id: doc.id,
            request: doc.request,
            response: doc.response,
            state: if doc.is_loading {
                TabState::Sending { started_at: None }
            } else {
                TabState::Idle
            },
            revision: 0,
            saved_revision: doc.is_saved.then_some(0),
        }
    }
}

impl Tab {
    /// Opens a tab on a request that has never been saved.
    #[must_use]
    pub fn new(request: Request) -> Self {
        Self {
            id: generate_id(),
            request,
            response: None,
            state: TabState::Idle,
            revision: 0,
            saved_revision: None,
        }
    }

    /// Opens a tab on a request that matches a saved copy.
    #[must_use]
    pub fn opened(request: Request) -> Self {
        let mut tab = Self::new(request);
        tab.saved_revision = Some(tab.revision);
        tab
    }

    /// Returns the tab id. Independent of the request id.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the request being edited.
    #[must_use]
    pub const fn request(&self) -> &Request {
        &self.request
    }

    /// Returns the last response, if any.
    #[must_use]
    pub const fn response(&self) -> Option<&Response> {
        self.response.as_ref()
    }

    /// Returns the dispatch state.
    #[must_use]
    pub const fn state(&self) -> TabState {
        self.state
    }

    /// Returns true strictly between dispatch start and completion.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.state.is_sending()
    }

    /// Returns true if the request is unchanged since it was last saved.
    #[must_use]
    pub fn is_saved(&self) -> bool {
        self.saved_revision == Some(self.revision)
    }

    /// Merges `patch` into the request. An empty patch changes nothing and
    /// leaves the saved flag alone; any other patch clears it.
    pub fn edit(&mut self, patch: RequestPatch) {
        if patch.is_empty() {
            return;
        }
        let current = std::mem::take(&mut self.request);
        self.request = patch.apply(current);
        self.revision += 1;
    }

    /// Replaces the request wholesale, clearing the saved flag.
    pub fn replace_request(&mut self, request: Request) {
        self.request = request;
        self.revision += 1;
    }

    /// Records that the current request revision has been saved.
    pub const fn mark_saved(&mut self) {
        self.saved_revision = Some(self.revision);
    }

    /// Sets or clears the displayed response without touching the state.
    pub fn set_response(&mut self, response: Option<Response>) {
        self.response = response;
    }

    /// Moves the tab to Sending. Returns false if it already was.
    pub fn begin_send(&mut self) -> bool {
        if self.state.is_sending() {
            return false;
        }
        self.state = TabState::sending();
        true
    }

    /// Stores the dispatch outcome and returns the tab to Idle.
    pub fn finish_send(&mut self, response: Response) {
        self.response = Some(response);
        self.state = TabState::Idle;
    }

    /// Returns a tab restored from storage to Idle. A dispatch cannot survive
    /// a restart.
    #[must_use]
    pub fn into_restored(mut self) -> Self {
        self.state = TabState::Idle;
        self
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn test_new_tab_is_idle_and_unsaved() {
        let tab = Tab::new(Request::new());
        assert!(!tab.is_loading());
        assert!(!tab.is_saved());
        assert!(tab.response().is_none());
    }

    #[test]
    fn test_tab_id_differs_from_request_id() {
        let request = Request::new();
        let tab = Tab::opened(request.clone());
        assert_ne!(tab.id(), request.id);
        assert!(tab.is_saved());
    }

    #[test]
    fn test_edit_clears_saved_flag() {
        let mut tab = Tab::opened(Request::new());
        tab.edit(RequestPatch::new().url("https://example.com"));
        assert!(!tab.is_saved());
        assert_eq!(tab.request().url, "https://example.com");

        tab.mark_saved();
        assert!(tab.is_saved());
    }

    #[test]
    fn test_empty_edit_keeps_saved_flag() {
        let mut tab = Tab::opened(Request::new());
        tab.edit(RequestPatch::new());
        assert!(tab.is_saved());
    }

    #[test]
    fn test_send_cycle() {
        let mut tab = Tab::new(Request::new());
        assert!(tab.begin_send());
        assert!(tab.is_loading());
        assert!(!tab.begin_send());

        tab.finish_send(Response::received(200, "OK", BTreeMap::new(), b"{}", 3));
        assert!(!tab.is_loading());
        assert_eq!(tab.response().map(|r| r.status), Some(200));
    }

    #[test]
    fn test_restored_tab_is_idle() {
        let mut tab = Tab::new(Request::new());
        tab.begin_send();
        let json = serde_json::to_string(&tab).unwrap();
        let restored: Tab = serde_json::from_str::<Tab>(&json).unwrap().into_restored();
        assert!(!restored.is_loading());
        assert_eq!(restored.id(), tab.id());
    }

    #[test]
    fn test_stored_shape() {
        let mut tab = Tab::opened(Request::get("Ping", "http://localhost/ping"));
        tab.begin_send();

        let value = serde_json::to_value(&tab).unwrap();
        let mut keys: Vec<&str> = value.as_object().unwrap().keys().map(String::as_str).collect();
        keys.sort_unstable();

        assert_eq!(keys, ["id", "isLoading", "isSaved", "request", "response"]);
        assert_eq!(value["isLoading"], true);
        assert_eq!(value["isSaved"], true);
        assert!(value["response"].is_null());
    }

    #[test]
    fn test_saved_flag_survives_reload() {
        let saved = Tab::opened(Request::new());
        let mut edited = Tab::opened(Request::new());
        edited.edit(RequestPatch::new().name("Renamed"));

        let reload = |tab: &Tab| -> Tab {
            serde_json::from_value(serde_json::to_value(tab).unwrap()).unwrap()
        };

        let saved = reload(&saved);
        assert!(saved.is_saved());
        let mut edited = reload(&edited);
        assert!(!edited.is_saved());
        assert_eq!(edited.request().name, "Renamed");

        edited.mark_saved();
        edited.edit(RequestPatch::new().url("http://localhost/next"));
        assert!(!edited.is_saved());
    }
}
