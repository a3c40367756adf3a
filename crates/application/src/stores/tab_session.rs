//! Tab session manager: the ordered list of open tabs and the active one.

use serde::{Deserialize, Serialize};
use tracing::debug;
use workbench_domain::{Request, RequestPatch, Response, Tab};

use crate::error::{SendError, SendResult};

/// Persisted shape of the tab session.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TabsSnapshot {
    /// Open tabs in display order.
    #[serde(default)]
    pub tabs: Vec<Tab>,
    /// Id of the active tab.
    #[serde(default)]
    pub active_tab_id: Option<String>,
}

/// A send that has been started on a tab.
///
/// Holds the request as it was when the send began, so later edits to the
/// tab do not change what goes on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendTicket {
    tab_id: String,
    request: Request,
}

impl SendTicket {
    /// Returns the id of the tab that started the send.
    #[must_use]
    pub fn tab_id(&self) -> &str {
        &self.tab_id
    }

    /// Returns the request snapshot being sent.
    #[must_use]
    pub const fn request(&self) -> &Request {
        &self.request
    }

    /// Consumes the ticket and returns the request snapshot.
    #[must_use]
    pub fn into_request(self) -> Request {
        self.request
    }
}

/// Ordered open tabs and the active tab id.
///
/// The active id always names an open tab, or is `None` when there are none
/// open.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TabSessionManager {
    tabs: Vec<Tab>,
    active_id: Option<String>,
}

impl TabSessionManager {
    /// Creates an empty session.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            tabs: Vec::new(),
            active_id: None,
        }
    }

    /// Restores a session from its persisted shape.
    ///
    /// Tabs come back idle. A dangling active id falls back to the first tab.
    #[must_use]
    pub fn from_snapshot(snapshot: TabsSnapshot) -> Self {
        let tabs: Vec<Tab> = snapshot.tabs.into_iter().map(Tab::into_restored).collect();
        let active_id = snapshot
            .active_tab_id
            .filter(|id| tabs.iter().any(|t| t.id() == id))
            .or_else(|| tabs.first().map(|t| t.id().to_string()));
        Self { tabs, active_id }
    }

    /// Returns the persisted shape of this session.
    #[must_use]
    pub fn snapshot(&self) -> TabsSnapshot {
        TabsSnapshot {
            tabs: self.tabs.clone(),
            active_tab_id: self.active_id.clone(),
        }
    }

    /// Opens a tab and makes it active. Returns the new tab id.
    ///
    /// With no request a fresh unsaved default request is used. A given
    /// request is copied in and starts out saved.
    pub fn open(&mut self, request: Option<Request>) -> String {
        let tab = request.map_or_else(|| Tab::new(Request::new()), Tab::opened);
        let id = tab.id().to_string();
        debug!(tab_id = %id, "opened tab");
        self.tabs.push(tab);
        self.active_id = Some(id.clone());
        id
    }

    /// Closes a tab. Returns false if no such tab is open.
    ///
    /// Closing the active tab activates the first remaining tab.
    pub fn close(&mut self, tab_id: &str) -> bool {
        let before = self.tabs.len();
        self.tabs.retain(|t| t.id() != tab_id);
        if self.tabs.len() == before {
            return false;
        }
        if self.active_id.as_deref() == Some(tab_id) {
            self.active_id = self.tabs.first().map(|t| t.id().to_string());
        }
        debug!(tab_id, "closed tab");
        true
    }

    /// Merges a partial edit into a tab's request. Marks the tab unsaved.
    pub fn update(&mut self, tab_id: &str, patch: RequestPatch) -> bool {
        self.with_tab(tab_id, |tab| tab.edit(patch))
    }

    /// Replaces a tab's request wholesale. Marks the tab unsaved.
    pub fn replace_request(&mut self, tab_id: &str, request: Request) -> bool {
        self.with_tab(tab_id, |tab| tab.replace_request(request))
    }

    /// Sets or clears a tab's last response.
    pub fn set_response(&mut self, tab_id: &str, response: Option<Response>) -> bool {
        self.with_tab(tab_id, |tab| tab.set_response(response))
    }

    /// Marks a tab's current request as saved.
    pub fn mark_saved(&mut self, tab_id: &str) -> bool {
        self.with_tab(tab_id, Tab::mark_saved)
    }

    /// Makes a tab active. Unknown ids are ignored and return false.
    pub fn activate(&mut self, tab_id: &str) -> bool {
        if self.get(tab_id).is_none() {
            return false;
        }
        self.active_id = Some(tab_id.to_string());
        true
    }

    /// Opens a copy of a tab's request in a new unsaved tab.
    ///
    /// The copy gets a fresh request id. Returns the new tab id.
    pub fn duplicate(&mut self, tab_id: &str) -> Option<String> {
        let request = self.get(tab_id)?.request().clone().with_fresh_id();
        let tab = Tab::new(request);
        let id = tab.id().to_string();
        self.tabs.push(tab);
        self.active_id = Some(id.clone());
        Some(id)
    }

    /// Moves a tab into the sending state and snapshots its request.
    ///
    /// # Errors
    ///
    /// Returns `TabNotFound` for an unknown tab and `AlreadySending` if the
    /// tab has a request in flight.
    pub fn begin_send(&mut self, tab_id: &str) -> SendResult<SendTicket> {
        let tab = self
            .tabs
            .iter_mut()
            .find(|t| t.id() == tab_id)
            .ok_or_else(|| SendError::TabNotFound(tab_id.to_string()))?;
        if !tab.begin_send() {
            return Err(SendError::AlreadySending(tab_id.to_string()));
        }
        Ok(SendTicket {
            tab_id: tab_id.to_string(),
            request: tab.request().clone(),
        })
    }

    /// Stores the response for a finished send and returns the tab to idle.
    ///
    /// Returns false if the tab was closed in the meantime; the response is
    /// then dropped.
    pub fn complete_send(&mut self, ticket: &SendTicket, response: Response) -> bool {
        self.with_tab(ticket.tab_id(), |tab| tab.finish_send(response))
    }

    /// Returns a tab by id.
    #[must_use]
    pub fn get(&self, tab_id: &str) -> Option<&Tab> {
        self.tabs.iter().find(|t| t.id() == tab_id)
    }

    /// Returns all open tabs in order.
    #[must_use]
    pub fn tabs(&self) -> &[Tab] {
        &self.tabs
    }

    /// Returns the active tab.
    #[must_use]
    pub fn active(&self) -> Option<&Tab> {
        self.active_id.as_deref().and_then(|id| self.get(id))
    }

    /// Returns the active tab id.
    #[must_use]
    pub fn active_id(&self) -> Option<&str> {
        self.active_id.as_deref()
    }

    /// Returns the number of open tabs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    /// Returns true if no tabs are open.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }

    fn with_tab(&mut self, tab_id: &str, f: impl FnOnce(&mut Tab)) -> bool {
        match self.tabs.iter_mut().find(|t| t.id() == tab_id) {
            Some(tab) => {
                f(tab);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use workbench_domain::{DispatchError, DispatchErrorKind, HttpMethod};

    fn failed() -> Response {
        Response::failed(DispatchError::new(DispatchErrorKind::Timeout, "slow"), 30_000)
    }

    #[test]
    fn test_open_activates_new_tab() {
        let mut session = TabSessionManager::new();
        let first = session.open(None);
        let second = session.open(Some(Request::get("Saved", "http://localhost")));

        assert_eq!(session.len(), 2);
        assert_eq!(session.active_id(), Some(second.as_str()));
        assert!(!session.get(&first).is_some_and(Tab::is_saved));
        assert!(session.get(&second).is_some_and(Tab::is_saved));
    }

    #[test]
    fn test_open_same_request_twice_gives_distinct_tabs() {
        let mut session = TabSessionManager::new();
        let request = Request::get("Shared", "http://localhost");
        let a = session.open(Some(request.clone()));
        let b = session.open(Some(request));

        assert_ne!(a, b);
        session.update(&a, RequestPatch::new().url("http://changed"));
        assert_eq!(
            session.get(&b).map(|t| t.request().url.as_str()),
            Some("http://localhost")
        );
    }

    #[test]
    fn test_close_active_reactivates_first_remaining() {
        let mut session = TabSessionManager::new();
        let a = session.open(None);
        let b = session.open(None);
        let c = session.open(None);

        assert!(session.close(&c));
        assert_eq!(session.active_id(), Some(a.as_str()));

        session.activate(&b);
        assert!(session.close(&a));
        assert_eq!(session.active_id(), Some(b.as_str()));

        assert!(session.close(&b));
        assert_eq!(session.active_id(), None);
        assert!(session.is_empty());
    }

    #[test]
    fn test_close_inactive_keeps_active() {
        let mut session = TabSessionManager::new();
        let a = session.open(None);
        let b = session.open(None);

        assert!(session.close(&a));
        assert_eq!(session.active_id(), Some(b.as_str()));
        assert!(!session.close("missing"));
    }

    #[test]
    fn test_activate_unknown_is_noop() {
        let mut session = TabSessionManager::new();
        let a = session.open(None);
        assert!(!session.activate("missing"));
        assert_eq!(session.active_id(), Some(a.as_str()));
    }

    #[test]
    fn test_update_marks_unsaved() {
        let mut session = TabSessionManager::new();
        let id = session.open(Some(Request::get("Saved", "http://localhost")));

        assert!(session.update(&id, RequestPatch::new().method(HttpMethod::Delete)));

        let tab = session.get(&id).expect("tab should exist");
        assert_eq!(tab.request().method, HttpMethod::Delete);
        assert!(!tab.is_saved());
        assert!(!session.update("missing", RequestPatch::new().name("x")));
    }

    #[test]
    fn test_duplicate_gets_fresh_ids() {
        let mut session = TabSessionManager::new();
        let original = session.open(Some(Request::get("Orig", "http://localhost")));
        let copy = session.duplicate(&original).expect("tab should duplicate");

        let original_tab = session.get(&original).expect("original");
        let copy_tab = session.get(&copy).expect("copy");
        assert_ne!(original_tab.id(), copy_tab.id());
        assert_ne!(original_tab.request().id, copy_tab.request().id);
        assert_eq!(copy_tab.request().url, "http://localhost");
        assert!(!copy_tab.is_saved());
        assert_eq!(session.active_id(), Some(copy.as_str()));
    }

    #[test]
    fn test_send_lifecycle() {
        let mut session = TabSessionManager::new();
        let id = session.open(None);

        let ticket = session.begin_send(&id).expect("send should start");
        assert!(session.get(&id).is_some_and(Tab::is_loading));
        assert_eq!(
            session.begin_send(&id),
            Err(SendError::AlreadySending(id.clone()))
        );

        assert!(session.complete_send(&ticket, failed()));
        let tab = session.get(&id).expect("tab should exist");
        assert!(!tab.is_loading());
        assert_eq!(tab.response().map(|r| r.status), Some(0));
    }

    #[test]
    fn test_complete_send_on_closed_tab_is_dropped() {
        let mut session = TabSessionManager::new();
        let id = session.open(None);
        let ticket = session.begin_send(&id).expect("send should start");

        session.close(&id);

        assert!(!session.complete_send(&ticket, failed()));
        assert!(session.is_empty());
    }

    #[test]
    fn test_begin_send_unknown_tab() {
        let mut session = TabSessionManager::new();
        assert_eq!(
            session.begin_send("missing"),
            Err(SendError::TabNotFound("missing".to_string()))
        );
    }

    #[test]
    fn test_snapshot_restores_idle() {
        let mut session = TabSessionManager::new();
        let id = session.open(None);
        session.begin_send(&id).expect("send should start");

        let restored = TabSessionManager::from_snapshot(session.snapshot());

        assert_eq!(restored.active_id(), Some(id.as_str()));
        assert!(!restored.get(&id).is_some_and(Tab::is_loading));
    }

    #[test]
    fn test_snapshot_with_dangling_active_id() {
        let mut session = TabSessionManager::new();
        let id = session.open(None);
        let mut snapshot = session.snapshot();
        snapshot.active_tab_id = Some("gone".to_string());

        let restored = TabSessionManager::from_snapshot(snapshot);
        assert_eq!(restored.active_id(), Some(id.as_str()));
    }
}
