/// Gallery state controller
///
/// Keeps the locally held image list consistent with the server for the
/// active visibility scope. Every load is tagged with a ticket; a slow
/// response for a scope the user has already left, or one that has been
/// superseded by a newer request, is discarded instead of overwriting
/// the list.

use crate::api::error::ApiError;
use crate::api::models::ImageRecord;

use super::data::Scope;

/// Load lifecycle for the active scope
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadStatus {
    #[default]
    Idle,
    Loading,
    Loaded,
    LoadFailed,
}

/// Tag carried by one in-flight list request.
/// A response is applied only when its ticket still matches the newest
/// request for the current scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    seq: u64,
    scope: Scope,
}

impl LoadTicket {
    /// Scope this request was issued for
    pub fn scope(&self) -> Scope {
        self.scope
    }
}

/// In-memory image list for the active visibility scope
#[derive(Debug, Default)]
pub struct Gallery {
    scope: Scope,
    items: Vec<ImageRecord>,
    status: LoadStatus,
    reveal_spoilers: bool,
    selected: Option<ImageRecord>,
    seq: u64,
}

impl Gallery {
    pub fn new() -> Self {
        Gallery::default()
    }

    pub fn scope(&self) -> Scope {
        self.scope
    }

    pub fn items(&self) -> &[ImageRecord] {
        &self.items
    }

    pub fn status(&self) -> LoadStatus {
        self.status
    }

    pub fn selected(&self) -> Option<&ImageRecord> {
        self.selected.as_ref()
    }

    pub fn reveal_spoilers(&self) -> bool {
        self.reveal_spoilers
    }

    /// Switch the visibility filter and start a fresh load.
    ///
    /// The displayed list is dropped right away so the grid never shows
    /// the previous scope's images while the new request is in flight.
    pub fn set_scope(&mut self, scope: Scope) -> LoadTicket {
        if scope != self.scope {
            self.scope = scope;
            self.items.clear();
            self.selected = None;
        }

        self.begin_load()
    }

    /// Start a load for the current scope.
    /// The returned ticket travels with the request and comes back with
    /// the response.
    pub fn begin_load(&mut self) -> LoadTicket {
        self.seq += 1;
        self.status = LoadStatus::Loading;

        LoadTicket {
            seq: self.seq,
            scope: self.scope,
        }
    }

    /// Apply a finished list request.
    ///
    /// Stale responses (an older request, or a scope the user has left)
    /// are discarded. On success the list is replaced wholesale; on
    /// failure the previous list stays and the error is only logged.
    /// Returns whether the response was accepted.
    pub fn apply_load(
        &mut self,
        ticket: LoadTicket,
        result: Result<Vec<ImageRecord>, ApiError>,
    ) -> bool {
        if ticket.seq != self.seq || ticket.scope != self.scope {
            return false;
        }

        match result {
            Ok(items) => {
                self.items = items;
                self.status = LoadStatus::Loaded;

                // A selection that no longer exists on the server is closed
                if let Some(selected) = &self.selected {
                    if !self.items.iter().any(|image| image.id == selected.id) {
                        self.selected = None;
                    }
                }
            }
            Err(err) => {
                eprintln!("⚠️  Failed to load images: {err}");
                self.status = LoadStatus::LoadFailed;
            }
        }

        true
    }

    /// Apply a finished delete request.
    ///
    /// Success removes the matching entry locally without a refetch;
    /// removing an id that is not in the list changes nothing. Failure
    /// leaves the list untouched and yields a user-visible message.
    pub fn apply_delete(&mut self, id: &str, result: Result<(), ApiError>) -> Result<(), String> {
        match result {
            Ok(()) => {
                self.items.retain(|image| image.id != id);
                if self.selected.as_ref().is_some_and(|image| image.id == id) {
                    self.selected = None;
                }
                Ok(())
            }
            Err(err) => Err(err.user_message("Could not delete the image")),
        }
    }

    /// Open or close the detail view. Pure local state.
    pub fn select(&mut self, image: Option<ImageRecord>) {
        self.selected = image;
    }

    /// Show or mask private images in the grid. Pure local state.
    pub fn set_reveal_spoilers(&mut self, reveal: bool) {
        self.reveal_spoilers = reveal;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::models::{AuthResponse, User};
    use crate::state::session::{SessionManager, SessionStatus, SessionStore};
    use chrono::NaiveDate;

    fn image(id: &str, is_private: bool) -> ImageRecord {
        ImageRecord {
            id: id.to_string(),
            filename: format!("{id}.jpg"),
            caption: String::new(),
            is_private,
            image_data: "aGVsbG8=".to_string(),
            content_type: "image/jpeg".to_string(),
            file_size: 5,
            created_at: NaiveDate::from_ymd_opt(2026, 8, 5)
                .unwrap()
                .and_hms_opt(10, 30, 0)
                .unwrap(),
        }
    }

    fn ids(gallery: &Gallery) -> Vec<&str> {
        gallery.items().iter().map(|i| i.id.as_str()).collect()
    }

    #[test]
    fn test_load_replaces_items_wholesale() {
        let mut gallery = Gallery::new();

        let ticket = gallery.begin_load();
        assert_eq!(gallery.status(), LoadStatus::Loading);

        let applied = gallery.apply_load(ticket, Ok(vec![image("i1", false), image("i2", false)]));
        assert!(applied);
        assert_eq!(gallery.status(), LoadStatus::Loaded);
        assert_eq!(ids(&gallery), vec!["i1", "i2"]);

        let ticket = gallery.begin_load();
        gallery.apply_load(ticket, Ok(vec![image("i3", false)]));
        assert_eq!(ids(&gallery), vec!["i3"]);
    }

    #[test]
    fn test_stale_scope_response_is_discarded() {
        // A slow response for the public scope arrives after the user
        // has switched to private; the private data must win.
        let mut gallery = Gallery::new();

        let slow_public = gallery.begin_load();
        let private = gallery.set_scope(Scope::Private);

        let applied = gallery.apply_load(private, Ok(vec![image("p1", true)]));
        assert!(applied);

        let applied = gallery.apply_load(slow_public, Ok(vec![image("a1", false)]));
        assert!(!applied);

        assert_eq!(gallery.scope(), Scope::Private);
        assert_eq!(ids(&gallery), vec!["p1"]);
    }

    #[test]
    fn test_superseded_request_is_discarded() {
        // Two rapid refreshes in the same scope: only the newest applies,
        // no matter the arrival order.
        let mut gallery = Gallery::new();

        let old = gallery.begin_load();
        let new = gallery.begin_load();

        assert!(gallery.apply_load(new, Ok(vec![image("fresh", false)])));
        assert!(!gallery.apply_load(old, Ok(vec![image("stale", false)])));

        assert_eq!(ids(&gallery), vec!["fresh"]);
    }

    #[test]
    fn test_scope_switch_clears_items_immediately() {
        let mut gallery = Gallery::new();
        let ticket = gallery.begin_load();
        gallery.apply_load(ticket, Ok(vec![image("i1", false)]));
        gallery.select(Some(image("i1", false)));

        gallery.set_scope(Scope::Private);

        assert!(gallery.items().is_empty());
        assert!(gallery.selected().is_none());
        assert_eq!(gallery.status(), LoadStatus::Loading);
    }

    #[test]
    fn test_same_scope_switch_keeps_items_while_reloading() {
        let mut gallery = Gallery::new();
        let ticket = gallery.begin_load();
        gallery.apply_load(ticket, Ok(vec![image("i1", false)]));

        gallery.set_scope(Scope::Public);

        assert_eq!(ids(&gallery), vec!["i1"]);
        assert_eq!(gallery.status(), LoadStatus::Loading);
    }

    #[test]
    fn test_failed_load_keeps_previous_items() {
        let mut gallery = Gallery::new();
        let ticket = gallery.begin_load();
        gallery.apply_load(ticket, Ok(vec![image("i1", false)]));

        let ticket = gallery.begin_load();
        let applied = gallery.apply_load(ticket, Err(ApiError::Network("timeout".to_string())));

        assert!(applied);
        assert_eq!(gallery.status(), LoadStatus::LoadFailed);
        assert_eq!(ids(&gallery), vec!["i1"]);
    }

    #[test]
    fn test_delete_removes_matching_entry() {
        let mut gallery = Gallery::new();
        let ticket = gallery.begin_load();
        gallery.apply_load(ticket, Ok(vec![image("i1", false), image("i2", false)]));
        gallery.select(Some(image("i1", false)));

        let outcome = gallery.apply_delete("i1", Ok(()));

        assert!(outcome.is_ok());
        assert_eq!(ids(&gallery), vec!["i2"]);
        assert!(gallery.selected().is_none());
    }

    #[test]
    fn test_delete_keeps_unrelated_selection() {
        let mut gallery = Gallery::new();
        let ticket = gallery.begin_load();
        gallery.apply_load(ticket, Ok(vec![image("i1", false), image("i2", false)]));
        gallery.select(Some(image("i2", false)));

        gallery.apply_delete("i1", Ok(())).unwrap();

        assert_eq!(gallery.selected().unwrap().id, "i2");
    }

    #[test]
    fn test_delete_of_absent_id_is_a_noop() {
        let mut gallery = Gallery::new();
        let ticket = gallery.begin_load();
        gallery.apply_load(ticket, Ok(vec![image("i1", false)]));

        let outcome = gallery.apply_delete("missing", Ok(()));

        assert!(outcome.is_ok());
        assert_eq!(ids(&gallery), vec!["i1"]);
    }

    #[test]
    fn test_failed_delete_leaves_items_untouched() {
        let mut gallery = Gallery::new();
        let ticket = gallery.begin_load();
        gallery.apply_load(ticket, Ok(vec![image("i1", false)]));

        let outcome = gallery.apply_delete(
            "i1",
            Err(ApiError::Rejected {
                status: 404,
                detail: "Image not found".to_string(),
            }),
        );

        assert_eq!(outcome, Err("Image not found".to_string()));
        assert_eq!(ids(&gallery), vec!["i1"]);
    }

    #[test]
    fn test_upload_shows_up_only_after_refresh() {
        // Uploads never insert locally; the server assigns id and
        // timestamp, so the list refreshes instead. A private upload
        // stays invisible in the public scope.
        let mut gallery = Gallery::new();
        let ticket = gallery.begin_load();
        gallery.apply_load(ticket, Ok(vec![image("i1", false)]));

        // Refresh after uploading a private image: public list unchanged
        let ticket = gallery.begin_load();
        gallery.apply_load(ticket, Ok(vec![image("i1", false)]));
        assert_eq!(ids(&gallery), vec!["i1"]);

        // The private scope shows it
        let ticket = gallery.set_scope(Scope::Private);
        gallery.apply_load(ticket, Ok(vec![image("p1", true)]));
        assert_eq!(ids(&gallery), vec!["p1"]);
    }

    #[test]
    fn test_login_load_delete_scenario() {
        // Full pass across session and gallery: sign in, load the public
        // scope, delete the only image.
        let dir = tempfile::tempdir().unwrap();
        let mut session = SessionManager::new(SessionStore::at(dir.path().to_path_buf()));
        session.initialize();

        let response = AuthResponse {
            access_token: "tok1".to_string(),
            token_type: "bearer".to_string(),
            user: User {
                id: "1".to_string(),
                username: "alice".to_string(),
                email: "alice@example.com".to_string(),
                created_at: NaiveDate::from_ymd_opt(2026, 8, 5)
                    .unwrap()
                    .and_hms_opt(10, 30, 0)
                    .unwrap(),
            },
        };
        session.complete_auth(Ok(response), "Login failed").unwrap();

        assert_eq!(session.status(), SessionStatus::Authenticated);
        assert_eq!(session.auth_header(), Some("Bearer tok1".to_string()));

        let mut gallery = Gallery::new();
        assert_eq!(gallery.scope(), Scope::Public);

        let ticket = gallery.begin_load();
        gallery.apply_load(ticket, Ok(vec![image("i1", false)]));
        assert_eq!(ids(&gallery), vec!["i1"]);

        gallery.select(Some(image("i1", false)));
        gallery.apply_delete("i1", Ok(())).unwrap();

        assert!(gallery.items().is_empty());
        assert!(gallery.selected().is_none());
    }
}
