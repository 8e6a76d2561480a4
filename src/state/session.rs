/// Session manager
///
/// Owns the bearer token and user identity for the current run, persists
/// them across restarts, and applies the results of login and register
/// calls. Network I/O never happens here; finished calls flow in from
/// the update loop.

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::api::error::ApiError;
use crate::api::models::{AuthResponse, AuthToken, User};

/// Name of the session file inside the data directory
const SESSION_FILE: &str = "session.json";

/// Where the session currently stands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Initializing,
    Authenticated,
    Unauthenticated,
}

/// Durable session contents.
///
/// The user identity is stored next to the token so a restored session
/// knows who is signed in without a network call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct StoredSession {
    token: AuthToken,
    user: User,
}

/// Reads and writes the session file.
///
/// The file lives in the user's data directory:
/// - Linux: ~/.local/share/pixshare/session.json
/// - macOS: ~/Library/Application Support/pixshare/session.json
/// - Windows: %APPDATA%\pixshare\session.json
#[derive(Debug, Clone)]
pub struct SessionStore {
    dir: Option<PathBuf>,
}

impl SessionStore {
    pub fn new() -> Self {
        let dir = dirs::data_dir().or_else(dirs::home_dir).map(|mut path| {
            path.push("pixshare");
            path
        });

        SessionStore { dir }
    }

    /// Store rooted at a custom directory (used by tests)
    pub fn at(dir: PathBuf) -> Self {
        SessionStore { dir: Some(dir) }
    }

    fn file_path(&self) -> Option<PathBuf> {
        self.dir.as_ref().map(|dir| dir.join(SESSION_FILE))
    }

    fn load(&self) -> Option<StoredSession> {
        let path = self.file_path()?;
        if !path.exists() {
            return None;
        }

        let contents = fs::read_to_string(&path).ok()?;
        match serde_json::from_str(&contents) {
            Ok(stored) => Some(stored),
            Err(_) => {
                // A file we cannot parse is treated like no file at all
                eprintln!("⚠️  Session file is unreadable, starting signed out");
                None
            }
        }
    }

    fn save(&self, session: &StoredSession) {
        let Some(path) = self.file_path() else {
            return;
        };

        if let Some(parent) = path.parent() {
            if let Err(e) = fs::create_dir_all(parent) {
                eprintln!("⚠️  Could not create data directory: {e}");
                return;
            }
        }

        match serde_json::to_string(session) {
            Ok(json) => {
                if let Err(e) = fs::write(&path, json) {
                    eprintln!("⚠️  Could not save session: {e}");
                }
            }
            Err(e) => eprintln!("⚠️  Could not encode session: {e}"),
        }
    }

    fn clear(&self) {
        if let Some(path) = self.file_path() {
            // A missing file is already the state we want
            let _ = fs::remove_file(path);
        }
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

/// The single process-wide authentication session.
///
/// Invariant: token and user are both present exactly when the status is
/// Authenticated.
#[derive(Debug)]
pub struct SessionManager {
    status: SessionStatus,
    token: Option<AuthToken>,
    user: Option<User>,
    store: SessionStore,
}

impl SessionManager {
    pub fn new(store: SessionStore) -> Self {
        SessionManager {
            status: SessionStatus::Initializing,
            token: None,
            user: None,
            store,
        }
    }

    /// Restore a persisted session if one exists.
    ///
    /// A restored token is trusted without a validation round trip; the
    /// first authenticated call answering 401 signs the session out
    /// instead. Always leaves the Initializing state, never touches the
    /// network.
    pub fn initialize(&mut self) {
        match self.store.load() {
            Some(stored) => {
                println!("🔑 Restored session for {}", stored.user.username);
                self.token = Some(stored.token);
                self.user = Some(stored.user);
                self.status = SessionStatus::Authenticated;
            }
            None => {
                self.status = SessionStatus::Unauthenticated;
            }
        }
    }

    /// Apply a finished login or register call.
    ///
    /// Both endpoints answer with the same shape, and both leave the
    /// caller signed in on success. On failure the session is left
    /// exactly as it was and the returned message is ready for the auth
    /// form, preferring the server's detail over the fallback.
    pub fn complete_auth(
        &mut self,
        result: Result<AuthResponse, ApiError>,
        fallback: &str,
    ) -> Result<(), String> {
        match result {
            Ok(response) => {
                let token = AuthToken::new(response.access_token);
                self.store.save(&StoredSession {
                    token: token.clone(),
                    user: response.user.clone(),
                });
                self.token = Some(token);
                self.user = Some(response.user);
                self.status = SessionStatus::Authenticated;
                Ok(())
            }
            Err(err) => Err(err.user_message(fallback)),
        }
    }

    /// Drop the session and its durable file. Never fails.
    pub fn logout(&mut self) {
        self.token = None;
        self.user = None;
        self.status = SessionStatus::Unauthenticated;
        self.store.clear();
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn is_authenticated(&self) -> bool {
        self.status == SessionStatus::Authenticated
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    /// Token to attach to outbound calls, present only when authenticated
    pub fn auth_token(&self) -> Option<&AuthToken> {
        self.token.as_ref()
    }

    /// Value of the Authorization header, present only when authenticated
    pub fn auth_header(&self) -> Option<String> {
        self.token.as_ref().map(AuthToken::header_value)
    }
}
