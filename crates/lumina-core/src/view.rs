//! Session view-state machine.
//!
//! The whole navigation state lives in one explicit [`Session`] value:
//! the visible screen, the selected post, the auth flag, and the transient
//! login-error flag. Front ends call transition methods and re-derive the
//! screen to draw from [`Session::effective_view`] on every render, so the
//! admin guard holds even when the auth flag is reset out from under the
//! machine.

use serde::{Deserialize, Serialize};

/// The enumerated screen the session is currently displaying.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum View {
    Home,
    PostDetail,
    About,
    Admin,
}

/// Explicit, serializable navigation state. No ambient globals; front ends
/// own one `Session` and thread it through every transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    view: View,
    selected_post_id: Option<String>,
    authenticated: bool,
    login_error: bool,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            view: Session::INITIAL_VIEW,
            selected_post_id: None,
            authenticated: false,
            login_error: false,
        }
    }

    const INITIAL_VIEW: View = View::Home;

    #[must_use]
    pub const fn view(&self) -> View {
        self.view
    }

    #[must_use]
    pub fn selected_post_id(&self) -> Option<&str> {
        self.selected_post_id.as_deref()
    }

    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    #[must_use]
    pub const fn login_error(&self) -> bool {
        self.login_error
    }

    /// Navigate to a top-level screen. Home and About ignore the current
    /// selection, so it is left untouched.
    pub fn go_home(&mut self) {
        self.view = View::Home;
    }

    pub fn go_about(&mut self) {
        self.view = View::About;
    }

    /// Open a post in detail view from any screen.
    pub fn open_post(&mut self, post_id: &str) {
        self.selected_post_id = Some(post_id.to_string());
        self.view = View::PostDetail;
    }

    /// Leave detail view: back to Home with the selection cleared.
    pub fn go_back(&mut self) {
        self.view = View::Home;
        self.selected_post_id = None;
    }

    /// Compare against the shared editor secret. Success authenticates and
    /// lands on Admin; failure stays put and raises the transient error
    /// flag. Returns whether the attempt succeeded.
    pub fn attempt_login(&mut self, password: &str, secret: &str) -> bool {
        if password == secret {
            self.authenticated = true;
            self.login_error = false;
            self.view = View::Admin;
            true
        } else {
            self.login_error = true;
            false
        }
    }

    /// Clear the transient error flag, e.g. when the login modal reopens.
    pub fn clear_login_error(&mut self) {
        self.login_error = false;
    }

    /// Guarded entry: unauthenticated sessions are forced to Home instead.
    pub fn enter_admin(&mut self) {
        if self.authenticated {
            self.view = View::Admin;
        } else {
            self.view = View::Home;
        }
    }

    pub fn logout(&mut self) {
        self.authenticated = false;
        self.view = View::Home;
    }

    /// The screen to draw this cycle, with the admin guard re-applied.
    ///
    /// If the session sits on Admin without authentication (the flag can be
    /// reset externally between renders), the session is downgraded to Home
    /// and `None` is returned so the caller renders nothing for one cycle.
    pub fn effective_view(&mut self) -> Option<View> {
        if self.view == View::Admin && !self.authenticated {
            self.view = View::Home;
            return None;
        }
        Some(self.view)
    }
}
