//! Session and view state
//!
//! The viewing user's credentials are passed in explicitly; nothing here
//! reads ambient storage.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::time::{Duration, Instant};

/// Access tier of the viewing user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Anonymous,
    User,
    Subscriber,
    Admin,
}

impl Role {
    /// Parse the upstream `user_role` value; unknown roles are plain users
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "anonymous" | "" => Role::Anonymous,
            "subscriber" => Role::Subscriber,
            "admin" => Role::Admin,
            _ => Role::User,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Role::Anonymous => "anonymous",
            Role::User => "user",
            Role::Subscriber => "subscriber",
            Role::Admin => "admin",
        };
        f.write_str(s)
    }
}

/// Credentials of the viewing user
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub token: Option<String>,
    pub role: Role,
}

impl Session {
    pub fn anonymous() -> Self {
        Self { token: None, role: Role::Anonymous }
    }

    pub fn authenticated(token: impl Into<String>, role: Role) -> Self {
        Self { token: Some(token.into()), role }
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Network exploration is a subscriber feature
    pub fn has_premium_access(&self) -> bool {
        self.is_authenticated() && matches!(self.role, Role::Subscriber | Role::Admin)
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::anonymous()
    }
}

// Keep tokens out of logs
impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("role", &self.role)
            .finish()
    }
}

/// What the explorer widget is currently showing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewStatus {
    Loading,
    Loaded,
    /// Rendering disabled and upgrade overlay shown
    PremiumGated,
    /// The last fetch failed; the previous graph is still shown
    FetchError,
}

/// Outstanding fetches, for the debounced loading indicator
#[derive(Debug, Clone, Default)]
pub struct LoadingTracker {
    next_ticket: u64,
    outstanding: HashMap<u64, Instant>,
}

impl LoadingTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a fetch started at `now`
    pub fn begin(&mut self, now: Instant) -> u64 {
        let ticket = self.next_ticket;
        self.next_ticket += 1;
        self.outstanding.insert(ticket, now);
        ticket
    }

    pub fn finish(&mut self, ticket: u64) {
        self.outstanding.remove(&ticket);
    }

    pub fn in_flight(&self) -> usize {
        self.outstanding.len()
    }

    pub fn is_loading(&self) -> bool {
        !self.outstanding.is_empty()
    }

    /// True once some fetch has been outstanding for at least `debounce`
    pub fn show_spinner(&self, now: Instant, debounce: Duration) -> bool {
        self.outstanding
            .values()
            .any(|started| now.saturating_duration_since(*started) >= debounce)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_premium_access() {
        assert!(Session::authenticated("t", Role::Subscriber).has_premium_access());
        assert!(Session::authenticated("t", Role::Admin).has_premium_access());
        assert!(!Session::authenticated("t", Role::User).has_premium_access());
        assert!(!Session { token: None, role: Role::Admin }.has_premium_access());
    }

    #[test]
    fn test_role_parsing() {
        assert_eq!(Role::from_str("Subscriber"), Role::Subscriber);
        assert_eq!(Role::from_str("registered"), Role::User);
        assert_eq!(Role::from_str(""), Role::Anonymous);
    }

    #[test]
    fn test_debug_redacts_token() {
        let rendered = format!("{:?}", Session::authenticated("secret-token", Role::User));
        assert!(!rendered.contains("secret-token"));
    }

    #[test]
    fn test_spinner_is_debounced() {
        let debounce = Duration::from_millis(500);
        let start = Instant::now();
        let mut tracker = LoadingTracker::new();
        let ticket = tracker.begin(start);

        assert!(tracker.is_loading());
        assert!(!tracker.show_spinner(start + Duration::from_millis(100), debounce));
        assert!(tracker.show_spinner(start + Duration::from_millis(600), debounce));

        tracker.finish(ticket);
        assert!(!tracker.show_spinner(start + Duration::from_millis(600), debounce));
        assert_eq!(tracker.in_flight(), 0);
    }
}
