//! In-memory session state shared between the controller and the view.
//!
//! There is no process-wide singleton: the controller owns a
//! [`SessionHandle`] and the view reads through a clone of it. All state
//! lives in memory for the lifetime of the session; sign-out discards it.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use serde::Serialize;

use crate::identity::Identity;
use crate::models::WorkoutRecord;

/// Where the session stands in the sign-in/sync lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    /// No identity; nothing to show
    SignedOut,
    /// Identity set, a history fetch is in flight
    Authenticating,
    /// Identity set, history loaded (possibly empty)
    SignedIn,
    /// A create call is in flight for the current identity
    Submitting,
}

/// The single source of truth for "what is currently known": the current
/// identity and the last fully-synchronized workout collection.
///
/// Invariant: `identity` is `None` exactly when the phase is `SignedOut`,
/// and `workouts` is always a plain vector in server order, whatever the
/// remote service returned.
#[derive(Debug)]
pub struct SessionState {
    phase: SessionPhase,
    identity: Option<Identity>,
    workouts: Vec<WorkoutRecord>,
}

impl SessionState {
    pub fn new() -> Self {
        Self {
            phase: SessionPhase::SignedOut,
            identity: None,
            workouts: Vec::new(),
        }
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    pub fn workouts(&self) -> &[WorkoutRecord] {
        &self.workouts
    }

    /// True when `identity` is the one currently signed in. This is the
    /// stale-response check: a completion stamped with an identity that no
    /// longer matches must not touch state.
    pub fn is_current(&self, identity: &Identity) -> bool {
        self.identity.as_ref() == Some(identity)
    }

    /// Starts a session for `identity`: the previous user's workouts are
    /// cleared immediately so they are never rendered under the new name.
    pub fn begin_session(&mut self, identity: Identity) {
        self.identity = Some(identity);
        self.workouts.clear();
        self.phase = SessionPhase::Authenticating;
    }

    /// Full resynchronization: replaces the collection wholesale.
    pub fn finish_fetch(&mut self, records: Vec<WorkoutRecord>) {
        self.workouts = records;
        self.phase = SessionPhase::SignedIn;
    }

    pub fn begin_submit(&mut self) {
        self.phase = SessionPhase::Submitting;
    }

    /// Re-enters the fetch phase for the follow-up reload after a create.
    pub fn resume_authenticating(&mut self) {
        self.phase = SessionPhase::Authenticating;
    }

    /// Installs a locally-built record without a reload (optimistic path).
    pub fn append_record(&mut self, record: WorkoutRecord) {
        self.workouts.push(record);
        self.phase = SessionPhase::SignedIn;
    }

    /// Clears identity and workouts unconditionally.
    pub fn signed_out(&mut self) {
        self.identity = None;
        self.workouts.clear();
        self.phase = SessionPhase::SignedOut;
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

/// Shared handle to the session state.
///
/// The lock is only ever held for plain field access, never across an await
/// point, so a poisoned lock is recovered rather than propagated.
#[derive(Debug, Clone)]
pub struct SessionHandle {
    inner: Arc<Mutex<SessionState>>,
}

impl SessionHandle {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(SessionState::new())),
        }
    }

    pub(crate) fn lock(&self) -> MutexGuard<'_, SessionState> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Owned copy of the session for rendering.
    pub fn snapshot(&self) -> SessionSnapshot {
        let state = self.lock();
        SessionSnapshot {
            phase: state.phase(),
            identity: state.identity().cloned(),
            workouts: state.workouts().to_vec(),
        }
    }
}

impl Default for SessionHandle {
    fn default() -> Self {
        Self::new()
    }
}

/// Owned, render-ready copy of the session state.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub phase: SessionPhase,
    pub identity: Option<Identity>,
    pub workouts: Vec<WorkoutRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(title: &str) -> WorkoutRecord {
        WorkoutRecord {
            user: None,
            title: title.to_string(),
            duration: None,
            calories: None,
            feedback: None,
            date: None,
            invalid: false,
            raw: json!({"workout": title}),
        }
    }

    #[test]
    fn test_new_session_is_signed_out() {
        let state = SessionState::new();
        assert_eq!(state.phase(), SessionPhase::SignedOut);
        assert!(state.identity().is_none());
        assert!(state.workouts().is_empty());
    }

    #[test]
    fn test_begin_session_clears_previous_workouts() {
        let mut state = SessionState::new();
        state.begin_session(Identity::new("al").unwrap());
        state.finish_fetch(vec![record("Pushups")]);

        state.begin_session(Identity::new("bo").unwrap());
        assert_eq!(state.phase(), SessionPhase::Authenticating);
        assert!(state.workouts().is_empty());
        assert!(state.is_current(&Identity::new("bo").unwrap()));
    }

    #[test]
    fn test_finish_fetch_replaces_wholesale() {
        let mut state = SessionState::new();
        state.begin_session(Identity::new("al").unwrap());
        state.finish_fetch(vec![record("Pushups"), record("Squats")]);
        state.finish_fetch(vec![record("Rowing")]);

        assert_eq!(state.workouts().len(), 1);
        assert_eq!(state.workouts()[0].title, "Rowing");
        assert_eq!(state.phase(), SessionPhase::SignedIn);
    }

    #[test]
    fn test_signed_out_clears_everything() {
        let mut state = SessionState::new();
        state.begin_session(Identity::new("al").unwrap());
        state.finish_fetch(vec![record("Pushups")]);

        state.signed_out();
        assert_eq!(state.phase(), SessionPhase::SignedOut);
        assert!(state.identity().is_none());
        assert!(state.workouts().is_empty());
    }

    #[test]
    fn test_is_current_tracks_identity() {
        let mut state = SessionState::new();
        let al = Identity::new("al").unwrap();
        let bo = Identity::new("bo").unwrap();

        assert!(!state.is_current(&al));
        state.begin_session(al.clone());
        assert!(state.is_current(&al));
        assert!(!state.is_current(&bo));
    }

    #[test]
    fn test_snapshot_is_an_owned_copy() {
        let handle = SessionHandle::new();
        handle.lock().begin_session(Identity::new("al").unwrap());
        handle.lock().finish_fetch(vec![record("Pushups")]);

        let snapshot = handle.snapshot();
        handle.lock().signed_out();

        assert_eq!(snapshot.workouts.len(), 1);
        assert!(handle.snapshot().workouts.is_empty());
    }
}
