//! Orchestration of the sign-in / fetch / add / export sequence.
//!
//! The controller owns the session handle and is the only writer to it.
//! Every remote completion passes a stale-response check before touching
//! state: each request carries the identity it was issued for, and the
//! response applies only if that identity is still current when it lands.
//! Sign-out (or a rapid second sign-in) while a request is in flight
//! therefore wins over the late response.

use uuid::Uuid;

use super::client::WorkoutService;
use super::error::SyncError;
use crate::identity::Identity;
use crate::models::{WorkoutDraft, WorkoutRecord};
use crate::normalize::normalize;
use crate::session::{SessionHandle, SessionPhase};

/// How local state is brought back in line after a create call.
///
/// The client never trusts its own copy of a new entry; how it regains a
/// server-consistent view is pluggable here without touching the state
/// machine.
pub trait ResyncStrategy {
    /// Decides the follow-up after a create attempt for `user`.
    fn after_create(
        &self,
        user: &Identity,
        draft: &WorkoutDraft,
        outcome: Result<(), &SyncError>,
    ) -> Resync;
}

/// Follow-up action after a create attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum Resync {
    /// Reload the full history from the server
    Refetch,
    /// Install this record locally without a reload
    Append(WorkoutRecord),
}

/// Default strategy: the client keeps no optimistic local copy of a new
/// entry, so every create (successful or not) is followed by a full
/// refetch.
#[derive(Debug, Clone, Copy, Default)]
pub struct RefetchAfterWrite;

impl ResyncStrategy for RefetchAfterWrite {
    fn after_create(
        &self,
        _user: &Identity,
        _draft: &WorkoutDraft,
        _outcome: Result<(), &SyncError>,
    ) -> Resync {
        Resync::Refetch
    }
}

/// Substitutable variant: a confirmed create is appended locally and the
/// reload is skipped; a failed create falls back to the full refetch.
#[derive(Debug, Clone, Copy, Default)]
pub struct OptimisticAppend;

impl ResyncStrategy for OptimisticAppend {
    fn after_create(
        &self,
        user: &Identity,
        draft: &WorkoutDraft,
        outcome: Result<(), &SyncError>,
    ) -> Resync {
        match outcome {
            Ok(()) => Resync::Append(draft.to_record(user.as_str())),
            Err(_) => Resync::Refetch,
        }
    }
}

/// Correlation stamp carried by every remote request. The id ties log lines
/// together; the identity is what gates whether the completion may apply.
#[derive(Debug, Clone)]
struct RequestStamp {
    id: Uuid,
    identity: Identity,
}

impl RequestStamp {
    fn new(identity: Identity) -> Self {
        Self {
            id: Uuid::new_v4(),
            identity,
        }
    }
}

/// Sequences network operations against the remote workout service and
/// keeps [`SessionHandle`] consistent across their completions.
///
/// All methods take `&self`: the controller is safe to share with a view
/// that may issue a sign-out while a fetch or create is still in flight.
pub struct SyncController<S, R = RefetchAfterWrite> {
    service: S,
    strategy: R,
    session: SessionHandle,
}

impl<S: WorkoutService> SyncController<S> {
    pub fn new(service: S) -> Self {
        Self::with_strategy(service, RefetchAfterWrite)
    }
}

impl<S: WorkoutService, R: ResyncStrategy> SyncController<S, R> {
    pub fn with_strategy(service: S, strategy: R) -> Self {
        Self {
            service,
            strategy,
            session: SessionHandle::new(),
        }
    }

    /// Read handle for the view.
    pub fn session(&self) -> SessionHandle {
        self.session.clone()
    }

    /// Signs in and loads the user's history.
    ///
    /// Both inputs must be non-empty, otherwise nothing happens: the gate
    /// is deliberately permissive and reports no error. The password only
    /// gates the transition; it is neither stored nor transmitted. A failed
    /// or malformed fetch leaves the user signed in with an empty history.
    pub async fn sign_in(&self, username: &str, password: &str) {
        if password.is_empty() {
            tracing::debug!("sign-in ignored: empty password");
            return;
        }
        let identity = match Identity::new(username) {
            Ok(identity) => identity,
            Err(_) => {
                tracing::debug!("sign-in ignored: empty username");
                return;
            }
        };

        tracing::info!(user = %identity, "signing in");
        self.session.lock().begin_session(identity.clone());
        self.refresh(identity).await;
    }

    /// Submits a workout with the default details.
    pub async fn add_workout(&self, text: &str) {
        if text.is_empty() {
            return;
        }
        self.submit_draft(WorkoutDraft::new(text)).await;
    }

    /// Submits a fully-specified draft, the richer calling surface for
    /// views that collect more than a title. Requires a signed-in identity
    /// and a non-empty title; anything else is a no-op. Overlapping submits
    /// are neither queued nor deduplicated: rapid adds issue sibling create
    /// calls, and the final refetch reflects whatever the server kept.
    pub async fn submit_draft(&self, draft: WorkoutDraft) {
        if draft.title.is_empty() {
            return;
        }
        let identity = {
            let mut state = self.session.lock();
            let Some(identity) = state.identity().cloned() else {
                tracing::debug!("add ignored outside a session");
                return;
            };
            state.begin_submit();
            identity
        };

        let stamp = RequestStamp::new(identity.clone());
        tracing::debug!(request = %stamp.id, user = %stamp.identity, workout = %draft.title, "create issued");
        let outcome = self.service.create_workout(identity.as_str(), &draft).await;
        if let Err(e) = &outcome {
            tracing::warn!(request = %stamp.id, error = %e, "create failed; resyncing anyway");
        }

        let resync = self
            .strategy
            .after_create(&identity, &draft, outcome.as_ref().map(|_| ()));
        {
            let mut state = self.session.lock();
            if !state.is_current(&stamp.identity) {
                tracing::debug!(request = %stamp.id, "stale create completion dropped");
                return;
            }
            match resync {
                Resync::Append(record) => {
                    state.append_record(record);
                    return;
                }
                Resync::Refetch => state.resume_authenticating(),
            }
        }
        self.refresh(identity).await;
    }

    /// Clears the session unconditionally. Any in-flight completion for the
    /// previous identity is dropped when it lands.
    pub fn sign_out(&self) {
        tracing::info!("signing out");
        self.session.lock().signed_out();
    }

    /// Fire-and-forget CSV export, available only while signed in. No state
    /// change and no feedback loop; a failure is only logged.
    pub async fn export_csv(&self) {
        let identity = {
            let state = self.session.lock();
            if state.phase() != SessionPhase::SignedIn {
                return;
            }
            match state.identity().cloned() {
                Some(identity) => identity,
                None => return,
            }
        };

        let stamp = RequestStamp::new(identity);
        tracing::debug!(request = %stamp.id, user = %stamp.identity, "export requested");
        if let Err(e) = self.service.export_csv(stamp.identity.as_str()).await {
            tracing::warn!(request = %stamp.id, error = %e, "export failed");
        }
    }

    /// Full resynchronization for `identity`: fetch, normalize, replace.
    async fn refresh(&self, identity: Identity) {
        let stamp = RequestStamp::new(identity);
        tracing::debug!(request = %stamp.id, user = %stamp.identity, "fetch issued");
        let payload = self.service.list_workouts(stamp.identity.as_str()).await;

        let mut state = self.session.lock();
        if !state.is_current(&stamp.identity) {
            tracing::debug!(request = %stamp.id, "stale fetch dropped");
            return;
        }
        let records = match payload {
            Ok(payload) => normalize(&payload),
            Err(e) => {
                tracing::warn!(request = %stamp.id, error = %e, "fetch failed; showing empty history");
                Vec::new()
            }
        };
        tracing::info!(request = %stamp.id, user = %stamp.identity, count = records.len(), "history loaded");
        state.finish_fetch(records);
    }
}
