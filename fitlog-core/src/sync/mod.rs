//! Client-side synchronization with the remote workout service.
//!
//! This module sequences the network operations of a session
//! (login → fetch → add → refetch → export) and keeps the in-memory state
//! consistent with their completions:
//!
//! - [`WorkoutService`] is the seam to the external collaborator, with
//!   [`RemoteClient`] as its HTTP implementation.
//! - [`SyncController`] owns the session and the stale-response rules.
//! - [`ResyncStrategy`] decides how state is reloaded after a create.

mod client;
mod controller;
mod error;

pub use client::{RemoteClient, WorkoutService, DEFAULT_BASE_URL};
pub use controller::{
    OptimisticAppend, RefetchAfterWrite, Resync, ResyncStrategy, SyncController,
};
pub use error::SyncError;
