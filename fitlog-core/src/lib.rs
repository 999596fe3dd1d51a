//! Fitlog Core Library
//!
//! Session state and sync logic for the Fitlog workout log client: the
//! pieces that reconcile local state with an untrusted remote payload and
//! keep the view renderable no matter what the service returns.

pub mod identity;
pub mod models;
pub mod normalize;
pub mod session;
pub mod sync;

pub use identity::{Identity, IdentityError};
pub use models::{WorkoutDraft, WorkoutRecord};
pub use normalize::normalize;
pub use session::{SessionHandle, SessionPhase, SessionSnapshot, SessionState};
pub use sync::{
    OptimisticAppend, RefetchAfterWrite, RemoteClient, Resync, ResyncStrategy, SyncController,
    SyncError, WorkoutService, DEFAULT_BASE_URL,
};

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
