//! Sync error types.

/// Errors from remote workout operations.
///
/// None of these are fatal: a failed fetch renders as an empty history, a
/// failed create still triggers the follow-up resync, and a failed export
/// is logged and dropped. There is no retry policy; the next explicit user
/// action is the retry.
#[derive(Debug)]
pub enum SyncError {
    /// Network, DNS, or connection-level failure
    Transport(String),
    /// Server answered with a non-success HTTP status
    Status(u16),
    /// Response body could not be decoded as JSON
    MalformedBody(String),
}

impl std::fmt::Display for SyncError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SyncError::Transport(e) => write!(f, "transport error: {}", e),
            SyncError::Status(code) => write!(f, "server returned status {}", code),
            SyncError::MalformedBody(e) => write!(f, "malformed response body: {}", e),
        }
    }
}

impl std::error::Error for SyncError {}
