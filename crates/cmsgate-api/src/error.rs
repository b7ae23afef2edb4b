use thiserror::Error;

/// Top-level error type for the `cmsgate-api` crate.
///
/// The northbound protocol only has three failure modes worth
/// distinguishing; everything transport-shaped (refused connection,
/// timeout, unparsable body, missing acknowledgement) collapses into
/// [`Communication`](Error::Communication). Callers map these into
/// user-facing responses -- the client never retries on its own.
#[derive(Debug, Error)]
pub enum Error {
    /// The device controller could not be reached, or returned a body
    /// that is not a usable reply (malformed XML, missing `<ok/>` ack).
    /// Always retryable by the caller.
    #[error("request to device controller at {target} failed")]
    Communication { target: String },

    /// Login rejected (non-zero result code or no session id issued).
    /// Fatal to the current login attempt.
    #[error("authentication failed for user={username} at {target}")]
    Authentication { username: String, target: String },

    /// Logout rejected. Ignorable on the periodic re-auth path (the
    /// session may already be expired server-side), but worth logging
    /// on explicit shutdown.
    #[error("deauthentication failed for user={username} at {target}")]
    Deauthentication { username: String, target: String },
}

impl Error {
    /// Returns `true` if this is a transient failure worth retrying.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Communication { .. })
    }

    /// Returns `true` if this error came from the auth lifecycle.
    pub fn is_auth(&self) -> bool {
        matches!(
            self,
            Self::Authentication { .. } | Self::Deauthentication { .. }
        )
    }
}
