// Session lifecycle: login, logout, periodic re-authentication.
//
// Auth replies come back in a plain (unprefixed) envelope, unlike rpc
// replies. A login is successful iff ResultCode is "0" and a SessionId
// is present; the id is stored on the client and stamped onto every
// subsequent rpc envelope.

use rand::Rng;
use secrecy::ExposeSecret;
use tracing::{debug, warn};

use crate::error::Error;
use crate::netconf::client::CmsClient;
use crate::netconf::envelope::{auth_login, auth_logout};
use crate::netconf::extract;

const AUTH_RESULT: &str = "Envelope.Body.auth-reply.ResultCode";
const AUTH_SESSION: &str = "Envelope.Body.auth-reply.SessionId";

/// Random rpc message id, matching the controller's expectations: a
/// decimal integer of anywhere between 2 and 31 bits. Collisions are
/// harmless since replies arrive on the same HTTP exchange.
pub(crate) fn message_id() -> String {
    let mut rng = rand::thread_rng();
    let bits = rng.gen_range(2..=31u32);
    rng.gen_range(0..(1u64 << bits)).to_string()
}

impl CmsClient {
    /// Open a session. On success the session id is stored and used for
    /// all following requests.
    pub async fn login(&self) -> Result<(), Error> {
        let session_id = self.do_login().await?;
        debug!(username = %self.username, "session established");
        *self.session.write().await = Some(session_id);
        Ok(())
    }

    /// Close the current session. The stored id is cleared only once
    /// the controller acknowledges the logout; a rejected logout keeps
    /// the id so the caller can retry. Logging out without a session is
    /// a no-op.
    pub async fn logout(&self) -> Result<(), Error> {
        let mut guard = self.session.write().await;
        if let Some(session_id) = guard.clone() {
            self.do_logout(&session_id).await?;
            debug!(username = %self.username, "session closed");
            *guard = None;
        }
        Ok(())
    }

    /// Replace the current session with a fresh one, holding the write
    /// lock across the swap so no request observes a half-rotated state.
    ///
    /// A failed logout is logged and swallowed (the old session may have
    /// already expired server-side); a failed login is fatal and leaves
    /// the client logged out.
    pub async fn reauthenticate(&self) -> Result<(), Error> {
        let mut guard = self.session.write().await;
        if let Some(old) = guard.take() {
            if let Err(e) = self.do_logout(&old).await {
                warn!(error = %e, "stale session logout failed, continuing");
            }
        }
        let session_id = self.do_login().await?;
        debug!(username = %self.username, "session rotated");
        *guard = Some(session_id);
        Ok(())
    }

    /// Wire-level login. Returns the issued session id.
    async fn do_login(&self) -> Result<String, Error> {
        let payload = auth_login(
            &message_id(),
            &self.username,
            self.password.expose_secret(),
        );
        let (reply, _) = self.post(payload, self.timeout).await?;

        let result = extract::text(&reply, AUTH_RESULT);
        let session_id = extract::text(&reply, AUTH_SESSION);
        match (result.as_deref(), session_id) {
            (Some("0"), Some(id)) if !id.is_empty() => Ok(id),
            _ => {
                warn!(username = %self.username, code = ?result, "login rejected");
                Err(Error::Authentication {
                    username: self.username.clone(),
                    target: self.endpoint.to_string(),
                })
            }
        }
    }

    /// Wire-level logout of the given session id.
    async fn do_logout(&self, session_id: &str) -> Result<(), Error> {
        let payload = auth_logout(&message_id(), &self.username, session_id);
        let (reply, _) = self.post(payload, self.timeout).await?;

        match extract::text(&reply, AUTH_RESULT).as_deref() {
            Some("0") => Ok(()),
            code => {
                warn!(username = %self.username, ?code, "logout rejected");
                Err(Error::Deauthentication {
                    username: self.username.clone(),
                    target: self.endpoint.to_string(),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::message_id;

    #[test]
    fn message_ids_are_decimal_and_bounded() {
        for _ in 0..1000 {
            let id = message_id();
            let value: u64 = id.parse().expect("decimal id");
            assert!(value < (1 << 31));
        }
    }
}
