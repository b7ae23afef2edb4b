// CMS northbound HTTP client
//
// Wraps `reqwest::Client` with the protocol's fixed endpoint path,
// content-type quirks, reply-tree parsing, and `<ok/>` acknowledgement
// checks. All operation modules (ont, xdsl, node, session) are
// implemented as inherent methods via separate files to keep this module
// focused on transport mechanics.

use std::time::Duration;

use secrecy::SecretString;
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::{debug, warn};
use url::Url;

use crate::error::Error;
use crate::netconf::envelope::{EditOp, RpcHeader, Selector, edit_config, get_config, get_live};
use crate::netconf::session::message_id;
use crate::netconf::{extract, tree};

/// TCP port of the northbound interface. Fixed by the controller.
const NBI_PORT: u16 = 18080;

/// HTTP path of the NETCONF-over-SOAP endpoint.
const NBI_PATH: &str = "/cmsexc/ex/netconf";

/// The controller declares this charset on both sides of the exchange.
const CONTENT_TYPE: &str = "text/xml;charset=ISO8859-1";

/// Path from the document root to the single object of a config reply.
pub(crate) const CONFIG_OBJECT: &str = "soapenv:Envelope.soapenv:Body.rpc-reply.data.top.object";

/// Path from the document root to an action's reply body.
pub(crate) const ACTION_REPLY: &str = "soapenv:Envelope.soapenv:Body.rpc-reply.action-reply";

const RPC_REPLY_OK: &str = "soapenv:Envelope.soapenv:Body.rpc-reply.ok";

/// Client for one CMS controller.
///
/// Holds the credentials and the current session id; a session is
/// established with [`login`](CmsClient::login) and refreshed with
/// [`reauthenticate`](CmsClient::reauthenticate). Requests sent without
/// a live session fail fast at the controller -- the client never logs
/// in implicitly.
pub struct CmsClient {
    pub(crate) http: reqwest::Client,
    pub(crate) endpoint: Url,
    pub(crate) username: String,
    pub(crate) password: SecretString,
    pub(crate) timeout: Duration,
    pub(crate) session: RwLock<Option<String>>,
}

impl CmsClient {
    /// Create a client for the controller at `ip`, using the fixed
    /// northbound port and path.
    pub fn new(
        ip: &str,
        username: &str,
        password: SecretString,
        timeout: Duration,
    ) -> Result<Self, Error> {
        let endpoint = Url::parse(&format!("http://{ip}:{NBI_PORT}{NBI_PATH}")).map_err(|e| {
            warn!(ip, error = %e, "invalid controller address");
            Error::Communication { target: ip.to_owned() }
        })?;
        Self::with_endpoint(endpoint, username, password, timeout)
    }

    /// Create a client against an explicit endpoint URL. Used by tests
    /// to point at a local mock server.
    pub fn with_endpoint(
        endpoint: Url,
        username: &str,
        password: SecretString,
        timeout: Duration,
    ) -> Result<Self, Error> {
        let http = reqwest::Client::builder()
            .user_agent(format!("CMS_NBI_CONNECT-{username}"))
            .build()
            .map_err(|e| {
                warn!(error = %e, "failed to build HTTP client");
                Error::Communication {
                    target: endpoint.to_string(),
                }
            })?;
        Ok(Self {
            http,
            endpoint,
            username: username.to_owned(),
            password,
            timeout,
            session: RwLock::new(None),
        })
    }

    /// The controller endpoint this client talks to.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// The username requests are issued under.
    pub fn username(&self) -> &str {
        &self.username
    }

    /// The current session id, if a login has succeeded.
    pub async fn session_id(&self) -> Option<String> {
        self.session.read().await.clone()
    }

    pub(crate) fn comm_error(&self) -> Error {
        Error::Communication {
            target: self.endpoint.to_string(),
        }
    }

    /// Fresh message id plus the current session id (empty when logged
    /// out, which the controller rejects -- the fail-fast path).
    pub(crate) async fn header(&self) -> (String, String) {
        let session = self.session.read().await.clone().unwrap_or_default();
        (message_id(), session)
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// POST one envelope and parse the reply. Returns the parsed tree
    /// plus whether the raw body carried the partial-result marker.
    pub(crate) async fn post(
        &self,
        payload: String,
        timeout: Duration,
    ) -> Result<(Value, bool), Error> {
        debug!("POST {}", self.endpoint);

        let resp = self
            .http
            .post(self.endpoint.clone())
            .timeout(timeout)
            .header(reqwest::header::CONTENT_TYPE, CONTENT_TYPE)
            .body(payload)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "controller request failed");
                self.comm_error()
            })?;

        let raw = resp.text().await.map_err(|e| {
            warn!(error = %e, "failed to read controller reply");
            self.comm_error()
        })?;

        let more = tree::detect_more(&raw);
        let parsed = tree::parse(&raw).map_err(|e| {
            warn!(error = %e, "unparsable controller reply");
            self.comm_error()
        })?;
        Ok((parsed, more))
    }

    /// Fail unless the reply acknowledges the operation with `<ok/>`.
    pub(crate) fn require_ok(&self, reply: &Value) -> Result<(), Error> {
        if extract::get(reply, RPC_REPLY_OK).is_some() {
            Ok(())
        } else {
            warn!("controller reply missing ok acknowledgement");
            Err(self.comm_error())
        }
    }

    // ── Operation helpers ────────────────────────────────────────────

    /// `get-config` for one object; returns the object subtree.
    pub(crate) async fn get_config_object(
        &self,
        node_id: &str,
        selector: &Selector,
    ) -> Result<Value, Error> {
        let (mid, session) = self.header().await;
        let payload = get_config(
            RpcHeader {
                message_id: &mid,
                node_id,
                username: &self.username,
                session_id: &session,
            },
            &selector.wrapped("object"),
        );
        let (reply, _) = self.post(payload, self.timeout).await?;
        Ok(extract::get(&reply, CONFIG_OBJECT).cloned().unwrap_or(Value::Null))
    }

    /// Live-state `get` for one object; returns the object subtree.
    pub(crate) async fn get_live_object(
        &self,
        node_id: &str,
        selector: &Selector,
    ) -> Result<Value, Error> {
        let (mid, session) = self.header().await;
        let payload = get_live(
            RpcHeader {
                message_id: &mid,
                node_id,
                username: &self.username,
                session_id: &session,
            },
            &selector.wrapped("object"),
        );
        let (reply, _) = self.post(payload, self.timeout).await?;
        Ok(extract::get(&reply, CONFIG_OBJECT).cloned().unwrap_or(Value::Null))
    }

    /// Run an action and return its `action-reply` subtree.
    pub(crate) async fn action_reply(
        &self,
        node_id: &str,
        action_type: &str,
        args: &str,
        timeout: Duration,
    ) -> Result<Value, Error> {
        let (mid, session) = self.header().await;
        let payload = crate::netconf::envelope::action(
            RpcHeader {
                message_id: &mid,
                node_id,
                username: &self.username,
                session_id: &session,
            },
            action_type,
            args,
        );
        let (reply, _) = self.post(payload, timeout).await?;
        Ok(extract::get(&reply, ACTION_REPLY).cloned().unwrap_or(Value::Null))
    }

    /// Run an action that only acknowledges (clear-pm, clear-lease).
    pub(crate) async fn action_ok(
        &self,
        node_id: &str,
        action_type: &str,
        args: &str,
    ) -> Result<(), Error> {
        let (mid, session) = self.header().await;
        let payload = crate::netconf::envelope::action(
            RpcHeader {
                message_id: &mid,
                node_id,
                username: &self.username,
                session_id: &session,
            },
            action_type,
            args,
        );
        let (reply, _) = self.post(payload, self.timeout).await?;
        self.require_ok(&reply)
    }

    /// `edit-config` on one object; fails without an `<ok/>` ack.
    pub(crate) async fn edit(
        &self,
        node_id: &str,
        selector: &Selector,
        op: EditOp,
        attrs: &[(&str, &str)],
    ) -> Result<(), Error> {
        let (mid, session) = self.header().await;
        let payload = edit_config(
            RpcHeader {
                message_id: &mid,
                node_id,
                username: &self.username,
                session_id: &session,
            },
            selector,
            op,
            attrs,
        );
        let (reply, _) = self.post(payload, self.timeout).await?;
        self.require_ok(&reply)
    }
}
