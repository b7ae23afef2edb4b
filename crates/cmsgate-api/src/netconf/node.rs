// Node-scoped operations: active alarms and DHCP lease management.
//
// Both listings page with action-specific cursors: alarms resume from a
// reconstructed object selector plus the last alarm type, leases resume
// from the last MAC seen.

use tracing::debug;

use crate::error::Error;
use crate::models::{DhcpLease, NodeAlarm};
use crate::netconf::client::{ACTION_REPLY, CmsClient};
use crate::netconf::envelope::{RpcHeader, action};
use crate::netconf::extract;
use crate::netconf::session::message_id;

impl CmsClient {
    /// All active alarms on one node, following the `start-instance` /
    /// `after-alarm` continuation cursor across partial replies.
    pub async fn get_node_alarms(&self, node_id: &str) -> Result<Vec<NodeAlarm>, Error> {
        debug!(node_id, "fetching node alarms");
        let session = self.session_id().await.unwrap_or_default();
        let unpack = format!("{ACTION_REPLY}.alarm");

        let items = self
            .collect(
                self.timeout,
                |cursor| {
                    let mid = message_id();
                    action(
                        RpcHeader {
                            message_id: &mid,
                            node_id,
                            username: &self.username,
                            session_id: &session,
                        },
                        "show-alarms",
                        cursor.unwrap_or(""),
                    )
                },
                &unpack,
                |items| {
                    items
                        .last()
                        .and_then(|last| NodeAlarm::from_element(last).cursor())
                },
            )
            .await?;

        Ok(items.iter().map(NodeAlarm::from_element).collect())
    }

    /// All DHCP leases known on one node, paged by the last MAC seen.
    pub async fn get_dhcp_leases(&self, node_id: &str) -> Result<Vec<DhcpLease>, Error> {
        debug!(node_id, "fetching dhcp leases");
        let session = self.session_id().await.unwrap_or_default();
        let unpack = format!("{ACTION_REPLY}.dhcp-lease");

        let items = self
            .collect(
                self.timeout,
                |cursor| {
                    let mid = message_id();
                    action(
                        RpcHeader {
                            message_id: &mid,
                            node_id,
                            username: &self.username,
                            session_id: &session,
                        },
                        "show-dhcp-leases",
                        cursor.unwrap_or(""),
                    )
                },
                &unpack,
                |items| {
                    let mac = extract::text(items.last()?, "mac")?;
                    Some(format!("<start-mac>{mac}</start-mac>"))
                },
            )
            .await?;

        Ok(items.iter().map(DhcpLease::from_element).collect())
    }

    /// Drop one lease by MAC address.
    pub async fn clear_dhcp_lease(&self, node_id: &str, mac: &str) -> Result<(), Error> {
        debug!(node_id, mac, "clearing dhcp lease");
        let args = format!("<mac>{mac}</mac>");
        self.action_ok(node_id, "clear-dhcp-lease", &args).await
    }
}
