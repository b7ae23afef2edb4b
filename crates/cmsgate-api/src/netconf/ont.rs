// ONT operations
//
// Provisioning reads against the running datastore, the show-ont live
// view, PM bins, the quarantine pool, and admin-state edits. ONT
// sub-ports live in fixed slots: gigabit Ethernet ports in slot 3, POTS
// lines in slot 6.

use serde_json::Value;
use tracing::debug;

use crate::error::Error;
use crate::models::{OntGeneral, OntList, OntPerformance, OntPort, OntService, OntStatus, OntVoice};
use crate::netconf::client::{CONFIG_OBJECT, CmsClient};
use crate::netconf::envelope::{Children, EditOp, RpcHeader, Selector, get_config};
use crate::netconf::session::message_id;
use crate::netconf::extract;

/// Slot of the gigabit Ethernet sub-ports on every ONT model.
pub const ONT_ETH_SLOT: i64 = 3;

/// Slot of the POTS lines on every ONT model.
pub const ONT_POTS_SLOT: i64 = 6;

/// Vendor prefix of quarantine pool serial numbers.
const QUARANTINE_PREFIX: &str = "CXNK";

/// Attributes requested for the EthSvc child listing.
const ETH_SVC_ATTRS: &str = "admin descr tag-action bw-prof out-tag in-tag mcast-prof pon-cos \
    us-cir-override us-pir-override ds-pir-override hot-swap pppoe-force-discard";

fn ont_selector(ont_id: &str) -> Selector {
    Selector::new("Ont").key("ont", ont_id)
}

fn eth_port_selector(ont_id: &str, port_nr: i64) -> Selector {
    Selector::new("OntEthGe")
        .key("ont", ont_id)
        .key("ontslot", ONT_ETH_SLOT)
        .key("ontethge", port_nr)
}

impl CmsClient {
    /// Provisioned configuration of one ONT.
    pub async fn get_ont(&self, node_id: &str, ont_id: &str) -> Result<OntGeneral, Error> {
        debug!(node_id, ont_id, "fetching ont config");
        let obj = self.get_config_object(node_id, &ont_selector(ont_id)).await?;
        Ok(OntGeneral::from_object(node_id, ont_id, &obj))
    }

    /// Provisioned plus live state of one ONT via `show-ont`.
    pub async fn get_ont_status(&self, node_id: &str, ont_id: &str) -> Result<OntStatus, Error> {
        debug!(node_id, ont_id, "fetching ont status");
        let args = ont_selector(ont_id).wrapped("ont");
        let reply = self
            .action_reply(node_id, "show-ont", &args, self.timeout)
            .await?;
        Ok(OntStatus::from_action_reply(node_id, ont_id, &reply))
    }

    /// Current 1-day PM bin of one ONT.
    pub async fn get_ont_performance(
        &self,
        node_id: &str,
        ont_id: &str,
    ) -> Result<OntPerformance, Error> {
        debug!(node_id, ont_id, "fetching ont pm");
        let target = ont_selector(ont_id).wrapped("object");
        let bins = self
            .collect_bins(node_id, &target, "show-ont-pm", "1-day", 1)
            .await?;
        let bin = bins.into_iter().next().unwrap_or_default();
        Ok(OntPerformance::from_bin(node_id, ont_id, &bin))
    }

    /// Historical PM bins of one ONT. `interval` is a controller bin
    /// type (`1-day` or `15-min`); `count` bins are fetched with
    /// positional paging.
    pub async fn get_ont_errors(
        &self,
        node_id: &str,
        ont_id: &str,
        interval: &str,
        count: usize,
    ) -> Result<Vec<OntPerformance>, Error> {
        debug!(node_id, ont_id, interval, count, "fetching ont pm history");
        let target = ont_selector(ont_id).wrapped("object");
        let bins = self
            .collect_bins(node_id, &target, "show-ont-pm", interval, count)
            .await?;
        Ok(bins
            .iter()
            .map(|bin| OntPerformance::from_bin(node_id, ont_id, bin))
            .collect())
    }

    /// Zero all 1-day PM bins of one ONT.
    pub async fn clear_ont_errors(&self, node_id: &str, ont_id: &str) -> Result<(), Error> {
        debug!(node_id, ont_id, "clearing ont pm");
        let args = format!(
            "{}<bin-type>1-day</bin-type><start-bin>1</start-bin><count>8</count>",
            ont_selector(ont_id).wrapped("object")
        );
        self.action_ok(node_id, "clear-ont-pm", &args).await
    }

    /// Configuration of one gigabit Ethernet sub-port.
    pub async fn get_ont_port(
        &self,
        node_id: &str,
        ont_id: &str,
        port_nr: i64,
    ) -> Result<OntPort, Error> {
        debug!(node_id, ont_id, port_nr, "fetching ont port");
        let obj = self
            .get_config_object(node_id, &eth_port_selector(ont_id, port_nr))
            .await?;
        Ok(OntPort::from_object(node_id, ont_id, &obj))
    }

    /// Data service attached to one gigabit Ethernet sub-port (the first
    /// EthSvc child).
    pub async fn get_ont_port_service(
        &self,
        node_id: &str,
        ont_id: &str,
        port_nr: i64,
    ) -> Result<OntService, Error> {
        debug!(node_id, ont_id, port_nr, "fetching ont port service");
        let selector = eth_port_selector(ont_id, port_nr)
            .children(Children::new("EthSvc").attr_list(ETH_SVC_ATTRS));
        let obj = self.get_config_object(node_id, &selector).await?;
        let child = extract::list(&obj, "children.child")
            .into_iter()
            .next()
            .unwrap_or(Value::Null);
        Ok(OntService::from_child(node_id, ont_id, port_nr, &child))
    }

    /// Configuration of one POTS line.
    pub async fn get_ont_voice_service(
        &self,
        node_id: &str,
        ont_id: &str,
        port_nr: i64,
    ) -> Result<OntVoice, Error> {
        debug!(node_id, ont_id, port_nr, "fetching ont voice service");
        let selector = Selector::new("OntPots")
            .key("ont", ont_id)
            .key("ontslot", ONT_POTS_SLOT)
            .key("ontpots", port_nr);
        let obj = self.get_config_object(node_id, &selector).await?;
        Ok(OntVoice::from_object(node_id, ont_id, port_nr, &obj))
    }

    /// Ids of all ONTs provisioned on one GPON port, following the
    /// `<after>` continuation cursor across partial replies.
    pub async fn list_onts_on_gpon(
        &self,
        node_id: &str,
        shelf_nr: i64,
        card_nr: i64,
        gpon_nr: i64,
    ) -> Result<OntList, Error> {
        debug!(node_id, shelf_nr, card_nr, gpon_nr, "listing onts on gpon");
        let filter = format!(
            "<linked-pon><type>GponPort</type><id>\
             <shelf>{shelf_nr}</shelf><card>{card_nr}</card><gponport>{gpon_nr}</gponport>\
             </id></linked-pon>"
        );
        let session = self.session_id().await.unwrap_or_default();
        let unpack = format!("{CONFIG_OBJECT}.children.child");

        let items = self
            .collect(
                self.timeout,
                |cursor| {
                    let mid = message_id();
                    let selector = Selector::new("System").children(
                        Children::new("Ont")
                            .attr_filter(&filter)
                            .after(cursor.map(str::to_owned)),
                    );
                    get_config(
                        RpcHeader {
                            message_id: &mid,
                            node_id,
                            username: &self.username,
                            session_id: &session,
                        },
                        &selector.wrapped("object"),
                    )
                },
                &unpack,
                after_cursor,
            )
            .await?;

        let onts: Vec<String> = items
            .iter()
            .filter_map(|child| extract::text(child, "id.ont"))
            .collect();
        let count = onts.len();
        Ok(OntList { onts, count })
    }

    /// Reboot one ONT. `force` reboots even with active subscribers.
    pub async fn reset_ont(&self, node_id: &str, ont_id: &str, force: bool) -> Result<(), Error> {
        debug!(node_id, ont_id, force, "resetting ont");
        let args = format!(
            "{}<force>{}</force>",
            ont_selector(ont_id).wrapped("object"),
            if force { "true" } else { "false" }
        );
        self.action_ok(node_id, "reset-ont", &args).await
    }

    /// Add an ONT serial to the quarantine pool.
    pub async fn quarantine_ont(&self, node_id: &str, serial_nr: &str) -> Result<(), Error> {
        debug!(node_id, serial_nr, "quarantining ont");
        let selector =
            Selector::new("QuarOnt").key("quaront", format!("{QUARANTINE_PREFIX}{serial_nr}"));
        self.edit(node_id, &selector, EditOp::Create, &[]).await
    }

    /// Remove an ONT serial from the quarantine pool.
    pub async fn release_ont(&self, node_id: &str, serial_nr: &str) -> Result<(), Error> {
        debug!(node_id, serial_nr, "releasing ont");
        let selector =
            Selector::new("QuarOnt").key("quaront", format!("{QUARANTINE_PREFIX}{serial_nr}"));
        self.edit(node_id, &selector, EditOp::Delete, &[]).await
    }

    pub async fn enable_ont(&self, node_id: &str, ont_id: &str) -> Result<(), Error> {
        debug!(node_id, ont_id, "enabling ont");
        self.edit(
            node_id,
            &ont_selector(ont_id),
            EditOp::Merge,
            &[("admin", "enabled")],
        )
        .await
    }

    pub async fn disable_ont(&self, node_id: &str, ont_id: &str) -> Result<(), Error> {
        debug!(node_id, ont_id, "disabling ont");
        self.edit(
            node_id,
            &ont_selector(ont_id),
            EditOp::Merge,
            &[("admin", "disabled")],
        )
        .await
    }

    pub async fn enable_ont_port(
        &self,
        node_id: &str,
        ont_id: &str,
        port_nr: i64,
    ) -> Result<(), Error> {
        debug!(node_id, ont_id, port_nr, "enabling ont port");
        self.edit(
            node_id,
            &eth_port_selector(ont_id, port_nr),
            EditOp::Merge,
            &[("admin", "enabled")],
        )
        .await
    }

    pub async fn disable_ont_port(
        &self,
        node_id: &str,
        ont_id: &str,
        port_nr: i64,
    ) -> Result<(), Error> {
        debug!(node_id, ont_id, port_nr, "disabling ont port");
        self.edit(
            node_id,
            &eth_port_selector(ont_id, port_nr),
            EditOp::Merge,
            &[("admin", "disabled")],
        )
        .await
    }
}

/// `<after>` cursor naming the last ONT received, in reply id order.
fn after_cursor(items: &[Value]) -> Option<String> {
    let last = items.last()?;
    let Value::Object(id) = extract::get(last, "id")? else {
        return None;
    };
    let mut inner = String::new();
    for (key, value) in id {
        if let Value::String(s) = value {
            inner.push_str(&format!("<{key}>{s}</{key}>"));
        }
    }
    if inner.is_empty() {
        return None;
    }
    Some(format!("<after><type>Ont</type><id>{inner}</id></after>"))
}

#[cfg(test)]
mod tests {
    use super::after_cursor;
    use serde_json::json;

    #[test]
    fn cursor_names_the_last_ont_received() {
        let items = vec![json!({"id": {"ont": "1"}}), json!({"id": {"ont": "63"}})];
        assert_eq!(
            after_cursor(&items).as_deref(),
            Some("<after><type>Ont</type><id><ont>63</ont></id></after>")
        );
    }

    #[test]
    fn items_without_ids_yield_no_cursor() {
        assert_eq!(after_cursor(&[]), None);
        assert_eq!(after_cursor(&[json!({"serno": "1"})]), None);
    }
}
