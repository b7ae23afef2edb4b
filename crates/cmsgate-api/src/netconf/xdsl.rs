// xDSL operations
//
// DSL port and bridged Ethernet interface reads, live line status, PM
// bins, the copper line test, and admin-state edits. The Ethernet
// interface paired with DSL port N has ethintf id N + 200; enabling a
// DSL port uses `enabled-no-alarms` so an unsynced line does not raise
// a standing alarm.

use std::time::Duration;

use tracing::debug;

use crate::error::Error;
use crate::models::{ModemInterface, ModemPerformance, ModemPort, ModemStatus, XdslLineTest};
use crate::netconf::client::CmsClient;
use crate::netconf::envelope::{EditOp, Selector};

/// Offset between a DSL port id and its bridged Ethernet interface id.
const ETH_INTF_OFFSET: i64 = 200;

/// The copper line test takes tens of seconds at the controller.
const LINE_TEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Live-status attributes requested from the operational datastore.
const DSL_STATUS_ATTRS: &str = "op-stat derived-states op mode act init data-mode op-time ahc \
    retrain-count last-templ act-vec-mode vec-state oper-status power-save-timer act-psd-mask \
    us-rate us-delay us-inp us-snrm us-la us-att-rate us-atp us-atmptm us-enh-inp us-rtx-etr \
    us-rtx-inp-shine us-rtx-inp-rein us-rtx-delay ds-rate ds-delay ds-inp ds-snrm ds-atten \
    ds-att-rate ds-atp ds-atmptm ds-enh-inp ds-rtx-etr ds-rtx-inp-shine ds-rtx-inp-rein \
    ds-rtx-delay";

fn dsl_port_selector(shelf_nr: i64, card_nr: i64, interface_id: i64) -> Selector {
    Selector::new("DslPort")
        .key("shelf", shelf_nr)
        .key("card", card_nr)
        .key("dslport", interface_id)
}

fn bond_selector(shelf_nr: i64, card_nr: i64, interface_id: i64) -> Selector {
    Selector::new("DslBondIntf")
        .key("shelf", shelf_nr)
        .key("card", card_nr)
        .key("dslbondintf", interface_id)
}

impl CmsClient {
    /// Provisioned configuration of one DSL port.
    pub async fn get_xdsl_port(
        &self,
        node_id: &str,
        shelf_nr: i64,
        card_nr: i64,
        interface_id: i64,
    ) -> Result<ModemPort, Error> {
        debug!(node_id, shelf_nr, card_nr, interface_id, "fetching dsl port");
        let obj = self
            .get_config_object(node_id, &dsl_port_selector(shelf_nr, card_nr, interface_id))
            .await?;
        Ok(ModemPort::from_object(
            node_id,
            shelf_nr,
            card_nr,
            interface_id,
            &obj,
        ))
    }

    /// The Ethernet interface bridged to one DSL port.
    pub async fn get_xdsl_interface(
        &self,
        node_id: &str,
        shelf_nr: i64,
        card_nr: i64,
        interface_id: i64,
    ) -> Result<ModemInterface, Error> {
        debug!(node_id, shelf_nr, card_nr, interface_id, "fetching dsl eth interface");
        let selector = Selector::new("EthIntf")
            .key("shelf", shelf_nr)
            .key("card", card_nr)
            .key("ethintf", interface_id + ETH_INTF_OFFSET);
        let obj = self.get_config_object(node_id, &selector).await?;
        Ok(ModemInterface::from_object(
            node_id,
            shelf_nr,
            card_nr,
            interface_id,
            &obj,
        ))
    }

    /// Live line status of one DSL port from the operational datastore.
    pub async fn get_xdsl_status(
        &self,
        node_id: &str,
        shelf_nr: i64,
        card_nr: i64,
        interface_id: i64,
    ) -> Result<ModemStatus, Error> {
        debug!(node_id, shelf_nr, card_nr, interface_id, "fetching dsl status");
        let selector =
            dsl_port_selector(shelf_nr, card_nr, interface_id).attr_list(DSL_STATUS_ATTRS);
        let obj = self.get_live_object(node_id, &selector).await?;
        Ok(ModemStatus::from_object(
            node_id,
            shelf_nr,
            card_nr,
            interface_id,
            &obj,
        ))
    }

    /// Current 1-day PM bin of one DSL port.
    pub async fn get_xdsl_performance(
        &self,
        node_id: &str,
        shelf_nr: i64,
        card_nr: i64,
        interface_id: i64,
    ) -> Result<ModemPerformance, Error> {
        debug!(node_id, shelf_nr, card_nr, interface_id, "fetching dsl pm");
        let target = dsl_port_selector(shelf_nr, card_nr, interface_id).wrapped("object");
        let bins = self
            .collect_bins(node_id, &target, "show-dsl-pm", "1-day", 1)
            .await?;
        let bin = bins.into_iter().next().unwrap_or_default();
        Ok(ModemPerformance::from_bin(
            node_id,
            shelf_nr,
            card_nr,
            interface_id,
            &bin,
        ))
    }

    /// Run the copper loop test against the POTS line of one port. Slow:
    /// uses a dedicated long timeout instead of the client default.
    pub async fn run_xdsl_line_test(
        &self,
        node_id: &str,
        shelf_nr: i64,
        card_nr: i64,
        interface_id: i64,
    ) -> Result<XdslLineTest, Error> {
        debug!(node_id, shelf_nr, card_nr, interface_id, "running line test");
        let args = Selector::new("Pots")
            .key("shelf", shelf_nr)
            .key("card", card_nr)
            .key("pots", interface_id)
            .wrapped("pots");
        let reply = self
            .action_reply(node_id, "test-pots-svc", &args, LINE_TEST_TIMEOUT)
            .await?;
        Ok(XdslLineTest::from_action_reply(
            node_id,
            shelf_nr,
            card_nr,
            interface_id,
            &reply,
        ))
    }

    pub async fn enable_xdsl_port(
        &self,
        node_id: &str,
        shelf_nr: i64,
        card_nr: i64,
        interface_id: i64,
    ) -> Result<(), Error> {
        debug!(node_id, shelf_nr, card_nr, interface_id, "enabling dsl port");
        self.edit(
            node_id,
            &dsl_port_selector(shelf_nr, card_nr, interface_id),
            EditOp::Merge,
            &[("admin", "enabled-no-alarms")],
        )
        .await
    }

    pub async fn disable_xdsl_port(
        &self,
        node_id: &str,
        shelf_nr: i64,
        card_nr: i64,
        interface_id: i64,
    ) -> Result<(), Error> {
        debug!(node_id, shelf_nr, card_nr, interface_id, "disabling dsl port");
        self.edit(
            node_id,
            &dsl_port_selector(shelf_nr, card_nr, interface_id),
            EditOp::Merge,
            &[("admin", "disabled")],
        )
        .await
    }

    pub async fn enable_xdsl_bonding_group(
        &self,
        node_id: &str,
        shelf_nr: i64,
        card_nr: i64,
        interface_id: i64,
    ) -> Result<(), Error> {
        debug!(node_id, shelf_nr, card_nr, interface_id, "enabling dsl bonding group");
        self.edit(
            node_id,
            &bond_selector(shelf_nr, card_nr, interface_id),
            EditOp::Merge,
            &[("admin", "enabled-no-alarms")],
        )
        .await
    }

    pub async fn disable_xdsl_bonding_group(
        &self,
        node_id: &str,
        shelf_nr: i64,
        card_nr: i64,
        interface_id: i64,
    ) -> Result<(), Error> {
        debug!(node_id, shelf_nr, card_nr, interface_id, "disabling dsl bonding group");
        self.edit(
            node_id,
            &bond_selector(shelf_nr, card_nr, interface_id),
            EditOp::Merge,
            &[("admin", "disabled")],
        )
        .await
    }
}
