// ONT records: provisioning config, live status, PM counters, sub-ports.

use serde::Serialize;
use serde_json::Value;

use crate::netconf::extract::{boolean, float, int, text};
use crate::netconf::paging::PmBin;

/// Provisioned ONT attributes from the running datastore.
#[derive(Debug, Clone, Serialize)]
pub struct OntGeneral {
    pub parent_node: String,
    pub id: String,
    pub admin_state: Option<String>,
    pub model_nr: Option<String>,
    pub serial_nr: Option<String>,
    pub registration_id: Option<String>,
    pub subscriber_id: Option<String>,
    pub description: Option<String>,
    pub vendor: Option<String>,
    pub shelf: Option<i64>,
    pub card: Option<i64>,
    pub port: Option<i64>,
    pub pwe3prof: Option<String>,
    pub low_rx_opt_pwr_ne_thresh: Option<f64>,
    pub high_rx_opt_pwr_ne_thresh: Option<f64>,
    pub us_sdber_rate: Option<f64>,
    pub low_rx_opt_pwr_fe_thresh: Option<f64>,
    pub high_rx_opt_pwr_fe_thresh: Option<f64>,
    pub low_tx_opt_pwr_thresh: Option<f64>,
    pub high_tx_opt_pwr_thresh: Option<f64>,
    pub low_laser_bias_thresh: Option<f64>,
    pub high_laser_bias_thresh: Option<f64>,
    pub low_line_pwr_feed_thresh: Option<f64>,
    pub high_line_pwr_feed_thresh: Option<f64>,
    pub low_ont_temp_thresh: Option<f64>,
    pub high_ont_temp_thresh: Option<f64>,
    pub battery_present: Option<bool>,
    pub pse_max_power_budget: Option<i64>,
    pub poe_class_control: Option<String>,
    pub ont_port_color: Option<i64>,
}

impl OntGeneral {
    /// Build from an ONT `object` subtree of a get-config reply.
    pub fn from_object(node_id: &str, ont_id: &str, obj: &Value) -> Self {
        Self {
            parent_node: node_id.to_owned(),
            id: ont_id.to_owned(),
            admin_state: text(obj, "admin"),
            model_nr: text(obj, "ontprof.id.ontprof.@name"),
            serial_nr: text(obj, "serno"),
            registration_id: text(obj, "reg-id"),
            subscriber_id: text(obj, "subscr-id"),
            description: text(obj, "descr"),
            vendor: text(obj, "vendor"),
            shelf: int(obj, "linked-pon.id.shelf"),
            card: int(obj, "linked-pon.id.card"),
            port: int(obj, "linked-pon.id.gponport"),
            pwe3prof: text(obj, "pwe3prof"),
            low_rx_opt_pwr_ne_thresh: float(obj, "low-rx-opt-pwr-ne-thresh"),
            high_rx_opt_pwr_ne_thresh: float(obj, "high-rx-opt-pwr-ne-thresh"),
            us_sdber_rate: float(obj, "us-sdber-rate"),
            low_rx_opt_pwr_fe_thresh: float(obj, "low-rx-opt-pwr-fe-thresh"),
            high_rx_opt_pwr_fe_thresh: float(obj, "high-rx-opt-pwr-fe-thresh"),
            low_tx_opt_pwr_thresh: float(obj, "low-tx-opt-pwr-thresh"),
            high_tx_opt_pwr_thresh: float(obj, "high-tx-opt-pwr-thresh"),
            low_laser_bias_thresh: float(obj, "low-laser-bias-thresh"),
            high_laser_bias_thresh: float(obj, "high-laser-bias-thresh"),
            low_line_pwr_feed_thresh: float(obj, "low-line-pwr-feed-thresh"),
            high_line_pwr_feed_thresh: float(obj, "high-line-pwr-feed-thresh"),
            low_ont_temp_thresh: float(obj, "low-ont-temp-thresh"),
            high_ont_temp_thresh: float(obj, "high-ont-temp-thresh"),
            battery_present: boolean(obj, "battery-present"),
            pse_max_power_budget: int(obj, "pse-max-power-budget"),
            poe_class_control: text(obj, "poe-class-control"),
            ont_port_color: int(obj, "ont-port-color"),
        }
    }
}

/// Provisioned plus live ONT state, from the `show-ont` action. The
/// action reply embeds both a get-config view and a live get view.
#[derive(Debug, Clone, Serialize)]
pub struct OntStatus {
    #[serde(flatten)]
    pub general: OntGeneral,
    pub operational_status: Option<String>,
    pub critical_alarm_count: Option<i64>,
    pub major_alarm_count: Option<i64>,
    pub minor_alarm_count: Option<i64>,
    pub warning_alarm_count: Option<i64>,
    pub info_alarm_count: Option<i64>,
    pub derived_states: Option<String>,
    pub clei: Option<String>,
    pub product_code: Option<String>,
    pub mfg_serial_number: Option<String>,
    pub uptime: Option<i64>,
    pub rx_opt_signal_level: Option<f64>,
    pub tx_opt_signal_level: Option<f64>,
    pub loop_length: Option<i64>,
    pub fe_opt_signal_level: Option<f64>,
    pub ds_sdber_rate: Option<f64>,
    pub current_software_version: Option<String>,
    pub alternate_software_version: Option<String>,
    pub current_committed: Option<bool>,
    pub rg_config_file_version: Option<String>,
    pub voip_config_file_version: Option<String>,
    pub current_customer_version: Option<String>,
    pub alternate_customer_version: Option<String>,
    pub onu_mac_address: Option<String>,
    pub mta_mac_address: Option<String>,
    pub response_time: Option<i64>,
    pub pse_available_power_budget: Option<f64>,
    pub pse_aggregate_output_power: Option<f64>,
    pub pse_management_capability: Option<String>,
    pub option: Option<i64>,
}

impl OntStatus {
    /// Build from a `show-ont` action-reply subtree.
    pub fn from_action_reply(node_id: &str, ont_id: &str, reply: &Value) -> Self {
        let config = crate::netconf::extract::get(reply, "match.get-config.object")
            .cloned()
            .unwrap_or(Value::Null);
        let live = crate::netconf::extract::get(reply, "match.get.object")
            .cloned()
            .unwrap_or(Value::Null);
        Self {
            general: OntGeneral::from_object(node_id, ont_id, &config),
            operational_status: text(&live, "op-stat"),
            critical_alarm_count: int(&live, "crit"),
            major_alarm_count: int(&live, "maj"),
            minor_alarm_count: int(&live, "min"),
            warning_alarm_count: int(&live, "warn"),
            info_alarm_count: int(&live, "info"),
            derived_states: text(&live, "derived-states"),
            clei: text(&live, "clei"),
            product_code: text(&live, "product-code"),
            mfg_serial_number: text(&live, "mfg-serno"),
            uptime: int(&live, "uptime"),
            rx_opt_signal_level: float(&live, "opt-sig-lvl"),
            tx_opt_signal_level: float(&live, "tx-opt-lvl"),
            loop_length: int(&live, "range-length"),
            fe_opt_signal_level: float(&live, "fe-opt-lvl"),
            ds_sdber_rate: float(&live, "cur-ds-sdber-rate"),
            current_software_version: text(&live, "curr-sw-vers"),
            alternate_software_version: text(&live, "alt-sw-vers"),
            current_committed: boolean(&live, "curr-committed"),
            rg_config_file_version: text(&live, "rg-file-vers"),
            voip_config_file_version: text(&live, "voip-file-vers"),
            current_customer_version: text(&live, "curr-cust-vers"),
            alternate_customer_version: text(&live, "alt-cust-vers"),
            onu_mac_address: text(&live, "onu-mac"),
            mta_mac_address: text(&live, "mta-mac"),
            response_time: int(&live, "response-time"),
            pse_available_power_budget: float(&live, "pse-available-power-budget"),
            pse_aggregate_output_power: float(&live, "pse-aggregate-output-power"),
            pse_management_capability: text(&live, "pse-mgmt-capb"),
            option: int(&live, "option"),
        }
    }
}

/// One PM bin of BIP/burst counters from `show-ont-pm`.
#[derive(Debug, Clone, Serialize)]
pub struct OntPerformance {
    pub parent_node: String,
    pub id: String,
    pub bip_errors_up: Option<i64>,
    pub bip_errors_down: Option<i64>,
    pub bip_errored_seconds_up: Option<i64>,
    pub bip_errored_seconds_down: Option<i64>,
    pub bip_severely_errored_seconds_up: Option<i64>,
    pub bip_severely_errored_seconds_down: Option<i64>,
    pub bip_unavailable_seconds_up: Option<i64>,
    pub bip_unavailable_seconds_down: Option<i64>,
    pub missed_bursts_up: Option<i64>,
    pub missed_bursts_seconds: Option<i64>,
    pub gem_hec_errors_up: Option<i64>,
}

fn bin_int(bin: &PmBin, key: &str) -> Option<i64> {
    bin.get(key)?.parse().ok()
}

impl OntPerformance {
    pub fn from_bin(node_id: &str, ont_id: &str, bin: &PmBin) -> Self {
        Self {
            parent_node: node_id.to_owned(),
            id: ont_id.to_owned(),
            bip_errors_up: bin_int(bin, "bip-err-up"),
            bip_errors_down: bin_int(bin, "bip-err-down"),
            bip_errored_seconds_up: bin_int(bin, "bip-err-sec-up"),
            bip_errored_seconds_down: bin_int(bin, "bip-err-sec-down"),
            bip_severely_errored_seconds_up: bin_int(bin, "bip-sev-err-sec-up"),
            bip_severely_errored_seconds_down: bin_int(bin, "bip-sev-err-sec-down"),
            bip_unavailable_seconds_up: bin_int(bin, "bip-unavail-sec-up"),
            bip_unavailable_seconds_down: bin_int(bin, "bip-unavail-sec-down"),
            missed_bursts_up: bin_int(bin, "miss-burst-up"),
            missed_bursts_seconds: bin_int(bin, "missed-burst-sec"),
            gem_hec_errors_up: bin_int(bin, "gem-hec-err-up"),
        }
    }
}

/// One gigabit Ethernet sub-port of an ONT.
#[derive(Debug, Clone, Serialize)]
pub struct OntPort {
    pub parent_node: String,
    pub id: String,
    pub slot: Option<i64>,
    pub port_number: Option<i64>,
    pub admin: Option<String>,
    pub subscriber_id: Option<String>,
    pub description: Option<String>,
    pub speed: Option<String>,
    pub duplex: Option<String>,
    pub disable_on_battery: Option<bool>,
    pub link_oam_events: Option<bool>,
    pub accept_link_oam: Option<bool>,
    pub accept_link_oam_loopbacks: Option<bool>,
    pub intf: Option<String>,
    pub dhcp_limit_override: Option<String>,
    pub downstream_bandwidth_profile: Option<String>,
    pub force_dot1x: Option<String>,
    pub role: Option<String>,
    pub policing: Option<String>,
    pub poe_power_priority: Option<String>,
    pub poe_class_control: Option<String>,
    pub voice_policy_profile: Option<String>,
    pub ppte_power_control: Option<bool>,
    pub ont_port_color: Option<String>,
}

impl OntPort {
    pub fn from_object(node_id: &str, ont_id: &str, obj: &Value) -> Self {
        Self {
            parent_node: node_id.to_owned(),
            id: ont_id.to_owned(),
            slot: int(obj, "id.ontslot"),
            port_number: int(obj, "id.ontethge"),
            admin: text(obj, "admin"),
            subscriber_id: text(obj, "subscr-id"),
            description: text(obj, "descr"),
            speed: text(obj, "speed"),
            duplex: text(obj, "duplex"),
            disable_on_battery: boolean(obj, "disable-on-batt"),
            link_oam_events: boolean(obj, "link-oam-events"),
            accept_link_oam: boolean(obj, "accept-link-oam"),
            accept_link_oam_loopbacks: boolean(obj, "accept-link-oam-loopbacks"),
            intf: text(obj, "intf"),
            dhcp_limit_override: text(obj, "dhcp-limit-override"),
            downstream_bandwidth_profile: text(obj, "ds-bw-prof"),
            force_dot1x: text(obj, "force-dot1x"),
            role: text(obj, "role"),
            policing: text(obj, "policing"),
            poe_power_priority: text(obj, "poe-power-priority"),
            poe_class_control: text(obj, "poe-class-control"),
            voice_policy_profile: text(obj, "voice-policy-profile"),
            ppte_power_control: boolean(obj, "ppte-power-control"),
            ont_port_color: text(obj, "ont-port-color"),
        }
    }
}

/// Data service attached to an ONT Ethernet sub-port (first EthSvc child).
#[derive(Debug, Clone, Serialize)]
pub struct OntService {
    pub parent_node: String,
    pub id: String,
    pub port_number: i64,
    pub admin: Option<String>,
    pub description: Option<String>,
    pub service_name: Option<String>,
    pub service_text: Option<String>,
    pub bandwidth_name: Option<String>,
    pub bandwidth_text: Option<String>,
    pub bandwidth_id: Option<String>,
    pub out_tag: Option<String>,
    pub in_tag: Option<String>,
    pub mcast_profile: Option<String>,
    pub pon_cos: Option<String>,
    pub upstream_cir_override: Option<String>,
    pub upstream_pir_override: Option<String>,
    pub downstream_pir_override: Option<String>,
    pub hot_swap: Option<bool>,
    pub pppoe_force_discard: Option<bool>,
}

impl OntService {
    /// Build from one `child` element of the EthSvc listing.
    pub fn from_child(node_id: &str, ont_id: &str, port_nr: i64, child: &Value) -> Self {
        Self {
            parent_node: node_id.to_owned(),
            id: ont_id.to_owned(),
            port_number: port_nr,
            admin: text(child, "admin"),
            description: text(child, "descr"),
            service_name: text(child, "id.ethsvc.@name"),
            service_text: text(child, "id.ethsvc.#text"),
            bandwidth_name: text(child, "bw-prof.id.bwprof.@name"),
            bandwidth_text: text(child, "bw-prof.id.bwprof.#text"),
            bandwidth_id: text(child, "bw-prof.id.bwprof.@localId"),
            out_tag: text(child, "out-tag"),
            in_tag: text(child, "in-tag"),
            mcast_profile: text(child, "mcast-prof"),
            pon_cos: text(child, "pon-cos"),
            upstream_cir_override: text(child, "us-cir-override"),
            upstream_pir_override: text(child, "us-pir-override"),
            downstream_pir_override: text(child, "ds-pir-override"),
            hot_swap: boolean(child, "hot-swap"),
            pppoe_force_discard: boolean(child, "pppoe-force-discard"),
        }
    }
}

/// POTS voice line on an ONT.
#[derive(Debug, Clone, Serialize)]
pub struct OntVoice {
    pub parent_node: String,
    pub id: String,
    pub port_number: i64,
    pub admin: Option<String>,
    pub subscriber_id: Option<String>,
    pub description: Option<String>,
    pub impedance: Option<String>,
    pub signal_type: Option<String>,
    pub system_tx_loss: Option<String>,
    pub system_rx_loss: Option<String>,
    pub tx_gain_2db: Option<f64>,
    pub rx_gain_2db: Option<f64>,
    pub nfpa_timer: Option<i64>,
    pub nfpa_timer_trig: Option<bool>,
}

impl OntVoice {
    pub fn from_object(node_id: &str, ont_id: &str, port_nr: i64, obj: &Value) -> Self {
        Self {
            parent_node: node_id.to_owned(),
            id: ont_id.to_owned(),
            port_number: port_nr,
            admin: text(obj, "admin"),
            subscriber_id: text(obj, "subscr-id"),
            description: text(obj, "descr"),
            impedance: text(obj, "impedance"),
            signal_type: text(obj, "signal-type"),
            system_tx_loss: text(obj, "system-tx-loss"),
            system_rx_loss: text(obj, "system-rx-loss"),
            tx_gain_2db: float(obj, "tx-gain-2db"),
            rx_gain_2db: float(obj, "rx-gain-2db"),
            nfpa_timer: int(obj, "nfpa-timer"),
            nfpa_timer_trig: boolean(obj, "nfpa-timer-trig"),
        }
    }
}

/// Ids of the ONTs provisioned on one GPON port.
#[derive(Debug, Clone, Serialize)]
pub struct OntList {
    pub onts: Vec<String>,
    pub count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn absent_leaves_stay_none() {
        let obj = json!({"admin": "enabled", "serno": "123456"});
        let ont = OntGeneral::from_object("lab-pon-1", "18331", &obj);
        assert_eq!(ont.admin_state.as_deref(), Some("enabled"));
        assert_eq!(ont.serial_nr.as_deref(), Some("123456"));
        assert_eq!(ont.vendor, None);
        assert_eq!(ont.shelf, None);
        assert_eq!(ont.battery_present, None);
    }

    #[test]
    fn profile_name_comes_from_the_reference_attribute() {
        let obj = json!({
            "ontprof": {"id": {"ontprof": {"@name": "812G", "#text": "7"}}},
            "linked-pon": {"id": {"shelf": "1", "card": "2", "gponport": "3"}}
        });
        let ont = OntGeneral::from_object("lab-pon-1", "1", &obj);
        assert_eq!(ont.model_nr.as_deref(), Some("812G"));
        assert_eq!((ont.shelf, ont.card, ont.port), (Some(1), Some(2), Some(3)));
    }

    #[test]
    fn status_merges_config_and_live_views() {
        let reply = json!({
            "match": {
                "get-config": {"object": {"admin": "enabled"}},
                "get": {"object": {"op-stat": "enable", "crit": "0", "opt-sig-lvl": "-18.5"}}
            }
        });
        let status = OntStatus::from_action_reply("lab-pon-1", "9", &reply);
        assert_eq!(status.general.admin_state.as_deref(), Some("enabled"));
        assert_eq!(status.operational_status.as_deref(), Some("enable"));
        assert_eq!(status.critical_alarm_count, Some(0));
        assert_eq!(status.rx_opt_signal_level, Some(-18.5));
    }

    #[test]
    fn performance_bin_values_parse_to_integers() {
        let mut bin = PmBin::new();
        bin.insert("bip-err-up".into(), "12".into());
        bin.insert("miss-burst-up".into(), "not-a-number".into());
        let pm = OntPerformance::from_bin("lab-pon-1", "9", &bin);
        assert_eq!(pm.bip_errors_up, Some(12));
        assert_eq!(pm.missed_bursts_up, None);
        assert_eq!(pm.bip_errors_down, None);
    }
}
