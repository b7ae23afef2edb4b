// xDSL modem records: DSL port config, bridged Ethernet interface,
// live line status, PM counters, and the copper line test.

use serde::Serialize;
use serde_json::Value;

use crate::netconf::extract::{boolean, float, int, text};
use crate::netconf::paging::PmBin;

/// Provisioned DSL port attributes: named rate/margin/vectoring
/// attributes plus the raw per-band rate-adaptation grid.
#[derive(Debug, Clone, Serialize)]
pub struct ModemPort {
    pub parent_node: String,
    pub shelf: i64,
    pub card: i64,
    pub interface: i64,
    pub admin: Option<String>,
    pub description: Option<String>,
    pub dsl_port_gos: Option<i64>,
    pub ethernet_port_gos: Option<i64>,
    pub service_type: Option<String>,
    pub path_l: Option<String>,
    pub fb_vpi: Option<String>,
    pub fb_vci: Option<String>,
    pub vdsl_prof: Option<String>,
    pub rpt_events: Option<bool>,
    pub power_save: Option<bool>,
    pub power_down_timeout: Option<i64>,
    pub downstream_rate_min: Option<i64>,
    pub downstream_rate_max: Option<i64>,
    pub upstream_rate_min: Option<i64>,
    pub upstream_rate_max: Option<i64>,
    pub downstream_margin_min: Option<String>,
    pub upstream_margin_min: Option<String>,
    pub downstream_interleave_max: Option<String>,
    pub upstream_interleave_max: Option<String>,
    pub downstream_snrm_min: Option<i64>,
    pub downstream_snrm_max: Option<i64>,
    pub downstream_snrm_target: Option<i64>,
    pub upstream_snrm_min: Option<i64>,
    pub upstream_snrm_max: Option<i64>,
    pub upstream_snrm_target: Option<i64>,
    pub power_offset: Option<String>,
    pub downstream_rate_mode: Option<String>,
    pub upstream_rate_mode: Option<String>,
    pub downstream_delay_adsl_max: Option<i64>,
    pub downstream_delay_vdsl_max: Option<i64>,
    pub upstream_delay_adsl_max: Option<i64>,
    pub upstream_delay_vdsl_max: Option<i64>,
    pub downstream_delay_adsl_target: Option<i64>,
    pub downstream_delay_vdsl_target: Option<i64>,
    pub upstream_delay_adsl_target: Option<i64>,
    pub upstream_delay_vdsl_target: Option<i64>,
    pub downstream_enh_inp: Option<String>,
    pub upstream_enh_inp: Option<String>,
    pub atm_header_compression: Option<bool>,
    pub downstream_ginp_min_etr: Option<i64>,
    pub upstream_ginp_min_etr: Option<i64>,
    pub downstream_ginp_max_ndr: Option<i64>,
    pub upstream_ginp_max_ndr: Option<i64>,
    pub downstream_ginp_max_delay: Option<i64>,
    pub upstream_ginp_max_delay: Option<i64>,
    pub downstream_ginp_min_inp_shine: Option<i64>,
    pub upstream_ginp_min_inp_shine: Option<i64>,
    pub downstream_ginp_shine_ratio: Option<i64>,
    pub upstream_ginp_shine_ratio: Option<i64>,
    pub downstream_ginp_min_inp_rein: Option<i64>,
    pub upstream_ginp_min_inp_rein: Option<i64>,
    pub ginp_downstream_req: Option<String>,
    pub ginp_upstream_req: Option<String>,
    // Per-band rate-adaptation grid, carried under its raw
    // single-letter wire names; the schema gives them no longer form.
    pub m: Option<String>,
    pub u1a: Option<i64>,
    pub u1b: Option<i64>,
    pub u2a: Option<i64>,
    pub u2b: Option<i64>,
    pub u3a: Option<i64>,
    pub u3b: Option<i64>,
    pub u4a: Option<i64>,
    pub u4b: Option<i64>,
    pub ukl0: Option<String>,
    pub d1i: Option<i64>,
    pub d1v: Option<i64>,
    pub d2i: Option<i64>,
    pub d2v: Option<i64>,
    pub d3i: Option<i64>,
    pub d3v: Option<i64>,
    pub d4i: Option<i64>,
    pub d4v: Option<i64>,
    pub d5i: Option<i64>,
    pub d5v: Option<i64>,
    pub d6i: Option<i64>,
    pub d6v: Option<i64>,
    pub d7i: Option<i64>,
    pub d7v: Option<i64>,
    pub d8i: Option<i64>,
    pub d8v: Option<i64>,
    pub d9i: Option<i64>,
    pub d9v: Option<i64>,
    pub d10i: Option<i64>,
    pub d10v: Option<i64>,
    pub d11i: Option<i64>,
    pub d11v: Option<i64>,
    pub d12i: Option<i64>,
    pub d12v: Option<i64>,
    pub d13i: Option<i64>,
    pub d13v: Option<i64>,
    pub d14i: Option<i64>,
    pub d14v: Option<i64>,
    pub d15i: Option<i64>,
    pub d15v: Option<i64>,
    pub d16i: Option<i64>,
    pub d16v: Option<i64>,
    pub desel: Option<i64>,
    pub descma: Option<i64>,
    pub descmb: Option<i64>,
    pub descmc: Option<i64>,
    pub dmus: Option<i64>,
    pub dfmin: Option<i64>,
    pub dfmax: Option<i64>,
    pub r1a: Option<i64>,
    pub r1b: Option<i64>,
    pub r2a: Option<i64>,
    pub r2b: Option<i64>,
    pub r3a: Option<i64>,
    pub r3b: Option<i64>,
    pub r4a: Option<i64>,
    pub r4b: Option<i64>,
    pub r5a: Option<i64>,
    pub r5b: Option<i64>,
    pub r6a: Option<i64>,
    pub r6b: Option<i64>,
    pub r7a: Option<i64>,
    pub r7b: Option<i64>,
    pub r8a: Option<i64>,
    pub r8b: Option<i64>,
    pub r9a: Option<i64>,
    pub r9b: Option<i64>,
    pub r10a: Option<i64>,
    pub r10b: Option<i64>,
    pub r11a: Option<i64>,
    pub r11b: Option<i64>,
    pub r12a: Option<i64>,
    pub r12b: Option<i64>,
    pub r13a: Option<i64>,
    pub r13b: Option<i64>,
    pub r14a: Option<i64>,
    pub r14b: Option<i64>,
    pub r15a: Option<i64>,
    pub r15b: Option<i64>,
    pub r16a: Option<i64>,
    pub r16b: Option<i64>,
    pub g1a: Option<i64>,
    pub g1b: Option<i64>,
    pub g2a: Option<i64>,
    pub g2b: Option<i64>,
    pub g3a: Option<i64>,
    pub g3b: Option<i64>,
    pub g4a: Option<i64>,
    pub g4b: Option<i64>,
    pub downstream_vectoring: Option<String>,
    pub upstream_vectoring: Option<String>,
    pub vectoring_group: Option<String>,
    pub join_vectoring_group: Option<bool>,
}

impl ModemPort {
    #[allow(clippy::similar_names)]
    pub fn from_object(node_id: &str, shelf: i64, card: i64, interface: i64, obj: &Value) -> Self {
        Self {
            parent_node: node_id.to_owned(),
            shelf,
            card,
            interface,
            admin: text(obj, "admin"),
            description: text(obj, "desc"),
            dsl_port_gos: int(obj, "gos.id.dslportgos"),
            ethernet_port_gos: int(obj, "eth-gos.id.ethportgos"),
            service_type: text(obj, "svc-type"),
            path_l: text(obj, "path-l"),
            fb_vpi: text(obj, "fb-vpi"),
            fb_vci: text(obj, "fb-vci"),
            vdsl_prof: text(obj, "vdsl-prof"),
            rpt_events: boolean(obj, "rpt-events"),
            power_save: boolean(obj, "power-save"),
            power_down_timeout: int(obj, "power-down-timeout"),
            downstream_rate_min: int(obj, "dmn"),
            downstream_rate_max: int(obj, "dmx"),
            upstream_rate_min: int(obj, "umn"),
            upstream_rate_max: int(obj, "umx"),
            downstream_margin_min: text(obj, "dmni"),
            upstream_margin_min: text(obj, "umni"),
            downstream_interleave_max: text(obj, "dimxl"),
            upstream_interleave_max: text(obj, "uimxl"),
            downstream_snrm_min: int(obj, "dmns"),
            downstream_snrm_max: int(obj, "dmxs"),
            downstream_snrm_target: int(obj, "dts"),
            upstream_snrm_min: int(obj, "umns"),
            upstream_snrm_max: int(obj, "umxs"),
            upstream_snrm_target: int(obj, "uts"),
            power_offset: text(obj, "po"),
            downstream_rate_mode: text(obj, "drm"),
            upstream_rate_mode: text(obj, "urm"),
            downstream_delay_adsl_max: int(obj, "ddam"),
            downstream_delay_vdsl_max: int(obj, "duam"),
            upstream_delay_adsl_max: int(obj, "udam"),
            upstream_delay_vdsl_max: int(obj, "uuam"),
            downstream_delay_adsl_target: int(obj, "ddat"),
            downstream_delay_vdsl_target: int(obj, "duat"),
            upstream_delay_adsl_target: int(obj, "udat"),
            upstream_delay_vdsl_target: int(obj, "uuat"),
            downstream_enh_inp: text(obj, "dei"),
            upstream_enh_inp: text(obj, "uei"),
            atm_header_compression: boolean(obj, "ahc"),
            downstream_ginp_min_etr: int(obj, "dgmne"),
            upstream_ginp_min_etr: int(obj, "usmne"),
            downstream_ginp_max_ndr: int(obj, "dgmxn"),
            upstream_ginp_max_ndr: int(obj, "usmxn"),
            downstream_ginp_max_delay: int(obj, "dgmxd"),
            upstream_ginp_max_delay: int(obj, "ugmxd"),
            downstream_ginp_min_inp_shine: int(obj, "dgmns"),
            upstream_ginp_min_inp_shine: int(obj, "ugmns"),
            downstream_ginp_shine_ratio: int(obj, "dgsr"),
            upstream_ginp_shine_ratio: int(obj, "ugsr"),
            downstream_ginp_min_inp_rein: int(obj, "dgmnr"),
            upstream_ginp_min_inp_rein: int(obj, "usmnr"),
            ginp_downstream_req: text(obj, "gdir"),
            ginp_upstream_req: text(obj, "usir"),
            m: text(obj, "m"),
            u1a: int(obj, "u1a"),
            u1b: int(obj, "u1b"),
            u2a: int(obj, "u2a"),
            u2b: int(obj, "u2b"),
            u3a: int(obj, "u3a"),
            u3b: int(obj, "u3b"),
            u4a: int(obj, "u4a"),
            u4b: int(obj, "u4b"),
            ukl0: text(obj, "ukl0"),
            d1i: int(obj, "d1i"),
            d1v: int(obj, "d1v"),
            d2i: int(obj, "d2i"),
            d2v: int(obj, "d2v"),
            d3i: int(obj, "d3i"),
            d3v: int(obj, "d3v"),
            d4i: int(obj, "d4i"),
            d4v: int(obj, "d4v"),
            d5i: int(obj, "d5i"),
            d5v: int(obj, "d5v"),
            d6i: int(obj, "d6i"),
            d6v: int(obj, "d6v"),
            d7i: int(obj, "d7i"),
            d7v: int(obj, "d7v"),
            d8i: int(obj, "d8i"),
            d8v: int(obj, "d8v"),
            d9i: int(obj, "d9i"),
            d9v: int(obj, "d9v"),
            d10i: int(obj, "d10i"),
            d10v: int(obj, "d10v"),
            d11i: int(obj, "d11i"),
            d11v: int(obj, "d11v"),
            d12i: int(obj, "d12i"),
            d12v: int(obj, "d12v"),
            d13i: int(obj, "d13i"),
            d13v: int(obj, "d13v"),
            d14i: int(obj, "d14i"),
            d14v: int(obj, "d14v"),
            d15i: int(obj, "d15i"),
            d15v: int(obj, "d15v"),
            d16i: int(obj, "d16i"),
            d16v: int(obj, "d16v"),
            desel: int(obj, "desel"),
            descma: int(obj, "descma"),
            descmb: int(obj, "descmb"),
            descmc: int(obj, "descmc"),
            dmus: int(obj, "dmus"),
            dfmin: int(obj, "dfmin"),
            dfmax: int(obj, "dfmax"),
            r1a: int(obj, "r1a"),
            r1b: int(obj, "r1b"),
            r2a: int(obj, "r2a"),
            r2b: int(obj, "r2b"),
            r3a: int(obj, "r3a"),
            r3b: int(obj, "r3b"),
            r4a: int(obj, "r4a"),
            r4b: int(obj, "r4b"),
            r5a: int(obj, "r5a"),
            r5b: int(obj, "r5b"),
            r6a: int(obj, "r6a"),
            r6b: int(obj, "r6b"),
            r7a: int(obj, "r7a"),
            r7b: int(obj, "r7b"),
            r8a: int(obj, "r8a"),
            r8b: int(obj, "r8b"),
            r9a: int(obj, "r9a"),
            r9b: int(obj, "r9b"),
            r10a: int(obj, "r10a"),
            r10b: int(obj, "r10b"),
            r11a: int(obj, "r11a"),
            r11b: int(obj, "r11b"),
            r12a: int(obj, "r12a"),
            r12b: int(obj, "r12b"),
            r13a: int(obj, "r13a"),
            r13b: int(obj, "r13b"),
            r14a: int(obj, "r14a"),
            r14b: int(obj, "r14b"),
            r15a: int(obj, "r15a"),
            r15b: int(obj, "r15b"),
            r16a: int(obj, "r16a"),
            r16b: int(obj, "r16b"),
            g1a: int(obj, "g1a"),
            g1b: int(obj, "g1b"),
            g2a: int(obj, "g2a"),
            g2b: int(obj, "g2b"),
            g3a: int(obj, "g3a"),
            g3b: int(obj, "g3b"),
            g4a: int(obj, "g4a"),
            g4b: int(obj, "g4b"),
            downstream_vectoring: text(obj, "ds-vectoring"),
            upstream_vectoring: text(obj, "us-vectoring"),
            vectoring_group: text(obj, "vectoring-group"),
            join_vectoring_group: boolean(obj, "join-vectoring-grp"),
        }
    }
}

/// The Ethernet interface bridged to a DSL port (ethintf id offset +200).
#[derive(Debug, Clone, Serialize)]
pub struct ModemInterface {
    pub parent_node: String,
    pub shelf: i64,
    pub card: i64,
    pub interface: i64,
    pub name: Option<String>,
    pub admin: Option<String>,
    pub role: Option<String>,
    pub description: Option<String>,
    pub rstp_act: Option<String>,
    pub rstp_priority: Option<i64>,
    pub rstp_path_cost: Option<i64>,
    pub rstp_edge: Option<bool>,
    pub policy_map: Option<String>,
    pub mtu: Option<i64>,
    pub exp_eth: Option<String>,
    pub native_vlan: Option<String>,
    pub split_hor: Option<bool>,
    pub bpdu_mac: Option<String>,
    pub lacp_tunnel: Option<bool>,
    pub trusted: Option<bool>,
    pub bpdu_guard: Option<bool>,
    pub igmp_immed_leave: Option<String>,
    pub sec_profile_name: Option<String>,
    pub sec_profile_text: Option<String>,
    pub pbit_name: Option<String>,
    pub pbit_text: Option<String>,
    pub subscriber_id: Option<String>,
    pub iqa_mode: Option<String>,
    pub iqa_poll_interval_seconds: Option<i64>,
    pub iqa_errors_per_million_threshold: Option<i64>,
    pub iqa_poll_window: Option<i64>,
    pub iqa_interval_count_alarm_threshold: Option<i64>,
    pub iqa_minimum_frame_count: Option<i64>,
    pub force_dot1x: Option<String>,
    pub source_mac_limit: Option<i64>,
}

impl ModemInterface {
    pub fn from_object(node_id: &str, shelf: i64, card: i64, interface: i64, obj: &Value) -> Self {
        Self {
            parent_node: node_id.to_owned(),
            shelf,
            card,
            interface,
            name: text(obj, "name"),
            admin: text(obj, "admin"),
            role: text(obj, "role"),
            description: text(obj, "desc"),
            rstp_act: text(obj, "rstp-act"),
            rstp_priority: int(obj, "rstp-prio"),
            rstp_path_cost: int(obj, "rstp-path-cost"),
            rstp_edge: boolean(obj, "rstp-edge"),
            policy_map: text(obj, "policy-map"),
            mtu: int(obj, "mtu"),
            exp_eth: text(obj, "exp-eth"),
            native_vlan: text(obj, "native-vlan"),
            split_hor: boolean(obj, "split-hor"),
            bpdu_mac: text(obj, "bpdu-mac"),
            lacp_tunnel: boolean(obj, "lacp-tunnel"),
            trusted: boolean(obj, "trusted"),
            bpdu_guard: boolean(obj, "bpdu-guard"),
            igmp_immed_leave: text(obj, "igmp-immed-leave"),
            sec_profile_name: text(obj, "sec.id.ethsecprof.@name"),
            sec_profile_text: text(obj, "sec.id.ethsecprof.#text"),
            pbit_name: text(obj, "pbit-map.id.dscpmap.@name"),
            pbit_text: text(obj, "pbit-map.id.dscpmap.#text"),
            subscriber_id: text(obj, "subscr-id"),
            iqa_mode: text(obj, "iqa-mode"),
            iqa_poll_interval_seconds: int(obj, "iqa-poll-interval-sec"),
            iqa_errors_per_million_threshold: int(obj, "iqa-err-per-million-thresh"),
            iqa_poll_window: int(obj, "iqa-poll-window"),
            iqa_interval_count_alarm_threshold: int(obj, "iqa-interval-cnt-alm-thresh"),
            iqa_minimum_frame_count: int(obj, "iqa-min-frame-cnt"),
            force_dot1x: text(obj, "force-dot1x"),
            source_mac_limit: int(obj, "src-mac-limit"),
        }
    }
}

/// Live DSL line status from the operational datastore.
#[derive(Debug, Clone, Serialize)]
pub struct ModemStatus {
    pub parent_node: String,
    pub shelf: i64,
    pub card: i64,
    pub interface: i64,
    pub operational_status: Option<String>,
    pub derived_states: Option<String>,
    pub operation: Option<String>,
    pub mode: Option<String>,
    pub active_profile: Option<String>,
    pub last_retrain_status: Option<String>,
    pub data_mode: Option<String>,
    pub uptime: Option<i64>,
    pub atm_header_compression: Option<String>,
    pub retrain_count: Option<i64>,
    pub last_applied_template: Option<String>,
    pub act_vec_mode: Option<String>,
    pub vec_state: Option<String>,
    pub power_save_timer: Option<i64>,
    pub act_psd_mask: Option<String>,
    pub upstream_rate: Option<i64>,
    pub upstream_delay: Option<i64>,
    pub upstream_inp: Option<i64>,
    pub upstream_snrm: Option<i64>,
    pub upstream_la: Option<i64>,
    pub upstream_attainable_rate: Option<i64>,
    pub upstream_atp: Option<i64>,
    pub upstream_atmptm: Option<String>,
    pub upstream_enh_inp: Option<String>,
    pub upstream_rtx_etr: Option<i64>,
    pub upstream_rtx_inp_shine: Option<i64>,
    pub upstream_rtx_inp_rein: Option<i64>,
    pub upstream_rtx_delay: Option<i64>,
    pub downstream_rate: Option<i64>,
    pub downstream_delay: Option<i64>,
    pub downstream_inp: Option<i64>,
    pub downstream_snrm: Option<i64>,
    pub downstream_la: Option<i64>,
    pub downstream_attainable_rate: Option<i64>,
    pub downstream_atp: Option<i64>,
    pub downstream_atmptm: Option<String>,
    pub downstream_enh_inp: Option<String>,
    pub downstream_rtx_etr: Option<i64>,
    pub downstream_rtx_inp_shine: Option<i64>,
    pub downstream_rtx_inp_rein: Option<i64>,
    pub downstream_rtx_delay: Option<i64>,
}

impl ModemStatus {
    pub fn from_object(node_id: &str, shelf: i64, card: i64, interface: i64, obj: &Value) -> Self {
        Self {
            parent_node: node_id.to_owned(),
            shelf,
            card,
            interface,
            operational_status: text(obj, "op-stat"),
            derived_states: text(obj, "derived-states"),
            operation: text(obj, "op"),
            mode: text(obj, "mode"),
            active_profile: text(obj, "act"),
            last_retrain_status: text(obj, "init"),
            data_mode: text(obj, "data-mode"),
            uptime: int(obj, "op-time"),
            atm_header_compression: text(obj, "ahc"),
            retrain_count: int(obj, "retrain-count"),
            last_applied_template: text(obj, "last-templ"),
            act_vec_mode: text(obj, "act-vec-mode"),
            vec_state: text(obj, "vec-state"),
            power_save_timer: int(obj, "power-save-timer"),
            act_psd_mask: text(obj, "act-psd-mask"),
            upstream_rate: int(obj, "us-rate"),
            upstream_delay: int(obj, "us-delay"),
            upstream_inp: int(obj, "us-inp"),
            upstream_snrm: int(obj, "us-snrm"),
            upstream_la: int(obj, "us-la"),
            upstream_attainable_rate: int(obj, "us-att-rate"),
            upstream_atp: int(obj, "us-atp"),
            upstream_atmptm: text(obj, "us-atmptm"),
            upstream_enh_inp: text(obj, "us-enh-inp"),
            upstream_rtx_etr: int(obj, "us-rtx-etr"),
            upstream_rtx_inp_shine: int(obj, "us-rtx-inp-shine"),
            upstream_rtx_inp_rein: int(obj, "us-rtx-inp-rein"),
            upstream_rtx_delay: int(obj, "us-rtx-delay"),
            downstream_rate: int(obj, "ds-rate"),
            downstream_delay: int(obj, "ds-delay"),
            downstream_inp: int(obj, "ds-inp"),
            downstream_snrm: int(obj, "ds-snrm"),
            downstream_la: int(obj, "ds-la"),
            downstream_attainable_rate: int(obj, "ds-att-rate"),
            downstream_atp: int(obj, "ds-atp"),
            downstream_atmptm: text(obj, "ds-atmptm"),
            downstream_enh_inp: text(obj, "ds-enh-inp"),
            downstream_rtx_etr: int(obj, "ds-rtx-etr"),
            downstream_rtx_inp_shine: int(obj, "ds-rtx-inp-shine"),
            downstream_rtx_inp_rein: int(obj, "ds-rtx-inp-rein"),
            downstream_rtx_delay: int(obj, "ds-rtx-delay"),
        }
    }
}

/// One PM bin of line error counters from `show-dsl-pm`.
#[derive(Debug, Clone, Serialize)]
pub struct ModemPerformance {
    pub parent_node: String,
    pub shelf: i64,
    pub card: i64,
    pub interface: i64,
    pub code_violations: Option<i64>,
    pub code_violations_far_end: Option<i64>,
    pub forward_error_correction: Option<i64>,
    pub forward_error_correction_far_end: Option<i64>,
    pub forward_error_correction_seconds: Option<i64>,
    pub forward_error_correction_seconds_far_end: Option<i64>,
    pub errored_seconds: Option<i64>,
    pub errored_seconds_far_end: Option<i64>,
    pub severely_errored_seconds: Option<i64>,
    pub severely_errored_seconds_far_end: Option<i64>,
    pub loss_of_signal_seconds: Option<i64>,
    pub loss_of_signal_seconds_far_end: Option<i64>,
    pub unavailable_seconds: Option<i64>,
    pub unavailable_seconds_far_end: Option<i64>,
    pub full_initialization_count: Option<i64>,
    pub failed_full_initialization_count: Option<i64>,
    pub ptm_tc_crc_error_count: Option<i64>,
    pub ptm_tc_code_violation_count: Option<i64>,
}

fn bin_int(bin: &PmBin, key: &str) -> Option<i64> {
    bin.get(key)?.parse().ok()
}

impl ModemPerformance {
    pub fn from_bin(node_id: &str, shelf: i64, card: i64, interface: i64, bin: &PmBin) -> Self {
        Self {
            parent_node: node_id.to_owned(),
            shelf,
            card,
            interface,
            code_violations: bin_int(bin, "cv-c"),
            code_violations_far_end: bin_int(bin, "cv-cfe"),
            forward_error_correction: bin_int(bin, "fec-c"),
            forward_error_correction_far_end: bin_int(bin, "fec-cfe"),
            forward_error_correction_seconds: bin_int(bin, "fec-l"),
            forward_error_correction_seconds_far_end: bin_int(bin, "fec-lfe"),
            errored_seconds: bin_int(bin, "es-l"),
            errored_seconds_far_end: bin_int(bin, "es-lfe"),
            severely_errored_seconds: bin_int(bin, "ses-l"),
            severely_errored_seconds_far_end: bin_int(bin, "ses-lfe"),
            loss_of_signal_seconds: bin_int(bin, "loss-l"),
            loss_of_signal_seconds_far_end: bin_int(bin, "loss-lfe"),
            unavailable_seconds: bin_int(bin, "uas-l"),
            unavailable_seconds_far_end: bin_int(bin, "uas-lfe"),
            full_initialization_count: bin_int(bin, "init-l"),
            failed_full_initialization_count: bin_int(bin, "linit-l"),
            ptm_tc_crc_error_count: bin_int(bin, "crc-p"),
            ptm_tc_code_violation_count: bin_int(bin, "cv-p"),
        }
    }
}

/// Result of the copper loop test run against a POTS line.
#[derive(Debug, Clone, Serialize)]
pub struct XdslLineTest {
    pub parent_node: String,
    pub shelf: i64,
    pub card: i64,
    pub interface: i64,
    pub execution_status: Option<String>,
    pub result_summary: Option<String>,
    pub hazard_potential: Option<String>,
    pub foreign_emf: Option<String>,
    pub resistive_faults: Option<String>,
    pub receiver_off_hook: Option<String>,
    pub ringer: Option<String>,
    pub tip_ground_dc_volt: Option<f64>,
    pub ring_ground_dc_volt: Option<f64>,
    pub tip_ground_ac_volt: Option<f64>,
    pub ring_ground_ac_volt: Option<f64>,
    pub tip_ground_dc_ohm: Option<i64>,
    pub ring_ground_dc_ohm: Option<i64>,
    pub ringer_equivalent: Option<f64>,
    pub tip_ground_cap: Option<f64>,
    pub ring_ground_cap: Option<f64>,
    pub tip_ring_cap: Option<f64>,
}

impl XdslLineTest {
    /// Build from a `test-pots-svc` action-reply subtree.
    pub fn from_action_reply(
        node_id: &str,
        shelf: i64,
        card: i64,
        interface: i64,
        reply: &Value,
    ) -> Self {
        Self {
            parent_node: node_id.to_owned(),
            shelf,
            card,
            interface,
            execution_status: text(reply, "execution-status"),
            result_summary: text(reply, "result-summary"),
            hazard_potential: text(reply, "hazard-potential"),
            foreign_emf: text(reply, "foreign-emf"),
            resistive_faults: text(reply, "resistive-faults"),
            receiver_off_hook: text(reply, "receiver-off-hook"),
            ringer: text(reply, "ringer"),
            tip_ground_dc_volt: float(reply, "tip-ground-dc-volt"),
            ring_ground_dc_volt: float(reply, "ring-ground-dc-volt"),
            tip_ground_ac_volt: float(reply, "tip-ground-ac-volt"),
            ring_ground_ac_volt: float(reply, "ring-ground-ac-volt"),
            tip_ground_dc_ohm: int(reply, "tip-ground-dc-ohm"),
            ring_ground_dc_ohm: int(reply, "ring-ground-dc-ohm"),
            ringer_equivalent: float(reply, "ringer-equiv"),
            tip_ground_cap: float(reply, "tip-ground-cap"),
            ring_ground_cap: float(reply, "ring-ground-cap"),
            tip_ring_cap: float(reply, "tip-ring-cap"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn port_carries_the_rate_adaptation_grid() {
        let obj = json!({
            "admin": "enabled",
            "m": "adaptive",
            "u2b": "1024",
            "ukl0": "75",
            "d16v": "3",
            "desel": "8",
            "dfmax": "2208",
            "r1a": "32",
            "r16b": "8128",
            "g4b": "255"
        });
        let port = ModemPort::from_object("lab-dsl-1", 1, 1, 7, &obj);
        assert_eq!(port.m.as_deref(), Some("adaptive"));
        assert_eq!(port.u2b, Some(1024));
        assert_eq!(port.ukl0.as_deref(), Some("75"));
        assert_eq!(port.d16v, Some(3));
        assert_eq!(port.desel, Some(8));
        assert_eq!(port.dfmax, Some(2208));
        assert_eq!(port.r1a, Some(32));
        assert_eq!(port.r16b, Some(8128));
        assert_eq!(port.g4b, Some(255));
        assert_eq!(port.r2a, None);
    }

    #[test]
    fn status_reads_operational_attributes() {
        let obj = json!({
            "op-stat": "enable",
            "us-rate": "5056",
            "ds-rate": "40002",
            "ds-snrm": "11",
            "mode": "vdsl2"
        });
        let status = ModemStatus::from_object("lab-dsl-1", 1, 1, 12, &obj);
        assert_eq!(status.operational_status.as_deref(), Some("enable"));
        assert_eq!(status.upstream_rate, Some(5056));
        assert_eq!(status.downstream_rate, Some(40002));
        assert_eq!(status.downstream_snrm, Some(11));
        assert_eq!(status.retrain_count, None);
    }

    #[test]
    fn line_test_reads_measurements_from_the_action_reply() {
        let reply = json!({
            "execution-status": "complete",
            "result-summary": "pass",
            "tip-ground-dc-volt": "0.3",
            "ring-ground-dc-ohm": "7500000"
        });
        let test = XdslLineTest::from_action_reply("lab-dsl-1", 1, 1, 4, &reply);
        assert_eq!(test.execution_status.as_deref(), Some("complete"));
        assert_eq!(test.tip_ground_dc_volt, Some(0.3));
        assert_eq!(test.ring_ground_dc_ohm, Some(7_500_000));
        assert_eq!(test.ringer, None);
    }
}
