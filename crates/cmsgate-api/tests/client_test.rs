// Integration tests for `CmsClient` using wiremock.
#![allow(clippy::unwrap_used)]

use std::time::Duration;

use secrecy::SecretString;
use url::Url;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use cmsgate_api::{CmsClient, Error};

const NBI_PATH: &str = "/cmsexc/ex/netconf";

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, CmsClient) {
    // `MockServer::start()` leases a pooled server whose listener stays
    // alive after drop; the builder gives a dedicated server so dropping
    // it really closes the port (the unreachable-controller fixture).
    let server = MockServer::builder().start().await;
    let endpoint = Url::parse(&format!("{}{NBI_PATH}", server.uri())).unwrap();
    let client = CmsClient::with_endpoint(
        endpoint,
        "ops",
        SecretString::from("secret".to_owned()),
        Duration::from_secs(5),
    )
    .unwrap();
    (server, client)
}

fn xml(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(body.to_owned(), "text/xml;charset=ISO8859-1")
}

fn auth_reply(code: &str, session_id: Option<&str>) -> String {
    let session = session_id
        .map(|id| format!("<SessionId>{id}</SessionId>"))
        .unwrap_or_default();
    format!(
        "<Envelope><Body><auth-reply><ResultCode>{code}</ResultCode>{session}</auth-reply></Body></Envelope>"
    )
}

fn rpc_reply(inner: &str) -> String {
    format!(
        "<soapenv:Envelope xmlns:soapenv=\"www.w3.org/2003/05/soap-envelope\">\
         <soapenv:Body><rpc-reply>{inner}</rpc-reply></soapenv:Body></soapenv:Envelope>"
    )
}

async fn login(server: &MockServer, client: &CmsClient) {
    Mock::given(method("POST"))
        .and(path(NBI_PATH))
        .and(body_string_contains("<login>"))
        .respond_with(xml(&auth_reply("0", Some("7421"))))
        .mount(server)
        .await;
    client.login().await.unwrap();
}

// ── Session lifecycle ───────────────────────────────────────────────

#[tokio::test]
async fn test_login_stores_session_id() {
    let (server, client) = setup().await;
    login(&server, &client).await;
    assert_eq!(client.session_id().await.as_deref(), Some("7421"));
}

#[tokio::test]
async fn test_login_rejected_on_nonzero_result_code() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path(NBI_PATH))
        .respond_with(xml(&auth_reply("1", None)))
        .mount(&server)
        .await;

    let err = client.login().await.unwrap_err();
    assert!(matches!(err, Error::Authentication { .. }));
    assert_eq!(client.session_id().await, None);
}

#[tokio::test]
async fn test_logout_clears_session() {
    let (server, client) = setup().await;
    login(&server, &client).await;

    Mock::given(method("POST"))
        .and(path(NBI_PATH))
        .and(body_string_contains("<logout>"))
        .and(body_string_contains("<SessionId>7421</SessionId>"))
        .respond_with(xml(&auth_reply("0", None)))
        .mount(&server)
        .await;

    client.logout().await.unwrap();
    assert_eq!(client.session_id().await, None);
}

#[tokio::test]
async fn test_rejected_logout_keeps_the_session() {
    let (server, client) = setup().await;
    login(&server, &client).await;

    Mock::given(method("POST"))
        .and(path(NBI_PATH))
        .and(body_string_contains("<logout>"))
        .respond_with(xml(&auth_reply("1", None)))
        .mount(&server)
        .await;

    let err = client.logout().await.unwrap_err();
    assert!(matches!(err, Error::Deauthentication { .. }));
    assert_eq!(client.session_id().await.as_deref(), Some("7421"));
}

#[tokio::test]
async fn test_unreachable_controller_is_a_communication_failure() {
    let (server, client) = setup().await;
    drop(server);

    let err = client.login().await.unwrap_err();
    assert!(matches!(err, Error::Communication { .. }));
    assert!(err.is_transient());
}

// ── Config reads ────────────────────────────────────────────────────

#[tokio::test]
async fn test_get_ont_maps_reply_fields() {
    let (server, client) = setup().await;
    login(&server, &client).await;

    let body = rpc_reply(
        "<data><top><object>\
         <admin>enabled</admin>\
         <serno>63149</serno>\
         <subscr-id>unit 4</subscr-id>\
         <ontprof><id><ontprof name=\"812G\">7</ontprof></id></ontprof>\
         <linked-pon><id><shelf>1</shelf><card>2</card><gponport>3</gponport></id></linked-pon>\
         <battery-present>false</battery-present>\
         <us-sdber-rate>5</us-sdber-rate>\
         </object></top></data>",
    );

    Mock::given(method("POST"))
        .and(path(NBI_PATH))
        .and(body_string_contains("<get-config>"))
        .and(body_string_contains("<ont>18331</ont>"))
        .and(body_string_contains("sessionid=\"7421\""))
        .and(body_string_contains("nodename=\"NTWK-lab-pon-1\""))
        .respond_with(xml(&body))
        .mount(&server)
        .await;

    let ont = client.get_ont("lab-pon-1", "18331").await.unwrap();
    assert_eq!(ont.parent_node, "lab-pon-1");
    assert_eq!(ont.admin_state.as_deref(), Some("enabled"));
    assert_eq!(ont.serial_nr.as_deref(), Some("63149"));
    assert_eq!(ont.subscriber_id.as_deref(), Some("unit 4"));
    assert_eq!(ont.model_nr.as_deref(), Some("812G"));
    assert_eq!((ont.shelf, ont.card, ont.port), (Some(1), Some(2), Some(3)));
    assert_eq!(ont.battery_present, Some(false));
    assert_eq!(ont.us_sdber_rate, Some(5.0));
    assert_eq!(ont.vendor, None);
}

// ── Edits and acknowledgements ──────────────────────────────────────

#[tokio::test]
async fn test_edit_accepts_ok_ack() {
    let (server, client) = setup().await;
    login(&server, &client).await;

    Mock::given(method("POST"))
        .and(path(NBI_PATH))
        .and(body_string_contains("<edit-config>"))
        .and(body_string_contains("<admin>disabled</admin>"))
        .respond_with(xml(&rpc_reply("<ok/>")))
        .mount(&server)
        .await;

    client.disable_ont("lab-pon-1", "18331").await.unwrap();
}

#[tokio::test]
async fn test_edit_without_ok_ack_fails() {
    let (server, client) = setup().await;
    login(&server, &client).await;

    Mock::given(method("POST"))
        .and(path(NBI_PATH))
        .and(body_string_contains("<edit-config>"))
        .respond_with(xml(&rpc_reply("<data/>")))
        .mount(&server)
        .await;

    let err = client.enable_ont("lab-pon-1", "18331").await.unwrap_err();
    assert!(matches!(err, Error::Communication { .. }));
}

#[tokio::test]
async fn test_quarantine_carries_vendor_prefix() {
    let (server, client) = setup().await;
    login(&server, &client).await;

    Mock::given(method("POST"))
        .and(path(NBI_PATH))
        .and(body_string_contains("operation=\"create\""))
        .and(body_string_contains("<quaront>CXNK63149</quaront>"))
        .respond_with(xml(&rpc_reply("<ok/>")))
        .expect(1)
        .mount(&server)
        .await;

    client.quarantine_ont("lab-pon-1", "63149").await.unwrap();
}

// ── Pagination ──────────────────────────────────────────────────────

#[tokio::test]
async fn test_list_onts_follows_after_cursor() {
    let (server, client) = setup().await;
    login(&server, &client).await;

    let page1 = rpc_reply(
        "<more/><data><top><object><type>System</type><children>\
         <child><id><ont>1</ont></id></child>\
         <child><id><ont>2</ont></id></child>\
         </children></object></top></data>",
    );
    let page2 = rpc_reply(
        "<data><top><object><type>System</type><children>\
         <child><id><ont>63</ont></id></child>\
         </children></object></top></data>",
    );

    // First page: any listing request, served once.
    Mock::given(method("POST"))
        .and(path(NBI_PATH))
        .and(body_string_contains("<attr-filter>"))
        .respond_with(xml(&page1))
        .up_to_n_times(1)
        .expect(1)
        .mount(&server)
        .await;
    // Second page: must carry the cursor naming the last ONT of page 1.
    Mock::given(method("POST"))
        .and(path(NBI_PATH))
        .and(body_string_contains(
            "<after><type>Ont</type><id><ont>2</ont></id></after>",
        ))
        .respond_with(xml(&page2))
        .expect(1)
        .mount(&server)
        .await;

    let list = client.list_onts_on_gpon("lab-pon-1", 1, 2, 3).await.unwrap();
    assert_eq!(list.onts, vec!["1", "2", "63"]);
    assert_eq!(list.count, 3);
}

#[tokio::test]
async fn test_listing_terminates_when_more_is_asserted_without_items() {
    let (server, client) = setup().await;
    login(&server, &client).await;

    Mock::given(method("POST"))
        .and(path(NBI_PATH))
        .and(body_string_contains("<attr-filter>"))
        .respond_with(xml(&rpc_reply(
            "<more/><data><top><object><type>System</type></object></top></data>",
        )))
        .expect(1)
        .mount(&server)
        .await;

    let list = client.list_onts_on_gpon("lab-pon-1", 1, 1, 1).await.unwrap();
    assert!(list.onts.is_empty());
}

#[tokio::test]
async fn test_node_alarms_follow_nested_cursor() {
    let (server, client) = setup().await;
    login(&server, &client).await;

    let page1 = rpc_reply(
        "<more/><action-reply>\
         <alarm><alarm-type>ont-missing</alarm-type>\
         <object><type>Ont</type><id><ont>9</ont></id></object>\
         <severity>major</severity></alarm>\
         <alarm><alarm-type>low-rx-opt-pwr</alarm-type>\
         <object><type>Ont</type><id><ont>12</ont></id></object></alarm>\
         </action-reply>",
    );
    let page2 = rpc_reply(
        "<action-reply>\
         <alarm><alarm-type>ont-missing</alarm-type>\
         <object><type>Ont</type><id><ont>44</ont></id></object></alarm>\
         </action-reply>",
    );

    Mock::given(method("POST"))
        .and(path(NBI_PATH))
        .and(body_string_contains("show-alarms"))
        .respond_with(xml(&page1))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(NBI_PATH))
        .and(body_string_contains(
            "<start-instance><type>Ont</type><id><ont>12</ont></id></start-instance>\
             <after-alarm>low-rx-opt-pwr</after-alarm>",
        ))
        .respond_with(xml(&page2))
        .expect(1)
        .mount(&server)
        .await;

    let alarms = client.get_node_alarms("lab-pon-1").await.unwrap();
    assert_eq!(alarms.len(), 3);
    assert_eq!(alarms[0].alarm_type.as_deref(), Some("ont-missing"));
    assert_eq!(alarms[2].object_id, vec![("ont".to_owned(), "44".to_owned())]);
}

// ── Performance bins ────────────────────────────────────────────────

#[tokio::test]
async fn test_ont_performance_zips_types_with_bin_values() {
    let (server, client) = setup().await;
    login(&server, &client).await;

    let body = rpc_reply(
        "<action-reply>\
         <types>bip-err-up bip-err-down miss-burst-up</types>\
         <bin><bin-status>valid</bin-status><val>12 3 0</val></bin>\
         </action-reply>",
    );

    Mock::given(method("POST"))
        .and(path(NBI_PATH))
        .and(body_string_contains("show-ont-pm"))
        .and(body_string_contains("<bin-type>1-day</bin-type>"))
        .and(body_string_contains("<start-bin>1</start-bin>"))
        .respond_with(xml(&body))
        .mount(&server)
        .await;

    let pm = client.get_ont_performance("lab-pon-1", "9").await.unwrap();
    assert_eq!(pm.bip_errors_up, Some(12));
    assert_eq!(pm.bip_errors_down, Some(3));
    assert_eq!(pm.missed_bursts_up, Some(0));
    assert_eq!(pm.gem_hec_errors_up, None);
}

#[tokio::test]
async fn test_pm_history_pages_by_bin_position() {
    let (server, client) = setup().await;
    login(&server, &client).await;

    let page1 = rpc_reply(
        "<more/><action-reply>\
         <types>bip-err-up</types>\
         <bin><val>1</val></bin><bin><val>2</val></bin>\
         </action-reply>",
    );
    let page2 = rpc_reply(
        "<action-reply>\
         <types>bip-err-up</types>\
         <bin><val>3</val></bin><bin><val>4</val></bin>\
         </action-reply>",
    );

    // First request asks for the full window.
    Mock::given(method("POST"))
        .and(path(NBI_PATH))
        .and(body_string_contains("<start-bin>1</start-bin><count>4</count>"))
        .respond_with(xml(&page1))
        .expect(1)
        .mount(&server)
        .await;
    // Second request resumes after the two bins already received.
    Mock::given(method("POST"))
        .and(path(NBI_PATH))
        .and(body_string_contains("<start-bin>3</start-bin><count>2</count>"))
        .respond_with(xml(&page2))
        .expect(1)
        .mount(&server)
        .await;

    let bins = client
        .get_ont_errors("lab-pon-1", "9", "15-min", 4)
        .await
        .unwrap();
    assert_eq!(bins.len(), 4);
    assert_eq!(bins[0].bip_errors_up, Some(1));
    assert_eq!(bins[3].bip_errors_up, Some(4));
}

// ── Actions ─────────────────────────────────────────────────────────

#[tokio::test]
async fn test_line_test_reads_measurements() {
    let (server, client) = setup().await;
    login(&server, &client).await;

    let body = rpc_reply(
        "<action-reply>\
         <execution-status>complete</execution-status>\
         <result-summary>pass</result-summary>\
         <tip-ground-dc-volt>0.3</tip-ground-dc-volt>\
         <ring-ground-dc-ohm>7500000</ring-ground-dc-ohm>\
         </action-reply>",
    );

    Mock::given(method("POST"))
        .and(path(NBI_PATH))
        .and(body_string_contains("test-pots-svc"))
        .and(body_string_contains("<pots><type>Pots</type>"))
        .respond_with(xml(&body))
        .mount(&server)
        .await;

    let test = client.run_xdsl_line_test("lab-dsl-1", 1, 1, 4).await.unwrap();
    assert_eq!(test.execution_status.as_deref(), Some("complete"));
    assert_eq!(test.result_summary.as_deref(), Some("pass"));
    assert_eq!(test.tip_ground_dc_volt, Some(0.3));
    assert_eq!(test.ring_ground_dc_ohm, Some(7_500_000));
}

#[tokio::test]
async fn test_xdsl_interface_id_offset() {
    let (server, client) = setup().await;
    login(&server, &client).await;

    Mock::given(method("POST"))
        .and(path(NBI_PATH))
        .and(body_string_contains("<type>EthIntf</type>"))
        .and(body_string_contains("<ethintf>212</ethintf>"))
        .respond_with(xml(&rpc_reply(
            "<data><top><object><name>dsl-12</name></object></top></data>",
        )))
        .expect(1)
        .mount(&server)
        .await;

    let intf = client
        .get_xdsl_interface("lab-dsl-1", 1, 1, 12)
        .await
        .unwrap();
    assert_eq!(intf.name.as_deref(), Some("dsl-12"));
    assert_eq!(intf.interface, 12);
}

#[tokio::test]
async fn test_reauthenticate_rotates_session() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path(NBI_PATH))
        .and(body_string_contains("<login>"))
        .respond_with(xml(&auth_reply("0", Some("first"))))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    client.login().await.unwrap();

    Mock::given(method("POST"))
        .and(path(NBI_PATH))
        .and(body_string_contains("<logout>"))
        .respond_with(xml(&auth_reply("0", None)))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(NBI_PATH))
        .and(body_string_contains("<login>"))
        .respond_with(xml(&auth_reply("0", Some("second"))))
        .mount(&server)
        .await;

    client.reauthenticate().await.unwrap();
    assert_eq!(client.session_id().await.as_deref(), Some("second"));
}
