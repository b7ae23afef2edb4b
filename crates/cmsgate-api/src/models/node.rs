// Node-scoped records: active alarms and DHCP lease snapshots.

use serde::Serialize;
use serde_json::Value;

use crate::netconf::extract::{get, int, text};

/// One active alarm. The alarm body is not fully standardized across
/// object types, so the addressed object keeps its raw id pairs (in
/// reply order, which is schema order) and the complete element is
/// carried alongside the extracted fields.
#[derive(Debug, Clone, Serialize)]
pub struct NodeAlarm {
    pub alarm_type: Option<String>,
    pub object_type: Option<String>,
    pub object_id: Vec<(String, String)>,
    pub severity: Option<String>,
    pub raw: Value,
}

impl NodeAlarm {
    /// Build from one `alarm` element of a `show-alarms` reply.
    pub fn from_element(alarm: &Value) -> Self {
        let mut object_id = Vec::new();
        if let Some(Value::Object(id)) = get(alarm, "object.id") {
            for (key, value) in id {
                if let Some(v) = match value {
                    Value::String(s) => Some(s.clone()),
                    Value::Object(map) => match map.get("#text") {
                        Some(Value::String(s)) => Some(s.clone()),
                        _ => None,
                    },
                    _ => None,
                } {
                    object_id.push((key.clone(), v));
                }
            }
        }
        Self {
            alarm_type: text(alarm, "alarm-type"),
            object_type: text(alarm, "object.type"),
            object_id,
            severity: text(alarm, "severity"),
            raw: alarm.clone(),
        }
    }

    /// Continuation cursor for the alarm after this one, or `None` when
    /// the alarm lacks the addressing needed to resume.
    pub(crate) fn cursor(&self) -> Option<String> {
        let alarm_type = self.alarm_type.as_deref()?;
        let object_type = self.object_type.as_deref()?;
        let mut id = String::new();
        for (key, value) in &self.object_id {
            id.push_str(&format!("<{key}>{value}</{key}>"));
        }
        Some(format!(
            "<start-instance><type>{object_type}</type><id>{id}</id></start-instance>\
             <after-alarm>{alarm_type}</after-alarm>"
        ))
    }
}

/// One DHCP lease from the `show-dhcp-leases` action.
#[derive(Debug, Clone, Serialize)]
pub struct DhcpLease {
    pub mac: Option<String>,
    pub ip: Option<String>,
    pub vlan: Option<i64>,
    pub lease_time: Option<i64>,
    pub remaining: Option<i64>,
    pub subscriber_id: Option<String>,
}

impl DhcpLease {
    pub fn from_element(lease: &Value) -> Self {
        Self {
            mac: text(lease, "mac"),
            ip: text(lease, "ip"),
            vlan: int(lease, "vlan"),
            lease_time: int(lease, "lease-time"),
            remaining: int(lease, "remaining"),
            subscriber_id: text(lease, "subscr-id"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn alarm_keeps_object_id_map_and_raw_element() {
        let alarm = json!({
            "alarm-type": "ont-missing",
            "object": {"type": "Ont", "id": {"ont": "18331"}},
            "severity": "major"
        });
        let parsed = NodeAlarm::from_element(&alarm);
        assert_eq!(parsed.alarm_type.as_deref(), Some("ont-missing"));
        assert_eq!(parsed.object_type.as_deref(), Some("Ont"));
        assert_eq!(parsed.object_id, vec![("ont".to_owned(), "18331".to_owned())]);
        assert_eq!(parsed.raw, alarm);
    }

    #[test]
    fn alarm_cursor_rebuilds_the_object_selector() {
        let alarm = json!({
            "alarm-type": "low-rx-opt-pwr",
            "object": {"type": "GponPort", "id": {"shelf": "1", "card": "2", "gponport": "3"}}
        });
        let cursor = NodeAlarm::from_element(&alarm).cursor().expect("cursor");
        assert_eq!(
            cursor,
            "<start-instance><type>GponPort</type>\
             <id><shelf>1</shelf><card>2</card><gponport>3</gponport></id></start-instance>\
             <after-alarm>low-rx-opt-pwr</after-alarm>"
        );
    }

    #[test]
    fn alarm_without_addressing_yields_no_cursor() {
        let parsed = NodeAlarm::from_element(&json!({"severity": "info"}));
        assert!(parsed.cursor().is_none());
    }
}
