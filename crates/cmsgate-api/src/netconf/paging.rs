// Cursor pagination.
//
// Partial replies carry a `<more/>` marker; the caller resumes by
// resending the same request with a continuation cursor derived from the
// last item received. The cursor shape differs per listing (an `<after>`
// clause for config children, a `<start-instance>` pair for alarms, a
// `<start-mac>` for leases), so `collect` takes the request builder and
// cursor derivation as closures and only owns the loop.

use std::collections::BTreeMap;
use std::time::Duration;

use serde_json::Value;
use tracing::debug;

use crate::error::Error;
use crate::netconf::client::CmsClient;
use crate::netconf::envelope::{RpcHeader, action};
use crate::netconf::extract;

const BIN_TYPES: &str = "soapenv:Envelope.soapenv:Body.rpc-reply.action-reply.types";
const BIN_LIST: &str = "soapenv:Envelope.soapenv:Body.rpc-reply.action-reply.bin";

/// One performance-monitoring bin: counter name to raw value.
pub type PmBin = BTreeMap<String, String>;

impl CmsClient {
    /// Fetch all pages of a listing.
    ///
    /// `build` produces the request payload for a given cursor (`None`
    /// on the first page), `unpack_path` locates the item list in the
    /// parsed reply, and `next_cursor` derives the continuation cursor
    /// from the items seen so far. Stops when a reply has no partial
    /// marker, yields no items, or no cursor can be derived -- the last
    /// two guard against a controller that keeps signalling more.
    pub(crate) async fn collect<B, C>(
        &self,
        timeout: Duration,
        mut build: B,
        unpack_path: &str,
        next_cursor: C,
    ) -> Result<Vec<Value>, Error>
    where
        B: FnMut(Option<&str>) -> String,
        C: Fn(&[Value]) -> Option<String>,
    {
        let mut items: Vec<Value> = Vec::new();
        let mut cursor: Option<String> = None;

        loop {
            let payload = build(cursor.as_deref());
            let (reply, more) = self.post(payload, timeout).await?;
            let page = extract::list(&reply, unpack_path);
            let received = page.len();
            debug!(received, more, "listing page");
            items.extend(page);

            if !more || received == 0 {
                break;
            }
            cursor = next_cursor(&items);
            if cursor.is_none() {
                break;
            }
        }
        Ok(items)
    }

    /// Fetch `count` performance bins for the object in `target_xml` via
    /// the given show-pm action. Bin paging is positional: the next page
    /// starts at the bin after the last one received.
    pub(crate) async fn collect_bins(
        &self,
        node_id: &str,
        target_xml: &str,
        action_type: &str,
        bin_type: &str,
        count: usize,
    ) -> Result<Vec<PmBin>, Error> {
        let mut bins: Vec<PmBin> = Vec::new();

        loop {
            let start = bins.len() + 1;
            if start > count {
                break;
            }
            let remaining = count - bins.len();
            let args = format!(
                "{target_xml}<bin-type>{bin_type}</bin-type>\
                 <start-bin>{start}</start-bin><count>{remaining}</count>"
            );

            let (mid, session) = self.header().await;
            let payload = action(
                RpcHeader {
                    message_id: &mid,
                    node_id,
                    username: &self.username,
                    session_id: &session,
                },
                action_type,
                &args,
            );
            let (reply, more) = self.post(payload, self.timeout).await?;

            let types: Vec<String> = extract::text(&reply, BIN_TYPES)
                .map(|t| t.split_whitespace().map(str::to_owned).collect())
                .unwrap_or_default();
            let before = bins.len();
            for bin in extract::list(&reply, BIN_LIST) {
                if let Some(parsed) = zip_bin(&types, &bin) {
                    bins.push(parsed);
                }
            }
            debug!(received = bins.len() - before, more, "pm bin page");

            if bins.len() == before || !more {
                break;
            }
        }
        Ok(bins)
    }
}

/// Pair a bin's space-separated `val` string with the reply's counter
/// name list. A bin without values is dropped rather than zero-filled.
fn zip_bin(types: &[String], bin: &Value) -> Option<PmBin> {
    let vals = extract::text(bin, "val")?;
    Some(
        types
            .iter()
            .cloned()
            .zip(vals.split_whitespace().map(str::to_owned))
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn zips_counter_names_with_bin_values() {
        let types: Vec<String> = ["bip-err", "bip-err-sec", "miss-burst"]
            .iter()
            .map(|s| (*s).to_owned())
            .collect();
        let bin = json!({"bin-status": "valid", "val": "12 3 0"});
        let parsed = zip_bin(&types, &bin).expect("bin");
        assert_eq!(parsed.get("bip-err").map(String::as_str), Some("12"));
        assert_eq!(parsed.get("miss-burst").map(String::as_str), Some("0"));
    }

    #[test]
    fn bins_without_values_are_dropped() {
        let types = vec!["bip-err".to_owned()];
        assert!(zip_bin(&types, &json!({"bin-status": "missed"})).is_none());
    }
}
