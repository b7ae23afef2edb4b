// Typed records built from reply trees.
//
// Every leaf field is an `Option`: the controller omits attributes it
// has no value for, and an absent leaf must stay `None` rather than a
// sentinel default. Each field is one extraction against a fixed path;
// the constructors take the relevant reply subtree plus the addressing
// context (node, ids) that the reply itself does not echo back.

pub mod modem;
pub mod node;
pub mod ont;

use serde::Serialize;

pub use modem::{ModemInterface, ModemPerformance, ModemPort, ModemStatus, XdslLineTest};
pub use node::{DhcpLease, NodeAlarm};
pub use ont::{OntGeneral, OntList, OntPerformance, OntPort, OntService, OntStatus, OntVoice};

/// Outcome of a fire-and-forget operation (resets, admin toggles).
#[derive(Debug, Clone, Serialize)]
pub struct ActionResult {
    pub success: bool,
    pub info: String,
}

impl ActionResult {
    pub fn ok() -> Self {
        Self {
            success: true,
            info: String::new(),
        }
    }
}
