// NETCONF-over-SOAP client modules
//
// Hand-written client for the CMS northbound interface: an XML RPC
// protocol POSTed over HTTP to port 18080. The envelope codec, field
// extraction, and pagination are pure; `client` owns the transport and
// per-domain operation files (ont, xdsl, node) add inherent methods.

pub mod client;
pub mod envelope;
pub mod extract;
pub mod node;
pub mod ont;
pub mod paging;
pub mod session;
pub mod tree;
pub mod xdsl;

pub use client::CmsClient;
pub use envelope::{Children, EditOp, RpcHeader, Selector};
