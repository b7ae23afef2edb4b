// cmsgate-api: Async Rust client for the CMS NETCONF-over-SOAP northbound interface

pub mod error;
pub mod models;
pub mod netconf;

pub use error::Error;
pub use netconf::CmsClient;
