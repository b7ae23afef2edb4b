use std::sync::Arc;

use cmsgate_api::CmsClient;

/// Shared state injected into every handler.
#[derive(Clone)]
pub struct AppState {
    pub cms: Arc<CmsClient>,
}
