use axum::Json;
use axum::extract::{Path, State};

use cmsgate_api::models::{ActionResult, DhcpLease, NodeAlarm};

use crate::error::ApiError;
use crate::state::AppState;

pub async fn alarms(
    State(state): State<AppState>,
    Path(node): Path<String>,
) -> Result<Json<Vec<NodeAlarm>>, ApiError> {
    Ok(Json(state.cms.get_node_alarms(&node).await?))
}

pub async fn leases(
    State(state): State<AppState>,
    Path(node): Path<String>,
) -> Result<Json<Vec<DhcpLease>>, ApiError> {
    Ok(Json(state.cms.get_dhcp_leases(&node).await?))
}

pub async fn clear_lease(
    State(state): State<AppState>,
    Path((node, mac)): Path<(String, String)>,
) -> Result<Json<ActionResult>, ApiError> {
    state.cms.clear_dhcp_lease(&node, &mac).await?;
    Ok(Json(ActionResult::ok()))
}
