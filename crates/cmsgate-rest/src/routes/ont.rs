use axum::Json;
use axum::extract::{Path, Query, State};
use serde::Deserialize;

use cmsgate_api::models::{
    ActionResult, OntGeneral, OntList, OntPerformance, OntPort, OntService, OntStatus, OntVoice,
};

use crate::error::ApiError;
use crate::state::AppState;

/// PM history query. The controller keeps 8 daily and 96 quarter-hour
/// bins; asking past the retention is rejected before anything is sent.
#[derive(Debug, Deserialize)]
pub struct ErrorsQuery {
    #[serde(default = "default_interval")]
    interval: String,
    count: Option<usize>,
}

fn default_interval() -> String {
    "1-day".to_owned()
}

impl ErrorsQuery {
    fn validated(&self) -> Result<(&str, usize), ApiError> {
        let cap = match self.interval.as_str() {
            "1-day" => 8,
            "15-min" => 96,
            other => {
                return Err(ApiError::Validation(format!("unknown interval {other:?}")));
            }
        };
        let count = self.count.unwrap_or(cap);
        if count == 0 || count > cap {
            return Err(ApiError::Validation(format!(
                "count must be between 1 and {cap} for interval {}",
                self.interval
            )));
        }
        Ok((self.interval.as_str(), count))
    }
}

#[derive(Debug, Deserialize)]
pub struct ResetQuery {
    #[serde(default)]
    force: bool,
}

pub async fn general(
    State(state): State<AppState>,
    Path((node, ont)): Path<(String, String)>,
) -> Result<Json<OntGeneral>, ApiError> {
    Ok(Json(state.cms.get_ont(&node, &ont).await?))
}

pub async fn status(
    State(state): State<AppState>,
    Path((node, ont)): Path<(String, String)>,
) -> Result<Json<OntStatus>, ApiError> {
    Ok(Json(state.cms.get_ont_status(&node, &ont).await?))
}

pub async fn performance(
    State(state): State<AppState>,
    Path((node, ont)): Path<(String, String)>,
) -> Result<Json<OntPerformance>, ApiError> {
    Ok(Json(state.cms.get_ont_performance(&node, &ont).await?))
}

pub async fn errors(
    State(state): State<AppState>,
    Path((node, ont)): Path<(String, String)>,
    Query(query): Query<ErrorsQuery>,
) -> Result<Json<Vec<OntPerformance>>, ApiError> {
    let (interval, count) = query.validated()?;
    Ok(Json(
        state.cms.get_ont_errors(&node, &ont, interval, count).await?,
    ))
}

pub async fn clear_errors(
    State(state): State<AppState>,
    Path((node, ont)): Path<(String, String)>,
) -> Result<Json<ActionResult>, ApiError> {
    state.cms.clear_ont_errors(&node, &ont).await?;
    Ok(Json(ActionResult::ok()))
}

pub async fn port(
    State(state): State<AppState>,
    Path((node, ont, port)): Path<(String, String, i64)>,
) -> Result<Json<OntPort>, ApiError> {
    Ok(Json(state.cms.get_ont_port(&node, &ont, port).await?))
}

pub async fn port_service(
    State(state): State<AppState>,
    Path((node, ont, port)): Path<(String, String, i64)>,
) -> Result<Json<OntService>, ApiError> {
    Ok(Json(state.cms.get_ont_port_service(&node, &ont, port).await?))
}

pub async fn voice_service(
    State(state): State<AppState>,
    Path((node, ont, port)): Path<(String, String, i64)>,
) -> Result<Json<OntVoice>, ApiError> {
    Ok(Json(state.cms.get_ont_voice_service(&node, &ont, port).await?))
}

pub async fn reset(
    State(state): State<AppState>,
    Path((node, ont)): Path<(String, String)>,
    Query(query): Query<ResetQuery>,
) -> Result<Json<ActionResult>, ApiError> {
    state.cms.reset_ont(&node, &ont, query.force).await?;
    Ok(Json(ActionResult::ok()))
}

// The path segment is the ONT serial here, not a provisioning id; the
// quarantine pool is keyed by serial number.
pub async fn quarantine(
    State(state): State<AppState>,
    Path((node, serial)): Path<(String, String)>,
) -> Result<Json<ActionResult>, ApiError> {
    state.cms.quarantine_ont(&node, &serial).await?;
    Ok(Json(ActionResult::ok()))
}

pub async fn release(
    State(state): State<AppState>,
    Path((node, serial)): Path<(String, String)>,
) -> Result<Json<ActionResult>, ApiError> {
    state.cms.release_ont(&node, &serial).await?;
    Ok(Json(ActionResult::ok()))
}

pub async fn enable(
    State(state): State<AppState>,
    Path((node, ont)): Path<(String, String)>,
) -> Result<Json<ActionResult>, ApiError> {
    state.cms.enable_ont(&node, &ont).await?;
    Ok(Json(ActionResult::ok()))
}

pub async fn disable(
    State(state): State<AppState>,
    Path((node, ont)): Path<(String, String)>,
) -> Result<Json<ActionResult>, ApiError> {
    state.cms.disable_ont(&node, &ont).await?;
    Ok(Json(ActionResult::ok()))
}

pub async fn enable_port(
    State(state): State<AppState>,
    Path((node, ont, port)): Path<(String, String, i64)>,
) -> Result<Json<ActionResult>, ApiError> {
    state.cms.enable_ont_port(&node, &ont, port).await?;
    Ok(Json(ActionResult::ok()))
}

pub async fn disable_port(
    State(state): State<AppState>,
    Path((node, ont, port)): Path<(String, String, i64)>,
) -> Result<Json<ActionResult>, ApiError> {
    state.cms.disable_ont_port(&node, &ont, port).await?;
    Ok(Json(ActionResult::ok()))
}

pub async fn list_on_gpon(
    State(state): State<AppState>,
    Path((node, shelf, card, gpon)): Path<(String, i64, i64, i64)>,
) -> Result<Json<OntList>, ApiError> {
    Ok(Json(
        state.cms.list_onts_on_gpon(&node, shelf, card, gpon).await?,
    ))
}
