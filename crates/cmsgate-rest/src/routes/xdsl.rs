use axum::Json;
use axum::extract::{Path, State};
use serde_json::{Value, json};

use cmsgate_api::models::{ActionResult, ModemPerformance, ModemStatus, XdslLineTest};

use crate::error::ApiError;
use crate::state::AppState;

/// Provisioned view of one DSL port together with its bridged Ethernet
/// interface, the two objects subscribers are usually diagnosed from.
pub async fn overview(
    State(state): State<AppState>,
    Path((node, shelf, card, intf)): Path<(String, i64, i64, i64)>,
) -> Result<Json<Value>, ApiError> {
    let port = state.cms.get_xdsl_port(&node, shelf, card, intf).await?;
    let interface = state.cms.get_xdsl_interface(&node, shelf, card, intf).await?;
    Ok(Json(json!({ "port": port, "interface": interface })))
}

pub async fn status(
    State(state): State<AppState>,
    Path((node, shelf, card, intf)): Path<(String, i64, i64, i64)>,
) -> Result<Json<ModemStatus>, ApiError> {
    Ok(Json(state.cms.get_xdsl_status(&node, shelf, card, intf).await?))
}

pub async fn performance(
    State(state): State<AppState>,
    Path((node, shelf, card, intf)): Path<(String, i64, i64, i64)>,
) -> Result<Json<ModemPerformance>, ApiError> {
    Ok(Json(
        state.cms.get_xdsl_performance(&node, shelf, card, intf).await?,
    ))
}

/// Runs the copper loop test; the client uses its long per-call
/// timeout, so this request can take tens of seconds.
pub async fn line_test(
    State(state): State<AppState>,
    Path((node, shelf, card, pots)): Path<(String, i64, i64, i64)>,
) -> Result<Json<XdslLineTest>, ApiError> {
    Ok(Json(
        state.cms.run_xdsl_line_test(&node, shelf, card, pots).await?,
    ))
}

pub async fn enable(
    State(state): State<AppState>,
    Path((node, shelf, card, intf)): Path<(String, i64, i64, i64)>,
) -> Result<Json<ActionResult>, ApiError> {
    state.cms.enable_xdsl_port(&node, shelf, card, intf).await?;
    Ok(Json(ActionResult::ok()))
}

pub async fn disable(
    State(state): State<AppState>,
    Path((node, shelf, card, intf)): Path<(String, i64, i64, i64)>,
) -> Result<Json<ActionResult>, ApiError> {
    state.cms.disable_xdsl_port(&node, shelf, card, intf).await?;
    Ok(Json(ActionResult::ok()))
}

pub async fn enable_bonding(
    State(state): State<AppState>,
    Path((node, shelf, card, intf)): Path<(String, i64, i64, i64)>,
) -> Result<Json<ActionResult>, ApiError> {
    state
        .cms
        .enable_xdsl_bonding_group(&node, shelf, card, intf)
        .await?;
    Ok(Json(ActionResult::ok()))
}

pub async fn disable_bonding(
    State(state): State<AppState>,
    Path((node, shelf, card, intf)): Path<(String, i64, i64, i64)>,
) -> Result<Json<ActionResult>, ApiError> {
    state
        .cms
        .disable_xdsl_bonding_group(&node, shelf, card, intf)
        .await?;
    Ok(Json(ActionResult::ok()))
}
