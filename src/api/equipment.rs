//! Equipment API endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::{
    error::AppResult,
    models::{
        equipment::{CreateEquipment, Equipment, EquipmentQuery, UpdateEquipment},
        history::HistoryEntry,
        plan::LubricationPlan,
    },
};

/// Created equipment with the plan registered alongside it
#[derive(Serialize, ToSchema)]
pub struct EquipmentWithPlan {
    pub equipment: Equipment,
    pub plan: LubricationPlan,
}

/// Equipment history query
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct EquipmentHistoryQuery {
    pub limit: Option<i64>,
}

/// List equipment
#[utoipa::path(
    get,
    path = "/equipment",
    tag = "equipment",
    params(EquipmentQuery),
    responses(
        (status = 200, description = "Equipment list", body = Vec<Equipment>),
        (status = 400, description = "Invalid paging parameters")
    )
)]
pub async fn list_equipment(
    State(state): State<crate::AppState>,
    Query(query): Query<EquipmentQuery>,
) -> AppResult<Json<Vec<Equipment>>> {
    let equipment = state.services.equipment.list(&query).await?;
    Ok(Json(equipment))
}

/// Get equipment by ID
#[utoipa::path(
    get,
    path = "/equipment/{id}",
    tag = "equipment",
    params(("id" = i32, Path, description = "Equipment ID")),
    responses(
        (status = 200, description = "Equipment details", body = Equipment),
        (status = 404, description = "Equipment not found")
    )
)]
pub async fn get_equipment(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Equipment>> {
    let equipment = state.services.equipment.get_by_id(id).await?;
    Ok(Json(equipment))
}

/// Register equipment and its lubrication plan
#[utoipa::path(
    post,
    path = "/equipment",
    tag = "equipment",
    request_body = CreateEquipment,
    responses(
        (status = 201, description = "Equipment created", body = EquipmentWithPlan),
        (status = 400, description = "Invalid request"),
        (status = 409, description = "Name already in use")
    )
)]
pub async fn create_equipment(
    State(state): State<crate::AppState>,
    Json(data): Json<CreateEquipment>,
) -> AppResult<(StatusCode, Json<EquipmentWithPlan>)> {
    let (equipment, plan) = state.services.equipment.create(&data).await?;
    Ok((StatusCode::CREATED, Json(EquipmentWithPlan { equipment, plan })))
}

/// Update equipment
#[utoipa::path(
    put,
    path = "/equipment/{id}",
    tag = "equipment",
    params(("id" = i32, Path, description = "Equipment ID")),
    request_body = UpdateEquipment,
    responses(
        (status = 200, description = "Equipment updated", body = Equipment),
        (status = 404, description = "Equipment not found")
    )
)]
pub async fn update_equipment(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    Json(data): Json<UpdateEquipment>,
) -> AppResult<Json<Equipment>> {
    let equipment = state.services.equipment.update(id, &data).await?;
    Ok(Json(equipment))
}

/// Deactivate equipment (soft delete; history is kept)
#[utoipa::path(
    delete,
    path = "/equipment/{id}",
    tag = "equipment",
    params(("id" = i32, Path, description = "Equipment ID")),
    responses(
        (status = 200, description = "Equipment deactivated", body = Equipment),
        (status = 404, description = "Equipment not found")
    )
)]
pub async fn delete_equipment(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<Equipment>> {
    let equipment = state.services.equipment.deactivate(id).await?;
    Ok(Json(equipment))
}

/// Get the lubrication plan of an equipment unit
#[utoipa::path(
    get,
    path = "/equipment/{id}/plan",
    tag = "equipment",
    params(("id" = i32, Path, description = "Equipment ID")),
    responses(
        (status = 200, description = "Current plan", body = LubricationPlan),
        (status = 404, description = "Equipment or plan not found")
    )
)]
pub async fn get_equipment_plan(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
) -> AppResult<Json<LubricationPlan>> {
    let plan = state.services.lubrication.get_equipment_plan(id).await?;
    Ok(Json(plan))
}

/// Lubrication history of an equipment unit, newest first
#[utoipa::path(
    get,
    path = "/equipment/{id}/history",
    tag = "equipment",
    params(("id" = i32, Path, description = "Equipment ID"), EquipmentHistoryQuery),
    responses(
        (status = 200, description = "Executions", body = Vec<HistoryEntry>),
        (status = 404, description = "Equipment not found")
    )
)]
pub async fn get_equipment_history(
    State(state): State<crate::AppState>,
    Path(id): Path<i32>,
    Query(query): Query<EquipmentHistoryQuery>,
) -> AppResult<Json<Vec<HistoryEntry>>> {
    let limit = state.services.lubrication.history_limit(query.limit)?;
    let history = state.services.lubrication.list_equipment_history(id, limit).await?;
    Ok(Json(history))
}
