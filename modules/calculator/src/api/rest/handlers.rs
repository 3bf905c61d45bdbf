//! REST handlers for the Calculator module.

use std::sync::Arc;

use axum::Json;
use axum::extract::rejection::QueryRejection;
use axum::extract::{Extension, Query};
use axum::http::StatusCode;

use super::dto::{
    CalculationResponse, ErrorResponse, FailureResponse, InitRequest, OperationRequest,
    ResetQuery, ResetResponse, UndoRequest, UndoResponse, instance_id_from_number,
    instance_id_from_query,
};
use super::error::{ApiError, JsonBody};
use crate::domain::service::CalculatorService;

pub type CalculatorResult<T> = Result<T, ApiError>;

/// POST /init
///
/// Evaluate `num1 <operator> num2` and create a calculator instance seeded with the result.
#[utoipa::path(
    post,
    path = "/init",
    tag = "calculator",
    request_body = InitRequest,
    responses(
        (status = 201, description = "Instance created", body = CalculationResponse),
        (status = 400, description = "Invalid operator, division by zero or malformed body", body = FailureResponse),
    )
)]
pub async fn init(
    Extension(service): Extension<Arc<CalculatorService>>,
    JsonBody(req): JsonBody<InitRequest>,
) -> CalculatorResult<(StatusCode, Json<CalculationResponse>)> {
    let snapshot = service.init(req.num1, req.num2, &req.operator)?;
    Ok((StatusCode::CREATED, Json(snapshot.into())))
}

/// POST /operation
///
/// Apply `<current value> <operator> num` to an existing instance.
#[utoipa::path(
    post,
    path = "/operation",
    tag = "calculator",
    request_body = OperationRequest,
    responses(
        (status = 200, description = "Operation applied", body = CalculationResponse),
        (status = 400, description = "Invalid operator, division by zero or malformed body; an unknown id is answered with `{\"error\": \"Invalid ID\"}`", body = FailureResponse),
    )
)]
pub async fn operation(
    Extension(service): Extension<Arc<CalculatorService>>,
    JsonBody(req): JsonBody<OperationRequest>,
) -> CalculatorResult<Json<CalculationResponse>> {
    let id = instance_id_from_number(&req.id).ok_or(ApiError::InvalidId)?;
    let snapshot = service.apply_operation(id, req.num, &req.operator)?;
    Ok(Json(snapshot.into()))
}

/// PUT /undo
///
/// Revert the last operation of an instance; undoing the only remaining
/// operation deletes the instance.
#[utoipa::path(
    put,
    path = "/undo",
    tag = "calculator",
    request_body = UndoRequest,
    responses(
        (status = 200, description = "Operation reverted or history cleared", body = UndoResponse),
        (status = 400, description = "Unknown instance id", body = ErrorResponse),
    )
)]
pub async fn undo(
    Extension(service): Extension<Arc<CalculatorService>>,
    JsonBody(req): JsonBody<UndoRequest>,
) -> CalculatorResult<Json<UndoResponse>> {
    let id = instance_id_from_number(&req.id).ok_or(ApiError::InvalidId)?;
    let outcome = service.undo(id)?;
    Ok(Json(outcome.into()))
}

/// GET /reset?id=<id>
///
/// Delete an instance and its history.
#[utoipa::path(
    get,
    path = "/reset",
    tag = "calculator",
    params(ResetQuery),
    responses(
        (status = 200, description = "Instance deleted", body = ResetResponse),
        (status = 400, description = "Unknown instance id", body = ErrorResponse),
    )
)]
pub async fn reset(
    Extension(service): Extension<Arc<CalculatorService>>,
    query: Result<Query<ResetQuery>, QueryRejection>,
) -> CalculatorResult<Json<ResetResponse>> {
    let Query(query) = query.map_err(|_| ApiError::ResetTargetMissing)?;
    let id = instance_id_from_query(query.id.as_deref()).ok_or(ApiError::ResetTargetMissing)?;

    let message = service
        .reset(id)
        .map_err(|_| ApiError::ResetTargetMissing)?;

    Ok(Json(ResetResponse {
        success: true,
        message,
    }))
}
