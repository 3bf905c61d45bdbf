//! `OpenAPI` document for the calculator endpoints.

use utoipa::OpenApi;

use super::dto::{
    CalculationResponse, ErrorResponse, FailureResponse, HistoryClearedResponse, InitRequest,
    OperationRequest, ResetResponse, UndoRequest, UndoResponse,
};
use super::handlers;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Calculator API",
        description = "Stateful calculator with per-instance history, undo and reset"
    ),
    paths(handlers::init, handlers::operation, handlers::undo, handlers::reset),
    components(schemas(
        InitRequest,
        OperationRequest,
        UndoRequest,
        CalculationResponse,
        HistoryClearedResponse,
        UndoResponse,
        ResetResponse,
        FailureResponse,
        ErrorResponse,
    )),
    tags((name = "calculator", description = "Calculator instance operations"))
)]
pub struct CalculatorApiDoc;
