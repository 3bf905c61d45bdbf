//! REST DTOs for the Calculator module.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::model::{InstanceId, InstanceSnapshot, UndoOutcome};

/// Request DTO for creating a calculator instance.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct InitRequest {
    /// First operand.
    pub num1: f64,
    /// Second operand.
    pub num2: f64,
    /// One of `add`, `subtract`, `multiply`, `divide`.
    pub operator: String,
}

/// Request DTO for applying an operation to an existing instance.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct OperationRequest {
    /// Operand applied to the instance's current value.
    pub num: f64,
    /// One of `add`, `subtract`, `multiply`, `divide`.
    pub operator: String,
    /// Instance id returned by `/init`.
    #[schema(value_type = f64)]
    pub id: serde_json::Number,
}

/// Request DTO for undoing the last operation of an instance.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct UndoRequest {
    /// Instance id returned by `/init`.
    #[schema(value_type = f64)]
    pub id: serde_json::Number,
}

/// Query parameters of `/reset`.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ResetQuery {
    /// Instance id returned by `/init`.
    pub id: Option<String>,
}

/// Current state of an instance after init, operation or undo.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CalculationResponse {
    /// Current value of the instance.
    pub result: f64,
    /// Number of operations in the instance history.
    pub total_ops: usize,
    pub id: u32,
}

impl From<InstanceSnapshot> for CalculationResponse {
    fn from(snapshot: InstanceSnapshot) -> Self {
        Self {
            result: snapshot.result,
            total_ops: snapshot.total_ops,
            id: snapshot.id.get(),
        }
    }
}

/// Returned by `/undo` when the last remaining operation was undone.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HistoryClearedResponse {
    pub message: String,
}

/// Response of `/undo`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum UndoResponse {
    Reverted(CalculationResponse),
    Cleared(HistoryClearedResponse),
}

impl From<UndoOutcome> for UndoResponse {
    fn from(outcome: UndoOutcome) -> Self {
        match outcome {
            UndoOutcome::Reverted(snapshot) => Self::Reverted(snapshot.into()),
            UndoOutcome::HistoryCleared => Self::Cleared(HistoryClearedResponse {
                message: "History cleared".to_owned(),
            }),
        }
    }
}

/// Response of `/reset`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ResetResponse {
    pub success: bool,
    pub message: String,
}

/// Failure body for rejected requests and evaluation errors.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FailureResponse {
    /// Always `false`.
    pub success: bool,
    pub error: String,
}

/// Failure body for unknown instance ids.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

/// Converts a JSON number into a live-able instance id.
///
/// Integral values qualify whatever their JSON spelling (`42`, `42.0`, `4.2e1`)
/// as long as they are positive and fit in `u32`.
pub(crate) fn instance_id_from_number(raw: &serde_json::Number) -> Option<InstanceId> {
    match raw.as_u64() {
        Some(n) => u32::try_from(n).ok().filter(|n| *n > 0).map(InstanceId::new),
        None => raw.as_f64().and_then(instance_id_from_f64),
    }
}

/// Converts the raw `/reset` query value into an instance id.
///
/// The value is read as a number, so `42`, `42.0` and `4.2e1` name the same
/// instance.
pub(crate) fn instance_id_from_query(raw: Option<&str>) -> Option<InstanceId> {
    let raw = raw?.trim();
    if let Ok(n) = raw.parse::<u32>() {
        return (n > 0).then_some(InstanceId::new(n));
    }
    raw.parse::<f64>().ok().and_then(instance_id_from_f64)
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn instance_id_from_f64(value: f64) -> Option<InstanceId> {
    let in_range = value.is_finite() && value >= 1.0 && value <= f64::from(u32::MAX);
    if !in_range || value.fract() != 0.0 {
        return None;
    }
    // Range and integrality are checked above.
    Some(InstanceId::new(value as u32))
}
