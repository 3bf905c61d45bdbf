//! Domain error types for the calculator module.

use thiserror::Error;

use super::evaluator::EvalError;
use super::model::InstanceId;

/// Domain-level errors for the calculator module.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The operation could not be evaluated.
    #[error(transparent)]
    Eval(#[from] EvalError),

    /// No live instance has the given id.
    #[error("Calculator instance not found: {id}")]
    InstanceNotFound { id: InstanceId },
}

impl DomainError {
    #[must_use]
    pub fn instance_not_found(id: InstanceId) -> Self {
        Self::InstanceNotFound { id }
    }

    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::InstanceNotFound { .. })
    }
}
