//! Domain service for the calculator module.
//!
//! Sequences evaluator and store for the four instance operations. Each
//! operation either fully succeeds or leaves the store as it was.

use std::sync::Arc;

use tracing::{debug, instrument};

use super::error::DomainError;
use super::evaluator::OperatorKind;
use super::model::{InstanceId, InstanceSnapshot, OperationRecord, UndoOutcome};
use super::repo::InstanceStore;

/// Domain service orchestrating calculator instances.
pub struct CalculatorService {
    store: Arc<dyn InstanceStore>,
}

impl CalculatorService {
    /// Creates a new `CalculatorService` backed by the given store.
    #[must_use]
    pub fn new(store: Arc<dyn InstanceStore>) -> Self {
        Self { store }
    }

    /// Evaluates `num1 <operator> num2` and creates an instance seeded with the result.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Eval` when the operation cannot be evaluated; no
    /// instance is created in that case.
    #[instrument(skip(self))]
    pub fn init(
        &self,
        num1: f64,
        num2: f64,
        operator: &str,
    ) -> Result<InstanceSnapshot, DomainError> {
        let operator: OperatorKind = operator.parse()?;
        let result = operator.apply(num1, num2)?;
        let id = self.store.create(OperationRecord::new(operator, result));

        debug!(%id, result, "Calculator instance created");
        Ok(InstanceSnapshot {
            id,
            result,
            total_ops: 1,
        })
    }

    /// Applies `<current value> <operator> num` to the instance `id`.
    ///
    /// # Errors
    ///
    /// Returns `InstanceNotFound` for an unknown id (regardless of operator and
    /// operand), or `DomainError::Eval` when evaluation fails. Failures leave
    /// the history unchanged.
    #[instrument(skip(self), fields(%id))]
    pub fn apply_operation(
        &self,
        id: InstanceId,
        num: f64,
        operator: &str,
    ) -> Result<InstanceSnapshot, DomainError> {
        let mut next = |last: &OperationRecord| -> Result<OperationRecord, DomainError> {
            let operator: OperatorKind = operator.parse()?;
            let result = operator.apply(last.result, num)?;
            Ok(OperationRecord::new(operator, result))
        };
        let snapshot = self.store.append_with(id, &mut next)?;

        debug!(
            result = snapshot.result,
            total_ops = snapshot.total_ops,
            "Operation applied"
        );
        Ok(snapshot)
    }

    /// Reverts the last operation of instance `id`.
    ///
    /// Undoing the only remaining record deletes the instance.
    ///
    /// # Errors
    ///
    /// Returns `InstanceNotFound` for an unknown id.
    #[instrument(skip(self), fields(%id))]
    pub fn undo(&self, id: InstanceId) -> Result<UndoOutcome, DomainError> {
        let outcome = UndoOutcome::from(self.store.pop_last(id)?);
        match outcome {
            UndoOutcome::Reverted(current) => {
                debug!(
                    result = current.result,
                    total_ops = current.total_ops,
                    "Last operation undone"
                );
            }
            UndoOutcome::HistoryCleared => debug!("History cleared, instance removed"),
        }
        Ok(outcome)
    }

    /// Deletes instance `id` and returns a confirmation message.
    ///
    /// # Errors
    ///
    /// Returns `InstanceNotFound` for an unknown id.
    #[instrument(skip(self), fields(%id))]
    pub fn reset(&self, id: InstanceId) -> Result<String, DomainError> {
        self.store.delete(id)?;
        debug!("Calculator instance reset");
        Ok(format!("Calculator {id} is now reset"))
    }

    /// Returns the history of instance `id`, oldest record first.
    #[must_use]
    pub fn history(&self, id: InstanceId) -> Option<Vec<OperationRecord>> {
        self.store.get(id)
    }

    /// Number of live instances.
    #[must_use]
    pub fn live_instances(&self) -> usize {
        self.store.len()
    }
}
