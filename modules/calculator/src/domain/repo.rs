//! Store port for calculator instance histories.

use super::error::DomainError;
use super::model::{InstanceId, InstanceSnapshot, OperationRecord, PopOutcome};

/// Computes the next record from the current last record of a history.
pub type NextRecord<'a> = dyn FnMut(&OperationRecord) -> Result<OperationRecord, DomainError> + 'a;

/// Storage interface for instance histories used by the domain service.
///
/// A stored history is never empty. Implementations must make every method
/// atomic with respect to a single instance id, so that concurrent calls on
/// the same id cannot lose updates.
pub trait InstanceStore: Send + Sync {
    /// Stores a new single-record history under a freshly generated id.
    ///
    /// The id is unique among the currently live instances.
    fn create(&self, initial: OperationRecord) -> InstanceId;

    /// Returns a copy of the history of `id`, if it is live.
    fn get(&self, id: InstanceId) -> Option<Vec<OperationRecord>>;

    /// Appends `record` to the history of `id` and returns the new length.
    ///
    /// # Errors
    ///
    /// Returns `InstanceNotFound` if `id` is not live.
    fn append(&self, id: InstanceId, record: OperationRecord) -> Result<usize, DomainError>;

    /// Computes the next record from the last one and appends it, as one step.
    ///
    /// When `next` fails the history is left untouched and its error is returned.
    ///
    /// # Errors
    ///
    /// Returns `InstanceNotFound` if `id` is not live (before `next` is
    /// invoked), or the error produced by `next`.
    fn append_with(
        &self,
        id: InstanceId,
        next: &mut NextRecord<'_>,
    ) -> Result<InstanceSnapshot, DomainError>;

    /// Removes the last record of `id`, deleting the instance once its history is empty.
    ///
    /// # Errors
    ///
    /// Returns `InstanceNotFound` if `id` is not live.
    fn pop_last(&self, id: InstanceId) -> Result<PopOutcome, DomainError>;

    /// Removes the instance entirely.
    ///
    /// # Errors
    ///
    /// Returns `InstanceNotFound` if `id` is not live.
    fn delete(&self, id: InstanceId) -> Result<(), DomainError>;

    /// Number of live instances.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
