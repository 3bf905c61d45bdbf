//! In-memory instance store backed by `DashMap`.

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use rand::Rng;
use tracing::trace;

use crate::domain::error::DomainError;
use crate::domain::model::{InstanceId, InstanceSnapshot, OperationRecord, PopOutcome};
use crate::domain::repo::{InstanceStore, NextRecord};

/// Upper bound (inclusive) of generated instance ids.
pub const DEFAULT_MAX_INSTANCE_ID: u32 = 999_999;

/// In-memory store for instance histories.
///
/// Every operation on one id runs under that id's shard lock, which makes the
/// read-modify-write sequences (id generation, append, pop) atomic per id.
///
/// Ids are drawn uniformly from `1..=max_instance_id` and redrawn while they
/// collide with a live id. Ids of deleted instances may be handed out again.
pub struct InMemoryInstanceStore {
    histories: DashMap<InstanceId, Vec<OperationRecord>>,
    max_instance_id: u32,
}

impl InMemoryInstanceStore {
    /// Creates an empty store drawing ids from `1..=999_999`.
    #[must_use]
    pub fn new() -> Self {
        Self::with_max_instance_id(DEFAULT_MAX_INSTANCE_ID)
    }

    /// Creates an empty store drawing ids from `1..=max_instance_id`.
    ///
    /// A bound of zero is raised to one.
    #[must_use]
    pub fn with_max_instance_id(max_instance_id: u32) -> Self {
        Self {
            histories: DashMap::new(),
            max_instance_id: max_instance_id.max(1),
        }
    }

    fn draw_id(&self) -> InstanceId {
        InstanceId::new(rand::rng().random_range(1..=self.max_instance_id))
    }
}

impl Default for InMemoryInstanceStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InstanceStore for InMemoryInstanceStore {
    fn create(&self, initial: OperationRecord) -> InstanceId {
        loop {
            let id = self.draw_id();
            if let Entry::Vacant(slot) = self.histories.entry(id) {
                slot.insert(vec![initial]);
                return id;
            }
            trace!(%id, "Instance id collision, drawing again");
        }
    }

    fn get(&self, id: InstanceId) -> Option<Vec<OperationRecord>> {
        self.histories.get(&id).map(|history| history.value().clone())
    }

    fn append(&self, id: InstanceId, record: OperationRecord) -> Result<usize, DomainError> {
        let mut history = self
            .histories
            .get_mut(&id)
            .ok_or_else(|| DomainError::instance_not_found(id))?;
        history.push(record);
        Ok(history.len())
    }

    fn append_with(
        &self,
        id: InstanceId,
        next: &mut NextRecord<'_>,
    ) -> Result<InstanceSnapshot, DomainError> {
        let mut history = self
            .histories
            .get_mut(&id)
            .ok_or_else(|| DomainError::instance_not_found(id))?;
        let last = history
            .last()
            .copied()
            .ok_or_else(|| DomainError::instance_not_found(id))?;

        let record = next(&last)?;
        history.push(record);

        Ok(InstanceSnapshot {
            id,
            result: record.result,
            total_ops: history.len(),
        })
    }

    fn pop_last(&self, id: InstanceId) -> Result<PopOutcome, DomainError> {
        let Entry::Occupied(mut slot) = self.histories.entry(id) else {
            return Err(DomainError::instance_not_found(id));
        };

        let Some(popped) = slot.get_mut().pop() else {
            slot.remove();
            return Err(DomainError::instance_not_found(id));
        };

        match InstanceSnapshot::from_history(id, slot.get()) {
            Some(current) => Ok(PopOutcome::Remaining { popped, current }),
            None => {
                slot.remove();
                Ok(PopOutcome::Emptied { popped })
            }
        }
    }

    fn delete(&self, id: InstanceId) -> Result<(), DomainError> {
        self.histories
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| DomainError::instance_not_found(id))
    }

    fn len(&self) -> usize {
        self.histories.len()
    }
}
