//! Domain models for calculator instances and their history.

use std::fmt;

use super::evaluator::OperatorKind;

/// Identifier of a live calculator instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InstanceId(u32);

impl InstanceId {
    #[must_use]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl From<u32> for InstanceId {
    fn from(raw: u32) -> Self {
        Self(raw)
    }
}

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// One step of an instance history: the operator applied and the value it produced.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OperationRecord {
    pub operator: OperatorKind,
    pub result: f64,
}

impl OperationRecord {
    #[must_use]
    pub const fn new(operator: OperatorKind, result: f64) -> Self {
        Self { operator, result }
    }
}

/// Externally visible state of an instance after a successful operation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InstanceSnapshot {
    pub id: InstanceId,
    /// Current value (result of the last record).
    pub result: f64,
    /// Number of records in the history.
    pub total_ops: usize,
}

impl InstanceSnapshot {
    /// Builds a snapshot from a history; `None` for an empty history.
    #[must_use]
    pub fn from_history(id: InstanceId, history: &[OperationRecord]) -> Option<Self> {
        history.last().map(|last| Self {
            id,
            result: last.result,
            total_ops: history.len(),
        })
    }
}

/// Result of removing the last record from a stored history.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PopOutcome {
    /// Records remain; `current` reflects the new last record.
    Remaining {
        popped: OperationRecord,
        current: InstanceSnapshot,
    },
    /// The popped record was the only one; the instance has been deleted.
    Emptied { popped: OperationRecord },
}

/// Result of an undo as seen by callers of the service.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UndoOutcome {
    Reverted(InstanceSnapshot),
    HistoryCleared,
}

impl From<PopOutcome> for UndoOutcome {
    fn from(outcome: PopOutcome) -> Self {
        match outcome {
            PopOutcome::Remaining { current, .. } => Self::Reverted(current),
            PopOutcome::Emptied { .. } => Self::HistoryCleared,
        }
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp, clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_from_history() {
        let id = InstanceId::new(42);
        let history = [
            OperationRecord::new(OperatorKind::Add, 30.0),
            OperationRecord::new(OperatorKind::Multiply, 300.0),
        ];

        let snapshot = InstanceSnapshot::from_history(id, &history).unwrap();
        assert_eq!(snapshot.id, id);
        assert_eq!(snapshot.result, 300.0);
        assert_eq!(snapshot.total_ops, 2);

        assert!(InstanceSnapshot::from_history(id, &[]).is_none());
    }

    #[test]
    fn test_pop_outcome_to_undo_outcome() {
        let popped = OperationRecord::new(OperatorKind::Add, 1.0);
        assert_eq!(
            UndoOutcome::from(PopOutcome::Emptied { popped }),
            UndoOutcome::HistoryCleared
        );

        let current = InstanceSnapshot {
            id: InstanceId::new(7),
            result: 5.0,
            total_ops: 1,
        };
        assert_eq!(
            UndoOutcome::from(PopOutcome::Remaining { popped, current }),
            UndoOutcome::Reverted(current)
        );
    }

    #[test]
    fn test_instance_id_display() {
        assert_eq!(InstanceId::from(12345).to_string(), "12345");
    }
}
