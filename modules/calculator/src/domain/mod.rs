//! Domain layer for the calculator module.
//!
//! The domain layer never imports `api::*`; the REST layer depends on it, not
//! the other way around.

pub mod error;
pub mod evaluator;
pub mod model;
pub mod repo;
pub mod service;

pub use error::DomainError;
pub use evaluator::{EvalError, OperatorKind, evaluate};
pub use model::{InstanceId, InstanceSnapshot, OperationRecord, PopOutcome, UndoOutcome};
pub use repo::InstanceStore;
pub use service::CalculatorService;
