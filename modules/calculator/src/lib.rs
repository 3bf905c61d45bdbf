//! Calculator Module
//!
//! A stateful calculator exposed over REST. Every calculator instance keeps an
//! ordered history of the operations applied to it, which supports undo and
//! explicit reset.
//!
//! ## Architecture
//!
//! - `domain` holds the evaluator, the store port and the service orchestrating them
//! - `infra` holds the in-memory store implementation
//! - `api::rest` maps HTTP requests onto the service and publishes `OpenAPI`
//! - `module` wires configuration, store, service and routes together

pub mod config;
pub mod domain;
pub mod infra;
pub mod module;

#[doc(hidden)]
pub mod api;

pub use config::CalculatorConfig;
pub use domain::{
    CalculatorService, DomainError, EvalError, InstanceId, InstanceSnapshot, InstanceStore,
    OperationRecord, OperatorKind, PopOutcome, UndoOutcome,
};
pub use infra::InMemoryInstanceStore;
pub use module::CalculatorModule;
