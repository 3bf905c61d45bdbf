//! REST API layer for the Calculator module.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod openapi;
pub mod routes;

pub use openapi::CalculatorApiDoc;
pub use routes::register_routes;
