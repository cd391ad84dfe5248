//! Courier Application - Use cases and ports
//!
//! This crate contains the business logic orchestration layer:
//! the storage ports, the `{{variable}}` resolver and the use cases that
//! operate on stored collections, requests and environments.

pub mod error;
pub mod ports;
pub mod use_cases;
pub mod variable_resolver;

pub use error::{ApplicationError, ApplicationResult};
