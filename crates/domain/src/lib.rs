//! Courier Domain - Core business types
//!
//! This crate defines the domain model for the Courier API client:
//! collections, folders, stored requests and environments.
//! All types here are pure Rust with no I/O dependencies.

pub mod collection;
pub mod environment;
pub mod error;
pub mod id;
pub mod request;

pub use collection::{Collection, Folder};
pub use environment::{Environment, VariableMap};
pub use error::{DomainError, DomainResult};
pub use id::{Id, generate_id};
pub use request::{HttpMethod, Request, RequestBody, is_json_mime};
