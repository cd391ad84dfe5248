//! Application use cases (business logic orchestration).

mod add_request;
mod delete_request;
mod resolve_request;
mod set_variables;

pub use add_request::*;
pub use delete_request::*;
pub use resolve_request::*;
pub use set_variables::*;

#[cfg(test)]
pub(crate) mod test_support;
