//! Storage adapters and the file system implementation they build on.

mod file_storage;
mod file_system;
mod memory_storage;

pub use file_storage::FileStorage;
pub use file_system::TokioFileSystem;
pub use memory_storage::InMemoryStorage;
