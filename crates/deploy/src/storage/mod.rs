//! Storage adapters for deployment records.

mod file;
mod memory;

pub use file::FileStorageAdapter;
pub use memory::MemoryStorageAdapter;
