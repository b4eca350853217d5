mod json_file;
mod memory;

pub use self::{json_file::JsonFileStore, memory::MemoryStore};
