pub mod memory;
pub mod model;
pub mod repo;
pub mod sqlite;

pub use memory::MemoryRepository;
#[cfg(test)]
pub use memory::FailingRepository;
pub use model::*;
pub use repo::*;
pub use sqlite::SqliteRepository;
