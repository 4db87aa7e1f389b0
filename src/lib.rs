pub mod config;
pub mod error;
pub mod memory;
pub mod page_table;
pub mod process;

// Re-export commonly used items for convenience
pub use config::{ConfigError, MemoryConfig};
pub use error::MemoryError;
pub use memory::{MemoryManager, MemoryStats, ProcessReport, Translation};
pub use page_table::{PageTable, PageTableEntry};
pub use process::{ContentSource, Process, ProcessId, RandomContent};
