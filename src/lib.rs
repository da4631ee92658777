// Export modules for library usage
pub mod cli;
pub mod commands;
pub mod errors;
pub mod memory;
pub mod mtx;

// Re-export commonly used types
pub use errors::{Error, Result};
pub use memory::MemorySnapshot;
pub use mtx::{
    desym_output_path, desymmetrize, desymmetrize_file, DesymStats, DesymSummary, Entry, Header,
    Reader, Record,
};
