//! rollsink Store - durable, rotated log files on disk
//!
//! Provides:
//! - Session naming (session directory and per-index file names)
//! - The rotating file writer with bounded incremental search and retries
//! - A `LogFileSystem` seam so I/O faults can be simulated

pub mod errors;
pub mod fs;
pub mod naming;
pub mod writer;

// Re-export key types
pub use errors::Result;
pub use fs::{LogFileSystem, StdFileSystem};
pub use writer::FileWriter;
