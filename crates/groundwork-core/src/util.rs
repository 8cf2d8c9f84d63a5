//! Utility modules for filesystem, process, and data handling.

pub mod data;
pub mod fs;
pub mod process;
