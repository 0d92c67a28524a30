/*!
 * Quick-Fit Allocator Library
 * Simulated Quick-Fit memory management exposed as a library
 */

pub mod core;
pub mod memory;

// Re-exports
pub use crate::core::types::{Pid, Size};
pub use memory::{
    Allocation, Allocator, BlockSource, Deallocation, MemoryError, MemoryInfo, MemoryPressure,
    MemoryResult, MemorySnapshot, MemoryStats, QuickFitManager,
};
