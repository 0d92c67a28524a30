/*!
 * Memory Traits
 * Quick-Fit allocator abstractions
 */

use super::types::*;
use crate::core::types::{Pid, Size};

/// Memory allocator interface
pub trait Allocator: Send + Sync {
    /// Allocate memory for a process
    fn allocate(&self, pid: Pid, size: Size) -> MemoryResult<Allocation>;

    /// Deallocate the process's active allocation
    fn deallocate(&self, pid: Pid) -> MemoryResult<Deallocation>;

    /// Check whether a process currently holds an allocation
    fn is_allocated(&self, pid: Pid) -> bool;
}

/// Memory statistics provider
pub trait MemoryInfo: Send + Sync {
    /// Get an immutable view of free lists, overflow pool and allocations
    fn snapshot(&self) -> MemorySnapshot;

    /// Get overall memory statistics
    fn stats(&self) -> MemoryStats;

    /// Get memory info as (total, used, available)
    fn info(&self) -> (Size, Size, Size);

    /// Get units held by a specific process
    fn process_memory(&self, pid: Pid) -> Size;

    /// Get memory pressure level
    fn pressure(&self) -> MemoryPressure {
        self.stats().memory_pressure()
    }
}
