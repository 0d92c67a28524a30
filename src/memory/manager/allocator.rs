/*!
 * Quick-Fit Allocation
 * Allocation and deallocation logic
 */

use super::super::types::{Allocation, BlockSource, Deallocation, MemoryError, MemoryResult};
use super::QuickFitManager;
use crate::core::types::{Pid, Size};
use log::{info, warn};

impl QuickFitManager {
    /// Allocate a block for a process.
    ///
    /// Tries the predefined classes first, in declaration order; falls back
    /// to the overflow pool; rejects if neither holds a fitting block. A pid
    /// that already holds a block is rejected without touching any state.
    pub fn allocate(&self, pid: Pid, size: Size) -> MemoryResult<Allocation> {
        let mut state = self.state.lock();

        if let Some(&held) = state.allocations.get(&pid) {
            warn!(
                "PID {} requested {} units but already holds {} units",
                pid, size, held
            );
            return Err(MemoryError::AlreadyAllocated { pid, held });
        }

        // Predefined classes first: the whole class block is granted
        if let Some(class_size) = state.free_lists.take_class_fit(size) {
            state.allocations.insert(pid, class_size);
            info!(
                "Allocated {} units (class {}) for PID {} ({} requested)",
                class_size, class_size, pid, size
            );
            return Ok(Allocation {
                granted: class_size,
                source: BlockSource::Class(class_size),
            });
        }

        // Overflow pool second: carve exactly the requested size out of the
        // pooled block and write off the remainder
        if let Some(block) = state.free_lists.take_overflow_fit(size) {
            state.allocations.insert(pid, size);
            state.carved_waste += block - size;
            info!(
                "Allocated {} units from overflow pool for PID {} (consumed block of {}, {} units lost)",
                size,
                pid,
                block,
                block - size
            );
            return Ok(Allocation {
                granted: size,
                source: BlockSource::OverflowPool,
            });
        }

        warn!(
            "PID {} cannot be allocated {} units: insufficient memory",
            pid, size
        );
        Err(MemoryError::InsufficientMemory {
            pid,
            requested: size,
        })
    }

    /// Deallocate the process's active allocation.
    ///
    /// Class-sized blocks rejoin their class free list at the back (FIFO
    /// reuse); any other size goes to the overflow pool.
    pub fn deallocate(&self, pid: Pid) -> MemoryResult<Deallocation> {
        let mut state = self.state.lock();

        let Some(size) = state.allocations.remove(&pid) else {
            warn!("PID {} attempted deallocation without an allocation", pid);
            return Err(MemoryError::NotAllocated { pid });
        };

        let returned_to = state.free_lists.release(size);
        info!(
            "Deallocated {} units from PID {}, returned to {}",
            size, pid, returned_to
        );

        Ok(Deallocation { size, returned_to })
    }

    /// Check whether a process currently holds an allocation
    pub fn is_allocated(&self, pid: Pid) -> bool {
        self.state.lock().allocations.contains_key(&pid)
    }
}
