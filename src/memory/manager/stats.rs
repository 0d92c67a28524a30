/*!
 * Quick-Fit Inspection
 * Snapshot and statistics read operations
 */

use super::super::types::{MemorySnapshot, MemoryStats};
use super::QuickFitManager;
use crate::core::types::{Pid, Size};
use log::debug;

impl QuickFitManager {
    /// Get an immutable view of the free lists, overflow pool and
    /// allocation map. Read-only; the state is copied out under the lock.
    pub fn snapshot(&self) -> MemorySnapshot {
        let state = self.state.lock();
        debug!(
            "Snapshot: {} active allocations, {} free blocks, {} overflow blocks",
            state.allocations.len(),
            state.free_lists.free_block_count(),
            state.free_lists.overflow_len()
        );
        MemorySnapshot {
            classes: state.free_lists.class_snapshots(),
            overflow_pool: state.free_lists.overflow_snapshot(),
            allocations: state.allocations.clone(),
        }
    }

    /// Get overall memory info: (total, used, available).
    ///
    /// Used memory counts live granted units plus units lost to overflow
    /// carves, so total = used + available holds across carves.
    pub fn info(&self) -> (Size, Size, Size) {
        let state = self.state.lock();
        let used = state.allocations.values().sum::<Size>() + state.carved_waste;
        (
            self.total_memory,
            used,
            self.total_memory.saturating_sub(used),
        )
    }

    /// Get detailed memory statistics
    pub fn stats(&self) -> MemoryStats {
        let state = self.state.lock();
        let used = state.allocations.values().sum::<Size>() + state.carved_waste;

        MemoryStats {
            total_memory: self.total_memory,
            used_memory: used,
            available_memory: self.total_memory.saturating_sub(used),
            usage_percentage: (used as f64 / self.total_memory as f64) * 100.0,
            allocated_blocks: state.allocations.len(),
            free_blocks: state.free_lists.free_block_count(),
            overflow_blocks: state.free_lists.overflow_len(),
            carved_waste: state.carved_waste,
        }
    }

    /// Get units held by a specific process, 0 if it holds nothing
    pub fn process_memory(&self, pid: Pid) -> Size {
        self.state.lock().allocations.get(&pid).copied().unwrap_or(0)
    }
}
