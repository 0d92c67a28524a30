/*!
 * Quick-Fit Memory Management
 *
 * Simulated Quick-Fit allocator over accounting units.
 *
 * ## Allocation policy
 *
 * - **Predefined classes first**: classes are scanned in declaration order,
 *   and the first class that is large enough and has a free block wins. The
 *   whole class block is granted.
 * - **Overflow pool second**: only when every eligible class is exhausted is
 *   the overflow pool scanned, in insertion order. The grant is carved to
 *   exactly the requested size; the rest of the consumed block is lost and
 *   tracked as `carved_waste`.
 * - **Reject otherwise**: no splitting, no blocking, no partial grants.
 *
 * ## Concurrency
 *
 * One allocator instance is one critical section: every operation takes the
 * single state mutex for its full duration, so clones of a manager share
 * state safely without any finer-grained locking.
 */

mod allocator;
mod free_list;
mod stats;

use super::types::{MemoryError, MemoryResult};
use crate::core::types::{Pid, Size};
use ahash::RandomState;
use free_list::ClassFreeLists;
use log::info;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;

/// Mutable allocator state, guarded as a whole
#[derive(Debug)]
struct AllocatorState {
    free_lists: ClassFreeLists,
    /// Active allocations: pid -> granted units
    allocations: HashMap<Pid, Size, RandomState>,
    /// Cumulative units lost to overflow carves
    carved_waste: Size,
}

/// Quick-Fit memory manager
#[derive(Debug)]
pub struct QuickFitManager {
    state: Arc<Mutex<AllocatorState>>,
    /// Declared size classes, immutable for the allocator's lifetime
    size_classes: Arc<[Size]>,
    total_memory: Size,
}

impl QuickFitManager {
    /// Create a manager with the given size classes and total memory budget.
    ///
    /// Each class's free list starts with `floor(total_memory / class_size)`
    /// blocks of the class size; the overflow pool starts empty.
    pub fn new(size_classes: &[Size], total_memory: Size) -> MemoryResult<Self> {
        if size_classes.is_empty() {
            return Err(MemoryError::EmptyClassList);
        }
        for (i, &size) in size_classes.iter().enumerate() {
            if size == 0 {
                return Err(MemoryError::InvalidClassSize(size));
            }
            if size_classes[..i].contains(&size) {
                return Err(MemoryError::DuplicateClassSize(size));
            }
        }
        if total_memory == 0 {
            return Err(MemoryError::InvalidTotalMemory(total_memory));
        }

        info!(
            "Quick-Fit manager initialized with classes {:?} over {} units",
            size_classes, total_memory
        );

        Ok(Self {
            state: Arc::new(Mutex::new(AllocatorState {
                free_lists: ClassFreeLists::new(size_classes, total_memory),
                allocations: HashMap::with_hasher(RandomState::new()),
                carved_waste: 0,
            })),
            size_classes: size_classes.into(),
            total_memory,
        })
    }

    /// Seed additional free blocks beyond the construction-time budget.
    ///
    /// Class-sized blocks join their class free list; anything else lands in
    /// the overflow pool. This is the only way to populate the overflow pool
    /// before any non-class-sized deallocation has happened, so scenario
    /// drivers and tests use it to exercise the overflow path.
    pub fn with_free_blocks(self, blocks: impl IntoIterator<Item = Size>) -> Self {
        {
            let mut state = self.state.lock();
            for block in blocks {
                state.free_lists.release(block);
            }
        }
        self
    }

    /// Declared size classes in declaration order
    pub fn size_classes(&self) -> &[Size] {
        &self.size_classes
    }

    /// Total memory budget supplied at construction
    pub fn total_memory(&self) -> Size {
        self.total_memory
    }
}

// Implement trait interfaces
impl super::traits::Allocator for QuickFitManager {
    fn allocate(&self, pid: Pid, size: Size) -> MemoryResult<super::types::Allocation> {
        QuickFitManager::allocate(self, pid, size)
    }

    fn deallocate(&self, pid: Pid) -> MemoryResult<super::types::Deallocation> {
        QuickFitManager::deallocate(self, pid)
    }

    fn is_allocated(&self, pid: Pid) -> bool {
        QuickFitManager::is_allocated(self, pid)
    }
}

impl super::traits::MemoryInfo for QuickFitManager {
    fn snapshot(&self) -> super::types::MemorySnapshot {
        QuickFitManager::snapshot(self)
    }

    fn stats(&self) -> super::types::MemoryStats {
        QuickFitManager::stats(self)
    }

    fn info(&self) -> (Size, Size, Size) {
        QuickFitManager::info(self)
    }

    fn process_memory(&self, pid: Pid) -> Size {
        QuickFitManager::process_memory(self, pid)
    }
}

impl Clone for QuickFitManager {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            size_classes: Arc::clone(&self.size_classes),
            total_memory: self.total_memory,
        }
    }
}
