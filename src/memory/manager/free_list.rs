/*!
 * Segregated Free Lists
 * Per-class free lists plus the overflow pool
 */

use super::super::types::{BlockSource, ClassSnapshot};
use crate::core::types::Size;
use std::collections::VecDeque;

/// One size class and its free list
#[derive(Debug)]
pub(super) struct ClassList {
    pub size: Size,
    /// Available blocks; popped from the front, refilled at the back
    pub blocks: VecDeque<Size>,
}

/// Segregated free lists in class declaration order, with an overflow pool
/// for blocks that match no declared class.
///
/// Quick-Fit scans the classes first-fit in declaration order; the pool is
/// only ever consulted after every eligible class came up empty.
#[derive(Debug)]
pub(super) struct ClassFreeLists {
    classes: Vec<ClassList>,
    overflow: Vec<Size>,
}

impl ClassFreeLists {
    /// Build the initial free lists: floor(total / class_size) blocks per
    /// class, each block equal to the class size. Class validation is the
    /// manager's job; sizes here are assumed positive and distinct.
    pub fn new(size_classes: &[Size], total_memory: Size) -> Self {
        let classes = size_classes
            .iter()
            .map(|&size| ClassList {
                size,
                blocks: std::iter::repeat(size).take(total_memory / size).collect(),
            })
            .collect();

        Self {
            classes,
            overflow: Vec::new(),
        }
    }

    /// First-fit scan over the classes in declaration order. Pops the
    /// earliest-inserted block of the first non-empty class that is large
    /// enough and returns its class size.
    pub fn take_class_fit(&mut self, size: Size) -> Option<Size> {
        for class in &mut self.classes {
            if class.size >= size {
                if let Some(block) = class.blocks.pop_front() {
                    return Some(block);
                }
            }
        }
        None
    }

    /// First-fit scan of the overflow pool in insertion order. Removes and
    /// returns the first block large enough for the request.
    pub fn take_overflow_fit(&mut self, size: Size) -> Option<Size> {
        let idx = self.overflow.iter().position(|&block| block >= size)?;
        Some(self.overflow.remove(idx))
    }

    /// Return a freed block: to its class list when the size matches a
    /// declared class exactly, to the overflow pool otherwise.
    pub fn release(&mut self, size: Size) -> BlockSource {
        for class in &mut self.classes {
            if class.size == size {
                class.blocks.push_back(size);
                return BlockSource::Class(size);
            }
        }
        self.overflow.push(size);
        BlockSource::OverflowPool
    }

    pub fn free_block_count(&self) -> usize {
        self.classes.iter().map(|c| c.blocks.len()).sum()
    }

    pub fn overflow_len(&self) -> usize {
        self.overflow.len()
    }

    pub fn class_snapshots(&self) -> Vec<ClassSnapshot> {
        self.classes
            .iter()
            .map(|c| ClassSnapshot {
                class_size: c.size,
                free_blocks: c.blocks.iter().copied().collect(),
            })
            .collect()
    }

    pub fn overflow_snapshot(&self) -> Vec<Size> {
        self.overflow.clone()
    }
}
