/*!
 * Memory Types
 * Common types for Quick-Fit memory management
 */

use crate::core::types::{Pid, Size};
use ahash::RandomState;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Memory operation result
pub type MemoryResult<T> = Result<T, MemoryError>;

/// Memory errors
///
/// Every variant is an expected outcome reported to the caller as a value;
/// none of them is fatal to the allocator.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MemoryError {
    #[error("Size class list is empty")]
    EmptyClassList,

    #[error("Invalid size class: {0} (classes must be positive)")]
    InvalidClassSize(Size),

    #[error("Duplicate size class: {0}")]
    DuplicateClassSize(Size),

    #[error("Invalid total memory: {0} (must be positive)")]
    InvalidTotalMemory(Size),

    #[error("Insufficient memory: PID {pid} requested {requested} units, no free block satisfies the request")]
    InsufficientMemory { pid: Pid, requested: Size },

    #[error("PID {pid} already holds an allocation of {held} units")]
    AlreadyAllocated { pid: Pid, held: Size },

    #[error("PID {pid} has no active allocation")]
    NotAllocated { pid: Pid },
}

/// Where a granted block came from, or where a freed block went back to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BlockSource {
    /// A predefined size class (carries the class size)
    Class(Size),
    /// The overflow pool of non-class-sized blocks
    OverflowPool,
}

impl std::fmt::Display for BlockSource {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            BlockSource::Class(size) => write!(f, "class {}", size),
            BlockSource::OverflowPool => write!(f, "overflow pool"),
        }
    }
}

/// Successful allocation outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Allocation {
    /// Units actually granted: the class size on the class path, the
    /// requested size on the overflow path
    pub granted: Size,
    pub source: BlockSource,
}

/// Successful deallocation outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deallocation {
    /// Units returned
    pub size: Size,
    pub returned_to: BlockSource,
}

/// Free-list state for one size class
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassSnapshot {
    pub class_size: Size,
    /// Available blocks in reuse order (front is granted first)
    pub free_blocks: Vec<Size>,
}

/// Immutable view of the allocator state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemorySnapshot {
    /// Size classes in declaration order
    pub classes: Vec<ClassSnapshot>,
    /// Overflow pool contents in insertion order
    pub overflow_pool: Vec<Size>,
    /// Active allocations (pid -> granted units)
    pub allocations: HashMap<Pid, Size, RandomState>,
}

/// Memory statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryStats {
    pub total_memory: Size,
    pub used_memory: Size,
    pub available_memory: Size,
    pub usage_percentage: f64,
    /// Active allocation records
    pub allocated_blocks: usize,
    /// Free blocks across all class free lists
    pub free_blocks: usize,
    /// Blocks sitting in the overflow pool
    pub overflow_blocks: usize,
    /// Cumulative units lost to the overflow carve asymmetry: an overflow
    /// grant consumes a whole pooled block but only hands out the requested
    /// size, and the remainder is never re-pooled
    pub carved_waste: Size,
}

impl MemoryStats {
    pub fn memory_pressure(&self) -> MemoryPressure {
        if self.usage_percentage >= 95.0 {
            MemoryPressure::Critical
        } else if self.usage_percentage >= 80.0 {
            MemoryPressure::High
        } else if self.usage_percentage >= 60.0 {
            MemoryPressure::Medium
        } else {
            MemoryPressure::Low
        }
    }
}

/// Memory pressure levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MemoryPressure {
    Low,
    Medium,
    High,
    Critical,
}

impl std::fmt::Display for MemoryPressure {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            MemoryPressure::Low => write!(f, "LOW"),
            MemoryPressure::Medium => write!(f, "MEDIUM"),
            MemoryPressure::High => write!(f, "HIGH"),
            MemoryPressure::Critical => write!(f, "CRITICAL"),
        }
    }
}
