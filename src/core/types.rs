/*!
 * Core Types
 * Common types used across the allocator
 */

/// Process ID type
pub type Pid = u32;

/// Size type for memory operations, in accounting units
pub type Size = usize;
