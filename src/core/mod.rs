/*!
 * Core Module
 * Fundamental types shared across the allocator
 */

pub mod types;

// Re-export for convenience
pub use types::{Pid, Size};
