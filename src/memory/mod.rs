/*!
 * Memory Module
 * Quick-Fit memory management and allocation
 */

pub mod manager;
pub mod traits;
pub mod types;

// Re-export for convenience
pub use manager::QuickFitManager;
pub use traits::*;
pub use types::*;
