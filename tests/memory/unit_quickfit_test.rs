/*!
 * Quick-Fit Manager Tests
 * Core allocation, deallocation and inspection behavior
 */

use pretty_assertions::assert_eq;
use quickfit::{
    Allocator, BlockSource, MemoryError, MemoryInfo, MemoryPressure, QuickFitManager,
};

#[test]
fn test_initial_free_lists() {
    let manager = QuickFitManager::new(&[16, 32, 64], 256).unwrap();
    let snapshot = manager.snapshot();

    let counts: Vec<(usize, usize)> = snapshot
        .classes
        .iter()
        .map(|c| (c.class_size, c.free_blocks.len()))
        .collect();
    assert_eq!(counts, vec![(16, 16), (32, 8), (64, 4)]);

    // Every slot is pre-populated with a block equal to the class size
    for class in &snapshot.classes {
        assert!(class.free_blocks.iter().all(|&b| b == class.class_size));
    }

    assert!(snapshot.overflow_pool.is_empty());
    assert!(snapshot.allocations.is_empty());
    assert_eq!(manager.info(), (256, 0, 256));
}

#[test]
fn test_construction_errors() {
    assert_eq!(
        QuickFitManager::new(&[], 256).unwrap_err(),
        MemoryError::EmptyClassList
    );
    assert_eq!(
        QuickFitManager::new(&[16, 0, 64], 256).unwrap_err(),
        MemoryError::InvalidClassSize(0)
    );
    assert_eq!(
        QuickFitManager::new(&[16, 32, 16], 256).unwrap_err(),
        MemoryError::DuplicateClassSize(16)
    );
    assert_eq!(
        QuickFitManager::new(&[16, 32], 0).unwrap_err(),
        MemoryError::InvalidTotalMemory(0)
    );
}

#[test]
fn test_class_order_precedence() {
    let manager = QuickFitManager::new(&[16, 32, 64], 256).unwrap();

    // 20 units fit in class 32, never class 64, even though 64 has blocks
    let allocation = manager.allocate(1, 20).unwrap();
    assert_eq!(allocation.granted, 32);
    assert_eq!(allocation.source, BlockSource::Class(32));

    let snapshot = manager.snapshot();
    assert_eq!(snapshot.classes[1].free_blocks.len(), 7);
    assert_eq!(snapshot.classes[2].free_blocks.len(), 4);
}

#[test]
fn test_declaration_order_beats_size_order() {
    // Classes are scanned as declared, not sorted ascending
    let manager = QuickFitManager::new(&[64, 16], 64).unwrap();

    let allocation = manager.allocate(1, 10).unwrap();
    assert_eq!(allocation.granted, 64);
    assert_eq!(allocation.source, BlockSource::Class(64));
}

#[test]
fn test_exhausted_class_falls_to_next() {
    // 32 total units: two 16-blocks, one 32-block
    let manager = QuickFitManager::new(&[16, 32], 32).unwrap();

    assert_eq!(manager.allocate(1, 10).unwrap().granted, 16);
    assert_eq!(manager.allocate(2, 10).unwrap().granted, 16);

    // Class 16 is exhausted, class 32 takes over
    let allocation = manager.allocate(3, 10).unwrap();
    assert_eq!(allocation.granted, 32);
    assert_eq!(allocation.source, BlockSource::Class(32));
}

#[test]
fn test_insufficient_memory_rejection() {
    let manager = QuickFitManager::new(&[16], 16).unwrap();

    manager.allocate(1, 16).unwrap();
    let err = manager.allocate(2, 16).unwrap_err();
    assert_eq!(
        err,
        MemoryError::InsufficientMemory {
            pid: 2,
            requested: 16
        }
    );

    // Rejection mutates nothing
    let snapshot = manager.snapshot();
    assert_eq!(snapshot.allocations.len(), 1);
    assert!(!snapshot.allocations.contains_key(&2));
}

#[test]
fn test_oversized_request_rejected() {
    let manager = QuickFitManager::new(&[16, 32, 64], 256).unwrap();
    let err = manager.allocate(1, 65).unwrap_err();
    assert_eq!(
        err,
        MemoryError::InsufficientMemory {
            pid: 1,
            requested: 65
        }
    );
}

#[test]
fn test_deallocate_round_trip() {
    let manager = QuickFitManager::new(&[16, 32, 64], 256).unwrap();

    manager.allocate(1, 16).unwrap();
    assert_eq!(manager.snapshot().classes[0].free_blocks.len(), 15);

    let deallocation = manager.deallocate(1).unwrap();
    assert_eq!(deallocation.size, 16);
    assert_eq!(deallocation.returned_to, BlockSource::Class(16));
    assert_eq!(manager.snapshot().classes[0].free_blocks.len(), 16);

    // Second deallocation has nothing to release
    assert_eq!(
        manager.deallocate(1).unwrap_err(),
        MemoryError::NotAllocated { pid: 1 }
    );
}

#[test]
fn test_reallocation_rejected_without_state_change() {
    let manager = QuickFitManager::new(&[16, 32, 64], 256).unwrap();

    manager.allocate(1, 16).unwrap();
    let before = manager.stats();

    let err = manager.allocate(1, 32).unwrap_err();
    assert_eq!(err, MemoryError::AlreadyAllocated { pid: 1, held: 16 });

    let after = manager.stats();
    assert_eq!(after.allocated_blocks, before.allocated_blocks);
    assert_eq!(after.free_blocks, before.free_blocks);
    assert_eq!(after.used_memory, before.used_memory);
    assert_eq!(manager.process_memory(1), 16);
}

#[test]
fn test_allocation_queries() {
    let manager = QuickFitManager::new(&[16, 32, 64], 256).unwrap();

    assert!(!manager.is_allocated(7));
    assert_eq!(manager.process_memory(7), 0);

    manager.allocate(7, 30).unwrap();
    assert!(manager.is_allocated(7));
    assert_eq!(manager.process_memory(7), 32);

    manager.deallocate(7).unwrap();
    assert!(!manager.is_allocated(7));
    assert_eq!(manager.process_memory(7), 0);
}

#[test]
fn test_stats_and_pressure() {
    let manager = QuickFitManager::new(&[16, 32, 64], 256).unwrap();

    let stats = manager.stats();
    assert_eq!(stats.total_memory, 256);
    assert_eq!(stats.used_memory, 0);
    assert_eq!(stats.available_memory, 256);
    assert_eq!(stats.allocated_blocks, 0);
    assert_eq!(stats.free_blocks, 16 + 8 + 4);
    assert_eq!(stats.overflow_blocks, 0);
    assert_eq!(stats.memory_pressure(), MemoryPressure::Low);

    // Four 64-unit grants push usage to 100%
    for pid in 1..=4 {
        manager.allocate(pid, 64).unwrap();
    }
    let stats = manager.stats();
    assert_eq!(stats.used_memory, 256);
    assert_eq!(stats.usage_percentage, 100.0);
    assert_eq!(stats.memory_pressure(), MemoryPressure::Critical);
}

#[test]
fn test_snapshot_is_pure() {
    let manager = QuickFitManager::new(&[16, 32], 64).unwrap();
    manager.allocate(1, 16).unwrap();

    let first = manager.snapshot();
    let second = manager.snapshot();

    assert_eq!(first.classes, second.classes);
    assert_eq!(first.overflow_pool, second.overflow_pool);
    assert_eq!(first.allocations, second.allocations);
}

#[test]
fn test_trait_surface() {
    let manager = QuickFitManager::new(&[16, 32], 64).unwrap();
    let allocator: &dyn Allocator = &manager;
    let info: &dyn MemoryInfo = &manager;

    allocator.allocate(1, 16).unwrap();
    assert!(allocator.is_allocated(1));
    assert_eq!(info.process_memory(1), 16);
    assert_eq!(info.pressure(), MemoryPressure::Low);
    allocator.deallocate(1).unwrap();
    assert_eq!(info.stats().allocated_blocks, 0);
}

#[test]
fn test_clones_share_state() {
    let manager = QuickFitManager::new(&[16, 32], 64).unwrap();
    let clone = manager.clone();

    clone.allocate(1, 16).unwrap();
    assert!(manager.is_allocated(1));
    assert_eq!(manager.stats().allocated_blocks, 1);
}

#[test]
fn test_reference_scenario() {
    // Classes [16, 32, 64] over 256 units: free lists of 16, 8 and 4 blocks
    let manager = QuickFitManager::new(&[16, 32, 64], 256).unwrap();

    let p1 = manager.allocate(1, 16).unwrap();
    assert_eq!(p1.granted, 16);
    assert_eq!(manager.snapshot().classes[0].free_blocks.len(), 15);

    let p2 = manager.allocate(2, 32).unwrap();
    assert_eq!(p2.granted, 32);
    assert_eq!(manager.snapshot().classes[1].free_blocks.len(), 7);

    // 48 still fits a predefined class: 64 has free blocks
    let p3 = manager.allocate(3, 48).unwrap();
    assert_eq!(p3.granted, 64);
    assert_eq!(p3.source, BlockSource::Class(64));
    assert_eq!(manager.snapshot().classes[2].free_blocks.len(), 3);

    manager.deallocate(1).unwrap();

    let snapshot = manager.snapshot();
    assert_eq!(snapshot.classes[0].free_blocks.len(), 16);
    assert!(!snapshot.allocations.contains_key(&1));
    assert_eq!(snapshot.allocations.get(&2), Some(&32));
    assert_eq!(snapshot.allocations.get(&3), Some(&64));
}
