/*!
 * Quick-Fit Demo Driver - Main Entry Point
 *
 * Constructs one allocator from environment configuration, drives the
 * reference allocation scenario through it, and renders the resulting
 * state. All textual output lives here; the allocator itself only returns
 * typed results.
 */

use std::error::Error;

use log::info;
use quickfit::{Pid, QuickFitManager, Size};

/// Parse a comma-separated size list, e.g. "16,32,64"
fn parse_sizes(raw: &str) -> Result<Vec<Size>, Box<dyn Error>> {
    let mut sizes = Vec::new();
    for part in raw.split(',') {
        let part = part.trim();
        let size: Size = part
            .parse()
            .map_err(|e| format!("invalid size {:?}: {}", part, e))?;
        sizes.push(size);
    }
    Ok(sizes)
}

fn render_snapshot(manager: &QuickFitManager) {
    let snapshot = manager.snapshot();

    if std::env::var("QUICKFIT_JSON").map_or(false, |v| v == "1") {
        match serde_json::to_string_pretty(&snapshot) {
            Ok(json) => println!("{}", json),
            Err(e) => eprintln!("snapshot serialization failed: {}", e),
        }
        return;
    }

    println!("Free Lists:");
    for class in &snapshot.classes {
        println!(
            "  Size {}: {} blocks {:?}",
            class.class_size,
            class.free_blocks.len(),
            class.free_blocks
        );
    }
    println!("Overflow Pool: {:?}", snapshot.overflow_pool);

    let mut allocations: Vec<(Pid, Size)> = snapshot.allocations.into_iter().collect();
    allocations.sort_unstable();
    println!("Allocations:");
    for (pid, size) in allocations {
        println!("  PID {}: {} units", pid, size);
    }

    let stats = manager.stats();
    println!(
        "Usage: {}/{} units ({:.1}%), pressure {}, {} units carved away",
        stats.used_memory,
        stats.total_memory,
        stats.usage_percentage,
        stats.memory_pressure(),
        stats.carved_waste
    );
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    info!("Quick-Fit allocator demo starting...");

    let classes_raw =
        std::env::var("QUICKFIT_CLASSES").unwrap_or_else(|_| "16,32,64".to_string());
    let total_memory: Size = std::env::var("QUICKFIT_TOTAL_MEMORY")
        .unwrap_or_else(|_| "256".to_string())
        .parse()?;

    let size_classes = parse_sizes(&classes_raw)?;
    info!(
        "Configured size classes {:?}, total memory {} units",
        size_classes, total_memory
    );

    let mut manager = QuickFitManager::new(&size_classes, total_memory)?;

    // Optional extra blocks, e.g. to demonstrate the overflow pool
    if let Ok(raw) = std::env::var("QUICKFIT_SEED_BLOCKS") {
        let seed = parse_sizes(&raw)?;
        info!("Seeding extra free blocks {:?}", seed);
        manager = manager.with_free_blocks(seed);
    }

    // Reference scenario: two class hits, one near-fit, one release
    for (pid, size) in [(1, 16), (2, 32), (3, 48)] {
        match manager.allocate(pid, size) {
            Ok(allocation) => println!(
                "Process P{} allocated {} units from {}.",
                pid, allocation.granted, allocation.source
            ),
            Err(e) => println!("Process P{}: {}", pid, e),
        }
    }

    match manager.deallocate(1) {
        Ok(deallocation) => println!(
            "Process P1 deallocated {} units, returned to {}.",
            deallocation.size, deallocation.returned_to
        ),
        Err(e) => println!("Process P1: {}", e),
    }

    render_snapshot(&manager);

    info!("Quick-Fit allocator demo complete");
    Ok(())
}
