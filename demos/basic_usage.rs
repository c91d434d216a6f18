// SPDX-License-Identifier: MIT OR Apache-2.0

//! Basic usage example for layered configuration.
//!
//! This example demonstrates:
//! - Laying out base fragments and environment overlays on disk
//! - Populating a store with overlays applied in order
//! - Reading values by key path, plain and typed
//! - Writing values into the merged tree
//!
//! To run this example:
//! ```bash
//! cargo run --example basic_usage
//!
//! # With scan and merge logging
//! RUST_LOG=debug cargo run --example basic_usage
//! ```

use layercfg::prelude::*;
use serde_json::json;
use std::fs;

fn write(root: &std::path::Path, relative: &str, content: &str) -> std::io::Result<()> {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)
}

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing subscriber for logging
    tracing_subscriber::fmt::init();

    println!("=== layercfg: Basic Usage ===\n");

    // A throwaway configuration tree:
    //   database.json, staging/database.json, production/database.json
    let dir = tempfile::tempdir()?;
    write(
        dir.path(),
        "database.json",
        r#"{"host": "localhost", "port": 5432, "pool": {"size": 5, "timeout": 10}}"#,
    )?;
    write(
        dir.path(),
        "staging/database.json",
        r#"{"host": "staging.db.internal", "pool": {"size": 10}}"#,
    )?;
    write(
        dir.path(),
        "production/database.json",
        r#"{"host": "prod.db.internal", "pool": {"size": 50}}"#,
    )?;

    // Example 1: Populate with overlays; later environments win
    println!("--- Example 1: Populate ---");
    let mut store = ConfigStore::new();
    store.populate(dir.path(), ["staging", "production"])?;
    println!("Loaded groups: {:?}", store.groups().collect::<Vec<_>>());

    // Example 2: Plain reads
    println!("\n--- Example 2: Reading Values ---");
    for path in ["database.host", "database.pool.size", "database.pool.timeout"] {
        match store.get(&KeyPath::from(path)) {
            Some(value) => println!("✓ {} = {}", path, value),
            None => println!("✗ {} not found", path),
        }
    }

    // Example 3: Typed reads
    println!("\n--- Example 3: Typed Values ---");
    let port: Option<u16> = store.get_as(&KeyPath::from("database.port"))?;
    println!("database.port as u16: {:?}", port);

    // Example 4: Writes
    println!("\n--- Example 4: Writing Values ---");
    let outcome = store.set(&KeyPath::from("database.pool.idle"), json!(30));
    println!("set database.pool.idle: {:?}", outcome);
    let outcome = store.set(&KeyPath::from("cache.ttl"), json!(60));
    println!("set cache.ttl (no 'cache' group yet): {:?}", outcome);
    let outcome = store.set(&KeyPath::from("cache"), json!({"ttl": 60}));
    println!("set cache: {:?}", outcome);
    println!("has cache.ttl: {}", store.has(&KeyPath::from("cache.ttl")));

    println!("\n=== Example Complete ===");
    Ok(())
}
