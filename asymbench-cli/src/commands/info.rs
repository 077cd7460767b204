// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Asymbench Contributors

//! System information report.

use std::path::Path;

use chrono::Local;
use sysinfo::System;

use asymbench_core::{ResourceProbe, SysinfoProbe};

use crate::commands::load_settings;

pub fn execute(config: Option<&Path>) -> anyhow::Result<()> {
    let settings = load_settings(config)?;
    let probe = SysinfoProbe::new();

    println!("===== asymbench - Cryptographic Performance Analysis =====");
    println!("Date and time: {}", Local::now().format("%Y-%m-%d %H:%M:%S"));
    println!(
        "Operating system: {} {}",
        System::name().unwrap_or_else(|| "Unknown".to_string()),
        System::os_version().unwrap_or_else(|| "Unknown".to_string()),
    );
    println!("Logical cores: {}", probe.logical_core_count());
    println!("Total memory: {:.2} GB", probe.total_memory_mb() / 1024.0);
    println!(
        "Available memory: {:.2} GB",
        probe.available_memory_mb() / 1024.0
    );
    println!(
        "Current process memory: {:.2} MB",
        probe.resident_memory_mb()
    );
    println!("==========================================================");
    println!();
    println!("Effective settings:");
    println!("- Operation timeout: {} seconds", settings.timeout_seconds);
    println!("- Sample interval: {} ms", settings.sample_interval_ms);
    println!("- Test payload size: {} MB", settings.test_data_size_mb);
    println!("- RSA key sizes: {:?}", settings.rsa_key_sizes);

    Ok(())
}
