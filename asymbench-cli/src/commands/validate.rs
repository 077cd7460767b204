// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Asymbench Contributors

//! Settings file validation.

use std::path::Path;

use asymbench_core::SettingsLoader;

pub fn execute(file: &Path) -> anyhow::Result<()> {
    match SettingsLoader::load_file(file) {
        Ok(settings) => {
            println!("{} is valid", file.display());
            println!("- timeout_seconds: {}", settings.timeout_seconds);
            println!("- sample_interval_ms: {}", settings.sample_interval_ms);
            println!("- test_data_size_mb: {}", settings.test_data_size_mb);
            println!("- rsa_key_sizes: {:?}", settings.rsa_key_sizes);
            Ok(())
        }
        Err(e) => {
            eprintln!("{} is invalid: {}", file.display(), e);
            Err(e.into())
        }
    }
}
