// SPDX-License-Identifier: Apache-2.0
// Copyright 2025 Asymbench Contributors

//! YAML settings parser with strict validation.
//!
//! Settings are validated at load time; any out-of-range field rejects
//! the whole file with a typed error rather than being silently clamped.

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::error::ConfigError;

const MAX_TIMEOUT_SECONDS: u64 = 3600;
const MIN_SAMPLE_INTERVAL_MS: u64 = 10;
const MAX_SAMPLE_INTERVAL_MS: u64 = 5000;
const MIN_PAYLOAD_MB: usize = 1;
const MAX_PAYLOAD_MB: usize = 64;
const SUPPORTED_RSA_BITS: [u32; 4] = [1024, 2048, 3072, 4096];

/// Raw settings as parsed from YAML (before validation).
#[derive(Debug, Deserialize)]
struct RawSettings {
    #[serde(default = "default_timeout_seconds")]
    timeout_seconds: u64,
    #[serde(default = "default_sample_interval_ms")]
    sample_interval_ms: u64,
    #[serde(default = "default_payload_mb")]
    test_data_size_mb: usize,
    #[serde(default = "default_rsa_key_sizes")]
    rsa_key_sizes: Vec<u32>,
}

fn default_timeout_seconds() -> u64 {
    60
}

fn default_sample_interval_ms() -> u64 {
    100
}

fn default_payload_mb() -> usize {
    1
}

fn default_rsa_key_sizes() -> Vec<u32> {
    vec![1024, 2048, 4096]
}

impl Default for RawSettings {
    fn default() -> Self {
        Self {
            timeout_seconds: default_timeout_seconds(),
            sample_interval_ms: default_sample_interval_ms(),
            test_data_size_mb: default_payload_mb(),
            rsa_key_sizes: default_rsa_key_sizes(),
        }
    }
}

/// Validated benchmark settings.
#[derive(Debug, Clone)]
pub struct BenchSettings {
    /// Watchdog deadline per timed operation. Zero disables timeouts.
    pub timeout_seconds: u64,
    /// CPU sampler cadence.
    pub sample_interval_ms: u64,
    /// Size of the random test payload generated at session start.
    pub test_data_size_mb: usize,
    /// RSA key sizes benchmarked, in run order.
    pub rsa_key_sizes: Vec<u32>,
}

impl BenchSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    pub fn sample_interval(&self) -> Duration {
        Duration::from_millis(self.sample_interval_ms)
    }

    pub fn payload_bytes(&self) -> usize {
        self.test_data_size_mb * 1024 * 1024
    }
}

impl Default for BenchSettings {
    fn default() -> Self {
        // RawSettings defaults always pass validation.
        SettingsLoader::validate(RawSettings::default()).expect("default settings are valid")
    }
}

/// Settings loader with strict validation.
pub struct SettingsLoader;

impl SettingsLoader {
    /// Load and validate settings from a YAML file.
    pub fn load_file(path: impl AsRef<Path>) -> Result<BenchSettings, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::NotFound {
                path: path.to_path_buf(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Parse {
            message: format!("failed to read {}: {}", path.display(), e),
        })?;

        Self::load_string(&content)
    }

    /// Load and validate settings from a YAML string.
    pub fn load_string(content: &str) -> Result<BenchSettings, ConfigError> {
        let raw: RawSettings = serde_yaml::from_str(content).map_err(|e| ConfigError::Parse {
            message: format!("YAML parse error: {}", e),
        })?;

        Self::validate(raw)
    }

    fn validate(raw: RawSettings) -> Result<BenchSettings, ConfigError> {
        if raw.timeout_seconds > MAX_TIMEOUT_SECONDS {
            return Err(ConfigError::InvalidTimeout {
                seconds: raw.timeout_seconds,
                max: MAX_TIMEOUT_SECONDS,
            });
        }

        if !(MIN_SAMPLE_INTERVAL_MS..=MAX_SAMPLE_INTERVAL_MS).contains(&raw.sample_interval_ms) {
            return Err(ConfigError::InvalidSampleInterval {
                millis: raw.sample_interval_ms,
                min: MIN_SAMPLE_INTERVAL_MS,
                max: MAX_SAMPLE_INTERVAL_MS,
            });
        }

        if !(MIN_PAYLOAD_MB..=MAX_PAYLOAD_MB).contains(&raw.test_data_size_mb) {
            return Err(ConfigError::InvalidPayloadSize {
                megabytes: raw.test_data_size_mb,
                min: MIN_PAYLOAD_MB,
                max: MAX_PAYLOAD_MB,
            });
        }

        if raw.rsa_key_sizes.is_empty() {
            return Err(ConfigError::InvalidRsaKeySizes {
                reason: "at least one key size must be listed".to_string(),
            });
        }
        for bits in &raw.rsa_key_sizes {
            if !SUPPORTED_RSA_BITS.contains(bits) {
                return Err(ConfigError::InvalidRsaKeySizes {
                    reason: format!(
                        "{} bits is not supported (choose from {:?})",
                        bits, SUPPORTED_RSA_BITS
                    ),
                });
            }
        }

        Ok(BenchSettings {
            timeout_seconds: raw.timeout_seconds,
            sample_interval_ms: raw.sample_interval_ms,
            test_data_size_mb: raw.test_data_size_mb,
            rsa_key_sizes: raw.rsa_key_sizes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VALID_SETTINGS: &str = r#"
timeout_seconds: 30
sample_interval_ms: 100
test_data_size_mb: 2
rsa_key_sizes: [2048, 4096]
"#;

    #[test]
    fn test_valid_settings() {
        let settings = SettingsLoader::load_string(VALID_SETTINGS).unwrap();
        assert_eq!(settings.timeout_seconds, 30);
        assert_eq!(settings.test_data_size_mb, 2);
        assert_eq!(settings.rsa_key_sizes, vec![2048, 4096]);
    }

    #[test]
    fn test_defaults_applied() {
        let settings = SettingsLoader::load_string("timeout_seconds: 10").unwrap();
        assert_eq!(settings.sample_interval_ms, 100);
        assert_eq!(settings.test_data_size_mb, 1);
        assert_eq!(settings.rsa_key_sizes, vec![1024, 2048, 4096]);
    }

    #[test]
    fn test_zero_timeout_is_allowed() {
        // Zero means "timeouts disabled", not an invalid value.
        let settings = SettingsLoader::load_string("timeout_seconds: 0").unwrap();
        assert_eq!(settings.timeout_seconds, 0);
        assert!(settings.timeout().is_zero());
    }

    #[test]
    fn test_timeout_too_large() {
        let result = SettingsLoader::load_string("timeout_seconds: 7200");
        assert!(matches!(result, Err(ConfigError::InvalidTimeout { .. })));
    }

    #[test]
    fn test_sample_interval_out_of_range() {
        assert!(SettingsLoader::load_string("sample_interval_ms: 5").is_err());
        assert!(SettingsLoader::load_string("sample_interval_ms: 60000").is_err());
    }

    #[test]
    fn test_payload_size_out_of_range() {
        assert!(SettingsLoader::load_string("test_data_size_mb: 0").is_err());
        assert!(SettingsLoader::load_string("test_data_size_mb: 128").is_err());
    }

    #[test]
    fn test_unsupported_rsa_size() {
        let result = SettingsLoader::load_string("rsa_key_sizes: [512]");
        assert!(matches!(
            result,
            Err(ConfigError::InvalidRsaKeySizes { .. })
        ));
    }

    #[test]
    fn test_empty_rsa_sizes() {
        let result = SettingsLoader::load_string("rsa_key_sizes: []");
        assert!(matches!(
            result,
            Err(ConfigError::InvalidRsaKeySizes { .. })
        ));
    }

    #[test]
    fn test_missing_file() {
        let result = SettingsLoader::load_file("/nonexistent/asymbench.yaml");
        assert!(matches!(result, Err(ConfigError::NotFound { .. })));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.yaml");
        std::fs::write(&path, VALID_SETTINGS).unwrap();

        let settings = SettingsLoader::load_file(&path).unwrap();
        assert_eq!(settings.timeout_seconds, 30);
    }
}
