// Copyright 2024 Birdbot Developers
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::path::PathBuf;

use serde::Deserialize;

use crate::Severity;

/// Configuration for a [`Logger`][crate::Logger].
///
/// Constructed once at process start; loading it from a config file or the
/// environment is the host's job (the struct deserializes with serde). The
/// value is treated as immutable for the process lifetime.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggerConfig {
    /// Directory the daily log file lives in; created on demand.
    pub log_directory: PathBuf,
    /// Minimum severity emitted by the console and file sinks.
    pub min_severity: Severity,
    /// Whether log calls may be forwarded to the remote endpoint at all.
    pub remote_logging: bool,
    /// Minimum interval between remote sends, in milliseconds. Zero disables
    /// rate limiting entirely.
    pub remote_rate_limit_ms: u64,
    /// Endpoint the remote sender posts to.
    pub remote_url: String,
    /// Identifier included in every remote payload.
    pub device_id: String,
}

impl Default for LoggerConfig {
    fn default() -> Self {
        LoggerConfig {
            log_directory: PathBuf::from("logs"),
            min_severity: Severity::Info,
            remote_logging: false,
            remote_rate_limit_ms: 0,
            remote_url: String::new(),
            device_id: String::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_full_config() {
        let config: LoggerConfig = serde_json::from_str(
            r#"{
                "log_directory": "/var/log/birdbot",
                "min_severity": "WARNING",
                "remote_logging": true,
                "remote_rate_limit_ms": 5000,
                "remote_url": "http://test.com",
                "device_id": "test_device_id"
            }"#,
        )
        .unwrap();
        assert_eq!(config.log_directory, PathBuf::from("/var/log/birdbot"));
        assert_eq!(config.min_severity, Severity::Warning);
        assert!(config.remote_logging);
        assert_eq!(config.remote_rate_limit_ms, 5000);
    }

    #[test]
    fn test_deserialize_defaults() {
        let config: LoggerConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.log_directory, PathBuf::from("logs"));
        assert_eq!(config.min_severity, Severity::Info);
        assert!(!config.remote_logging);
        assert_eq!(config.remote_rate_limit_ms, 0);
    }
}
