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

//! A leveled logging facility that fans each log call out to a colourised
//! console stream, an append-only per-day log file, and a rate-limited remote
//! HTTP endpoint.
//!
//! # Overview
//!
//! One [`Logger`] is constructed per process from a [`LoggerConfig`] and
//! passed to call sites explicitly. Each of the five entry points (`debug`,
//! `info`, `notice`, `warning`, `error`) writes to the console and file
//! sinks, filtered by the configured minimum [`Severity`]. Calls that opt in
//! (and all error calls) are additionally forwarded to the remote endpoint,
//! best-effort and gated by a rate limiter.
//!
//! # Examples
//!
//! ```no_run
//! use birdbot_logger::Logger;
//! use birdbot_logger::LoggerConfig;
//! use birdbot_logger::Severity;
//!
//! let logger = Logger::new(LoggerConfig {
//!     log_directory: "logs".into(),
//!     min_severity: Severity::Info,
//!     remote_logging: true,
//!     remote_rate_limit_ms: 5000,
//!     remote_url: "https://logs.example.com/ingest".into(),
//!     device_id: "feeder-01".into(),
//! })?;
//!
//! logger.info("bot started", false);
//! logger.notice("first visitor of the day", true);
//! logger.error("feeder jammed", true);
//! # anyhow::Ok(())
//! ```

pub mod append;
pub mod filter;
pub mod layout;
pub mod remote;

mod clock;
mod color;
mod config;
mod logger;
mod record;
mod severity;

pub use config::LoggerConfig;
pub use logger::Logger;
pub use logger::LoggerBuilder;
pub use record::Record;
pub use severity::Severity;
