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

//! Local sinks for log records.

use std::fmt;

mod file;
mod stdout;

pub use self::file::DailyFile;
pub use self::file::DailyFileBuilder;
pub use self::stdout::Stdout;

/// A trait representing a local sink that can process log records.
pub trait Append: fmt::Debug + Send + Sync + 'static {
    /// Processes a log record. Each sink applies its own severity filter and
    /// silently skips records below its threshold.
    fn append(&self, record: &crate::Record<'_>) -> anyhow::Result<()>;

    /// Flushes any buffered records.
    fn flush(&self) {}
}
