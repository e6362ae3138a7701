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

use std::fs;
use std::fs::File;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::sync::Mutex;
use std::sync::MutexGuard;

use anyhow::Context;

use crate::Record;
use crate::Severity;
use crate::append::Append;
use crate::clock::Clock;
use crate::filter::FilterResult;
use crate::filter::MinSeverity;
use crate::layout::TextLayout;

/// A sink that appends plain (uncoloured) log lines to a date-named file.
///
/// The file is `{directory}/{DD-MM-YY}-birdbot.log`, resolved once when the
/// sink is built. The handle is held for the process lifetime, so writes
/// continue into the same file across a midnight rollover until the process
/// restarts. Known limitation, kept on purpose.
#[derive(Debug)]
pub struct DailyFile {
    filter: MinSeverity,
    layout: TextLayout,
    path: PathBuf,
    writer: Mutex<File>,
}

impl DailyFile {
    /// Creates a new [`DailyFileBuilder`].
    pub fn builder(directory: impl Into<PathBuf>) -> DailyFileBuilder {
        DailyFileBuilder::new(directory)
    }

    /// The path of the log file this sink appends to.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn writer(&self) -> MutexGuard<'_, File> {
        match self.writer.lock() {
            Ok(writer) => writer,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl Append for DailyFile {
    fn append(&self, record: &Record<'_>) -> anyhow::Result<()> {
        if self.filter.filter(record.severity()) == FilterResult::Reject {
            return Ok(());
        }
        let mut line = self.layout.format(record, false);
        line.push('\n');
        self.writer()
            .write_all(line.as_bytes())
            .context("failed to write to log file")?;
        Ok(())
    }

    fn flush(&self) {
        let _ = self.writer().flush();
    }
}

/// A builder for configuring [`DailyFile`].
#[derive(Debug)]
pub struct DailyFileBuilder {
    directory: PathBuf,
    min: Severity,
    clock: Clock,
}

impl DailyFileBuilder {
    /// Creates a new [`DailyFileBuilder`] writing under `directory`.
    pub fn new(directory: impl Into<PathBuf>) -> DailyFileBuilder {
        DailyFileBuilder {
            directory: directory.into(),
            min: Severity::Debug,
            clock: Clock::default(),
        }
    }

    /// Sets the minimum severity this sink records.
    pub fn min_severity(mut self, min: Severity) -> DailyFileBuilder {
        self.min = min;
        self
    }

    #[cfg(test)]
    pub(crate) fn clock(mut self, clock: Clock) -> DailyFileBuilder {
        self.clock = clock;
        self
    }

    /// Builds the [`DailyFile`], creating the log directory (and parents) if
    /// absent and opening today's file in append mode.
    pub fn build(self) -> anyhow::Result<DailyFile> {
        fs::create_dir_all(&self.directory).context("failed to create log directory")?;
        let date = self.clock.now().strftime("%d-%m-%y").to_string();
        let path = self.directory.join(format!("{date}-birdbot.log"));
        let writer = OpenOptions::new()
            .append(true)
            .create(true)
            .open(&path)
            .context("failed to open log file")?;
        Ok(DailyFile {
            filter: MinSeverity::new(self.min),
            layout: TextLayout,
            path,
            writer: Mutex::new(writer),
        })
    }
}
