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

use crate::Record;
use crate::Severity;
use crate::append::Append;
use crate::filter::FilterResult;
use crate::filter::MinSeverity;
use crate::layout::TextLayout;

/// A sink that prints colourised log records to stdout.
///
/// Records below the configured minimum severity produce no output at all.
#[derive(Debug)]
pub struct Stdout {
    filter: MinSeverity,
    layout: TextLayout,
}

impl Stdout {
    /// Creates a new `Stdout` sink emitting records at or above `min`.
    pub fn new(min: Severity) -> Stdout {
        Stdout {
            filter: MinSeverity::new(min),
            layout: TextLayout,
        }
    }

    /// The exact line this sink would print for `record`, or `None` when the
    /// record is filtered out.
    pub fn render(&self, record: &Record<'_>) -> Option<String> {
        match self.filter.filter(record.severity()) {
            FilterResult::Accept => Some(self.layout.format(record, true)),
            FilterResult::Reject => None,
        }
    }
}

impl Append for Stdout {
    fn append(&self, record: &Record<'_>) -> anyhow::Result<()> {
        if let Some(line) = self.render(record) {
            println!("{line}");
        }
        Ok(())
    }
}
