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

use jiff::Zoned;

use crate::Severity;

/// A single log record, borrowed for the duration of one dispatch.
///
/// The timestamp is captured once when the record is created, so every sink
/// observes the same wall-clock time for the same call.
#[derive(Debug, Clone, Copy)]
pub struct Record<'a> {
    message: &'a str,
    severity: Severity,
    time: &'a Zoned,
}

impl<'a> Record<'a> {
    pub fn new(message: &'a str, severity: Severity, time: &'a Zoned) -> Record<'a> {
        Record {
            message,
            severity,
            time,
        }
    }

    pub fn message(&self) -> &'a str {
        self.message
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn time(&self) -> &'a Zoned {
        self.time
    }
}
