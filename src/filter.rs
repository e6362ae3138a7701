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

//! Filters for log records.

use crate::Severity;

/// The result of a filter check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterResult {
    /// The record will be processed.
    Accept,
    /// The record should not be processed.
    Reject,
}

/// A filter that accepts records at or above a minimum severity.
///
/// Each sink carries its own instance, configured independently at
/// construction time.
#[derive(Debug, Clone, Copy)]
pub struct MinSeverity {
    min: Severity,
}

impl MinSeverity {
    pub fn new(min: Severity) -> MinSeverity {
        MinSeverity { min }
    }

    pub fn filter(&self, severity: Severity) -> FilterResult {
        if severity >= self.min {
            FilterResult::Accept
        } else {
            FilterResult::Reject
        }
    }
}
