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

//! Layouts for formatting log records.

use std::borrow::Cow;

use crate::Record;
use crate::color;

/// A layout that formats a log record as a single text line.
///
/// Output format:
///
/// ```text
/// 19-08-2023 00:00:00: WARNING: something looks off
/// ```
///
/// When `colorize` is true, the message (not the whole line) is wrapped in an
/// ANSI colour pair chosen by severity: red for ERROR, yellow for WARNING,
/// green for NOTICE; DEBUG and INFO stay plain.
///
/// Formatting is a pure function of the record, so two calls with the same
/// record yield identical output.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextLayout;

impl TextLayout {
    pub fn format(&self, record: &Record<'_>, colorize: bool) -> String {
        let time = record.time().strftime("%d-%m-%Y %H:%M:%S");
        let message = if colorize {
            color::colorize(record.message(), record.severity())
        } else {
            Cow::Borrowed(record.message())
        };
        format!("{time}: {severity}: {message}", severity = record.severity())
    }
}

#[cfg(test)]
mod tests {
    use jiff::Zoned;

    use super::*;
    use crate::Severity;

    fn frozen_time() -> Zoned {
        "2023-08-19T00:00:00[UTC]".parse().unwrap()
    }

    #[test]
    fn test_format_plain() {
        let time = frozen_time();
        let record = Record::new("test", Severity::Info, &time);
        let line = TextLayout.format(&record, false);
        assert_eq!(line, "19-08-2023 00:00:00: INFO: test");
    }

    #[test]
    fn test_format_colorized_warning() {
        let time = frozen_time();
        let record = Record::new("test", Severity::Warning, &time);
        let line = TextLayout.format(&record, true);
        assert_eq!(line, "19-08-2023 00:00:00: WARNING: \x1b[33mtest\x1b[0m");
    }

    #[test]
    fn test_format_colorized_error_and_notice() {
        let time = frozen_time();
        let record = Record::new("test", Severity::Error, &time);
        assert_eq!(
            TextLayout.format(&record, true),
            "19-08-2023 00:00:00: ERROR: \x1b[31mtest\x1b[0m"
        );
        let record = Record::new("test", Severity::Notice, &time);
        assert_eq!(
            TextLayout.format(&record, true),
            "19-08-2023 00:00:00: NOTICE: \x1b[32mtest\x1b[0m"
        );
    }

    #[test]
    fn test_format_colorized_low_severities_stay_plain() {
        let time = frozen_time();
        let record = Record::new("test", Severity::Debug, &time);
        assert_eq!(
            TextLayout.format(&record, true),
            "19-08-2023 00:00:00: DEBUG: test"
        );
        let record = Record::new("test", Severity::Info, &time);
        assert_eq!(
            TextLayout.format(&record, true),
            "19-08-2023 00:00:00: INFO: test"
        );
    }

    #[test]
    fn test_format_is_idempotent() {
        let time = frozen_time();
        let record = Record::new("test", Severity::Warning, &time);
        let first = TextLayout.format(&record, true);
        let second = TextLayout.format(&record, true);
        assert_eq!(first, second);
    }
}
