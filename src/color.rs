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

//! Colour utilities.
//!
//! The escape sequences are part of the console output contract, so they are
//! spelled out here rather than derived from terminal detection.

use std::borrow::Cow;

use crate::Severity;

pub(crate) const COLOR_GREEN: &str = "\x1b[32m";
pub(crate) const COLOR_YELLOW: &str = "\x1b[33m";
pub(crate) const COLOR_RED: &str = "\x1b[31m";
pub(crate) const COLOR_RESET: &str = "\x1b[0m";

/// The ANSI colour code for a severity, if it has one.
///
/// DEBUG and INFO are rendered without colour.
pub(crate) fn severity_color(severity: Severity) -> Option<&'static str> {
    match severity {
        Severity::Error => Some(COLOR_RED),
        Severity::Warning => Some(COLOR_YELLOW),
        Severity::Notice => Some(COLOR_GREEN),
        Severity::Debug | Severity::Info => None,
    }
}

/// Wraps the message in the severity's colour pair, if any.
pub(crate) fn colorize(message: &str, severity: Severity) -> Cow<'_, str> {
    match severity_color(severity) {
        Some(color) => Cow::Owned(format!("{color}{message}{COLOR_RESET}")),
        None => Cow::Borrowed(message),
    }
}
