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

//! Best-effort delivery of log records to a remote HTTP endpoint.
//!
//! Delivery is gated by a rate limiter: at most one send per configured
//! interval, except for sends that explicitly override the limiter. Outcomes
//! are reported through caller-supplied callbacks so that failure reporting
//! can never re-enter remote delivery.

use std::fmt;
use std::sync::Mutex;
use std::sync::MutexGuard;
use std::time::Duration;

use anyhow::Context;
use serde::Serialize;

use crate::clock::Clock;

/// How long a remote send may block before the transport gives up.
pub const REMOTE_TIMEOUT: Duration = Duration::from_secs(10);

/// The JSON body posted to the remote endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RemotePayload {
    pub device_id: String,
    /// Milliseconds since the Unix epoch, taken when the payload is built.
    pub log_timestamp: i64,
    pub log_message: String,
}

/// What the transport got back from the endpoint.
#[derive(Debug, Clone)]
pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

impl TransportResponse {
    pub fn is_success(&self) -> bool {
        self.status == 200
    }
}

/// The HTTP client abstraction used to deliver a payload.
///
/// Network-level failures are the `Err` arm; any response, success or not, is
/// `Ok`.
pub trait Transport: fmt::Debug + Send + Sync + 'static {
    fn post(&self, url: &str, payload: &RemotePayload) -> anyhow::Result<TransportResponse>;
}

/// The default [`Transport`], posting JSON over HTTP with a bounded timeout.
#[derive(Debug)]
pub struct HttpTransport {
    client: reqwest::blocking::Client,
}

impl HttpTransport {
    pub fn new() -> anyhow::Result<HttpTransport> {
        let client = reqwest::blocking::Client::builder()
            .timeout(REMOTE_TIMEOUT)
            .build()
            .context("failed to build HTTP client")?;
        Ok(HttpTransport { client })
    }
}

impl Transport for HttpTransport {
    fn post(&self, url: &str, payload: &RemotePayload) -> anyhow::Result<TransportResponse> {
        let response = self
            .client
            .post(url)
            .json(payload)
            .send()
            .context("failed to reach logging API")?;
        let status = response.status().as_u16();
        let body = response.text().unwrap_or_default();
        Ok(TransportResponse { status, body })
    }
}

/// The rate-limited remote sender.
///
/// Holds the single piece of timing-sensitive state in the crate: the
/// timestamp of the last remote-send attempt. The timestamp is advanced on
/// every attempt, success or failure, and never on a rate-limit rejection.
/// Check and update happen under one lock, so concurrent callers cannot both
/// pass the limiter.
#[derive(Debug)]
pub struct RemoteLog {
    url: String,
    device_id: String,
    rate_limit_ms: i64,
    last_sent_ms: Mutex<i64>,
    transport: Box<dyn Transport>,
    clock: Clock,
}

impl RemoteLog {
    /// Creates a new `RemoteLog` posting to `url` through `transport`.
    ///
    /// `rate_limit_ms` is the minimum interval between sends; zero disables
    /// rate limiting entirely.
    pub fn new(
        url: impl Into<String>,
        device_id: impl Into<String>,
        rate_limit_ms: u64,
        transport: Box<dyn Transport>,
    ) -> RemoteLog {
        RemoteLog {
            url: url.into(),
            device_id: device_id.into(),
            rate_limit_ms: i64::try_from(rate_limit_ms).unwrap_or(i64::MAX),
            last_sent_ms: Mutex::new(0),
            transport,
            clock: Clock::default(),
        }
    }

    #[cfg(test)]
    pub(crate) fn with_clock(mut self, clock: Clock) -> RemoteLog {
        self.clock = clock;
        self
    }

    #[cfg(test)]
    pub(crate) fn set_now(&mut self, now: jiff::Zoned) {
        self.clock.set_now(now);
    }

    #[cfg(test)]
    pub(crate) fn last_sent_ms(&self) -> i64 {
        *self.last_sent()
    }

    fn last_sent(&self) -> MutexGuard<'_, i64> {
        match self.last_sent_ms.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    /// Sends `message` to the remote endpoint, subject to the rate limiter.
    ///
    /// `report_error` and `report_notice` are local-only reporting paths;
    /// they must not attempt remote delivery themselves, which is what breaks
    /// the recursion between failure reporting and remote sending.
    ///
    /// A rate-limit rejection reports through `report_error` and leaves the
    /// timestamp untouched. Otherwise the transport is invoked and the
    /// timestamp advanced regardless of the outcome, so a failing endpoint is
    /// not hammered. May block up to [`REMOTE_TIMEOUT`].
    pub fn send(
        &self,
        message: &str,
        report_error: impl Fn(&str),
        report_notice: impl Fn(&str),
        override_rate_limit: bool,
    ) {
        let mut last_sent = self.last_sent();

        if self.rate_limit_ms > 0
            && !override_rate_limit
            && last_sent.saturating_add(self.rate_limit_ms) > self.clock.now_millis()
        {
            report_error("Rate limit reached for remote logging");
            return;
        }

        let payload = RemotePayload {
            device_id: self.device_id.clone(),
            log_timestamp: self.clock.now_millis(),
            log_message: message.to_owned(),
        };
        let result = self.transport.post(&self.url, &payload);

        // Advanced even on failure to avoid hammering a failing endpoint.
        *last_sent = self.clock.now_millis();
        drop(last_sent);

        match result {
            Ok(response) if response.is_success() => {
                report_notice("Successfully sent log to API");
            }
            Ok(response) => {
                report_error(&format!(
                    "Failed to send log to API: {} - {}",
                    response.status, response.body
                ));
            }
            Err(error) => {
                report_error(&format!("Failed to send log to API: {error:#}"));
            }
        }
    }
}
