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

use std::fmt;

use crate::LoggerConfig;
use crate::Record;
use crate::Severity;
use crate::append::Append;
use crate::append::DailyFile;
use crate::append::Stdout;
use crate::clock::Clock;
use crate::remote::HttpTransport;
use crate::remote::RemoteLog;
use crate::remote::Transport;

/// The logging facade: one entry point per severity, fanning each call out to
/// the console sink, the daily file sink, and optionally the remote endpoint.
///
/// Construct one per process and pass it to call sites explicitly; there is
/// no hidden global instance.
///
/// ```no_run
/// use birdbot_logger::Logger;
/// use birdbot_logger::LoggerConfig;
///
/// let logger = Logger::new(LoggerConfig::default())?;
/// logger.info("bot started", false);
/// logger.error("feeder jammed", true);
/// # anyhow::Ok(())
/// ```
///
/// Logging calls never fail from the caller's point of view: a broken local
/// backend is reported with a direct console print, and remote delivery is
/// best-effort.
#[derive(Debug)]
pub struct Logger {
    sinks: Vec<Box<dyn Append>>,
    remote: Option<RemoteLog>,
    clock: Clock,
}

impl Logger {
    /// Creates a logger from `config` with the default HTTP transport.
    pub fn new(config: LoggerConfig) -> anyhow::Result<Logger> {
        Logger::builder(config).build()
    }

    /// Creates a new [`LoggerBuilder`], for injecting a custom [`Transport`].
    pub fn builder(config: LoggerConfig) -> LoggerBuilder {
        LoggerBuilder {
            config,
            transport: None,
            clock: Clock::default(),
        }
    }

    /// Logs a debug message. Never forwarded to the remote endpoint.
    pub fn debug(&self, message: impl fmt::Display) {
        self.dispatch(&message.to_string(), Severity::Debug);
    }

    /// Logs an information message; forwarded to the remote endpoint when
    /// `send_to_api` is set and remote logging is enabled.
    pub fn info(&self, message: impl fmt::Display, send_to_api: bool) {
        let message = message.to_string();
        self.dispatch(&message, Severity::Info);
        if send_to_api {
            self.send_to_remote(&message);
        }
    }

    /// Logs a notice message (information, but green); forwarded to the
    /// remote endpoint when `send_to_api` is set and remote logging is
    /// enabled.
    pub fn notice(&self, message: impl fmt::Display, send_to_api: bool) {
        let message = message.to_string();
        self.dispatch(&message, Severity::Notice);
        if send_to_api {
            self.send_to_remote(&message);
        }
    }

    /// Logs a warning message; forwarded to the remote endpoint when
    /// `send_to_api` is set and remote logging is enabled.
    pub fn warning(&self, message: impl fmt::Display, send_to_api: bool) {
        let message = message.to_string();
        self.dispatch(&message, Severity::Warning);
        if send_to_api {
            self.send_to_remote(&message);
        }
    }

    /// Logs an error message; forwarded to the remote endpoint when
    /// `send_to_api` is set and remote logging is enabled. Callers normally
    /// pass `true` — error telemetry bypasses the rate limiter so it is
    /// never silently dropped — but can opt out for errors about the remote
    /// endpoint itself.
    pub fn error(&self, message: impl fmt::Display, send_to_api: bool) {
        let message = message.to_string();
        self.dispatch(&message, Severity::Error);
        if send_to_api {
            self.send_to_remote(&message);
        }
    }

    /// Writes to the local sinks only. Failures are reported with a direct
    /// console print and never propagated.
    fn dispatch(&self, message: &str, severity: Severity) {
        let time = self.clock.now();
        let record = Record::new(message, severity, &time);
        for sink in &self.sinks {
            if let Err(error) = sink.append(&record) {
                println!("Error while logging: {error:#}");
            }
        }
    }

    /// Every caller-requested send skips the limiter; the limiter only gates
    /// callers going through [`RemoteLog::send`] without the override. The
    /// reporting callbacks log locally only, which is what keeps failure
    /// reporting from re-entering remote delivery.
    fn send_to_remote(&self, message: &str) {
        let Some(remote) = &self.remote else {
            return;
        };
        remote.send(
            message,
            |report| self.dispatch(report, Severity::Error),
            |report| self.dispatch(report, Severity::Notice),
            true,
        );
    }

    /// Flushes the local sinks.
    pub fn flush(&self) {
        for sink in &self.sinks {
            sink.flush();
        }
    }
}

/// A builder for configuring a [`Logger`].
#[derive(Debug)]
pub struct LoggerBuilder {
    config: LoggerConfig,
    transport: Option<Box<dyn Transport>>,
    clock: Clock,
}

impl LoggerBuilder {
    /// Replaces the default HTTP transport. Only consulted when remote
    /// logging is enabled in the configuration.
    pub fn transport(mut self, transport: impl Transport) -> LoggerBuilder {
        self.transport = Some(Box::new(transport));
        self
    }

    #[cfg(test)]
    pub(crate) fn clock(mut self, clock: Clock) -> LoggerBuilder {
        self.clock = clock;
        self
    }

    /// Builds the [`Logger`], opening the daily log file and wiring the
    /// remote sender iff remote logging is enabled.
    pub fn build(self) -> anyhow::Result<Logger> {
        let config = self.config;

        let console = Stdout::new(config.min_severity);
        let file = {
            let builder = DailyFile::builder(&config.log_directory)
                .min_severity(config.min_severity);
            #[cfg(test)]
            let builder = builder.clock(self.clock.clone());
            builder.build()?
        };

        let remote = if config.remote_logging {
            let transport = match self.transport {
                Some(transport) => transport,
                None => Box::new(HttpTransport::new()?),
            };
            let remote = RemoteLog::new(
                config.remote_url,
                config.device_id,
                config.remote_rate_limit_ms,
                transport,
            );
            #[cfg(test)]
            let remote = remote.with_clock(self.clock.clone());
            Some(remote)
        } else {
            None
        };

        Ok(Logger {
            sinks: vec![Box::new(console), Box::new(file)],
            remote,
            clock: self.clock,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::sync::Arc;
    use std::sync::Mutex;

    use jiff::Zoned;

    use super::*;
    use crate::clock::ManualClock;
    use crate::remote::RemotePayload;
    use crate::remote::TransportResponse;

    #[derive(Debug, Clone)]
    struct MockTransport {
        status: u16,
        body: String,
        calls: Arc<Mutex<Vec<RemotePayload>>>,
    }

    impl MockTransport {
        fn with_response(status: u16, body: &str) -> MockTransport {
            MockTransport {
                status,
                body: body.to_owned(),
                calls: Arc::new(Mutex::new(Vec::new())),
            }
        }

        fn calls(&self) -> Vec<RemotePayload> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl Transport for MockTransport {
        fn post(&self, _url: &str, payload: &RemotePayload) -> anyhow::Result<TransportResponse> {
            self.calls.lock().unwrap().push(payload.clone());
            Ok(TransportResponse {
                status: self.status,
                body: self.body.clone(),
            })
        }
    }

    fn frozen_clock() -> Clock {
        let now: Zoned = "2023-08-19T00:00:00[UTC]".parse().unwrap();
        Clock::ManualClock(ManualClock::new(now))
    }

    fn config(dir: &std::path::Path, remote: bool) -> LoggerConfig {
        LoggerConfig {
            log_directory: dir.to_path_buf(),
            min_severity: Severity::Info,
            remote_logging: remote,
            remote_rate_limit_ms: 100,
            remote_url: "http://test.com".to_owned(),
            device_id: "test_device_id".to_owned(),
        }
    }

    fn read_log(dir: &std::path::Path) -> String {
        fs::read_to_string(dir.join("19-08-23-birdbot.log")).unwrap()
    }

    #[test]
    fn test_dispatch_writes_plain_lines_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let logger = Logger::builder(config(dir.path(), false))
            .clock(frozen_clock())
            .build()
            .unwrap();

        logger.info("bot started", false);
        logger.warning("low seed", false);
        logger.flush();

        assert_eq!(
            read_log(dir.path()),
            "19-08-2023 00:00:00: INFO: bot started\n\
             19-08-2023 00:00:00: WARNING: low seed\n"
        );
    }

    #[test]
    fn test_dispatch_respects_minimum_severity() {
        let dir = tempfile::tempdir().unwrap();
        let logger = Logger::builder(config(dir.path(), false))
            .clock(frozen_clock())
            .build()
            .unwrap();

        logger.debug("too quiet");
        logger.flush();

        assert_eq!(read_log(dir.path()), "");
    }

    #[test]
    fn test_error_sends_to_remote_and_logs_success_notice() {
        let dir = tempfile::tempdir().unwrap();
        let transport = MockTransport::with_response(200, "Success");
        let logger = Logger::builder(config(dir.path(), true))
            .transport(transport.clone())
            .clock(frozen_clock())
            .build()
            .unwrap();

        logger.error("feeder jammed", true);
        logger.flush();

        let calls = transport.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].log_message, "feeder jammed");
        assert_eq!(calls[0].device_id, "test_device_id");
        assert_eq!(calls[0].log_timestamp, 1692403200000);
        assert_eq!(
            read_log(dir.path()),
            "19-08-2023 00:00:00: ERROR: feeder jammed\n\
             19-08-2023 00:00:00: NOTICE: Successfully sent log to API\n"
        );
    }

    #[test]
    fn test_transport_failure_reported_locally_without_recursion() {
        let dir = tempfile::tempdir().unwrap();
        let transport = MockTransport::with_response(500, "oops");
        let logger = Logger::builder(config(dir.path(), true))
            .transport(transport.clone())
            .clock(frozen_clock())
            .build()
            .unwrap();

        logger.error("feeder jammed", true);
        logger.flush();

        // The failure report must not itself hit the transport.
        assert_eq!(transport.calls().len(), 1);
        assert_eq!(
            read_log(dir.path()),
            "19-08-2023 00:00:00: ERROR: feeder jammed\n\
             19-08-2023 00:00:00: ERROR: Failed to send log to API: 500 - oops\n"
        );
    }

    #[test]
    fn test_explicit_send_overrides_rate_limiter() {
        let dir = tempfile::tempdir().unwrap();
        let transport = MockTransport::with_response(200, "Success");
        let logger = Logger::builder(config(dir.path(), true))
            .transport(transport.clone())
            .clock(frozen_clock())
            .build()
            .unwrap();

        // Two back-to-back explicit sends within the 100ms interval.
        logger.warning("first", true);
        logger.info("second", true);

        assert_eq!(transport.calls().len(), 2);
    }

    #[test]
    fn test_error_opt_out_stays_local() {
        let dir = tempfile::tempdir().unwrap();
        let transport = MockTransport::with_response(200, "Success");
        let logger = Logger::builder(config(dir.path(), true))
            .transport(transport.clone())
            .clock(frozen_clock())
            .build()
            .unwrap();

        logger.error("logging endpoint unreachable", false);
        logger.flush();

        assert!(transport.calls().is_empty());
        assert_eq!(
            read_log(dir.path()),
            "19-08-2023 00:00:00: ERROR: logging endpoint unreachable\n"
        );
    }

    #[test]
    fn test_opt_out_calls_do_not_reach_remote() {
        let dir = tempfile::tempdir().unwrap();
        let transport = MockTransport::with_response(200, "Success");
        let logger = Logger::builder(config(dir.path(), true))
            .transport(transport.clone())
            .clock(frozen_clock())
            .build()
            .unwrap();

        logger.debug("local only");
        logger.info("local only", false);
        logger.notice("local only", false);
        logger.warning("local only", false);

        assert!(transport.calls().is_empty());
    }

    #[test]
    fn test_remote_disabled_ignores_send_requests() {
        let dir = tempfile::tempdir().unwrap();
        let transport = MockTransport::with_response(200, "Success");
        let logger = Logger::builder(config(dir.path(), false))
            .transport(transport.clone())
            .clock(frozen_clock())
            .build()
            .unwrap();

        logger.error("feeder jammed", true);
        logger.info("please send", true);

        assert!(transport.calls().is_empty());
    }

    #[test]
    fn test_accepts_any_displayable_message() {
        let dir = tempfile::tempdir().unwrap();
        let logger = Logger::builder(config(dir.path(), false))
            .clock(frozen_clock())
            .build()
            .unwrap();

        logger.info(42, false);
        logger.warning(format_args!("{}-{}", "a", "b"), false);
        logger.flush();

        assert_eq!(
            read_log(dir.path()),
            "19-08-2023 00:00:00: INFO: 42\n\
             19-08-2023 00:00:00: WARNING: a-b\n"
        );
    }
}
