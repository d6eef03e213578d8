//! Periodic ticker service with graceful shutdown.
//!
//! # Overview
//!
//! [`TickerService`] runs a background task that writes a timestamp line on
//! a fixed interval. Shutdown is a one-shot handshake over two capacity-one
//! channels:
//!
//! 1. the supervisor sends a single stop message;
//! 2. the task runs its cleanup (a bounded random delay), sends a single
//!    completion message and exits;
//! 3. the supervisor waits for that completion, bounded by the shutdown
//!    timeout.
//!
//! # States
//!
//! ```text
//! Running -> StopRequested -> StoppedCleanly
//!                          -> StoppedByTimeout
//! ```
//!
//! A service can be asked to stop once; further requests fail with
//! [`ServiceError::AlreadyStopping`].

pub mod service;

use std::fmt;
use std::time::Duration;

use rand::Rng;
use thiserror::Error;

pub use service::TickerService;

/// Timestamp format of a tick line, e.g. `07.03.2024 14:05:09`.
pub const TIMESTAMP_FORMAT: &str = "%d.%m.%Y %H:%M:%S";

/// Message printed when the task acknowledged the stop in time.
pub const CLEAN_SHUTDOWN_MESSAGE: &str = "Graceful shutdown!";

/// Message printed when the shutdown timeout elapsed first.
pub const TIMEOUT_SHUTDOWN_MESSAGE: &str = "Time is out. Shutdown!";

/// Lifecycle state of a [`TickerService`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceState {
    /// The periodic task is ticking.
    Running,
    /// Stop was sent; waiting for acknowledgement.
    StopRequested,
    /// The task acknowledged before the timeout.
    StoppedCleanly,
    /// The timeout elapsed before the task acknowledged.
    StoppedByTimeout,
}

impl fmt::Display for ServiceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Running => "running",
            Self::StopRequested => "stop requested",
            Self::StoppedCleanly => "stopped cleanly",
            Self::StoppedByTimeout => "stopped by timeout",
        };
        f.write_str(name)
    }
}

/// How a shutdown ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownOutcome {
    /// Completion arrived before the timeout.
    Clean,
    /// The timeout elapsed first.
    TimedOut,
}

impl ShutdownOutcome {
    /// The terminal state this outcome corresponds to.
    #[must_use]
    pub fn state(self) -> ServiceState {
        match self {
            Self::Clean => ServiceState::StoppedCleanly,
            Self::TimedOut => ServiceState::StoppedByTimeout,
        }
    }

    /// The line reported to the user.
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            Self::Clean => CLEAN_SHUTDOWN_MESSAGE,
            Self::TimedOut => TIMEOUT_SHUTDOWN_MESSAGE,
        }
    }
}

/// Duration of the task's simulated cleanup after a stop request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CleanupDelay {
    /// Always the same delay.
    Fixed(Duration),
    /// Uniformly random in `[0, max)` milliseconds.
    Random {
        /// Exclusive upper bound
        max: Duration,
    },
}

impl CleanupDelay {
    /// Pick the delay for one cleanup.
    #[must_use]
    pub fn pick(&self) -> Duration {
        match *self {
            Self::Fixed(d) => d,
            Self::Random { max } => {
                let max_ms = u64::try_from(max.as_millis()).unwrap_or(u64::MAX);
                if max_ms == 0 {
                    Duration::ZERO
                } else {
                    Duration::from_millis(rand::rng().random_range(0..max_ms))
                }
            }
        }
    }
}

/// Runtime settings of a [`TickerService`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickerSettings {
    /// Time between ticks
    pub interval: Duration,
    /// How long shutdown waits for the task's acknowledgement
    pub shutdown_timeout: Duration,
    /// Cleanup the task performs before acknowledging
    pub cleanup: CleanupDelay,
}

impl Default for TickerSettings {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(1),
            shutdown_timeout: Duration::from_secs(1),
            cleanup: CleanupDelay::Random {
                max: Duration::from_millis(2000),
            },
        }
    }
}

/// Errors from the ticker service.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Failed to spawn the periodic task.
    #[error("failed to start ticker task: {0}")]
    Spawn(#[source] std::io::Error),

    /// Shutdown was requested when the service was no longer running.
    #[error("service is already {0}")]
    AlreadyStopping(ServiceState),

    /// The task went away without acknowledging the stop.
    #[error("ticker task exited without acknowledging shutdown")]
    TaskExited,
}
