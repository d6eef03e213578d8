//! The ticker task and its supervisor.

use std::io::Write;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, SyncSender, TrySendError};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use chrono::Local;

use super::{
    CleanupDelay, ServiceError, ServiceState, ShutdownOutcome, TickerSettings, TIMESTAMP_FORMAT,
};

/// A running periodic task plus the handles needed to stop it.
///
/// Dropping a service without calling [`shutdown`](Self::shutdown) closes
/// the stop channel, which also ends the task.
#[derive(Debug)]
pub struct TickerService {
    state: ServiceState,
    settings: TickerSettings,
    stop_tx: SyncSender<()>,
    done_rx: Receiver<()>,
    handle: Option<JoinHandle<()>>,
}

impl TickerService {
    /// Spawn the periodic task writing tick lines to `sink`.
    ///
    /// # Errors
    ///
    /// [`ServiceError::Spawn`] if the worker thread cannot be created.
    pub fn start<W>(settings: TickerSettings, sink: W) -> Result<Self, ServiceError>
    where
        W: Write + Send + 'static,
    {
        // Capacity one: exactly one pending stop and one pending ack.
        let (stop_tx, stop_rx) = mpsc::sync_channel(1);
        let (done_tx, done_rx) = mpsc::sync_channel(1);

        let handle = thread::Builder::new()
            .name("ticker".into())
            .spawn(move || run_task(settings, stop_rx, done_tx, sink))
            .map_err(ServiceError::Spawn)?;

        log::debug!(
            "Ticker started (interval {:?}, shutdown timeout {:?})",
            settings.interval,
            settings.shutdown_timeout
        );

        Ok(Self {
            state: ServiceState::Running,
            settings,
            stop_tx,
            done_rx,
            handle: Some(handle),
        })
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn state(&self) -> ServiceState {
        self.state
    }

    /// Ask the task to stop and wait, bounded by the shutdown timeout, for
    /// its acknowledgement.
    ///
    /// # Errors
    ///
    /// - [`ServiceError::AlreadyStopping`] if stop was already requested
    /// - [`ServiceError::TaskExited`] if the task died without acknowledging
    pub fn shutdown(&mut self) -> Result<ShutdownOutcome, ServiceError> {
        if self.state != ServiceState::Running {
            return Err(ServiceError::AlreadyStopping(self.state));
        }

        match self.stop_tx.try_send(()) {
            Ok(()) => {}
            Err(TrySendError::Full(())) => {
                return Err(ServiceError::AlreadyStopping(ServiceState::StopRequested));
            }
            Err(TrySendError::Disconnected(())) => {
                self.state = ServiceState::StopRequested;
                return Err(ServiceError::TaskExited);
            }
        }
        self.state = ServiceState::StopRequested;
        log::info!("Stop requested, waiting up to {:?}", self.settings.shutdown_timeout);

        let outcome = match self.done_rx.recv_timeout(self.settings.shutdown_timeout) {
            Ok(()) => ShutdownOutcome::Clean,
            Err(RecvTimeoutError::Timeout) => ShutdownOutcome::TimedOut,
            // The state stays `StopRequested`: no acknowledgement ever came.
            Err(RecvTimeoutError::Disconnected) => return Err(ServiceError::TaskExited),
        };
        self.state = outcome.state();

        match outcome {
            ShutdownOutcome::Clean => {
                if let Some(handle) = self.handle.take() {
                    if handle.join().is_err() {
                        log::warn!("Ticker task panicked after acknowledging shutdown");
                    }
                }
                log::info!("Ticker stopped cleanly");
            }
            // The task is left to finish on its own.
            ShutdownOutcome::TimedOut => log::warn!("Ticker did not stop in time"),
        }

        Ok(outcome)
    }
}

/// Body of the periodic task.
fn run_task<W: Write>(
    settings: TickerSettings,
    stop_rx: Receiver<()>,
    done_tx: SyncSender<()>,
    mut sink: W,
) {
    let mut next_tick = Instant::now() + settings.interval;

    loop {
        let wait = next_tick.saturating_duration_since(Instant::now());
        match stop_rx.recv_timeout(wait) {
            Err(RecvTimeoutError::Timeout) => {
                let stamp = Local::now().format(TIMESTAMP_FORMAT);
                if let Err(e) = writeln!(sink, "{}", stamp).and_then(|()| sink.flush()) {
                    log::warn!("Failed to write tick: {}", e);
                }
                next_tick = next_deadline(next_tick, settings.interval, Instant::now());
            }
            Ok(()) => {
                cleanup(settings.cleanup);
                if done_tx.try_send(()).is_err() {
                    log::debug!("Shutdown acknowledgement was not received");
                }
                return;
            }
            Err(RecvTimeoutError::Disconnected) => {
                log::debug!("Ticker supervisor went away, stopping");
                return;
            }
        }
    }
}

/// The first tick deadline after `previous` that is still ahead of `now`.
///
/// Ticks missed during a stall are dropped rather than written in a burst.
fn next_deadline(previous: Instant, interval: Duration, now: Instant) -> Instant {
    let next = previous + interval;
    if next > now {
        return next;
    }
    let behind = now.duration_since(next).as_nanos();
    let skipped = behind / interval.as_nanos().max(1) + 1;
    next + interval.saturating_mul(u32::try_from(skipped).unwrap_or(u32::MAX))
}

fn cleanup(delay: CleanupDelay) {
    let delay = delay.pick();
    log::info!("Ticker cleaning up for {:?}", delay);
    thread::sleep(delay);
}
