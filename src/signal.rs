//! Signal handling for graceful shutdown.
//!
//! Interrupts (SIGINT, SIGTERM and SIGHUP via ctrlc's `termination`
//! feature) are turned into a single message on a capacity-one channel.
//! Only the first interrupt is forwarded; later ones are logged and ignored
//! so that the shutdown already in progress runs to completion.
//!
//! # Usage
//!
//! ```rust,no_run
//! use dupseek::signal::install_handler;
//!
//! let listener = install_handler().expect("Failed to install signal handler");
//! listener.wait();
//! println!("Interrupted, shutting down");
//! ```

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc::{self, Receiver, SyncSender};
use std::sync::Arc;

/// Error type for signal handler installation.
#[derive(Debug, thiserror::Error)]
pub enum SignalError {
    /// Failed to install the interrupt handler.
    #[error("Failed to install signal handler: {0}")]
    InstallFailed(#[from] ctrlc::Error),
}

/// Raising side of an interrupt channel.
///
/// Cloned into the OS signal handler; tests raise it directly.
#[derive(Debug, Clone)]
pub struct InterruptTrigger {
    tx: SyncSender<()>,
    count: Arc<AtomicUsize>,
}

impl InterruptTrigger {
    /// Record an interrupt.
    ///
    /// Returns `true` if this was the first interrupt and it was forwarded.
    pub fn raise(&self) -> bool {
        let seen = self.count.fetch_add(1, Ordering::SeqCst) + 1;
        if seen == 1 {
            log::info!("Shutdown signal received");
            // The listener may already be gone; nothing left to stop then.
            let _ = self.tx.try_send(());
            true
        } else {
            log::warn!("Already shutting down, ignoring interrupt #{}", seen);
            false
        }
    }

    /// Number of interrupts seen so far.
    #[must_use]
    pub fn count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }
}

/// Receiving side of an interrupt channel.
#[derive(Debug)]
pub struct InterruptListener {
    rx: Receiver<()>,
}

impl InterruptListener {
    /// Block until the first interrupt arrives.
    ///
    /// Returns immediately if every trigger has been dropped.
    pub fn wait(&self) {
        if self.rx.recv().is_err() {
            log::debug!("All interrupt triggers dropped");
        }
    }
}

/// Create a connected trigger/listener pair without touching OS signals.
#[must_use]
pub fn interrupt_channel() -> (InterruptTrigger, InterruptListener) {
    let (tx, rx) = mpsc::sync_channel(1);
    (
        InterruptTrigger {
            tx,
            count: Arc::new(AtomicUsize::new(0)),
        },
        InterruptListener { rx },
    )
}

/// Install the process-wide interrupt handler.
///
/// Call once, early in `main`.
///
/// # Errors
///
/// [`SignalError::InstallFailed`] if a handler is already installed or the
/// platform refuses.
pub fn install_handler() -> Result<InterruptListener, SignalError> {
    let (trigger, listener) = interrupt_channel();
    ctrlc::set_handler(move || {
        trigger.raise();
    })?;
    Ok(listener)
}
