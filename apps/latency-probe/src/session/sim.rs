//! Simulated trading session.
//!
//! A loopback implementation of [`TradingSession`] that acknowledges every
//! submit and cancel from its own thread after a configurable delay. It lets
//! the probe run end to end without venue credentials; real venues implement
//! the same trait. Order ids are generated sequentially starting from 1.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;

use parking_lot::Mutex;

use super::{CancelHandler, CancelOutcome, SubmitHandler, SubmitOutcome, TradingSession};
use crate::domain::OrderRequest;

/// Loopback session acknowledging requests after a fixed delay.
pub struct SimSession {
    connected: AtomicBool,
    ack_delay: Duration,
    order_counter: AtomicU64,
    submit_handler: Arc<Mutex<Option<SubmitHandler>>>,
    cancel_handler: Arc<Mutex<Option<CancelHandler>>>,
}

impl SimSession {
    /// Create a simulated session that acknowledges after `ack_delay`.
    #[must_use]
    pub fn new(ack_delay: Duration) -> Self {
        Self {
            connected: AtomicBool::new(false),
            ack_delay,
            order_counter: AtomicU64::new(1),
            submit_handler: Arc::new(Mutex::new(None)),
            cancel_handler: Arc::new(Mutex::new(None)),
        }
    }
}

impl TradingSession for SimSession {
    fn connect(&self) -> bool {
        self.connected.store(true, Ordering::SeqCst);
        true
    }

    fn login(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }

    fn is_connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }

    fn disconnect(&self) {
        self.connected.store(false, Ordering::SeqCst);
    }

    fn set_submit_handler(&self, handler: SubmitHandler) {
        *self.submit_handler.lock() = Some(handler);
    }

    fn set_cancel_handler(&self, handler: CancelHandler) {
        *self.cancel_handler.lock() = Some(handler);
    }

    fn submit_order(&self, _order: &OrderRequest) {
        let seq = self.order_counter.fetch_add(1, Ordering::SeqCst);
        let handler = Arc::clone(&self.submit_handler);
        let delay = self.ack_delay;
        std::thread::spawn(move || {
            std::thread::sleep(delay);
            let outcome = SubmitOutcome::accepted(format!("sim-{seq}"), format!("tkt-{seq}"));
            if let Some(handler) = handler.lock().as_ref() {
                handler(outcome);
            }
        });
    }

    fn cancel_order(&self, _order_id: &str, _order_ticket_id: &str, _order: &OrderRequest) {
        let handler = Arc::clone(&self.cancel_handler);
        let delay = self.ack_delay;
        std::thread::spawn(move || {
            std::thread::sleep(delay);
            if let Some(handler) = handler.lock().as_ref() {
                handler(CancelOutcome::accepted());
            }
        });
    }
}
