//! Order lifecycle orchestration.
//!
//! Drives a single order through submit → acknowledge → cancel → acknowledge
//! against a [`TradingSession`]. The session delivers completions from its
//! own threads at arbitrary times, so both handlers are installed before the
//! submit is issued and the orchestrator blocks on a condvar rather than
//! polling: a completion firing before the wait begins leaves its slot set
//! and is observed under the lock, a completion firing during the wait is
//! notified. The two channels (submit, cancel) are strictly sequenced; only
//! one wait is ever outstanding.
//!
//! The signal block is `Arc`-owned by the registered handlers, so a
//! completion arriving after a wait has timed out writes into live memory
//! and is simply never read.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::{Condvar, Mutex};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::OrderRequest;
use crate::session::{CancelOutcome, SubmitOutcome, TradingSession};
use crate::timing::TimingMarkers;

/// Default bounded wait for each acknowledgment.
pub const DEFAULT_ACK_TIMEOUT: Duration = Duration::from_secs(10);

/// Default settling interval between submit acknowledgment and cancel
/// request. Gives the venue time to fully register the order; a policy
/// constant, not a correctness requirement.
pub const DEFAULT_SETTLE_DELAY: Duration = Duration::from_secs(1);

/// Pacing and timeout policy for one lifecycle run.
#[derive(Debug, Clone)]
pub struct LifecycleOptions {
    /// Bounded wait for the submit acknowledgment.
    pub submit_timeout: Duration,
    /// Bounded wait for the cancel acknowledgment.
    pub cancel_timeout: Duration,
    /// Settling interval before the cancel request is issued.
    pub settle_delay: Duration,
}

impl Default for LifecycleOptions {
    fn default() -> Self {
        Self {
            submit_timeout: DEFAULT_ACK_TIMEOUT,
            cancel_timeout: DEFAULT_ACK_TIMEOUT,
            settle_delay: DEFAULT_SETTLE_DELAY,
        }
    }
}

/// Progression of a single order through one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LifecycleState {
    /// Nothing issued yet.
    #[default]
    Idle,
    /// Submit issued, acknowledgment outstanding.
    Submitted,
    /// Submit acknowledgment received.
    Acknowledged,
    /// Cancel issued, acknowledgment outstanding.
    CancelRequested,
    /// Cancel acknowledgment received; terminal.
    CancelAcknowledged,
    /// A bounded wait elapsed without a completion; terminal.
    TimedOut,
}

impl std::fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::Submitted => "submitted",
            Self::Acknowledged => "acknowledged",
            Self::CancelRequested => "cancel_requested",
            Self::CancelAcknowledged => "cancel_acknowledged",
            Self::TimedOut => "timed_out",
        };
        write!(f, "{name}")
    }
}

/// Terminal failures of a lifecycle run. Every failure ends the run; there
/// are no retries at this layer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LifecycleError {
    /// The venue rejected the submission. Nothing was placed, so no
    /// cancellation is attempted.
    #[error("order submission failed: {0}")]
    SubmitRejected(String),

    /// No submit acknowledgment arrived within the bounded wait. There is no
    /// order id to cancel, so the cancellation phase is skipped entirely.
    #[error("order submission timeout")]
    SubmitTimeout,

    /// No cancel acknowledgment arrived within the bounded wait.
    #[error("order cancellation timeout")]
    CancelTimeout,
}

impl LifecycleError {
    /// The terminal state this failure leaves the run in.
    #[must_use]
    pub const fn terminal_state(&self) -> LifecycleState {
        match self {
            Self::SubmitRejected(_) => LifecycleState::Acknowledged,
            Self::SubmitTimeout | Self::CancelTimeout => LifecycleState::TimedOut,
        }
    }
}

/// Timing captured around the submit round-trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitTiming {
    /// Instant the submit was issued, in nanoseconds since the Unix epoch.
    pub start_ns: u64,
    /// Instant the completion handler fired.
    pub end_ns: u64,
}

impl SubmitTiming {
    /// Round-trip duration in nanoseconds.
    #[must_use]
    pub const fn total_ns(&self) -> u64 {
        self.end_ns.saturating_sub(self.start_ns)
    }
}

/// Result of a completed run: both acknowledgments were received.
///
/// A cancel acknowledgment with `success = false` is a partial failure; the
/// run still counts as complete.
#[derive(Debug, Clone, Serialize)]
pub struct LifecycleReport {
    /// Final lifecycle state.
    pub state: LifecycleState,
    /// The submit acknowledgment.
    pub submit: SubmitOutcome,
    /// The cancel acknowledgment.
    pub cancel: CancelOutcome,
    /// Submit round-trip timing, when timing was enabled.
    pub timing: Option<SubmitTiming>,
}

/// Completion slots written by the session's callback threads under the
/// mutex and read by the orchestrator thread after the matching wait
/// returns.
#[derive(Default)]
struct Slots {
    state: LifecycleState,
    start_ns: Option<u64>,
    submit: Option<SubmitOutcome>,
    submit_end_ns: Option<u64>,
    cancel: Option<CancelOutcome>,
}

/// Shared synchronization block for the two completion channels.
#[derive(Default)]
struct SignalBlock {
    slots: Mutex<Slots>,
    submit_cv: Condvar,
    cancel_cv: Condvar,
}

impl SignalBlock {
    fn advance(&self, next: LifecycleState) {
        let mut slots = self.slots.lock();
        tracing::debug!(from = %slots.state, to = %next, "lifecycle transition");
        slots.state = next;
    }
}

/// Orchestrates one order through submit → ack → cancel → ack.
pub struct OrderLifecycle {
    options: LifecycleOptions,
    markers: Arc<TimingMarkers>,
}

impl OrderLifecycle {
    /// Create an orchestrator with the given pacing policy and timing
    /// markers.
    #[must_use]
    pub fn new(options: LifecycleOptions, markers: TimingMarkers) -> Self {
        Self {
            options,
            markers: Arc::new(markers),
        }
    }

    /// Run the full lifecycle for one order.
    ///
    /// The session must already be connected and authenticated. On success
    /// both acknowledgments were received and the session has been
    /// disconnected; timeout paths leave the session untouched.
    ///
    /// # Errors
    ///
    /// [`LifecycleError::SubmitTimeout`] or [`LifecycleError::CancelTimeout`]
    /// when the corresponding bounded wait elapses without a completion, and
    /// [`LifecycleError::SubmitRejected`] when the venue refuses the order.
    pub fn run(
        &self,
        session: &dyn TradingSession,
        order: &OrderRequest,
    ) -> Result<LifecycleReport, LifecycleError> {
        let signals = Arc::new(SignalBlock::default());

        // Handlers go in before anything is submitted; a completion may fire
        // before the wait begins and its slot must already exist.
        self.install_handlers(session, &signals);

        if let Some(start_ns) = self.markers.mark_start() {
            signals.slots.lock().start_ns = Some(start_ns);
        }

        signals.advance(LifecycleState::Submitted);
        session.submit_order(order);

        let (submit, timing) = self.wait_for_submit_ack(&signals)?;
        signals.advance(LifecycleState::Acknowledged);

        if !submit.success {
            tracing::error!(error = %submit.error_message, "order submission failed");
            return Err(LifecycleError::SubmitRejected(submit.error_message));
        }

        tracing::info!(
            order_id = %submit.order_id,
            order_ticket_id = %submit.order_ticket_id,
            "order submitted"
        );

        // Settling interval before the cancel goes out.
        std::thread::sleep(self.options.settle_delay);

        signals.advance(LifecycleState::CancelRequested);
        session.cancel_order(&submit.order_id, &submit.order_ticket_id, order);

        let cancel = self.wait_for_cancel_ack(&signals)?;
        signals.advance(LifecycleState::CancelAcknowledged);

        if cancel.success {
            tracing::info!(order_id = %submit.order_id, "order cancelled");
        } else {
            tracing::warn!(error = %cancel.error_message, "order cancellation failed");
        }

        if session.is_connected() {
            session.disconnect();
        }

        Ok(LifecycleReport {
            state: LifecycleState::CancelAcknowledged,
            submit,
            cancel,
            timing,
        })
    }

    /// Install both completion handlers on the session.
    fn install_handlers(&self, session: &dyn TradingSession, signals: &Arc<SignalBlock>) {
        let markers = Arc::clone(&self.markers);
        let block = Arc::clone(signals);
        session.set_submit_handler(Box::new(move |outcome| {
            // The end of the round-trip is captured here, inside the
            // callback, so the measurement excludes orchestrator wake-up
            // scheduling jitter.
            let end_ns = TimingMarkers::now_ns();
            let mut slots = block.slots.lock();
            if let Some(start_ns) = slots.start_ns {
                markers.mark_end(start_ns, end_ns);
                slots.submit_end_ns = Some(end_ns);
            }
            slots.submit = Some(outcome);
            drop(slots);
            block.submit_cv.notify_one();
        }));

        let block = Arc::clone(signals);
        session.set_cancel_handler(Box::new(move |outcome| {
            let mut slots = block.slots.lock();
            slots.cancel = Some(outcome);
            drop(slots);
            block.cancel_cv.notify_one();
        }));
    }

    /// Block until the submit acknowledgment arrives or the bounded wait
    /// elapses.
    fn wait_for_submit_ack(
        &self,
        signals: &SignalBlock,
    ) -> Result<(SubmitOutcome, Option<SubmitTiming>), LifecycleError> {
        let mut slots = signals.slots.lock();
        // Timeout is judged by the slot, not the wait result: a completion
        // that raced the deadline still counts.
        let _ = signals.submit_cv.wait_while_for(
            &mut slots,
            |slots| slots.submit.is_none(),
            self.options.submit_timeout,
        );

        let Some(outcome) = slots.submit.take() else {
            slots.state = LifecycleState::TimedOut;
            drop(slots);
            tracing::error!(
                timeout_secs = self.options.submit_timeout.as_secs_f64(),
                "order submission timeout"
            );
            return Err(LifecycleError::SubmitTimeout);
        };

        let timing = match (slots.start_ns, slots.submit_end_ns) {
            (Some(start_ns), Some(end_ns)) => Some(SubmitTiming { start_ns, end_ns }),
            _ => None,
        };
        Ok((outcome, timing))
    }

    /// Block until the cancel acknowledgment arrives or the bounded wait
    /// elapses.
    fn wait_for_cancel_ack(&self, signals: &SignalBlock) -> Result<CancelOutcome, LifecycleError> {
        let mut slots = signals.slots.lock();
        let _ = signals.cancel_cv.wait_while_for(
            &mut slots,
            |slots| slots.cancel.is_none(),
            self.options.cancel_timeout,
        );

        let Some(outcome) = slots.cancel.take() else {
            slots.state = LifecycleState::TimedOut;
            drop(slots);
            tracing::error!(
                timeout_secs = self.options.cancel_timeout.as_secs_f64(),
                "order cancellation timeout"
            );
            return Err(LifecycleError::CancelTimeout);
        };
        Ok(outcome)
    }
}
