//! Trading Session Port
//!
//! Interface for the exchange trading session the probe measures against.
//! The transport itself (wire protocol, authentication, internal threading)
//! is opaque; this module defines only the capability surface the lifecycle
//! orchestrator consumes plus the completion outcomes the session delivers.

use serde::{Deserialize, Serialize};

use crate::domain::OrderRequest;

pub mod sim;

/// Completion handler invoked by the session, from an unspecified thread,
/// exactly once per submit request.
pub type SubmitHandler = Box<dyn Fn(SubmitOutcome) + Send + Sync>;

/// Completion handler invoked by the session, from an unspecified thread,
/// exactly once per cancel request.
pub type CancelHandler = Box<dyn Fn(CancelOutcome) + Send + Sync>;

/// Outcome of one order submission attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmitOutcome {
    /// Whether the venue accepted the order.
    pub success: bool,
    /// Venue-assigned order id; empty on rejection.
    pub order_id: String,
    /// Venue-assigned ticket id; empty on rejection.
    pub order_ticket_id: String,
    /// Venue-reported reason when `success` is false.
    pub error_message: String,
}

impl SubmitOutcome {
    /// An accepted submission carrying its venue identifiers.
    #[must_use]
    pub fn accepted(order_id: impl Into<String>, order_ticket_id: impl Into<String>) -> Self {
        Self {
            success: true,
            order_id: order_id.into(),
            order_ticket_id: order_ticket_id.into(),
            error_message: String::new(),
        }
    }

    /// A rejected submission with the venue's reason.
    #[must_use]
    pub fn rejected(error_message: impl Into<String>) -> Self {
        Self {
            success: false,
            order_id: String::new(),
            order_ticket_id: String::new(),
            error_message: error_message.into(),
        }
    }
}

/// Outcome of one cancellation attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CancelOutcome {
    /// Whether the venue accepted the cancellation.
    pub success: bool,
    /// Venue-reported reason when `success` is false.
    pub error_message: String,
}

impl CancelOutcome {
    /// An accepted cancellation.
    #[must_use]
    pub fn accepted() -> Self {
        Self {
            success: true,
            error_message: String::new(),
        }
    }

    /// A rejected cancellation with the venue's reason.
    #[must_use]
    pub fn rejected(error_message: impl Into<String>) -> Self {
        Self {
            success: false,
            error_message: error_message.into(),
        }
    }
}

/// Port for the exchange trading session.
///
/// Submit and cancel are fire-and-forget: the result arrives later through
/// the registered completion handler, from one of the session's own threads.
/// Handlers must be registered before the corresponding request is issued or
/// a completion may be lost.
pub trait TradingSession: Send + Sync {
    /// Open the transport. Returns `false` when the venue is unreachable.
    fn connect(&self) -> bool;

    /// Authenticate on the connected transport.
    fn login(&self) -> bool;

    /// Whether the transport currently reports itself connected.
    fn is_connected(&self) -> bool;

    /// Close the transport. Callers skip this when the session already
    /// reports disconnected, to avoid double-disconnect errors.
    fn disconnect(&self);

    /// Register the submit completion handler.
    fn set_submit_handler(&self, handler: SubmitHandler);

    /// Register the cancel completion handler.
    fn set_cancel_handler(&self, handler: CancelHandler);

    /// Submit an order. The outcome arrives via the submit handler.
    fn submit_order(&self, order: &OrderRequest);

    /// Cancel a previously submitted order. The session needs the original
    /// request alongside the venue identifiers to route the cancel.
    fn cancel_order(&self, order_id: &str, order_ticket_id: &str, order: &OrderRequest);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepted_submit_outcome() {
        let outcome = SubmitOutcome::accepted("ord-1", "tkt-1");
        assert!(outcome.success);
        assert_eq!(outcome.order_id, "ord-1");
        assert_eq!(outcome.order_ticket_id, "tkt-1");
        assert!(outcome.error_message.is_empty());
    }

    #[test]
    fn rejected_submit_outcome() {
        let outcome = SubmitOutcome::rejected("insufficient balance");
        assert!(!outcome.success);
        assert!(outcome.order_id.is_empty());
        assert_eq!(outcome.error_message, "insufficient balance");
    }

    #[test]
    fn cancel_outcomes() {
        assert!(CancelOutcome::accepted().success);
        let rejected = CancelOutcome::rejected("unknown order");
        assert!(!rejected.success);
        assert_eq!(rejected.error_message, "unknown order");
    }

    #[test]
    fn outcome_serde() {
        let json = serde_json::to_string(&CancelOutcome::accepted()).unwrap();
        assert_eq!(json, r#"{"success":true,"error_message":""}"#);

        let parsed: SubmitOutcome =
            serde_json::from_str(r#"{"success":true,"order_id":"x","order_ticket_id":"y","error_message":""}"#)
                .unwrap();
        assert_eq!(parsed, SubmitOutcome::accepted("x", "y"));
    }
}
