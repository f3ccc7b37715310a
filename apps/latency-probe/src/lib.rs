// Allow unwrap/expect in tests - tests should panic on unexpected errors
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

//! Latency Probe - Order Round-Trip Measurement Library
//!
//! Submits a single exchange order through a [`TradingSession`], waits for
//! the asynchronous acknowledgment, cancels the order, waits for the cancel
//! acknowledgment, and captures nanosecond timing around the submit
//! round-trip. A measurement harness, not a trading system: no retries, no
//! batching, no market data.
//!
//! # Components
//!
//! - [`domain`]: order value objects and the [`OrderRequestBuilder`]
//! - [`session`]: the [`TradingSession`] port plus a simulated loopback
//!   session
//! - [`lifecycle`]: the submit → ack → cancel → ack orchestrator
//! - [`timing`]: the `===START=` / `===END=` / `TOTAL_NS=` marker emitter
//! - [`config`]: TOML configuration for credentials, order fields, and
//!   pacing

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod domain;
pub mod lifecycle;
pub mod session;
pub mod timing;

pub use config::{Config, ConfigError, OrderConfig, ProbeConfig, UserConfig, load_config};
pub use domain::{
    DaytradeShortSell, FundingType, Market, OrderBoard, OrderFieldError, OrderRequest,
    OrderRequestBuilder, OrderType, Side, TimeInForce,
};
pub use lifecycle::{
    LifecycleError, LifecycleOptions, LifecycleReport, LifecycleState, OrderLifecycle,
    SubmitTiming,
};
pub use session::{CancelOutcome, SubmitOutcome, TradingSession, sim::SimSession};
pub use timing::TimingMarkers;
