//! Order value objects.
//!
//! The leaf layer of the probe: enumerated order fields with exhaustive
//! token parsing, and the immutable [`OrderRequest`] produced by
//! [`OrderRequestBuilder`].

mod fields;
mod order;

pub use fields::{
    DaytradeShortSell, FundingType, Market, OrderBoard, OrderFieldError, OrderType, Side,
    TimeInForce,
};
pub use order::{OrderRequest, OrderRequestBuilder};
