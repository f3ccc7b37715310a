//! Immutable order request and its builder.
//!
//! Price and quantity are carried as text end to end. The session expects the
//! exact decimal representation from the configuration file, and a float
//! round-trip could change it, so no numeric parsing happens at this layer.

use serde::{Deserialize, Serialize};

use super::fields::{
    DaytradeShortSell, FundingType, Market, OrderBoard, OrderFieldError, OrderType, Side,
    TimeInForce,
};

/// A fully validated, immutable order request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderRequest {
    /// Exchange board.
    pub market: Market,
    /// Trading board within the session.
    pub board: OrderBoard,
    /// Funding type.
    pub funding: FundingType,
    /// Buy or sell.
    pub side: Side,
    /// Limit or market.
    pub order_type: OrderType,
    /// Time in force.
    pub time_in_force: TimeInForce,
    /// Daytrade short-sell flag.
    pub daytrade_short_sell: DaytradeShortSell,
    /// Instrument symbol.
    pub symbol: String,
    /// Limit price as configured text; empty for market orders.
    pub price: String,
    /// Quantity as configured text.
    pub quantity: String,
}

/// Builds an [`OrderRequest`] from raw configuration tokens.
///
/// Every enumerated field must resolve against its documented alias set or
/// [`build`](Self::build) fails with the offending field and token. There is
/// no partial or default fallback.
#[derive(Debug, Clone, Default)]
pub struct OrderRequestBuilder {
    market: String,
    order_board: String,
    funding_type: String,
    side: String,
    order_type: String,
    time_in_force: String,
    daytrade_shortsell: String,
    symbol: String,
    price: String,
    quantity: String,
}

impl OrderRequestBuilder {
    /// Create an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the market token.
    #[must_use]
    pub fn market(mut self, token: impl Into<String>) -> Self {
        self.market = token.into();
        self
    }

    /// Set the order-board token.
    #[must_use]
    pub fn order_board(mut self, token: impl Into<String>) -> Self {
        self.order_board = token.into();
        self
    }

    /// Set the funding-type token.
    #[must_use]
    pub fn funding_type(mut self, token: impl Into<String>) -> Self {
        self.funding_type = token.into();
        self
    }

    /// Set the side token.
    #[must_use]
    pub fn side(mut self, token: impl Into<String>) -> Self {
        self.side = token.into();
        self
    }

    /// Set the order-type token.
    #[must_use]
    pub fn order_type(mut self, token: impl Into<String>) -> Self {
        self.order_type = token.into();
        self
    }

    /// Set the time-in-force token.
    #[must_use]
    pub fn time_in_force(mut self, token: impl Into<String>) -> Self {
        self.time_in_force = token.into();
        self
    }

    /// Set the daytrade-shortsell token.
    #[must_use]
    pub fn daytrade_shortsell(mut self, token: impl Into<String>) -> Self {
        self.daytrade_shortsell = token.into();
        self
    }

    /// Set the instrument symbol.
    #[must_use]
    pub fn symbol(mut self, symbol: impl Into<String>) -> Self {
        self.symbol = symbol.into();
        self
    }

    /// Set the price text.
    #[must_use]
    pub fn price(mut self, price: impl Into<String>) -> Self {
        self.price = price.into();
        self
    }

    /// Set the quantity text.
    #[must_use]
    pub fn quantity(mut self, quantity: impl Into<String>) -> Self {
        self.quantity = quantity.into();
        self
    }

    /// Validate every token and produce the immutable request.
    ///
    /// # Errors
    ///
    /// Returns [`OrderFieldError`] naming the first field whose token does
    /// not resolve, when the symbol is empty, or when a limit order carries
    /// an empty price.
    pub fn build(self) -> Result<OrderRequest, OrderFieldError> {
        let market = Market::parse(&self.market)?;
        let board = OrderBoard::parse(&self.order_board)?;
        let funding = FundingType::parse(&self.funding_type)?;
        let side = Side::parse(&self.side)?;
        let order_type = OrderType::parse(&self.order_type)?;
        let time_in_force = TimeInForce::parse(&self.time_in_force)?;
        let daytrade_short_sell = DaytradeShortSell::parse(&self.daytrade_shortsell)?;

        if self.symbol.is_empty() {
            return Err(OrderFieldError::new("symbol", &self.symbol));
        }
        // Only market orders may leave the price blank.
        if self.price.is_empty() && order_type != OrderType::Market {
            return Err(OrderFieldError::new("price", &self.price));
        }

        Ok(OrderRequest {
            market,
            board,
            funding,
            side,
            order_type,
            time_in_force,
            daytrade_short_sell,
            symbol: self.symbol,
            price: self.price,
            quantity: self.quantity,
        })
    }
}
