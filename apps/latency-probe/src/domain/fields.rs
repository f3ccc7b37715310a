//! Enumerated order fields and their token parsers.
//!
//! Each field accepts a small fixed set of case-sensitive aliases from the
//! configuration file. Any other token is a configuration error: a
//! misconfigured order must never be silently defaulted and submitted, so
//! there is no fallback value for an unrecognized token.

use std::fmt;

use serde::{Deserialize, Serialize};

/// An order field token that does not match any documented alias.
///
/// Carries the offending field name and the rejected value so the top-level
/// diagnostic can identify exactly what was misconfigured.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {field}: '{value}'")]
pub struct OrderFieldError {
    /// Configuration field the token came from.
    pub field: &'static str,
    /// The unrecognized token.
    pub value: String,
}

impl OrderFieldError {
    /// Create a field error for the given field and rejected token.
    #[must_use]
    pub fn new(field: &'static str, value: &str) -> Self {
        Self {
            field,
            value: value.to_string(),
        }
    }
}

/// Exchange board the symbol trades on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Market {
    /// Taiwan Stock Exchange.
    Tse,
    /// Over-the-counter (Taipei Exchange).
    Otc,
}

impl Market {
    /// Parse a configured market token.
    ///
    /// # Errors
    ///
    /// Returns [`OrderFieldError`] for any token other than `TSE` or `OTC`.
    pub fn parse(token: &str) -> Result<Self, OrderFieldError> {
        match token {
            "TSE" => Ok(Self::Tse),
            "OTC" => Ok(Self::Otc),
            _ => Err(OrderFieldError::new("market", token)),
        }
    }
}

impl fmt::Display for Market {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tse => write!(f, "TSE"),
            Self::Otc => write!(f, "OTC"),
        }
    }
}

/// Trading board within the market session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderBoard {
    /// Regular round-lot board.
    RoundLot,
    /// Odd-lot board.
    OddLot,
    /// Post-market fixed-price board.
    PostMarketFixed,
    /// Post-market odd-lot board.
    PostMarketOddLot,
}

impl OrderBoard {
    /// Parse a configured order-board token.
    ///
    /// # Errors
    ///
    /// Returns [`OrderFieldError`] for any token other than `RoundLot`,
    /// `OddLot`, `PostMarket_Fixed`, or `PostMarket_OddLot`.
    pub fn parse(token: &str) -> Result<Self, OrderFieldError> {
        match token {
            "RoundLot" => Ok(Self::RoundLot),
            "OddLot" => Ok(Self::OddLot),
            "PostMarket_Fixed" => Ok(Self::PostMarketFixed),
            "PostMarket_OddLot" => Ok(Self::PostMarketOddLot),
            _ => Err(OrderFieldError::new("order_board", token)),
        }
    }
}

impl fmt::Display for OrderBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::RoundLot => write!(f, "RoundLot"),
            Self::OddLot => write!(f, "OddLot"),
            Self::PostMarketFixed => write!(f, "PostMarket_Fixed"),
            Self::PostMarketOddLot => write!(f, "PostMarket_OddLot"),
        }
    }
}

/// How the order is funded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FundingType {
    /// Fully paid with cash.
    Cash,
    /// Margin purchase.
    MarginBuy,
    /// Margin short sale.
    MarginShortSell,
}

impl FundingType {
    /// Parse a configured funding-type token.
    ///
    /// # Errors
    ///
    /// Returns [`OrderFieldError`] for any token other than `Cash`,
    /// `MarginBuy`, or `MarginShortSell`.
    pub fn parse(token: &str) -> Result<Self, OrderFieldError> {
        match token {
            "Cash" => Ok(Self::Cash),
            "MarginBuy" => Ok(Self::MarginBuy),
            "MarginShortSell" => Ok(Self::MarginShortSell),
            _ => Err(OrderFieldError::new("funding_type", token)),
        }
    }
}

impl fmt::Display for FundingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cash => write!(f, "Cash"),
            Self::MarginBuy => write!(f, "MarginBuy"),
            Self::MarginShortSell => write!(f, "MarginShortSell"),
        }
    }
}

/// Order side (buy or sell).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// Buy order.
    Buy,
    /// Sell order.
    Sell,
}

impl Side {
    /// Parse a configured side token.
    ///
    /// # Errors
    ///
    /// Returns [`OrderFieldError`] for any token other than `Buy`, `B`,
    /// `Sell`, or `S`.
    pub fn parse(token: &str) -> Result<Self, OrderFieldError> {
        match token {
            "Buy" | "B" => Ok(Self::Buy),
            "Sell" | "S" => Ok(Self::Sell),
            _ => Err(OrderFieldError::new("side", token)),
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Buy => write!(f, "Buy"),
            Self::Sell => write!(f, "Sell"),
        }
    }
}

/// Order pricing type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderType {
    /// Limit order at the configured price.
    Limit,
    /// Market order; the price field stays empty.
    Market,
}

impl OrderType {
    /// Parse a configured order-type token.
    ///
    /// # Errors
    ///
    /// Returns [`OrderFieldError`] for any token other than `Limit` or
    /// `Market`.
    pub fn parse(token: &str) -> Result<Self, OrderFieldError> {
        match token {
            "Limit" => Ok(Self::Limit),
            "Market" => Ok(Self::Market),
            _ => Err(OrderFieldError::new("order_type", token)),
        }
    }
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Limit => write!(f, "Limit"),
            Self::Market => write!(f, "Market"),
        }
    }
}

/// How long the order rests before expiring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeInForce {
    /// Rest of day.
    Rod,
    /// Immediate or cancel.
    Ioc,
    /// Fill or kill.
    Fok,
}

impl TimeInForce {
    /// Parse a configured time-in-force token.
    ///
    /// # Errors
    ///
    /// Returns [`OrderFieldError`] for any token other than `ROD`, `IOC`, or
    /// `FOK`.
    pub fn parse(token: &str) -> Result<Self, OrderFieldError> {
        match token {
            "ROD" => Ok(Self::Rod),
            "IOC" => Ok(Self::Ioc),
            "FOK" => Ok(Self::Fok),
            _ => Err(OrderFieldError::new("time_in_force", token)),
        }
    }
}

impl fmt::Display for TimeInForce {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rod => write!(f, "ROD"),
            Self::Ioc => write!(f, "IOC"),
            Self::Fok => write!(f, "FOK"),
        }
    }
}

/// Whether the order is flagged for daytrade short selling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DaytradeShortSell {
    /// Daytrade short sell enabled.
    True,
    /// Daytrade short sell disabled.
    False,
}

impl DaytradeShortSell {
    /// Parse a configured daytrade-shortsell token.
    ///
    /// # Errors
    ///
    /// Returns [`OrderFieldError`] for any token other than `True`, `Y`,
    /// `False`, or `N`.
    pub fn parse(token: &str) -> Result<Self, OrderFieldError> {
        match token {
            "True" | "Y" => Ok(Self::True),
            "False" | "N" => Ok(Self::False),
            _ => Err(OrderFieldError::new("daytrade_shortsell", token)),
        }
    }
}

impl fmt::Display for DaytradeShortSell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::True => write!(f, "True"),
            Self::False => write!(f, "False"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn market_aliases() {
        assert_eq!(Market::parse("TSE").unwrap(), Market::Tse);
        assert_eq!(Market::parse("OTC").unwrap(), Market::Otc);
    }

    #[test]
    fn market_rejects_unknown_token() {
        let err = Market::parse("NYSE").unwrap_err();
        assert_eq!(err.field, "market");
        assert_eq!(err.value, "NYSE");
        assert_eq!(err.to_string(), "invalid market: 'NYSE'");
    }

    #[test]
    fn market_is_case_sensitive() {
        assert!(Market::parse("tse").is_err());
    }

    #[test]
    fn order_board_aliases() {
        assert_eq!(OrderBoard::parse("RoundLot").unwrap(), OrderBoard::RoundLot);
        assert_eq!(OrderBoard::parse("OddLot").unwrap(), OrderBoard::OddLot);
        assert_eq!(
            OrderBoard::parse("PostMarket_Fixed").unwrap(),
            OrderBoard::PostMarketFixed
        );
        assert_eq!(
            OrderBoard::parse("PostMarket_OddLot").unwrap(),
            OrderBoard::PostMarketOddLot
        );
    }

    #[test]
    fn order_board_rejects_unknown_token() {
        let err = OrderBoard::parse("AfterHours").unwrap_err();
        assert_eq!(err.field, "order_board");
    }

    #[test]
    fn funding_type_aliases() {
        assert_eq!(FundingType::parse("Cash").unwrap(), FundingType::Cash);
        assert_eq!(
            FundingType::parse("MarginBuy").unwrap(),
            FundingType::MarginBuy
        );
        assert_eq!(
            FundingType::parse("MarginShortSell").unwrap(),
            FundingType::MarginShortSell
        );
    }

    #[test]
    fn funding_type_rejects_unknown_token() {
        let err = FundingType::parse("Credit").unwrap_err();
        assert_eq!(err.field, "funding_type");
    }

    #[test]
    fn side_aliases() {
        assert_eq!(Side::parse("Buy").unwrap(), Side::Buy);
        assert_eq!(Side::parse("B").unwrap(), Side::Buy);
        assert_eq!(Side::parse("Sell").unwrap(), Side::Sell);
        assert_eq!(Side::parse("S").unwrap(), Side::Sell);
    }

    #[test]
    fn side_rejects_unknown_token() {
        let err = Side::parse("buy").unwrap_err();
        assert_eq!(err.field, "side");
        assert_eq!(err.value, "buy");
    }

    #[test]
    fn order_type_aliases() {
        assert_eq!(OrderType::parse("Limit").unwrap(), OrderType::Limit);
        assert_eq!(OrderType::parse("Market").unwrap(), OrderType::Market);
    }

    #[test]
    fn order_type_rejects_unknown_token() {
        let err = OrderType::parse("Stop").unwrap_err();
        assert_eq!(err.field, "order_type");
    }

    #[test]
    fn time_in_force_aliases() {
        assert_eq!(TimeInForce::parse("ROD").unwrap(), TimeInForce::Rod);
        assert_eq!(TimeInForce::parse("IOC").unwrap(), TimeInForce::Ioc);
        assert_eq!(TimeInForce::parse("FOK").unwrap(), TimeInForce::Fok);
    }

    #[test]
    fn time_in_force_rejects_unknown_token() {
        let err = TimeInForce::parse("GTC").unwrap_err();
        assert_eq!(err.field, "time_in_force");
    }

    #[test]
    fn daytrade_shortsell_aliases() {
        assert_eq!(
            DaytradeShortSell::parse("True").unwrap(),
            DaytradeShortSell::True
        );
        assert_eq!(
            DaytradeShortSell::parse("Y").unwrap(),
            DaytradeShortSell::True
        );
        assert_eq!(
            DaytradeShortSell::parse("False").unwrap(),
            DaytradeShortSell::False
        );
        assert_eq!(
            DaytradeShortSell::parse("N").unwrap(),
            DaytradeShortSell::False
        );
    }

    #[test]
    fn daytrade_shortsell_rejects_unknown_token() {
        let err = DaytradeShortSell::parse("yes").unwrap_err();
        assert_eq!(err.field, "daytrade_shortsell");
    }

    #[test]
    fn display_round_trips_through_parse() {
        assert_eq!(Market::parse(&Market::Otc.to_string()).unwrap(), Market::Otc);
        assert_eq!(
            OrderBoard::parse(&OrderBoard::PostMarketFixed.to_string()).unwrap(),
            OrderBoard::PostMarketFixed
        );
        assert_eq!(
            TimeInForce::parse(&TimeInForce::Ioc.to_string()).unwrap(),
            TimeInForce::Ioc
        );
    }
}
