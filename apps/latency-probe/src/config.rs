//! Probe configuration.
//!
//! Loaded from a TOML file (default `order_config.toml`): session
//! credentials under `[user]`, raw order field tokens under `[order]`, and
//! optional pacing overrides under `[probe]`. Every `[user]` and `[order]`
//! field is a required string; the raw order tokens are validated later by
//! [`OrderRequestBuilder`].

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{OrderFieldError, OrderRequest, OrderRequestBuilder};
use crate::lifecycle::LifecycleOptions;

/// Default configuration file path.
pub const DEFAULT_CONFIG_PATH: &str = "order_config.toml";

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("failed to read config file '{path}': {source}")]
    Read {
        /// Path to the config file.
        path: String,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse the TOML payload.
    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Session credentials.
    pub user: UserConfig,
    /// Raw order field tokens.
    pub order: OrderConfig,
    /// Pacing and timeout overrides.
    #[serde(default)]
    pub probe: ProbeConfig,
}

/// Session credentials, consumed by the session layer and opaque to the
/// lifecycle core.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserConfig {
    /// Venue login id.
    pub user_id: String,
    /// Venue login password.
    pub password: String,
    /// Trading account number.
    pub account: String,
    /// Path to the client certificate bundle.
    pub pfx_filepath: String,
    /// Certificate bundle password.
    pub pfx_password: String,
}

/// Raw order field tokens as written in the file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderConfig {
    /// Instrument symbol.
    pub symbol: String,
    /// Limit price text; empty for market orders.
    pub price: String,
    /// Quantity text.
    pub quantity: String,
    /// Market token (`TSE`, `OTC`).
    pub market: String,
    /// Order board token.
    pub order_board: String,
    /// Funding type token.
    pub funding_type: String,
    /// Side token (`Buy`/`B`, `Sell`/`S`).
    pub side: String,
    /// Order type token (`Limit`, `Market`).
    pub order_type: String,
    /// Time-in-force token (`ROD`, `IOC`, `FOK`).
    pub time_in_force: String,
    /// Daytrade short-sell token (`True`/`Y`, `False`/`N`).
    pub daytrade_shortsell: String,
}

impl OrderConfig {
    /// Validate the raw tokens into an immutable [`OrderRequest`].
    ///
    /// # Errors
    ///
    /// Returns [`OrderFieldError`] naming the first field that does not
    /// resolve.
    pub fn to_request(&self) -> Result<OrderRequest, OrderFieldError> {
        OrderRequestBuilder::new()
            .symbol(&self.symbol)
            .price(&self.price)
            .quantity(&self.quantity)
            .market(&self.market)
            .order_board(&self.order_board)
            .funding_type(&self.funding_type)
            .side(&self.side)
            .order_type(&self.order_type)
            .time_in_force(&self.time_in_force)
            .daytrade_shortsell(&self.daytrade_shortsell)
            .build()
    }
}

/// Pacing and timeout policy. Defaults match the constants the probe has
/// always used; the section may be omitted entirely.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProbeConfig {
    /// Bounded wait for the submit acknowledgment, in seconds.
    pub submit_timeout_secs: u64,
    /// Bounded wait for the cancel acknowledgment, in seconds.
    pub cancel_timeout_secs: u64,
    /// Settling interval between submit ack and cancel request, in
    /// milliseconds.
    pub settle_delay_ms: u64,
    /// Pause after connect and again after login, in milliseconds.
    pub session_pause_ms: u64,
    /// Simulated session acknowledgment latency, in milliseconds.
    pub sim_ack_delay_ms: u64,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            submit_timeout_secs: 10,
            cancel_timeout_secs: 10,
            settle_delay_ms: 1000,
            session_pause_ms: 1000,
            sim_ack_delay_ms: 50,
        }
    }
}

impl ProbeConfig {
    /// Lifecycle pacing derived from this configuration.
    #[must_use]
    pub const fn lifecycle_options(&self) -> LifecycleOptions {
        LifecycleOptions {
            submit_timeout: Duration::from_secs(self.submit_timeout_secs),
            cancel_timeout: Duration::from_secs(self.cancel_timeout_secs),
            settle_delay: Duration::from_millis(self.settle_delay_ms),
        }
    }

    /// Pause applied after connect and after login.
    #[must_use]
    pub const fn session_pause(&self) -> Duration {
        Duration::from_millis(self.session_pause_ms)
    }

    /// Acknowledgment latency of the simulated session.
    #[must_use]
    pub const fn sim_ack_delay(&self) -> Duration {
        Duration::from_millis(self.sim_ack_delay_ms)
    }
}

/// Load configuration from the given path.
///
/// # Errors
///
/// Returns [`ConfigError`] when the file cannot be read or the TOML does not
/// parse.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.display().to_string(),
        source,
    })?;
    Ok(toml::from_str(&raw)?)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::domain::{DaytradeShortSell, OrderType, Side};

    const FULL_CONFIG: &str = r#"
[user]
user_id = "A123456789"
password = "secret"
account = "9800001"
pfx_filepath = "/etc/probe/client.pfx"
pfx_password = "secret"

[order]
symbol = "2330"
price = ""
quantity = "1000"
market = "TSE"
order_board = "RoundLot"
funding_type = "Cash"
side = "B"
order_type = "Market"
time_in_force = "ROD"
daytrade_shortsell = "N"

[probe]
submit_timeout_secs = 3
settle_delay_ms = 10
"#;

    #[test]
    fn parses_full_config() {
        let config: Config = toml::from_str(FULL_CONFIG).unwrap();
        assert_eq!(config.user.user_id, "A123456789");
        assert_eq!(config.order.symbol, "2330");
        assert_eq!(config.probe.submit_timeout_secs, 3);
        // Unset [probe] keys keep their defaults.
        assert_eq!(config.probe.cancel_timeout_secs, 10);
        assert_eq!(config.probe.settle_delay_ms, 10);
    }

    #[test]
    fn short_aliases_resolve_through_to_request() {
        let config: Config = toml::from_str(FULL_CONFIG).unwrap();
        let order = config.order.to_request().unwrap();
        assert_eq!(order.side, Side::Buy);
        assert_eq!(order.order_type, OrderType::Market);
        assert_eq!(order.daytrade_short_sell, DaytradeShortSell::False);
    }

    #[test]
    fn probe_section_is_optional() {
        let trimmed = FULL_CONFIG.split("[probe]").next().unwrap();
        let config: Config = toml::from_str(trimmed).unwrap();
        assert_eq!(config.probe.submit_timeout_secs, 10);
        assert_eq!(config.probe.session_pause_ms, 1000);
    }

    #[test]
    fn missing_order_field_is_a_parse_error() {
        let broken = FULL_CONFIG.replace("quantity = \"1000\"\n", "");
        let err = toml::from_str::<Config>(&broken).unwrap_err();
        assert!(err.to_string().contains("quantity"));
    }

    #[test]
    fn lifecycle_options_reflect_overrides() {
        let config: Config = toml::from_str(FULL_CONFIG).unwrap();
        let options = config.probe.lifecycle_options();
        assert_eq!(options.submit_timeout, Duration::from_secs(3));
        assert_eq!(options.cancel_timeout, Duration::from_secs(10));
        assert_eq!(options.settle_delay, Duration::from_millis(10));
    }

    #[test]
    fn load_config_reads_a_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(FULL_CONFIG.as_bytes()).unwrap();

        let config = load_config(file.path()).unwrap();
        assert_eq!(config.order.market, "TSE");
    }

    #[test]
    fn load_config_reports_missing_file() {
        let err = load_config(Path::new("/nonexistent/order_config.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
        assert!(err.to_string().contains("/nonexistent/order_config.toml"));
    }

    #[test]
    fn load_config_reports_bad_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"[user\nnot toml").unwrap();

        let err = load_config(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
