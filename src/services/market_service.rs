// src/services/market_service.rs
use crate::error::{AppError, AppResult};
use serde::Deserialize;
use serde_json::Value;

const MARKETSTACK_EOD_URL: &str = "https://api.marketstack.com/v1/eod";

#[derive(Debug, Deserialize)]
pub struct MarketQuery {
    pub symbol: Option<String>,
    pub limit: Option<u32>,
}

/// Normalised watchlist query.
#[derive(Debug, PartialEq, Eq)]
pub struct EodQuery {
    pub symbol: String,
    pub limit: u32,
}

impl MarketQuery {
    /// Defaults to the latest ten days of AAPL.
    pub fn normalize(&self) -> AppResult<EodQuery> {
        let symbol = self
            .symbol
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or("AAPL")
            .to_ascii_uppercase();
        let valid_symbol = symbol.len() <= 12
            && symbol.chars().all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-');
        if !valid_symbol {
            return Err(AppError::BadRequest(format!("Invalid symbol '{symbol}'")));
        }
        let limit = self.limit.unwrap_or(10);
        if !(1..=100).contains(&limit) {
            return Err(AppError::BadRequest("limit must be between 1 and 100".into()));
        }
        Ok(EodQuery { symbol, limit })
    }
}

/// End-of-day prices, passed through as Marketstack returns them.
pub async fn fetch_eod(http: &reqwest::Client, api_key: Option<&str>, query: &EodQuery) -> AppResult<Value> {
    let api_key = api_key.ok_or(AppError::NotConfigured("Market data"))?;
    tracing::debug!("Fetching {} EOD rows for {}", query.limit, query.symbol);

    let limit = query.limit.to_string();
    let response = http
        .get(MARKETSTACK_EOD_URL)
        .query(&[
            ("access_key", api_key),
            ("symbols", query.symbol.as_str()),
            ("limit", limit.as_str()),
        ])
        .send()
        .await
        .map_err(|e| AppError::Upstream(format!("market data request failed: {e}")))?;

    response
        .json::<Value>()
        .await
        .map_err(|e| AppError::Upstream(format!("market data unreadable: {e}")))
}
