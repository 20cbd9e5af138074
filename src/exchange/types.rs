// =================================================================
// exchange/types.rs - Order Data Structures
// =================================================================

use serde::{Deserialize, Serialize};

use super::errors::ExchangeError;

// Constants
pub const ORDER_TYPE_LIMIT: &str = "LIMIT";
pub const TIME_IN_FORCE_GTC: &str = "GTC";

/// Order direction, wire format "BUY" / "SELL"
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Buy => "BUY",
            Side::Sell => "SELL",
        }
    }
}

/// A decimal field that callers may send either as a JSON number or as a
/// string ("100" and 100 are both accepted)
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Amount {
    Number(f64),
    Text(String),
}

impl Amount {
    /// Numeric value for arithmetic
    pub fn as_f64(&self) -> Result<f64, ExchangeError> {
        match self {
            Amount::Number(value) => Ok(*value),
            Amount::Text(text) => text.trim().parse::<f64>().map_err(|_| {
                ExchangeError::InvalidOrder(format!("invalid decimal value '{}'", text))
            }),
        }
    }

    /// Textual form sent to the exchange. Strings pass through unchanged.
    pub fn as_wire(&self) -> String {
        match self {
            Amount::Number(value) => value.to_string(),
            Amount::Text(text) => text.clone(),
        }
    }
}

/// Incoming limit-order request body
#[derive(Debug, Clone, Deserialize)]
pub struct OrderRequest {
    pub symbol: String,
    pub side: Side,
    pub total: Amount,
    pub price: Amount,
}

impl OrderRequest {
    /// Assemble exchange order parameters: quantity is derived from the
    /// notional total and the limit price, everything else passes through.
    pub fn into_limit_params(self) -> Result<OrderParams, ExchangeError> {
        let total = self.total.as_f64()?;
        let price = self.price.as_f64()?;
        let quantity = derive_quantity(total, price)?;

        Ok(OrderParams {
            symbol: self.symbol,
            side: self.side,
            order_type: ORDER_TYPE_LIMIT.to_string(),
            time_in_force: TIME_IN_FORCE_GTC.to_string(),
            quantity: format_quantity(quantity),
            price: self.price.as_wire(),
        })
    }
}

/// Fully assembled parameters for a LIMIT GTC order
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderParams {
    pub symbol: String,
    pub side: Side,
    #[serde(rename = "type")]
    pub order_type: String,
    pub time_in_force: String,
    pub quantity: String,
    pub price: String,
}

/// Quantity is the notional total divided by the limit price, rounded to
/// four decimal places regardless of the asset's actual lot granularity.
pub fn derive_quantity(total: f64, price: f64) -> Result<f64, ExchangeError> {
    let quantity = total / price;
    if !quantity.is_finite() {
        return Err(ExchangeError::InvalidOrder(format!(
            "cannot derive quantity from total {} and price {}",
            total, price
        )));
    }
    Ok((quantity * 10_000.0).round() / 10_000.0)
}

/// Integral quantities keep one decimal place on the wire ("2.0", not "2")
pub fn format_quantity(quantity: f64) -> String {
    if quantity.fract() == 0.0 {
        format!("{:.1}", quantity)
    } else {
        quantity.to_string()
    }
}
