// =================================================================
// exchange/binance.rs - Binance Spot REST Implementation
// =================================================================

use async_trait::async_trait;
use hmac::{Hmac, Mac};
use serde::Deserialize;
use sha2::Sha256;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tracing::debug;

use super::{errors::ExchangeError, traits::Exchange, types::OrderParams};
use crate::config::{Credentials, ExchangeSettings};

type HmacSha256 = Hmac<Sha256>;

// Constants
pub(crate) const BINANCE_API_URL: &str = "https://api.binance.com";
const NEW_ORDER_ENDPOINT: &str = "/api/v3/order";

/// Binance error body, e.g. `{"code": -2010, "msg": "..."}`
#[derive(Debug, Deserialize)]
struct BinanceApiError {
    code: i64,
    msg: String,
}

/// Binance spot REST client. Credentials are not held here; they are read
/// per invocation and passed into each call.
pub struct BinanceExchange {
    api_url: String,
    recv_window: u64,
    client: reqwest::Client,
}

impl BinanceExchange {
    /// Create a new Binance client with an explicit request timeout. The
    /// timeout is the only time budget on the order call; exceeding it
    /// surfaces as `ExchangeError::Timeout`.
    pub fn new(settings: &ExchangeSettings) -> Result<Self, ExchangeError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .map_err(|e| ExchangeError::Network(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            api_url: settings.api_url.clone(),
            recv_window: settings.recv_window,
            client,
        })
    }

    fn timestamp_ms() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system clock before Unix epoch")
            .as_millis() as u64
    }

    /// HMAC-SHA256 signature over the encoded query string
    fn sign(secret: &str, query: &str) -> String {
        let mut mac =
            HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC accepts any key length");
        mac.update(query.as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }

    fn build_query(params: &[(&str, String)]) -> String {
        params
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join("&")
    }

    /// Map a non-2xx exchange answer onto the error taxonomy. 4xx answers
    /// are classified client errors; 5xx answers are exchange-side failures.
    fn classify_http_error(status: reqwest::StatusCode, body: &str) -> ExchangeError {
        if status.is_client_error() {
            match serde_json::from_str::<BinanceApiError>(body) {
                Ok(api_error) => ExchangeError::Client {
                    code: api_error.code,
                    message: api_error.msg,
                },
                Err(_) => ExchangeError::Client {
                    code: i64::from(status.as_u16()),
                    message: body.to_string(),
                },
            }
        } else {
            ExchangeError::Network(format!("HTTP {}: {}", status, body))
        }
    }

    async fn signed_post(
        &self,
        credentials: &Credentials,
        endpoint: &str,
        params: &[(&str, String)],
    ) -> Result<String, ExchangeError> {
        let mut all_params = params.to_vec();
        all_params.push(("recvWindow", self.recv_window.to_string()));
        all_params.push(("timestamp", Self::timestamp_ms().to_string()));

        let query = Self::build_query(&all_params);
        let signature = Self::sign(&credentials.api_secret, &query);
        let body = format!("{}&signature={}", query, signature);

        debug!("POST (signed) {}", endpoint);

        let url = format!("{}{}", self.api_url, endpoint);
        let response = self
            .client
            .post(&url)
            .header("X-MBX-APIKEY", &credentials.api_key)
            .header("Content-Type", "application/x-www-form-urlencoded")
            .body(body)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let text = response.text().await.map_err(map_transport_error)?;

        if status.is_success() {
            Ok(text)
        } else {
            Err(Self::classify_http_error(status, &text))
        }
    }
}

fn map_transport_error(error: reqwest::Error) -> ExchangeError {
    if error.is_timeout() {
        ExchangeError::Timeout
    } else {
        ExchangeError::Network(error.to_string())
    }
}

#[async_trait]
impl Exchange for BinanceExchange {
    async fn place_limit_order(
        &self,
        credentials: &Credentials,
        params: &OrderParams,
    ) -> Result<String, ExchangeError> {
        let request_params = vec![
            ("symbol", params.symbol.clone()),
            ("side", params.side.as_str().to_string()),
            ("type", params.order_type.clone()),
            ("timeInForce", params.time_in_force.clone()),
            ("quantity", params.quantity.clone()),
            ("price", params.price.clone()),
        ];

        self.signed_post(credentials, NEW_ORDER_ENDPOINT, &request_params)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_query() {
        let params = vec![
            ("symbol", "BTCUSDT".to_string()),
            ("side", "BUY".to_string()),
            ("quantity", "2.0".to_string()),
        ];
        assert_eq!(
            BinanceExchange::build_query(&params),
            "symbol=BTCUSDT&side=BUY&quantity=2.0"
        );
    }

    #[test]
    fn test_sign_matches_reference_vector() {
        // Reference request from the Binance signed-endpoint documentation
        let secret = "NhqPtmdSJYdKjVHjA7PZj4Mge3R5YNiP1e3UZjInClVN65XAbvqqM6A7H5fATj0j";
        let query = "symbol=LTCBTC&side=BUY&type=LIMIT&timeInForce=GTC&quantity=1&price=0.1&recvWindow=5000&timestamp=1499827319559";

        assert_eq!(
            BinanceExchange::sign(secret, query),
            "c8db56825ae71d6d79447849e617115f4a920fa2acdcab2b053c4b2838bd6b71"
        );
    }

    #[test]
    fn test_classify_client_error_body() {
        let status = reqwest::StatusCode::BAD_REQUEST;
        let body = r#"{"code": -2010, "msg": "Account has insufficient balance for requested action."}"#;

        match BinanceExchange::classify_http_error(status, body) {
            ExchangeError::Client { code, message } => {
                assert_eq!(code, -2010);
                assert!(message.contains("insufficient balance"));
            }
            other => panic!("expected client error, got {:?}", other),
        }
    }

    #[test]
    fn test_classify_undecodable_client_error() {
        let status = reqwest::StatusCode::UNAUTHORIZED;

        match BinanceExchange::classify_http_error(status, "<html>denied</html>") {
            ExchangeError::Client { code, message } => {
                assert_eq!(code, 401);
                assert_eq!(message, "<html>denied</html>");
            }
            other => panic!("expected client error, got {:?}", other),
        }
    }

    #[test]
    fn test_classify_server_error() {
        let status = reqwest::StatusCode::BAD_GATEWAY;

        match BinanceExchange::classify_http_error(status, "upstream down") {
            ExchangeError::Network(message) => {
                assert!(message.contains("502"));
            }
            other => panic!("expected network error, got {:?}", other),
        }
    }
}
