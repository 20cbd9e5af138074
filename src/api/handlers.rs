use axum::{extract::State, http::StatusCode};
use tracing::{error, info};

use super::routes::AppState;
use crate::config::Credentials;
use crate::exchange::{ExchangeError, OrderRequest};

const NO_PARAMETERS_MESSAGE: &str = "Error: No valid parameters provided";
const TIMEOUT_MESSAGE: &str = "Error: API call timed out";

/// POST /http_bnb_limit_order
///
/// Relays a limit-order request to the exchange. The body must be JSON with
/// `total`, `price`, `symbol` and `side`; anything else is rejected with 400
/// before any exchange call is attempted.
pub async fn place_limit_order(
    State(state): State<AppState>,
    body: String,
) -> (StatusCode, String) {
    info!("http_bnb_limit_order is running");

    let request: OrderRequest = match serde_json::from_str(&body) {
        Ok(request) => request,
        Err(e) => {
            error!("invalid JSON body: {}", e);
            return (StatusCode::BAD_REQUEST, NO_PARAMETERS_MESSAGE.to_string());
        }
    };

    match relay_order(&state, request).await {
        Ok(response) => {
            info!("order response: {}", response);
            (StatusCode::OK, response)
        }
        Err(ExchangeError::Client { code, message }) => {
            error!("exchange client error {}: {}", code, message);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Client error: {}", message),
            )
        }
        Err(ExchangeError::Timeout) => {
            error!("API call timed out");
            (StatusCode::GATEWAY_TIMEOUT, TIMEOUT_MESSAGE.to_string())
        }
        Err(e) => {
            error!("error during processing: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, format!("Error: {}", e))
        }
    }
}

/// Derive order parameters, read credentials and submit through the gate.
/// No retries at any layer; every failure surfaces in the response.
async fn relay_order(state: &AppState, request: OrderRequest) -> Result<String, ExchangeError> {
    let params = request.into_limit_params()?;
    info!("placing order with params: {:?}", params);

    let credentials = Credentials::from_env()?;
    state
        .gate
        .place(state.exchange.as_ref(), &credentials, &params)
        .await
}
