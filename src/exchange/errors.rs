use thiserror::Error;

/// Errors surfaced by the exchange client and the request pipeline in front
/// of it. The HTTP layer owns the mapping to status codes.
#[derive(Debug, Error)]
pub enum ExchangeError {
    /// The exchange rejected the request and said why (e.g. a rejected
    /// order or an auth failure).
    #[error("client error {code}: {message}")]
    Client { code: i64, message: String },

    /// The exchange call exceeded the client's time budget.
    #[error("API call timed out")]
    Timeout,

    /// Transport-level failure or an exchange-side (5xx) failure.
    #[error("network error: {0}")]
    Network(String),

    /// The order request could not be turned into valid order parameters.
    #[error("invalid order request: {0}")]
    InvalidOrder(String),

    /// A required credential is not present in the environment.
    #[error("missing environment variable {0}")]
    MissingCredential(&'static str),
}
