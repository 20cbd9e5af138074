use async_trait::async_trait;

use super::{errors::ExchangeError, types::OrderParams};
use crate::config::Credentials;

/// REST trading capability: submit a new order and hand back the exchange's
/// response body verbatim. The relay treats that body as opaque text.
#[async_trait]
pub trait Exchange: Send + Sync {
    async fn place_limit_order(
        &self,
        credentials: &Credentials,
        params: &OrderParams,
    ) -> Result<String, ExchangeError>;
}
