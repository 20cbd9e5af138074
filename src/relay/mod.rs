use tokio::sync::Mutex;
use tracing::debug;

use crate::config::Credentials;
use crate::exchange::{Exchange, ExchangeError, OrderParams};

/// Serializes order submissions: at most one exchange call is in flight at
/// any time within this process. Constructed once at startup and shared
/// through the router state, never accessed as a global.
pub struct SubmissionGate {
    lock: Mutex<()>,
}

impl SubmissionGate {
    pub fn new() -> Self {
        Self {
            lock: Mutex::new(()),
        }
    }

    /// Submit an order while holding the gate. The guard drops on every exit
    /// path, so a failed submission never wedges the gate. Concurrent
    /// callers queue on the lock in arrival order.
    pub async fn place(
        &self,
        exchange: &dyn Exchange,
        credentials: &Credentials,
        params: &OrderParams,
    ) -> Result<String, ExchangeError> {
        let _guard = self.lock.lock().await;
        debug!("submission gate acquired");
        exchange.place_limit_order(credentials, params).await
    }
}

impl Default for SubmissionGate {
    fn default() -> Self {
        Self::new()
    }
}
