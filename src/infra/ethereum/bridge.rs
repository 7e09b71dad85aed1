//! The wallet bridge: where identities come from and which provider contract calls go through.

use async_trait::async_trait;
use serde_json::json;
use std::sync::Arc;

use crate::domain::Identity;
use crate::infra::ethereum::{HttpProvider, Provider, ProviderError};

#[async_trait]
pub trait Bridge: Send + Sync {
    /// Accounts the wallet currently exposes, in wallet order.
    async fn accounts(&self) -> Result<Vec<Identity>, ProviderError>;

    /// Provider used to bind contract abstractions.
    fn current_provider(&self) -> Arc<dyn Provider>;
}

/// Bridge over any provider answering `eth_accounts`.
pub struct InjectedBridge {
    provider: Arc<dyn Provider>,
}

impl InjectedBridge {
    pub fn new(provider: Arc<dyn Provider>) -> Self {
        Self { provider }
    }

    /// Builds a bridge when an RPC endpoint is configured, `None` otherwise.
    pub fn detect(rpc_url: Option<String>) -> Option<Self> {
        let url = rpc_url?;
        tracing::info!(%url, "wallet bridge detected");
        Some(Self::new(Arc::new(HttpProvider::new(url))))
    }
}

#[async_trait]
impl Bridge for InjectedBridge {
    async fn accounts(&self) -> Result<Vec<Identity>, ProviderError> {
        let value = self.provider.request("eth_accounts", json!([])).await?;
        let accounts: Vec<String> = serde_json::from_value(value)
            .map_err(|e| ProviderError::InvalidResponse(format!("eth_accounts: {}", e)))?;
        Ok(accounts.into_iter().map(Identity::new).collect())
    }

    fn current_provider(&self) -> Arc<dyn Provider> {
        self.provider.clone()
    }
}
