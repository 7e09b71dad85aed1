// Contract abstraction over the sale registry: resolve the deployed instance, then send calls.

use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::TxOptions;
use crate::infra::ethereum::abi;
use crate::infra::ethereum::artifact::Artifact;
use crate::infra::ethereum::{ContractError, Provider, ProviderError};

pub type TxHash = String;

/// Mutating operations of a deployed sale registry.
#[async_trait]
pub trait SaleRegistry: Send + Sync {
    /// Address the instance was resolved to.
    fn address(&self) -> &str;

    async fn add_crowdsale(
        &self,
        sale_address: &str,
        token_address: &str,
        opts: &TxOptions,
    ) -> Result<TxHash, ContractError>;

    async fn set_crowdsale_token(
        &self,
        sale_id: &str,
        token_address: &str,
        opts: &TxOptions,
    ) -> Result<TxHash, ContractError>;

    async fn set_crowdsale_ended(&self, sale_id: &str, opts: &TxOptions) -> Result<TxHash, ContractError>;

    async fn set_crowdsale_active(&self, sale_id: &str, opts: &TxOptions) -> Result<TxHash, ContractError>;
}

/// A contract description that can be bound to a provider and resolved to a deployed instance.
#[async_trait]
pub trait Deployment: Send + Sync {
    async fn set_provider(&self, provider: Arc<dyn Provider>);

    /// Resolves the deployed instance. Never cached: every call re-resolves.
    async fn deployed(&self) -> Result<Arc<dyn SaleRegistry>, ContractError>;
}

/// Deployment backed by a build artifact.
pub struct ContractAbstraction {
    artifact: Arc<Artifact>,
    provider: RwLock<Option<Arc<dyn Provider>>>,
}

impl ContractAbstraction {
    pub fn new(artifact: Artifact) -> Self {
        Self {
            artifact: Arc::new(artifact),
            provider: RwLock::new(None),
        }
    }
}

fn network_id(value: Value) -> Result<String, ProviderError> {
    match value {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(ProviderError::InvalidResponse(format!(
            "net_version returned {}",
            other
        ))),
    }
}

fn has_code(value: &Value) -> bool {
    match value.as_str() {
        Some(code) => {
            let digits = code.strip_prefix("0x").unwrap_or(code);
            !digits.trim_start_matches('0').is_empty()
        }
        None => false,
    }
}

#[async_trait]
impl Deployment for ContractAbstraction {
    async fn set_provider(&self, provider: Arc<dyn Provider>) {
        let mut lock = self.provider.write().await;
        *lock = Some(provider);
    }

    async fn deployed(&self) -> Result<Arc<dyn SaleRegistry>, ContractError> {
        let provider = self
            .provider
            .read()
            .await
            .clone()
            .ok_or(ContractError::NoProvider)?;

        let network = network_id(provider.request("net_version", json!([])).await?)?;
        let address = self
            .artifact
            .address_for(&network)
            .ok_or_else(|| ContractError::NotDeployed {
                contract: self.artifact.contract_name.clone(),
                network: network.clone(),
            })?
            .to_string();

        let code = provider
            .request("eth_getCode", json!([address, "latest"]))
            .await?;
        if !has_code(&code) {
            return Err(ContractError::NoCode {
                contract: self.artifact.contract_name.clone(),
                address,
            });
        }

        tracing::debug!(contract = %self.artifact.contract_name, %network, %address, "resolved deployed instance");
        Ok(Arc::new(DeployedInstance {
            artifact: self.artifact.clone(),
            provider,
            address,
        }))
    }
}

/// One resolved instance; sends transactions through the provider it was resolved with.
pub struct DeployedInstance {
    artifact: Arc<Artifact>,
    provider: Arc<dyn Provider>,
    address: String,
}

impl DeployedInstance {
    async fn send(&self, method: &str, args: &[&str], opts: &TxOptions) -> Result<TxHash, ContractError> {
        let entry = self
            .artifact
            .function(method)
            .ok_or_else(|| ContractError::MissingMethod {
                method: method.to_string(),
            })?;
        let data = abi::encode_call(method, &entry.inputs, args)?;

        tracing::debug!(method, from = %opts.from, to = %self.address, "sending transaction");
        let tx = json!({
            "from": opts.from.as_str(),
            "to": self.address,
            "data": format!("0x{}", hex::encode(data)),
        });
        let hash = self.provider.request("eth_sendTransaction", json!([tx])).await?;

        hash.as_str().map(str::to_owned).ok_or_else(|| {
            ContractError::Provider(ProviderError::InvalidResponse(format!(
                "eth_sendTransaction returned {}",
                hash
            )))
        })
    }
}

#[async_trait]
impl SaleRegistry for DeployedInstance {
    fn address(&self) -> &str {
        &self.address
    }

    async fn add_crowdsale(
        &self,
        sale_address: &str,
        token_address: &str,
        opts: &TxOptions,
    ) -> Result<TxHash, ContractError> {
        self.send("addCrowdsale", &[sale_address, token_address], opts).await
    }

    async fn set_crowdsale_token(
        &self,
        sale_id: &str,
        token_address: &str,
        opts: &TxOptions,
    ) -> Result<TxHash, ContractError> {
        self.send("setCrowdsaleToken", &[sale_id, token_address], opts).await
    }

    async fn set_crowdsale_ended(&self, sale_id: &str, opts: &TxOptions) -> Result<TxHash, ContractError> {
        self.send("setCrowdsaleEnded", &[sale_id], opts).await
    }

    async fn set_crowdsale_active(&self, sale_id: &str, opts: &TxOptions) -> Result<TxHash, ContractError> {
        self.send("setCrowdsaleActive", &[sale_id], opts).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_code_is_not_a_contract() {
        assert!(!has_code(&json!("0x")));
        assert!(!has_code(&json!("0x0")));
        assert!(!has_code(&Value::Null));
        assert!(has_code(&json!("0x6060604052")));
    }

    #[test]
    fn network_id_accepts_strings_and_numbers() {
        assert_eq!(network_id(json!("5777")).unwrap(), "5777");
        assert_eq!(network_id(json!(1)).unwrap(), "1");
        assert!(network_id(json!(null)).is_err());
    }
}
