//! The command relay: caches the active identity and forwards the four sale commands to the
//! deployed registry contract with that identity as `from`.
//!
//! Commands are gated on the session state. Until `start` has resolved an identity every
//! command is rejected without touching the contract.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::RwLock;
use utoipa::ToSchema;

use crate::app::alerts::{AlertSink, LogAlertSink};
use crate::domain::{Command, Identity, RelayState, Session, SetupError, TxOptions};
use crate::infra::config;
use crate::infra::ethereum::{
    Artifact, Bridge, ContractAbstraction, ContractError, Deployment, InjectedBridge, SaleRegistry,
    TxHash,
};

#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    #[error("relay has not been started")]
    Uninitialized,
    #[error("relay setup failed: {0}")]
    SetupFailed(SetupError),
    #[error("could not resolve deployed contract: {0}")]
    Resolve(ContractError),
    #[error("contract call failed: {0}")]
    Invoke(ContractError),
}

/// What a successfully dispatched command produced.
#[derive(Clone, Debug, Serialize, ToSchema)]
pub struct DispatchReceipt {
    pub command: Command,
    pub from: Identity,
    /// Address of the instance the call was sent to.
    pub contract: String,
    #[schema(value_type = String)]
    pub tx_hash: TxHash,
    pub dispatched_at: DateTime<Utc>,
}

pub struct CommandRelay {
    bridge: Option<Arc<dyn Bridge>>,
    contract: Arc<dyn Deployment>,
    alerts: Arc<dyn AlertSink>,
    session: RwLock<Session>,
}

impl CommandRelay {
    /// `bridge = None` models an environment with no wallet available.
    pub fn new(
        bridge: Option<Arc<dyn Bridge>>,
        contract: Arc<dyn Deployment>,
        alerts: Arc<dyn AlertSink>,
    ) -> Self {
        Self {
            bridge,
            contract,
            alerts,
            session: RwLock::new(Session::default()),
        }
    }

    /// Wires the relay from environment configuration: the artifact must load, the bridge
    /// is optional.
    pub fn from_env() -> anyhow::Result<Self> {
        let artifact_path = config::contract_artifact_path();
        let artifact = Artifact::load(&artifact_path)?;
        tracing::info!(contract = %artifact.contract_name, path = ?artifact_path, "loaded contract artifact");

        let bridge = InjectedBridge::detect(config::eth_rpc_url()).map(|b| Arc::new(b) as Arc<dyn Bridge>);
        Ok(Self::new(
            bridge,
            Arc::new(ContractAbstraction::new(artifact)),
            Arc::new(LogAlertSink),
        ))
    }

    /// Detects the bridge, binds the contract to it and caches the first account.
    ///
    /// Never fails: setup problems raise an alert and leave the relay in `Failed`.
    pub async fn start(&self) -> RelayState {
        let Some(bridge) = self.bridge.as_ref() else {
            return self.fail(SetupError::BridgeMissing).await;
        };

        self.contract.set_provider(bridge.current_provider()).await;

        let first = match bridge.accounts().await {
            Ok(accounts) => {
                tracing::debug!(count = accounts.len(), "wallet accounts listed");
                accounts.into_iter().next().ok_or(SetupError::NoAccounts)
            }
            Err(e) => {
                tracing::warn!(error = %e, "listing wallet accounts failed");
                Err(SetupError::AccountsUnavailable)
            }
        };

        match first {
            Ok(identity) => {
                tracing::info!(%identity, "relay ready");
                let mut session = self.session.write().await;
                session.mark_ready(identity);
                session.state.clone()
            }
            Err(e) => self.fail(e).await,
        }
    }

    async fn fail(&self, error: SetupError) -> RelayState {
        self.alerts.alert(error.alert());
        let mut session = self.session.write().await;
        session.mark_failed(error);
        session.state.clone()
    }

    pub async fn session(&self) -> Session {
        self.session.read().await.clone()
    }

    pub async fn state(&self) -> RelayState {
        self.session.read().await.state.clone()
    }

    pub async fn identity(&self) -> Option<Identity> {
        self.session.read().await.state.identity().cloned()
    }

    async fn authorized_identity(&self) -> Result<Identity, RelayError> {
        match &self.session.read().await.state {
            RelayState::Ready(identity) => Ok(identity.clone()),
            RelayState::Uninitialized => Err(RelayError::Uninitialized),
            RelayState::Failed(e) => Err(RelayError::SetupFailed(*e)),
        }
    }

    pub async fn register_sale(
        &self,
        sale_address: &str,
        token_address: &str,
    ) -> Result<DispatchReceipt, RelayError> {
        self.dispatch(Command::RegisterSale {
            sale_address: sale_address.to_string(),
            token_address: token_address.to_string(),
        })
        .await
    }

    pub async fn attach_token(
        &self,
        sale_id: &str,
        token_address: &str,
    ) -> Result<DispatchReceipt, RelayError> {
        self.dispatch(Command::AttachToken {
            sale_id: sale_id.to_string(),
            token_address: token_address.to_string(),
        })
        .await
    }

    pub async fn end_sale(&self, sale_id: &str) -> Result<DispatchReceipt, RelayError> {
        self.dispatch(Command::EndSale {
            sale_id: sale_id.to_string(),
        })
        .await
    }

    pub async fn activate_sale(&self, sale_id: &str) -> Result<DispatchReceipt, RelayError> {
        self.dispatch(Command::ActivateSale {
            sale_id: sale_id.to_string(),
        })
        .await
    }

    /// Resolves the deployed instance and invokes the command's operation on it.
    ///
    /// The identity is read once, at call time. Failures are logged and returned; nothing is
    /// retried.
    pub async fn dispatch(&self, command: Command) -> Result<DispatchReceipt, RelayError> {
        let from = match self.authorized_identity().await {
            Ok(identity) => identity,
            Err(e) => {
                tracing::warn!(command = command.name(), error = %e, "command rejected");
                return Err(e);
            }
        };

        let instance = match self.contract.deployed().await {
            Ok(instance) => instance,
            Err(e) => {
                tracing::error!(command = command.name(), error = %e, "resolving deployed contract failed");
                return Err(RelayError::Resolve(e));
            }
        };

        let opts = TxOptions { from: from.clone() };
        let result = match &command {
            Command::RegisterSale {
                sale_address,
                token_address,
            } => instance.add_crowdsale(sale_address, token_address, &opts).await,
            Command::AttachToken {
                sale_id,
                token_address,
            } => instance.set_crowdsale_token(sale_id, token_address, &opts).await,
            Command::EndSale { sale_id } => instance.set_crowdsale_ended(sale_id, &opts).await,
            Command::ActivateSale { sale_id } => instance.set_crowdsale_active(sale_id, &opts).await,
        };

        match result {
            Ok(tx_hash) => {
                tracing::info!(
                    command = command.name(),
                    method = command.contract_method(),
                    %from,
                    %tx_hash,
                    "command dispatched"
                );
                Ok(DispatchReceipt {
                    command,
                    from,
                    contract: instance.address().to_string(),
                    tx_hash,
                    dispatched_at: Utc::now(),
                })
            }
            Err(e) => {
                tracing::error!(
                    command = command.name(),
                    method = command.contract_method(),
                    error = %e,
                    "contract call failed"
                );
                Err(RelayError::Invoke(e))
            }
        }
    }
}
