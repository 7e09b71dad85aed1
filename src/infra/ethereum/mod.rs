pub mod abi;
pub mod artifact;
pub mod bridge;
pub mod contract;
pub mod error;
pub mod provider;

pub use artifact::Artifact;
pub use bridge::{Bridge, InjectedBridge};
pub use contract::{ContractAbstraction, DeployedInstance, Deployment, SaleRegistry, TxHash};
pub use error::{ContractError, ProviderError};
pub use provider::{HttpProvider, Provider};
