use thiserror::Error;

/// Failure talking to the JSON-RPC provider behind the wallet bridge.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("rpc error {code}: {message}")]
    Rpc { code: i64, message: String },
    #[error("invalid rpc response: {0}")]
    InvalidResponse(String),
}

/// Failure resolving the deployed contract or building/sending one of its calls.
#[derive(Debug, Error)]
pub enum ContractError {
    #[error("contract has no provider; start the relay first")]
    NoProvider,
    #[error("{contract} has not been deployed to detected network ({network})")]
    NotDeployed { contract: String, network: String },
    #[error("cannot create instance of {contract}; no code at address {address}")]
    NoCode { contract: String, address: String },
    #[error("method {method} is not in the contract abi")]
    MissingMethod { method: String },
    #[error("{method} expects {expected} arguments, got {got}")]
    Arity {
        method: String,
        expected: usize,
        got: usize,
    },
    #[error("abi type {ty} is not supported")]
    UnsupportedType { ty: String },
    #[error("invalid {ty} argument {value:?}: {reason}")]
    InvalidArgument {
        ty: &'static str,
        value: String,
        reason: String,
    },
    #[error(transparent)]
    Provider(#[from] ProviderError),
}

impl ContractError {
    /// True when the caller supplied something the contract call cannot encode.
    pub fn is_caller_error(&self) -> bool {
        matches!(
            self,
            ContractError::Arity { .. } | ContractError::InvalidArgument { .. }
        )
    }
}
