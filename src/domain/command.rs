use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

/// Opaque account handle used as `from` on every contract call.
///
/// Never validated: whatever the wallet bridge reports is passed through as-is.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
#[schema(value_type = String, example = "0x627306090abab3a6e1400e9345bc60c78a8bef57")]
pub struct Identity(String);

impl Identity {
    pub fn new(handle: impl Into<String>) -> Self {
        Self(handle.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Identity {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Trailing options object attached to every mutating contract call.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TxOptions {
    pub from: Identity,
}

/// One request against the sale registry contract.
///
/// Arguments are kept as the literal strings the caller supplied; encoding into contract
/// words happens when the call is sent.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Command {
    RegisterSale {
        sale_address: String,
        token_address: String,
    },
    AttachToken {
        sale_id: String,
        token_address: String,
    },
    EndSale {
        sale_id: String,
    },
    ActivateSale {
        sale_id: String,
    },
}

impl Command {
    /// Short name used in logs and API responses.
    pub fn name(&self) -> &'static str {
        match self {
            Command::RegisterSale { .. } => "register_sale",
            Command::AttachToken { .. } => "attach_token",
            Command::EndSale { .. } => "end_sale",
            Command::ActivateSale { .. } => "activate_sale",
        }
    }

    /// Name of the contract method this command maps onto.
    pub fn contract_method(&self) -> &'static str {
        match self {
            Command::RegisterSale { .. } => "addCrowdsale",
            Command::AttachToken { .. } => "setCrowdsaleToken",
            Command::EndSale { .. } => "setCrowdsaleEnded",
            Command::ActivateSale { .. } => "setCrowdsaleActive",
        }
    }

    /// Positional contract arguments, excluding the trailing options.
    pub fn arguments(&self) -> Vec<&str> {
        match self {
            Command::RegisterSale {
                sale_address,
                token_address,
            } => vec![sale_address, token_address],
            Command::AttachToken {
                sale_id,
                token_address,
            } => vec![sale_id, token_address],
            Command::EndSale { sale_id } | Command::ActivateSale { sale_id } => vec![sale_id],
        }
    }
}
