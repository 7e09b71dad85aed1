//! Truffle-style build artifact: the contract's ABI plus its deployed address per network.

use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

use crate::infra::ethereum::abi;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Artifact {
    pub contract_name: String,
    pub abi: Vec<AbiEntry>,
    #[serde(default)]
    pub networks: HashMap<String, NetworkDeployment>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AbiEntry {
    // Old compilers omit `type` for functions.
    #[serde(rename = "type", default = "default_entry_kind")]
    pub kind: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub inputs: Vec<AbiParam>,
}

fn default_entry_kind() -> String {
    "function".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct AbiParam {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type")]
    pub ty: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkDeployment {
    pub address: String,
    #[serde(default)]
    pub transaction_hash: Option<String>,
}

impl Artifact {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read contract artifact {:?}: {}", path, e))?;
        let artifact = Self::from_json(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse contract artifact {:?}: {}", path, e))?;
        Ok(artifact)
    }

    pub fn from_json(content: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }

    /// First function entry with this name.
    pub fn function(&self, name: &str) -> Option<&AbiEntry> {
        self.abi
            .iter()
            .find(|e| e.kind == "function" && e.name.as_deref() == Some(name))
    }

    pub fn address_for(&self, network_id: &str) -> Option<&str> {
        self.networks.get(network_id).map(|d| d.address.as_str())
    }
}

impl AbiEntry {
    pub fn signature(&self) -> String {
        abi::signature(self.name.as_deref().unwrap_or_default(), &self.inputs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ARTIFACT: &str = r#"{
        "contractName": "CrowdsaleStorage",
        "abi": [
            { "type": "constructor", "inputs": [] },
            { "type": "event", "name": "CrowdsaleAdded", "inputs": [{ "name": "id", "type": "uint256" }] },
            { "name": "setCrowdsaleEnded", "inputs": [{ "name": "_crowdsaleId", "type": "uint256" }] },
            { "type": "function", "name": "addCrowdsale", "inputs": [
                { "name": "_crowdsaleAddress", "type": "address" },
                { "name": "_tokenAddress", "type": "address" }
            ] }
        ],
        "networks": {
            "5777": { "address": "0x345ca3e014aaf5dca488057592ee47305d9b3e10", "transactionHash": "0xabc" }
        },
        "bytecode": "0x6060"
    }"#;

    #[test]
    fn parses_truffle_artifact() {
        let artifact = Artifact::from_json(ARTIFACT).unwrap();
        assert_eq!(artifact.contract_name, "CrowdsaleStorage");
        assert_eq!(
            artifact.address_for("5777"),
            Some("0x345ca3e014aaf5dca488057592ee47305d9b3e10")
        );
        assert!(artifact.address_for("1").is_none());
    }

    #[test]
    fn function_lookup_skips_events_and_defaults_kind() {
        let artifact = Artifact::from_json(ARTIFACT).unwrap();
        assert!(artifact.function("CrowdsaleAdded").is_none());
        assert_eq!(
            artifact.function("setCrowdsaleEnded").unwrap().signature(),
            "setCrowdsaleEnded(uint256)"
        );
        assert_eq!(
            artifact.function("addCrowdsale").unwrap().signature(),
            "addCrowdsale(address,address)"
        );
    }
}
