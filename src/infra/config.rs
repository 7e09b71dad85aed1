//! Centralized configuration (environment variables + defaults).

use std::path::PathBuf;

fn non_empty(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// JSON-RPC endpoint of the wallet node (optional).
///
/// Unset means no wallet bridge is available; the relay will start into the failed state.
pub fn eth_rpc_url() -> Option<String> {
    non_empty("ETH_RPC_URL")
}

/// Path to the contract's build artifact.
pub fn contract_artifact_path() -> PathBuf {
    non_empty("CONTRACT_ARTIFACT")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("build/contracts/CrowdsaleStorage.json"))
}

pub fn api_bind_addr() -> String {
    non_empty("API_BIND_ADDR").unwrap_or_else(|| "0.0.0.0:3000".to_string())
}

/// Emit logs as JSON lines instead of the human-readable format.
pub fn log_json() -> bool {
    matches!(
        non_empty("RELAY_LOG_JSON").as_deref(),
        Some("1") | Some("true") | Some("TRUE") | Some("yes")
    )
}
