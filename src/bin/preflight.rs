use serde_json::json;
use std::sync::Arc;

use crowdsale_relay::ethereum::{
    Artifact, Bridge, ContractAbstraction, Deployment, HttpProvider, InjectedBridge, Provider,
    SaleRegistry,
};
use crowdsale_relay::infra::config;

fn usage_and_exit() -> ! {
    eprintln!(
        "Usage: cargo run --bin preflight\n\
         \n\
         Requires env vars:\n\
           ETH_RPC_URL\n\
         Optional:\n\
           CONTRACT_ARTIFACT (default build/contracts/CrowdsaleStorage.json)\n"
    );
    std::process::exit(2);
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.iter().any(|a| a == "-h" || a == "--help") {
        usage_and_exit();
    }

    let rpc_url = config::eth_rpc_url()
        .ok_or_else(|| anyhow::anyhow!("ETH_RPC_URL must be set (no wallet bridge without it)"))?;
    let artifact_path = config::contract_artifact_path();

    println!("> Preflight:");
    println!("  ETH_RPC_URL={}", rpc_url);
    println!("  CONTRACT_ARTIFACT={}", artifact_path.display());

    let artifact = Artifact::load(&artifact_path)?;
    println!(
        "  Artifact: {} ({} abi entries, {} networks)",
        artifact.contract_name,
        artifact.abi.len(),
        artifact.networks.len()
    );
    for method in ["addCrowdsale", "setCrowdsaleToken", "setCrowdsaleEnded", "setCrowdsaleActive"] {
        match artifact.function(method) {
            Some(entry) => println!("  ABI: {}", entry.signature()),
            None => return Err(anyhow::anyhow!("Artifact ABI has no {} function", method)),
        }
    }

    let provider: Arc<dyn Provider> = Arc::new(HttpProvider::new(rpc_url));

    // Basic RPC connectivity
    let client_version = provider.request("web3_clientVersion", json!([])).await?;
    println!("  Client: {}", client_version);
    let network = provider.request("net_version", json!([])).await?;
    println!("  Network id: {}", network);
    let network_id = match &network {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    };
    match artifact.networks.get(&network_id) {
        Some(deployment) => println!(
            "  Artifact deployment: {} (tx {})",
            deployment.address,
            deployment.transaction_hash.as_deref().unwrap_or("unknown")
        ),
        None => {
            return Err(anyhow::anyhow!(
                "{} has no deployment recorded for network {}",
                artifact.contract_name,
                network_id
            ))
        }
    }

    // Accounts
    let bridge = InjectedBridge::new(provider.clone());
    let accounts = bridge.accounts().await?;
    match accounts.first() {
        Some(first) => println!("  Accounts: {} (relay will use {})", accounts.len(), first),
        None => {
            return Err(anyhow::anyhow!(
                "Node exposes no accounts; unlock or import one in the wallet"
            ))
        }
    }

    // Deployment + code presence
    let contract = ContractAbstraction::new(artifact);
    contract.set_provider(provider).await;
    let instance = contract.deployed().await?;
    println!("  Contract deployed at {} (code present).", instance.address());

    println!("> Preflight OK.");
    Ok(())
}
