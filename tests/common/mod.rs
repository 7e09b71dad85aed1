//! Shared fixtures: an in-process JSON-RPC node, in-memory contract fakes and an alert recorder.

#![allow(dead_code)]

use async_trait::async_trait;
use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use crowdsale_relay::ethereum::{
    Artifact, Bridge, ContractError, Deployment, Provider, ProviderError, SaleRegistry, TxHash,
};
use crowdsale_relay::{Alert, AlertSink, Identity, TxOptions};
use serde_json::{json, Value};
use std::sync::{Arc, Mutex};

pub const CONTRACT_ADDRESS: &str = "0x345ca3e014aaf5dca488057592ee47305d9b3e10";
pub const NETWORK_ID: &str = "5777";

pub fn artifact_json() -> String {
    json!({
        "contractName": "CrowdsaleStorage",
        "abi": [
            { "type": "function", "name": "addCrowdsale", "inputs": [
                { "name": "_crowdsaleAddress", "type": "address" },
                { "name": "_tokenAddress", "type": "address" }
            ] },
            { "type": "function", "name": "setCrowdsaleToken", "inputs": [
                { "name": "_crowdsaleId", "type": "uint256" },
                { "name": "_tokenAddress", "type": "address" }
            ] },
            { "type": "function", "name": "setCrowdsaleEnded", "inputs": [
                { "name": "_crowdsaleId", "type": "uint256" }
            ] },
            { "type": "function", "name": "setCrowdsaleActive", "inputs": [
                { "name": "_crowdsaleId", "type": "uint256" }
            ] }
        ],
        "networks": { NETWORK_ID: { "address": CONTRACT_ADDRESS } }
    })
    .to_string()
}

pub fn artifact() -> Artifact {
    Artifact::from_json(&artifact_json()).unwrap()
}

// --- Fake JSON-RPC node ---

#[derive(Default)]
pub struct FakeNodeState {
    pub accounts: Vec<String>,
    pub network: String,
    pub code: String,
    pub fail_accounts: bool,
    pub revert_sends: bool,
    pub sent: Vec<Value>,
}

pub type SharedNode = Arc<Mutex<FakeNodeState>>;

pub fn node_with_accounts(accounts: &[&str]) -> SharedNode {
    Arc::new(Mutex::new(FakeNodeState {
        accounts: accounts.iter().map(|a| a.to_string()).collect(),
        network: NETWORK_ID.to_string(),
        code: "0x6060604052".to_string(),
        ..Default::default()
    }))
}

fn rpc_error(id: &Value, code: i64, message: &str) -> Json<Value> {
    Json(json!({ "jsonrpc": "2.0", "id": id, "error": { "code": code, "message": message } }))
}

async fn rpc_handler(State(node): State<SharedNode>, Json(req): Json<Value>) -> Json<Value> {
    let id = req["id"].clone();
    let method = req["method"].as_str().unwrap_or_default().to_string();
    let mut node = node.lock().unwrap();

    let result = match method.as_str() {
        "eth_accounts" if node.fail_accounts => return rpc_error(&id, 4100, "unauthorized"),
        "eth_accounts" => json!(node.accounts),
        "net_version" => json!(node.network),
        "web3_clientVersion" => json!("FakeNode/v0.1.0"),
        "eth_getCode" => json!(node.code),
        "eth_sendTransaction" if node.revert_sends => {
            return rpc_error(&id, -32000, "VM Exception while processing transaction: revert")
        }
        "eth_sendTransaction" => {
            node.sent.push(req["params"][0].clone());
            json!(format!("0x{:064x}", node.sent.len()))
        }
        _ => return rpc_error(&id, -32601, "method not found"),
    };
    Json(json!({ "jsonrpc": "2.0", "id": id, "result": result }))
}

/// Serves the fake node on an ephemeral port and returns its URL.
pub async fn spawn_fake_node(node: SharedNode) -> String {
    let router = Router::new().route("/", post(rpc_handler)).with_state(node);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://127.0.0.1:{}", port)
}

// --- In-memory fakes ---

pub struct StaticBridge {
    /// `None` makes `accounts()` fail.
    pub accounts: Option<Vec<Identity>>,
}

impl StaticBridge {
    pub fn with(accounts: &[&str]) -> Self {
        Self {
            accounts: Some(accounts.iter().map(|a| Identity::new(*a)).collect()),
        }
    }

    pub fn failing() -> Self {
        Self { accounts: None }
    }
}

struct NullProvider;

#[async_trait]
impl Provider for NullProvider {
    async fn request(&self, method: &str, _params: Value) -> Result<Value, ProviderError> {
        Err(ProviderError::Rpc {
            code: -32601,
            message: format!("{} not supported", method),
        })
    }
}

#[async_trait]
impl Bridge for StaticBridge {
    async fn accounts(&self) -> Result<Vec<Identity>, ProviderError> {
        self.accounts.clone().ok_or(ProviderError::Rpc {
            code: 4100,
            message: "wallet locked".to_string(),
        })
    }

    fn current_provider(&self) -> Arc<dyn Provider> {
        Arc::new(NullProvider)
    }
}

/// One recorded contract invocation: method, positional args, options.
#[derive(Clone, Debug, PartialEq)]
pub struct RecordedCall {
    pub method: &'static str,
    pub args: Vec<String>,
    pub opts: TxOptions,
}

#[derive(Default)]
pub struct RecordingRegistry {
    pub calls: Mutex<Vec<RecordedCall>>,
}

impl RecordingRegistry {
    fn record(&self, method: &'static str, args: &[&str], opts: &TxOptions) -> TxHash {
        let mut calls = self.calls.lock().unwrap();
        calls.push(RecordedCall {
            method,
            args: args.iter().map(|a| a.to_string()).collect(),
            opts: opts.clone(),
        });
        format!("0xfeed{}", calls.len())
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl SaleRegistry for RecordingRegistry {
    fn address(&self) -> &str {
        CONTRACT_ADDRESS
    }

    async fn add_crowdsale(&self, sale: &str, token: &str, opts: &TxOptions) -> Result<TxHash, ContractError> {
        tokio::task::yield_now().await;
        Ok(self.record("addCrowdsale", &[sale, token], opts))
    }

    async fn set_crowdsale_token(&self, id: &str, token: &str, opts: &TxOptions) -> Result<TxHash, ContractError> {
        tokio::task::yield_now().await;
        Ok(self.record("setCrowdsaleToken", &[id, token], opts))
    }

    async fn set_crowdsale_ended(&self, id: &str, opts: &TxOptions) -> Result<TxHash, ContractError> {
        tokio::task::yield_now().await;
        Ok(self.record("setCrowdsaleEnded", &[id], opts))
    }

    async fn set_crowdsale_active(&self, id: &str, opts: &TxOptions) -> Result<TxHash, ContractError> {
        tokio::task::yield_now().await;
        Ok(self.record("setCrowdsaleActive", &[id], opts))
    }
}

/// Deployment handing out a shared recording registry, or failing to resolve.
pub struct FakeDeployment {
    pub registry: Arc<RecordingRegistry>,
    pub resolvable: bool,
    pub provider_bound: Mutex<bool>,
    pub resolutions: Mutex<u32>,
}

impl FakeDeployment {
    pub fn new(resolvable: bool) -> Self {
        Self {
            registry: Arc::new(RecordingRegistry::default()),
            resolvable,
            provider_bound: Mutex::new(false),
            resolutions: Mutex::new(0),
        }
    }
}

#[async_trait]
impl Deployment for FakeDeployment {
    async fn set_provider(&self, _provider: Arc<dyn Provider>) {
        *self.provider_bound.lock().unwrap() = true;
    }

    async fn deployed(&self) -> Result<Arc<dyn SaleRegistry>, ContractError> {
        *self.resolutions.lock().unwrap() += 1;
        if !self.resolvable {
            return Err(ContractError::NotDeployed {
                contract: "CrowdsaleStorage".to_string(),
                network: NETWORK_ID.to_string(),
            });
        }
        Ok(self.registry.clone())
    }
}

#[derive(Default)]
pub struct RecordingAlerts {
    pub raised: Mutex<Vec<Alert>>,
}

impl RecordingAlerts {
    pub fn raised(&self) -> Vec<Alert> {
        self.raised.lock().unwrap().clone()
    }
}

impl AlertSink for RecordingAlerts {
    fn alert(&self, alert: Alert) {
        self.raised.lock().unwrap().push(alert);
    }
}
