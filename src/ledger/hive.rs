//! Hive JSON-RPC client
//!
//! Speaks JSON-RPC 2.0 over HTTPS POST to the `condenser_api` of a Hive node.
//! Endpoints are tried in order: transport failures and non-success HTTP
//! statuses fail over to the next endpoint, protocol failures do not.

use std::time::Duration;

use reqwest::{Client, Url, header};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};

use super::{Block, GlobalProperties, LedgerClient};
use crate::config::LedgerConfig;
use crate::error::{ConfigError, StatsError};

const GET_DYNAMIC_GLOBAL_PROPERTIES: &str = "condenser_api.get_dynamic_global_properties";
const GET_ACCOUNT_COUNT: &str = "condenser_api.get_account_count";
const GET_BLOCK: &str = "condenser_api.get_block";

/// JSON-RPC response envelope
#[derive(Debug, Deserialize)]
struct RpcResponse<T> {
    result: Option<T>,
    error: Option<RpcError>,
}

#[derive(Debug, Deserialize)]
struct RpcError {
    code: i64,
    message: String,
}

/// Hive node client with ordered endpoint failover
#[derive(Debug, Clone)]
pub struct HiveClient {
    endpoints: Vec<Url>,
    http_client: Client,
}

impl HiveClient {
    /// Create a client for the given endpoints
    pub fn new(endpoints: &[String], timeout: Duration) -> Result<Self, ConfigError> {
        if endpoints.is_empty() {
            return Err(ConfigError::Invalid(
                "at least one ledger endpoint is required".to_string(),
            ));
        }

        let endpoints = endpoints
            .iter()
            .map(|e| {
                Url::parse(e).map_err(|err| {
                    ConfigError::Invalid(format!("invalid endpoint URL '{}': {}", e, err))
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let http_client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ConfigError::Invalid(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            endpoints,
            http_client,
        })
    }

    pub fn from_config(config: &LedgerConfig) -> Result<Self, ConfigError> {
        Self::new(&config.endpoints, Duration::from_secs(config.timeout_secs))
    }

    pub fn endpoints(&self) -> &[Url] {
        &self.endpoints
    }

    /// Call `method` and decode its result, `Ok(None)` for a null result
    async fn call<T>(&self, method: &str, params: Value) -> Result<Option<T>, StatsError>
    where
        T: DeserializeOwned,
    {
        let body = json!({
            "jsonrpc": "2.0",
            "method": method,
            "params": params,
            "id": 1
        });

        let mut last_error = None;
        for endpoint in &self.endpoints {
            match self.post(endpoint, &body).await {
                Ok(text) => return decode_response(method, &text),
                Err(e) => {
                    log::warn!("{} failed on {}: {}", method, endpoint, e);
                    last_error = Some(e);
                }
            }
        }

        Err(last_error
            .unwrap_or_else(|| StatsError::Network("no ledger endpoints configured".to_string())))
    }

    /// Call a method whose result must be present
    async fn call_required<T>(&self, method: &str, params: Value) -> Result<T, StatsError>
    where
        T: DeserializeOwned,
    {
        self.call(method, params)
            .await?
            .ok_or_else(|| StatsError::Protocol(format!("{} returned no result", method)))
    }

    /// POST one request body, returning the raw response text
    async fn post(&self, endpoint: &Url, body: &Value) -> Result<String, StatsError> {
        let response = self
            .http_client
            .post(endpoint.clone())
            .header(header::ACCEPT, "application/json")
            .json(body)
            .send()
            .await
            .map_err(|e| StatsError::Network(format!("request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(StatsError::Network(format!(
                "endpoint returned status: {}",
                response.status()
            )));
        }

        response
            .text()
            .await
            .map_err(|e| StatsError::Network(format!("failed to read response: {}", e)))
    }
}

fn decode_response<T>(method: &str, text: &str) -> Result<Option<T>, StatsError>
where
    T: DeserializeOwned,
{
    let response: RpcResponse<T> = serde_json::from_str(text).map_err(|e| {
        StatsError::Protocol(format!("failed to parse {} response: {}", method, e))
    })?;

    if let Some(error) = response.error {
        return Err(StatsError::Protocol(format!(
            "{} returned error {}: {}",
            method, error.code, error.message
        )));
    }

    Ok(response.result)
}

impl LedgerClient for HiveClient {
    async fn get_global_properties(&self) -> Result<GlobalProperties, StatsError> {
        self.call_required(GET_DYNAMIC_GLOBAL_PROPERTIES, json!([]))
            .await
    }

    async fn get_account_count(&self) -> Result<u64, StatsError> {
        self.call_required(GET_ACCOUNT_COUNT, json!([])).await
    }

    async fn get_block(&self, height: u64) -> Result<Option<Block>, StatsError> {
        self.call(GET_BLOCK, json!([height])).await
    }
}

#[cfg(test)]
#[path = "hive_tests.rs"]
mod hive_tests;
