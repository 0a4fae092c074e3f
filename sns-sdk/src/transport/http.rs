//! Solana JSON-RPC transport.
//!
//! # Feature Flags
//!
//! Requires the `http-rpc` feature:
//!
//! ```toml
//! [dependencies]
//! sns-sdk = { version = "1.0", features = ["http-rpc"] }
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use sns_sdk::config::{ResolveConfig, RpcConfig};
//! use sns_sdk::non_blocking::resolve;
//! use sns_sdk::transport::HttpRpcClient;
//!
//! let rpc = HttpRpcClient::new(RpcConfig::mainnet())?;
//! let owner = resolve(&rpc, "bonfida.sol", &ResolveConfig::default()).await?;
//! println!("bonfida.sol -> {owner}");
//! ```

use std::time::Duration;

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::traits::{
    AccountEncoding, AccountInfo, ProgramAccount, ProgramAccountsConfig, RpcFilter, RpcTransport,
};
use crate::config::RpcConfig;
use crate::{Pubkey, Result, SnsError};

/// [`RpcTransport`] over HTTP JSON-RPC.
pub struct HttpRpcClient {
    config: RpcConfig,
    client: reqwest::Client,
}

#[derive(Serialize)]
struct JsonRpcRequest<'a> {
    jsonrpc: &'static str,
    id: u64,
    method: &'a str,
    params: Value,
}

#[derive(Deserialize)]
struct JsonRpcResponse<T> {
    result: Option<T>,
    error: Option<JsonRpcError>,
}

#[derive(Deserialize)]
struct JsonRpcError {
    code: i64,
    message: String,
}

#[derive(Deserialize)]
struct WithContext<T> {
    value: T,
}

#[derive(Deserialize)]
struct UiAccount {
    data: (String, String),
    owner: String,
    lamports: u64,
}

#[derive(Deserialize)]
struct UiKeyedAccount {
    pubkey: String,
    account: UiAccount,
}

impl UiAccount {
    fn into_account_info(self) -> Result<AccountInfo> {
        let (encoded, encoding) = self.data;
        let data = match encoding.as_str() {
            "base64" => STANDARD
                .decode(encoded)
                .map_err(|e| SnsError::Serialization(format!("invalid base64 account data: {e}")))?,
            "base58" => bs58::decode(encoded)
                .into_vec()
                .map_err(|e| SnsError::Serialization(format!("invalid base58 account data: {e}")))?,
            other => {
                return Err(SnsError::Serialization(format!(
                    "unsupported account encoding '{other}'"
                )))
            }
        };
        Ok(AccountInfo {
            data,
            owner: self.owner.parse()?,
            lamports: self.lamports,
        })
    }
}

impl HttpRpcClient {
    /// Create a client with the given configuration.
    pub fn new(config: RpcConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| SnsError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    /// Client for the public mainnet-beta endpoint.
    pub fn mainnet() -> Result<Self> {
        Self::new(RpcConfig::mainnet())
    }

    /// Client for the public devnet endpoint.
    pub fn devnet() -> Result<Self> {
        Self::new(RpcConfig::devnet())
    }

    /// Get the configuration.
    pub fn config(&self) -> &RpcConfig {
        &self.config
    }

    fn account_options(&self, encoding: AccountEncoding) -> serde_json::Map<String, Value> {
        let mut options = serde_json::Map::new();
        options.insert("encoding".into(), json!(encoding.as_str()));
        options.insert("commitment".into(), json!(self.config.commitment.as_str()));
        options
    }

    async fn call<T: DeserializeOwned>(&self, method: &str, params: Value) -> Result<T> {
        let request = JsonRpcRequest {
            jsonrpc: "2.0",
            id: 1,
            method,
            params,
        };

        let response = self
            .client
            .post(&self.config.url)
            .json(&request)
            .send()
            .await
            .map_err(|e| self.map_reqwest_error(e))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(self.map_status_error(status.as_u16(), &error_text));
        }

        let body: JsonRpcResponse<T> = response.json().await.map_err(|e| {
            SnsError::Serialization(format!("Failed to parse {method} response: {e}"))
        })?;

        if let Some(error) = body.error {
            return Err(SnsError::Transport(format!(
                "{method} failed ({}): {}",
                error.code, error.message
            )));
        }
        body.result
            .ok_or_else(|| SnsError::Serialization(format!("{method} response has no result")))
    }

    /// Map HTTP status codes to SnsError.
    fn map_status_error(&self, status: u16, error_text: &str) -> SnsError {
        match status {
            429 => SnsError::RateLimited {
                retry_after_ms: 5000,
            },
            500..=599 => SnsError::Transport(format!("RPC server error ({}): {}", status, error_text)),
            _ => SnsError::Transport(format!("RPC request failed ({}): {}", status, error_text)),
        }
    }

    /// Map reqwest errors to SnsError.
    fn map_reqwest_error(&self, e: reqwest::Error) -> SnsError {
        if e.is_timeout() {
            SnsError::ConnectionTimeout {
                operation: "RPC request".to_string(),
                timeout_ms: self.config.timeout_secs * 1000,
            }
        } else if e.is_connect() {
            SnsError::ConnectionFailed {
                target: self.config.url.clone(),
                reason: e.to_string(),
            }
        } else {
            SnsError::Transport(format!("RPC request failed: {}", e))
        }
    }
}

fn filter_json(filter: &RpcFilter) -> Value {
    match filter {
        RpcFilter::Memcmp { offset, bytes } => json!({
            "memcmp": {
                "offset": offset,
                "bytes": bs58::encode(bytes).into_string(),
            }
        }),
        RpcFilter::DataSize(size) => json!({ "dataSize": size }),
    }
}

#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
impl RpcTransport for HttpRpcClient {
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self), fields(key = %key)))]
    async fn fetch_account(&self, key: &Pubkey) -> Result<Option<AccountInfo>> {
        let params = json!([key.to_string(), self.account_options(AccountEncoding::Base64)]);
        let response: WithContext<Option<UiAccount>> = self.call("getAccountInfo", params).await?;
        response
            .value
            .map(UiAccount::into_account_info)
            .transpose()
    }

    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self, keys), fields(count = keys.len())))]
    async fn fetch_accounts(&self, keys: &[Pubkey]) -> Result<Vec<Option<AccountInfo>>> {
        let mut accounts = Vec::with_capacity(keys.len());
        for chunk in keys.chunks(self.config.max_accounts_per_request.max(1)) {
            let keys: Vec<String> = chunk.iter().map(Pubkey::to_string).collect();
            let params = json!([keys, self.account_options(AccountEncoding::Base64)]);
            let response: WithContext<Vec<Option<UiAccount>>> =
                self.call("getMultipleAccounts", params).await?;
            if response.value.len() != chunk.len() {
                return Err(SnsError::Serialization(format!(
                    "getMultipleAccounts returned {} accounts for {} keys",
                    response.value.len(),
                    chunk.len()
                )));
            }
            for account in response.value {
                accounts.push(account.map(UiAccount::into_account_info).transpose()?);
            }
        }
        Ok(accounts)
    }

    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self, config), fields(program = %program_id)))]
    async fn get_program_accounts(
        &self,
        program_id: &Pubkey,
        config: &ProgramAccountsConfig,
    ) -> Result<Vec<ProgramAccount>> {
        let mut options = self.account_options(config.encoding);
        if !config.filters.is_empty() {
            let filters: Vec<Value> = config.filters.iter().map(filter_json).collect();
            options.insert("filters".into(), Value::Array(filters));
        }
        if let Some(slice) = config.data_slice {
            options.insert(
                "dataSlice".into(),
                json!({ "offset": slice.offset, "length": slice.length }),
            );
        }

        let params = json!([program_id.to_string(), options]);
        let accounts: Vec<UiKeyedAccount> = self.call("getProgramAccounts", params).await?;
        accounts
            .into_iter()
            .map(|keyed| {
                Ok(ProgramAccount {
                    pubkey: keyed.pubkey.parse()?,
                    account: keyed.account.into_account_info()?,
                })
            })
            .collect()
    }
}
