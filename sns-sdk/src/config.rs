//! Client configuration.

use serde::{Deserialize, Serialize};

use crate::{Result, SnsError};

/// Commitment level requested from the RPC node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Commitment {
    /// Latest block seen by the node.
    Processed,
    /// Voted on by a supermajority.
    #[default]
    Confirmed,
    /// Rooted.
    Finalized,
}

impl Commitment {
    /// Name as sent in JSON-RPC requests.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Processed => "processed",
            Self::Confirmed => "confirmed",
            Self::Finalized => "finalized",
        }
    }
}

impl std::str::FromStr for Commitment {
    type Err = SnsError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "processed" => Ok(Self::Processed),
            "confirmed" => Ok(Self::Confirmed),
            "finalized" => Ok(Self::Finalized),
            other => Err(SnsError::Serialization(format!(
                "unknown commitment '{other}'"
            ))),
        }
    }
}

/// Configuration of the JSON-RPC transport.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RpcConfig {
    /// JSON-RPC endpoint URL.
    pub url: String,

    /// Commitment for account reads.
    #[serde(default)]
    pub commitment: Commitment,

    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Largest `getMultipleAccounts` batch sent in one request.
    #[serde(default = "default_max_accounts")]
    pub max_accounts_per_request: usize,
}

fn default_timeout() -> u64 {
    30
}

fn default_max_accounts() -> usize {
    100 // node limit for getMultipleAccounts
}

impl RpcConfig {
    /// Create a configuration for the given endpoint.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            commitment: Commitment::default(),
            timeout_secs: default_timeout(),
            max_accounts_per_request: default_max_accounts(),
        }
    }

    /// Public mainnet-beta endpoint.
    pub fn mainnet() -> Self {
        Self::new("https://api.mainnet-beta.solana.com")
    }

    /// Public devnet endpoint.
    pub fn devnet() -> Self {
        Self::new("https://api.devnet.solana.com")
    }

    /// Load from `SNS_RPC_URL`, `SNS_RPC_COMMITMENT` and `SNS_RPC_TIMEOUT_SECS`.
    ///
    /// Returns `None` when `SNS_RPC_URL` is unset.
    pub fn from_env() -> Option<Result<Self>> {
        let url = std::env::var("SNS_RPC_URL").ok()?;
        Some(Self::from_env_with_url(url))
    }

    fn from_env_with_url(url: String) -> Result<Self> {
        let mut config = Self::new(url);
        if let Ok(commitment) = std::env::var("SNS_RPC_COMMITMENT") {
            config.commitment = commitment.parse()?;
        }
        if let Ok(timeout) = std::env::var("SNS_RPC_TIMEOUT_SECS") {
            config.timeout_secs = timeout.parse().map_err(|_| {
                SnsError::Serialization(format!("SNS_RPC_TIMEOUT_SECS is not a number: {timeout}"))
            })?;
        }
        Ok(config)
    }

    /// Set the commitment.
    pub fn with_commitment(mut self, commitment: Commitment) -> Self {
        self.commitment = commitment;
        self
    }

    /// Set the request timeout.
    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// Set the `getMultipleAccounts` batch size.
    pub fn with_max_accounts_per_request(mut self, max: usize) -> Self {
        self.max_accounts_per_request = max.max(1);
        self
    }
}

/// Options for domain resolution.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolveConfig {
    /// Accept a program-derived address as the resolution target.
    #[serde(default)]
    pub allow_pda: bool,
}

impl ResolveConfig {
    /// Accept program-derived addresses.
    pub fn allowing_pda() -> Self {
        Self { allow_pda: true }
    }
}
