use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::{Pubkey, Result};

/// Account as returned by the ledger.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountInfo {
    /// Raw account data.
    pub data: Vec<u8>,
    /// Program that owns the account.
    pub owner: Pubkey,
    /// Balance in lamports.
    pub lamports: u64,
}

/// Account returned by a program account scan.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgramAccount {
    /// Account address.
    pub pubkey: Pubkey,
    /// Account contents (possibly sliced).
    pub account: AccountInfo,
}

/// Server-side filter for program account scans.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RpcFilter {
    /// Account data at `offset` starts with `bytes`.
    Memcmp {
        /// Byte offset into the account data.
        offset: usize,
        /// Expected bytes.
        bytes: Vec<u8>,
    },
    /// Account data is exactly this many bytes long.
    DataSize(u64),
}

impl RpcFilter {
    /// Whether `data` passes the filter.
    pub fn matches(&self, data: &[u8]) -> bool {
        match self {
            Self::Memcmp { offset, bytes } => data
                .get(*offset..offset.saturating_add(bytes.len()))
                .is_some_and(|window| window == bytes.as_slice()),
            Self::DataSize(size) => data.len() as u64 == *size,
        }
    }
}

/// Encoding used for account data on the wire.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountEncoding {
    /// Base64 (no size limit).
    #[default]
    Base64,
    /// Base58 (nodes refuse accounts above 128 bytes).
    Base58,
}

impl AccountEncoding {
    /// Name as sent in JSON-RPC requests.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Base64 => "base64",
            Self::Base58 => "base58",
        }
    }
}

/// Window of account data to return.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataSlice {
    /// First byte returned.
    pub offset: usize,
    /// Number of bytes returned; `0` returns keys only.
    pub length: usize,
}

impl DataSlice {
    /// Apply the slice to account data, clamping at the end of the data.
    pub fn apply(&self, data: &[u8]) -> Vec<u8> {
        let start = self.offset.min(data.len());
        let end = self.offset.saturating_add(self.length).min(data.len());
        data[start..end].to_vec()
    }
}

/// Options of a program account scan.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgramAccountsConfig {
    /// All filters must match.
    pub filters: Vec<RpcFilter>,
    /// Wire encoding.
    pub encoding: AccountEncoding,
    /// Optional data window.
    pub data_slice: Option<DataSlice>,
}

/// Read access to ledger accounts.
///
/// Lookups in [`crate::non_blocking`] are generic over this trait so any RPC
/// client (or an in-memory mock) can back them.
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
pub trait RpcTransport {
    /// Fetches a single account, `None` if it does not exist.
    async fn fetch_account(&self, key: &Pubkey) -> Result<Option<AccountInfo>>;

    /// Fetches several accounts. The result has one entry per key, in the
    /// same order.
    async fn fetch_accounts(&self, keys: &[Pubkey]) -> Result<Vec<Option<AccountInfo>>>;

    /// Scans the accounts owned by `program_id`.
    async fn get_program_accounts(
        &self,
        program_id: &Pubkey,
        config: &ProgramAccountsConfig,
    ) -> Result<Vec<ProgramAccount>>;
}
