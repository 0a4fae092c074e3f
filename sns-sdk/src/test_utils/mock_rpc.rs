//! In-memory ledger for exercising lookups without a node.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::RwLock;

use async_trait::async_trait;

use super::fixtures::{registry_account, reverse_data, sol_record_v1_data, zero_padded};
use crate::constants::{
    CENTRAL_STATE_SNS_RECORDS, NAME_PROGRAM_ID, REVERSE_LOOKUP_CLASS, ROOT_DOMAIN_ACCOUNT,
    SOL_TLD_SUFFIX, SUB_REGISTRAR_PROGRAM_ID,
};
use crate::derivation::{get_domain_key, get_record_key, get_record_v2_key, get_reverse_key_from_key};
use crate::record::{serialize_record, serialize_record_v2_content, Record};
use crate::state::{
    NameRegistryState, Price, RecordState, Registrar, SubRegistrarTag, Validation,
};
use crate::transport::{AccountInfo, ProgramAccount, ProgramAccountsConfig, RpcTransport};
use crate::{Pubkey, Result, SnsError};

const TEST_LAMPORTS: u64 = 1_000_000;

/// Accounts keyed by address, served through [`RpcTransport`].
///
/// A failure set with [`MockRpc::fail_with`] is returned by every call until
/// cleared.
#[derive(Debug, Default)]
pub struct MockRpc {
    accounts: RwLock<BTreeMap<Pubkey, AccountInfo>>,
    failure: RwLock<Option<String>>,
    requests: AtomicUsize,
}

impl MockRpc {
    /// Empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store an account as is.
    pub fn insert_account(&self, key: Pubkey, account: AccountInfo) {
        self.accounts.write().unwrap().insert(key, account);
    }

    /// Store raw data in an account owned by the name service program.
    pub fn insert_data(&self, key: Pubkey, data: Vec<u8>) {
        self.insert_account(
            key,
            AccountInfo {
                data,
                owner: NAME_PROGRAM_ID,
                lamports: TEST_LAMPORTS,
            },
        );
    }

    /// Remove an account, returning it.
    pub fn remove_account(&self, key: &Pubkey) -> Option<AccountInfo> {
        self.accounts.write().unwrap().remove(key)
    }

    /// Current contents of an account.
    pub fn account(&self, key: &Pubkey) -> Option<AccountInfo> {
        self.accounts.read().unwrap().get(key).cloned()
    }

    /// Make every following call fail with a transport error.
    pub fn fail_with(&self, message: impl Into<String>) {
        *self.failure.write().unwrap() = Some(message.into());
    }

    /// Undo [`MockRpc::fail_with`].
    pub fn clear_failure(&self) {
        *self.failure.write().unwrap() = None;
    }

    /// Number of transport calls served so far, failed ones included.
    pub fn request_count(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }

    /// Create the registry and reverse lookup accounts of a domain or
    /// subdomain. Returns the domain key.
    pub fn register_domain(&self, domain: &str, owner: &Pubkey) -> Result<Pubkey> {
        let key = get_domain_key(domain, None)?;
        let parent = key.parent_address.unwrap_or(ROOT_DOMAIN_ACCOUNT);
        self.insert_data(
            key.address,
            registry_account(parent, *owner, Pubkey::default(), Vec::new()),
        );

        let label = domain
            .strip_suffix(SOL_TLD_SUFFIX)
            .unwrap_or(domain)
            .split('.')
            .next()
            .unwrap_or_default();
        let (reverse_parent, reverse_name) = match key.parent_address {
            Some(parent) => (Some(parent), format!("\0{label}")),
            None => (None, label.to_string()),
        };
        let reverse_key = get_reverse_key_from_key(&key.address, reverse_parent.as_ref())?;
        self.insert_data(
            reverse_key,
            registry_account(
                reverse_parent.unwrap_or_default(),
                Pubkey::default(),
                REVERSE_LOOKUP_CLASS,
                reverse_data(&reverse_name),
            ),
        );
        Ok(key.address)
    }

    /// Owner stored in the registry of `domain`.
    pub fn domain_owner(&self, domain: &str) -> Result<Pubkey> {
        let key = get_domain_key(domain, None)?.address;
        let account = self
            .account(&key)
            .ok_or_else(|| SnsError::DomainDoesNotExist(domain.to_string()))?;
        Ok(NameRegistryState::deserialize(&account.data)?.owner)
    }

    /// Write a v1 record of a registered domain. Fixed-size content is
    /// zero padded to its allocated size. Returns the record key.
    pub fn set_record_v1(&self, domain: &str, record: Record, content: &str) -> Result<Pubkey> {
        let owner = self.domain_owner(domain)?;
        let content = serialize_record(content, record)?;
        let allocated = record.v1_size().unwrap_or(content.len());
        self.write_v1(domain, record, owner, zero_padded(content, allocated))
    }

    /// Write a v1 `SOL` record pointing to `target`, signed by `signer`.
    pub fn set_sol_record_v1(
        &self,
        domain: &str,
        signer: &ed25519_dalek::SigningKey,
        target: &Pubkey,
    ) -> Result<Pubkey> {
        let owner = self.domain_owner(domain)?;
        let key = get_record_key(domain, Record::Sol)?;
        self.write_v1(domain, Record::Sol, owner, sol_record_v1_data(signer, target, &key))
    }

    fn write_v1(&self, domain: &str, record: Record, owner: Pubkey, data: Vec<u8>) -> Result<Pubkey> {
        let domain_key = get_domain_key(domain, None)?.address;
        let key = get_record_key(domain, record)?;
        self.insert_data(key, registry_account(domain_key, owner, Pubkey::default(), data));
        Ok(key)
    }

    /// Write a v2 record of a registered domain with the given validations.
    /// Returns the record key.
    pub fn set_record_v2(
        &self,
        domain: &str,
        record: Record,
        content: &str,
        staleness: (Validation, Vec<u8>),
        roa: (Validation, Vec<u8>),
    ) -> Result<Pubkey> {
        let owner = self.domain_owner(domain)?;
        let domain_key = get_domain_key(domain, None)?.address;
        let key = get_record_v2_key(domain, record)?;
        let state = RecordState::new(
            domain_key,
            owner,
            CENTRAL_STATE_SNS_RECORDS,
            staleness,
            roa,
            serialize_record_v2_content(content, record)?,
        )?;
        self.insert_data(key, state.to_bytes()?);
        Ok(key)
    }

    /// Open a sub-registrar for a registered domain, selling every label
    /// length at `price`. Returns the registrar key.
    pub fn open_sub_registrar(
        &self,
        domain: &str,
        authority: &Pubkey,
        price: u64,
    ) -> Result<Pubkey> {
        let domain_key = get_domain_key(domain, None)?.address;
        let (key, nonce) = Registrar::find_key(&domain_key)?;
        let registrar = Registrar {
            tag: SubRegistrarTag::Registrar,
            nonce,
            authority: *authority,
            fee_account: *authority,
            domain_account: domain_key,
            total_sub_created: 0,
            nft_gated_collection: None,
            max_nft_mint: 0,
            allow_revoke: false,
            price_schedule: vec![Price { length: 1, price }],
        };
        self.insert_account(
            key,
            AccountInfo {
                data: registrar.to_bytes()?,
                owner: SUB_REGISTRAR_PROGRAM_ID,
                lamports: TEST_LAMPORTS,
            },
        );
        Ok(key)
    }

    fn begin_request(&self) -> Result<()> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        match self.failure.read().unwrap().as_ref() {
            Some(message) => Err(SnsError::Transport(message.clone())),
            None => Ok(()),
        }
    }
}

#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
impl RpcTransport for MockRpc {
    async fn fetch_account(&self, key: &Pubkey) -> Result<Option<AccountInfo>> {
        self.begin_request()?;
        Ok(self.account(key))
    }

    async fn fetch_accounts(&self, keys: &[Pubkey]) -> Result<Vec<Option<AccountInfo>>> {
        self.begin_request()?;
        let accounts = self.accounts.read().unwrap();
        Ok(keys.iter().map(|key| accounts.get(key).cloned()).collect())
    }

    async fn get_program_accounts(
        &self,
        program_id: &Pubkey,
        config: &ProgramAccountsConfig,
    ) -> Result<Vec<ProgramAccount>> {
        self.begin_request()?;
        let accounts = self.accounts.read().unwrap();
        Ok(accounts
            .iter()
            .filter(|(_, account)| account.owner == *program_id)
            .filter(|(_, account)| config.filters.iter().all(|f| f.matches(&account.data)))
            .map(|(key, account)| {
                let mut account = account.clone();
                if let Some(slice) = config.data_slice {
                    account.data = slice.apply(&account.data);
                }
                ProgramAccount {
                    pubkey: *key,
                    account,
                }
            })
            .collect())
    }
}
