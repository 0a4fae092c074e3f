use serde::{Deserialize, Serialize};

use crate::derivation::{get_domain_key, get_record_key, get_record_v2_key};
use crate::record::{deserialize_record, deserialize_record_v2_content, Record};
use crate::state::{NameRegistryState, RecordState};
use crate::transport::{AccountInfo, RpcTransport};
use crate::verification::{self, record_validity, RecordValidity};
use crate::{Pubkey, Result, SnsError};

/// A record v2 account together with its decoded content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordResult {
    /// Record type.
    pub record: Record,
    /// Record account address.
    pub key: Pubkey,
    /// Parsed account.
    pub state: RecordState,
    /// Decoded content.
    pub content: String,
}

fn decode_v1(
    domain: &str,
    record: Record,
    key: &Pubkey,
    account: Option<AccountInfo>,
) -> Result<Option<String>> {
    let Some(account) = account else {
        return Ok(None);
    };
    let registry = NameRegistryState::deserialize(&account.data)?;
    deserialize_record(&registry, record, key).map_err(|err| err.with_domain(domain))
}

fn decode_v2(
    domain: &str,
    record: Record,
    key: Pubkey,
    account: Option<AccountInfo>,
) -> Result<Option<RecordResult>> {
    let Some(account) = account else {
        return Ok(None);
    };
    let state = RecordState::deserialize(&account.data)?;
    let content = deserialize_record_v2_content(&state.content, record)
        .map_err(|err| err.with_domain(domain))?;
    Ok(Some(RecordResult {
        record,
        key,
        state,
        content,
    }))
}

fn expect_len<T>(accounts: Vec<T>, expected: usize) -> Result<Vec<T>> {
    if accounts.len() != expected {
        return Err(SnsError::Transport(format!(
            "expected {expected} accounts, got {}",
            accounts.len()
        )));
    }
    Ok(accounts)
}

/// Read a v1 record of a domain. `None` if the record does not exist or is empty.
#[cfg_attr(feature = "tracing", tracing::instrument(skip(rpc), fields(record = %record)))]
pub async fn get_record<R: RpcTransport + ?Sized>(
    rpc: &R,
    domain: &str,
    record: Record,
) -> Result<Option<String>> {
    let key = get_record_key(domain, record)?;
    let account = rpc.fetch_account(&key).await?;
    decode_v1(domain, record, &key, account)
}

/// Read several v1 records of a domain in one request. Results follow the
/// order of `records`.
#[cfg_attr(feature = "tracing", tracing::instrument(skip(rpc, records), fields(count = records.len())))]
pub async fn get_records<R: RpcTransport + ?Sized>(
    rpc: &R,
    domain: &str,
    records: &[Record],
) -> Result<Vec<Option<String>>> {
    let keys = records
        .iter()
        .map(|record| get_record_key(domain, *record))
        .collect::<Result<Vec<_>>>()?;
    let accounts = expect_len(rpc.fetch_accounts(&keys).await?, keys.len())?;
    records
        .iter()
        .zip(keys.iter())
        .zip(accounts)
        .map(|((record, key), account)| decode_v1(domain, *record, key, account))
        .collect()
}

/// Read a v2 record of a domain. `None` if the record does not exist.
///
/// The content is decoded but not validated; see [`check_record_v2`].
#[cfg_attr(feature = "tracing", tracing::instrument(skip(rpc), fields(record = %record)))]
pub async fn get_record_v2<R: RpcTransport + ?Sized>(
    rpc: &R,
    domain: &str,
    record: Record,
) -> Result<Option<RecordResult>> {
    let key = get_record_v2_key(domain, record)?;
    let account = rpc.fetch_account(&key).await?;
    decode_v2(domain, record, key, account)
}

/// Read several v2 records of a domain in one request. Results follow the
/// order of `records`.
#[cfg_attr(feature = "tracing", tracing::instrument(skip(rpc, records), fields(count = records.len())))]
pub async fn get_records_v2<R: RpcTransport + ?Sized>(
    rpc: &R,
    domain: &str,
    records: &[Record],
) -> Result<Vec<Option<RecordResult>>> {
    let keys = records
        .iter()
        .map(|record| get_record_v2_key(domain, *record))
        .collect::<Result<Vec<_>>>()?;
    let accounts = expect_len(rpc.fetch_accounts(&keys).await?, keys.len())?;
    records
        .iter()
        .zip(keys)
        .zip(accounts)
        .map(|((record, key), account)| decode_v2(domain, *record, key, account))
        .collect()
}

/// Fetch a domain registry and one of its v2 records together.
async fn fetch_owner_and_record<R: RpcTransport + ?Sized>(
    rpc: &R,
    domain: &str,
    record: Record,
) -> Result<(Pubkey, Option<RecordState>)> {
    let domain_key = get_domain_key(domain, None)?.address;
    let record_key = get_record_v2_key(domain, record)?;
    let mut accounts =
        expect_len(rpc.fetch_accounts(&[domain_key, record_key]).await?, 2)?.into_iter();

    let registry = accounts
        .next()
        .flatten()
        .ok_or_else(|| SnsError::DomainDoesNotExist(domain.to_string()))?;
    let owner = NameRegistryState::deserialize(&registry.data)?.owner;
    let state = accounts
        .next()
        .flatten()
        .map(|account| RecordState::deserialize(&account.data))
        .transpose()?;
    Ok((owner, state))
}

/// Whether a v2 record was validated by the current domain owner.
/// `false` when the record does not exist.
#[cfg_attr(feature = "tracing", tracing::instrument(skip(rpc), fields(record = %record)))]
pub async fn verify_staleness<R: RpcTransport + ?Sized>(
    rpc: &R,
    domain: &str,
    record: Record,
) -> Result<bool> {
    let (owner, state) = fetch_owner_and_record(rpc, domain, record).await?;
    Ok(state.is_some_and(|state| verification::verify_staleness(&owner, &state)))
}

/// Whether the right of association of a v2 record was signed by `verifier`.
/// `false` when the record does not exist.
#[cfg_attr(feature = "tracing", tracing::instrument(skip(rpc, verifier), fields(record = %record)))]
pub async fn verify_right_of_association<R: RpcTransport + ?Sized>(
    rpc: &R,
    domain: &str,
    record: Record,
    verifier: &[u8],
) -> Result<bool> {
    let key = get_record_v2_key(domain, record)?;
    let Some(account) = rpc.fetch_account(&key).await? else {
        return Ok(false);
    };
    let state = RecordState::deserialize(&account.data)?;
    Ok(verification::verify_right_of_association(
        &state, record, verifier,
    ))
}

/// Classify a v2 record against the current domain owner. `None` when the
/// record does not exist; a missing domain is an error.
#[cfg_attr(feature = "tracing", tracing::instrument(skip(rpc), fields(record = %record)))]
pub async fn check_record_v2<R: RpcTransport + ?Sized>(
    rpc: &R,
    domain: &str,
    record: Record,
) -> Result<Option<RecordValidity>> {
    let (owner, state) = fetch_owner_and_record(rpc, domain, record).await?;
    let validity = state.map(|state| record_validity(record, &state, &owner));
    #[cfg(feature = "tracing")]
    if let Some(validity) = validity {
        tracing::debug!(?validity, "checked record");
    }
    Ok(validity)
}
