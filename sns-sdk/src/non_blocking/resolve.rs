use futures::future::join_all;

use crate::config::ResolveConfig;
use crate::derivation::{get_domain_key, get_record_key, get_record_v2_key};
use crate::record::{deserialize_record, Record};
use crate::state::{NameRegistryState, RecordState};
use crate::transport::RpcTransport;
use crate::verification::{verify_right_of_association, verify_staleness};
use crate::{Pubkey, Result, SnsError};

/// Fetch and parse a name registry account.
#[cfg_attr(feature = "tracing", tracing::instrument(skip(rpc), fields(key = %key)))]
pub async fn retrieve_registry<R: RpcTransport + ?Sized>(
    rpc: &R,
    key: &Pubkey,
) -> Result<NameRegistryState> {
    let account = rpc
        .fetch_account(key)
        .await?
        .ok_or(SnsError::AccountNotFound(*key))?;
    NameRegistryState::deserialize(&account.data)
}

/// Resolve a domain to the address funds should be sent to.
///
/// In order of preference:
///
/// 1. a `SOL` v2 record validated by the current owner and signed by the key
///    it contains,
/// 2. a `SOL` v1 record signed by the current owner,
/// 3. the domain owner, refused with [`SnsError::PdaOwnerNotAllowed`] when it
///    is a program-derived address unless [`ResolveConfig::allow_pda`] is set.
///
/// The registry and both records are fetched in a single request.
#[cfg_attr(feature = "tracing", tracing::instrument(skip(rpc, config)))]
pub async fn resolve<R: RpcTransport + ?Sized>(
    rpc: &R,
    domain: &str,
    config: &ResolveConfig,
) -> Result<Pubkey> {
    let domain_key = get_domain_key(domain, None)?.address;
    let sol_v1_key = get_record_key(domain, Record::Sol)?;
    let sol_v2_key = get_record_v2_key(domain, Record::Sol)?;

    let accounts = rpc
        .fetch_accounts(&[domain_key, sol_v1_key, sol_v2_key])
        .await?;
    let [registry, sol_v1, sol_v2]: [_; 3] = accounts.try_into().map_err(|accounts: Vec<_>| {
        SnsError::Transport(format!("expected 3 accounts, got {}", accounts.len()))
    })?;

    let registry = registry.ok_or_else(|| SnsError::DomainDoesNotExist(domain.to_string()))?;
    let registry = NameRegistryState::deserialize(&registry.data)?;

    if let Some(account) = sol_v2 {
        let state = RecordState::deserialize(&account.data)?;
        let fresh = verify_staleness(&registry.owner, &state);
        let signed = verify_right_of_association(&state, Record::Sol, &state.content);
        if fresh && signed && state.content.len() == 32 {
            return Pubkey::try_from(state.content.as_slice())
                .map_err(|err| SnsError::InvalidPubkey(err.to_string()));
        }
        #[cfg(feature = "tracing")]
        tracing::debug!(fresh, signed, "ignoring SOL v2 record");
    }

    if let Some(account) = sol_v1 {
        // v1 SOL records are signed by the domain owner, not the record owner
        let record = NameRegistryState::deserialize(&account.data)?;
        let signed_by_owner = NameRegistryState {
            owner: registry.owner,
            ..record
        };
        if let Some(target) = deserialize_record(&signed_by_owner, Record::Sol, &sol_v1_key)
            .map_err(|err| err.with_domain(domain))?
        {
            return Ok(target.parse()?);
        }
    }

    if !config.allow_pda && !registry.owner.is_on_curve() {
        return Err(SnsError::PdaOwnerNotAllowed(registry.owner));
    }
    Ok(registry.owner)
}

/// Resolve several domains concurrently. Results are in input order.
pub async fn resolve_many<R: RpcTransport + ?Sized, S: AsRef<str>>(
    rpc: &R,
    domains: &[S],
    config: &ResolveConfig,
) -> Vec<Result<Pubkey>> {
    join_all(
        domains
            .iter()
            .map(|domain| resolve(rpc, domain.as_ref(), config)),
    )
    .await
}
