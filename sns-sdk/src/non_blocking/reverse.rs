use crate::constants::{NAME_PROGRAM_ID, OWNER_OFFSET, PARENT_OFFSET, ROOT_DOMAIN_ACCOUNT};
use crate::derivation::get_reverse_key_from_key;
use crate::state::{deserialize_reverse, NameRegistryState};
use crate::transport::{DataSlice, ProgramAccountsConfig, RpcFilter, RpcTransport};
use crate::{Pubkey, Result, SnsError};

/// Name of a domain from its account key.
///
/// Pass the parent domain key for subdomains; their reverse accounts are
/// parented and their names carry a leading NUL, which is removed.
#[cfg_attr(feature = "tracing", tracing::instrument(skip(rpc), fields(domain_key = %domain_key)))]
pub async fn reverse_lookup<R: RpcTransport + ?Sized>(
    rpc: &R,
    domain_key: &Pubkey,
    parent: Option<&Pubkey>,
) -> Result<String> {
    let reverse_key = get_reverse_key_from_key(domain_key, parent)?;
    let account = rpc
        .fetch_account(&reverse_key)
        .await?
        .ok_or(SnsError::AccountNotFound(reverse_key))?;
    let registry = NameRegistryState::deserialize(&account.data)?;
    deserialize_reverse(&registry.data, parent.is_some())
}

/// Names of several root domains in one request. Results follow the order
/// of `domain_keys`; missing or unreadable reverse accounts are `None`.
#[cfg_attr(feature = "tracing", tracing::instrument(skip(rpc, domain_keys), fields(count = domain_keys.len())))]
pub async fn reverse_lookup_many<R: RpcTransport + ?Sized>(
    rpc: &R,
    domain_keys: &[Pubkey],
) -> Result<Vec<Option<String>>> {
    let reverse_keys = domain_keys
        .iter()
        .map(|key| get_reverse_key_from_key(key, None))
        .collect::<Result<Vec<_>>>()?;
    let accounts = rpc.fetch_accounts(&reverse_keys).await?;
    if accounts.len() != reverse_keys.len() {
        return Err(SnsError::Transport(format!(
            "expected {} accounts, got {}",
            reverse_keys.len(),
            accounts.len()
        )));
    }

    Ok(accounts
        .into_iter()
        .zip(reverse_keys)
        .map(|(account, _reverse_key)| {
            let account = account?;
            let parsed = NameRegistryState::deserialize(&account.data)
                .and_then(|registry| deserialize_reverse(&registry.data, false));
            match parsed {
                Ok(name) => Some(name),
                Err(_err) => {
                    #[cfg(feature = "tracing")]
                    tracing::warn!(reverse_key = %_reverse_key, error = %_err, "unreadable reverse lookup account");
                    None
                }
            }
        })
        .collect())
}

/// Keys of every root `.sol` domain owned by `owner`.
#[cfg_attr(feature = "tracing", tracing::instrument(skip(rpc), fields(owner = %owner)))]
pub async fn get_all_domains<R: RpcTransport + ?Sized>(rpc: &R, owner: &Pubkey) -> Result<Vec<Pubkey>> {
    let config = ProgramAccountsConfig {
        filters: vec![
            RpcFilter::Memcmp {
                offset: OWNER_OFFSET,
                bytes: owner.to_bytes().to_vec(),
            },
            RpcFilter::Memcmp {
                offset: PARENT_OFFSET,
                bytes: ROOT_DOMAIN_ACCOUNT.to_bytes().to_vec(),
            },
        ],
        data_slice: Some(DataSlice {
            offset: 0,
            length: 0,
        }),
        ..Default::default()
    };
    let accounts = rpc.get_program_accounts(&NAME_PROGRAM_ID, &config).await?;
    Ok(accounts.into_iter().map(|account| account.pubkey).collect())
}
