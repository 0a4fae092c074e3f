use std::collections::HashMap;

use crate::constants::{
    NAME_PROGRAM_ID, NAME_REGISTRY_HEADER_LEN, PARENT_OFFSET, REVERSE_LOOKUP_CLASS,
};
use crate::derivation::{get_domain_key, get_reverse_key_from_key};
use crate::state::{deserialize_reverse, Registrar};
use crate::transport::{DataSlice, ProgramAccountsConfig, RpcFilter, RpcTransport};
use crate::{Pubkey, Result, SnsError};

const CLASS_OFFSET: usize = 64;

/// Names (without the parent) of every subdomain of `parent_domain` that has
/// a reverse lookup account.
///
/// Two concurrent scans: the subdomain accounts themselves (keys only) and
/// the reverse accounts parented by the domain.
#[cfg_attr(feature = "tracing", tracing::instrument(skip(rpc)))]
pub async fn find_subdomains<R: RpcTransport + ?Sized>(
    rpc: &R,
    parent_domain: &str,
) -> Result<Vec<String>> {
    let parent_key = get_domain_key(parent_domain, None)?.address;
    let parent_filter = RpcFilter::Memcmp {
        offset: PARENT_OFFSET,
        bytes: parent_key.to_bytes().to_vec(),
    };

    let reverse_config = ProgramAccountsConfig {
        filters: vec![
            parent_filter.clone(),
            RpcFilter::Memcmp {
                offset: CLASS_OFFSET,
                bytes: REVERSE_LOOKUP_CLASS.to_bytes().to_vec(),
            },
        ],
        ..Default::default()
    };
    let subdomain_config = ProgramAccountsConfig {
        filters: vec![parent_filter],
        data_slice: Some(DataSlice {
            offset: 0,
            length: 0,
        }),
        ..Default::default()
    };

    let (reverses, subdomains) = futures::join!(
        rpc.get_program_accounts(&NAME_PROGRAM_ID, &reverse_config),
        rpc.get_program_accounts(&NAME_PROGRAM_ID, &subdomain_config),
    );
    let (reverses, subdomains) = (reverses?, subdomains?);

    let names: HashMap<Pubkey, String> = reverses
        .into_iter()
        .filter_map(|reverse| {
            let content = reverse.account.data.get(NAME_REGISTRY_HEADER_LEN..)?;
            deserialize_reverse(content, true)
                .ok()
                .map(|name| (reverse.pubkey, name))
        })
        .collect();

    let mut found = Vec::new();
    for subdomain in subdomains {
        let reverse_key = get_reverse_key_from_key(&subdomain.pubkey, Some(&parent_key))?;
        if let Some(name) = names.get(&reverse_key) {
            found.push(name.clone());
        }
    }
    Ok(found)
}

/// Registrar selling subdomains of `domain` through the sub-registrar program.
///
/// Fails with [`SnsError::AccountNotFound`] when the domain has no registrar
/// and [`SnsError::InvalidSubRegistrar`] when the account is not an open one.
#[cfg_attr(feature = "tracing", tracing::instrument(skip(rpc)))]
pub async fn get_sub_registrar_info<R: RpcTransport + ?Sized>(
    rpc: &R,
    domain: &str,
) -> Result<Registrar> {
    let domain_key = get_domain_key(domain, None)?.address;
    let (registrar_key, _) = Registrar::find_key(&domain_key)?;
    let account = rpc
        .fetch_account(&registrar_key)
        .await?
        .ok_or(SnsError::AccountNotFound(registrar_key))?;

    #[cfg(feature = "tracing")]
    tracing::debug!(registrar = %registrar_key, len = account.data.len(), "fetched registrar");

    Registrar::deserialize(&registrar_key, &account.data)
}
