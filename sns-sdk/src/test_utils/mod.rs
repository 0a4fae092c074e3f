//! Test utilities for SNS lookups.
//!
//! - [`MockRpc`]: an in-memory [`RpcTransport`](crate::transport::RpcTransport)
//!   with helpers that lay out domain, record and reverse lookup accounts
//! - fixtures: deterministic keys and account byte builders
//!
//! ## Usage
//!
//! ```rust,ignore
//! use sns_sdk::config::ResolveConfig;
//! use sns_sdk::non_blocking::resolve;
//! use sns_sdk::test_utils::{keypair_pubkey, test_keypair, MockRpc};
//!
//! let rpc = MockRpc::new();
//! let owner = keypair_pubkey(&test_keypair(1));
//! rpc.register_domain("bonfida", &owner)?;
//!
//! assert_eq!(resolve(&rpc, "bonfida", &ResolveConfig::default()).await?, owner);
//! ```

mod fixtures;
mod mock_rpc;

pub use fixtures::{
    ethereum_pubkey, keypair_pubkey, registry_account, reverse_data, sign_ethereum_roa,
    sol_record_v1_data, test_ethereum_key, test_keypair, zero_padded,
};
pub use mock_rpc::MockRpc;
