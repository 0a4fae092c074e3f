//! Solana Name Service client library.
//!
//! The crate stays stateless: key derivation, record codecs and
//! right-of-association checks are pure functions, and every network read
//! goes through the [`transport::RpcTransport`] trait supplied by the caller.
//!
//! # Features
//!
//! - **Key derivation**: domain, subdomain, record and reverse lookup keys
//! - **Record codecs**: v1 and v2 record content for every record type
//! - **Right of association**: Ed25519 and secp256k1 proofs, staleness checks
//! - **Async lookups**: resolution, records, reverse lookups over any transport
//!
//! # Example
//!
//! ```
//! use sns_sdk::{
//!     deserialize_record_v2_content, get_domain_key, serialize_record_v2_content, Record,
//! };
//!
//! let key = get_domain_key("dex.bonfida.sol", None).unwrap();
//! assert!(key.is_subdomain);
//! assert_eq!(key.address.to_string(), "HoFfFXqFHAC8RP3duuQNzag1ieUwJRBv1HtRNiWFq4Qu");
//!
//! let bytes = serialize_record_v2_content("2001:db8:0:0:0:0:0:1", Record::Aaaa).unwrap();
//! assert_eq!(deserialize_record_v2_content(&bytes, Record::Aaaa).unwrap(), "2001:db8::1");
//! ```

pub mod config;
pub mod constants;
pub mod derivation;
pub mod errors;
pub mod non_blocking;
pub mod prelude;
pub mod record;
pub mod state;
pub mod transport;
pub mod validation;
pub mod verification;

/// Test utilities: an in-memory transport and account fixtures.
///
/// This module is only available with the `test-utils` feature or in test builds.
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use derivation::{
    derive_address, get_domain_key, get_domain_key_sync, hash_name, DomainKeyResult, RecordVersion,
};
pub use errors::{CodecError, SnsError, SnsErrorCode};
pub use solana_pubkey::{pubkey, Pubkey, PUBKEY_BYTES};
pub use record::{
    deserialize_record, deserialize_record_v2_content, serialize_record,
    serialize_record_v2_content, serialize_sol_record, Record,
};
pub use verification::{verify_ethereum_roa, verify_sol_record_signature, verify_staleness};

/// Common result alias for SNS operations.
pub type Result<T> = std::result::Result<T, SnsError>;
