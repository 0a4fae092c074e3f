//! Prelude module for convenient imports.
//!
//! ```rust,ignore
//! use sns_sdk::prelude::*;
//! ```

// Core types
pub use crate::{DomainKeyResult, Pubkey, Record, RecordVersion};

// Error handling
pub use crate::errors::{CodecError, SnsError, SnsErrorCode};
pub use crate::Result;

// Derivation
pub use crate::derivation::{
    get_domain_key, get_domain_key_sync, get_record_key, get_record_v2_key, get_reverse_key,
};

// Codecs
pub use crate::record::{
    deserialize_record, deserialize_record_v2_content, serialize_record,
    serialize_record_v2_content, serialize_sol_record,
};

// Accounts
pub use crate::state::{NameRegistryState, RecordState, Validation};

// Right of association
pub use crate::verification::{
    verify_ethereum_roa, verify_sol_record_signature, verify_staleness, RecordValidity,
};

// Transport and configuration
pub use crate::config::{Commitment, ResolveConfig, RpcConfig};
pub use crate::transport::{AccountInfo, RpcTransport};

#[cfg(feature = "http-rpc")]
pub use crate::transport::HttpRpcClient;
