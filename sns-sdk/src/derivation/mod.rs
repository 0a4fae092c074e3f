//! Address derivation.
//!
//! Everything here is pure: the same name, parent and class always produce
//! the same key, byte for byte, as every other SNS client.

mod domain;
mod pda;

pub use domain::{
    get_domain_key, get_domain_key_sync, get_record_key, get_record_v2_key, get_reverse_key,
    get_reverse_key_from_key, DomainKeyResult, RecordVersion,
};
pub use pda::{
    bytes_are_curve_point, create_program_address, derive_address, find_program_address,
    hash_name,
};
