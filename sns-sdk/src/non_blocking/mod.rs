//! Async lookups over an [`RpcTransport`](crate::transport::RpcTransport).
//!
//! Each function derives the keys it needs, fetches them (batched where
//! possible) and decodes the accounts. Nothing is retried or cached; a
//! transport error is returned as is.

mod record;
mod resolve;
mod reverse;
mod subdomain;

pub use record::{
    check_record_v2, get_record, get_record_v2, get_records, get_records_v2,
    verify_right_of_association, verify_staleness, RecordResult,
};
pub use resolve::{resolve, resolve_many, retrieve_registry};
pub use reverse::{get_all_domains, reverse_lookup, reverse_lookup_many};
pub use subdomain::{find_subdomains, get_sub_registrar_info};
