//! On-chain account layouts.

mod record_v2;
mod registry;
mod reverse;
mod sub_registrar;

pub use record_v2::{RecordHeader, RecordState, Validation};
pub use registry::NameRegistryState;
pub use reverse::{deserialize_reverse, serialize_reverse, ReverseLookupState};
pub use sub_registrar::{Price, Registrar, SubRegistrarTag};

use crate::SnsError;

fn layout_error(account: &str, err: borsh::io::Error) -> SnsError {
    SnsError::InvalidAccountData(format!("{account}: {err}"))
}
