//! Record v2 content codec.
//!
//! v2 accounts store exactly the encoded content with its length in the
//! header, so there is no padding to trim and no legacy form to accept.

use super::Record;
use crate::{Result, SnsError};

/// Encode record text as record v2 content.
///
/// `SOL` content is the raw 32-byte key.
pub fn serialize_record_v2_content(content: &str, record: Record) -> Result<Vec<u8>> {
    (record.encoding().encode)(content).map_err(|source| SnsError::invalid_content(record, source))
}

/// Decode record v2 content. Fixed-size families reject any other length.
pub fn deserialize_record_v2_content(content: &[u8], record: Record) -> Result<String> {
    (record.encoding().decode)(content).map_err(|err| SnsError::invalid_data(record, err.to_string()))
}
