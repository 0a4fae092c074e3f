//! Ledger access.
//!
//! [`RpcTransport`] is the only seam between the SDK and the network. The
//! JSON-RPC implementation is behind the `http-rpc` feature; tests use
//! the in-memory `MockRpc` from `test_utils`.

#[cfg(feature = "http-rpc")]
mod http;
mod traits;

#[cfg(feature = "http-rpc")]
pub use http::HttpRpcClient;
pub use traits::{
    AccountEncoding, AccountInfo, DataSlice, ProgramAccount, ProgramAccountsConfig, RpcFilter,
    RpcTransport,
};
