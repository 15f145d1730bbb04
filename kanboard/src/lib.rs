//! Kanboard JSON-RPC client and the compound operations built on it.
//!
//! ## Layers
//!
//! - [`config`]: resolves `KANBOARD_*` settings from a dotenv file and the
//!   process environment (file wins).
//! - [`client`]: one authenticated JSON-RPC 2.0 call per [`KanboardClient::call`].
//! - [`ops`]: multi-call actions with a per-step fatal/advisory policy.
//!
//! Every call is awaited before the next one is issued; nothing here runs
//! requests concurrently.

pub mod client;
pub mod config;
pub mod ops;
pub mod protocol;

pub use client::ClientError;
pub use client::KanboardClient;
pub use config::ConfigError;
pub use config::KanboardConfig;
pub use protocol::CreatedId;
pub use protocol::RpcErrorObject;
pub use protocol::RpcRequest;
pub use protocol::RpcResponse;
