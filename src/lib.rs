//! Key-indexed HTTP forwarding gateway.
//!
//! A route key registered through the management interface (`/?key=K&value=URL`)
//! makes every request to `/K/rest?query` forward to `URL/rest?query`, with the
//! upstream response relayed back unchanged.

pub mod config;
pub mod error;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;
pub mod store;
pub mod upstream;

pub use config::GatewayConfig;
pub use error::GatewayError;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use store::{FileStore, MemoryStore, RouteStore};
