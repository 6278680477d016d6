//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware, dispatch)
//!     → request.rs (request ID)
//!     → path == "/" ? management.rs (route reads/writes)
//!                   : routing → upstream forwarder
//!     → response.rs (relay upstream response, strip hop-by-hop headers)
//!     → Send to client
//! ```

pub mod management;
pub mod request;
pub mod response;
pub mod server;

pub use request::{RequestId, RequestIdExt, RequestIdLayer, X_REQUEST_ID};
pub use server::{AppState, HttpServer};
