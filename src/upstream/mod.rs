//! Upstream forwarding subsystem.
//!
//! # Data Flow
//! ```text
//! destination Url + original method/headers/body
//!     → forwarder.rs (strip hop-by-hop, stream body, follow redirects)
//!     → upstream response
//!     → http/response.rs (re-wrap status/headers/body for the client)
//! ```
//!
//! # Design Decisions
//! - One pooled client per process, built at startup
//! - Bodies are streamed in both directions, never buffered
//! - No retries: a failed call is reported to the client immediately

pub mod forwarder;

pub use forwarder::Forwarder;
