//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming request path + query
//!     → parser.rs   ("/key/rest" → key, "/rest")
//!     → RouteStore  (key → target base URL)
//!     → query.rs    (original query → ordered pairs)
//!     → rewriter.rs (target + suffix + pairs → destination Url)
//! ```
//!
//! # Design Decisions
//! - Pure string transforms: no state, no I/O
//! - Keys are matched verbatim, in their percent-encoded path form
//! - Query pairs keep their original order and duplicates

pub mod parser;
pub mod query;
pub mod rewriter;

pub use parser::{parse_path, ParsedPath};
pub use query::QueryParams;
pub use rewriter::rewrite;
