//! Scicity Common - Shared types for the Science City guide service
//!
//! Wire request/response schemas, the venue record, and the prompt
//! templates used by both the daemon and the CLI client.

pub mod prompts;
pub mod rpc;
pub mod venue;

pub use prompts::VisitPreferences;
pub use rpc::*;
pub use venue::VenueRecord;

/// Crate version, embedded at build time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
