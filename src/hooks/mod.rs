//! Pluggable per-call hooks.
//!
//! Two seams shape the pipeline's verdict:
//! - Extraction: find and decode the credential carried by a call
//! - Revocation: decide whether an otherwise valid token is withdrawn

mod extract;
mod revoke;

pub use extract::*;
pub use revoke::*;
