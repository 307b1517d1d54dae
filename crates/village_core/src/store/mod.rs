//! In-memory Domain Store and its repository seam.
//!
//! # Responsibility
//! - Own the four entity collections for one session.
//! - Expose prepend-on-create mutations and the medication change hook.
//!
//! # Invariants
//! - Each successful mutation installs a new collection `Arc`
//!   (copy-on-write); readers compare handles with `Arc::ptr_eq`.
//! - Store mutations never fail. Unknown medication ids are a silent no-op.
//! - Nothing is ever deleted or edited after creation.

pub mod domain_store;
pub mod seed;
