//! One-way push of appointments to an external calendar.
//!
//! # Responsibility
//! - Define the provider boundary consumed by the sync adapter.
//! - Convert appointments into the external event shape.
//! - Tally per-appointment successes and failures.
//!
//! # Invariants
//! - Every sync run creates new external events; there is no update,
//!   delete or de-duplication.
//! - One failing appointment never stops the run.

pub mod adapter;
pub mod event;
pub mod google;
pub mod provider;
