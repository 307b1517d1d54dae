//! Calendar projections over the Domain Store.
//!
//! # Responsibility
//! - Merge all entity collections into one date-sorted event list.
//! - Build month grids for calendar rendering.
//!
//! # Invariants
//! - Events are recomputed on every read and never written back.
//! - Ordering uses raw ISO date string comparison.

pub mod aggregator;
pub mod grid;
