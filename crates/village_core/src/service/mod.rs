//! Core use-case services.
//!
//! # Responsibility
//! - Turn raw form input into entities and hand them to the store.
//! - Keep UI layers decoupled from store details.

pub mod assistant;
pub mod hub_service;
