//! Screen-level use-case services.
//!
//! # Responsibility
//! - Route discrete UI intents into flows and the item store.
//! - Keep presenter/FFI layers decoupled from store and flow internals.

pub mod screen_service;
