//! Item storage contracts and the in-memory store.
//!
//! # Responsibility
//! - Define the use-case oriented contract for the ordered item collection.
//! - Publish immutable snapshots to list presenters after each mutation.
//!
//! # Invariants
//! - The store is the sole owner of the collection and of id assignment.
//! - Repository APIs return semantic errors (`NotFound`) instead of panicking.

pub mod item_store;
