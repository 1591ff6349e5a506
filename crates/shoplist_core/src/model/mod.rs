//! Shopping list domain model.
//!
//! # Responsibility
//! - Define the item record rendered by the list screen.
//! - Own the quantity coercion policy shared by add and edit flows.
//!
//! # Invariants
//! - Every stored item is identified by an `ItemId` assigned by the store.
//! - Items are value records; edits produce a replacement, never a mutation.

pub mod item;
