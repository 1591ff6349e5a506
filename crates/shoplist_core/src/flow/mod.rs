//! Transient dialog flows that produce store mutations.
//!
//! # Responsibility
//! - Hold draft field values while an add or edit dialog is open.
//! - Resolve a draft into exactly one store mutation on confirm.
//!
//! # Invariants
//! - Cancel never touches the store.
//! - Quantity text is coerced on every change, not on confirm.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod add_flow;
pub mod edit_flow;

pub type FlowResult<T> = Result<T, FlowError>;

/// Which dialog flow an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowKind {
    Add,
    Edit,
}

impl FlowKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Edit => "edit",
        }
    }
}

/// Error for draft operations on a flow that is not open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowError {
    NotOpen(FlowKind),
}

impl Display for FlowError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotOpen(kind) => write!(f, "{} dialog is not open", kind.as_str()),
        }
    }
}

impl Error for FlowError {}
