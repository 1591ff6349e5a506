//! Core state logic for the shopping list screen.
//! This crate is the single source of truth for list invariants.

pub mod flow;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use flow::add_flow::{AddFlow, AddFlowState};
pub use flow::edit_flow::{EditFlow, EditFlowState};
pub use flow::{FlowError, FlowKind, FlowResult};
pub use logging::{
    default_log_level, init_logging, init_logging_with, logging_status, LogConfig, LoggingError,
};
pub use model::item::{parse_quantity, ItemDraft, ItemId, ShoppingItem, DEFAULT_QUANTITY};
pub use repo::item_store::{
    ItemRepository, ItemSnapshot, ItemStore, ListPresenter, RepoError, RepoResult,
    SubscriptionId,
};
pub use service::screen_service::{
    Intent, IntentOutcome, ScreenError, ScreenResult, ShoppingListScreen,
};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
