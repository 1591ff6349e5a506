//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose the shopping list screen intents to Dart via FRB.
//! - Return the current list snapshot with every response so the UI can
//!   re-render without a second call.
//!
//! # Invariants
//! - Exported functions must not panic across FFI boundary.
//! - One screen state lives per process until `dispose_screen`.

use log::warn;
use shoplist_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    IntentOutcome, ItemId, ScreenResult, ShoppingItem, ShoppingListScreen,
};
use std::sync::{Mutex, MutexGuard, OnceLock};

static SCREEN: OnceLock<Mutex<ShoppingListScreen>> = OnceLock::new();

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}

/// One list row as rendered by the Flutter card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemView {
    pub id: u64,
    pub title: String,
    pub description: String,
    pub quantity: i32,
    /// Preformatted `Quantity: N` line.
    pub quantity_label: String,
}

/// Draft values shown in an open add/edit dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftView {
    pub title: String,
    pub description: String,
    /// Coerced quantity as the text field should display it.
    pub quantity_text: String,
}

/// Response envelope for every screen intent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemActionResponse {
    /// Whether the intent was accepted.
    pub ok: bool,
    /// Item created, edited or removed by this intent, if any.
    pub item_id: Option<u64>,
    /// Human-readable response message for diagnostics/UI.
    pub message: String,
    /// Full ordered list after the intent.
    pub items: Vec<ItemView>,
    /// Open dialog draft after the intent, if any.
    pub draft: Option<DraftView>,
}

/// Returns the current ordered list.
#[flutter_rust_bridge::frb(sync)]
pub fn list_items() -> Vec<ItemView> {
    let screen = lock_screen();
    to_item_views(&screen)
}

/// Opens the add dialog with empty fields and quantity 1.
#[flutter_rust_bridge::frb(sync)]
pub fn begin_add() -> ItemActionResponse {
    run_intent("begin_add", |screen| Ok(screen.begin_add()))
}

/// Applies add-dialog field changes; `quantity_text` is coerced.
#[flutter_rust_bridge::frb(sync)]
pub fn update_add_draft(
    title: String,
    description: String,
    quantity_text: String,
) -> ItemActionResponse {
    run_intent("update_add_draft", |screen| {
        screen.set_add_title(title)?;
        screen.set_add_description(description)?;
        screen.set_add_quantity_text(&quantity_text)?;
        Ok(IntentOutcome::Unchanged)
    })
}

/// Commits the add dialog with the given field values.
#[flutter_rust_bridge::frb(sync)]
pub fn confirm_add(title: String, description: String, quantity_text: String) -> ItemActionResponse {
    run_intent("confirm_add", |screen| {
        screen.confirm_add(title, description, &quantity_text)
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn cancel_add() -> ItemActionResponse {
    run_intent("cancel_add", |screen| Ok(screen.cancel_add()))
}

/// Opens the edit dialog seeded from item `id`.
#[flutter_rust_bridge::frb(sync)]
pub fn begin_edit(id: u64) -> ItemActionResponse {
    run_intent("begin_edit", |screen| screen.begin_edit(id))
}

#[flutter_rust_bridge::frb(sync)]
pub fn update_edit_draft(
    title: String,
    description: String,
    quantity_text: String,
) -> ItemActionResponse {
    run_intent("update_edit_draft", |screen| {
        screen.set_edit_title(title)?;
        screen.set_edit_description(description)?;
        screen.set_edit_quantity_text(&quantity_text)?;
        Ok(IntentOutcome::Unchanged)
    })
}

/// Commits the edit dialog for item `id`.
///
/// Succeeds without changes when the item was deleted meanwhile.
#[flutter_rust_bridge::frb(sync)]
pub fn confirm_edit(
    id: u64,
    title: String,
    description: String,
    quantity_text: String,
) -> ItemActionResponse {
    run_intent("confirm_edit", |screen| {
        screen.confirm_edit(id, title, description, &quantity_text)
    })
}

#[flutter_rust_bridge::frb(sync)]
pub fn cancel_edit() -> ItemActionResponse {
    run_intent("cancel_edit", |screen| Ok(screen.cancel_edit()))
}

/// Deletes item `id`; unknown ids succeed without changes.
#[flutter_rust_bridge::frb(sync)]
pub fn delete_item(id: u64) -> ItemActionResponse {
    run_intent("delete_item", |screen| Ok(screen.delete(id)))
}

/// Ends the screen lifetime; the next call starts from an empty list.
#[flutter_rust_bridge::frb(sync)]
pub fn dispose_screen() -> ItemActionResponse {
    run_intent("dispose_screen", |screen| {
        screen.dispose();
        Ok(IntentOutcome::Unchanged)
    })
}

fn lock_screen() -> MutexGuard<'static, ShoppingListScreen> {
    let screen = SCREEN.get_or_init(|| Mutex::new(ShoppingListScreen::new()));
    // Intents run to completion, so a poisoned lock still holds a whole state.
    screen.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn run_intent(
    name: &str,
    f: impl FnOnce(&mut ShoppingListScreen) -> ScreenResult<IntentOutcome>,
) -> ItemActionResponse {
    let mut screen = lock_screen();
    let result = f(&mut *screen);
    let items = to_item_views(&screen);
    let draft = current_draft(&screen);

    match result {
        Ok(outcome) => ItemActionResponse {
            ok: true,
            item_id: outcome_item_id(&outcome),
            message: outcome_message(&outcome).to_string(),
            items,
            draft,
        },
        Err(err) => {
            warn!("event=ffi_intent module=ffi status=error intent={name} error={err}");
            ItemActionResponse {
                ok: false,
                item_id: None,
                message: format!("{name} failed: {err}"),
                items,
                draft,
            }
        }
    }
}

fn to_item_views(screen: &ShoppingListScreen) -> Vec<ItemView> {
    screen.items().iter().map(to_item_view).collect()
}

fn to_item_view(item: &ShoppingItem) -> ItemView {
    ItemView {
        id: item.id,
        title: item.title.clone(),
        description: item.description.clone(),
        quantity: item.quantity,
        quantity_label: item.quantity_label(),
    }
}

fn current_draft(screen: &ShoppingListScreen) -> Option<DraftView> {
    let draft = screen
        .edit_flow()
        .draft()
        .or_else(|| screen.add_flow().draft())?;
    Some(DraftView {
        title: draft.title.clone(),
        description: draft.description.clone(),
        quantity_text: draft.quantity.to_string(),
    })
}

fn outcome_item_id(outcome: &IntentOutcome) -> Option<ItemId> {
    match outcome {
        IntentOutcome::EditOpened(item)
        | IntentOutcome::Added(item)
        | IntentOutcome::Edited(item)
        | IntentOutcome::Removed(item) => Some(item.id),
        IntentOutcome::AddOpened | IntentOutcome::Cancelled | IntentOutcome::Unchanged => None,
    }
}

fn outcome_message(outcome: &IntentOutcome) -> &'static str {
    match outcome {
        IntentOutcome::AddOpened => "Add dialog opened.",
        IntentOutcome::EditOpened(_) => "Edit dialog opened.",
        IntentOutcome::Added(_) => "Item added.",
        IntentOutcome::Edited(_) => "Item updated.",
        IntentOutcome::Removed(_) => "Item deleted.",
        IntentOutcome::Cancelled => "Dialog cancelled.",
        IntentOutcome::Unchanged => "No changes.",
    }
}

#[cfg(test)]
mod tests {
    use super::{
        begin_add, begin_edit, cancel_add, confirm_add, confirm_edit, core_version, delete_item,
        dispose_screen, init_logging, list_items, ping, update_add_draft,
    };
    use std::sync::{Mutex, MutexGuard};

    // Tests share the process-wide screen.
    static SCREEN_GUARD: Mutex<()> = Mutex::new(());

    fn fresh_screen() -> MutexGuard<'static, ()> {
        let guard = SCREEN_GUARD
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        dispose_screen();
        guard
    }

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }

    #[test]
    fn init_logging_rejects_empty_log_dir() {
        let error = init_logging("info".to_string(), String::new());
        assert!(!error.is_empty());
    }

    #[test]
    fn init_logging_rejects_unsupported_level() {
        let error = init_logging("verbose".to_string(), "/tmp/logs".to_string());
        assert!(error.contains("unsupported log level"));
    }

    #[test]
    fn add_edit_delete_round_through_ffi() {
        let _guard = fresh_screen();

        assert!(begin_add().ok);
        let added = confirm_add("Milk".to_string(), "2%".to_string(), "2".to_string());
        assert!(added.ok, "{}", added.message);
        assert_eq!(added.item_id, Some(1));
        assert_eq!(added.items[0].quantity_label, "Quantity: 2");
        assert!(added.draft.is_none());

        let opened = begin_edit(1);
        assert!(opened.ok);
        assert_eq!(opened.draft.as_ref().map(|d| d.description.as_str()), Some("2%"));

        let edited = confirm_edit(1, "Milk".to_string(), "Skim".to_string(), "3".to_string());
        assert!(edited.ok, "{}", edited.message);
        assert_eq!(edited.items[0].description, "Skim");
        assert_eq!(edited.items[0].quantity, 3);

        let deleted = delete_item(1);
        assert_eq!(deleted.item_id, Some(1));
        assert!(deleted.items.is_empty());

        let missing = delete_item(1);
        assert!(missing.ok);
        assert_eq!(missing.item_id, None);
    }

    #[test]
    fn add_draft_shows_coerced_quantity_and_cancel_keeps_list() {
        let _guard = fresh_screen();

        begin_add();
        let draft = update_add_draft("Eggs".to_string(), String::new(), "twelve".to_string());
        assert!(draft.ok);
        assert_eq!(
            draft.draft.map(|d| d.quantity_text),
            Some("1".to_string())
        );

        let cancelled = cancel_add();
        assert!(cancelled.ok);
        assert!(cancelled.items.is_empty());
        assert!(list_items().is_empty());
    }

    #[test]
    fn confirm_without_dialog_reports_failure() {
        let _guard = fresh_screen();

        let response = confirm_add("Milk".to_string(), String::new(), "1".to_string());
        assert!(!response.ok);
        assert!(response.message.contains("not open"));

        let response = begin_edit(9);
        assert!(!response.ok);
        assert!(response.message.contains("item not found"));
    }
}
