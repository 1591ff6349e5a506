//! Shopping list screen controller.
//!
//! # Responsibility
//! - Own the item store and the add/edit flows for one screen lifetime.
//! - Apply one intent at a time, each running to completion.
//!
//! # Invariants
//! - At most one edit target is active.
//! - Cancel intents never mutate the collection.
//! - Deleting or editing an item that is no longer stored is a no-op.

use crate::flow::add_flow::AddFlow;
use crate::flow::edit_flow::EditFlow;
use crate::flow::{FlowError, FlowKind};
use crate::model::item::{ItemId, ShoppingItem};
use crate::repo::item_store::{
    ItemRepository, ItemSnapshot, ItemStore, ListPresenter, RepoError, SubscriptionId,
};
use log::{debug, info};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Discrete user intent raised by the list presenter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    BeginAdd,
    ConfirmAdd {
        title: String,
        description: String,
        quantity_text: String,
    },
    CancelAdd,
    BeginEdit(ItemId),
    ConfirmEdit {
        id: ItemId,
        title: String,
        description: String,
        quantity_text: String,
    },
    CancelEdit,
    Delete(ItemId),
}

impl Intent {
    /// Stable label used in log lines.
    pub fn label(&self) -> &'static str {
        match self {
            Self::BeginAdd => "begin_add",
            Self::ConfirmAdd { .. } => "confirm_add",
            Self::CancelAdd => "cancel_add",
            Self::BeginEdit(_) => "begin_edit",
            Self::ConfirmEdit { .. } => "confirm_edit",
            Self::CancelEdit => "cancel_edit",
            Self::Delete(_) => "delete",
        }
    }
}

/// Result of applying one intent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntentOutcome {
    AddOpened,
    EditOpened(ShoppingItem),
    Added(ShoppingItem),
    Edited(ShoppingItem),
    Removed(ShoppingItem),
    Cancelled,
    /// Nothing changed (missing target, or nothing to cancel).
    Unchanged,
}

impl IntentOutcome {
    /// Whether the item collection changed.
    pub fn is_mutation(&self) -> bool {
        matches!(self, Self::Added(_) | Self::Edited(_) | Self::Removed(_))
    }
}

/// Screen controller error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenError {
    /// Draft operation on a closed dialog.
    Flow(FlowError),
    /// Edit requested for an id that is not displayed.
    ItemNotFound(ItemId),
    /// Confirm targets a different item than the open edit dialog.
    EditTargetMismatch { active: ItemId, requested: ItemId },
}

impl Display for ScreenError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Flow(err) => write!(f, "{err}"),
            Self::ItemNotFound(id) => write!(f, "item not found: {id}"),
            Self::EditTargetMismatch { active, requested } => write!(
                f,
                "edit dialog is open for item {active}, not item {requested}"
            ),
        }
    }
}

impl Error for ScreenError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Flow(err) => Some(err),
            _ => None,
        }
    }
}

impl From<FlowError> for ScreenError {
    fn from(value: FlowError) -> Self {
        Self::Flow(value)
    }
}

impl From<RepoError> for ScreenError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound(id) => Self::ItemNotFound(id),
        }
    }
}

pub type ScreenResult<T> = Result<T, ScreenError>;

/// State holder for one shopping list screen.
pub struct ShoppingListScreen<R: ItemRepository = ItemStore> {
    repo: R,
    add_flow: AddFlow,
    edit_flow: EditFlow,
}

impl ShoppingListScreen<ItemStore> {
    /// Creates a screen over an empty in-memory store.
    pub fn new() -> Self {
        Self::with_repository(ItemStore::new())
    }
}

impl Default for ShoppingListScreen<ItemStore> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: ItemRepository> ShoppingListScreen<R> {
    /// Creates a screen using the provided repository implementation.
    pub fn with_repository(repo: R) -> Self {
        Self {
            repo,
            add_flow: AddFlow::new(),
            edit_flow: EditFlow::new(),
        }
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// Current ordered collection.
    pub fn items(&self) -> ItemSnapshot {
        self.repo.snapshot()
    }

    pub fn add_flow(&self) -> &AddFlow {
        &self.add_flow
    }

    pub fn edit_flow(&self) -> &EditFlow {
        &self.edit_flow
    }

    pub fn subscribe(&mut self, presenter: impl ListPresenter + 'static) -> SubscriptionId {
        self.repo.subscribe(Box::new(presenter))
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.repo.unsubscribe(id)
    }

    /// Applies one intent.
    pub fn dispatch(&mut self, intent: Intent) -> ScreenResult<IntentOutcome> {
        let label = intent.label();
        let outcome = match intent {
            Intent::BeginAdd => Ok(self.begin_add()),
            Intent::ConfirmAdd {
                title,
                description,
                quantity_text,
            } => self.confirm_add(title, description, &quantity_text),
            Intent::CancelAdd => Ok(self.cancel_add()),
            Intent::BeginEdit(id) => self.begin_edit(id),
            Intent::ConfirmEdit {
                id,
                title,
                description,
                quantity_text,
            } => self.confirm_edit(id, title, description, &quantity_text),
            Intent::CancelEdit => Ok(self.cancel_edit()),
            Intent::Delete(id) => Ok(self.delete(id)),
        };

        match &outcome {
            Ok(result) => debug!(
                "event=intent module=screen status=ok intent={label} mutated={}",
                result.is_mutation()
            ),
            Err(err) => info!("event=intent module=screen status=rejected intent={label} error={err}"),
        }
        outcome
    }

    pub fn begin_add(&mut self) -> IntentOutcome {
        self.add_flow.begin();
        IntentOutcome::AddOpened
    }

    pub fn set_add_title(&mut self, title: impl Into<String>) -> ScreenResult<()> {
        Ok(self.add_flow.set_title(title)?)
    }

    pub fn set_add_description(&mut self, description: impl Into<String>) -> ScreenResult<()> {
        Ok(self.add_flow.set_description(description)?)
    }

    pub fn set_add_quantity_text(&mut self, text: &str) -> ScreenResult<()> {
        Ok(self.add_flow.set_quantity_text(text)?)
    }

    /// Overwrites the add draft with the given field values and commits it.
    pub fn confirm_add(
        &mut self,
        title: impl Into<String>,
        description: impl Into<String>,
        quantity_text: &str,
    ) -> ScreenResult<IntentOutcome> {
        self.add_flow.set_title(title)?;
        self.add_flow.set_description(description)?;
        self.add_flow.set_quantity_text(quantity_text)?;
        self.submit_add()
    }

    /// Commits the add draft as currently held by the dialog.
    pub fn submit_add(&mut self) -> ScreenResult<IntentOutcome> {
        let item = self.add_flow.confirm(&mut self.repo)?;
        Ok(IntentOutcome::Added(item))
    }

    pub fn cancel_add(&mut self) -> IntentOutcome {
        if self.add_flow.cancel() {
            IntentOutcome::Cancelled
        } else {
            IntentOutcome::Unchanged
        }
    }

    /// Opens the edit dialog for the stored item with `id`.
    pub fn begin_edit(&mut self, id: ItemId) -> ScreenResult<IntentOutcome> {
        let item = self
            .repo
            .get(id)
            .cloned()
            .ok_or(ScreenError::ItemNotFound(id))?;
        self.edit_flow.begin(&item);
        Ok(IntentOutcome::EditOpened(item))
    }

    pub fn set_edit_title(&mut self, title: impl Into<String>) -> ScreenResult<()> {
        Ok(self.edit_flow.set_title(title)?)
    }

    pub fn set_edit_description(&mut self, description: impl Into<String>) -> ScreenResult<()> {
        Ok(self.edit_flow.set_description(description)?)
    }

    pub fn set_edit_quantity_text(&mut self, text: &str) -> ScreenResult<()> {
        Ok(self.edit_flow.set_quantity_text(text)?)
    }

    /// Overwrites the edit draft for `id` and commits it.
    pub fn confirm_edit(
        &mut self,
        id: ItemId,
        title: impl Into<String>,
        description: impl Into<String>,
        quantity_text: &str,
    ) -> ScreenResult<IntentOutcome> {
        self.ensure_edit_target(id)?;
        self.edit_flow.set_title(title)?;
        self.edit_flow.set_description(description)?;
        self.edit_flow.set_quantity_text(quantity_text)?;
        self.submit_edit()
    }

    /// Commits the edit draft as currently held by the dialog.
    pub fn submit_edit(&mut self) -> ScreenResult<IntentOutcome> {
        match self.edit_flow.confirm(&mut self.repo)? {
            Some(updated) => Ok(IntentOutcome::Edited(updated)),
            None => Ok(IntentOutcome::Unchanged),
        }
    }

    pub fn cancel_edit(&mut self) -> IntentOutcome {
        if self.edit_flow.cancel() {
            IntentOutcome::Cancelled
        } else {
            IntentOutcome::Unchanged
        }
    }

    /// Removes the item with `id`; a missing id leaves the list unchanged.
    pub fn delete(&mut self, id: ItemId) -> IntentOutcome {
        match self.repo.remove(id) {
            Ok(removed) => IntentOutcome::Removed(removed),
            Err(RepoError::NotFound(_)) => IntentOutcome::Unchanged,
        }
    }

    /// Discards all screen state: items, id counter, dialogs and presenters.
    pub fn dispose(&mut self) {
        self.add_flow.cancel();
        self.edit_flow.cancel();
        self.repo.reset();
        info!("event=screen_dispose module=screen status=ok");
    }

    fn ensure_edit_target(&self, requested: ItemId) -> ScreenResult<()> {
        match self.edit_flow.target_id() {
            Some(active) if active != requested => {
                Err(ScreenError::EditTargetMismatch { active, requested })
            }
            Some(_) => Ok(()),
            None => Err(ScreenError::Flow(FlowError::NotOpen(FlowKind::Edit))),
        }
    }
}
