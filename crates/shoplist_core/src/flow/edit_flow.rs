//! Edit dialog flow: `Inactive -> Active(target) -> Inactive`.

use crate::flow::{FlowError, FlowKind, FlowResult};
use crate::model::item::{parse_quantity, ItemDraft, ItemId, ShoppingItem};
use crate::repo::item_store::{ItemRepository, RepoError};
use log::{debug, warn};

/// Edit flow state. Only one target can be active at a time.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum EditFlowState {
    #[default]
    Inactive,
    Active {
        target: ShoppingItem,
        draft: ItemDraft,
    },
}

/// Draft holder for mutating exactly one existing item.
#[derive(Debug, Clone, Default)]
pub struct EditFlow {
    state: EditFlowState,
}

impl EditFlow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &EditFlowState {
        &self.state
    }

    pub fn is_active(&self) -> bool {
        matches!(self.state, EditFlowState::Active { .. })
    }

    /// Item being edited, as it was when the dialog opened.
    pub fn target(&self) -> Option<&ShoppingItem> {
        match &self.state {
            EditFlowState::Active { target, .. } => Some(target),
            EditFlowState::Inactive => None,
        }
    }

    pub fn target_id(&self) -> Option<ItemId> {
        self.target().map(|target| target.id)
    }

    /// Opens the dialog seeded from `item`.
    ///
    /// An already active edit is retargeted and its draft discarded.
    pub fn begin(&mut self, item: &ShoppingItem) {
        if let Some(previous) = self.target_id() {
            debug!(
                "event=edit_retarget module=flow status=ok from_item_id={previous} to_item_id={}",
                item.id
            );
        }
        self.state = EditFlowState::Active {
            target: item.clone(),
            draft: item.to_draft(),
        };
        debug!("event=edit_begin module=flow status=ok item_id={}", item.id);
    }

    pub fn draft(&self) -> Option<&ItemDraft> {
        match &self.state {
            EditFlowState::Active { draft, .. } => Some(draft),
            EditFlowState::Inactive => None,
        }
    }

    pub fn set_title(&mut self, title: impl Into<String>) -> FlowResult<()> {
        self.draft_mut()?.title = title.into();
        Ok(())
    }

    pub fn set_description(&mut self, description: impl Into<String>) -> FlowResult<()> {
        self.draft_mut()?.description = description.into();
        Ok(())
    }

    pub fn set_quantity_text(&mut self, text: &str) -> FlowResult<()> {
        self.draft_mut()?.quantity = parse_quantity(text);
        Ok(())
    }

    pub fn quantity_text(&self) -> Option<String> {
        self.draft().map(|draft| draft.quantity.to_string())
    }

    /// Replaces the target in `repo` with the draft values and deactivates.
    ///
    /// Returns `Ok(None)` when the target is no longer stored; the collection
    /// is left unchanged in that case.
    pub fn confirm<R>(&mut self, repo: &mut R) -> FlowResult<Option<ShoppingItem>>
    where
        R: ItemRepository + ?Sized,
    {
        let (target, draft) = match std::mem::take(&mut self.state) {
            EditFlowState::Active { target, draft } => (target, draft),
            EditFlowState::Inactive => return Err(FlowError::NotOpen(FlowKind::Edit)),
        };

        match repo.replace(target.id, draft.title, draft.description, draft.quantity) {
            Ok(updated) => {
                debug!(
                    "event=edit_confirm module=flow status=ok item_id={}",
                    updated.id
                );
                Ok(Some(updated))
            }
            Err(RepoError::NotFound(id)) => {
                warn!("event=edit_confirm module=flow status=skipped reason=target_missing item_id={id}");
                Ok(None)
            }
        }
    }

    /// Discards edits. Returns whether an edit was active.
    pub fn cancel(&mut self) -> bool {
        let was_active = self.is_active();
        self.state = EditFlowState::Inactive;
        if was_active {
            debug!("event=edit_cancel module=flow status=ok");
        }
        was_active
    }

    fn draft_mut(&mut self) -> FlowResult<&mut ItemDraft> {
        match &mut self.state {
            EditFlowState::Active { draft, .. } => Ok(draft),
            EditFlowState::Inactive => Err(FlowError::NotOpen(FlowKind::Edit)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::EditFlow;
    use crate::flow::{FlowError, FlowKind};
    use crate::model::item::ItemDraft;
    use crate::repo::item_store::{ItemRepository, ItemStore};

    fn store_with_milk() -> ItemStore {
        let mut store = ItemStore::new();
        store.add(ItemDraft::from_input("Milk", "2%", "2"));
        store
    }

    #[test]
    fn begin_seeds_fields_from_item() {
        let store = store_with_milk();
        let mut flow = EditFlow::new();
        flow.begin(store.get(1).unwrap());

        let draft = flow.draft().unwrap();
        assert_eq!(draft.title, "Milk");
        assert_eq!(draft.description, "2%");
        assert_eq!(draft.quantity, 2);
        assert_eq!(flow.quantity_text().as_deref(), Some("2"));
    }

    #[test]
    fn confirm_replaces_target_and_deactivates() {
        let mut store = store_with_milk();
        let mut flow = EditFlow::new();
        let target = store.get(1).unwrap().clone();
        flow.begin(&target);
        flow.set_description("Skim").unwrap();
        flow.set_quantity_text("3").unwrap();

        let updated = flow.confirm(&mut store).unwrap().unwrap();
        assert_eq!(updated.id, 1);
        assert_eq!(store.get(1).unwrap().description, "Skim");
        assert_eq!(store.get(1).unwrap().quantity, 3);
        assert!(!flow.is_active());
    }

    #[test]
    fn confirm_for_removed_target_is_silent_noop() {
        let mut store = store_with_milk();
        let mut flow = EditFlow::new();
        let target = store.get(1).unwrap().clone();
        flow.begin(&target);
        store.remove(1).unwrap();

        assert_eq!(flow.confirm(&mut store).unwrap(), None);
        assert!(store.is_empty());
        assert!(!flow.is_active());
    }

    #[test]
    fn inactive_flow_rejects_draft_changes() {
        let mut flow = EditFlow::new();
        assert_eq!(
            flow.set_quantity_text("4").unwrap_err(),
            FlowError::NotOpen(FlowKind::Edit)
        );
        assert!(!flow.cancel());
    }
}
