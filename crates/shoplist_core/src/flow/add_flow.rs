//! Add dialog flow: `Closed -> Open -> Closed`.

use crate::flow::{FlowError, FlowKind, FlowResult};
use crate::model::item::{parse_quantity, ItemDraft, ShoppingItem};
use crate::repo::item_store::ItemRepository;
use log::debug;

/// Add flow state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AddFlowState {
    #[default]
    Closed,
    Open(ItemDraft),
}

/// Draft holder for creating one new item.
#[derive(Debug, Clone, Default)]
pub struct AddFlow {
    state: AddFlowState,
}

impl AddFlow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &AddFlowState {
        &self.state
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, AddFlowState::Open(_))
    }

    /// Opens the dialog with `("", "", 1)`.
    ///
    /// Already open: the current draft is kept.
    pub fn begin(&mut self) {
        if !self.is_open() {
            self.state = AddFlowState::Open(ItemDraft::default());
            debug!("event=add_begin module=flow status=ok");
        }
    }

    pub fn draft(&self) -> Option<&ItemDraft> {
        match &self.state {
            AddFlowState::Open(draft) => Some(draft),
            AddFlowState::Closed => None,
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

    /// Stores the coerced value of `text`; invalid text resets to 1.
    pub fn set_quantity_text(&mut self, text: &str) -> FlowResult<()> {
        self.draft_mut()?.quantity = parse_quantity(text);
        Ok(())
    }

    /// Text the quantity field shows, which is the coerced value.
    pub fn quantity_text(&self) -> Option<String> {
        self.draft().map(|draft| draft.quantity.to_string())
    }

    /// Adds the current draft to `repo` and closes the dialog.
    pub fn confirm<R>(&mut self, repo: &mut R) -> FlowResult<ShoppingItem>
    where
        R: ItemRepository + ?Sized,
    {
        match std::mem::take(&mut self.state) {
            AddFlowState::Open(draft) => {
                let item = repo.add(draft);
                debug!(
                    "event=add_confirm module=flow status=ok item_id={}",
                    item.id
                );
                Ok(item)
            }
            AddFlowState::Closed => Err(FlowError::NotOpen(FlowKind::Add)),
        }
    }

    /// Discards the draft. Returns whether the dialog was open.
    pub fn cancel(&mut self) -> bool {
        let was_open = self.is_open();
        self.state = AddFlowState::Closed;
        if was_open {
            debug!("event=add_cancel module=flow status=ok");
        }
        was_open
    }

    fn draft_mut(&mut self) -> FlowResult<&mut ItemDraft> {
        match &mut self.state {
            AddFlowState::Open(draft) => Ok(draft),
            AddFlowState::Closed => Err(FlowError::NotOpen(FlowKind::Add)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{AddFlow, AddFlowState};
    use crate::flow::{FlowError, FlowKind};
    use crate::model::item::ItemDraft;
    use crate::repo::item_store::{ItemRepository, ItemStore};

    #[test]
    fn begin_seeds_default_draft() {
        let mut flow = AddFlow::new();
        flow.begin();
        assert_eq!(flow.state(), &AddFlowState::Open(ItemDraft::default()));
        assert_eq!(flow.quantity_text().as_deref(), Some("1"));
    }

    #[test]
    fn invalid_quantity_resets_to_one_not_previous_value() {
        let mut flow = AddFlow::new();
        flow.begin();
        flow.set_quantity_text("5").unwrap();
        flow.set_quantity_text("5x").unwrap();
        assert_eq!(flow.draft().unwrap().quantity, 1);
    }

    #[test]
    fn begin_while_open_keeps_draft() {
        let mut flow = AddFlow::new();
        flow.begin();
        flow.set_title("Apples").unwrap();
        flow.begin();
        assert_eq!(flow.draft().unwrap().title, "Apples");
    }

    #[test]
    fn confirm_adds_and_closes() {
        let mut store = ItemStore::new();
        let mut flow = AddFlow::new();
        flow.begin();
        flow.set_title("Milk").unwrap();
        flow.set_description("2%").unwrap();
        flow.set_quantity_text("2").unwrap();

        let item = flow.confirm(&mut store).unwrap();
        assert_eq!(item.id, 1);
        assert_eq!(item.quantity, 2);
        assert!(!flow.is_open());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn closed_flow_rejects_edits_and_confirm() {
        let mut store = ItemStore::new();
        let mut flow = AddFlow::new();
        assert_eq!(
            flow.set_title("x").unwrap_err(),
            FlowError::NotOpen(FlowKind::Add)
        );
        assert!(flow.confirm(&mut store).is_err());
        assert!(store.is_empty());
        assert!(!flow.cancel());
    }
}
