//! Item repository contract and in-memory implementation.
//!
//! # Responsibility
//! - Keep the ordered shopping list (insertion order is display order).
//! - Assign monotonic ids and publish copy-on-write snapshots.
//!
//! # Invariants
//! - `next_id` starts at 1, increments on every add and is never reused.
//! - `replace` keeps the position of every entry, including the edited one.
//! - A failed `remove`/`replace` leaves the collection untouched and does
//!   not notify presenters.
//! - Presenters only ever observe complete snapshots.

use crate::model::item::{ItemDraft, ItemId, ShoppingItem};
use log::{debug, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

const FIRST_ITEM_ID: ItemId = 1;

/// Immutable view of the ordered collection at one point in time.
pub type ItemSnapshot = Arc<[ShoppingItem]>;

/// Handle returned by [`ItemRepository::subscribe`].
pub type SubscriptionId = u64;

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for item lookups by identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepoError {
    NotFound(ItemId),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(id) => write!(f, "item not found: {id}"),
        }
    }
}

impl Error for RepoError {}

/// Rendering collaborator that re-draws the list from a snapshot.
///
/// Any `FnMut(&ItemSnapshot) + Send` closure is a presenter.
pub trait ListPresenter: Send {
    fn present(&mut self, snapshot: &ItemSnapshot);
}

impl<F> ListPresenter for F
where
    F: FnMut(&ItemSnapshot) + Send,
{
    fn present(&mut self, snapshot: &ItemSnapshot) {
        self(snapshot)
    }
}

/// Repository interface for the shopping list collection.
pub trait ItemRepository {
    /// Stores `draft` at the end of the list under the next id.
    fn add(&mut self, draft: ItemDraft) -> ShoppingItem;
    /// Removes the item whose id matches and returns it.
    fn remove(&mut self, id: ItemId) -> RepoResult<ShoppingItem>;
    /// Swaps the item with `id` for a replacement record at the same position.
    fn replace(
        &mut self,
        id: ItemId,
        title: String,
        description: String,
        quantity: i32,
    ) -> RepoResult<ShoppingItem>;
    fn get(&self, id: ItemId) -> Option<&ShoppingItem>;
    fn snapshot(&self) -> ItemSnapshot;
    fn len(&self) -> usize;
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
    /// Registers a presenter and immediately presents the current snapshot.
    fn subscribe(&mut self, presenter: Box<dyn ListPresenter>) -> SubscriptionId;
    /// Returns `false` when `id` is not an active subscription.
    fn unsubscribe(&mut self, id: SubscriptionId) -> bool;
    /// Drops all items and presenters and reseeds the id counter.
    fn reset(&mut self);
}

/// In-memory ordered item store.
pub struct ItemStore {
    items: ItemSnapshot,
    next_id: ItemId,
    presenters: Vec<(SubscriptionId, Box<dyn ListPresenter>)>,
    next_subscription: SubscriptionId,
}

impl ItemStore {
    /// Creates an empty store with the id counter seeded at 1.
    pub fn new() -> Self {
        Self {
            items: Arc::from(Vec::new()),
            next_id: FIRST_ITEM_ID,
            presenters: Vec::new(),
            next_subscription: 1,
        }
    }

    /// Id the next successful `add` will assign.
    pub fn next_id(&self) -> ItemId {
        self.next_id
    }

    fn position(&self, id: ItemId) -> Option<usize> {
        self.items.iter().position(|item| item.id == id)
    }

    fn publish(&mut self, items: Vec<ShoppingItem>) {
        self.items = Arc::from(items);
        for (_, presenter) in &mut self.presenters {
            presenter.present(&self.items);
        }
    }
}

impl Default for ItemStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ItemRepository for ItemStore {
    fn add(&mut self, draft: ItemDraft) -> ShoppingItem {
        let item = ShoppingItem::from_draft(self.next_id, draft);
        self.next_id += 1;

        let mut items = self.items.to_vec();
        items.push(item.clone());
        self.publish(items);

        debug!(
            "event=item_add module=store status=ok item_id={} count={}",
            item.id,
            self.items.len()
        );
        item
    }

    fn remove(&mut self, id: ItemId) -> RepoResult<ShoppingItem> {
        let Some(index) = self.position(id) else {
            warn!("event=item_remove module=store status=not_found item_id={id}");
            return Err(RepoError::NotFound(id));
        };

        let mut items = self.items.to_vec();
        let removed = items.remove(index);
        self.publish(items);

        debug!(
            "event=item_remove module=store status=ok item_id={id} count={}",
            self.items.len()
        );
        Ok(removed)
    }

    fn replace(
        &mut self,
        id: ItemId,
        title: String,
        description: String,
        quantity: i32,
    ) -> RepoResult<ShoppingItem> {
        let Some(index) = self.position(id) else {
            warn!("event=item_replace module=store status=not_found item_id={id}");
            return Err(RepoError::NotFound(id));
        };

        let updated = self.items[index].with_fields(title, description, quantity);
        let items = self
            .items
            .iter()
            .enumerate()
            .map(|(at, item)| {
                if at == index {
                    updated.clone()
                } else {
                    item.clone()
                }
            })
            .collect::<Vec<_>>();
        self.publish(items);

        debug!("event=item_replace module=store status=ok item_id={id}");
        Ok(updated)
    }

    fn get(&self, id: ItemId) -> Option<&ShoppingItem> {
        self.items.iter().find(|item| item.id == id)
    }

    fn snapshot(&self) -> ItemSnapshot {
        Arc::clone(&self.items)
    }

    fn len(&self) -> usize {
        self.items.len()
    }

    fn subscribe(&mut self, mut presenter: Box<dyn ListPresenter>) -> SubscriptionId {
        let id = self.next_subscription;
        self.next_subscription += 1;
        presenter.present(&self.items);
        self.presenters.push((id, presenter));
        debug!("event=presenter_subscribe module=store status=ok subscription_id={id}");
        id
    }

    fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.presenters.len();
        self.presenters.retain(|(subscription, _)| *subscription != id);
        before != self.presenters.len()
    }

    fn reset(&mut self) {
        self.items = Arc::from(Vec::new());
        self.next_id = FIRST_ITEM_ID;
        self.presenters.clear();
        debug!("event=store_reset module=store status=ok");
    }
}
