//! Shopping item domain model.
//!
//! # Responsibility
//! - Define the canonical record shown as one row/card of the list.
//! - Define the id-less draft shape produced by add/edit flows.
//! - Coerce free-form quantity text into an integer.
//!
//! # Invariants
//! - `id` is assigned once by the store and never changes afterwards.
//! - `title` and `description` may be empty; no validation is applied.
//! - Unparseable quantity text always falls back to `DEFAULT_QUANTITY`.

use serde::{Deserialize, Serialize};

/// Store-assigned identifier, unique for the lifetime of one store.
///
/// Values start at 1 and are never reused, even after deletion.
pub type ItemId = u64;

/// Quantity used for fresh drafts and for any unparseable quantity input.
pub const DEFAULT_QUANTITY: i32 = 1;

/// One shopping list entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ShoppingItem {
    pub id: ItemId,
    pub title: String,
    pub description: String,
    pub quantity: i32,
}

impl ShoppingItem {
    /// Builds the stored record for `draft` under a store-assigned `id`.
    pub fn from_draft(id: ItemId, draft: ItemDraft) -> Self {
        Self {
            id,
            title: draft.title,
            description: draft.description,
            quantity: draft.quantity,
        }
    }

    /// Returns a replacement record that keeps this item's `id`.
    pub fn with_fields(
        &self,
        title: impl Into<String>,
        description: impl Into<String>,
        quantity: i32,
    ) -> Self {
        Self {
            id: self.id,
            title: title.into(),
            description: description.into(),
            quantity,
        }
    }

    /// Returns the editable fields of this item as a draft.
    pub fn to_draft(&self) -> ItemDraft {
        ItemDraft {
            title: self.title.clone(),
            description: self.description.clone(),
            quantity: self.quantity,
        }
    }

    /// Card label for the quantity line, e.g. `Quantity: 3`.
    pub fn quantity_label(&self) -> String {
        format!("Quantity: {}", self.quantity)
    }
}

/// Item fields before the store assigns an identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemDraft {
    pub title: String,
    pub description: String,
    pub quantity: i32,
}

impl ItemDraft {
    /// Builds a draft, coercing `quantity_text` with [`parse_quantity`].
    pub fn from_input(
        title: impl Into<String>,
        description: impl Into<String>,
        quantity_text: &str,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            quantity: parse_quantity(quantity_text),
        }
    }
}

impl Default for ItemDraft {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            quantity: DEFAULT_QUANTITY,
        }
    }
}

/// Parses quantity text typed into a numeric field.
///
/// Accepts an optional leading `+`/`-` followed by ASCII digits that fit in
/// an `i32`. Anything else (empty text, a bare sign, letters, whitespace,
/// overflow) yields `DEFAULT_QUANTITY` rather than the previous value.
pub fn parse_quantity(text: &str) -> i32 {
    text.parse::<i32>().unwrap_or(DEFAULT_QUANTITY)
}

#[cfg(test)]
mod tests {
    use super::{parse_quantity, ItemDraft, ShoppingItem, DEFAULT_QUANTITY};

    #[test]
    fn parse_quantity_falls_back_to_default_for_non_numeric_text() {
        assert_eq!(parse_quantity("abc"), DEFAULT_QUANTITY);
        assert_eq!(parse_quantity(""), DEFAULT_QUANTITY);
        assert_eq!(parse_quantity("-"), DEFAULT_QUANTITY);
        assert_eq!(parse_quantity(" 4"), DEFAULT_QUANTITY);
        assert_eq!(parse_quantity("99999999999"), DEFAULT_QUANTITY);
    }

    #[test]
    fn parse_quantity_accepts_signed_and_zero_padded_integers() {
        assert_eq!(parse_quantity("7"), 7);
        assert_eq!(parse_quantity("007"), 7);
        assert_eq!(parse_quantity("+12"), 12);
        assert_eq!(parse_quantity("-3"), -3);
        assert_eq!(parse_quantity("0"), 0);
    }

    #[test]
    fn default_draft_is_empty_with_quantity_one() {
        let draft = ItemDraft::default();
        assert!(draft.title.is_empty());
        assert!(draft.description.is_empty());
        assert_eq!(draft.quantity, 1);
    }

    #[test]
    fn with_fields_keeps_identity() {
        let item = ShoppingItem::from_draft(4, ItemDraft::from_input("Milk", "2%", "2"));
        let edited = item.with_fields("Milk", "Skim", 3);
        assert_eq!(edited.id, 4);
        assert_eq!(edited.description, "Skim");
        assert_eq!(edited.quantity, 3);
        assert_eq!(item.description, "2%");
    }

    #[test]
    fn item_serializes_with_plain_field_names() {
        let item = ShoppingItem::from_draft(1, ItemDraft::from_input("Bread", "", "1"));
        let json = serde_json::to_value(&item).expect("item should serialize");
        assert_eq!(json["id"], 1);
        assert_eq!(json["title"], "Bread");
        assert_eq!(json["quantity"], 1);
        assert_eq!(item.quantity_label(), "Quantity: 1");
    }
}
