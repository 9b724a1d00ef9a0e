//! Item name resolution for transactions

use std::borrow::Cow;
use std::collections::HashMap;

use crate::models::{Item, Transaction};

/// `item id -> name` table built from the item collection
#[derive(Debug, Clone, Default)]
pub struct ItemNameLookup {
    names: HashMap<String, String>,
}

impl ItemNameLookup {
    pub fn from_items(items: &[Item]) -> Self {
        Self {
            names: items
                .iter()
                .map(|item| (item.id.clone(), item.name.clone()))
                .collect(),
        }
    }

    pub fn get(&self, item_id: &str) -> Option<&str> {
        self.names.get(item_id).map(String::as_str)
    }

    /// Name for the transaction's item: the lookup table first, then the name the
    /// backend embedded in the record, then an `Item <id>` placeholder.
    pub fn resolve<'a>(&'a self, tx: &'a Transaction) -> Cow<'a, str> {
        if let Some(name) = self.get(&tx.item_id) {
            return Cow::Borrowed(name);
        }
        match tx.item_name.as_deref() {
            Some(name) => Cow::Borrowed(name),
            None => Cow::Owned(format!("Item {}", tx.item_id)),
        }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
