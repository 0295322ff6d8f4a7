use super::clock::{Clock, SystemClock};
use super::filter::{Filters, filter_and_sort};
use super::types::{Item, ItemDraft, ItemId, ItemPatch};
use super::validator::{ValidationError, validate_item};

use chrono::{DateTime, TimeDelta, Utc};
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

struct StoredItem {
    item: Item,
    /// Write sequence number of the last create/update.
    revision: u64,
}

#[derive(Default)]
struct StoreInner {
    items: HashMap<ItemId, StoredItem>,
    last_revision: u64,
}

impl StoreInner {
    fn next_revision(&mut self) -> u64 {
        self.last_revision += 1;
        self.last_revision
    }
}

/// Process-lifetime, in-memory owner of every item.
///
/// The whole map sits behind one lock: writes are exclusive, reads shared, so
/// no caller ever sees a partially applied operation. Callers always receive
/// clones.
pub struct ItemStore {
    inner: RwLock<StoreInner>,
    clock: Arc<dyn Clock>,
}

impl ItemStore {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            inner: RwLock::new(StoreInner::default()),
            clock,
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, StoreInner> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, StoreInner> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn list(&self, filters: &Filters) -> Vec<Item> {
        let inner = self.read();
        filter_and_sort(
            inner
                .items
                .values()
                .map(|stored| (stored.revision, &stored.item)),
            filters,
        )
    }

    pub fn get(&self, id: &str) -> Option<Item> {
        self.read().items.get(id).map(|stored| stored.item.clone())
    }

    pub fn create(&self, patch: ItemPatch) -> Result<Item, ValidationError> {
        let description_absent = patch.description.is_none();
        let mut draft = ItemDraft::default().apply(patch);
        if description_absent {
            draft.description = Some(String::new());
        }

        let mut inner = self.write();

        let mut id = ItemId::new();
        while inner.items.contains_key(&id) {
            id = ItemId::new();
        }

        let now = self.clock.now();
        let item = commit_draft(draft, id, now, now)?;
        let revision = inner.next_revision();
        inner.items.insert(
            item.id.clone(),
            StoredItem {
                item: item.clone(),
                revision,
            },
        );

        Ok(item)
    }

    /// Returns `Ok(None)` when no item exists at `id`.
    pub fn update(&self, id: &str, patch: ItemPatch) -> Result<Option<Item>, ValidationError> {
        let mut inner = self.write();

        let existing = match inner.items.get(id) {
            Some(stored) => stored.item.clone(),
            None => return Ok(None),
        };

        let draft = ItemDraft::from_item(&existing).apply(patch);

        let now = self.clock.now();
        let updated_at = if now > existing.updated_at {
            now
        } else {
            existing.updated_at + TimeDelta::milliseconds(1)
        };

        let item = commit_draft(draft, existing.id, existing.created_at, updated_at)?;
        let revision = inner.next_revision();
        inner.items.insert(
            item.id.clone(),
            StoredItem {
                item: item.clone(),
                revision,
            },
        );

        Ok(Some(item))
    }

    pub fn delete(&self, id: &str) -> bool {
        self.write().items.remove(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.read().items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for ItemStore {
    fn default() -> Self {
        Self::new()
    }
}

fn commit_draft(
    draft: ItemDraft,
    id: ItemId,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
) -> Result<Item, ValidationError> {
    validate_item(&draft)?;

    let Some(name) = draft.name else {
        return Err(ValidationError::NameRequired);
    };

    Ok(Item {
        id,
        name,
        description: draft.description,
        created_at,
        updated_at,
        extra: draft.extra,
    })
}

/// Pre-populates a fresh store with the two example records the service
/// starts with.
pub fn seed_examples(store: &ItemStore) -> Result<Vec<Item>, ValidationError> {
    let examples = [
        ("Example Item 1", "This is the first example item"),
        ("Example Item 2", "This is the second example item"),
    ];

    examples
        .into_iter()
        .map(|(name, description)| {
            store.create(
                ItemPatch::new()
                    .with_name(name)
                    .with_description(description),
            )
        })
        .collect()
}
