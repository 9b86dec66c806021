//! Category and priority stores.
//!
//! Both catalogs share one implementation, [`CatalogStore`], parameterised by
//! the entry type. Each store always holds its sentinel entry at identifier
//! `-1`, which can be neither renamed nor removed.

use super::{TaskServiceError, TaskServiceResult};
use crate::task::domain::{
    CatalogEntry, CatalogKind, Category, EntityKind, IdentityAllocator, Priority, normalized_label,
};

/// Store of task categories.
pub type CategoryStore = CatalogStore<Category>;

/// Store of task priorities.
pub type PriorityStore = CatalogStore<Priority>;

/// In-memory collection of labelled catalog entries with unique labels.
#[derive(Debug, Clone)]
pub struct CatalogStore<E: CatalogEntry> {
    entries: Vec<E>,
    ids: IdentityAllocator,
}

impl<E: CatalogEntry> Default for CatalogStore<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: CatalogEntry> CatalogStore<E> {
    /// Creates a store holding only the sentinel entry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: vec![E::sentinel()],
            ids: IdentityAllocator::new(),
        }
    }

    /// Replaces the collection with persisted entries.
    ///
    /// The sentinel is kept only when stored with its canonical label and is
    /// synthesised otherwise; any other entry claiming the sentinel
    /// identifier is discarded. Entries repeating an identifier or a label
    /// already restored are dropped. The sentinel is always listed first.
    ///
    /// Returns the number of entries held after loading.
    pub fn load(&mut self, records: Vec<E>) -> usize {
        let mut entries = vec![E::sentinel()];

        for record in records {
            if record.is_sentinel() {
                if record.label() != E::SENTINEL_LABEL {
                    tracing::warn!(
                        kind = %E::KIND,
                        label = record.label(),
                        "discarding entry that claims the reserved identifier"
                    );
                }
                continue;
            }
            let clashes = entries.iter().any(|existing| {
                existing.id() == record.id() || labels_match(existing.label(), record.label())
            });
            if clashes {
                tracing::warn!(
                    kind = %E::KIND,
                    id = %record.id(),
                    label = record.label(),
                    "discarding duplicate catalog entry"
                );
                continue;
            }
            self.ids.reconcile(Self::entity_kind(), record.raw_id());
            entries.push(record);
        }

        self.entries = entries;
        tracing::info!(kind = %E::KIND, count = self.entries.len(), "restored catalog");
        self.entries.len()
    }

    /// Adds an entry with a fresh identifier.
    ///
    /// # Errors
    ///
    /// Returns a validation error when the label is blank or
    /// [`TaskServiceError::DuplicateLabel`] when another entry uses it.
    pub fn add(&mut self, label: impl Into<String>) -> TaskServiceResult<E> {
        let label = normalized_label(E::KIND, label.into())?;
        self.ensure_label_free(&label, None)?;

        let id = E::Id::from(self.ids.next(Self::entity_kind()));
        let entry = E::new(id, label)?;
        tracing::debug!(kind = %E::KIND, %id, label = entry.label(), "added catalog entry");
        self.entries.push(entry.clone());
        Ok(entry)
    }

    /// Changes the label of an entry.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::ProtectedEntry`] for the sentinel,
    /// [`TaskServiceError::CatalogEntryNotFound`] for an unknown identifier,
    /// or the same validation failures as [`Self::add`]. Renaming an entry to
    /// its current label succeeds.
    pub fn rename(&mut self, id: E::Id, label: impl Into<String>) -> TaskServiceResult<E> {
        let label = normalized_label(E::KIND, label.into())?;
        let position = self.position_of_mutable(id)?;
        self.ensure_label_free(&label, Some(id))?;

        let entry = self
            .entries
            .get_mut(position)
            .ok_or_else(|| Self::not_found(id))?;
        entry.set_label(label);
        tracing::debug!(kind = %E::KIND, %id, label = entry.label(), "renamed catalog entry");
        Ok(entry.clone())
    }

    /// Removes an entry. Cascading onto tasks is the caller's concern.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::ProtectedEntry`] for the sentinel or
    /// [`TaskServiceError::CatalogEntryNotFound`] for an unknown identifier.
    pub fn remove(&mut self, id: E::Id) -> TaskServiceResult<E> {
        let position = self.position_of_mutable(id)?;
        let entry = self.entries.remove(position);
        tracing::debug!(kind = %E::KIND, %id, label = entry.label(), "removed catalog entry");
        Ok(entry)
    }

    /// Returns the entry with the given identifier.
    #[must_use]
    pub fn find(&self, id: E::Id) -> Option<&E> {
        self.entries.iter().find(|entry| entry.id() == id)
    }

    /// Returns every entry, sentinel first, then insertion order.
    #[must_use]
    pub fn find_all(&self) -> &[E] {
        &self.entries
    }

    /// Returns `true` when an entry has the identifier.
    #[must_use]
    pub fn contains(&self, id: E::Id) -> bool {
        self.find(id).is_some()
    }

    /// Returns the label of the entry with the given identifier.
    #[must_use]
    pub fn label_of(&self, id: E::Id) -> Option<&str> {
        self.find(id).map(E::label)
    }

    /// Returns the identifier of the entry with the given label, compared
    /// after trimming.
    #[must_use]
    pub fn id_of(&self, label: &str) -> Option<E::Id> {
        self.entries
            .iter()
            .find(|entry| labels_match(entry.label(), label))
            .map(E::id)
    }

    /// Returns the identifier allocator.
    #[must_use]
    pub const fn allocator(&self) -> &IdentityAllocator {
        &self.ids
    }

    /// Catalog kind served by this store.
    #[must_use]
    pub const fn kind(&self) -> CatalogKind {
        E::KIND
    }

    fn position_of_mutable(&self, id: E::Id) -> TaskServiceResult<usize> {
        let position = self
            .entries
            .iter()
            .position(|entry| entry.id() == id)
            .ok_or_else(|| Self::not_found(id))?;
        if self
            .entries
            .get(position)
            .is_some_and(E::is_sentinel)
        {
            return Err(TaskServiceError::ProtectedEntry { kind: E::KIND });
        }
        Ok(position)
    }

    fn ensure_label_free(&self, label: &str, except: Option<E::Id>) -> TaskServiceResult<()> {
        let taken = self
            .entries
            .iter()
            .filter(|entry| except.is_none_or(|id| entry.id() != id))
            .any(|entry| labels_match(entry.label(), label));
        if taken {
            return Err(TaskServiceError::DuplicateLabel {
                kind: E::KIND,
                label: label.to_owned(),
            });
        }
        Ok(())
    }

    fn not_found(id: E::Id) -> TaskServiceError {
        TaskServiceError::CatalogEntryNotFound {
            kind: E::KIND,
            id: id.into(),
        }
    }

    fn entity_kind() -> EntityKind {
        EntityKind::from(E::KIND)
    }
}

fn labels_match(left: &str, right: &str) -> bool {
    left.trim() == right.trim()
}
