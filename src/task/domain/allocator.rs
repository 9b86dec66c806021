//! Per-kind identifier allocation.
//!
//! Each store owns one [`IdentityAllocator`]. Identifiers are handed out from
//! a watermark that starts at zero and only moves forward, so a released
//! identifier is never reused. When entities are restored from storage the
//! watermark is reconciled against the restored identifier.


/// Entity kinds with independent identifier spaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    /// Task identifiers.
    Task,
    /// Notification identifiers.
    Notification,
    /// Category identifiers.
    Category,
    /// Priority identifiers.
    Priority,
}

/// Monotonic identifier allocator with one watermark per [`EntityKind`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdentityAllocator {
    task: i64,
    notification: i64,
    category: i64,
    priority: i64,
}

impl IdentityAllocator {
    /// Creates an allocator with every watermark at zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the next unused identifier for `kind` and advances its
    /// watermark.
    pub fn next(&mut self, kind: EntityKind) -> i64 {
        let watermark = self.watermark_mut(kind);
        let allocated = *watermark;
        *watermark = allocated.saturating_add(1);
        allocated
    }

    /// Raises the watermark for `kind` past an identifier restored from
    /// storage.
    ///
    /// Sentinel identifiers (`-1`) never move the watermark.
    pub fn reconcile(&mut self, kind: EntityKind, seen_id: i64) {
        let watermark = self.watermark_mut(kind);
        *watermark = (*watermark).max(seen_id.saturating_add(1));
    }

    /// Returns the identifier the next call to [`Self::next`] will produce.
    #[must_use]
    pub const fn watermark(&self, kind: EntityKind) -> i64 {
        match kind {
            EntityKind::Task => self.task,
            EntityKind::Notification => self.notification,
            EntityKind::Category => self.category,
            EntityKind::Priority => self.priority,
        }
    }

    const fn watermark_mut(&mut self, kind: EntityKind) -> &mut i64 {
        match kind {
            EntityKind::Task => &mut self.task,
            EntityKind::Notification => &mut self.notification,
            EntityKind::Category => &mut self.category,
            EntityKind::Priority => &mut self.priority,
        }
    }
}

impl From<super::CatalogKind> for EntityKind {
    fn from(kind: super::CatalogKind) -> Self {
        match kind {
            super::CatalogKind::Category => Self::Category,
            super::CatalogKind::Priority => Self::Priority,
        }
    }
}
