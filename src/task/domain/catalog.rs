//! Categories and priorities: labelled catalog entries referenced by tasks.
//!
//! Both kinds reserve identifier `-1` for an immutable sentinel entry
//! ("Uncategorized" and "Default") that stands in when a task has no
//! user-assigned value.

use super::{CategoryId, PriorityId, SENTINEL_ID, TaskDomainError};
use std::fmt;
use std::hash::{Hash, Hasher};

/// Distinguishes the two catalog kinds in errors and logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CatalogKind {
    /// Task categories.
    Category,
    /// Task priorities.
    Priority,
}

impl CatalogKind {
    /// Returns the lower-case entity name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Category => "category",
            Self::Priority => "priority",
        }
    }

    /// Returns the name of the label field for this kind.
    #[must_use]
    pub const fn label_field(self) -> &'static str {
        match self {
            Self::Category => "category name",
            Self::Priority => "priority level",
        }
    }
}

impl fmt::Display for CatalogKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Behaviour shared by categories and priorities.
pub trait CatalogEntry: Clone + fmt::Debug {
    /// Identifier type of the entry.
    type Id: Copy + Eq + Hash + fmt::Debug + fmt::Display + From<i64> + Into<i64>;

    /// Which catalog the entry belongs to.
    const KIND: CatalogKind;

    /// Label of the sentinel entry.
    const SENTINEL_LABEL: &'static str;

    /// Creates an entry with a validated label.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyLabel`] when the label is blank.
    fn new(id: Self::Id, label: impl Into<String>) -> Result<Self, TaskDomainError>;

    /// Reconstructs an entry from persisted storage without validation.
    fn from_persisted(id: Self::Id, label: String) -> Self;

    /// Returns the entry identifier.
    fn id(&self) -> Self::Id;

    /// Returns the raw identifier value.
    fn raw_id(&self) -> i64;

    /// Returns the label.
    fn label(&self) -> &str;

    /// Replaces the label with an already validated value.
    fn set_label(&mut self, label: String);

    /// Returns the sentinel entry.
    #[must_use]
    fn sentinel() -> Self {
        Self::from_persisted(Self::Id::from(SENTINEL_ID), Self::SENTINEL_LABEL.to_owned())
    }

    /// Returns `true` when this is the sentinel entry.
    fn is_sentinel(&self) -> bool {
        self.raw_id() == SENTINEL_ID
    }
}

/// Validates and trims a catalog label.
///
/// # Errors
///
/// Returns [`TaskDomainError::EmptyLabel`] when the label is blank.
pub fn normalized_label(kind: CatalogKind, label: String) -> Result<String, TaskDomainError> {
    let trimmed = label.trim();
    if trimmed.is_empty() {
        return Err(TaskDomainError::EmptyLabel(kind.label_field()));
    }
    Ok(trimmed.to_owned())
}

/// A named grouping of tasks.
#[derive(Debug, Clone)]
pub struct Category {
    id: CategoryId,
    name: String,
}

impl Category {
    /// Canonical name of the sentinel category.
    pub const UNCATEGORIZED: &'static str = "Uncategorized";

    /// Returns the category name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl CatalogEntry for Category {
    type Id = CategoryId;

    const KIND: CatalogKind = CatalogKind::Category;
    const SENTINEL_LABEL: &'static str = Self::UNCATEGORIZED;

    fn new(id: CategoryId, label: impl Into<String>) -> Result<Self, TaskDomainError> {
        let name = normalized_label(Self::KIND, label.into())?;
        Ok(Self { id, name })
    }

    fn from_persisted(id: CategoryId, label: String) -> Self {
        Self { id, name: label }
    }

    fn id(&self) -> CategoryId {
        self.id
    }

    fn raw_id(&self) -> i64 {
        self.id.value()
    }

    fn label(&self) -> &str {
        &self.name
    }

    fn set_label(&mut self, label: String) {
        self.name = label;
    }
}

/// An importance level assigned to tasks.
#[derive(Debug, Clone)]
pub struct Priority {
    id: PriorityId,
    level: String,
}

impl Priority {
    /// Canonical level of the sentinel priority.
    pub const DEFAULT: &'static str = "Default";

    /// Returns the priority level.
    #[must_use]
    pub fn level(&self) -> &str {
        &self.level
    }
}

impl CatalogEntry for Priority {
    type Id = PriorityId;

    const KIND: CatalogKind = CatalogKind::Priority;
    const SENTINEL_LABEL: &'static str = Self::DEFAULT;

    fn new(id: PriorityId, label: impl Into<String>) -> Result<Self, TaskDomainError> {
        let level = normalized_label(Self::KIND, label.into())?;
        Ok(Self { id, level })
    }

    fn from_persisted(id: PriorityId, label: String) -> Self {
        Self { id, level: label }
    }

    fn id(&self) -> PriorityId {
        self.id
    }

    fn raw_id(&self) -> i64 {
        self.id.value()
    }

    fn label(&self) -> &str {
        &self.level
    }

    fn set_label(&mut self, label: String) {
        self.level = label;
    }
}

macro_rules! identity_equality {
    ($entry:ty) => {
        impl PartialEq for $entry {
            fn eq(&self, other: &Self) -> bool {
                self.id == other.id
            }
        }

        impl Eq for $entry {}

        impl Hash for $entry {
            fn hash<H: Hasher>(&self, state: &mut H) {
                self.id.hash(state);
            }
        }
    };
}

identity_equality!(Category);
identity_equality!(Priority);
