//! Identifier types for tasks, notifications, categories, and priorities.
//!
//! Identifiers are plain integers so they survive the persisted record
//! format unchanged. Equality of every entity is equality of its identifier.

use std::fmt;

macro_rules! integer_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $name(i64);

        impl $name {
            /// Wraps a raw identifier value.
            #[must_use]
            pub const fn new(value: i64) -> Self {
                Self(value)
            }

            /// Returns the raw identifier value.
            #[must_use]
            pub const fn value(self) -> i64 {
                self.0
            }
        }

        impl From<i64> for $name {
            fn from(value: i64) -> Self {
                Self(value)
            }
        }

        impl From<$name> for i64 {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

integer_id!(
    /// Unique identifier for a task.
    TaskId
);

integer_id!(
    /// Unique identifier for a notification.
    ///
    /// Only used for equality; notification ordering follows the owning
    /// task's collection.
    NotificationId
);

integer_id!(
    /// Unique identifier for a category.
    CategoryId
);

integer_id!(
    /// Unique identifier for a priority.
    PriorityId
);

/// Identifier value reserved for the sentinel category and priority.
pub const SENTINEL_ID: i64 = -1;

impl CategoryId {
    /// Identifier of the immutable "Uncategorized" category.
    pub const UNCATEGORIZED: Self = Self(SENTINEL_ID);

    /// Returns `true` for the sentinel "Uncategorized" identifier.
    #[must_use]
    pub const fn is_sentinel(self) -> bool {
        self.0 == SENTINEL_ID
    }
}

impl PriorityId {
    /// Identifier of the immutable "Default" priority.
    pub const DEFAULT: Self = Self(SENTINEL_ID);

    /// Returns `true` for the sentinel "Default" identifier.
    #[must_use]
    pub const fn is_sentinel(self) -> bool {
        self.0 == SENTINEL_ID
    }
}
