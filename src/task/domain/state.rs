//! Task lifecycle states and the automatic delay rule.

use super::ParseTaskStateError;
use chrono::NaiveDate;
use std::fmt;

/// Task lifecycle state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum TaskState {
    /// Task has been created but work has not started.
    #[default]
    Open,
    /// Task is being worked on.
    InProgress,
    /// Task has been put off.
    Postponed,
    /// Task is done. Completed tasks hold no notifications.
    Completed,
    /// Deadline has passed without completion. Only the automatic rule
    /// produces this state.
    Delayed,
}

impl TaskState {
    /// Every state, in display order.
    pub const ALL: [Self; 5] = [
        Self::Open,
        Self::InProgress,
        Self::Postponed,
        Self::Completed,
        Self::Delayed,
    ];

    /// States an operator may choose explicitly.
    pub const SELECTABLE: [Self; 4] = [
        Self::Open,
        Self::InProgress,
        Self::Postponed,
        Self::Completed,
    ];

    /// Returns the display label, which is also the persisted form.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Open => "Open",
            Self::InProgress => "In Progress",
            Self::Postponed => "Postponed",
            Self::Completed => "Completed",
            Self::Delayed => "Delayed",
        }
    }

    /// Parses a persisted label, mapping unknown or missing text to
    /// [`TaskState::Open`].
    #[must_use]
    pub fn from_label(label: Option<&str>) -> Self {
        label
            .and_then(|text| Self::try_from(text).ok())
            .unwrap_or_default()
    }

    /// Returns the state actually applied when an operator asks for `self`.
    ///
    /// [`TaskState::Delayed`] is not selectable and becomes
    /// [`TaskState::Open`].
    #[must_use]
    pub const fn operator_selected(self) -> Self {
        match self {
            Self::Delayed => Self::Open,
            other => other,
        }
    }

    /// Applies the automatic delay rule for a task due on `deadline`.
    ///
    /// Any state other than [`TaskState::Completed`] becomes
    /// [`TaskState::Delayed`] once `deadline < today`. Reapplying the rule is
    /// a no-op.
    #[must_use]
    pub fn delayed_as_of(self, deadline: NaiveDate, today: NaiveDate) -> Self {
        if self != Self::Completed && deadline < today {
            Self::Delayed
        } else {
            self
        }
    }

    /// Returns `true` for [`TaskState::Completed`].
    #[must_use]
    pub const fn is_completed(self) -> bool {
        matches!(self, Self::Completed)
    }

    /// Returns `true` for [`TaskState::Delayed`].
    #[must_use]
    pub const fn is_delayed(self) -> bool {
        matches!(self, Self::Delayed)
    }
}

impl TryFrom<&str> for TaskState {
    type Error = ParseTaskStateError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let trimmed = value.trim();
        Self::ALL
            .into_iter()
            .find(|state| state.label().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ParseTaskStateError(value.to_owned()))
    }
}

impl fmt::Display for TaskState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
