//! Notification scheduling rules.
//!
//! The valid notification window for a task is `[today, deadline]`. Both ends
//! move: deadlines can be edited and days pass. Nothing here caches a window;
//! every function takes `today` and recomputes from the task as it is now.

use super::{Notification, Task, TaskDomainError};
use chrono::{Days, Months, NaiveDate};
use std::fmt;

/// Fixed lead times relative to a task deadline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotificationPreset {
    /// The day before the deadline.
    OneDayBefore,
    /// Seven days before the deadline.
    OneWeekBefore,
    /// One calendar month before the deadline.
    OneMonthBefore,
}

impl NotificationPreset {
    /// Every preset, in menu order.
    pub const ALL: [Self; 3] = [
        Self::OneDayBefore,
        Self::OneWeekBefore,
        Self::OneMonthBefore,
    ];

    /// Returns the display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::OneDayBefore => "1 Day Before",
            Self::OneWeekBefore => "1 Week Before",
            Self::OneMonthBefore => "1 Month Before",
        }
    }

    /// Parses a display label, ignoring case and surrounding whitespace.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        let trimmed = label.trim();
        Self::ALL
            .into_iter()
            .find(|preset| preset.label().eq_ignore_ascii_case(trimmed))
    }

    /// Computes the reminder date for a task due on `deadline`.
    ///
    /// Month arithmetic clamps to the last day of shorter months, so
    /// `2025-03-31` yields `2025-02-28`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::DateOutOfRange`] if the result would fall
    /// before the earliest representable date.
    pub fn date_for(self, deadline: NaiveDate) -> Result<NaiveDate, TaskDomainError> {
        let computed = match self {
            Self::OneDayBefore => deadline.checked_sub_days(Days::new(1)),
            Self::OneWeekBefore => deadline.checked_sub_days(Days::new(7)),
            Self::OneMonthBefore => deadline.checked_sub_months(Months::new(1)),
        };
        computed.ok_or(TaskDomainError::DateOutOfRange(deadline))
    }
}

impl fmt::Display for NotificationPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// How a caller chose a notification date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotificationTiming {
    /// A lead time relative to the deadline.
    Preset(NotificationPreset),
    /// An explicit calendar date.
    Custom(NaiveDate),
}

impl From<NotificationPreset> for NotificationTiming {
    fn from(preset: NotificationPreset) -> Self {
        Self::Preset(preset)
    }
}

/// A preset that is still usable for a task, with its resolved date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PresetOption {
    /// The lead time.
    pub preset: NotificationPreset,
    /// The date the preset resolves to for the task's current deadline.
    pub date: NaiveDate,
}

/// Choices offered when scheduling a new notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresetMenu {
    /// Presets not yet used and not already in the past, in menu order.
    pub presets: Vec<PresetOption>,
    /// Suggested starting date for the free-form custom option.
    pub custom_default: NaiveDate,
}

impl PresetMenu {
    /// Returns `true` when `preset` is offered.
    #[must_use]
    pub fn offers(&self, preset: NotificationPreset) -> bool {
        self.presets.iter().any(|option| option.preset == preset)
    }
}

/// Lists the presets still meaningful for `task` on `today`.
///
/// A preset is dropped when a notification already exists on its exact date
/// or when its date is before `today`. Presets whose date cannot be
/// represented are dropped as well.
#[must_use]
pub fn available_presets(task: &Task, today: NaiveDate) -> PresetMenu {
    let presets = NotificationPreset::ALL
        .into_iter()
        .filter_map(|preset| {
            let date = preset.date_for(task.deadline()).ok()?;
            let taken = task
                .notifications()
                .iter()
                .any(|notification| notification.date() == date);
            (!taken && date >= today).then_some(PresetOption { preset, date })
        })
        .collect();

    PresetMenu {
        presets,
        custom_default: today.checked_add_days(Days::new(1)).unwrap_or(today),
    }
}

/// Resolves a preset or custom choice to a calendar date for `task`.
///
/// # Errors
///
/// Returns [`TaskDomainError::DateOutOfRange`] when a preset cannot be
/// represented.
pub fn resolve_date(task: &Task, timing: NotificationTiming) -> Result<NaiveDate, TaskDomainError> {
    match timing {
        NotificationTiming::Preset(preset) => preset.date_for(task.deadline()),
        NotificationTiming::Custom(date) => Ok(date),
    }
}

/// Checks that `date` falls within `[today, task.deadline]`.
///
/// # Errors
///
/// Returns [`TaskDomainError::InvalidNotificationDate`] when the date is
/// after the deadline or before `today`.
pub fn validate_date(task: &Task, date: NaiveDate, today: NaiveDate) -> Result<(), TaskDomainError> {
    if date > task.deadline() || date < today {
        return Err(TaskDomainError::InvalidNotificationDate {
            date,
            today,
            deadline: task.deadline(),
        });
    }
    Ok(())
}

/// Splits `notifications` into those still on or before `deadline` and those
/// strictly after it.
pub(crate) fn partition_stale(
    notifications: Vec<Notification>,
    deadline: NaiveDate,
) -> (Vec<Notification>, Vec<Notification>) {
    notifications
        .into_iter()
        .partition(|notification| notification.date() <= deadline)
}

/// Removes notifications on `task` dated strictly after its deadline.
///
/// Run after a deadline change or a date rollover. Returns the removed
/// notifications.
pub fn prune_stale_notifications(task: &mut Task) -> Vec<Notification> {
    task.prune_stale_notifications()
}
