//! In-memory integration tests for saving and reopening a workspace.

use eyre::ensure;
use rstest::rstest;
use taskdesk::task::domain::{
    CatalogEntry, CategoryId, NewTask, NotificationPreset, PriorityId, TaskId, TaskState,
};

use super::helpers::{Harness, harness, reopen};
use crate::test_helpers::date;

#[rstest]
fn reopened_workspace_sees_saved_state(harness: Harness) -> eyre::Result<()> {
    let Harness {
        storage,
        clock,
        mut workspace,
    } = harness;
    let errands = workspace.add_category("Errands")?;
    let low = workspace.add_priority("Low")?;
    let task = workspace.add_task(
        NewTask::new("Post parcel", date(2025, 1, 8))
            .with_category(errands.id())
            .with_priority(low.id()),
    )?;
    let reminder =
        workspace.add_notification(task.id(), "weigh it", NotificationPreset::OneDayBefore.into())?;
    workspace.save_all()?;

    let reopened = reopen(&storage, &clock);

    ensure!(reopened.tasks().find(task.id()).is_some_and(|restored| {
        restored.category_id() == errands.id()
            && restored.priority_id() == low.id()
            && restored.notification(reminder.id()).is_some()
    }));
    ensure!(reopened.categories().label_of(errands.id()) == Some("Errands"));
    ensure!(reopened.priorities().label_of(low.id()) == Some("Low"));
    Ok(())
}

#[rstest]
fn unsaved_changes_are_not_visible_after_reopen(harness: Harness) -> eyre::Result<()> {
    let Harness {
        storage,
        clock,
        mut workspace,
    } = harness;
    workspace.add_task(NewTask::new("Saved", date(2025, 1, 8)))?;
    workspace.save_all()?;
    workspace.add_task(NewTask::new("Unsaved", date(2025, 1, 9)))?;

    let reopened = reopen(&storage, &clock);

    ensure!(reopened.tasks().len() == 1);
    ensure!(storage.save_count()? == 3);
    Ok(())
}

#[rstest]
fn identifiers_continue_after_reopen(harness: Harness) -> eyre::Result<()> {
    let Harness {
        storage,
        clock,
        mut workspace,
    } = harness;
    let first = workspace.add_task(NewTask::new("First", date(2025, 1, 8)))?;
    let second = workspace.add_task(NewTask::new("Second", date(2025, 1, 8)))?;
    workspace.add_notification(first.id(), "a", NotificationPreset::OneDayBefore.into())?;
    workspace.delete_task(second.id())?;
    workspace.save_all()?;

    let mut reopened = reopen(&storage, &clock);
    let third = reopened.add_task(NewTask::new("Third", date(2025, 1, 8)))?;
    let note =
        reopened.add_notification(third.id(), "b", NotificationPreset::OneDayBefore.into())?;

    ensure!(third.id() == TaskId::new(1));
    ensure!(note.id().value() == 1);
    Ok(())
}

#[rstest]
fn tasks_overdue_at_reopen_are_delayed(harness: Harness) -> eyre::Result<()> {
    let Harness {
        storage,
        clock,
        mut workspace,
    } = harness;
    let task = workspace.add_task(NewTask::new("Return books", date(2025, 1, 2)))?;
    let done = workspace.add_task(
        NewTask::new("Water plants", date(2025, 1, 2)).with_state(TaskState::Completed),
    )?;
    workspace.save_all()?;

    clock.advance_to(date(2025, 1, 3));
    let reopened = reopen(&storage, &clock);

    ensure!(reopened.tasks().find(task.id()).is_some_and(|t| t.is_delayed()));
    ensure!(reopened.tasks().find(done.id()).is_some_and(|t| t.is_completed()));
    Ok(())
}

#[rstest]
fn cascades_persist_once_saved(harness: Harness) -> eyre::Result<()> {
    let Harness {
        storage,
        clock: _,
        mut workspace,
    } = harness;
    let work = workspace.add_category("Work")?;
    let high = workspace.add_priority("High")?;
    workspace.add_task(NewTask::new("Standup", date(2025, 1, 2)).with_category(work.id()))?;
    let kept =
        workspace.add_task(NewTask::new("Dentist", date(2025, 1, 2)).with_priority(high.id()))?;

    workspace.delete_category(work.id())?;
    workspace.delete_priority(high.id())?;
    workspace.save_all()?;

    let stored = storage.stored_tasks()?;
    ensure!(stored.len() == 1);
    ensure!(stored.iter().all(|task| task.id == kept.id()));
    ensure!(stored.iter().all(|task| task.priority_id == PriorityId::DEFAULT));
    ensure!(
        storage
            .stored_categories()?
            .iter()
            .map(CatalogEntry::id)
            .eq([CategoryId::UNCATEGORIZED])
    );
    Ok(())
}
