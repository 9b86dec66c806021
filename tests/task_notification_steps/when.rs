//! When steps for notification BDD scenarios.

use super::world::NotificationWorld;
use crate::test_helpers::parse_date;
use eyre::WrapErr;
use rstest_bdd_macros::when;
use taskdesk::task::domain::{NotificationTiming, TaskChanges, TaskState};

#[when("the available presets are requested")]
fn presets_requested(world: &mut NotificationWorld) -> Result<(), eyre::Report> {
    let task_id = world.task_id()?;
    let menu = world
        .workspace
        .available_presets(task_id)
        .wrap_err("compute available presets")?;
    world.last_menu = Some(menu);
    Ok(())
}

#[when(r#"a notification "{message}" is scheduled for "{date}""#)]
fn notification_scheduled(
    world: &mut NotificationWorld,
    message: String,
    date: String,
) -> Result<(), eyre::Report> {
    let task_id = world.task_id()?;
    let timing = NotificationTiming::Custom(parse_date(&date)?);
    world.last_error = world
        .workspace
        .add_notification(task_id, message, timing)
        .err();
    Ok(())
}

#[when(r#"the deadline is changed to "{deadline}""#)]
fn deadline_changed(world: &mut NotificationWorld, deadline: String) -> Result<(), eyre::Report> {
    let task_id = world.task_id()?;
    let changes = TaskChanges::new().with_deadline(parse_date(&deadline)?);
    world
        .workspace
        .update_task(task_id, changes)
        .wrap_err("change task deadline")?;
    Ok(())
}

#[when(r#"the task state is changed to "{state}""#)]
fn state_changed(world: &mut NotificationWorld, state: String) -> Result<(), eyre::Report> {
    let target = TaskState::try_from(state.as_str())
        .map_err(|err| eyre::eyre!("invalid state in scenario: {err}"))?;
    let task_id = world.task_id()?;
    world
        .workspace
        .update_task(task_id, TaskChanges::new().with_state(target))
        .wrap_err("change task state")?;
    Ok(())
}

#[when(r#"the day advances to "{today}""#)]
fn day_advances(world: &mut NotificationWorld, today: String) -> Result<(), eyre::Report> {
    world.clock.advance_to(parse_date(&today)?);
    Ok(())
}

#[when("the summary is requested")]
fn summary_requested(world: &mut NotificationWorld) {
    world.last_summary = Some(world.workspace.summary(7));
}
