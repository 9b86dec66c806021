//! Then steps for notification BDD scenarios.

use super::world::NotificationWorld;
use crate::test_helpers::parse_date;
use rstest_bdd_macros::then;
use taskdesk::task::domain::{ErrorKind, NotificationPreset, PresetMenu, TaskState};

fn last_menu(world: &NotificationWorld) -> Result<&PresetMenu, eyre::Report> {
    world
        .last_menu
        .as_ref()
        .ok_or_else(|| eyre::eyre!("presets were not requested"))
}

fn preset(label: &str) -> Result<NotificationPreset, eyre::Report> {
    NotificationPreset::from_label(label)
        .ok_or_else(|| eyre::eyre!("unknown preset {label:?} in scenario"))
}

#[then(r#"the offered preset dates are "{dates}""#)]
fn offered_dates(world: &NotificationWorld, dates: String) -> Result<(), eyre::Report> {
    let expected = dates
        .split(',')
        .map(|text| parse_date(text.trim()))
        .collect::<Result<Vec<_>, _>>()?;
    let offered: Vec<_> = last_menu(world)?
        .presets
        .iter()
        .map(|option| option.date)
        .collect();

    eyre::ensure!(
        offered == expected,
        "expected preset dates {expected:?}, found {offered:?}"
    );
    Ok(())
}

#[then(r#""{label}" is offered"#)]
fn preset_offered(world: &NotificationWorld, label: String) -> Result<(), eyre::Report> {
    eyre::ensure!(
        last_menu(world)?.offers(preset(&label)?),
        "expected {label} to be offered"
    );
    Ok(())
}

#[then(r#""{label}" is not offered"#)]
fn preset_not_offered(world: &NotificationWorld, label: String) -> Result<(), eyre::Report> {
    eyre::ensure!(
        !last_menu(world)?.offers(preset(&label)?),
        "expected {label} not to be offered"
    );
    Ok(())
}

#[then("the command fails with an invalid notification date error")]
fn fails_with_invalid_date(world: &NotificationWorld) -> Result<(), eyre::Report> {
    let err = world
        .last_error
        .as_ref()
        .ok_or_else(|| eyre::eyre!("expected the command to fail"))?;
    eyre::ensure!(
        err.kind() == ErrorKind::InvalidNotificationDate,
        "expected an invalid notification date error, got {err}"
    );
    Ok(())
}

#[then("the task has {count:usize} notifications")]
fn notification_count(world: &NotificationWorld, count: usize) -> Result<(), eyre::Report> {
    let found = world.task()?.notifications().len();
    eyre::ensure!(found == count, "expected {count} notifications, found {found}");
    Ok(())
}

#[then(r#"the task state is "{state}""#)]
fn task_state_is(world: &NotificationWorld, state: String) -> Result<(), eyre::Report> {
    let expected = TaskState::try_from(state.as_str())
        .map_err(|err| eyre::eyre!("invalid expected state in scenario: {err}"))?;
    let found = world.task()?.state();
    eyre::ensure!(found == expected, "expected state {expected}, found {found}");
    Ok(())
}

#[then("the summary counts {count:usize} delayed task")]
fn summary_delayed(world: &NotificationWorld, count: usize) -> Result<(), eyre::Report> {
    let summary = world
        .last_summary
        .ok_or_else(|| eyre::eyre!("summary was not requested"))?;
    eyre::ensure!(
        summary.delayed == count,
        "expected {count} delayed tasks, found {}",
        summary.delayed
    );
    Ok(())
}
