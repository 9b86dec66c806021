//! Then steps for referential integrity BDD scenarios.

use super::world::IntegrityWorld;
use rstest_bdd_macros::then;
use taskdesk::task::domain::ErrorKind;

#[then("{count:usize} tasks were reassigned")]
fn tasks_reassigned(world: &IntegrityWorld, count: usize) -> Result<(), eyre::Report> {
    let reassigned = world
        .reassigned
        .ok_or_else(|| eyre::eyre!("no priority was deleted"))?;
    eyre::ensure!(
        reassigned == count,
        "expected {count} reassigned tasks, found {reassigned}"
    );
    Ok(())
}

#[then(r#"task "{name}" has priority "{level}""#)]
fn task_has_priority(
    world: &IntegrityWorld,
    name: String,
    level: String,
) -> Result<(), eyre::Report> {
    let task = world
        .task_named(&name)
        .ok_or_else(|| eyre::eyre!("task {name:?} missing"))?;
    let found = world.workspace.priorities().label_of(task.priority_id());
    eyre::ensure!(
        found == Some(level.as_str()),
        "expected task {name:?} to have priority {level:?}, found {found:?}"
    );
    Ok(())
}

#[then("{count:usize} tasks remain")]
fn tasks_remain(world: &IntegrityWorld, count: usize) -> Result<(), eyre::Report> {
    let found = world.workspace.tasks().len();
    eyre::ensure!(found == count, "expected {count} tasks, found {found}");
    Ok(())
}

#[then(r#"task "{name}" no longer exists"#)]
fn task_gone(world: &IntegrityWorld, name: String) -> Result<(), eyre::Report> {
    eyre::ensure!(
        world.task_named(&name).is_none(),
        "task {name:?} should have been deleted"
    );
    Ok(())
}

#[then(r#"task "{name}" still exists"#)]
fn task_kept(world: &IntegrityWorld, name: String) -> Result<(), eyre::Report> {
    eyre::ensure!(
        world.task_named(&name).is_some(),
        "task {name:?} should still exist"
    );
    Ok(())
}

#[then("the command fails because the entry is protected")]
fn fails_as_protected(world: &IntegrityWorld) -> Result<(), eyre::Report> {
    let err = world
        .last_error
        .as_ref()
        .ok_or_else(|| eyre::eyre!("expected the command to fail"))?;
    eyre::ensure!(
        err.kind() == ErrorKind::ProtectedEntity,
        "expected a protected entity error, got {err}"
    );
    Ok(())
}

#[then(r#"the priority "{level}" still exists"#)]
fn priority_kept(world: &IntegrityWorld, level: String) -> Result<(), eyre::Report> {
    world.priority(&level)?;
    Ok(())
}
