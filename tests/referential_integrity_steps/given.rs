//! Given steps for referential integrity BDD scenarios.

use super::world::IntegrityWorld;
use crate::test_helpers::date;
use eyre::WrapErr;
use rstest_bdd_macros::given;
use taskdesk::task::domain::NewTask;

fn new_task(name: String) -> NewTask {
    NewTask::new(name, date(2025, 2, 1))
}

#[given(r#"a category "{name}""#)]
fn category_exists(world: &mut IntegrityWorld, name: String) -> Result<(), eyre::Report> {
    world
        .workspace
        .add_category(name)
        .wrap_err("add category for integrity scenario")?;
    Ok(())
}

#[given(r#"a priority "{level}""#)]
fn priority_exists(world: &mut IntegrityWorld, level: String) -> Result<(), eyre::Report> {
    world
        .workspace
        .add_priority(level)
        .wrap_err("add priority for integrity scenario")?;
    Ok(())
}

#[given(r#"a task "{name}" with priority "{level}""#)]
fn task_with_priority(
    world: &mut IntegrityWorld,
    name: String,
    level: String,
) -> Result<(), eyre::Report> {
    let priority = world.priority(&level)?;
    world
        .workspace
        .add_task(new_task(name).with_priority(priority))
        .wrap_err("add prioritised task")?;
    Ok(())
}

#[given(r#"a task "{name}" in category "{category}""#)]
fn task_in_category(
    world: &mut IntegrityWorld,
    name: String,
    category: String,
) -> Result<(), eyre::Report> {
    let category_id = world.category(&category)?;
    world
        .workspace
        .add_task(new_task(name).with_category(category_id))
        .wrap_err("add categorised task")?;
    Ok(())
}

#[given(r#"a task "{name}" without a priority"#)]
fn task_without_priority(world: &mut IntegrityWorld, name: String) -> Result<(), eyre::Report> {
    world
        .workspace
        .add_task(new_task(name))
        .wrap_err("add task with default priority")?;
    Ok(())
}

#[given(r#"a task "{name}" without a category"#)]
fn task_without_category(world: &mut IntegrityWorld, name: String) -> Result<(), eyre::Report> {
    world
        .workspace
        .add_task(new_task(name))
        .wrap_err("add uncategorised task")?;
    Ok(())
}
