//! Given steps for task move BDD scenarios.

use super::world::{TaskMoveWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::given;
use taskboard::board::services::CreateBoardRequest;
use taskboard::task::{domain::ReminderInterval, services::CreateTaskRequest};

#[given("a new board")]
fn new_board(world: &mut TaskMoveWorld) -> Result<(), eyre::Report> {
    let created = run_async(
        world
            .boards
            .create_board(CreateBoardRequest::new(world.actor.user_id(), "Sprint")),
    )
    .wrap_err("create board for move scenario")?;
    world.columns = created.columns;
    Ok(())
}

#[given(r#"a task "{title}" in "{column}" with reminder "{reminder}""#)]
fn task_in_column(
    world: &mut TaskMoveWorld,
    title: String,
    column: String,
    reminder: String,
) -> Result<(), eyre::Report> {
    let interval = ReminderInterval::try_from(reminder.as_str())
        .map_err(|err| eyre::eyre!("invalid reminder in scenario: {err}"))?;
    let column_id = world.column(&column)?;
    let created = run_async(world.service.create(
        column_id,
        CreateTaskRequest::new(title).with_reminder(interval),
        Some(&world.actor),
    ))
    .wrap_err("create task for move scenario")?;
    world.current_task = Some(created);
    Ok(())
}

#[given(r#"the task has been moved to "{column}""#)]
fn task_has_been_moved(world: &mut TaskMoveWorld, column: String) -> Result<(), eyre::Report> {
    let task_id = world.task()?.id();
    let column_id = world.column(&column)?;
    let outcome = run_async(world.service.move_task(task_id, column_id, 0, Some(&world.actor)))
        .wrap_err("move task in scenario setup")?;
    let moved = outcome
        .task()
        .cloned()
        .ok_or_else(|| eyre::eyre!("setup move to {column} was rejected"))?;
    world.current_task = Some(moved);
    Ok(())
}
