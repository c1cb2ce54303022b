//! Then steps for task move BDD scenarios.

use super::world::{TaskMoveWorld, run_async};
use rstest_bdd_macros::then;
use taskboard::task::services::MoveOutcome;

fn last_outcome(world: &TaskMoveWorld) -> Result<&MoveOutcome, eyre::Report> {
    match world.last_move.as_ref() {
        Some(Ok(outcome)) => Ok(outcome),
        Some(Err(err)) => Err(eyre::eyre!("move failed: {err}")),
        None => Err(eyre::eyre!("missing move result")),
    }
}

#[then("the move is accepted")]
fn move_accepted(world: &TaskMoveWorld) -> Result<(), eyre::Report> {
    let outcome = last_outcome(world)?;
    eyre::ensure!(outcome.is_moved(), "expected a persisted move, got {outcome:?}");
    Ok(())
}

#[then("the move is rejected")]
fn move_rejected(world: &TaskMoveWorld) -> Result<(), eyre::Report> {
    let outcome = last_outcome(world)?;
    eyre::ensure!(
        matches!(outcome, MoveOutcome::Rejected),
        "expected a rejected move, got {outcome:?}"
    );
    Ok(())
}

#[then(r#"the task is in "{column}""#)]
fn task_in_column(world: &TaskMoveWorld, column: String) -> Result<(), eyre::Report> {
    let expected = world.column(&column)?;
    let task_id = world.task()?.id();
    let stored = run_async(world.service.find(task_id))?
        .ok_or_else(|| eyre::eyre!("task {task_id} vanished from the store"))?;
    eyre::ensure!(
        stored.column_id() == expected,
        "expected task in {column}, found column {}",
        stored.column_id()
    );
    Ok(())
}

#[then("the task has no pending reminder")]
fn no_pending_reminder(world: &TaskMoveWorld) -> Result<(), eyre::Report> {
    let task = world.task()?;
    eyre::ensure!(
        task.next_reminder_at().is_none(),
        "expected no reminder, found {:?}",
        task.next_reminder_at()
    );
    Ok(())
}

#[then("the task has a pending reminder")]
fn pending_reminder(world: &TaskMoveWorld) -> Result<(), eyre::Report> {
    eyre::ensure!(
        world.task()?.next_reminder_at().is_some(),
        "expected a scheduled reminder"
    );
    Ok(())
}

#[then(r#"the latest history entry is "{description}""#)]
fn latest_history(world: &TaskMoveWorld, description: String) -> Result<(), eyre::Report> {
    let task_id = world.task()?.id();
    let history = run_async(world.service.history(task_id))?;
    let latest = history
        .first()
        .ok_or_else(|| eyre::eyre!("task has no history"))?;
    eyre::ensure!(
        latest.description() == description,
        "expected {description:?}, found {:?}",
        latest.description()
    );
    Ok(())
}

#[then(r#"the column "{column}" lists "{titles}""#)]
fn column_lists(world: &TaskMoveWorld, column: String, titles: String) -> Result<(), eyre::Report> {
    let column_id = world.column(&column)?;
    let tasks = run_async(world.service.tasks_in_column(column_id))?;
    let actual: Vec<&str> = tasks.iter().map(|task| task.title().as_str()).collect();
    let expected: Vec<&str> = titles.split(", ").collect();
    eyre::ensure!(actual == expected, "expected {expected:?}, found {actual:?}");
    let orders: Vec<u32> = tasks.iter().map(|task| task.sort_order()).collect();
    let dense: Vec<u32> = (0..).take(tasks.len()).collect();
    eyre::ensure!(orders == dense, "sort orders not dense: {orders:?}");
    Ok(())
}
