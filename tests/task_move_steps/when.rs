//! When steps for task move BDD scenarios.

use super::world::{TaskMoveWorld, run_async};
use rstest_bdd_macros::when;

#[when(r#"the task is moved to "{column}" at position {index:u64}"#)]
fn move_task(world: &mut TaskMoveWorld, column: String, index: u64) -> Result<(), eyre::Report> {
    let task_id = world.task()?.id();
    let column_id = world.column(&column)?;
    let position = usize::try_from(index)?;

    let result = run_async(
        world
            .service
            .move_task(task_id, column_id, position, Some(&world.actor)),
    );
    if let Ok(Some(updated)) = result.as_ref().map(|outcome| outcome.task()) {
        world.current_task = Some(updated.clone());
    }
    world.last_move = Some(result);
    Ok(())
}
