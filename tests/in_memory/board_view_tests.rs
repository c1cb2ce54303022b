//! In-memory integration tests for board snapshots and optimistic moves.

use super::helpers::{Workspace, admin, column, workspace};
use rstest::rstest;
use taskboard::task::services::CreateTaskRequest;
use taskboard::view::{BoardSnapshot, BoardView, DropTarget, TaskFilter};
use taskboard::task::domain::Priority;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn committed_drag_matches_reloaded_board(
    workspace: Result<Workspace, eyre::Report>,
) -> Result<(), eyre::Report> {
    let ws = workspace?;
    let board = ws.board("Release").await?;
    let todo = column(&board, "To Do")?;
    let doing = column(&board, "In Progress")?;
    let first = ws.task(todo, CreateTaskRequest::new("Draft notes")).await?;
    ws.task(todo, CreateTaskRequest::new("Tag build")).await?;
    let target = ws.task(doing, CreateTaskRequest::new("Fix CI")).await?;

    let snapshot = BoardSnapshot::load(&ws.boards, &ws.tasks, board.board.id()).await?;
    let mut view = BoardView::new(snapshot);
    let request = view
        .drag_end(first.id(), DropTarget::Task(target.id()))
        .ok_or_else(|| eyre::eyre!("drop onto a card should produce a move"))?;
    let outcome = view.commit_move(&ws.tasks, request, Some(&admin())).await?;

    eyre::ensure!(outcome.is_moved(), "move should persist");
    let reloaded = BoardSnapshot::load(&ws.boards, &ws.tasks, board.board.id()).await?;
    eyre::ensure!(
        view.snapshot() == &reloaded,
        "local board diverged from the store"
    );
    let titles: Vec<&str> = reloaded
        .column(doing)
        .map(|lane| lane.tasks.iter().map(|task| task.title().as_str()).collect())
        .unwrap_or_default();
    eyre::ensure!(titles == ["Draft notes", "Fix CI"], "unexpected order {titles:?}");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn priority_filter_hides_other_tasks(
    workspace: Result<Workspace, eyre::Report>,
) -> Result<(), eyre::Report> {
    let ws = workspace?;
    let board = ws.board("Release").await?;
    let todo = column(&board, "To Do")?;
    ws.task(todo, CreateTaskRequest::new("Urgent").with_priority(Priority::High))
        .await?;
    ws.task(todo, CreateTaskRequest::new("Someday").with_priority(Priority::Low))
        .await?;

    let snapshot = BoardSnapshot::load(&ws.boards, &ws.tasks, board.board.id()).await?;
    let mut view = BoardView::new(snapshot);
    view.set_filter(TaskFilter::new().with_priorities(vec![Priority::High]));

    let visible: Vec<&str> = view
        .visible_tasks(todo)
        .iter()
        .map(|task| task.title().as_str())
        .collect();
    eyre::ensure!(visible == ["Urgent"], "unexpected visible tasks {visible:?}");
    eyre::ensure!(view.total_tasks() == 2, "filter must not drop tasks");
    Ok(())
}
