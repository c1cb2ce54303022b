//! Drag-and-drop state holder for one loaded board.

use super::{BoardSnapshot, ColumnTasks, TaskFilter};
use crate::auth::Actor;
use crate::board::{
    domain::{Column, ColumnId},
    ports::BoardRepository,
};
use crate::task::{
    domain::{Task, TaskId},
    ports::TaskRepository,
    services::{MoveOutcome, TaskLifecycleError, TaskLifecycleService},
};
use mockable::Clock;

/// Where a dragged task was released.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropTarget {
    /// Dropped onto another task card.
    Task(TaskId),
    /// Dropped onto a column body.
    Column(ColumnId),
}

/// A move resolved from a drag gesture, ready to be sent to the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveRequest {
    /// Task being moved.
    pub task_id: TaskId,
    /// Column the task leaves.
    pub from_column: ColumnId,
    /// Column the task enters.
    pub to_column: ColumnId,
    /// Requested index in the target column.
    pub index: usize,
}

/// An optimistic move applied locally but not yet confirmed.
///
/// Resolve it with [`BoardView::confirm`] or [`BoardView::rollback`].
#[derive(Debug)]
#[must_use = "a pending move must be confirmed or rolled back"]
pub struct PendingMove {
    request: MoveRequest,
    previous: Vec<ColumnTasks>,
}

impl PendingMove {
    /// Returns the move being applied.
    #[must_use]
    pub const fn request(&self) -> &MoveRequest {
        &self.request
    }
}

/// State holder for one loaded board.
///
/// Drag gestures reorder local state immediately. Persisting a move goes
/// through [`BoardView::commit_move`], which restores the previous order when
/// the service rejects or fails the move.
#[derive(Debug, Clone)]
pub struct BoardView {
    snapshot: BoardSnapshot,
    filter: TaskFilter,
    drag_origin: Option<Vec<ColumnTasks>>,
}

impl BoardView {
    /// Wraps a loaded board.
    #[must_use]
    pub fn new(snapshot: BoardSnapshot) -> Self {
        Self {
            snapshot,
            filter: TaskFilter::default(),
            drag_origin: None,
        }
    }

    /// Returns the current local state.
    #[must_use]
    pub const fn snapshot(&self) -> &BoardSnapshot {
        &self.snapshot
    }

    /// Returns the number of tasks on the board, ignoring the filter.
    #[must_use]
    pub fn total_tasks(&self) -> usize {
        self.snapshot.total_tasks()
    }

    /// Replaces the active filter.
    pub fn set_filter(&mut self, filter: TaskFilter) {
        self.filter = filter;
    }

    /// Returns the active filter.
    #[must_use]
    pub const fn filter(&self) -> &TaskFilter {
        &self.filter
    }

    /// Returns the tasks of a column that pass the filter, in order.
    #[must_use]
    pub fn visible_tasks(&self, column_id: ColumnId) -> Vec<&Task> {
        self.snapshot
            .column(column_id)
            .map(|entry| {
                entry
                    .tasks
                    .iter()
                    .filter(|task| self.filter.matches(task))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Live reorder while a task is dragged over another card of the same
    /// column. Returns whether local order changed.
    ///
    /// The order before the first reorder of a gesture is kept so the
    /// gesture can be resolved against it.
    pub fn drag_over(&mut self, active: TaskId, over: DropTarget) -> bool {
        let DropTarget::Task(over_task) = over else {
            return false;
        };
        if active == over_task {
            return false;
        }
        let (Some((active_column, from)), Some((over_column, to))) =
            (self.snapshot.locate(active), self.snapshot.locate(over_task))
        else {
            return false;
        };
        if active_column != over_column {
            return false;
        }
        if self.drag_origin.is_none() {
            self.drag_origin = Some(self.snapshot.columns.clone());
        }
        let Some(entry) = self.snapshot.column_mut(active_column) else {
            return false;
        };
        let task = entry.tasks.remove(from);
        entry.tasks.insert(to, task);
        entry.renumber();
        true
    }

    /// Abandons a drag gesture and restores the order it started from.
    pub fn cancel_drag(&mut self) {
        if let Some(origin) = self.drag_origin.take() {
            self.snapshot.columns = origin;
        }
    }

    /// Resolves the end of a drag gesture into a move request.
    ///
    /// Dropping on a card targets that card's index; dropping on a column
    /// targets its end. Moves back into `To Do` from a later lane are
    /// refused locally and restore the pre-drag order.
    pub fn drag_end(&mut self, active: TaskId, over: DropTarget) -> Option<MoveRequest> {
        let request = self.resolve_drop(active, over);
        if request.is_none() {
            self.cancel_drag();
        }
        request
    }

    fn resolve_drop(&self, active: TaskId, over: DropTarget) -> Option<MoveRequest> {
        let origin = self.origin_snapshot();
        let (from_column, _) = origin.locate(active)?;
        let (to_column, index) = match over {
            DropTarget::Task(over_task) => origin.locate(over_task)?,
            DropTarget::Column(column_id) => {
                let entry = origin.column(column_id)?;
                let end = entry
                    .tasks
                    .iter()
                    .filter(|task| task.id() != active)
                    .count();
                (column_id, end)
            }
        };
        let source_lane = origin.column(from_column)?.column.lane();
        let target_lane = origin.column(to_column)?.column.lane();
        if !source_lane.allows_move_to(target_lane) {
            tracing::warn!(task_id = %active, "tasks cannot move back to the backlog");
            return None;
        }
        Some(MoveRequest {
            task_id: active,
            from_column,
            to_column,
            index,
        })
    }

    fn origin_snapshot(&self) -> BoardSnapshot {
        self.drag_origin.as_ref().map_or_else(
            || self.snapshot.clone(),
            |columns| BoardSnapshot {
                board: self.snapshot.board.clone(),
                columns: columns.clone(),
            },
        )
    }

    /// Applies `request` locally and returns the token to resolve it.
    ///
    /// The move is applied to the order the drag gesture started from,
    /// mirroring how the service positions the task.
    pub fn begin_move(&mut self, request: MoveRequest) -> PendingMove {
        let previous = self
            .drag_origin
            .take()
            .unwrap_or_else(|| self.snapshot.columns.clone());
        self.snapshot.columns.clone_from(&previous);
        self.apply_move(&request);
        PendingMove { request, previous }
    }

    fn apply_move(&mut self, request: &MoveRequest) {
        let Some(mut task) = self.snapshot.take_task(request.task_id) else {
            return;
        };
        let Some(target) = self.snapshot.column_mut(request.to_column) else {
            self.restore_task(task);
            return;
        };
        let index = request.index.min(target.tasks.len());
        task.relocate(request.to_column, 0);
        target.tasks.insert(index, task);
        target.renumber();
    }

    fn restore_task(&mut self, task: Task) {
        if let Some(entry) = self.snapshot.column_mut(task.column_id()) {
            let index = usize::try_from(task.sort_order())
                .unwrap_or(usize::MAX)
                .min(entry.tasks.len());
            entry.tasks.insert(index, task);
            entry.renumber();
        }
    }

    /// Commits a pending move, adopting the stored version of the task.
    ///
    /// A stored task that is not the one being moved rolls the move back.
    pub fn confirm(&mut self, pending: PendingMove, stored: &Task) {
        if stored.id() != pending.request.task_id {
            tracing::warn!(
                task_id = %pending.request.task_id,
                stored_id = %stored.id(),
                "confirmation does not match the pending move"
            );
            self.rollback(pending);
            return;
        }
        self.apply_updated_task(stored.clone());
    }

    /// Restores the order from before a pending move.
    pub fn rollback(&mut self, pending: PendingMove) {
        tracing::debug!(task_id = %pending.request.task_id, "move rolled back");
        self.snapshot.columns = pending.previous;
    }

    /// Runs a move against the service: applies it locally, then confirms
    /// it or rolls it back depending on the outcome.
    ///
    /// # Errors
    ///
    /// Returns the service error after rolling back local state.
    #[tracing::instrument(skip(self, service, actor))]
    pub async fn commit_move<R, B, C>(
        &mut self,
        service: &TaskLifecycleService<R, B, C>,
        request: MoveRequest,
        actor: Option<&Actor>,
    ) -> Result<MoveOutcome, TaskLifecycleError>
    where
        R: TaskRepository,
        B: BoardRepository,
        C: Clock + Send + Sync,
    {
        let pending = self.begin_move(request);
        match service
            .move_task(request.task_id, request.to_column, request.index, actor)
            .await
        {
            Ok(outcome) => {
                match outcome.task() {
                    Some(stored) => self.confirm(pending, stored),
                    None => self.rollback(pending),
                }
                Ok(outcome)
            }
            Err(err) => {
                tracing::warn!(error = %err, "move failed; restoring previous order");
                self.rollback(pending);
                Err(err)
            }
        }
    }

    /// Adds a task returned by the service to its column.
    pub fn apply_created_task(&mut self, task: Task) {
        self.insert_by_position(task);
    }

    /// Replaces a task with the version returned by the service, moving it
    /// if its column changed.
    pub fn apply_updated_task(&mut self, task: Task) {
        match self.snapshot.locate(task.id()) {
            Some((column_id, index)) if column_id == task.column_id() => {
                if let Some(slot) = self
                    .snapshot
                    .column_mut(column_id)
                    .and_then(|entry| entry.tasks.get_mut(index))
                {
                    *slot = task;
                }
            }
            Some(_) => {
                self.snapshot.take_task(task.id());
                self.insert_by_position(task);
            }
            None => self.insert_by_position(task),
        }
    }

    /// Adds a new column or replaces a renamed one.
    pub fn apply_column(&mut self, column: Column) {
        if column.board_id() != self.snapshot.board.id() {
            return;
        }
        if let Some(entry) = self.snapshot.column_mut(column.id()) {
            entry.column = column;
        } else {
            self.snapshot.columns.push(ColumnTasks {
                column,
                tasks: Vec::new(),
            });
        }
        self.snapshot
            .columns
            .sort_by_key(|entry| entry.column.sort_order());
    }

    fn insert_by_position(&mut self, task: Task) {
        let Some(entry) = self.snapshot.column_mut(task.column_id()) else {
            return;
        };
        let index = entry
            .tasks
            .iter()
            .position(|existing| existing.sort_order() > task.sort_order())
            .unwrap_or(entry.tasks.len());
        entry.tasks.insert(index, task);
    }
}
