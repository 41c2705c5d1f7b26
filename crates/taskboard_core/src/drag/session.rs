//! Drag gesture state machine.
//!
//! # Responsibility
//! - Track the active task and working copy for one gesture.
//! - Splice the working copy when the pointer crosses into another column.
//! - Produce the final working board when the gesture ends.
//!
//! # Invariants
//! - The committed board is never mutated here; only the owned working copy.
//! - Same-column hover never splices; the reorder is computed once at drop.
//! - Every terminal event returns the session to `Idle`.

use crate::model::board::{move_within, Board, Column, DragTarget};
use crate::model::task::{Task, TaskId};
use log::debug;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
enum DragState {
    #[default]
    Idle,
    Dragging {
        active: TaskId,
        /// Owning column when the gesture started.
        source: Column,
        working: Board,
    },
}

/// Result of a finished gesture, handed to the commit reconciler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragOutcome {
    /// No valid drop target; all working-copy changes are dropped.
    Discarded,
    /// Dropped in the column it started in. Only `column` is meaningful.
    Reordered { column: Column, working: Board },
    /// Dropped in another column. The whole working board is the result.
    Moved { working: Board },
}

/// Transient state for one drag gesture.
#[derive(Debug, Default)]
pub struct DragSession {
    state: DragState,
}

impl DragSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging { .. })
    }

    pub fn active_task_id(&self) -> Option<&TaskId> {
        match &self.state {
            DragState::Dragging { active, .. } => Some(active),
            DragState::Idle => None,
        }
    }

    /// Column the active task was picked up from.
    pub fn source_column(&self) -> Option<Column> {
        match &self.state {
            DragState::Dragging { source, .. } => Some(*source),
            DragState::Idle => None,
        }
    }

    /// Working copy including optimistic cross-column placement.
    pub fn working_board(&self) -> Option<&Board> {
        match &self.state {
            DragState::Dragging { working, .. } => Some(working),
            DragState::Idle => None,
        }
    }

    /// Task record being dragged, for overlay rendering.
    pub fn active_task(&self) -> Option<&Task> {
        match &self.state {
            DragState::Dragging {
                active, working, ..
            } => working.find_task(active),
            DragState::Idle => None,
        }
    }

    /// Picks up `task_id` from `committed`.
    ///
    /// Returns `false` and leaves the session untouched when the id does not
    /// resolve to a column. A start during an active gesture replaces it.
    pub fn on_gesture_start(&mut self, committed: &Board, task_id: &str) -> bool {
        let active = TaskId::new(task_id);
        let Some(source) = committed.find_container(&active) else {
            debug!(
                "event=drag_start module=drag status=ignored reason=unresolved task_id={}",
                active
            );
            return false;
        };

        if self.is_dragging() {
            debug!("event=drag_start module=drag status=restart");
        }
        debug!(
            "event=drag_start module=drag status=ok task_id={} source={}",
            active, source
        );
        self.state = DragState::Dragging {
            active,
            source,
            working: committed.clone(),
        };
        true
    }

    /// Handles the pointer moving over `target`.
    ///
    /// Returns whether the working copy changed.
    pub fn on_gesture_over(&mut self, target: &str) -> bool {
        let DragState::Dragging {
            active, working, ..
        } = &mut self.state
        else {
            return false;
        };
        let Some(target) = DragTarget::parse(target) else {
            return false;
        };
        splice_across(working, active, &target)
    }

    /// Ends the gesture over `target` and returns the working result.
    pub fn on_gesture_end(&mut self, target: Option<&str>) -> DragOutcome {
        let DragState::Dragging {
            active,
            source,
            mut working,
        } = std::mem::take(&mut self.state)
        else {
            return DragOutcome::Discarded;
        };

        let Some(target) = target.and_then(DragTarget::parse) else {
            debug!("event=drag_end module=drag status=discarded reason=no_target");
            return DragOutcome::Discarded;
        };

        splice_across(&mut working, &active, &target);
        let Some(destination) = working.resolve(&target) else {
            debug!("event=drag_end module=drag status=discarded reason=unresolved_target");
            return DragOutcome::Discarded;
        };

        if destination != source {
            debug!(
                "event=drag_end module=drag status=moved task_id={} from={} to={}",
                active, source, destination
            );
            return DragOutcome::Moved { working };
        }

        let Some(old_index) = working.position(source, &active) else {
            return DragOutcome::Discarded;
        };
        let new_index = match &target {
            DragTarget::Task(over) => working.position(source, over).unwrap_or(old_index),
            DragTarget::Column(_) => working.len(source).saturating_sub(1),
        };
        move_within(working.column_mut(source), old_index, new_index);
        debug!(
            "event=drag_end module=drag status=reordered task_id={} column={} from_index={} to_index={}",
            active, source, old_index, new_index
        );
        DragOutcome::Reordered {
            column: source,
            working,
        }
    }

    /// Drops the gesture without producing a result.
    pub fn cancel(&mut self) {
        if self.is_dragging() {
            debug!("event=drag_cancel module=drag status=ok");
        }
        self.state = DragState::Idle;
    }
}

/// Moves `active` into the target's column when it differs from its current one.
fn splice_across(working: &mut Board, active: &TaskId, target: &DragTarget) -> bool {
    let Some(current) = working.find_container(active) else {
        return false;
    };
    let Some(destination) = working.resolve(target) else {
        return false;
    };
    if current == destination {
        return false;
    }

    let index = match target {
        DragTarget::Task(over) => working.position(destination, over),
        DragTarget::Column(_) => None,
    };
    working.move_to_column(active, destination, index)
}
