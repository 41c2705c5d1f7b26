//! Commit reconciler for finished drag gestures.
//!
//! # Responsibility
//! - Turn a `DragOutcome` into a candidate board.
//! - Verify the candidate holds exactly the committed task ids.
//! - Commit through one `replace_board` call, or repair by reloading.
//!
//! # Invariants
//! - A reorder only changes its own column; the others pass through.
//! - A candidate equal to the committed board is never persisted.
//! - A candidate with missing or repeated ids is never committed.

use crate::drag::session::DragOutcome;
use crate::model::board::Board;
use crate::repo::board_repo::BoardStorage;
use crate::store::board_store::BoardStore;
use log::{debug, info, warn};

/// What the reconciler did with a gesture result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommitResult {
    /// Gesture had no valid drop target.
    Discarded,
    /// Result equals the committed board; nothing persisted.
    Unchanged,
    /// Result replaced the committed board.
    Committed,
    /// Result failed the id check; the store was reloaded instead.
    Repaired,
}

/// Applies a gesture outcome to `store`.
pub fn reconcile<S: BoardStorage>(store: &mut BoardStore<S>, outcome: DragOutcome) -> CommitResult {
    let candidate = match outcome {
        DragOutcome::Discarded => return CommitResult::Discarded,
        DragOutcome::Reordered { column, working } => {
            let mut candidate = store.board().clone();
            candidate.set_column(column, working.column(column).to_vec());
            candidate
        }
        DragOutcome::Moved { working } => working,
    };

    if !same_task_set(store.board(), &candidate) {
        warn!(
            "event=drag_commit module=drag status=repair committed_tasks={} candidate_tasks={}",
            store.board().total_len(),
            candidate.total_len()
        );
        store.reload();
        return CommitResult::Repaired;
    }

    if &candidate == store.board() {
        debug!("event=drag_commit module=drag status=unchanged");
        return CommitResult::Unchanged;
    }

    store.replace_board(candidate);
    info!("event=drag_commit module=drag status=ok");
    CommitResult::Committed
}

/// Whether both boards hold the same ids, each exactly once.
fn same_task_set(committed: &Board, candidate: &Board) -> bool {
    match (committed.unique_task_ids(), candidate.unique_task_ids()) {
        (Some(expected), Some(actual)) => expected == actual,
        _ => false,
    }
}
