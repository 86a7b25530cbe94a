//! Per-tick transition rule.
//!
//! Order within a tick: commit at most one queued turn, compute the new head,
//! check walls, check the body (tail excluded), then move and maybe eat.
//! A rejected move never touches the snake.

use tracing::debug;

use crate::config::FOOD_POINTS;
use crate::direction_queue::DirectionQueue;
use crate::game::{EndReason, GameState};

/// What a call to [`step`] did.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum StepOutcome {
    /// The game was paused or already over; nothing changed.
    Idle,
    Moved,
    Ate,
    Ended(EndReason),
}

/// Advances `state` by one tick, consuming at most one entry from `queue`.
pub fn step(state: &mut GameState, queue: &mut DirectionQueue) -> StepOutcome {
    if !state.is_running || state.is_over {
        return StepOutcome::Idle;
    }

    if let Some(next) = queue.dequeue_next() {
        debug!(from = ?state.direction, to = ?next, "direction committed");
        state.direction = next;
    }

    let new_head = state.snake.head().step(state.direction);

    if !new_head.is_within_bounds(state.bounds()) {
        return finish(state, EndReason::WallCollision);
    }

    if state.snake.collides_excluding_tail(new_head) {
        return finish(state, EndReason::SelfCollision);
    }

    let ate = new_head == state.food.position;
    state.snake.advance(new_head, ate);
    state.tick_count += 1;

    if !ate {
        return StepOutcome::Moved;
    }

    state.score += FOOD_POINTS;
    debug!(
        x = new_head.x,
        y = new_head.y,
        score = state.score,
        length = state.snake.len(),
        "food eaten"
    );

    if state.respawn_food() {
        StepOutcome::Ate
    } else {
        finish(state, EndReason::BoardFilled)
    }
}

fn finish(state: &mut GameState, reason: EndReason) -> StepOutcome {
    state.end(reason);
    debug!(
        ?reason,
        score = state.score,
        length = state.snake.len(),
        ticks = state.tick_count,
        "game over"
    );
    StepOutcome::Ended(reason)
}
