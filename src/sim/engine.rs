use std::collections::VecDeque;

use rand::Rng;

use crate::sim::state::{GameState, Phase, Position};

/// Outcome of one simulation step, reported to the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickResult {
    Continued,
    Ate,
    GameOver,
}

const REJECTION_ATTEMPTS: usize = 100;

/// Advances the game by exactly one cell of movement.
///
/// Order matters: the buffered direction is committed first, then the new
/// head is checked against the walls and against the full pre-move body
/// before anything is mutated. A tick that ends the run leaves the body
/// exactly as it was before the tick.
pub fn tick(state: &mut GameState, rng: &mut impl Rng) -> TickResult {
    match state.phase {
        Phase::Running => {}
        // Frozen states are never mutated; ticking them is driver misuse.
        Phase::Over => return TickResult::GameOver,
        Phase::Idle | Phase::Paused => return TickResult::Continued,
    }

    state.direction = state.intended_direction;
    let new_head = state.head().shifted(state.direction);

    let out_of_bounds = new_head.x < 0
        || new_head.x >= state.grid_size
        || new_head.y < 0
        || new_head.y >= state.grid_size;
    // The self check runs against all L cells of the pre-move body. The tail
    // counts even though it may be vacated this tick: when food is eaten it
    // is not vacated at all, and the original game never made the exception.
    if out_of_bounds || state.body.contains(&new_head) {
        state.phase = Phase::Over;
        return TickResult::GameOver;
    }

    state.body.push_front(new_head);

    if new_head == state.food {
        state.score += state.food_reward;
        match place_food(&state.body, state.grid_size, rng) {
            Some(food) => {
                state.food = food;
                TickResult::Ate
            }
            // Board full: nowhere left for food, the run cannot continue.
            None => {
                state.phase = Phase::Over;
                TickResult::GameOver
            }
        }
    } else {
        state.body.pop_back();
        TickResult::Continued
    }
}

/// Picks a uniformly random cell not occupied by `body`, or None when the
/// board is completely full.
pub fn place_food(
    body: &VecDeque<Position>,
    grid_size: i16,
    rng: &mut impl Rng,
) -> Option<Position> {
    let total_cells = grid_size as usize * grid_size as usize;
    if body.len() >= total_cells {
        return None;
    }

    // Rejection sampling is uniform and cheap while the board is sparse.
    for _ in 0..REJECTION_ATTEMPTS {
        let pos = Position::new(rng.gen_range(0..grid_size), rng.gen_range(0..grid_size));
        if !body.contains(&pos) {
            return Some(pos);
        }
    }

    // Nearly full board: enumerate the free cells instead of looping on.
    let free: Vec<Position> = (0..grid_size)
        .flat_map(|y| (0..grid_size).map(move |x| Position::new(x, y)))
        .filter(|pos| !body.contains(pos))
        .collect();
    Some(free[rng.gen_range(0..free.len())])
}
