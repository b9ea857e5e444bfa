// Transition simulator: advances a search state by one ply

use crate::config::GameRulesConfig;
use crate::state::{Role, SearchState};
use crate::types::Direction;

/// Applies one move for the snake playing `role` and returns the successor.
///
/// The input is left untouched; the successor is an independent copy, so
/// sibling branches of the search never see each other's moves.
pub fn apply_move(
    state: &SearchState,
    role: Role,
    dir: Direction,
    rules: &GameRulesConfig,
) -> SearchState {
    let mut next = state.clone();
    apply_move_in_place(&mut next, role, dir, rules);
    next
}

/// Mutating form of [`apply_move`] for callers that already own a copy
pub fn apply_move_in_place(
    state: &mut SearchState,
    role: Role,
    dir: Direction,
    rules: &GameRulesConfig,
) {
    let index = state.index_of(role);
    let board = &mut state.board;

    let new_head = dir.apply(&board.snakes[index].head);
    let ate = match board.food.iter().position(|f| *f == new_head) {
        Some(food_index) => {
            board.food.remove(food_index);
            true
        }
        None => false,
    };

    let snake = &mut board.snakes[index];
    if ate {
        snake.health = rules.health_on_food;
        snake.length += 1;
    } else {
        snake.health -= rules.health_loss_per_turn;
    }

    snake.body.insert(0, new_head);
    if snake.body.len() > snake.length.max(0) as usize {
        snake.body.pop();
    }
    snake.head = new_head;
}
