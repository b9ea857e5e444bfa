// Safety filter: which of the four directions are immediately non-fatal

use crate::config::GameRulesConfig;
use crate::types::{Battlesnake, Board, Coord, Direction};

/// Generates the safe moves for a snake, in `Direction::all()` order.
/// A move is safe if it:
/// - Stays in bounds
/// - Doesn't collide with any snake body, the mover's own included,
///   excluding each snake's tail which will move
/// - Lands on food when the snake is on its last point of health
///
/// An empty result means the snake has no legal move this ply.
pub fn safe_moves(board: &Board, snake: &Battlesnake, rules: &GameRulesConfig) -> Vec<Direction> {
    let Some(head) = snake.body.first() else {
        return vec![];
    };
    let starving = snake.health == rules.starvation_health;

    Direction::all()
        .iter()
        .filter(|&&dir| {
            let next = dir.apply(head);

            if !board.contains(&next) {
                return false;
            }

            if is_collision(&next, board) {
                return false;
            }

            if starving && !board.food.contains(&next) {
                return false;
            }

            true
        })
        .copied()
        .collect()
}

/// Checks if a coordinate hits any snake body segment other than a tail
fn is_collision(coord: &Coord, board: &Board) -> bool {
    board.snakes.iter().any(|snake| {
        let body_check_len = snake.body.len().saturating_sub(1);
        snake.body[..body_check_len].contains(coord)
    })
}
