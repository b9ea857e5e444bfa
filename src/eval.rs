// Heuristic evaluator, called at the search cutoff
//
//   value = health_weight * health
//         + length_weight * length
//         + safety_weight * safety
//         + food_distance_weight * nearest_food_distance
//
// `safety` is +1/-1 when the heads are within `threat_distance` and one snake
// is longer, 0 otherwise. With no food on the board the nearest distance is
// the configured stand-in (9999), which deliberately drags the score down.

use std::cmp::Ordering;

use crate::config::HeuristicConfig;
use crate::state::SearchState;

/// Scores a position from our snake's point of view
pub fn evaluate(state: &SearchState, weights: &HeuristicConfig) -> i64 {
    let you = state.you();
    let opponent = state.opponent();

    let safety = if you.head.manhattan(&opponent.head) <= weights.threat_distance {
        match you.length.cmp(&opponent.length) {
            Ordering::Less => -1,
            Ordering::Greater => 1,
            Ordering::Equal => 0,
        }
    } else {
        0
    };

    let nearest_food = state
        .board
        .food
        .iter()
        .map(|f| you.head.manhattan(f) as i64)
        .min()
        .unwrap_or(weights.no_food_distance);

    weights.health_weight * you.health as i64
        + weights.length_weight * you.length as i64
        + weights.safety_weight * safety
        + weights.food_distance_weight * nearest_food
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::types::{Battlesnake, Board, Coord};

    fn weights() -> HeuristicConfig {
        Config::default_hardcoded().heuristic
    }

    fn snake(id: &str, health: i32, length: i32, head: (i32, i32)) -> Battlesnake {
        let head = Coord::new(head.0, head.1);
        Battlesnake {
            id: id.to_string(),
            name: id.to_string(),
            health,
            head,
            length,
            body: vec![head],
            latency: "0".to_string(),
            shout: None,
        }
    }

    fn state(me: Battlesnake, op: Battlesnake, food: Vec<Coord>) -> SearchState {
        let board = Board {
            width: 11,
            height: 11,
            food,
            snakes: vec![me, op],
            hazards: vec![],
        };
        SearchState::from_board(0, &board, "me").unwrap()
    }

    #[test]
    fn test_far_apart_with_food() {
        let s = state(
            snake("me", 80, 3, (0, 0)),
            snake("op", 80, 5, (10, 10)),
            vec![Coord::new(2, 1), Coord::new(9, 9)],
        );
        // 4*80 + 3 + 0 - 2*3
        assert_eq!(evaluate(&s, &weights()), 317);
    }

    #[test]
    fn test_close_and_shorter_is_penalized() {
        let s = state(
            snake("me", 80, 3, (5, 5)),
            snake("op", 80, 5, (7, 7)),
            vec![Coord::new(5, 6)],
        );
        // 4*80 + 3 - 20 - 2*1
        assert_eq!(evaluate(&s, &weights()), 301);
    }

    #[test]
    fn test_close_and_longer_is_rewarded() {
        let s = state(
            snake("me", 80, 6, (5, 5)),
            snake("op", 80, 5, (5, 10)),
            vec![Coord::new(5, 6)],
        );
        // distance exactly 5 still counts: 4*80 + 6 + 20 - 2
        assert_eq!(evaluate(&s, &weights()), 344);
    }

    #[test]
    fn test_no_food_uses_sentinel_distance() {
        let s = state(snake("me", 100, 1, (2, 2)), snake("op", 100, 1, (9, 9)), vec![]);
        assert_eq!(evaluate(&s, &weights()), 400 + 1 - 2 * 9999);
    }

    #[test]
    fn test_evaluation_is_deterministic() {
        let s = state(
            snake("me", 42, 4, (3, 3)),
            snake("op", 70, 4, (4, 4)),
            vec![Coord::new(0, 0)],
        );
        assert_eq!(evaluate(&s, &weights()), evaluate(&s, &weights()));
    }
}
