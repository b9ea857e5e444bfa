// Minimax search over alternating self/opponent plies
//
// Plain depth-first recursion: no pruning, no transposition table. Every
// child is produced by `apply_move` on a fresh copy of its parent.

use log::{debug, trace};

use crate::config::Config;
use crate::eval::evaluate;
use crate::safety::safe_moves;
use crate::simulate::apply_move;
use crate::state::{Role, SearchState};
use crate::types::Direction;

/// Value of a search node and the move that achieves it.
/// Leaves (depth cutoff or terminal) carry no move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    pub value: i64,
    pub best_move: Option<Direction>,
}

impl SearchResult {
    fn leaf(value: i64) -> Self {
        SearchResult {
            value,
            best_move: None,
        }
    }
}

/// Node counters collected during one search
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    pub nodes: u64,
    /// Nodes scored by the heuristic at the depth cutoff
    pub leaves: u64,
    /// Nodes where the mover had no safe move
    pub terminals: u64,
    /// Value of each root move, indexed by `Direction::index`; `None` if unsafe
    pub root_values: [Option<i64>; 4],
}

impl SearchStats {
    pub fn root_value(&self, dir: Direction) -> Option<i64> {
        self.root_values[dir.index()]
    }
}

/// Runs minimax from the root with our snake to move
pub fn search(state: &SearchState, depth: u8, config: &Config) -> (SearchResult, SearchStats) {
    let mut stats = SearchStats::default();
    let result = minimax_node(state, depth, Role::Maximizer, config, &mut stats, true);

    debug!(
        "Search depth {} -> {:?} (value: {}, nodes: {}, leaves: {}, terminals: {})",
        depth,
        result.best_move.map(|d| d.as_str()),
        result.value,
        stats.nodes,
        stats.leaves,
        stats.terminals
    );

    (result, stats)
}

/// Recursive minimax.
///
/// The maximizer keeps the highest child value, the minimizer the lowest.
/// Ties keep the earlier move, so enumeration order (up, down, left, right)
/// breaks them.
pub fn minimax(
    state: &SearchState,
    depth: u8,
    role: Role,
    config: &Config,
    stats: &mut SearchStats,
) -> SearchResult {
    minimax_node(state, depth, role, config, stats, false)
}

fn minimax_node(
    state: &SearchState,
    depth: u8,
    role: Role,
    config: &Config,
    stats: &mut SearchStats,
    is_root: bool,
) -> SearchResult {
    stats.nodes += 1;

    if depth == 0 {
        stats.leaves += 1;
        return SearchResult::leaf(evaluate(state, &config.heuristic));
    }

    let moves = safe_moves(&state.board, state.snake(role), &config.game_rules);
    if moves.is_empty() {
        stats.terminals += 1;
        let value = match role {
            Role::Maximizer => config.search.terminal_loss_score,
            Role::Minimizer => config.search.terminal_win_score,
        };
        trace!("{}{:?} has no safe moves: {}", indent(depth), role, value);
        return SearchResult::leaf(value);
    }

    trace!("{}{:?} safe moves: {:?}", indent(depth), role, moves);

    let mut best = SearchResult::leaf(match role {
        Role::Maximizer => i64::MIN,
        Role::Minimizer => i64::MAX,
    });

    for dir in moves {
        let child = apply_move(state, role, dir, &config.game_rules);
        let value = minimax_node(&child, depth - 1, role.opposite(), config, stats, false).value;

        if is_root {
            debug!("Root move {} -> {}", dir.as_str(), value);
            stats.root_values[dir.index()] = Some(value);
        }

        let improves = match role {
            Role::Maximizer => value > best.value,
            Role::Minimizer => value < best.value,
        };
        if improves {
            best = SearchResult {
                value,
                best_move: Some(dir),
            };
        }
    }

    trace!(
        "{}{:?} picks {:?} with value {}",
        indent(depth),
        role,
        best.best_move,
        best.value
    );

    best
}

fn indent(depth: u8) -> String {
    "  ".repeat(depth as usize)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Battlesnake, Board, Coord};

    fn snake(id: &str, health: i32, body: &[(i32, i32)]) -> Battlesnake {
        let body: Vec<Coord> = body.iter().map(|&(x, y)| Coord::new(x, y)).collect();
        Battlesnake {
            id: id.to_string(),
            name: id.to_string(),
            health,
            head: body[0],
            length: body.len() as i32,
            body,
            latency: "0".to_string(),
            shout: None,
        }
    }

    fn state(width: i32, height: i32, food: Vec<Coord>, me: Battlesnake, op: Battlesnake) -> SearchState {
        let board = Board {
            width,
            height,
            food,
            snakes: vec![me, op],
            hazards: vec![],
        };
        SearchState::from_board(0, &board, "me").unwrap()
    }

    #[test]
    fn test_depth_zero_is_heuristic_leaf() {
        let config = Config::default_hardcoded();
        let s = state(5, 5, vec![Coord::new(2, 4)], snake("me", 90, &[(2, 2)]), snake("op", 90, &[(0, 0)]));
        let mut stats = SearchStats::default();
        let result = minimax(&s, 0, Role::Maximizer, &config, &mut stats);
        assert_eq!(result.best_move, None);
        assert_eq!(result.value, evaluate(&s, &config.heuristic));
        assert_eq!(stats.leaves, 1);
    }

    #[test]
    fn test_equal_values_prefer_up() {
        let config = Config::default_hardcoded();
        // Every move leaves health, length, safety and food term identical
        let s = state(5, 5, vec![], snake("me", 90, &[(2, 2)]), snake("op", 90, &[(0, 0)]));
        let (result, _) = search(&s, 1, &config);
        assert_eq!(result.best_move, Some(Direction::Up));
    }

    #[test]
    fn test_trapped_self_scores_loss() {
        let config = Config::default_hardcoded();
        let s = state(5, 5, vec![], snake("me", 1, &[(2, 2)]), snake("op", 90, &[(0, 0)]));
        let (result, stats) = search(&s, 3, &config);
        assert_eq!(result.best_move, None);
        assert_eq!(result.value, config.search.terminal_loss_score);
        assert_eq!(stats.terminals, 1);
    }

    #[test]
    fn test_trapped_opponent_scores_win() {
        let config = Config::default_hardcoded();
        // Opponent on its last point of health with no food anywhere
        let s = state(5, 5, vec![], snake("me", 90, &[(2, 2)]), snake("op", 1, &[(0, 0)]));
        let mut stats = SearchStats::default();
        let result = minimax(&s, 3, Role::Minimizer, &config, &mut stats);
        assert_eq!(result.value, config.search.terminal_win_score);
        assert_eq!(result.best_move, None);
    }

    #[test]
    fn test_full_tree_size_on_open_board() {
        let config = Config::default_hardcoded();
        let s = state(11, 11, vec![Coord::new(5, 9)], snake("me", 90, &[(5, 5)]), snake("op", 90, &[(0, 10)]));
        let (_, stats) = search(&s, 2, &config);
        // root + 4 self moves + 4 * 2 opponent moves from the corner
        assert_eq!(stats.nodes, 1 + 4 + 8);
        assert_eq!(stats.leaves, 8);
    }

    #[test]
    fn test_root_move_values_are_recorded() {
        let config = Config::default_hardcoded();
        // Left wall rules out left; the rest score identically at depth 1
        let s = state(11, 11, vec![], snake("me", 90, &[(0, 5)]), snake("op", 90, &[(10, 10)]));
        let (result, stats) = search(&s, 1, &config);

        let expected = 4 * 89 + 1 - 2 * 9999;
        assert_eq!(stats.root_value(Direction::Up), Some(expected));
        assert_eq!(stats.root_value(Direction::Down), Some(expected));
        assert_eq!(stats.root_value(Direction::Left), None);
        assert_eq!(stats.root_value(Direction::Right), Some(expected));
        assert_eq!(result.value, expected);
    }

    #[test]
    fn test_inner_minimax_calls_leave_root_values_empty() {
        let config = Config::default_hardcoded();
        let s = state(5, 5, vec![], snake("me", 90, &[(2, 2)]), snake("op", 90, &[(0, 0)]));
        let mut stats = SearchStats::default();
        minimax(&s, 2, Role::Maximizer, &config, &mut stats);
        assert_eq!(stats.root_values, [None; 4]);
    }
}
