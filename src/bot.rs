// Battlesnake bot: lifecycle endpoints and the move selector
//
// Each turn the snapshot is validated into a SearchState, a fixed-depth
// minimax search runs to completion, and the root move is returned.

use log::{error, info, warn};
use serde_json::{json, Value};
use std::time::Instant;
use tokio::task::JoinError;

use crate::config::Config;
use crate::debug_logger::DebugLogger;
use crate::error::EngineError;
use crate::search::{search, SearchStats};
use crate::state::SearchState;
use crate::types::{Battlesnake, Board, Direction, Game, GameState};

/// Outcome of one move selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveDecision {
    pub direction: Direction,
    pub value: i64,
    pub depth: u8,
    pub stats: SearchStats,
}

/// Battlesnake Bot with OOP-style API
/// Takes static configuration dependencies and exposes methods corresponding to API endpoints
pub struct Bot {
    config: Config,
    debug_logger: DebugLogger,
}

impl Bot {
    /// Creates a new Bot instance with the given configuration and no decision log
    ///
    /// # Arguments
    /// * `config` - Static configuration that does not change during the bot's lifetime
    pub fn new(config: Config) -> Self {
        Self::with_debug_logger(config, DebugLogger::disabled())
    }

    /// Creates a Bot that records every decided turn to the given logger
    pub fn with_debug_logger(config: Config, debug_logger: DebugLogger) -> Self {
        Bot {
            config,
            debug_logger,
        }
    }

    /// Returns bot metadata and appearance
    /// Corresponds to GET / endpoint
    pub fn info(&self) -> Value {
        info!("INFO");

        let appearance = &self.config.appearance;
        json!({
            "apiversion": appearance.apiversion,
            "author": appearance.author,
            "color": appearance.color,
            "head": appearance.head,
            "tail": appearance.tail,
        })
    }

    /// Called when a game starts
    /// Corresponds to POST /start endpoint
    pub fn start(&self, game: &Game, _turn: &i32, _board: &Board, _you: &Battlesnake) {
        info!("GAME START {}", game.id);
    }

    /// Called when a game ends
    /// Corresponds to POST /end endpoint
    pub fn end(&self, game: &Game, turn: &i32, _board: &Board, _you: &Battlesnake) {
        info!("GAME OVER {} after {} turns", game.id, turn);
    }

    /// Selects our move for this snapshot using the configured search depth
    pub fn choose_move(&self, state: &GameState) -> Result<MoveDecision, EngineError> {
        Self::select_move(state, &self.config)
    }

    /// Move selector: validates the snapshot and runs minimax from the root.
    ///
    /// # Errors
    /// * `InvalidGameState` if the snapshot is not a well-formed two-snake board
    /// * `NoSafeMove` if our snake has no non-fatal move
    pub fn select_move(state: &GameState, config: &Config) -> Result<MoveDecision, EngineError> {
        let root = SearchState::from_game_state(state)?;
        let depth = config.search.depth.max(1);

        let (result, stats) = search(&root, depth, config);

        match result.best_move {
            Some(direction) => Ok(MoveDecision {
                direction,
                value: result.value,
                depth,
                stats,
            }),
            None => Err(EngineError::NoSafeMove { turn: state.turn }),
        }
    }

    /// Turns a selector result into the direction actually sent.
    /// `NoSafeMove` becomes the configured fallback, scored as a loss;
    /// `InvalidGameState` is passed through.
    pub fn resolve(
        decision: Result<MoveDecision, EngineError>,
        config: &Config,
    ) -> Result<(Direction, i64), EngineError> {
        match decision {
            Ok(decision) => Ok((decision.direction, decision.value)),
            Err(EngineError::NoSafeMove { turn }) => {
                let fallback = config.fallback.direction();
                warn!(
                    "Turn {}: No safe move, falling back to {}",
                    turn,
                    fallback.as_str()
                );
                Ok((fallback, config.search.terminal_loss_score))
            }
            Err(e) => Err(e),
        }
    }

    /// Handles the outcome of the blocking search task. A task that died
    /// (panic or cancellation) still answers with the configured fallback,
    /// but the turn carries no value since nothing was searched.
    pub fn resolve_search_task(
        joined: Result<Result<MoveDecision, EngineError>, JoinError>,
        turn: i32,
        config: &Config,
    ) -> Result<(Direction, Option<i64>), EngineError> {
        match joined {
            Ok(decision) => Self::resolve(decision, config).map(|(dir, value)| (dir, Some(value))),
            Err(e) => {
                let fallback = config.fallback.direction();
                error!(
                    "Turn {}: Search task failed ({}), falling back to {}",
                    turn,
                    e,
                    fallback.as_str()
                );
                Ok((fallback, None))
            }
        }
    }

    /// Computes and returns the next move
    /// Corresponds to POST /move endpoint
    ///
    /// The search is CPU-bound, so it runs on the blocking pool rather than on
    /// the async executor. It always completes at the configured depth; the
    /// game timeout is only compared against afterwards and logged.
    ///
    /// # Returns
    /// * `Ok(Value)` - JSON response containing the chosen move direction
    /// * `Err(EngineError::InvalidGameState)` - the snapshot was rejected
    pub async fn get_move(&self, state: &GameState) -> Result<Value, EngineError> {
        let start_time = Instant::now();
        let turn = state.turn;

        info!("Turn {}: Computing move", turn);

        let snapshot = state.clone();
        let config = self.config.clone();
        let decision =
            tokio::task::spawn_blocking(move || Bot::select_move(&snapshot, &config)).await;

        if let Ok(Ok(d)) = &decision {
            info!(
                "Turn {}: Chose {} (value: {}, depth: {}, nodes: {}, time: {}ms)",
                turn,
                d.direction.as_str(),
                d.value,
                d.depth,
                d.stats.nodes,
                start_time.elapsed().as_millis()
            );
        }

        let (chosen_move, value) = Self::resolve_search_task(decision, turn, &self.config)
            .inspect_err(|e| {
                error!("Turn {}: {}", turn, e);
            })?;

        let elapsed = start_time.elapsed().as_millis();
        if exceeds_timeout(elapsed, state.game.timeout) {
            warn!(
                "Turn {}: Search took {}ms, over the {}ms game timeout",
                turn, elapsed, state.game.timeout
            );
        }

        self.debug_logger.log_move(
            turn,
            state.you.id.clone(),
            state.board.clone(),
            chosen_move,
            value,
        );

        Ok(json!({ "move": chosen_move.as_str() }))
    }
}

/// True when a decision took longer than the game's move timeout.
/// A timeout of 0 means the game did not send one.
pub fn exceeds_timeout(elapsed_ms: u128, timeout_ms: u32) -> bool {
    timeout_ms > 0 && elapsed_ms > timeout_ms as u128
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Coord;

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

    fn game_state(me: Battlesnake, op: Battlesnake) -> GameState {
        GameState {
            game: Game::default(),
            turn: 7,
            board: Board {
                width: 5,
                height: 5,
                food: vec![],
                snakes: vec![me.clone(), op],
                hazards: vec![],
            },
            you: me,
        }
    }

    #[test]
    fn test_info_reports_appearance() {
        let bot = Bot::new(Config::default_hardcoded());
        let info = bot.info();
        assert_eq!(info["apiversion"], "1");
        assert_eq!(info["color"], "#00ff66");
        assert_eq!(info["head"], "bonhomme");
    }

    #[test]
    fn test_no_safe_move_is_explicit() {
        let bot = Bot::new(Config::default_hardcoded());
        let state = game_state(snake("me", 1, &[(2, 2)]), snake("op", 90, &[(0, 0)]));
        assert_eq!(
            bot.choose_move(&state),
            Err(EngineError::NoSafeMove { turn: 7 })
        );
    }

    #[test]
    fn test_resolve_applies_fallback_only_for_no_safe_move() {
        let mut config = Config::default_hardcoded();
        config.fallback.no_safe_move = "right".to_string();

        let resolved = Bot::resolve(Err(EngineError::NoSafeMove { turn: 1 }), &config);
        assert_eq!(
            resolved,
            Ok((Direction::Right, config.search.terminal_loss_score))
        );

        let invalid = EngineError::InvalidGameState("missing".to_string());
        assert_eq!(Bot::resolve(Err(invalid.clone()), &config), Err(invalid));
    }

    #[tokio::test]
    async fn test_failed_search_task_falls_back_without_a_score() {
        let mut config = Config::default_hardcoded();
        config.fallback.no_safe_move = "down".to_string();

        let joined = tokio::task::spawn_blocking(|| -> Result<MoveDecision, EngineError> {
            panic!("search worker died")
        })
        .await;
        assert!(joined.is_err());

        assert_eq!(
            Bot::resolve_search_task(joined, 3, &config),
            Ok((Direction::Down, None))
        );
    }

    #[test]
    fn test_finished_search_task_keeps_its_score() {
        let config = Config::default_hardcoded();
        let lost = Bot::resolve_search_task(Ok(Err(EngineError::NoSafeMove { turn: 2 })), 2, &config);
        assert_eq!(
            lost,
            Ok((Direction::Up, Some(config.search.terminal_loss_score)))
        );

        let invalid = EngineError::InvalidGameState("missing".to_string());
        assert_eq!(
            Bot::resolve_search_task(Ok(Err(invalid.clone())), 2, &config),
            Err(invalid)
        );
    }

    #[test]
    fn test_timeout_check() {
        assert!(!exceeds_timeout(10_000, 0));
        assert!(!exceeds_timeout(500, 500));
        assert!(exceeds_timeout(501, 500));
        assert!(!exceeds_timeout(12, 500));
    }

    #[test]
    fn test_zero_depth_config_still_returns_a_move() {
        let mut config = Config::default_hardcoded();
        config.search.depth = 0;
        let state = game_state(snake("me", 90, &[(2, 2)]), snake("op", 90, &[(0, 0)]));
        let decision = Bot::select_move(&state, &config).unwrap();
        assert_eq!(decision.depth, 1);
    }
}
