// Search state: a validated two-snake snapshot
//
// The wire types are trusted only after `SearchState::from_game_state` has
// checked them. From then on self and opponent are addressed by index, so the
// search never scans the snake list to find out who is who.

use std::collections::HashSet;

use crate::error::EngineError;
use crate::types::{Battlesnake, Board, GameState};

/// Which side of the search is moving
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Our snake, maximizing the evaluation
    Maximizer,
    /// The opponent, minimizing it
    Minimizer,
}

impl Role {
    pub fn opposite(self) -> Role {
        match self {
            Role::Maximizer => Role::Minimizer,
            Role::Minimizer => Role::Maximizer,
        }
    }
}

/// A board owned by one search branch, with self/opponent resolved once
#[derive(Debug, Clone, PartialEq)]
pub struct SearchState {
    pub turn: i32,
    pub board: Board,
    you_index: usize,
    opponent_index: usize,
}

impl SearchState {
    /// Validates an API snapshot and copies it into a search state
    pub fn from_game_state(state: &GameState) -> Result<Self, EngineError> {
        Self::from_board(state.turn, &state.board, &state.you.id)
    }

    /// Validates a board against the two-snake model and resolves `you_id`
    pub fn from_board(turn: i32, board: &Board, you_id: &str) -> Result<Self, EngineError> {
        validate_board(board)?;

        let you_index = board
            .snakes
            .iter()
            .position(|s| s.id == you_id)
            .ok_or_else(|| invalid(format!("snake '{}' is not on the board", you_id)))?;

        if board.snakes.iter().filter(|s| s.id == you_id).count() > 1 {
            return Err(invalid(format!("snake id '{}' appears more than once", you_id)));
        }

        // Exactly two snakes, so the opponent is whichever one we are not
        let opponent_index = 1 - you_index;

        Ok(SearchState {
            turn,
            board: board.clone(),
            you_index,
            opponent_index,
        })
    }

    pub fn you(&self) -> &Battlesnake {
        &self.board.snakes[self.you_index]
    }

    pub fn opponent(&self) -> &Battlesnake {
        &self.board.snakes[self.opponent_index]
    }

    /// The snake that moves for the given role
    pub fn snake(&self, role: Role) -> &Battlesnake {
        &self.board.snakes[self.index_of(role)]
    }

    pub(crate) fn index_of(&self, role: Role) -> usize {
        match role {
            Role::Maximizer => self.you_index,
            Role::Minimizer => self.opponent_index,
        }
    }
}

fn invalid(msg: String) -> EngineError {
    EngineError::InvalidGameState(msg)
}

fn validate_board(board: &Board) -> Result<(), EngineError> {
    if board.width < 1 || board.height < 1 {
        return Err(invalid(format!(
            "board dimensions must be positive, got {}x{}",
            board.width, board.height
        )));
    }

    if board.snakes.len() != 2 {
        return Err(invalid(format!(
            "expected exactly 2 snakes, found {}",
            board.snakes.len()
        )));
    }

    for snake in &board.snakes {
        let Some(first) = snake.body.first() else {
            return Err(invalid(format!("snake '{}' has an empty body", snake.id)));
        };
        if *first != snake.head {
            return Err(invalid(format!(
                "snake '{}' head {:?} does not match body[0] {:?}",
                snake.id, snake.head, first
            )));
        }
        if !(0..=100).contains(&snake.health) {
            return Err(invalid(format!(
                "snake '{}' health {} outside 0..=100",
                snake.id, snake.health
            )));
        }
    }

    let mut seen = HashSet::with_capacity(board.food.len());
    for food in &board.food {
        if !seen.insert(*food) {
            return Err(invalid(format!("duplicate food at {:?}", food)));
        }
    }

    Ok(())
}
