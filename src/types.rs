// Battlesnake API Types
// See https://docs.battlesnake.com/api

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Game metadata including ID, ruleset, and timeout
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct Game {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub ruleset: Value,
    #[serde(default)]
    pub timeout: u32,
}

/// Board state: dimensions, food and the snakes on it
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct Board {
    pub height: i32,
    pub width: i32,
    pub food: Vec<Coord>,
    pub snakes: Vec<Battlesnake>,
    #[serde(default)]
    pub hazards: Vec<Coord>,
}

impl Board {
    /// True when the coordinate lies inside [0, width) x [0, height)
    pub fn contains(&self, coord: &Coord) -> bool {
        coord.x >= 0 && coord.y >= 0 && coord.x < self.width && coord.y < self.height
    }
}

/// Snake representation. `body` is head-first; `length` is the size the body
/// settles to after a non-growth move.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct Battlesnake {
    pub id: String,
    #[serde(default)]
    pub name: String,
    pub health: i32,
    pub body: Vec<Coord>,
    pub head: Coord,
    pub length: i32,
    #[serde(default)]
    pub latency: String,
    #[serde(default)]
    pub shout: Option<String>,
}

impl Battlesnake {
    /// Last body segment, the one that vacates on a non-growth move
    pub fn tail(&self) -> Option<&Coord> {
        self.body.last()
    }
}

/// 2D coordinate on the board
#[derive(Deserialize, Serialize, Debug, PartialEq, Eq, Clone, Copy, Hash)]
pub struct Coord {
    pub x: i32,
    pub y: i32,
}

impl Coord {
    pub fn new(x: i32, y: i32) -> Self {
        Coord { x, y }
    }

    /// Manhattan distance between two coordinates
    pub fn manhattan(&self, other: &Coord) -> i32 {
        (self.x - other.x).abs() + (self.y - other.y).abs()
    }
}

/// Represents the four possible movement directions for a Battlesnake
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Returns all possible directions, in the order the search enumerates them
    pub fn all() -> [Direction; 4] {
        [Direction::Up, Direction::Down, Direction::Left, Direction::Right]
    }

    /// Position of this direction in `Direction::all()`
    pub fn index(&self) -> usize {
        match self {
            Direction::Up => 0,
            Direction::Down => 1,
            Direction::Left => 2,
            Direction::Right => 3,
        }
    }

    /// Converts direction to string representation for API response
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }

    /// Parses an API direction label (case-insensitive)
    pub fn parse(s: &str) -> Result<Direction, String> {
        match s.to_lowercase().as_str() {
            "up" => Ok(Direction::Up),
            "down" => Ok(Direction::Down),
            "left" => Ok(Direction::Left),
            "right" => Ok(Direction::Right),
            _ => Err(format!("Invalid direction: {}", s)),
        }
    }

    /// Calculates the next coordinate when moving in this direction
    pub fn apply(&self, coord: &Coord) -> Coord {
        match self {
            Direction::Up => Coord { x: coord.x, y: coord.y + 1 },
            Direction::Down => Coord { x: coord.x, y: coord.y - 1 },
            Direction::Left => Coord { x: coord.x - 1, y: coord.y },
            Direction::Right => Coord { x: coord.x + 1, y: coord.y },
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Complete game state received from the API
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct GameState {
    #[serde(default)]
    pub game: Game,
    pub turn: i32,
    pub board: Board,
    pub you: Battlesnake,
}
