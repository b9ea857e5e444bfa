// Configuration module for reading Snake.toml
// This module provides OOP-style configuration management for the Battlesnake bot

use log::warn;
use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::types::Direction;

/// Main configuration structure containing all tunable parameters
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub search: SearchConfig,
    pub heuristic: HeuristicConfig,
    pub game_rules: GameRulesConfig,
    pub fallback: FallbackConfig,
    pub appearance: AppearanceConfig,
    pub debug: DebugConfig,
}

/// Minimax search constants
#[derive(Debug, Deserialize, Clone)]
pub struct SearchConfig {
    /// Fixed number of plies searched per decision
    pub depth: u8,
    /// Value of a node where the opponent has no safe move
    pub terminal_win_score: i64,
    /// Value of a node where our snake has no safe move
    pub terminal_loss_score: i64,
}

/// Leaf evaluation weights
#[derive(Debug, Deserialize, Clone)]
pub struct HeuristicConfig {
    pub health_weight: i64,
    pub length_weight: i64,
    pub safety_weight: i64,
    pub food_distance_weight: i64,
    /// Head distance at or below which relative length matters
    pub threat_distance: i32,
    /// Stand-in food distance when the board has no food
    pub no_food_distance: i64,
}

/// Game rules constants
#[derive(Debug, Deserialize, Clone)]
pub struct GameRulesConfig {
    pub health_on_food: i32,
    pub health_loss_per_turn: i32,
    /// Health at which a move is only safe if it lands on food
    pub starvation_health: i32,
}

/// What the HTTP layer answers when the move selector finds no safe move
#[derive(Debug, Deserialize, Clone)]
pub struct FallbackConfig {
    pub no_safe_move: String,
}

impl FallbackConfig {
    /// Parsed fallback direction; unknown labels degrade to "up".
    /// Files loaded through `Config::from_file` never reach that case.
    pub fn direction(&self) -> Direction {
        Direction::parse(&self.no_safe_move).unwrap_or_else(|e| {
            warn!("Fallback move: {}, using up", e);
            Direction::Up
        })
    }
}

/// Metadata returned by GET /
#[derive(Debug, Deserialize, Clone)]
pub struct AppearanceConfig {
    pub apiversion: String,
    pub author: String,
    pub color: String,
    pub head: String,
    pub tail: String,
}

/// Debug configuration
#[derive(Debug, Deserialize, Clone)]
pub struct DebugConfig {
    pub enabled: bool,
    pub log_file_path: String,
}

impl Config {
    /// Loads configuration from a TOML file
    ///
    /// # Arguments
    /// * `path` - Path to the Snake.toml configuration file
    ///
    /// # Returns
    /// * `Result<Config, String>` - Parsed configuration or error message
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let contents = fs::read_to_string(path.as_ref())
            .map_err(|e| format!("Failed to read config file: {}", e))?;

        Self::from_toml_str(&contents)
    }

    /// Parses configuration from TOML text and checks the fallback label
    pub fn from_toml_str(contents: &str) -> Result<Self, String> {
        let config: Config =
            toml::from_str(contents).map_err(|e| format!("Failed to parse config file: {}", e))?;

        Direction::parse(&config.fallback.no_safe_move)
            .map_err(|e| format!("Invalid [fallback].no_safe_move: {}", e))?;

        Ok(config)
    }

    /// Loads default configuration from Snake.toml in the project root
    pub fn load_default() -> Result<Self, String> {
        Self::from_file("Snake.toml")
    }

    /// Creates a configuration with hardcoded default values as fallback
    /// This should match the constants defined in Snake.toml
    pub fn default_hardcoded() -> Self {
        Config {
            search: SearchConfig {
                depth: 5,
                terminal_win_score: 9_999_999,
                terminal_loss_score: -9_999_999,
            },
            heuristic: HeuristicConfig {
                health_weight: 4,
                length_weight: 1,
                safety_weight: 20,
                food_distance_weight: -2,
                threat_distance: 5,
                no_food_distance: 9999,
            },
            game_rules: GameRulesConfig {
                health_on_food: 100,
                health_loss_per_turn: 1,
                starvation_health: 1,
            },
            fallback: FallbackConfig {
                no_safe_move: "up".to_string(),
            },
            appearance: AppearanceConfig {
                apiversion: "1".to_string(),
                author: "Mega Five".to_string(),
                color: "#00ff66".to_string(),
                head: "bonhomme".to_string(),
                tail: "coffee".to_string(),
            },
            debug: DebugConfig {
                enabled: false,
                log_file_path: "battlesnake_debug.jsonl".to_string(),
            },
        }
    }

    /// Attempts to load from file, falls back to hardcoded defaults on error
    pub fn load_or_default() -> Self {
        Self::load_default().unwrap_or_else(|e| {
            eprintln!("Warning: Could not load Snake.toml ({}), using hardcoded defaults", e);
            Self::default_hardcoded()
        })
    }
}
