// Replay module for analyzing logged decisions
//
// This module provides functionality to:
// 1. Parse JSONL decision logs written by the debug logger
// 2. Re-run the move selector on the logged boards
// 3. Compare logged vs replayed moves
// 4. Generate summary reports

use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::time::Instant;

use crate::bot::Bot;
use crate::config::Config;
use crate::types::{Board, Direction, Game, GameState};

/// Represents a single log entry from the debug JSONL file
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LogEntry {
    pub turn: i32,
    pub you_id: String,
    pub chosen_move: String,
    #[serde(default)]
    pub value: Option<i64>,
    pub board: Board,
    #[serde(default)]
    pub timestamp: String,
}

/// Result of replaying a single turn
#[derive(Debug, Clone)]
pub struct ReplayResult {
    pub turn: i32,
    pub original_move: Direction,
    pub replayed_move: Direction,
    pub matches: bool,
    pub original_value: Option<i64>,
    pub replayed_value: i64,
    pub nodes: u64,
    pub computation_time_ms: u128,
}

/// Statistics for a complete replay session
#[derive(Debug, Default)]
pub struct ReplayStats {
    pub total_turns: usize,
    pub matches: usize,
    pub mismatches: usize,
    pub match_rate: f64,
}

/// Replay engine for analyzing decision logs
pub struct ReplayEngine {
    config: Config,
    verbose: bool,
}

impl ReplayEngine {
    /// Creates a new replay engine with the given configuration
    pub fn new(config: Config, verbose: bool) -> Self {
        ReplayEngine { config, verbose }
    }

    /// Loads all log entries from a JSONL file
    pub fn load_log_file<P: AsRef<Path>>(&self, log_path: P) -> Result<Vec<LogEntry>, String> {
        let file =
            File::open(log_path.as_ref()).map_err(|e| format!("Failed to open log file: {}", e))?;

        let reader = BufReader::new(file);
        let mut entries = Vec::new();

        for (line_num, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| format!("Failed to read line {}: {}", line_num + 1, e))?;

            if line.trim().is_empty() {
                continue;
            }

            let entry: LogEntry = serde_json::from_str(&line)
                .map_err(|e| format!("Failed to parse JSON on line {}: {}", line_num + 1, e))?;

            entries.push(entry);
        }

        info!("Loaded {} log entries", entries.len());
        Ok(entries)
    }

    /// Re-runs the move selector on a logged board.
    /// Returns the direction that would be sent, its value and the node count.
    pub fn replay_turn(
        &self,
        turn: i32,
        board: &Board,
        our_snake_id: &str,
    ) -> Result<(Direction, i64, u64), String> {
        let you = board
            .snakes
            .iter()
            .find(|s| s.id == our_snake_id)
            .ok_or_else(|| format!("Snake with id '{}' not found in board state", our_snake_id))?;

        let state = GameState {
            game: Game::default(),
            turn,
            board: board.clone(),
            you: you.clone(),
        };

        let decision = Bot::select_move(&state, &self.config);
        let nodes = decision.as_ref().map(|d| d.stats.nodes).unwrap_or(0);
        let (direction, value) = Bot::resolve(decision, &self.config).map_err(|e| e.to_string())?;

        Ok((direction, value, nodes))
    }

    /// Replays a single log entry and compares the result
    pub fn replay_entry(&self, entry: &LogEntry) -> Result<ReplayResult, String> {
        if self.verbose {
            info!("Replaying turn {}...", entry.turn);
        }

        let original_move = Direction::parse(&entry.chosen_move)?;

        let start_time = Instant::now();
        let (replayed_move, replayed_value, nodes) =
            self.replay_turn(entry.turn, &entry.board, &entry.you_id)?;
        let computation_time = start_time.elapsed().as_millis();

        let matches = original_move == replayed_move;

        let result = ReplayResult {
            turn: entry.turn,
            original_move,
            replayed_move,
            matches,
            original_value: entry.value,
            replayed_value,
            nodes,
            computation_time_ms: computation_time,
        };

        if self.verbose {
            if matches {
                info!(
                    "Turn {}: ✓ MATCH - {} (value: {}, nodes: {}, time: {}ms)",
                    entry.turn,
                    replayed_move.as_str(),
                    replayed_value,
                    nodes,
                    computation_time
                );
            } else {
                warn!(
                    "Turn {}: ✗ MISMATCH - Original: {}, Replayed: {} (value: {}, nodes: {}, time: {}ms)",
                    entry.turn,
                    original_move.as_str(),
                    replayed_move.as_str(),
                    replayed_value,
                    nodes,
                    computation_time
                );
            }
        }

        Ok(result)
    }

    /// Replays all entries in a log file; entries that fail are skipped with a warning
    pub fn replay_all(&self, entries: &[LogEntry]) -> Vec<ReplayResult> {
        entries
            .iter()
            .filter_map(|entry| match self.replay_entry(entry) {
                Ok(result) => Some(result),
                Err(e) => {
                    warn!("Failed to replay turn {}: {}", entry.turn, e);
                    None
                }
            })
            .collect()
    }

    /// Replays specific turns from a log file
    pub fn replay_turns(
        &self,
        entries: &[LogEntry],
        turn_numbers: &[i32],
    ) -> Result<Vec<ReplayResult>, String> {
        let mut results = Vec::new();

        for turn_num in turn_numbers {
            let entry = entries
                .iter()
                .find(|e| e.turn == *turn_num)
                .ok_or_else(|| format!("Turn {} not found in log file", turn_num))?;

            match self.replay_entry(entry) {
                Ok(result) => results.push(result),
                Err(e) => {
                    warn!("Failed to replay turn {}: {}", turn_num, e);
                }
            }
        }

        Ok(results)
    }

    /// Generates statistics from replay results
    pub fn generate_stats(&self, results: &[ReplayResult]) -> ReplayStats {
        let total_turns = results.len();
        let matches = results.iter().filter(|r| r.matches).count();
        let mismatches = total_turns - matches;
        let match_rate = if total_turns > 0 {
            (matches as f64 / total_turns as f64) * 100.0
        } else {
            0.0
        };

        ReplayStats {
            total_turns,
            matches,
            mismatches,
            match_rate,
        }
    }

    /// Prints a detailed report of replay results
    pub fn print_report(&self, results: &[ReplayResult]) {
        let stats = self.generate_stats(results);

        println!("\n═══════════════════════════════════════════════════════════");
        println!("                    REPLAY REPORT");
        println!("═══════════════════════════════════════════════════════════");
        println!("Total Turns:    {}", stats.total_turns);
        println!("Matches:        {} ({:.1}%)", stats.matches, stats.match_rate);
        println!("Mismatches:     {}", stats.mismatches);
        println!("═══════════════════════════════════════════════════════════\n");

        if !results.is_empty() {
            let avg_time: f64 = results
                .iter()
                .map(|r| r.computation_time_ms as f64)
                .sum::<f64>()
                / results.len() as f64;
            let avg_nodes: f64 =
                results.iter().map(|r| r.nodes as f64).sum::<f64>() / results.len() as f64;

            println!("Average Nodes Searched:     {:.1}", avg_nodes);
            println!("Average Computation Time:   {:.1}ms\n", avg_time);
        }

        let mismatches: Vec<_> = results.iter().filter(|r| !r.matches).collect();
        if !mismatches.is_empty() {
            println!("═══════════════════════════════════════════════════════════");
            println!("                  DETAILED MISMATCHES");
            println!("═══════════════════════════════════════════════════════════");

            for result in mismatches {
                println!(
                    "Turn {}: {} → {} (logged value: {}, replayed value: {})",
                    result.turn,
                    result.original_move.as_str(),
                    result.replayed_move.as_str(),
                    result
                        .original_value
                        .map(|v| v.to_string())
                        .unwrap_or_else(|| "-".to_string()),
                    result.replayed_value
                );
            }
            println!();
        }
    }

    /// Validates that specific expected moves were logged
    pub fn validate_expected_moves(
        &self,
        entries: &[LogEntry],
        expected_moves: &[(i32, Vec<Direction>)], // (turn, acceptable_moves)
    ) -> Result<(), String> {
        for (turn, acceptable) in expected_moves {
            let entry = entries
                .iter()
                .find(|e| e.turn == *turn)
                .ok_or_else(|| format!("Turn {} not found in log", turn))?;

            let actual_move = Direction::parse(&entry.chosen_move)?;

            if !acceptable.contains(&actual_move) {
                return Err(format!(
                    "Turn {}: Expected one of {:?}, but got {}",
                    turn,
                    acceptable.iter().map(|d| d.as_str()).collect::<Vec<_>>(),
                    actual_move.as_str()
                ));
            }
        }

        Ok(())
    }
}
