// Debug logging module for asynchronous decision logging
//
// This module provides fire-and-forget async logging to avoid blocking
// the main request/response cycle. Each turn's decision is written to a JSONL
// file that the replay tool can read back.

use log::error;
use serde::Serialize;
use std::sync::Arc;
use tokio::fs::{File, OpenOptions};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

use crate::types::{Board, Direction};

/// Represents a single debug log entry
#[derive(Debug, Serialize)]
struct DebugLogEntry {
    turn: i32,
    you_id: String,
    chosen_move: String,
    /// Absent when the search did not finish
    value: Option<i64>,
    board: Board,
    timestamp: String,
}

/// Shared debug logger state
/// Uses Arc<Mutex<File>> to allow concurrent async writes from multiple tasks
#[derive(Clone)]
pub struct DebugLogger {
    file: Arc<Mutex<Option<File>>>,
    enabled: bool,
}

impl DebugLogger {
    /// Creates a new debug logger
    /// If enabled is true, initializes the log file (truncating if it exists)
    pub async fn new(enabled: bool, log_file_path: &str) -> Self {
        if !enabled {
            return Self::disabled();
        }

        match OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(log_file_path)
            .await
        {
            Ok(file) => {
                log::info!("Debug logging enabled: {}", log_file_path);
                DebugLogger {
                    file: Arc::new(Mutex::new(Some(file))),
                    enabled: true,
                }
            }
            Err(e) => {
                error!("Failed to create debug log file '{}': {}", log_file_path, e);
                Self::disabled()
            }
        }
    }

    /// Creates a disabled debug logger (no-op)
    pub fn disabled() -> Self {
        DebugLogger {
            file: Arc::new(Mutex::new(None)),
            enabled: false,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Logs a move decision asynchronously (fire-and-forget)
    /// This spawns a tokio task that writes to the file without blocking
    pub fn log_move(&self, turn: i32, you_id: String, board: Board, chosen_move: Direction, value: Option<i64>) {
        if !self.enabled {
            return;
        }

        let file_handle = self.file.clone();
        let entry = DebugLogEntry {
            turn,
            you_id,
            chosen_move: chosen_move.as_str().to_string(),
            value,
            board,
            timestamp: chrono::Utc::now().to_rfc3339(),
        };

        tokio::spawn(async move {
            Self::log_move_internal(file_handle, entry).await;
        });
    }

    /// Internal async function that performs the actual file write
    async fn log_move_internal(file_handle: Arc<Mutex<Option<File>>>, entry: DebugLogEntry) {
        let mut file_guard = file_handle.lock().await;

        if let Some(file) = file_guard.as_mut() {
            match serde_json::to_string(&entry) {
                Ok(json_line) => {
                    let line_with_newline = format!("{}\n", json_line);
                    if let Err(e) = file.write_all(line_with_newline.as_bytes()).await {
                        error!("Failed to write debug log entry: {}", e);
                    } else if let Err(e) = file.flush().await {
                        error!("Failed to flush debug log: {}", e);
                    }
                }
                Err(e) => {
                    error!("Failed to serialize debug log entry: {}", e);
                }
            }
        }
    }
}
