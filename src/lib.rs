// Library exports for the Battlesnake bot
// This allows the replay tool and the integration tests to use the core bot logic

pub mod bot;
pub mod config;
pub mod debug_logger;
pub mod error;
pub mod eval;
pub mod replay;
pub mod safety;
pub mod search;
pub mod simulate;
pub mod state;
pub mod types;
