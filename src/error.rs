// Typed failures surfaced by the move selector

/// Errors returned to the caller of the move selector.
///
/// Search itself cannot fail once a snapshot has been validated, so these are
/// the only two ways a turn can go wrong.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    /// The turn snapshot is missing fields or breaks the two-snake model
    #[error("invalid game state: {0}")]
    InvalidGameState(String),

    /// Our snake has no non-fatal move at the root
    #[error("no safe move available on turn {turn}")]
    NoSafeMove { turn: i32 },
}
