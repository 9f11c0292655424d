//! Error types for player-facing operations and persistence.

use thiserror::Error;

/// Why a player action (purchase, ascension, skill, mission claim) was refused.
///
/// None of these are fatal: the caller keeps the button disabled or ignores
/// the input, and game state is left untouched.
#[derive(Debug, Error)]
pub enum GameError {
    #[error("insufficient funds: need {cost}, have {available}")]
    InsufficientFunds { cost: f64, available: f64 },

    #[error("not eligible: {reason}")]
    NotEligible { reason: String },

    #[error("locked until level {required_level}")]
    Locked { required_level: u32 },

    #[error("unknown entity: {0}")]
    UnknownEntity(String),

    #[error("skill on cooldown for {remaining:.1}s")]
    SkillOnCooldown { remaining: f64 },

    #[error("mission not ready to claim: {0}")]
    MissionNotReady(String),

    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}

/// Save/load failures. Logged and reported as a failure signal, never fatal.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("durable storage is unavailable")]
    StorageUnavailable,

    #[error("failed to encode save: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("failed to decode save: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("save version {found} is older than the minimum supported {min}")]
    UnsupportedVersion { found: u32, min: u32 },

    #[error("save version {found} is newer than this build ({current})")]
    FutureVersion { found: u32, current: u32 },

    #[error("storage write failed: {0}")]
    Write(String),
}

pub type GameResult<T> = Result<T, GameError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insufficient_funds_message_names_both_amounts() {
        let e = GameError::InsufficientFunds {
            cost: 115.0,
            available: 40.0,
        };
        let msg = e.to_string();
        assert!(msg.contains("115"));
        assert!(msg.contains("40"));
    }

    #[test]
    fn persistence_error_converts_into_game_error() {
        let e: GameError = PersistenceError::StorageUnavailable.into();
        assert!(matches!(e, GameError::Persistence(PersistenceError::StorageUnavailable)));
    }
}
