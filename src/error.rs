use std::path::PathBuf;

use crate::game::Player;

/// Errors raised when a board is constructed with impossible dimensions.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("board dimensions must be positive (got {rows}x{cols})")]
    InvalidDimensions { rows: usize, cols: usize },

    #[error("num_win must be in [3, {max}] for a {rows}x{cols} board (got {num_win})")]
    InvalidNumWin {
        rows: usize,
        cols: usize,
        num_win: usize,
        max: usize,
    },

    #[error("board of {cells} cells is too large to score")]
    TooLarge { cells: usize },
}

/// Errors that can occur when asking the engine for a move.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    #[error("unknown search variant '{0}' (expected negamax, alphabeta, negascout, caching or hashing)")]
    UnknownVariant(String),

    #[error("no available moves on the board")]
    NoAvailableMoves,

    #[error("time budget must be positive")]
    InvalidTimeBudget,

    #[error("game is already over: {} has won", .0.name())]
    GameOver(Player),
}

/// Errors that can occur while playing a headless game.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlayError {
    #[error("{agent} selected unavailable move {mv}")]
    IllegalMove { agent: String, mv: String },

    #[error("{agent} returned no move with {left} cells left")]
    NoMove { agent: String, left: usize },
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),

    #[error("invalid board: {0}")]
    Board(#[from] BoardError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_error_display() {
        let err = BoardError::InvalidNumWin {
            rows: 3,
            cols: 3,
            num_win: 5,
            max: 3,
        };
        assert_eq!(
            err.to_string(),
            "num_win must be in [3, 3] for a 3x3 board (got 5)"
        );
    }

    #[test]
    fn test_search_error_display() {
        let err = SearchError::UnknownVariant("mcts".to_string());
        assert!(err.to_string().starts_with("unknown search variant 'mcts'"));
        assert_eq!(
            SearchError::NoAvailableMoves.to_string(),
            "no available moves on the board"
        );
    }

    #[test]
    fn test_config_error_from_board_error() {
        let err: ConfigError = BoardError::InvalidDimensions { rows: 0, cols: 3 }.into();
        assert_eq!(
            err.to_string(),
            "invalid board: board dimensions must be positive (got 0x3)"
        );
    }

    #[test]
    fn test_play_error_display() {
        let err = PlayError::NoMove {
            agent: "Random".to_string(),
            left: 4,
        };
        assert_eq!(err.to_string(), "Random returned no move with 4 cells left");
    }

    #[test]
    fn test_game_over_display() {
        assert_eq!(
            SearchError::GameOver(Player::O).to_string(),
            "game is already over: O has won"
        );
    }
}
