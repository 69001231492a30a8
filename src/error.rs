use std::path::PathBuf;

/// Errors returned when a move cannot be applied.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("column {column} is full")]
    ColumnFull { column: usize },

    #[error("column {column} is out of range")]
    InvalidColumn { column: usize },

    #[error("the game is already over")]
    GameOver,
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

    #[error("failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("missing heuristic weight '{key}'")]
    MissingWeight { key: &'static str },

    #[error("heuristic weight '{key}' must be a finite number, got {value}")]
    InvalidWeight { key: &'static str, value: String },

    #[error("config validation error: {0}")]
    Validation(String),
}

/// Errors that can occur while reading or writing the game log.
#[derive(Debug, thiserror::Error)]
pub enum HistoryError {
    #[error("failed to read game log {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("malformed move list in game {id}: {input:?}")]
    MalformedMoves { id: u64, input: String },

    #[error("invalid side value {value} in game {id}")]
    InvalidSide { id: u64, value: i8 },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised while selecting a move.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    #[error("no legal moves available")]
    NoLegalMoves,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_error_display() {
        let err = MoveError::ColumnFull { column: 4 };
        assert_eq!(err.to_string(), "column 4 is full");
    }

    #[test]
    fn test_missing_weight_names_key() {
        let err = ConfigError::MissingWeight {
            key: "block_opponent_win",
        };
        assert_eq!(
            err.to_string(),
            "missing heuristic weight 'block_opponent_win'"
        );
    }

    #[test]
    fn test_history_error_display() {
        let err = HistoryError::MalformedMoves {
            id: 3,
            input: "[(5, x)]".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "malformed move list in game 3: \"[(5, x)]\""
        );
    }

    #[test]
    fn test_engine_error_display() {
        assert_eq!(
            EngineError::NoLegalMoves.to_string(),
            "no legal moves available"
        );
    }
}
