use std::path::PathBuf;

/// Errors returned when a token cannot be placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("column {column} is full")]
    ColumnFull { column: usize },

    #[error("column {column} is out of range (expected 0-6)")]
    InvalidColumn { column: usize },

    #[error("the game is already over")]
    GameOver,
}

/// Errors produced while validating a line of player input.
///
/// The display strings are what the prompt loop prints before asking again.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InputError {
    #[error("Please input only 1 character")]
    TooLong,

    #[error("Please input a letter (A-Z)")]
    NotALetter,

    #[error("Please input a number between 0 - 6")]
    NotAColumn,

    #[error("That token is already taken")]
    TokenTaken,
}

/// Errors that can occur when setting up a game.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("both players chose the token '{0}'")]
    DuplicateToken(char),
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
}
