use super::Token;

/// A participant: a display name and the token they drop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    name: String,
    token: Token,
}

impl Player {
    pub fn new(name: impl Into<String>, token: Token) -> Self {
        Player {
            name: name.into(),
            token,
        }
    }

    /// Get player name for display
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn token(&self) -> Token {
        self.token
    }
}
