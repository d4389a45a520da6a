use std::fmt;
use std::str::FromStr;

use crate::error::InputError;

/// A player's mark on the board: a single uppercase ASCII letter.
///
/// Tokens can only be built through validation, so every `Token` in the
/// program is a letter and none can be mistaken for an empty cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Token(char);

impl Token {
    /// Build a token from a letter, normalising it to uppercase.
    pub fn new(symbol: char) -> Result<Self, InputError> {
        if symbol.is_ascii_alphabetic() {
            Ok(Token(symbol.to_ascii_uppercase()))
        } else {
            Err(InputError::NotALetter)
        }
    }

    /// The character drawn on the board for this token.
    pub fn symbol(self) -> char {
        self.0
    }
}

impl FromStr for Token {
    type Err = InputError;

    /// Parse one line of player input. Anything but exactly one letter is
    /// rejected; over-long input is reported separately from a bad symbol.
    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let mut chars = input.chars();
        match (chars.next(), chars.next()) {
            (Some(symbol), None) => Token::new(symbol),
            (Some(_), Some(_)) => Err(InputError::TooLong),
            (None, _) => Err(InputError::NotALetter),
        }
    }
}

impl TryFrom<char> for Token {
    type Error = InputError;

    fn try_from(symbol: char) -> Result<Self, Self::Error> {
        Token::new(symbol)
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
