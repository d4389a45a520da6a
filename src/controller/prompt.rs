use std::io::{self, BufRead, Write};

use tracing::{debug, info};

use crate::config::DisplayConfig;
use crate::error::{InputError, MoveError};
use crate::game::{Board, GameResult, GameState, Player, Token, COLS, COLUMN_HEADER, SEPARATOR};

/// Validate a token choice: exactly one letter, uppercased.
pub fn token_check(input: &str) -> Result<Token, InputError> {
    input.parse()
}

/// Validate a column choice: a single digit from 0 to 6.
pub fn column_check(input: &str) -> Result<usize, InputError> {
    let mut chars = input.chars();
    match (chars.next(), chars.next()) {
        (Some(digit), None) => digit
            .to_digit(10)
            .map(|d| d as usize)
            .filter(|&d| d < COLS)
            .ok_or(InputError::NotAColumn),
        (Some(_), Some(_)) => Err(InputError::TooLong),
        (None, _) => Err(InputError::NotAColumn),
    }
}

/// Line-oriented game controller.
///
/// Reads answers from `input` and writes prompts, boards and messages to
/// `output`. Invalid answers are reported and asked for again.
pub struct Prompter<R, W> {
    input: R,
    output: W,
    display: DisplayConfig,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W, display: DisplayConfig) -> Self {
        Prompter {
            input,
            output,
            display,
        }
    }

    fn say(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.output, "{message}")
    }

    /// Read one line without its line ending. Running out of input is an error
    /// so an unfinished script cannot spin forever.
    fn read_line(&mut self) -> io::Result<String> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "input ended before the game finished",
            ));
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }

    /// Ask for a name and a token. A token equal to `taken` is refused.
    pub fn create_player(&mut self, taken: Option<Token>) -> io::Result<Player> {
        self.say("Welcome! What is your name?")?;
        let name = self.read_line()?;
        self.say(&format!("Welcome {name}, what will be your token?"))?;

        loop {
            let answer = self.read_line()?;
            let checked = token_check(&answer).and_then(|token| {
                if Some(token) == taken {
                    Err(InputError::TokenTaken)
                } else {
                    Ok(token)
                }
            });
            match checked {
                Ok(token) => {
                    debug!(%name, %token, "player created");
                    return Ok(Player::new(name, token));
                }
                Err(e) => {
                    debug!(%answer, error = %e, "token rejected");
                    self.say(&e.to_string())?;
                }
            }
        }
    }

    /// Ask both players to introduce themselves and start a game.
    pub fn setup_game(&mut self) -> io::Result<GameState> {
        let one = self.create_player(None)?;
        let two = self.create_player(Some(one.token()))?;
        GameState::new(one, two).map_err(|e| io::Error::new(io::ErrorKind::InvalidInput, e))
    }

    /// Ask `name` for a column until a valid one is given.
    pub fn read_column(&mut self, name: &str) -> io::Result<usize> {
        self.say(&format!(
            "{}, in which column will you place your next token?",
            name.to_uppercase()
        ))?;

        loop {
            let answer = self.read_line()?;
            match column_check(&answer) {
                Ok(column) => return Ok(column),
                Err(e) => {
                    debug!(%answer, error = %e, "column rejected");
                    self.say(&e.to_string())?;
                }
            }
        }
    }

    pub fn show_board(&mut self, board: &Board) -> io::Result<()> {
        if self.display.column_header {
            self.say(COLUMN_HEADER)?;
            self.say(SEPARATOR)?;
        }
        for row in board.render() {
            self.say(&row)?;
        }
        self.say(SEPARATOR)
    }

    /// Run turns until the board reports a win or a tie, then announce it.
    pub fn play(&mut self, state: &mut GameState) -> io::Result<GameResult> {
        loop {
            if state.is_terminal() {
                break;
            }
            if self.display.board_every_turn {
                self.show_board(state.board())?;
            }

            let name = state.current_player().name().to_string();
            let column = self.read_column(&name)?;
            match state.apply_move(column) {
                Ok(_) => {}
                Err(MoveError::ColumnFull { column }) => {
                    self.say(&format!("Column {column} is full, pick another"))?;
                }
                Err(e) => return Err(io::Error::new(io::ErrorKind::InvalidInput, e)),
            }
        }

        self.show_board(state.board())?;
        if let Some(message) = state.end_message() {
            self.say(&message)?;
        }
        self.output.flush()?;

        let result = state.result();
        info!(turns = state.turn(), ?result, "game finished");
        Ok(result)
    }
}
