use tracing::{debug, info};

use super::{Board, GameResult, Player, COLS, WIN_LENGTH};
use crate::error::{GameError, MoveError};

/// A game in progress: the board, both players and the turn counter.
///
/// The result is never stored; it is recomputed from the board on demand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    board: Board,
    players: [Player; 2],
    turn: usize,
}

impl GameState {
    /// Start a game on an empty board. Player one moves first.
    pub fn new(one: Player, two: Player) -> Result<Self, GameError> {
        if one.token() == two.token() {
            return Err(GameError::DuplicateToken(one.token().symbol()));
        }
        info!(
            one = one.name(),
            two = two.name(),
            "game started"
        );
        Ok(GameState {
            board: Board::new(),
            players: [one, two],
            turn: 0,
        })
    }

    /// Clear the board and turn counter, keeping the same players.
    pub fn restart(&mut self) {
        self.board = Board::new();
        self.turn = 0;
        info!("game restarted");
    }

    /// Get reference to board
    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn players(&self) -> &[Player; 2] {
        &self.players
    }

    /// Number of tokens placed so far.
    pub fn turn(&self) -> usize {
        self.turn
    }

    /// Index (0 or 1) of the player whose turn it is.
    pub fn current_index(&self) -> usize {
        self.turn % 2
    }

    /// Player one acts on even turns, player two on odd.
    pub fn current_player(&self) -> &Player {
        &self.players[self.current_index()]
    }

    pub fn result(&self) -> GameResult {
        self.board
            .evaluate(self.players[0].token(), self.players[1].token())
    }

    /// Check if game is over
    pub fn is_terminal(&self) -> bool {
        self.result().is_over()
    }

    /// Get list of legal columns (not full)
    pub fn legal_columns(&self) -> Vec<usize> {
        if self.is_terminal() {
            return Vec::new();
        }

        (0..COLS)
            .filter(|&col| !self.board.is_column_full(col))
            .collect()
    }

    /// Drop the current player's token into `column` and pass the turn.
    ///
    /// A rejected move leaves both the board and the turn counter unchanged.
    pub fn apply_move(&mut self, column: usize) -> Result<GameResult, MoveError> {
        if self.is_terminal() {
            return Err(MoveError::GameOver);
        }

        let token = self.current_player().token();
        self.board.place(token, column)?;
        self.turn += 1;

        let result = self.result();
        debug!(turn = self.turn, ?result, "move applied");
        if let GameResult::Win(_) | GameResult::Tie = result {
            info!(turn = self.turn, ?result, "game over");
        }
        Ok(result)
    }

    /// The player holding the winning token, if the game has been won.
    pub fn winner(&self) -> Option<&Player> {
        match self.result() {
            GameResult::Win(token) => self.players.iter().find(|p| p.token() == token),
            GameResult::InProgress | GameResult::Tie => None,
        }
    }

    /// A win in the fewest moves possible: the winner's four tokens plus the
    /// opponent's replies. That is 7 placements when player one wins and 8 when
    /// player two does.
    pub fn is_perfect_game(&self) -> bool {
        let GameResult::Win(token) = self.result() else {
            return false;
        };
        let minimum = if token == self.players[0].token() {
            2 * WIN_LENGTH - 1
        } else {
            2 * WIN_LENGTH
        };
        self.turn == minimum
    }

    /// Closing line for a finished game.
    pub fn end_message(&self) -> Option<String> {
        match self.result() {
            GameResult::InProgress => None,
            GameResult::Tie => Some("It's a Tie!".to_string()),
            GameResult::Win(_) => {
                let name = self.winner().map(Player::name).unwrap_or_default();
                if self.is_perfect_game() {
                    Some(format!("Congrats {name}! You won with a perfect game!"))
                } else {
                    Some(format!("Congrats {name}! You won!"))
                }
            }
        }
    }
}
