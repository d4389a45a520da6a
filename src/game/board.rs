use std::fmt;

use tracing::debug;

use super::Token;
use crate::error::MoveError;

pub const ROWS: usize = 6;
pub const COLS: usize = 7;

/// Number of aligned tokens needed to win.
pub const WIN_LENGTH: usize = 4;

/// Column labels printed above the board.
pub const COLUMN_HEADER: &str = "| 0 | 1 | 2 | 3 | 4 | 5 | 6 |";
pub const SEPARATOR: &str = "----------------------------";

/// A board coordinate as `(column, row)`. Row 0 is the bottom of the board.
pub type Position = (usize, usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Empty,
    Occupied(Token),
}

impl Cell {
    pub fn token(self) -> Option<Token> {
        match self {
            Cell::Empty => None,
            Cell::Occupied(token) => Some(token),
        }
    }

    pub fn is_empty(self) -> bool {
        self == Cell::Empty
    }
}

/// Whether the game has ended, and how. Always derived from the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameResult {
    InProgress,
    Win(Token),
    Tie,
}

impl GameResult {
    pub fn is_over(self) -> bool {
        self != GameResult::InProgress
    }
}

/// One of the four line families scanned for a win.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Rows, left to right.
    Horizontal,
    /// Columns, bottom to top.
    Vertical,
    /// Positive slope, `(+1, +1)`.
    Diagonal,
    /// Negative slope, `(+1, -1)`.
    AntiDiagonal,
}

impl Direction {
    /// Families in the order `evaluate` scans them.
    pub const ALL: [Direction; 4] = [
        Direction::Horizontal,
        Direction::Vertical,
        Direction::Diagonal,
        Direction::AntiDiagonal,
    ];

    /// Step as `(column delta, row delta)`.
    pub fn step(self) -> (isize, isize) {
        match self {
            Direction::Horizontal => (1, 0),
            Direction::Vertical => (0, 1),
            Direction::Diagonal => (1, 1),
            Direction::AntiDiagonal => (1, -1),
        }
    }
}

/// Move `pos` by `delta`, or `None` if that leaves the board.
fn offset(pos: Position, (dc, dr): (isize, isize)) -> Option<Position> {
    let col = pos.0.checked_add_signed(dc)?;
    let row = pos.1.checked_add_signed(dr)?;
    (col < COLS && row < ROWS).then_some((col, row))
}

/// Every line of length at least [`WIN_LENGTH`] in one family.
///
/// A line starts at each cell whose predecessor along `direction` is off the
/// board, and runs forward until it leaves the board. Starts are visited
/// column by column, bottom to top, so the order is fixed for a given family.
pub fn lines(direction: Direction) -> impl Iterator<Item = Vec<Position>> {
    let (dc, dr) = direction.step();
    (0..COLS)
        .flat_map(|col| (0..ROWS).map(move |row| (col, row)))
        .filter(move |&pos| offset(pos, (-dc, -dr)).is_none())
        .map(move |start| {
            std::iter::successors(Some(start), |&pos| offset(pos, (dc, dr))).collect::<Vec<_>>()
        })
        .filter(|line| line.len() >= WIN_LENGTH)
}

/// The 7x6 grid. Stored column-major; each column fills from row 0 up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Board {
    columns: [[Cell; ROWS]; COLS],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Board {
            columns: [[Cell::Empty; ROWS]; COLS],
        }
    }

    /// Get the cell at a specific position. Row 0 is the bottom.
    pub fn get(&self, col: usize, row: usize) -> Cell {
        self.columns[col][row]
    }

    fn cell_at(&self, (col, row): Position) -> Cell {
        self.columns[col][row]
    }

    /// Number of tokens already stacked in a column.
    pub fn column_height(&self, col: usize) -> usize {
        self.columns[col]
            .iter()
            .position(|cell| cell.is_empty())
            .unwrap_or(ROWS)
    }

    /// Check if a column is full. Out-of-range columns count as full.
    pub fn is_column_full(&self, col: usize) -> bool {
        if col >= COLS {
            return true;
        }
        !self.columns[col][ROWS - 1].is_empty()
    }

    /// Check if the board is completely full
    pub fn is_full(&self) -> bool {
        (0..COLS).all(|col| self.is_column_full(col))
    }

    /// Drop `token` into `column`, returning the row where it landed.
    ///
    /// The grid is left untouched on error.
    pub fn place(&mut self, token: Token, column: usize) -> Result<usize, MoveError> {
        if column >= COLS {
            return Err(MoveError::InvalidColumn { column });
        }
        if self.is_column_full(column) {
            return Err(MoveError::ColumnFull { column });
        }

        let row = self.column_height(column);
        self.columns[column][row] = Cell::Occupied(token);
        debug!(%token, column, row, "token placed");
        Ok(row)
    }

    /// Decide whether the game is won, tied or still running.
    ///
    /// Rows are scanned first, then columns, diagonals and anti-diagonals. The
    /// first window of four cells all holding `one` (or all holding `two`)
    /// decides the winner. Tokens belonging to neither player never win.
    pub fn evaluate(&self, one: Token, two: Token) -> GameResult {
        if let Some(token) = self.winning_token(one, two) {
            GameResult::Win(token)
        } else if self.is_full() {
            GameResult::Tie
        } else {
            GameResult::InProgress
        }
    }

    fn winning_token(&self, one: Token, two: Token) -> Option<Token> {
        Direction::ALL
            .into_iter()
            .flat_map(lines)
            .find_map(|line| {
                line.windows(WIN_LENGTH)
                    .find_map(|window| self.window_owner(window, one, two))
            })
    }

    /// The token filling every cell of `window`, if it is one of the players'.
    fn window_owner(&self, window: &[Position], one: Token, two: Token) -> Option<Token> {
        let first = self.cell_at(window[0]).token()?;
        if first != one && first != two {
            return None;
        }
        window
            .iter()
            .all(|&pos| self.cell_at(pos) == Cell::Occupied(first))
            .then_some(first)
    }

    /// Text rows from the top of the board (row 5) down to row 0.
    ///
    /// The iterator is lazy and can be cloned to walk the rows again.
    pub fn render(&self) -> impl Iterator<Item = String> + Clone + '_ {
        (0..ROWS).rev().map(move |row| self.render_row(row))
    }

    fn render_row(&self, row: usize) -> String {
        let mut line = String::with_capacity(1 + COLS * 4);
        line.push('|');
        for col in 0..COLS {
            match self.get(col, row) {
                Cell::Empty => line.push_str("   "),
                Cell::Occupied(token) => {
                    line.push(' ');
                    line.push(token.symbol());
                    line.push(' ');
                }
            }
            line.push('|');
        }
        line
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{COLUMN_HEADER}")?;
        writeln!(f, "{SEPARATOR}")?;
        for row in self.render() {
            writeln!(f, "{row}")?;
        }
        writeln!(f, "{SEPARATOR}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn x() -> Token {
        Token::new('X').unwrap()
    }

    fn o() -> Token {
        Token::new('O').unwrap()
    }

    /// Stack `tokens` into `col` from the bottom up.
    fn fill_column(board: &mut Board, col: usize, tokens: &[Token]) {
        for &token in tokens {
            board.place(token, col).unwrap();
        }
    }

    /// Full board with no four in a row: columns alternate XXXOOO / OOOXXX.
    fn tied_board() -> Board {
        let mut board = Board::new();
        for col in 0..COLS {
            for row in 0..ROWS {
                let token = if (col % 2 == 0) ^ (row >= 3) { x() } else { o() };
                board.place(token, col).unwrap();
            }
        }
        board
    }

    #[test]
    fn test_new_board_is_empty() {
        let board = Board::new();
        for col in 0..COLS {
            for row in 0..ROWS {
                assert_eq!(board.get(col, row), Cell::Empty);
            }
        }
    }

    #[test]
    fn test_place_stacks_from_bottom() {
        let mut board = Board::new();

        let row = board.place(x(), 3).unwrap();
        assert_eq!(row, 0);
        assert_eq!(board.get(3, 0), Cell::Occupied(x()));

        let row = board.place(o(), 3).unwrap();
        assert_eq!(row, 1);
        assert_eq!(board.get(3, 1), Cell::Occupied(o()));
        assert_eq!(board.column_height(3), 2);
    }

    #[test]
    fn test_column_full() {
        let mut board = Board::new();
        fill_column(&mut board, 0, &[x(), o(), x(), o(), x(), o()]);

        assert!(board.is_column_full(0));
        let before = board;
        assert_eq!(board.place(x(), 0), Err(MoveError::ColumnFull { column: 0 }));
        assert_eq!(board, before);
    }

    #[test]
    fn test_invalid_column() {
        let mut board = Board::new();
        assert_eq!(
            board.place(x(), 7),
            Err(MoveError::InvalidColumn { column: 7 })
        );
        assert_eq!(board, Board::new());
        assert!(board.is_column_full(7));
    }

    #[test]
    fn test_full_board() {
        let board = tied_board();
        assert!(board.is_full());
    }

    #[test]
    fn test_line_counts_per_family() {
        assert_eq!(lines(Direction::Horizontal).count(), ROWS);
        assert_eq!(lines(Direction::Vertical).count(), COLS);
        assert_eq!(lines(Direction::Diagonal).count(), 6);
        assert_eq!(lines(Direction::AntiDiagonal).count(), 6);
    }

    #[test]
    fn test_lines_are_long_enough_and_step_correctly() {
        for direction in Direction::ALL {
            let (dc, dr) = direction.step();
            for line in lines(direction) {
                assert!(line.len() >= WIN_LENGTH);
                for pair in line.windows(2) {
                    let (c0, r0) = pair[0];
                    let (c1, r1) = pair[1];
                    assert_eq!(c1 as isize - c0 as isize, dc);
                    assert_eq!(r1 as isize - r0 as isize, dr);
                }
            }
        }
    }

    #[test]
    fn test_anti_diagonals_cover_corners() {
        let anti: Vec<_> = lines(Direction::AntiDiagonal).collect();
        assert_eq!(anti[0], vec![(0, 3), (1, 2), (2, 1), (3, 0)]);
        assert!(anti.iter().any(|line| line.last() == Some(&(6, 0))));
        assert!(anti.iter().any(|line| line.first() == Some(&(3, 5))));
    }

    #[test]
    fn test_empty_board_in_progress() {
        assert_eq!(Board::new().evaluate(x(), o()), GameResult::InProgress);
    }

    #[test]
    fn test_horizontal_win() {
        let mut board = Board::new();
        for col in 0..4 {
            board.place(x(), col).unwrap();
        }
        assert_eq!(board.evaluate(x(), o()), GameResult::Win(x()));
    }

    #[test]
    fn test_horizontal_win_away_from_edge() {
        let mut board = Board::new();
        fill_column(&mut board, 0, &[o(), o(), o()]);
        for col in 3..7 {
            board.place(x(), col).unwrap();
        }
        assert_eq!(board.evaluate(x(), o()), GameResult::Win(x()));
    }

    #[test]
    fn test_vertical_win() {
        let mut board = Board::new();
        fill_column(&mut board, 0, &[o(), o(), o(), o()]);
        assert_eq!(board.evaluate(x(), o()), GameResult::Win(o()));
    }

    #[test]
    fn test_vertical_win_at_top_of_column() {
        let mut board = Board::new();
        fill_column(&mut board, 6, &[o(), o(), x(), x(), x(), x()]);
        assert_eq!(board.evaluate(x(), o()), GameResult::Win(x()));
    }

    #[test]
    fn test_diagonal_win() {
        // (0,0) (1,1) (2,2) (3,3)
        let mut board = Board::new();
        fill_column(&mut board, 0, &[x()]);
        fill_column(&mut board, 1, &[o(), x()]);
        fill_column(&mut board, 2, &[o(), o(), x()]);
        fill_column(&mut board, 3, &[o(), x(), o(), x()]);
        assert_eq!(board.evaluate(x(), o()), GameResult::Win(x()));
    }

    #[test]
    fn test_anti_diagonal_win() {
        // (0,3) (1,2) (2,1) (3,0)
        let mut board = Board::new();
        fill_column(&mut board, 0, &[o(), x(), o(), x()]);
        fill_column(&mut board, 1, &[o(), o(), x()]);
        fill_column(&mut board, 2, &[o(), x()]);
        fill_column(&mut board, 3, &[x()]);
        assert_eq!(board.evaluate(x(), o()), GameResult::Win(x()));
    }

    #[test]
    fn test_short_upper_diagonal_win() {
        // (3,2) (4,3) (5,4) (6,5): a length-4 diagonal off the main ones
        let mut board = Board::new();
        fill_column(&mut board, 3, &[o(), x(), o()]);
        fill_column(&mut board, 4, &[x(), o(), x(), o()]);
        fill_column(&mut board, 5, &[o(), x(), x(), o(), o()]);
        fill_column(&mut board, 6, &[x(), o(), x(), x(), o(), o()]);
        assert_eq!(board.evaluate(x(), o()), GameResult::Win(o()));
    }

    #[test]
    fn test_short_upper_anti_diagonal_win() {
        // (3,5) (4,4) (5,3) (6,2)
        let mut board = Board::new();
        fill_column(&mut board, 3, &[x(), o(), x(), x(), o(), x()]);
        fill_column(&mut board, 4, &[o(), x(), o(), o(), x()]);
        fill_column(&mut board, 5, &[x(), o(), o(), x()]);
        fill_column(&mut board, 6, &[o(), x(), x()]);
        assert_eq!(board.evaluate(x(), o()), GameResult::Win(x()));
    }

    #[test]
    fn test_no_win_with_three() {
        let mut board = Board::new();
        for col in 0..3 {
            board.place(x(), col).unwrap();
        }
        fill_column(&mut board, 6, &[o(), o(), o()]);
        assert_eq!(board.evaluate(x(), o()), GameResult::InProgress);
    }

    #[test]
    fn test_mixed_window_is_not_a_win() {
        let mut board = Board::new();
        for (col, token) in [x(), x(), o(), x()].into_iter().enumerate() {
            board.place(token, col).unwrap();
        }
        assert_eq!(board.evaluate(x(), o()), GameResult::InProgress);
    }

    #[test]
    fn test_unknown_token_never_wins() {
        let z = Token::new('Z').unwrap();
        let mut board = Board::new();
        fill_column(&mut board, 2, &[z, z, z, z]);
        assert_eq!(board.evaluate(x(), o()), GameResult::InProgress);
    }

    #[test]
    fn test_tie() {
        let board = tied_board();
        assert_eq!(board.evaluate(x(), o()), GameResult::Tie);
    }

    #[test]
    fn test_win_on_full_board_beats_tie() {
        let mut board = Board::new();
        for col in 0..COLS {
            fill_column(&mut board, col, &[x(), x(), x(), x(), o(), o()]);
        }
        assert_eq!(board.evaluate(x(), o()), GameResult::Win(x()));
    }

    #[test]
    fn test_rows_scanned_before_columns() {
        // O has a row and X a column; rows come first in scan order.
        let mut board = Board::new();
        fill_column(&mut board, 0, &[o(), x(), x(), x(), x()]);
        for col in 1..4 {
            board.place(o(), col).unwrap();
        }
        assert_eq!(board.evaluate(x(), o()), GameResult::Win(o()));
        assert_eq!(board.evaluate(o(), x()), GameResult::Win(o()));
    }

    #[test]
    fn test_evaluate_is_repeatable() {
        let mut board = Board::new();
        fill_column(&mut board, 4, &[x(), o(), x()]);
        let before = board;
        let first = board.evaluate(x(), o());
        assert_eq!(first, board.evaluate(x(), o()));
        assert_eq!(board, before);
    }

    #[test]
    fn test_render_empty_board() {
        let rows: Vec<String> = Board::new().render().collect();
        assert_eq!(rows.len(), ROWS);
        for row in rows {
            assert_eq!(row, "|   |   |   |   |   |   |   |");
        }
    }

    #[test]
    fn test_render_top_to_bottom() {
        let mut board = Board::new();
        board.place(x(), 0).unwrap();
        board.place(o(), 0).unwrap();
        board.place(o(), 6).unwrap();

        let rows: Vec<String> = board.render().collect();
        assert_eq!(rows[5], "| X |   |   |   |   |   | O |");
        assert_eq!(rows[4], "| O |   |   |   |   |   |   |");
        assert_eq!(rows[0], "|   |   |   |   |   |   |   |");
    }

    #[test]
    fn test_render_is_restartable() {
        let mut board = Board::new();
        board.place(x(), 2).unwrap();
        let rows = board.render();
        let first: Vec<String> = rows.clone().collect();
        let second: Vec<String> = rows.collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_display_includes_header_and_separators() {
        let text = Board::new().to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), ROWS + 3);
        assert_eq!(lines[0], COLUMN_HEADER);
        assert_eq!(lines[1], SEPARATOR);
        assert_eq!(lines[ROWS + 2], SEPARATOR);
    }
}
