//! Text prompt controller: player setup, column prompts and the turn loop,
//! over any `BufRead`/`Write` pair.

mod prompt;

pub use prompt::{column_check, token_check, Prompter};
