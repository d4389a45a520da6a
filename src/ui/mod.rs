//! Terminal UI: an interactive board with a column selector, driven by the
//! same [`GameState`](crate::game::GameState) as the prompt controller.

mod app;
mod game_view;

pub use app::App;
