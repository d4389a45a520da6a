//! # Connect Four
//!
//! A two-player Connect Four game on a fixed 7x6 board. The board engine does
//! no I/O; a text prompt controller and a Ratatui terminal UI both drive it
//! through [`game::GameState`].
//!
//! ## Modules
//!
//! - [`game`] — Core game logic: board, win scan, tokens, players, game session
//! - [`controller`] — Line-based prompt loop over any reader/writer
//! - [`ui`] — Terminal UI: interactive game view
//! - [`config`] — TOML configuration loading and validation
//! - [`error`] — Structured error types

pub mod config;
pub mod controller;
pub mod error;
pub mod game;
pub mod ui;
