//! # mnk_game
//!
//! A generalized (m,n,k)-game engine: tic-tac-toe, gomoku and Connect Four
//! style games on any board size, with or without gravity, played by a
//! negamax search family or a random agent.
//!
//! ## Modules
//!
//! - [`game`] — Board model: grid, free and gravity placement, win detection
//! - [`ai`] — Agent trait, random agent, negamax search variants and the iterative deepening engine
//! - [`play`] — Headless match driver between two agents
//! - [`config`] — TOML configuration loading and validation
//! - [`error`] — Structured error types

pub mod ai;
pub mod config;
pub mod error;
pub mod game;
pub mod play;
