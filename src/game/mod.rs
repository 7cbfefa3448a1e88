//! Core (m,n,k)-game logic: grid storage, the board contract, and the free
//! and gravity placement rules.

mod board;
mod free;
mod gravity;
mod mnk;
mod player;
mod traits;

pub use board::{Coord, Grid, MIN_NUM_WIN, WIN_SCORE};
pub use free::FreeBoard;
pub use gravity::GravityBoard;
pub use mnk::{MnkBoard, MnkMove};
pub use player::{Cell, Player};
pub use traits::{Board, GameOutcome};
