//! Implementation of chess rules: pieces and their moves, the board, the
//! state machine of a single game and its collaborators (captured pieces
//! tracker and the clock).

pub mod attacks;
pub mod board;
pub mod captures;
pub mod clock;
pub mod core;
pub mod game;
pub mod movegen;
pub mod moves;
pub mod perft;
pub mod repetition;
pub mod shared;
