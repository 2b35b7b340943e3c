//! A library for crazyhouse chess rules.
//!
//! The position knows which moves are legal (including castling, en
//! passant, promotion, and dropping captured pieces back onto the
//! board), commits chosen moves, and classifies the result as ongoing,
//! checkmate, or stalemate.
//!
//! # Examples
//!
//! Query legal moves in the starting position:
//!
//! ```
//! use tinyhouse::{square, Crazyhouse};
//!
//! let pos = Crazyhouse::default();
//! let knight_moves = pos.legal_moves(square::G1);
//! assert_eq!(knight_moves.len(), 2);
//! ```
//!
//! Play moves and watch the pockets:
//!
//! ```
//! use tinyhouse::{square, Crazyhouse, Role};
//!
//! let mut pos = Crazyhouse::default();
//! pos.play(square::E2, square::E4, None)?;
//! pos.play(square::D7, square::D5, None)?;
//! pos.play(square::E4, square::D5, None)?; // exd5
//!
//! assert_eq!(pos.pockets().white.by_role(Role::Pawn), 1);
//! # Ok::<_, tinyhouse::PlayError>(())
//! ```
//!
//! Detect game end:
//!
//! ```
//! use tinyhouse::{Crazyhouse, Outcome};
//!
//! let pos = Crazyhouse::default();
//! assert_eq!(pos.outcome(), Outcome::Ongoing);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_debug_implementations)]

pub mod attacks;
pub mod square;

mod board;
mod color;
mod fen;
mod pocket;
mod position;
mod role;
mod types;

pub use crate::{
    attacks::SquareList,
    board::Board,
    color::{ByColor, Color},
    fen::ParsePlacementError,
    pocket::Pocket,
    position::{Crazyhouse, FromPlacementError, Outcome, PlayError, PositionError},
    role::Role,
    square::{ParseSquareError, Square},
    types::{CastlingSide, Move, Piece, PlayedMove},
};
