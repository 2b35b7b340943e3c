//! Parse the FEN piece placement field.
//!
//! Only the first FEN field is understood: ranks from 8 down to 1
//! separated by `/`, uppercase letters for White, lowercase for Black,
//! digits for runs of empty squares. Every rank must describe exactly 8
//! files and there must be exactly 8 ranks.

use std::{error::Error, fmt, str::FromStr};

use crate::{board::Board, square::Square, types::Piece};

/// Errors that can occur when parsing a piece placement field.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum ParsePlacementError {
    /// A character that is neither a piece letter nor a digit `1`-`8`.
    InvalidCharacter,
    /// A rank describing fewer or more than 8 files.
    InvalidRankWidth,
    /// Fewer or more than 8 ranks.
    InvalidRankCount,
}

impl fmt::Display for ParsePlacementError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ParsePlacementError::InvalidCharacter => "invalid character in piece placement",
            ParsePlacementError::InvalidRankWidth => "rank does not describe 8 files",
            ParsePlacementError::InvalidRankCount => "piece placement does not have 8 ranks",
        })
    }
}

impl Error for ParsePlacementError {}

impl FromStr for Board {
    type Err = ParsePlacementError;

    fn from_str(s: &str) -> Result<Board, ParsePlacementError> {
        let mut board = Board::empty();
        let mut ranks = 0;

        for (chunk, rank) in s.split('/').zip((0..8).rev()) {
            ranks += 1;
            let mut file: i8 = 0;

            for ch in chunk.chars() {
                if let Some(run) = ch.to_digit(10) {
                    if run == 0 || run > 8 {
                        return Err(ParsePlacementError::InvalidCharacter);
                    }
                    file += run as i8;
                } else {
                    let piece =
                        Piece::from_char(ch).ok_or(ParsePlacementError::InvalidCharacter)?;
                    let sq = Square::from_coords(file, rank)
                        .ok_or(ParsePlacementError::InvalidRankWidth)?;
                    board.set_piece_at(sq, piece);
                    file += 1;
                }

                if file > 8 {
                    return Err(ParsePlacementError::InvalidRankWidth);
                }
            }

            if file != 8 {
                return Err(ParsePlacementError::InvalidRankWidth);
            }
        }

        if ranks != 8 || s.split('/').count() != 8 {
            return Err(ParsePlacementError::InvalidRankCount);
        }

        Ok(board)
    }
}
