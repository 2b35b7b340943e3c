use std::fmt;

use crate::{
    color::{ByColor, Color},
    role::Role,
    square::Square,
    types::Piece,
};

/// Piece placement: an 8×8 mailbox of optional pieces.
///
/// The board keeps an index of each side's king square, updated on every
/// placement and removal, so check detection never scans the grid.
#[derive(Clone, Eq, PartialEq)]
pub struct Board {
    squares: [Option<Piece>; 64],
    kings: ByColor<Option<Square>>,
}

impl Board {
    pub fn empty() -> Board {
        Board {
            squares: [None; 64],
            kings: ByColor::default(),
        }
    }

    #[inline]
    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.squares[sq.0 as usize]
    }

    #[inline]
    pub fn color_at(&self, sq: Square) -> Option<Color> {
        self.piece_at(sq).map(|piece| piece.color)
    }

    #[inline]
    pub fn role_at(&self, sq: Square) -> Option<Role> {
        self.piece_at(sq).map(|piece| piece.role)
    }

    #[inline]
    pub fn is_empty(&self, sq: Square) -> bool {
        self.piece_at(sq).is_none()
    }

    pub fn remove_piece_at(&mut self, sq: Square) -> Option<Piece> {
        let piece = self.squares[sq.0 as usize].take();
        if let Some(Piece {
            color,
            role: Role::King,
            ..
        }) = piece
        {
            *self.kings.by_color_mut(color) = None;
        }
        piece
    }

    pub fn set_piece_at(&mut self, sq: Square, piece: Piece) {
        self.remove_piece_at(sq);
        if piece.role == Role::King {
            *self.kings.by_color_mut(piece.color) = Some(sq);
        }
        self.squares[sq.0 as usize] = Some(piece);
    }

    /// Gets the square of the given side's king, if it is on the board.
    #[inline]
    pub fn king_of(&self, color: Color) -> Option<Square> {
        *self.kings.by_color(color)
    }

    /// Iterates over all occupied squares, `a1` first.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.squares
            .iter()
            .enumerate()
            .filter_map(|(index, piece)| piece.map(|piece| (Square(index as i8), piece)))
    }

    /// Counts the pieces of one color and role.
    pub fn count(&self, color: Color, role: Role) -> usize {
        self.pieces()
            .filter(|(_, piece)| piece.color == color && piece.role == role)
            .count()
    }

    /// Writes the FEN piece placement field, ranks from 8 down to 1.
    pub fn board_fen(&self) -> String {
        let mut fen = String::with_capacity(15);

        for rank in (0..8).rev() {
            let mut empty = 0u8;

            for file in 0..8 {
                match self.piece_at(Square::new(file, rank)) {
                    None => empty += 1,
                    Some(piece) => {
                        if empty > 0 {
                            fen.push(char::from(b'0' + empty));
                            empty = 0;
                        }
                        fen.push(piece.char());
                    }
                }
            }

            if empty > 0 {
                fen.push(char::from(b'0' + empty));
            }
            if rank > 0 {
                fen.push('/');
            }
        }

        fen
    }
}

impl Default for Board {
    fn default() -> Board {
        const BACKRANK: [Role; 8] = [
            Role::Rook,
            Role::Knight,
            Role::Bishop,
            Role::Queen,
            Role::King,
            Role::Bishop,
            Role::Knight,
            Role::Rook,
        ];

        let mut board = Board::empty();
        for color in Color::ALL {
            for (file, role) in (0..8).zip(BACKRANK) {
                board.set_piece_at(Square::new(file, color.backrank()), role.of(color));
            }
            for file in 0..8 {
                board.set_piece_at(Square::new(file, color.pawn_rank()), Role::Pawn.of(color));
            }
        }
        board
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.board_fen())
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0..8).rev() {
            for file in 0..8 {
                match self.piece_at(Square::new(file, rank)) {
                    Some(piece) => write!(f, "{}", piece.char())?,
                    None => f.write_str(".")?,
                }
                f.write_str(if file < 7 { " " } else { "\n" })?;
            }
        }
        Ok(())
    }
}
