use std::fmt::{self, Write as _};

use crate::{color::Color, role::Role, square::Square};

/// A piece with [`Color`] and [`Role`], plus whether it has moved.
///
/// The `moved` flag is monotonic and only ever consulted for castling
/// eligibility of kings and rooks. Pawn double steps are derived from
/// the rank instead.
#[allow(missing_docs)]
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Piece {
    pub color: Color,
    pub role: Role,
    pub moved: bool,
}

impl Piece {
    pub fn char(self) -> char {
        self.color
            .fold(self.role.upper_char(), self.role.char())
    }

    /// Gets an unmoved piece from a FEN letter: uppercase for White,
    /// lowercase for Black.
    pub fn from_char(ch: char) -> Option<Piece> {
        Role::from_char(ch).map(|role| role.of(Color::from_white(ch.is_ascii_uppercase())))
    }

    /// The same piece with the `moved` flag set.
    #[must_use]
    pub fn touched(self) -> Piece {
        Piece {
            moved: true,
            ..self
        }
    }
}

/// A move candidate, before it is committed.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Move {
    Normal {
        role: Role,
        from: Square,
        capture: Option<Role>,
        to: Square,
        promotion: Option<Role>,
    },
    EnPassant {
        from: Square,
        to: Square,
    },
    Castle {
        king: Square,
        rook: Square,
    },
    Put {
        role: Role,
        to: Square,
    },
}

impl Move {
    /// Gets the role of the moved piece.
    pub const fn role(&self) -> Role {
        match *self {
            Move::Normal { role, .. } | Move::Put { role, .. } => role,
            Move::EnPassant { .. } => Role::Pawn,
            Move::Castle { .. } => Role::King,
        }
    }

    /// Gets the origin square, or `None` for drops.
    pub const fn from(&self) -> Option<Square> {
        match *self {
            Move::Normal { from, .. } | Move::EnPassant { from, .. } => Some(from),
            Move::Castle { king, .. } => Some(king),
            Move::Put { .. } => None,
        }
    }

    /// Gets the target square. For castling moves this is the square the
    /// king lands on, two files toward the rook.
    pub fn to(&self) -> Square {
        match *self {
            Move::Normal { to, .. } | Move::EnPassant { to, .. } | Move::Put { to, .. } => to,
            Move::Castle { king, rook } => {
                let side = CastlingSide::from_rook_file(king, rook);
                Square::new(king.file() + 2 * side.direction(), king.rank())
            }
        }
    }

    /// Checks if the move captures a piece.
    pub const fn is_capture(&self) -> bool {
        matches!(
            *self,
            Move::Normal {
                capture: Some(_),
                ..
            } | Move::EnPassant { .. }
        )
    }

    /// Gets the promotion role, if any.
    pub const fn promotion(&self) -> Option<Role> {
        match *self {
            Move::Normal { promotion, .. } => promotion,
            _ => None,
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Move::Normal {
                role,
                from,
                capture,
                to,
                promotion,
            } => {
                if role != Role::Pawn {
                    f.write_char(role.upper_char())?;
                }
                write!(f, "{}{}{}", from, if capture.is_some() { 'x' } else { '-' }, to)?;
                if let Some(p) = promotion {
                    write!(f, "={}", p.upper_char())?;
                }
                Ok(())
            }
            Move::EnPassant { from, to } => write!(f, "{}x{}", from, to),
            Move::Castle { king, rook } => {
                f.write_str(if king < rook { "O-O" } else { "O-O-O" })
            }
            Move::Put { role, to } => {
                if role != Role::Pawn {
                    f.write_char(role.upper_char())?;
                }
                write!(f, "@{}", to)
            }
        }
    }
}

/// Record of the most recently committed move.
///
/// Only the en passant rule ever reads this back: a pawn may capture en
/// passant exactly one ply after the enemy pawn's double step, so the
/// record is overwritten on every committed move.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum PlayedMove {
    /// A piece moved from one square to another (including en passant
    /// captures and promotions).
    Normal { role: Role, from: Square, to: Square },
    /// Castling, with both legs of the move.
    Castle {
        king_from: Square,
        king_to: Square,
        rook_from: Square,
        rook_to: Square,
    },
    /// A piece dropped from the pocket.
    Put { role: Role, to: Square },
}

impl PlayedMove {
    /// Checks if this records a pawn advancing two ranks, landing on
    /// `to`. The precondition for en passant.
    pub fn is_double_pawn_push(&self) -> Option<Square> {
        match *self {
            PlayedMove::Normal {
                role: Role::Pawn,
                from,
                to,
            } if (to.rank() - from.rank()).abs() == 2 => Some(to),
            _ => None,
        }
    }
}

/// `KingSide` (O-O) or `QueenSide` (O-O-O).
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum CastlingSide {
    KingSide = 0,
    QueenSide = 1,
}

impl CastlingSide {
    /// File of the castling rook's starting corner: `7` kingside, `0`
    /// queenside.
    pub const fn rook_file(self) -> i8 {
        match self {
            CastlingSide::KingSide => 7,
            CastlingSide::QueenSide => 0,
        }
    }

    /// File direction the king travels: `+1` kingside, `-1` queenside.
    pub const fn direction(self) -> i8 {
        match self {
            CastlingSide::KingSide => 1,
            CastlingSide::QueenSide => -1,
        }
    }

    /// Gets the side from king and rook squares.
    pub fn from_rook_file(king: Square, rook: Square) -> CastlingSide {
        if king.file() < rook.file() {
            CastlingSide::KingSide
        } else {
            CastlingSide::QueenSide
        }
    }

    /// `KingSide` and `QueenSide`, in this order.
    pub const ALL: [CastlingSide; 2] = [CastlingSide::KingSide, CastlingSide::QueenSide];
}
