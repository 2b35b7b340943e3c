use std::{error::Error, fmt};

use crate::{
    attacks::{self, SquareList},
    board::Board,
    color::{ByColor, Color},
    fen::ParsePlacementError,
    pocket::Pocket,
    role::Role,
    square::Square,
    types::{CastlingSide, Move, Piece, PlayedMove},
};

/// Error when constructing a position from an invalid setup.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum PositionError {
    /// A side has no king on the board.
    NoKing { color: Color },
    /// A side has more than one king on the board.
    TooManyKings { color: Color },
}

impl fmt::Display for PositionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PositionError::NoKing { color } => write!(f, "{} has no king", color),
            PositionError::TooManyKings { color } => write!(f, "{} has more than one king", color),
        }
    }
}

impl Error for PositionError {}

/// Error when loading a position from a piece placement field.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum FromPlacementError {
    /// The placement field itself is malformed.
    Placement(ParsePlacementError),
    /// The placement parsed, but does not describe a playable position.
    Position(PositionError),
}

impl fmt::Display for FromPlacementError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FromPlacementError::Placement(err) => err.fmt(f),
            FromPlacementError::Position(err) => err.fmt(f),
        }
    }
}

impl Error for FromPlacementError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            FromPlacementError::Placement(err) => Some(err),
            FromPlacementError::Position(err) => Some(err),
        }
    }
}

impl From<ParsePlacementError> for FromPlacementError {
    fn from(err: ParsePlacementError) -> FromPlacementError {
        FromPlacementError::Placement(err)
    }
}

impl From<PositionError> for FromPlacementError {
    fn from(err: PositionError) -> FromPlacementError {
        FromPlacementError::Position(err)
    }
}

/// Error when a requested move cannot be played.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum PlayError {
    /// The origin square is empty.
    NoPieceAt(Square),
    /// The move is not in the legal move set of the piece, or its
    /// promotion choice is missing or invalid.
    IllegalMove,
    /// A drop was requested for a role the side has none of in its
    /// pocket.
    EmptyPocket(Role),
}

impl fmt::Display for PlayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayError::NoPieceAt(sq) => write!(f, "no piece at {}", sq),
            PlayError::IllegalMove => f.write_str("illegal move"),
            PlayError::EmptyPocket(role) => {
                write!(f, "no {:?} in pocket", role)
            }
        }
    }
}

impl Error for PlayError {}

/// Result of classifying a position for the side to move.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Outcome {
    /// The side to move still has a legal move or drop.
    Ongoing,
    /// No legal move or drop, and the king is attacked.
    Checkmate,
    /// No legal move or drop, and the king is safe.
    Stalemate,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Outcome::Ongoing => "ongoing",
            Outcome::Checkmate => "checkmate",
            Outcome::Stalemate => "stalemate",
        })
    }
}

/// A crazyhouse position: board, side to move, the previous move, and
/// both pockets.
///
/// The position validates moves before committing them; the probe boards
/// used to test king safety are throwaway copies, so a failed or merely
/// examined move never leaves a trace.
#[derive(Clone, Eq, PartialEq)]
pub struct Crazyhouse {
    board: Board,
    turn: Color,
    last_move: Option<PlayedMove>,
    pockets: ByColor<Pocket>,
}

impl Default for Crazyhouse {
    fn default() -> Crazyhouse {
        Crazyhouse {
            board: Board::default(),
            turn: Color::White,
            last_move: None,
            pockets: ByColor::default(),
        }
    }
}

impl Crazyhouse {
    /// Constructs a position from a board, side to move, and pockets.
    ///
    /// # Errors
    ///
    /// Errors when either side does not have exactly one king. That
    /// invariant is what lets every later check-detection step trust the
    /// king index.
    pub fn from_parts(
        board: Board,
        turn: Color,
        pockets: ByColor<Pocket>,
    ) -> Result<Crazyhouse, PositionError> {
        for color in Color::ALL {
            match board.count(color, Role::King) {
                0 => return Err(PositionError::NoKing { color }),
                1 => (),
                _ => return Err(PositionError::TooManyKings { color }),
            }
        }
        Ok(Crazyhouse {
            board,
            turn,
            last_move: None,
            pockets,
        })
    }

    /// Constructs a position with empty pockets.
    pub fn from_board(board: Board, turn: Color) -> Result<Crazyhouse, PositionError> {
        Crazyhouse::from_parts(board, turn, ByColor::default())
    }

    /// Parses a FEN piece placement field into a position with White to
    /// move and empty pockets.
    ///
    /// # Examples
    ///
    /// ```
    /// use tinyhouse::Crazyhouse;
    ///
    /// let pos = Crazyhouse::from_placement("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR")?;
    /// assert_eq!(pos, Crazyhouse::default());
    /// # Ok::<_, Box<dyn std::error::Error>>(())
    /// ```
    pub fn from_placement(placement: &str) -> Result<Crazyhouse, FromPlacementError> {
        let board: Board = placement.parse()?;
        Ok(Crazyhouse::from_board(board, Color::White)?)
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn turn(&self) -> Color {
        self.turn
    }

    #[inline]
    pub fn last_move(&self) -> Option<&PlayedMove> {
        self.last_move.as_ref()
    }

    #[inline]
    pub fn pockets(&self) -> &ByColor<Pocket> {
        &self.pockets
    }

    /// Pocket of the given side, for seeding positions mid-game.
    #[inline]
    pub fn pocket_mut(&mut self, color: Color) -> &mut Pocket {
        self.pockets.by_color_mut(color)
    }

    fn our_king(&self) -> Square {
        self.board.king_of(self.turn).expect("side to move has a king")
    }

    /// Checks if the side to move is in check.
    pub fn is_check(&self) -> bool {
        attacks::attacked(&self.board, self.our_king(), !self.turn)
    }

    /// Legal target squares of the piece on `from`.
    ///
    /// Empty when the square is empty or holds a piece of the side not
    /// to move. Castling appears as the king's two-file step.
    pub fn legal_moves(&self, from: Square) -> SquareList {
        let piece = match self.board.piece_at(from) {
            Some(piece) if piece.color == self.turn => piece,
            _ => return SquareList::new(),
        };

        let mut targets = attacks::pseudo_targets(&self.board, from, piece, self.last_move());
        targets.retain(|&mut to| !self.leaves_king_exposed(from, to, piece));

        if piece.role == Role::King {
            self.castling_targets(from, piece, &mut targets);
        }

        targets
    }

    /// Legal drop squares for a pocket piece of the given role.
    ///
    /// Empty when the side to move holds no such piece. Pawns may not be
    /// dropped on either back rank.
    pub fn legal_drops(&self, role: Role) -> SquareList {
        if self.pockets.by_color(self.turn).by_role(role) == 0 {
            return SquareList::new();
        }
        self.drop_targets(role)
    }

    fn drop_targets(&self, role: Role) -> SquareList {
        let ranks = if role == Role::Pawn { 1..7 } else { 0..8 };
        let mut targets = SquareList::new();

        for rank in ranks {
            for file in 0..8 {
                let to = Square::new(file, rank);
                if self.board.is_empty(to) && !self.drop_leaves_king_exposed(role, to) {
                    targets.push(to);
                }
            }
        }

        targets
    }

    /// Plays a move from `from` to `to`, promoting to `promotion` if the
    /// move pushes a pawn onto the far rank.
    ///
    /// En passant and castling are recognized from the squares alone: a
    /// pawn capturing onto an empty square is en passant, a king moving
    /// two files is castling.
    ///
    /// # Errors
    ///
    /// - [`PlayError::NoPieceAt`] when `from` is empty.
    /// - [`PlayError::IllegalMove`] when `to` is not a legal target of
    ///   the piece, when the piece belongs to the side not to move, or
    ///   when the promotion choice is missing, spurious, or not a
    ///   promotable role.
    pub fn play(
        &mut self,
        from: Square,
        to: Square,
        promotion: Option<Role>,
    ) -> Result<(), PlayError> {
        let m = self.classify(from, to, promotion)?;
        if !self.legal_moves(from).contains(&to) {
            return Err(PlayError::IllegalMove);
        }
        self.play_unchecked(&m);
        Ok(())
    }

    /// Drops a pocket piece of the given role onto `to`.
    ///
    /// # Errors
    ///
    /// - [`PlayError::EmptyPocket`] when the side to move holds no piece
    ///   of that role (kings are never held).
    /// - [`PlayError::IllegalMove`] when `to` is occupied, is a back
    ///   rank for a pawn drop, or the drop would leave the own king
    ///   attacked.
    pub fn drop_piece(&mut self, role: Role, to: Square) -> Result<(), PlayError> {
        if self.pockets.by_color(self.turn).by_role(role) == 0 {
            return Err(PlayError::EmptyPocket(role));
        }
        if !self.drop_targets(role).contains(&to) {
            return Err(PlayError::IllegalMove);
        }
        self.play_unchecked(&Move::Put { role, to });
        Ok(())
    }

    /// Builds the [`Move`] that `play` would commit, without validating
    /// it against the legal move set.
    fn classify(
        &self,
        from: Square,
        to: Square,
        promotion: Option<Role>,
    ) -> Result<Move, PlayError> {
        let piece = self
            .board
            .piece_at(from)
            .ok_or(PlayError::NoPieceAt(from))?;
        if piece.color != self.turn {
            return Err(PlayError::IllegalMove);
        }

        if piece.role == Role::King && (to.file() - from.file()).abs() == 2 {
            if promotion.is_some() {
                return Err(PlayError::IllegalMove);
            }
            let side = CastlingSide::from_rook_file(from, to);
            return Ok(Move::Castle {
                king: from,
                rook: Square::new(side.rook_file(), from.rank()),
            });
        }

        if piece.role == Role::Pawn && from.file() != to.file() && self.board.is_empty(to) {
            if promotion.is_some() {
                return Err(PlayError::IllegalMove);
            }
            return Ok(Move::EnPassant { from, to });
        }

        let promoting = piece.role == Role::Pawn && to.rank() == (!piece.color).backrank();
        match promotion {
            Some(role) if !promoting || !role.is_promotion_choice() => {
                return Err(PlayError::IllegalMove)
            }
            None if promoting => return Err(PlayError::IllegalMove),
            _ => (),
        }

        Ok(Move::Normal {
            role: piece.role,
            from,
            capture: self.board.role_at(to),
            to,
            promotion,
        })
    }

    /// Commits a move that the caller has already validated.
    ///
    /// Feeding an illegal move is a precondition violation; the position
    /// may end up inconsistent.
    pub fn play_unchecked(&mut self, m: &Move) {
        let color = self.turn;

        self.last_move = Some(match *m {
            Move::Normal {
                role,
                from,
                to,
                promotion,
                ..
            } => {
                let piece = self.board.remove_piece_at(from).expect("piece on origin");
                if let Some(captured) = self.board.remove_piece_at(to) {
                    self.pockets.by_color_mut(color).add(captured.role);
                }
                let placed = match promotion {
                    Some(role) => Piece {
                        color,
                        role,
                        moved: true,
                    },
                    None => piece.touched(),
                };
                self.board.set_piece_at(to, placed);
                PlayedMove::Normal { role, from, to }
            }
            Move::EnPassant { from, to } => {
                let pawn = self.board.remove_piece_at(from).expect("pawn on origin");
                // The victim sits beside the origin, not on the target.
                self.board
                    .remove_piece_at(Square::new(to.file(), from.rank()));
                self.pockets.by_color_mut(color).add(Role::Pawn);
                self.board.set_piece_at(to, pawn.touched());
                PlayedMove::Normal {
                    role: Role::Pawn,
                    from,
                    to,
                }
            }
            Move::Castle { king, rook } => {
                let side = CastlingSide::from_rook_file(king, rook);
                let king_to = Square::new(king.file() + 2 * side.direction(), king.rank());
                let rook_to = Square::new(king.file() + side.direction(), king.rank());

                let king_piece = self.board.remove_piece_at(king).expect("king on origin");
                let rook_piece = self.board.remove_piece_at(rook).expect("castling rook");
                self.board.set_piece_at(king_to, king_piece.touched());
                self.board.set_piece_at(rook_to, rook_piece.touched());

                PlayedMove::Castle {
                    king_from: king,
                    king_to,
                    rook_from: rook,
                    rook_to,
                }
            }
            Move::Put { role, to } => {
                self.pockets.by_color_mut(color).remove(role);
                self.board.set_piece_at(
                    to,
                    Piece {
                        color,
                        role,
                        moved: false,
                    },
                );
                PlayedMove::Put { role, to }
            }
        });

        self.turn = !color;
    }

    /// Classifies the position for the side to move.
    ///
    /// A side with any legal move, or any legal drop from a non-empty
    /// pocket, is still playing. Otherwise the position is checkmate
    /// when the king is attacked and stalemate when it is not.
    pub fn outcome(&self) -> Outcome {
        let king = self.our_king();
        if !self.legal_moves(king).is_empty() {
            return Outcome::Ongoing;
        }

        for (from, piece) in self.board.pieces() {
            if piece.color == self.turn && from != king && !self.legal_moves(from).is_empty() {
                return Outcome::Ongoing;
            }
        }

        for role in Role::POCKET {
            if !self.legal_drops(role).is_empty() {
                return Outcome::Ongoing;
            }
        }

        if attacks::attacked(&self.board, king, !self.turn) {
            Outcome::Checkmate
        } else {
            Outcome::Stalemate
        }
    }

    /// Probes `from` → `to` on a throwaway copy of the board and reports
    /// whether the mover's own king ends up attacked.
    fn leaves_king_exposed(&self, from: Square, to: Square, piece: Piece) -> bool {
        let mut board = self.board.clone();
        board.remove_piece_at(from);
        if piece.role == Role::Pawn && from.file() != to.file() && board.is_empty(to) {
            // En passant: the captured pawn is beside the origin.
            board.remove_piece_at(Square::new(to.file(), from.rank()));
        }
        board.set_piece_at(to, piece);

        let king = board.king_of(piece.color).expect("side to move has a king");
        attacks::attacked(&board, king, !piece.color)
    }

    fn drop_leaves_king_exposed(&self, role: Role, to: Square) -> bool {
        let mut board = self.board.clone();
        board.set_piece_at(
            to,
            Piece {
                color: self.turn,
                role,
                moved: false,
            },
        );
        let king = board.king_of(self.turn).expect("side to move has a king");
        attacks::attacked(&board, king, !self.turn)
    }

    /// Appends the castling candidates for a king on `from`.
    ///
    /// A candidate needs an unmoved king, an unmoved same-colored rook
    /// on the corner file, every square strictly between them empty, and
    /// neither the king's square nor the square it crosses attacked. The
    /// landing square is vetted like any other king move, on the
    /// post-move probe board.
    fn castling_targets(&self, from: Square, king: Piece, acc: &mut SquareList) {
        if king.moved || attacks::attacked(&self.board, from, !king.color) {
            return;
        }

        'side: for side in CastlingSide::ALL {
            let rook_sq = Square::new(side.rook_file(), from.rank());
            match self.board.piece_at(rook_sq) {
                Some(rook)
                    if rook.role == Role::Rook && rook.color == king.color && !rook.moved => {}
                _ => continue,
            }

            let (transit, landing) = match (
                from.offset(side.direction(), 0),
                from.offset(2 * side.direction(), 0),
            ) {
                (Some(transit), Some(landing)) if landing != rook_sq => (transit, landing),
                _ => continue,
            };

            let lo = from.file().min(rook_sq.file()) + 1;
            let hi = from.file().max(rook_sq.file());
            for file in lo..hi {
                if !self.board.is_empty(Square::new(file, from.rank())) {
                    continue 'side;
                }
            }

            if attacks::attacked(&self.board, transit, !king.color) {
                continue;
            }
            if self.leaves_king_exposed(from, landing, king) {
                continue;
            }

            acc.push(landing);
        }
    }
}

impl fmt::Debug for Crazyhouse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Crazyhouse {{ {} [{:?}/{:?}] {} }}",
            self.board.board_fen(),
            self.pockets.white,
            self.pockets.black,
            self.turn.char(),
        )
    }
}
