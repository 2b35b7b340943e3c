//! Pseudo-legal move targets and the square-attack oracle.
//!
//! Everything here is geometry over a borrowed [`Board`]: which squares a
//! piece could move to if leaving the own king in check were allowed.
//! Castling needs more context than geometry and is generated by the
//! position itself.

use arrayvec::ArrayVec;

use crate::{
    board::Board,
    color::Color,
    role::Role,
    square::Square,
    types::{Piece, PlayedMove},
};

/// Target squares of a single piece. A queen tops out at 27, drops at 64.
pub type SquareList = ArrayVec<Square, 64>;

const ROOK_DELTAS: [(i8, i8); 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];
const BISHOP_DELTAS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
const KING_DELTAS: [(i8, i8); 8] = [
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
];
const KNIGHT_DELTAS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

fn sliding_targets(board: &Board, from: Square, color: Color, deltas: &[(i8, i8)], acc: &mut SquareList) {
    for &(df, dr) in deltas {
        let mut current = from;
        while let Some(to) = current.offset(df, dr) {
            match board.color_at(to) {
                None => acc.push(to),
                Some(occupant) => {
                    if occupant != color {
                        acc.push(to);
                    }
                    break;
                }
            }
            current = to;
        }
    }
}

fn stepping_targets(board: &Board, from: Square, color: Color, deltas: &[(i8, i8)], acc: &mut SquareList) {
    for &(df, dr) in deltas {
        if let Some(to) = from.offset(df, dr) {
            if board.color_at(to) != Some(color) {
                acc.push(to);
            }
        }
    }
}

fn pawn_targets(
    board: &Board,
    from: Square,
    color: Color,
    last: Option<&PlayedMove>,
    acc: &mut SquareList,
) {
    let dir = color.pawn_dir();

    if let Some(to) = from.offset(0, dir) {
        if board.is_empty(to) {
            acc.push(to);

            // Double step, from the start rank only.
            if from.rank() == color.pawn_rank() {
                if let Some(two) = from.offset(0, 2 * dir) {
                    if board.is_empty(two) {
                        acc.push(two);
                    }
                }
            }
        }
    }

    for df in [-1, 1] {
        if let Some(to) = from.offset(df, dir) {
            if let Some(occupant) = board.color_at(to) {
                if occupant != color {
                    acc.push(to);
                }
            }
        }
    }

    // En passant: the enemy pawn double-stepped past us on the previous
    // ply and now sits next to us on the same rank.
    if let Some(landing) = last.and_then(PlayedMove::is_double_pawn_push) {
        if landing.rank() == from.rank() && (landing.file() - from.file()).abs() == 1 {
            if let Some(to) = Square::from_coords(landing.file(), from.rank() + dir) {
                acc.push(to);
            }
        }
    }
}

/// Pseudo-legal targets of `piece` standing on `from`: geometrically
/// valid moves, not yet filtered for king safety and without castling.
pub fn pseudo_targets(
    board: &Board,
    from: Square,
    piece: Piece,
    last: Option<&PlayedMove>,
) -> SquareList {
    let mut acc = SquareList::new();
    match piece.role {
        Role::Bishop => sliding_targets(board, from, piece.color, &BISHOP_DELTAS, &mut acc),
        Role::Rook => sliding_targets(board, from, piece.color, &ROOK_DELTAS, &mut acc),
        Role::Queen => {
            sliding_targets(board, from, piece.color, &BISHOP_DELTAS, &mut acc);
            sliding_targets(board, from, piece.color, &ROOK_DELTAS, &mut acc);
        }
        Role::Knight => stepping_targets(board, from, piece.color, &KNIGHT_DELTAS, &mut acc),
        Role::King => stepping_targets(board, from, piece.color, &KING_DELTAS, &mut acc),
        Role::Pawn => pawn_targets(board, from, piece.color, last, &mut acc),
    }
    acc
}

/// Checks whether any piece of color `by` has `sq` among its pseudo-legal
/// targets.
///
/// Deliberately shallow: no king-safety filtering on the attackers and no
/// last-move context, so this never recurses back into legality checks.
pub fn attacked(board: &Board, sq: Square, by: Color) -> bool {
    board.pieces().any(|(from, piece)| {
        piece.color == by && pseudo_targets(board, from, piece, None).contains(&sq)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::square;

    #[test]
    fn test_knight_in_the_corner() {
        let mut board = Board::empty();
        board.set_piece_at(square::A1, Role::Knight.of(Color::White));

        let targets = pseudo_targets(
            &board,
            square::A1,
            board.piece_at(square::A1).unwrap(),
            None,
        );
        assert_eq!(targets.len(), 2);
        assert!(targets.contains(&square::B3));
        assert!(targets.contains(&square::C2));
    }

    #[test]
    fn test_slider_stops_at_first_piece() {
        let mut board = Board::empty();
        board.set_piece_at(square::A1, Role::Rook.of(Color::White));
        board.set_piece_at(square::A4, Role::Pawn.of(Color::Black));
        board.set_piece_at(square::C1, Role::Pawn.of(Color::White));

        let targets = pseudo_targets(
            &board,
            square::A1,
            board.piece_at(square::A1).unwrap(),
            None,
        );
        assert!(targets.contains(&square::A2));
        assert!(targets.contains(&square::A3));
        assert!(targets.contains(&square::A4)); // capture
        assert!(!targets.contains(&square::A5)); // behind the capture
        assert!(targets.contains(&square::B1));
        assert!(!targets.contains(&square::C1)); // own piece
    }

    #[test]
    fn test_pawn_double_step_only_from_start_rank() {
        let board = Board::default();
        let targets = pseudo_targets(
            &board,
            square::E2,
            board.piece_at(square::E2).unwrap(),
            None,
        );
        assert_eq!(targets.len(), 2);
        assert!(targets.contains(&square::E3));
        assert!(targets.contains(&square::E4));

        let mut board = Board::empty();
        board.set_piece_at(square::E3, Role::Pawn.of(Color::White));
        let targets = pseudo_targets(
            &board,
            square::E3,
            board.piece_at(square::E3).unwrap(),
            None,
        );
        assert_eq!(targets.len(), 1);
        assert!(targets.contains(&square::E4));
    }

    #[test]
    fn test_attacked() {
        let mut board = Board::empty();
        board.set_piece_at(square::B2, Role::Bishop.of(Color::Black));
        assert!(attacked(&board, square::F6, Color::Black));
        assert!(!attacked(&board, square::F6, Color::White));

        // A blocker cuts the diagonal.
        board.set_piece_at(square::D4, Role::Pawn.of(Color::White));
        assert!(!attacked(&board, square::F6, Color::Black));
        assert!(attacked(&board, square::D4, Color::Black));
    }
}
