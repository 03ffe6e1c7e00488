//! Answers whether a piece standing on a square could capture on another
//! square. This is what check detection and castling path safety are built
//! on: a king is in check iff some opposing piece attacks its square.
//!
//! Attacks ignore whether the target is occupied and whether the attacker is
//! pinned, because a king can never be captured by continuing play.

use crate::chess::board::Board;
use crate::chess::core::{Direction, Piece, PieceKind, Position};

impl Piece {
    /// Returns true if this piece on `from` attacks `target`.
    ///
    /// ```
    /// use gambit::chess::board::Board;
    /// use gambit::chess::core::Position;
    ///
    /// let board = Board::initial();
    /// let g1 = Position::try_from("g1").unwrap();
    /// let knight = board.at(g1).unwrap();
    /// assert!(knight.attacks(g1, Position::try_from("f3").unwrap(), &board));
    /// assert!(!knight.attacks(g1, Position::try_from("g3").unwrap(), &board));
    /// ```
    #[must_use]
    pub fn attacks(self, from: Position, target: Position, board: &Board) -> bool {
        if from == target {
            return false;
        }
        let row_delta = i16::from(target.row()) - i16::from(from.row());
        let column_delta = i16::from(target.column()) - i16::from(from.column());
        match self.kind {
            PieceKind::Pawn => {
                row_delta == i16::from(self.owner.pawn_direction()) && column_delta.abs() == 1
            },
            PieceKind::Knight => {
                matches!((row_delta.abs(), column_delta.abs()), (1, 2) | (2, 1))
            },
            PieceKind::King => row_delta.abs() <= 1 && column_delta.abs() <= 1,
            PieceKind::Bishop => slides(from, target, board, Direction::is_diagonal),
            PieceKind::Rook => slides(from, target, board, |direction| !direction.is_diagonal()),
            PieceKind::Queen => slides(from, target, board, |_| true),
        }
    }
}

/// Checks that `from` and `target` are on a line the piece can move along and
/// that every square strictly between them is empty.
fn slides(
    from: Position,
    target: Position,
    board: &Board,
    moves_along: impl Fn(Direction) -> bool,
) -> bool {
    let Some(direction) = Direction::between(from, target) else {
        return false;
    };
    if !moves_along(direction) {
        return false;
    }
    let mut current = from.shift(direction);
    while let Some(square) = current {
        if square == target {
            return true;
        }
        if !board.is_empty(square) {
            return false;
        }
        current = square.shift(direction);
    }
    false
}
