//! [`Move`] is a closed set of move kinds. Each kind knows how to execute itself
//! on a [`Board`] and how to check that it does not leave the mover in check.

use std::fmt;

use arrayvec::ArrayVec;

use crate::chess::board::Board;
use crate::chess::core::{CastleSide, Piece, PieceKind, Position, Promotion};

/// Maximum number of pseudo-legal moves a single piece can have: a queen in
/// the center of an empty board has 27.
pub const MAX_PIECE_MOVES: usize = 32;

/// Moves of a single piece.
pub type MoveList = ArrayVec<Move, MAX_PIECE_MOVES>;

/// A move of the player to move. Moves are plain values: they are created by
/// move generation and never change afterwards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Move {
    /// Moves a piece, capturing whatever stands on the destination. Pawn
    /// single pushes and regular pawn captures are also normal moves.
    #[allow(missing_docs)]
    Normal { from: Position, to: Position },
    /// Pawn advance by two squares from its starting row.
    #[allow(missing_docs)]
    DoublePawnAdvance { from: Position, to: Position },
    /// Pawn captures the opposing pawn which has just skipped over `to`.
    #[allow(missing_docs)]
    EnPassant { from: Position, to: Position },
    /// King moves two squares towards the rook, the rook lands on the square
    /// the king passed through. `from` and `to` are the king's squares.
    #[allow(missing_docs)]
    Castle {
        side: CastleSide,
        from: Position,
        to: Position,
    },
    /// Pawn reaches the last row and turns into another piece.
    #[allow(missing_docs)]
    PawnPromotion {
        from: Position,
        to: Position,
        promotion: Promotion,
    },
}

impl Move {
    #[allow(missing_docs)]
    #[must_use]
    pub const fn from(self) -> Position {
        match self {
            Self::Normal { from, .. }
            | Self::DoublePawnAdvance { from, .. }
            | Self::EnPassant { from, .. }
            | Self::Castle { from, .. }
            | Self::PawnPromotion { from, .. } => from,
        }
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn to(self) -> Position {
        match self {
            Self::Normal { to, .. }
            | Self::DoublePawnAdvance { to, .. }
            | Self::EnPassant { to, .. }
            | Self::Castle { to, .. }
            | Self::PawnPromotion { to, .. } => to,
        }
    }

    /// Square of the piece this move would capture, if any. For en passant
    /// this is not the destination: the captured pawn stands next to the
    /// capturing one.
    #[must_use]
    pub fn captured_position(self, board: &Board) -> Option<Position> {
        match self {
            Self::EnPassant { from, to } => {
                Some(Position::from_coordinates(from.row(), to.column()))
            },
            Self::Castle { .. } => None,
            Self::Normal { to, .. }
            | Self::DoublePawnAdvance { to, .. }
            | Self::PawnPromotion { to, .. } => board.at(to).map(|_| to),
        }
    }

    /// Applies the move to the board.
    ///
    /// Returns true if the move resets the fifty-move rule counter: it is a
    /// capture or a pawn move.
    ///
    /// The caller is responsible for only executing moves produced by move
    /// generation for the same board; a move starting on an empty square
    /// leaves the board intact and returns false.
    pub fn execute(self, board: &mut Board) -> bool {
        match self {
            Self::Normal { from, to } => {
                let Some(piece) = board.take(from) else {
                    return false;
                };
                let captured = board.put(to, moved(piece));
                captured.is_some() || piece.kind == PieceKind::Pawn
            },
            Self::DoublePawnAdvance { from, to } => {
                let Some(pawn) = board.take(from) else {
                    return false;
                };
                let _ = board.put(to, moved(pawn));
                let skipped =
                    Position::from_coordinates((from.row() + to.row()) / 2, from.column());
                board.set_pawn_skip_position(pawn.owner, Some(skipped));
                true
            },
            Self::EnPassant { from, to } => {
                let Some(pawn) = board.take(from) else {
                    return false;
                };
                let _ = board.put(to, moved(pawn));
                let _ = board.take(Position::from_coordinates(from.row(), to.column()));
                board.set_pawn_skip_position(pawn.owner.opponent(), None);
                true
            },
            Self::Castle { side, from, to } => {
                let Some(king) = board.take(from) else {
                    return false;
                };
                let _ = board.put(to, moved(king));
                let row = from.row();
                let rook_square = Position::from_coordinates(row, side.rook_column());
                if let Some(rook) = board.take(rook_square) {
                    let _ = board.put(
                        Position::from_coordinates(row, side.rook_destination_column()),
                        moved(rook),
                    );
                }
                false
            },
            Self::PawnPromotion {
                from,
                to,
                promotion,
            } => {
                let Some(pawn) = board.take(from) else {
                    return false;
                };
                let _ = board.put(
                    to,
                    Piece {
                        owner: pawn.owner,
                        kind: promotion.into(),
                        has_moved: true,
                    },
                );
                true
            },
        }
    }

    /// Executes the move on a copy of the board and checks whether the mover's
    /// king is safe afterwards. A move from an empty square is never legal.
    #[must_use]
    pub fn is_legal(self, board: &Board) -> bool {
        let Some(mover) = board.at(self.from()).map(|piece| piece.owner) else {
            return false;
        };
        let mut probe = board.clone();
        let _ = self.execute(&mut probe);
        !probe.is_in_check(mover)
    }
}

const fn moved(piece: Piece) -> Piece {
    Piece {
        has_moved: true,
        ..piece
    }
}

impl fmt::Display for Move {
    /// Serializes the move in [UCI format]: source and destination squares
    /// followed by the promotion piece, if any. Castling is written as the king
    /// move ("e1g1").
    ///
    /// [UCI format]: https://www.chessprogramming.org/Algebraic_Chess_Notation#UCI
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from(), self.to())?;
        if let Self::PawnPromotion { promotion, .. } = self {
            write!(f, "{promotion}")?;
        }
        Ok(())
    }
}
