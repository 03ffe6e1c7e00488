//! Tracking positions that occurred in the game to detect [threefold
//! repetition].
//!
//! [threefold repetition]: https://www.chessprogramming.org/Repetitions

use std::collections::HashMap;

use crate::chess::board::Board;
use crate::chess::core::{CastleRights, PieceKind, Player, Position, BOARD_SIZE};

/// Canonical identity of a position for repetition purposes: piece placement,
/// side to move, castling options and en passant opportunity.
///
/// Whether a piece "has moved" is only reflected through [`CastleRights`] and
/// the en passant square only counts when the side to move has a pawn next
/// to the pawn that has just advanced.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct StateKey {
    squares: [Option<(Player, PieceKind)>; BOARD_SIZE as usize],
    side_to_move: Player,
    castling: CastleRights,
    en_passant: Option<Position>,
}

impl StateKey {
    /// Computes the key of the board with `side_to_move` to play next.
    #[must_use]
    pub fn new(board: &Board, side_to_move: Player) -> Self {
        let mut squares = [None; BOARD_SIZE as usize];
        for (position, piece) in Position::iter().filter_map(|position| {
            board.at(position).map(|piece| (position, piece))
        }) {
            squares[position.index()] = Some((piece.owner, piece.kind));
        }
        Self {
            squares,
            side_to_move,
            castling: board.castle_rights(),
            en_passant: en_passant_target(board, side_to_move),
        }
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn side_to_move(&self) -> Player {
        self.side_to_move
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn en_passant(&self) -> Option<Position> {
        self.en_passant
    }
}

fn en_passant_target(board: &Board, side_to_move: Player) -> Option<Position> {
    let target = board.pawn_skip_position(side_to_move.opponent())?;
    let row_delta = -side_to_move.pawn_direction();
    [-1, 1]
        .into_iter()
        .filter_map(|column_delta| target.offset(row_delta, column_delta))
        .any(|square| {
            board.at(square).is_some_and(|piece| {
                piece.owner == side_to_move && piece.kind == PieceKind::Pawn
            })
        })
        .then_some(target)
}

/// Counts occurrences of each position since the last irreversible move.
#[derive(Clone, Debug, Default)]
pub struct RepetitionTable {
    table: HashMap<StateKey, u8>,
}

impl RepetitionTable {
    /// Creates an empty repetition table.
    #[must_use]
    pub fn new() -> Self {
        Self {
            table: HashMap::new(),
        }
    }

    /// Removes all entries from the repetition history. Captures and pawn
    /// moves can not be undone, so no earlier position can occur again.
    pub fn clear(&mut self) {
        self.table.clear();
    }

    /// Checks whether the repetition table has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Number of times the position was recorded.
    #[must_use]
    pub fn count(&self, key: &StateKey) -> u8 {
        self.table.get(key).copied().unwrap_or(0)
    }

    /// Returns true if the position has occurred 3 times.
    ///
    /// In the tournament setting 3-fold repetition is a draw.
    #[must_use]
    pub fn record(&mut self, key: StateKey) -> bool {
        let count = self.table.entry(key).or_insert(0);
        *count = count.saturating_add(1);
        *count == 3
    }
}
