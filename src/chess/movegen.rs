//! Pseudo-legal move generation: moves that obey the piece movement and
//! capture rules but may leave the mover's king in check. [`Move::is_legal`]
//! filters them.
//!
//! Castling is the exception: its safety conditions (the king does not start,
//! pass or land on an attacked square) are checked during generation.

use crate::chess::board::Board;
use crate::chess::core::{
    CastleSide,
    Direction,
    Piece,
    PieceKind,
    Player,
    Position,
    Promotion,
    KING_COLUMN,
};
use crate::chess::moves::{Move, MoveList};

const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

impl Piece {
    /// Generates candidate moves of this piece standing on `from`.
    ///
    /// ```
    /// use gambit::chess::board::Board;
    /// use gambit::chess::core::Position;
    ///
    /// let board = Board::initial();
    /// let e2 = Position::try_from("e2").unwrap();
    /// let moves = board.at(e2).unwrap().moves(e2, &board);
    /// let moves: Vec<String> = moves.iter().map(ToString::to_string).collect();
    /// assert_eq!(moves, vec!["e2e3", "e2e4"]);
    /// ```
    #[must_use]
    pub fn moves(self, from: Position, board: &Board) -> MoveList {
        let mut moves = MoveList::new();
        match self.kind {
            PieceKind::Pawn => pawn_moves(self.owner, from, board, &mut moves),
            PieceKind::Knight => {
                step_moves(self.owner, from, board, KNIGHT_OFFSETS, &mut moves);
            },
            PieceKind::Bishop => {
                sliding_moves(self.owner, from, board, &Direction::DIAGONAL, &mut moves);
            },
            PieceKind::Rook => {
                sliding_moves(self.owner, from, board, &Direction::ORTHOGONAL, &mut moves);
            },
            PieceKind::Queen => {
                sliding_moves(self.owner, from, board, &Direction::ALL, &mut moves);
            },
            PieceKind::King => {
                step_moves(
                    self.owner,
                    from,
                    board,
                    Direction::ALL.map(Direction::delta),
                    &mut moves,
                );
                castle_moves(self.owner, from, board, &mut moves);
            },
        }
        moves
    }
}

fn can_land(player: Player, to: Position, board: &Board) -> bool {
    board.at(to).map_or(true, |piece| piece.owner != player)
}

fn pawn_moves(player: Player, from: Position, board: &Board, moves: &mut MoveList) {
    let direction = player.pawn_direction();
    if let Some(to) = from.offset(direction, 0) {
        if board.is_empty(to) {
            push_pawn_move(player, from, to, moves);
            if from.row() == player.pawn_starting_row() {
                if let Some(double) = to
                    .offset(direction, 0)
                    .filter(|&square| board.is_empty(square))
                {
                    moves.push(Move::DoublePawnAdvance { from, to: double });
                }
            }
        }
    }
    let en_passant = board.pawn_skip_position(player.opponent());
    for column_delta in [-1, 1] {
        let Some(to) = from.offset(direction, column_delta) else {
            continue;
        };
        match board.at(to) {
            Some(piece) if piece.owner != player => push_pawn_move(player, from, to, moves),
            None if en_passant == Some(to) => moves.push(Move::EnPassant { from, to }),
            _ => (),
        }
    }
}

fn push_pawn_move(player: Player, from: Position, to: Position, moves: &mut MoveList) {
    if to.row() == player.promotion_row() {
        for promotion in Promotion::ALL {
            moves.push(Move::PawnPromotion {
                from,
                to,
                promotion,
            });
        }
    } else {
        moves.push(Move::Normal { from, to });
    }
}

fn step_moves(
    player: Player,
    from: Position,
    board: &Board,
    offsets: [(i8, i8); 8],
    moves: &mut MoveList,
) {
    for (row_delta, column_delta) in offsets {
        if let Some(to) = from.offset(row_delta, column_delta) {
            if can_land(player, to, board) {
                moves.push(Move::Normal { from, to });
            }
        }
    }
}

fn sliding_moves(
    player: Player,
    from: Position,
    board: &Board,
    directions: &[Direction],
    moves: &mut MoveList,
) {
    for &direction in directions {
        let mut current = from.shift(direction);
        while let Some(to) = current {
            match board.at(to) {
                None => moves.push(Move::Normal { from, to }),
                Some(piece) => {
                    if piece.owner != player {
                        moves.push(Move::Normal { from, to });
                    }
                    break;
                },
            }
            current = to.shift(direction);
        }
    }
}

fn castle_moves(player: Player, from: Position, board: &Board, moves: &mut MoveList) {
    let row = player.backrank_row();
    if from != Position::from_coordinates(row, KING_COLUMN) {
        return;
    }
    if board.at(from).map_or(true, |king| king.has_moved) {
        return;
    }
    for side in CastleSide::ALL {
        let rook_ready = board
            .at(Position::from_coordinates(row, side.rook_column()))
            .is_some_and(|rook| {
                rook.owner == player && rook.kind == PieceKind::Rook && !rook.has_moved
            });
        if !rook_ready {
            continue;
        }
        let (low, high) = ordered(KING_COLUMN, side.rook_column());
        if ((low + 1)..high)
            .any(|column| !board.is_empty(Position::from_coordinates(row, column)))
        {
            continue;
        }
        let destination = side.king_destination_column();
        let (low, high) = ordered(KING_COLUMN, destination);
        if (low..=high).any(|column| {
            board.is_attacked(Position::from_coordinates(row, column), player.opponent())
        }) {
            continue;
        }
        moves.push(Move::Castle {
            side,
            from,
            to: Position::from_coordinates(row, destination),
        });
    }
}

const fn ordered(a: u8, b: u8) -> (u8, u8) {
    if a < b {
        (a, b)
    } else {
        (b, a)
    }
}

#[cfg(test)]
mod test {
    use itertools::Itertools;
    use pretty_assertions::assert_eq;

    use super::*;

    fn pseudo_legal(placement: &str, from: &str) -> Vec<String> {
        let board = Board::from_placement(placement).unwrap();
        let from = Position::try_from(from).unwrap();
        board
            .at(from)
            .unwrap()
            .moves(from, &board)
            .iter()
            .map(ToString::to_string)
            .sorted()
            .collect()
    }

    #[test]
    fn pawn() {
        assert_eq!(pseudo_legal("8/8/8/8/8/8/4P3/8", "e2"), vec!["e2e3", "e2e4"]);
        // Blocked double advance.
        assert_eq!(pseudo_legal("8/8/8/8/4n3/8/4P3/8", "e2"), vec!["e2e3"]);
        assert!(pseudo_legal("8/8/8/8/8/4n3/4P3/8", "e2").is_empty());
        assert_eq!(
            pseudo_legal("8/8/8/8/8/3n1N2/4P3/8", "e2"),
            vec!["e2d3", "e2e3", "e2e4"]
        );
        assert_eq!(pseudo_legal("8/4p3/8/8/8/8/8/8", "e7"), vec!["e7e5", "e7e6"]);
        // Double advance is only possible from the starting row.
        assert_eq!(pseudo_legal("8/8/8/8/8/4P3/8/8", "e3"), vec!["e3e4"]);
    }

    #[test]
    fn promotions() {
        assert_eq!(
            pseudo_legal("1n6/P7/8/8/8/8/8/8", "a7"),
            vec!["a7a8b", "a7a8n", "a7a8q", "a7a8r", "a7b8b", "a7b8n", "a7b8q", "a7b8r"]
        );
        assert_eq!(
            pseudo_legal("8/8/8/8/8/8/6p1/5R1R", "g2"),
            vec![
                "g2f1b", "g2f1n", "g2f1q", "g2f1r", "g2g1b", "g2g1n", "g2g1q", "g2g1r", "g2h1b",
                "g2h1n", "g2h1q", "g2h1r"
            ]
        );
    }

    #[test]
    fn en_passant() {
        let mut board = Board::from_placement("8/8/8/3pP3/8/8/8/8").unwrap();
        let e5 = Position::try_from("e5").unwrap();
        let pawn = board.at(e5).unwrap();
        assert_eq!(
            pawn.moves(e5, &board).iter().map(ToString::to_string).collect::<Vec<_>>(),
            vec!["e5e6"]
        );
        board.set_pawn_skip_position(Player::Black, Position::try_from("d6").ok());
        assert_eq!(
            pawn.moves(e5, &board)
                .iter()
                .map(ToString::to_string)
                .sorted()
                .collect::<Vec<_>>(),
            vec!["e5d6", "e5e6"]
        );
        assert!(pawn
            .moves(e5, &board)
            .iter()
            .any(|m| matches!(m, Move::EnPassant { .. })));
    }

    #[test]
    fn knight() {
        assert_eq!(pseudo_legal("8/8/8/8/8/8/8/N7", "a1"), vec!["a1b3", "a1c2"]);
        assert_eq!(pseudo_legal("8/8/8/8/8/1P6/2p5/N7", "a1"), vec!["a1c2"]);
    }

    #[test]
    fn sliders() {
        assert_eq!(
            pseudo_legal("8/8/8/8/8/2p5/1P6/B7", "a1"),
            Vec::<String>::new()
        );
        assert_eq!(
            pseudo_legal("8/8/8/8/8/2p5/8/B7", "a1"),
            vec!["a1b2", "a1c3"]
        );
        assert_eq!(
            pseudo_legal("8/8/8/8/8/8/8/R1n5", "a1"),
            vec!["a1a2", "a1a3", "a1a4", "a1a5", "a1a6", "a1a7", "a1a8", "a1b1", "a1c1"]
        );
        assert_eq!(
            pseudo_legal("8/8/8/3Q4/8/8/8/8", "d5")
                .len(),
            27
        );
    }

    #[test]
    fn king_and_castling() {
        assert_eq!(
            pseudo_legal("r3k2r/8/8/8/8/8/8/R3K2R", "e1"),
            vec!["e1c1", "e1d1", "e1d2", "e1e2", "e1f1", "e1f2", "e1g1"]
        );
        // Path between the king and the rook must be empty, b1 included.
        assert_eq!(
            pseudo_legal("r3k2r/8/8/8/8/8/8/RN2K1NR", "e1"),
            vec!["e1d1", "e1d2", "e1e2", "e1f1", "e1f2"]
        );
        // The king can not castle out of, through or into check.
        assert_eq!(
            pseudo_legal("r3k2r/8/8/8/4r3/8/8/R3K2R", "e1"),
            vec!["e1d1", "e1d2", "e1e2", "e1f1", "e1f2"]
        );
        assert_eq!(
            pseudo_legal("r3k2r/8/8/8/8/8/5r2/R3K2R", "e1"),
            vec!["e1c1", "e1d1", "e1d2", "e1e2", "e1f1", "e1f2"]
        );
        assert_eq!(
            pseudo_legal("r3k2r/8/8/8/8/8/8/R3K1nR", "e1"),
            vec!["e1c1", "e1d1", "e1d2", "e1e2", "e1f1", "e1f2"]
        );
        assert_eq!(
            pseudo_legal("r3k2r/8/8/8/8/8/8/R3K2R", "e8"),
            vec!["e8c8", "e8d7", "e8d8", "e8e7", "e8f7", "e8f8", "e8g8"]
        );
        assert_eq!(
            pseudo_legal("r3k2r/8/8/8/8/8/6R1/R3K2R", "e8"),
            vec!["e8c8", "e8d7", "e8d8", "e8e7", "e8f7", "e8f8"]
        );
        // The square next to the rook on the long side may be attacked.
        assert_eq!(
            pseudo_legal("r3k2r/8/8/8/8/8/1R6/4K3", "e8"),
            vec!["e8c8", "e8d7", "e8d8", "e8e7", "e8f7", "e8f8", "e8g8"]
        );
        // Moved rook or king can not castle.
        let mut board = Board::from_placement("r3k2r/8/8/8/8/8/8/R3K2R").unwrap();
        board.apply_castle_rights(crate::chess::core::CastleRights::WHITE_LONG);
        let e1 = Position::try_from("e1").unwrap();
        assert_eq!(
            board
                .at(e1)
                .unwrap()
                .moves(e1, &board)
                .iter()
                .map(ToString::to_string)
                .sorted()
                .collect::<Vec<_>>(),
            vec!["e1c1", "e1d1", "e1d2", "e1e2", "e1f1", "e1f2"]
        );
    }
}
