//! [Perft] (**per**formance **t**esting) counts the leaf nodes of the legal
//! move tree. The counts for well-known positions are published, which makes
//! perft the standard way to validate move generation.
//!
//! [Perft]: https://www.chessprogramming.org/Perft

use crate::chess::board::Board;
use crate::chess::core::Player;

/// Returns the number of legal move sequences of length `depth` starting with
/// `player` to move.
///
/// Moves are made the same way [`crate::chess::game::GameState`] makes them:
/// the mover's pawn skip record is cleared before execution.
#[must_use]
pub fn perft(board: &Board, player: Player, depth: u8) -> u64 {
    if depth == 0 {
        return 1;
    }
    let mut nodes = 0;
    for (from, piece) in board.pieces(player) {
        for candidate in piece.moves(from, board) {
            if !candidate.is_legal(board) {
                continue;
            }
            if depth == 1 {
                nodes += 1;
                continue;
            }
            let mut next = board.clone();
            next.set_pawn_skip_position(player, None);
            let _ = candidate.execute(&mut next);
            nodes += perft(&next, player.opponent(), depth - 1);
        }
    }
    nodes
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn starting_position() {
        let board = Board::initial();
        assert_eq!(perft(&board, Player::White, 0), 1);
        assert_eq!(perft(&board, Player::White, 1), 20);
        assert_eq!(perft(&board, Player::White, 2), 400);
        assert_eq!(perft(&board, Player::White, 3), 8902);
    }
}
