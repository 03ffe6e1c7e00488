//! Mailbox [`Board`]: 64 cells of optional pieces plus the per-player record of
//! the square a pawn skipped over on its latest double advance.
//!
//! The board is the authoritative spatial state. It answers the queries
//! legality checking needs ([`Board::is_in_check`], [`Board::is_attacked`]) and
//! performs low-level mutation; it does not know whose turn it is.

use std::fmt::{self, Write};
use std::ops::Index;

use anyhow::{bail, Context};
use arrayvec::ArrayVec;

use crate::chess::core::{
    CastleRights,
    CastleSide,
    Piece,
    PieceKind,
    Player,
    Position,
    BOARD_SIZE,
    BOARD_WIDTH,
    KING_COLUMN,
};

/// Piece arrangement on a player's back rank, from the A file to the H file.
const BACK_RANK: [PieceKind; BOARD_WIDTH as usize] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// Piece-centric board representation.
#[derive(Clone, PartialEq, Eq)]
pub struct Board {
    squares: [Option<Piece>; BOARD_SIZE as usize],
    pawn_skips: [Option<Position>; 2],
}

impl Board {
    /// Board with no pieces on it.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            squares: [None; BOARD_SIZE as usize],
            pawn_skips: [None; 2],
        }
    }

    /// Standard starting arrangement: White occupies rows 6 and 7 (ranks 2 and
    /// 1), Black occupies rows 1 and 0.
    ///
    /// ```
    /// use gambit::chess::board::Board;
    ///
    /// assert_eq!(
    ///     Board::initial().to_string(),
    ///     "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR"
    /// );
    /// ```
    #[must_use]
    pub fn initial() -> Self {
        let mut board = Self::empty();
        for player in Player::BOTH {
            for (column, kind) in (0..BOARD_WIDTH).zip(BACK_RANK) {
                let _ = board.put(
                    Position::from_coordinates(player.backrank_row(), column),
                    Piece::new(player, kind),
                );
                let _ = board.put(
                    Position::from_coordinates(player.pawn_starting_row(), column),
                    Piece::new(player, PieceKind::Pawn),
                );
            }
        }
        board
    }

    /// Parses the piece placement field of [Forsyth-Edwards Notation] (e.g.
    /// "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR"). The first rank in the
    /// input is rank 8 (row 0).
    ///
    /// Pieces are created as if they never moved; use
    /// [`Board::apply_castle_rights`] to account for lost castling options.
    ///
    /// # Errors
    ///
    /// If the input is malformed, if a player has more than one king or if a
    /// pawn is placed on the first or the last rank.
    ///
    /// [Forsyth-Edwards Notation]: https://www.chessprogramming.org/Forsyth-Edwards_Notation
    pub fn from_placement(placement: &str) -> anyhow::Result<Self> {
        let mut board = Self::empty();
        let mut row: u8 = 0;
        for rank in placement.split('/') {
            if row == BOARD_WIDTH {
                bail!("incorrect placement: expected 8 ranks, got {placement}");
            }
            let mut column: u8 = 0;
            for symbol in rank.chars() {
                if column >= BOARD_WIDTH {
                    bail!("incorrect placement: rank {rank} is longer than {BOARD_WIDTH}");
                }
                match symbol {
                    '1'..='8' => {
                        column += symbol as u8 - b'0';
                        continue;
                    },
                    '0' | '9' => bail!("incorrect placement: unexpected skip '{symbol}'"),
                    _ => (),
                }
                let piece = Piece::try_from(symbol)
                    .with_context(|| format!("incorrect placement: {placement}"))?;
                if piece.kind == PieceKind::Pawn
                    && (row == Player::White.backrank_row() || row == Player::Black.backrank_row())
                {
                    bail!("pawns can not be placed on the first or the last rank");
                }
                let _ = board.put(Position::new(row, column)?, piece);
                column += 1;
            }
            if column != BOARD_WIDTH {
                bail!("incorrect placement: rank size should be exactly {BOARD_WIDTH}, got {rank}");
            }
            row += 1;
        }
        if row != BOARD_WIDTH {
            bail!("incorrect placement: there should be 8 ranks, got {placement}");
        }
        for player in Player::BOTH {
            let kings = board
                .pieces(player)
                .filter(|(_, piece)| piece.kind == PieceKind::King)
                .count();
            if kings > 1 {
                bail!("expected at most one king per player, got {kings} for {player:?}");
            }
        }
        Ok(board)
    }

    /// Returns the piece standing on given square.
    #[must_use]
    pub fn at(&self, position: Position) -> Option<Piece> {
        self.squares[position.index()]
    }

    /// Same as [`Board::at`] for raw coordinates.
    ///
    /// # Errors
    ///
    /// If the coordinates are outside the board.
    pub fn at_coordinates(&self, row: u8, column: u8) -> anyhow::Result<Option<Piece>> {
        Ok(self.at(Position::new(row, column)?))
    }

    #[allow(missing_docs)]
    #[must_use]
    pub fn is_empty(&self, position: Position) -> bool {
        self.at(position).is_none()
    }

    /// Places the piece on a square and returns whatever was there before.
    pub fn put(&mut self, position: Position, piece: Piece) -> Option<Piece> {
        self.squares[position.index()].replace(piece)
    }

    /// Removes the piece from a square.
    pub fn take(&mut self, position: Position) -> Option<Piece> {
        self.squares[position.index()].take()
    }

    /// All pieces of the player along with their squares, in A8..H1 scan order.
    pub fn pieces(&self, player: Player) -> impl Iterator<Item = (Position, Piece)> + '_ {
        Position::iter().filter_map(move |position| {
            self.at(position)
                .filter(|piece| piece.owner == player)
                .map(|piece| (position, piece))
        })
    }

    /// Squares occupied by the player's pieces.
    pub fn piece_positions_for(&self, player: Player) -> impl Iterator<Item = Position> + '_ {
        self.pieces(player).map(|(position, _)| position)
    }

    /// The square the player's pawn skipped over with a double advance on the
    /// latest move, i.e. the square an en passant capture would land on.
    #[must_use]
    pub fn pawn_skip_position(&self, player: Player) -> Option<Position> {
        self.pawn_skips[player.index()]
    }

    #[allow(missing_docs)]
    pub fn set_pawn_skip_position(&mut self, player: Player, position: Option<Position>) {
        self.pawn_skips[player.index()] = position;
    }

    #[allow(missing_docs)]
    #[must_use]
    pub fn king_position(&self, player: Player) -> Option<Position> {
        self.pieces(player)
            .find(|(_, piece)| piece.kind == PieceKind::King)
            .map(|(position, _)| position)
    }

    /// Checks whether any piece of `attacker` could capture on `target`.
    #[must_use]
    pub fn is_attacked(&self, target: Position, attacker: Player) -> bool {
        self.pieces(attacker)
            .any(|(from, piece)| piece.attacks(from, target, self))
    }

    /// Returns true if the player's king can be captured by the opponent.
    /// A board without the player's king is never in check.
    #[must_use]
    pub fn is_in_check(&self, player: Player) -> bool {
        self.king_position(player)
            .is_some_and(|king| self.is_attacked(king, player.opponent()))
    }

    /// Returns true if neither side can possibly checkmate:
    ///
    /// - King vs King
    /// - King and a single minor piece vs King
    /// - King and Bishop vs King and Bishop with both bishops on the squares
    ///   of the same color
    #[must_use]
    pub fn insufficient_material(&self) -> bool {
        let mut remaining = ArrayVec::<(Piece, Position), 2>::new();
        for (position, piece) in Player::BOTH
            .into_iter()
            .flat_map(|player| self.pieces(player))
        {
            if piece.kind == PieceKind::King {
                continue;
            }
            if remaining.try_push((piece, position)).is_err() {
                return false;
            }
        }
        match remaining.as_slice() {
            [] => true,
            [(piece, _)] => matches!(piece.kind, PieceKind::Bishop | PieceKind::Knight),
            [(first, first_square), (second, second_square)] => {
                first.kind == PieceKind::Bishop
                    && second.kind == PieceKind::Bishop
                    && first.owner != second.owner
                    && first_square.is_light() == second_square.is_light()
            },
            _ => false,
        }
    }

    /// Castling options that remain available: the king and the rook are on
    /// their original squares and neither has moved.
    #[must_use]
    pub fn castle_rights(&self) -> CastleRights {
        let mut rights = CastleRights::empty();
        for player in Player::BOTH {
            let row = player.backrank_row();
            let king = Position::from_coordinates(row, KING_COLUMN);
            if !self.is_unmoved(king, player, PieceKind::King) {
                continue;
            }
            for side in CastleSide::ALL {
                let rook = Position::from_coordinates(row, side.rook_column());
                if self.is_unmoved(rook, player, PieceKind::Rook) {
                    rights |= CastleRights::for_side(player, side);
                }
            }
        }
        rights
    }

    /// Marks kings and rooks as moved so that [`Board::castle_rights`] does
    /// not exceed `rights`.
    pub fn apply_castle_rights(&mut self, rights: CastleRights) {
        for player in Player::BOTH {
            let row = player.backrank_row();
            let mut lost_sides = 0;
            for side in CastleSide::ALL {
                if rights.contains(CastleRights::for_side(player, side)) {
                    continue;
                }
                lost_sides += 1;
                self.mark_moved(
                    Position::from_coordinates(row, side.rook_column()),
                    player,
                    PieceKind::Rook,
                );
            }
            if lost_sides == CastleSide::ALL.len() {
                self.mark_moved(
                    Position::from_coordinates(row, KING_COLUMN),
                    player,
                    PieceKind::King,
                );
            }
        }
    }

    fn is_unmoved(&self, position: Position, owner: Player, kind: PieceKind) -> bool {
        self.at(position)
            .is_some_and(|piece| piece.owner == owner && piece.kind == kind && !piece.has_moved)
    }

    fn mark_moved(&mut self, position: Position, owner: Player, kind: PieceKind) {
        if let Some(piece) = &mut self.squares[position.index()] {
            if piece.owner == owner && piece.kind == kind {
                piece.has_moved = true;
            }
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::initial()
    }
}

impl Index<Position> for Board {
    type Output = Option<Piece>;

    fn index(&self, position: Position) -> &Self::Output {
        &self.squares[position.index()]
    }
}

impl fmt::Display for Board {
    /// Prints board representation in FEN piece placement format.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..BOARD_WIDTH {
            let mut empty_squares = 0;
            for column in 0..BOARD_WIDTH {
                match self.at(Position::from_coordinates(row, column)) {
                    Some(piece) => {
                        if empty_squares != 0 {
                            write!(f, "{empty_squares}")?;
                            empty_squares = 0;
                        }
                        write!(f, "{piece}")?;
                    },
                    None => empty_squares += 1,
                }
            }
            if empty_squares != 0 {
                write!(f, "{empty_squares}")?;
            }
            if row + 1 != BOARD_WIDTH {
                f.write_char('/')?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for Board {
    /// Dumps the board in a simple format ('.' for empty square, FEN algebraic
    /// symbol for piece).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..BOARD_WIDTH {
            for column in 0..BOARD_WIDTH {
                match self.at(Position::from_coordinates(row, column)) {
                    Some(piece) => write!(f, "{piece}"),
                    None => f.write_char('.'),
                }?;
                if column + 1 != BOARD_WIDTH {
                    f.write_char(' ')?;
                }
            }
            if row + 1 != BOARD_WIDTH {
                f.write_char('\n')?;
            }
        }
        Ok(())
    }
}
