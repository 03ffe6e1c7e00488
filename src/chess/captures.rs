//! Keeps the pieces removed from the board and the material balance.

use crate::chess::core::{Piece, PieceKind, Player};

/// Value of each piece kind in pawns. Kings are never captured and are worth
/// nothing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[allow(missing_docs)]
pub struct MaterialValues {
    pub pawn: i32,
    pub knight: i32,
    pub bishop: i32,
    pub rook: i32,
    pub queen: i32,
    pub king: i32,
}

impl MaterialValues {
    #[allow(missing_docs)]
    #[must_use]
    pub const fn value(&self, kind: PieceKind) -> i32 {
        match kind {
            PieceKind::Pawn => self.pawn,
            PieceKind::Knight => self.knight,
            PieceKind::Bishop => self.bishop,
            PieceKind::Rook => self.rook,
            PieceKind::Queen => self.queen,
            PieceKind::King => self.king,
        }
    }
}

impl Default for MaterialValues {
    fn default() -> Self {
        Self {
            pawn: 1,
            knight: 3,
            bishop: 3,
            rook: 5,
            queen: 9,
            king: 0,
        }
    }
}

/// Pieces captured by each player in the current game.
///
/// ```
/// use gambit::chess::captures::CapturedPieces;
/// use gambit::chess::core::{Piece, PieceKind, Player};
///
/// let mut captures = CapturedPieces::default();
/// captures.record(Some(Piece::new(Player::Black, PieceKind::Rook)), Player::White);
/// captures.record(Some(Piece::new(Player::White, PieceKind::Pawn)), Player::Black);
/// captures.record(None, Player::Black);
/// assert_eq!(captures.material_balance(), 4);
/// assert_eq!(captures.captured_by(Player::Black).len(), 1);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CapturedPieces {
    values: MaterialValues,
    captured: [Vec<Piece>; 2],
    balance: i32,
}

impl CapturedPieces {
    #[allow(missing_docs)]
    #[must_use]
    pub fn new(values: MaterialValues) -> Self {
        Self {
            values,
            captured: [Vec::new(), Vec::new()],
            balance: 0,
        }
    }

    /// Records a piece captured by `by`. Nothing happens when there is no
    /// piece.
    pub fn record(&mut self, piece: Option<Piece>, by: Player) {
        let Some(piece) = piece else {
            return;
        };
        let value = self.values.value(piece.kind);
        match by {
            Player::White => self.balance += value,
            Player::Black => self.balance -= value,
        }
        self.captured[by.index()].push(piece);
    }

    /// Forgets all captures, keeping the material values.
    pub fn reset(&mut self) {
        for pieces in &mut self.captured {
            pieces.clear();
        }
        self.balance = 0;
    }

    /// Pieces captured by the player, in capture order.
    #[must_use]
    pub fn captured_by(&self, player: Player) -> &[Piece] {
        &self.captured[player.index()]
    }

    /// Material won by White minus material won by Black.
    #[must_use]
    pub const fn material_balance(&self) -> i32 {
        self.balance
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn values(&self) -> &MaterialValues {
        &self.values
    }
}
