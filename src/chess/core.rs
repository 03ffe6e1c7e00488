//! Chess primitives commonly used within [`crate::chess`].

use std::fmt::{self, Write};
use std::ops::Not;

use anyhow::bail;
use itertools::Itertools;

#[allow(missing_docs)]
pub const BOARD_WIDTH: u8 = 8;
#[allow(missing_docs)]
pub const BOARD_SIZE: u8 = BOARD_WIDTH * BOARD_WIDTH;

/// The column the king starts on (file E) for both players.
pub(super) const KING_COLUMN: u8 = 4;

/// A square on the board addressed by `(row, column)`.
///
/// Row 0 is the eighth rank (Black's back rank) and row 7 is the first rank
/// (White's back rank). Column 0 is the A file. This matches how the board is
/// drawn: top-left corner is A8.
///
/// ```
/// use gambit::chess::core::Position;
///
/// let e4 = Position::try_from("e4").unwrap();
/// assert_eq!((e4.row(), e4.column()), (4, 4));
/// assert_eq!(Position::new(7, 0).unwrap().to_string(), "a1");
/// assert!(Position::new(8, 0).is_err());
/// ```
///
/// A [`Position`] can only be constructed within the board bounds, so every
/// value of this type is a valid square. Out-of-range coordinates are reported
/// by the constructors instead of being clamped.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    row: u8,
    column: u8,
}

impl Position {
    /// Creates a square from its coordinates.
    ///
    /// # Errors
    ///
    /// If either coordinate is outside `0..BOARD_WIDTH`.
    pub fn new(row: u8, column: u8) -> anyhow::Result<Self> {
        if row >= BOARD_WIDTH {
            bail!("row should be within 0..BOARD_WIDTH, got {row}");
        }
        if column >= BOARD_WIDTH {
            bail!("column should be within 0..BOARD_WIDTH, got {column}");
        }
        Ok(Self { row, column })
    }

    /// Constructor for coordinates that are known to be on the board.
    pub(super) const fn from_coordinates(row: u8, column: u8) -> Self {
        assert!(row < BOARD_WIDTH && column < BOARD_WIDTH);
        Self { row, column }
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn row(self) -> u8 {
        self.row
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn column(self) -> u8 {
        self.column
    }

    /// Returns the square shifted by given deltas or `None` if it would be off
    /// the board.
    #[must_use]
    pub fn offset(self, row_delta: i8, column_delta: i8) -> Option<Self> {
        let row = self.row.checked_add_signed(row_delta)?;
        let column = self.column.checked_add_signed(column_delta)?;
        if row < BOARD_WIDTH && column < BOARD_WIDTH {
            Some(Self { row, column })
        } else {
            None
        }
    }

    /// Moves one step in the given direction.
    #[must_use]
    pub fn shift(self, direction: Direction) -> Option<Self> {
        let (row_delta, column_delta) = direction.delta();
        self.offset(row_delta, column_delta)
    }

    /// Light squares are the ones where `row + column` is even (A8 and H1 are
    /// light).
    #[must_use]
    pub const fn is_light(self) -> bool {
        (self.row + self.column) % 2 == 0
    }

    /// Iterates over all squares row by row, starting from A8.
    pub fn iter() -> impl Iterator<Item = Self> {
        (0..BOARD_WIDTH)
            .cartesian_product(0..BOARD_WIDTH)
            .map(|(row, column)| Self { row, column })
    }

    pub(super) fn index(self) -> usize {
        usize::from(self.row) * usize::from(BOARD_WIDTH) + usize::from(self.column)
    }
}

impl TryFrom<&str> for Position {
    type Error = anyhow::Error;

    /// Parses a square in algebraic notation (e.g. "e4").
    fn try_from(square: &str) -> anyhow::Result<Self> {
        let Some((file, rank)) = square.chars().collect_tuple() else {
            bail!(
                "square should be two-char, got {square} with {} chars",
                square.chars().count()
            );
        };
        let column = match file {
            'a'..='h' => file as u8 - b'a',
            _ => bail!("file should be within 'a'..='h', got '{file}'"),
        };
        let row = match rank {
            '1'..='8' => b'8' - rank as u8,
            _ => bail!("rank should be within '1'..='8', got '{rank}'"),
        };
        Self::new(row, column)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_char((b'a' + self.column) as char)?;
        f.write_char((b'8' - self.row) as char)
    }
}

/// A standard game of chess is played between two players: White (having the
/// advantage of the first turn) and Black.
#[allow(missing_docs)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Player {
    White,
    Black,
}

impl Player {
    #[allow(missing_docs)]
    pub const BOTH: [Self; 2] = [Self::White, Self::Black];

    /// "Flips" the color.
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Self::White => Self::Black,
            Self::Black => Self::White,
        }
    }

    pub(super) const fn index(self) -> usize {
        match self {
            Self::White => 0,
            Self::Black => 1,
        }
    }

    /// Row delta of a single pawn push: White pawns walk towards row 0.
    #[must_use]
    pub const fn pawn_direction(self) -> i8 {
        match self {
            Self::White => -1,
            Self::Black => 1,
        }
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn backrank_row(self) -> u8 {
        match self {
            Self::White => 7,
            Self::Black => 0,
        }
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn pawn_starting_row(self) -> u8 {
        match self {
            Self::White => 6,
            Self::Black => 1,
        }
    }

    /// The row a pawn of this player skips over when it advances two squares.
    #[must_use]
    pub const fn pawn_skip_row(self) -> u8 {
        match self {
            Self::White => 5,
            Self::Black => 2,
        }
    }

    /// Pawns reaching this row are promoted.
    #[must_use]
    pub const fn promotion_row(self) -> u8 {
        self.opponent().backrank_row()
    }
}

impl Not for Player {
    type Output = Self;

    fn not(self) -> Self::Output {
        self.opponent()
    }
}

impl TryFrom<&str> for Player {
    type Error = anyhow::Error;

    fn try_from(player: &str) -> anyhow::Result<Self> {
        match player {
            "w" => Ok(Self::White),
            "b" => Ok(Self::Black),
            _ => bail!("player should be 'w' or 'b', got '{player}'"),
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_char(match &self {
            Self::White => 'w',
            Self::Black => 'b',
        })
    }
}

/// Standard [chess pieces].
///
/// [chess pieces]: https://en.wikipedia.org/wiki/Chess_piece
#[allow(missing_docs)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl From<Promotion> for PieceKind {
    fn from(promotion: Promotion) -> Self {
        match promotion {
            Promotion::Queen => Self::Queen,
            Promotion::Rook => Self::Rook,
            Promotion::Bishop => Self::Bishop,
            Promotion::Knight => Self::Knight,
        }
    }
}

impl TryFrom<char> for PieceKind {
    type Error = anyhow::Error;

    fn try_from(symbol: char) -> anyhow::Result<Self> {
        match symbol.to_ascii_lowercase() {
            'p' => Ok(Self::Pawn),
            'n' => Ok(Self::Knight),
            'b' => Ok(Self::Bishop),
            'r' => Ok(Self::Rook),
            'q' => Ok(Self::Queen),
            'k' => Ok(Self::King),
            _ => bail!("piece symbol should be within \"KQRBNPkqrbnp\", got '{symbol}'"),
        }
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_char(match &self {
            Self::King => 'k',
            Self::Queen => 'q',
            Self::Rook => 'r',
            Self::Bishop => 'b',
            Self::Knight => 'n',
            Self::Pawn => 'p',
        })
    }
}

/// Represents a specific piece owned by a player.
///
/// `has_moved` is only consulted for castling (neither the king nor the rook
/// may have moved before) and is only ever set by executing a move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Piece {
    #[allow(missing_docs)]
    pub owner: Player,
    #[allow(missing_docs)]
    pub kind: PieceKind,
    #[allow(missing_docs)]
    pub has_moved: bool,
}

impl Piece {
    /// Creates a piece that has not moved yet.
    #[must_use]
    pub const fn new(owner: Player, kind: PieceKind) -> Self {
        Self {
            owner,
            kind,
            has_moved: false,
        }
    }
}

impl TryFrom<char> for Piece {
    type Error = anyhow::Error;

    /// Uppercase symbols are White pieces, lowercase ones are Black.
    fn try_from(symbol: char) -> anyhow::Result<Self> {
        let kind = PieceKind::try_from(symbol)?;
        let owner = if symbol.is_ascii_uppercase() {
            Player::White
        } else {
            Player::Black
        };
        Ok(Self::new(owner, kind))
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = self.kind.to_string();
        match self.owner {
            // White player: uppercase symbols.
            Player::White => f.write_str(&symbol.to_ascii_uppercase()),
            // Black player: lowercase symbols.
            Player::Black => f.write_str(&symbol),
        }
    }
}

/// A pawn can be promoted to a queen, rook, bishop or a knight.
#[allow(missing_docs)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Promotion {
    Queen,
    Rook,
    Bishop,
    Knight,
}

impl Promotion {
    #[allow(missing_docs)]
    pub const ALL: [Self; 4] = [Self::Queen, Self::Rook, Self::Bishop, Self::Knight];
}

impl TryFrom<char> for Promotion {
    type Error = anyhow::Error;

    fn try_from(symbol: char) -> anyhow::Result<Self> {
        match symbol {
            'q' => Ok(Self::Queen),
            'r' => Ok(Self::Rook),
            'b' => Ok(Self::Bishop),
            'n' => Ok(Self::Knight),
            _ => bail!("promotion should be one of 'q', 'r', 'b', 'n', got '{symbol}'"),
        }
    }
}

impl fmt::Display for Promotion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", PieceKind::from(*self))
    }
}

/// The two ways to castle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CastleSide {
    /// Short castle (O-O), towards the H file.
    King,
    /// Long castle (O-O-O), towards the A file.
    Queen,
}

impl CastleSide {
    #[allow(missing_docs)]
    pub const ALL: [Self; 2] = [Self::King, Self::Queen];

    /// Column of the rook taking part in castling.
    #[must_use]
    pub const fn rook_column(self) -> u8 {
        match self {
            Self::King => 7,
            Self::Queen => 0,
        }
    }

    /// The king always ends up two squares away from its starting column.
    #[must_use]
    pub const fn king_destination_column(self) -> u8 {
        match self {
            Self::King => 6,
            Self::Queen => 2,
        }
    }

    /// The rook lands on the square the king passed through.
    #[must_use]
    pub const fn rook_destination_column(self) -> u8 {
        match self {
            Self::King => 5,
            Self::Queen => 3,
        }
    }
}

bitflags::bitflags! {
    /// Track the ability to [castle] each side (kingside is often referred to
    /// as O-O or h-side castle, queenside -- O-O-O or a-side castle). When the
    /// king moves, player loses ability to castle both sides. When the rook
    /// moves, player loses ability to castle its corresponding side.
    ///
    /// The board does not store these flags: they are derived from whether the
    /// king and the rooks are still on their original squares and have never
    /// moved. The flags are used to tell apart positions that look the same but
    /// have different castling options.
    ///
    /// [castle]: https://www.chessprogramming.org/Castling
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct CastleRights : u8 {
        #[allow(missing_docs)]
        const WHITE_SHORT = 0b1000;
        #[allow(missing_docs)]
        const WHITE_LONG = 0b0100;
        #[allow(missing_docs)]
        const WHITE_BOTH = Self::WHITE_SHORT.bits() | Self::WHITE_LONG.bits();
        #[allow(missing_docs)]
        const BLACK_SHORT = 0b0010;
        #[allow(missing_docs)]
        const BLACK_LONG = 0b0001;
        #[allow(missing_docs)]
        const BLACK_BOTH = Self::BLACK_SHORT.bits() | Self::BLACK_LONG.bits();
        #[allow(missing_docs)]
        const ALL = Self::WHITE_BOTH.bits() | Self::BLACK_BOTH.bits();
    }
}

impl CastleRights {
    /// The flag corresponding to given player and side.
    #[must_use]
    pub const fn for_side(player: Player, side: CastleSide) -> Self {
        match (player, side) {
            (Player::White, CastleSide::King) => Self::WHITE_SHORT,
            (Player::White, CastleSide::Queen) => Self::WHITE_LONG,
            (Player::Black, CastleSide::King) => Self::BLACK_SHORT,
            (Player::Black, CastleSide::Queen) => Self::BLACK_LONG,
        }
    }
}

impl TryFrom<&str> for CastleRights {
    type Error = anyhow::Error;

    /// Parses [`CastleRights`] for both players from the FEN format.
    ///
    /// # Errors
    ///
    /// Returns [`anyhow::Error`] if given pattern does not match
    ///
    /// [`CastleRights`] := "-" | (K)? (Q)? (k)? (q)?
    fn try_from(input: &str) -> anyhow::Result<Self> {
        if input == "-" {
            return Ok(Self::empty());
        }
        let mut rights = Self::empty();
        for symbol in input.chars() {
            let right = match symbol {
                'K' => Self::WHITE_SHORT,
                'Q' => Self::WHITE_LONG,
                'k' => Self::BLACK_SHORT,
                'q' => Self::BLACK_LONG,
                _ => bail!("unknown castle rights: {input}"),
            };
            if rights.contains(right) {
                bail!("duplicate castle rights: {input}");
            }
            rights |= right;
        }
        if rights.is_empty() {
            bail!("castle rights can not be empty, use '-' instead");
        }
        Ok(rights)
    }
}

impl fmt::Display for CastleRights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_char('-');
        }
        for (flag, symbol) in [
            (Self::WHITE_SHORT, 'K'),
            (Self::WHITE_LONG, 'Q'),
            (Self::BLACK_SHORT, 'k'),
            (Self::BLACK_LONG, 'q'),
        ] {
            if self.contains(flag) {
                f.write_char(symbol)?;
            }
        }
        Ok(())
    }
}

/// Directions on the board from a perspective of White player.
///
/// Traditionally those are North (Up), West (Left), East (Right), South (Down)
/// and their combinations. However, using cardinal directions is confusing,
/// hence they are replaced by relative directions.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    /// Also known as NorthWest.
    UpLeft,
    /// Also known as North.
    Up,
    /// Also known as NorthEast.
    UpRight,
    /// Also known as East.
    Right,
    /// Also known as West.
    Left,
    /// Also known as SouthWest.
    DownLeft,
    /// Also known as South.
    Down,
    /// Also known as SouthEast.
    DownRight,
}

impl Direction {
    /// Rook directions.
    pub const ORTHOGONAL: [Self; 4] = [Self::Up, Self::Right, Self::Down, Self::Left];
    /// Bishop directions.
    pub const DIAGONAL: [Self; 4] = [Self::UpLeft, Self::UpRight, Self::DownLeft, Self::DownRight];
    /// Queen and king directions.
    pub const ALL: [Self; 8] = [
        Self::UpLeft,
        Self::Up,
        Self::UpRight,
        Self::Right,
        Self::Left,
        Self::DownLeft,
        Self::Down,
        Self::DownRight,
    ];

    /// `(row, column)` step. "Up" decreases the row since row 0 is the eighth
    /// rank.
    #[must_use]
    pub const fn delta(self) -> (i8, i8) {
        match self {
            Self::UpLeft => (-1, -1),
            Self::Up => (-1, 0),
            Self::UpRight => (-1, 1),
            Self::Right => (0, 1),
            Self::Left => (0, -1),
            Self::DownLeft => (1, -1),
            Self::Down => (1, 0),
            Self::DownRight => (1, 1),
        }
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn is_diagonal(self) -> bool {
        matches!(
            self,
            Self::UpLeft | Self::UpRight | Self::DownLeft | Self::DownRight
        )
    }

    /// Returns the direction of the line connecting two squares if they share
    /// a row, a column or a diagonal.
    #[must_use]
    pub fn between(from: Position, to: Position) -> Option<Self> {
        let row_delta = i16::from(to.row) - i16::from(from.row);
        let column_delta = i16::from(to.column) - i16::from(from.column);
        if row_delta != 0 && column_delta != 0 && row_delta.abs() != column_delta.abs() {
            return None;
        }
        match (row_delta.signum(), column_delta.signum()) {
            (-1, -1) => Some(Self::UpLeft),
            (-1, 0) => Some(Self::Up),
            (-1, 1) => Some(Self::UpRight),
            (0, 1) => Some(Self::Right),
            (0, -1) => Some(Self::Left),
            (1, -1) => Some(Self::DownLeft),
            (1, 0) => Some(Self::Down),
            (1, 1) => Some(Self::DownRight),
            _ => None,
        }
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::*;

    fn square(input: &str) -> Position {
        Position::try_from(input).expect("valid square")
    }

    #[test]
    fn position_bounds() {
        assert!(Position::new(0, 0).is_ok());
        assert!(Position::new(7, 7).is_ok());
        assert_eq!(Position::iter().count(), usize::from(BOARD_SIZE));
        assert_eq!(
            Position::iter().map(Position::index).collect::<Vec<_>>(),
            (0..usize::from(BOARD_SIZE)).collect::<Vec<_>>()
        );
    }

    #[test]
    #[should_panic(expected = "row should be within 0..BOARD_WIDTH, got 8")]
    fn position_from_incorrect_row() {
        let _ = Position::new(BOARD_WIDTH, 0).unwrap();
    }

    #[test]
    #[should_panic(expected = "column should be within 0..BOARD_WIDTH, got 9")]
    fn position_from_incorrect_column() {
        let _ = Position::new(3, 9).unwrap();
    }

    #[test]
    fn algebraic_squares() {
        assert_eq!(square("a8"), Position::new(0, 0).unwrap());
        assert_eq!(square("h1"), Position::new(7, 7).unwrap());
        assert_eq!(square("e2"), Position::new(6, 4).unwrap());
        assert_eq!(square("d6").to_string(), "d6");
        assert_eq!(
            ["a1", "b3", "f5", "h8"]
                .iter()
                .map(|input| square(input).to_string())
                .collect::<Vec<_>>(),
            vec!["a1", "b3", "f5", "h8"]
        );
        assert!(Position::try_from("i1").is_err());
        assert!(Position::try_from("a0").is_err());
        assert!(Position::try_from("a9").is_err());
        assert!(Position::try_from("e").is_err());
        assert!(Position::try_from("e44").is_err());
    }

    #[test]
    #[should_panic(expected = "file should be within 'a'..='h', got 'z'")]
    fn square_from_incorrect_file() {
        let _ = Position::try_from("z1").unwrap();
    }

    #[test]
    fn square_colors() {
        assert!(square("a8").is_light());
        assert!(square("h1").is_light());
        assert!(!square("a1").is_light());
        assert!(!square("c1").is_light());
        assert!(square("f1").is_light());
        assert!(!square("f8").is_light());
    }

    #[test]
    fn within_board_shift() {
        let e4 = square("e4");
        assert_eq!(e4.shift(Direction::Left), Some(square("d4")));
        assert_eq!(e4.shift(Direction::Up), Some(square("e5")));
        assert_eq!(e4.shift(Direction::UpRight), Some(square("f5")));
        assert_eq!(e4.shift(Direction::UpLeft), Some(square("d5")));
        assert_eq!(e4.shift(Direction::Right), Some(square("f4")));
        assert_eq!(e4.shift(Direction::Down), Some(square("e3")));
        assert_eq!(e4.shift(Direction::DownRight), Some(square("f3")));
        assert_eq!(e4.shift(Direction::DownLeft), Some(square("d3")));
    }

    #[test]
    fn corner_squares_shift() {
        let a1 = square("a1");
        assert_eq!(a1.shift(Direction::Up), Some(square("a2")));
        assert_eq!(a1.shift(Direction::UpRight), Some(square("b2")));
        assert_eq!(a1.shift(Direction::Right), Some(square("b1")));
        for direction in [
            Direction::Left,
            Direction::UpLeft,
            Direction::Down,
            Direction::DownRight,
            Direction::DownLeft,
        ] {
            assert_eq!(a1.shift(direction), None);
        }

        let h8 = square("h8");
        assert_eq!(h8.shift(Direction::Left), Some(square("g8")));
        assert_eq!(h8.shift(Direction::Down), Some(square("h7")));
        assert_eq!(h8.shift(Direction::DownLeft), Some(square("g7")));
        for direction in [
            Direction::Up,
            Direction::UpRight,
            Direction::UpLeft,
            Direction::DownRight,
            Direction::Right,
        ] {
            assert_eq!(h8.shift(direction), None);
        }
    }

    #[test]
    fn lines_between_squares() {
        assert_eq!(
            Direction::between(square("a1"), square("h8")),
            Some(Direction::UpRight)
        );
        assert_eq!(
            Direction::between(square("e1"), square("e8")),
            Some(Direction::Up)
        );
        assert_eq!(
            Direction::between(square("h4"), square("a4")),
            Some(Direction::Left)
        );
        assert_eq!(
            Direction::between(square("d5"), square("b3")),
            Some(Direction::DownLeft)
        );
        assert_eq!(Direction::between(square("b1"), square("c3")), None);
        assert_eq!(Direction::between(square("c3"), square("c3")), None);
    }

    #[test]
    fn pieces() {
        assert_eq!(
            "KQRBNPkqrbnp"
                .chars()
                .map(|symbol| Piece::try_from(symbol).unwrap().to_string())
                .collect::<String>(),
            "KQRBNPkqrbnp"
        );
        let knight = Piece::try_from('n').unwrap();
        assert_eq!(knight.owner, Player::Black);
        assert_eq!(knight.kind, PieceKind::Knight);
        assert!(!knight.has_moved);
        assert!(Piece::try_from('x').is_err());
    }

    #[test]
    fn promotions() {
        assert_eq!(
            ['q', 'r', 'b', 'n']
                .iter()
                .map(|symbol| Promotion::try_from(*symbol).unwrap())
                .collect::<Vec<_>>(),
            Promotion::ALL.to_vec()
        );
        assert!(Promotion::try_from('k').is_err());
        assert!(Promotion::try_from('p').is_err());
        assert_eq!(PieceKind::from(Promotion::Knight), PieceKind::Knight);
    }

    #[test]
    fn players() {
        assert_eq!(!Player::White, Player::Black);
        assert_eq!(Player::Black.opponent(), Player::White);
        assert_eq!(Player::White.promotion_row(), 0);
        assert_eq!(Player::Black.promotion_row(), 7);
        for player in Player::BOTH {
            assert_eq!(
                i16::from(player.pawn_starting_row()) + i16::from(player.pawn_direction()),
                i16::from(player.pawn_skip_row())
            );
        }
        assert_eq!(Player::try_from("w").unwrap(), Player::White);
        assert!(Player::try_from("x").is_err());
    }

    #[test]
    fn castle_rights() {
        assert_eq!(
            CastleRights::try_from("KQkq").unwrap(),
            CastleRights::ALL
        );
        assert_eq!(
            CastleRights::try_from("Kq").unwrap(),
            CastleRights::WHITE_SHORT | CastleRights::BLACK_LONG
        );
        assert_eq!(CastleRights::try_from("-").unwrap(), CastleRights::empty());
        assert!(CastleRights::try_from("KK").is_err());
        assert!(CastleRights::try_from("X").is_err());
        assert!(CastleRights::try_from("").is_err());
        assert_eq!(CastleRights::ALL.to_string(), "KQkq");
        assert_eq!(CastleRights::BLACK_BOTH.to_string(), "kq");
        assert_eq!(CastleRights::empty().to_string(), "-");
        assert_eq!(
            CastleRights::for_side(Player::Black, CastleSide::Queen),
            CastleRights::BLACK_LONG
        );
    }
}
