//! [`GameState`] drives a single game: it accepts legal moves of the player to
//! move, keeps the draw counters and repetition history and decides when and
//! how the game ends.

use std::fmt;
use std::sync::mpsc::{self, Receiver, Sender};
use std::time::Instant;

use anyhow::{anyhow, bail, Context};

use crate::chess::board::Board;
use crate::chess::captures::{CapturedPieces, MaterialValues};
use crate::chess::clock::{ChessClock, TimeControl};
use crate::chess::core::{CastleRights, Piece, PieceKind, Player, Position, Promotion};
use crate::chess::moves::{Move, MoveList};
use crate::chess::repetition::{RepetitionTable, StateKey};

/// Number of plies without captures and pawn moves after which the game is
/// drawn (fifty full moves by each side).
pub const FIFTY_MOVE_RULE_PLIES: u16 = 100;

/// Why the game ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EndReason {
    /// The player to move is in check and has no legal moves.
    Checkmate,
    /// The player to move is not in check and has no legal moves.
    Stalemate,
    /// [`FIFTY_MOVE_RULE_PLIES`] plies passed without a capture or a pawn move.
    FiftyMoveRule,
    /// Neither side can checkmate.
    InsufficientMaterial,
    /// The same position occurred for the third time.
    ThreefoldRepetition,
    /// A player ran out of time.
    TimeOut,
}

impl fmt::Display for EndReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Checkmate => "checkmate",
            Self::Stalemate => "stalemate",
            Self::FiftyMoveRule => "fifty-move rule",
            Self::InsufficientMaterial => "insufficient material",
            Self::ThreefoldRepetition => "threefold repetition",
            Self::TimeOut => "time out",
        })
    }
}

/// Final outcome of the game. Once set, it never changes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GameResult {
    winner: Option<Player>,
    reason: EndReason,
}

impl GameResult {
    #[allow(missing_docs)]
    #[must_use]
    pub const fn win(winner: Player, reason: EndReason) -> Self {
        Self {
            winner: Some(winner),
            reason,
        }
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn draw(reason: EndReason) -> Self {
        Self {
            winner: None,
            reason,
        }
    }

    /// `None` for a draw.
    #[must_use]
    pub const fn winner(&self) -> Option<Player> {
        self.winner
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn reason(&self) -> EndReason {
        self.reason
    }
}

impl fmt::Display for GameResult {
    /// Prints the score followed by the reason, e.g. "1-0 (checkmate)".
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let score = match self.winner {
            Some(Player::White) => "1-0",
            Some(Player::Black) => "0-1",
            None => "1/2-1/2",
        };
        write!(f, "{score} ({})", self.reason)
    }
}

/// Notifications sent to the receivers created by [`GameState::subscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameEvent {
    /// A piece was removed from the board. `balance` is the material balance
    /// after the capture.
    #[allow(missing_docs)]
    Captured {
        piece: Piece,
        by: Player,
        balance: i32,
    },
    /// The game has ended.
    Concluded(GameResult),
}

/// Settings of a single game.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GameConfig {
    /// Games without time control are never lost on time.
    pub time_control: Option<TimeControl>,
    #[allow(missing_docs)]
    pub material_values: MaterialValues,
}

/// State of a single game: the board, whose turn it is and everything needed
/// to decide when the game is over.
///
/// ```
/// use gambit::chess::game::{EndReason, GameResult, GameState};
/// use gambit::chess::core::Player;
///
/// let mut game = GameState::starting();
/// for uci in ["f2f3", "e7e5", "g2g4", "d8h4"] {
///     let next = game.parse_move(uci).unwrap();
///     game.make_move(next).unwrap();
/// }
/// assert_eq!(
///     game.result(),
///     Some(GameResult::win(Player::Black, EndReason::Checkmate))
/// );
/// assert!(game.all_legal_moves_for(Player::White).is_empty());
/// ```
pub struct GameState {
    board: Board,
    current_player: Player,
    result: Option<GameResult>,
    /// Plies since the last capture or pawn move.
    no_progress_plies: u16,
    state_key: StateKey,
    repetitions: RepetitionTable,
    captures: CapturedPieces,
    clock: Option<ChessClock>,
    listeners: Vec<Sender<GameEvent>>,
}

impl GameState {
    /// Creates a game with default configuration and `current_player` to move.
    #[must_use]
    pub fn new(board: Board, current_player: Player) -> Self {
        Self::with_config(board, current_player, GameConfig::default())
    }

    /// Standard starting position with White to move.
    #[must_use]
    pub fn starting() -> Self {
        Self::new(Board::initial(), Player::White)
    }

    #[allow(missing_docs)]
    #[must_use]
    pub fn with_config(board: Board, current_player: Player, config: GameConfig) -> Self {
        Self::setup(board, current_player, 0, config)
    }

    fn setup(
        board: Board,
        current_player: Player,
        no_progress_plies: u16,
        config: GameConfig,
    ) -> Self {
        let state_key = StateKey::new(&board, current_player);
        let mut repetitions = RepetitionTable::new();
        let _ = repetitions.record(state_key.clone());
        let mut game = Self {
            board,
            current_player,
            result: None,
            no_progress_plies,
            state_key,
            repetitions,
            captures: CapturedPieces::new(config.material_values),
            clock: config.time_control.map(ChessClock::new),
            listeners: Vec::new(),
        };
        // Set up positions may already be over.
        game.result = game.evaluate(false, Instant::now());
        game
    }

    /// Sets up a game from [Forsyth-Edwards Notation]. The half-move clock and
    /// the full-move counter may be omitted.
    ///
    /// Castling availability is expressed by marking kings and rooks that lost
    /// the right to castle as moved and the en passant square becomes the
    /// opponent's pawn skip record.
    ///
    /// # Errors
    ///
    /// If the notation is malformed or the position could not occur in a
    /// game: players don't have exactly one king each, the side that just
    /// moved is in check, castling availability or the en passant square do
    /// not match the pieces.
    ///
    /// [Forsyth-Edwards Notation]: https://www.chessprogramming.org/Forsyth-Edwards_Notation
    pub fn from_fen(fen: &str) -> anyhow::Result<Self> {
        let mut parts = fen.split_ascii_whitespace();
        let Some(placement) = parts.next() else {
            bail!("incorrect FEN: missing pieces placement");
        };
        let mut board = Board::from_placement(placement)?;
        let current_player = match parts.next() {
            Some(value) => Player::try_from(value)?,
            None => bail!("incorrect FEN: missing side to move"),
        };
        let castling = match parts.next() {
            Some(value) => CastleRights::try_from(value)?,
            None => bail!("incorrect FEN: missing castling rights"),
        };
        board.apply_castle_rights(castling);
        if board.castle_rights() != castling {
            bail!(
                "castling rights {castling} do not match the pieces, available: {}",
                board.castle_rights()
            );
        }
        match parts.next() {
            Some("-") => (),
            Some(value) => {
                let target = Position::try_from(value)?;
                validate_en_passant(&board, current_player, target)?;
                board.set_pawn_skip_position(current_player.opponent(), Some(target));
            },
            None => bail!("incorrect FEN: missing en passant square"),
        }
        let no_progress_plies = match parts.next() {
            Some(value) => value
                .parse::<u16>()
                .with_context(|| {
                    format!("incorrect FEN: halfmove clock can not be parsed {value}")
                })?,
            None => 0,
        };
        if let Some(value) = parts.next() {
            let _ = value
                .parse::<u16>()
                .with_context(|| {
                    format!("incorrect FEN: fullmove counter can not be parsed {value}")
                })?;
        }
        if parts.next().is_some() {
            bail!("trailing symbols are not allowed in FEN");
        }
        for player in Player::BOTH {
            if board.king_position(player).is_none() {
                bail!("{player:?} king is missing");
            }
        }
        if board.is_in_check(current_player.opponent()) {
            bail!(
                "{:?} is in check while {current_player:?} is to move",
                current_player.opponent()
            );
        }
        Ok(Self::setup(
            board,
            current_player,
            no_progress_plies,
            GameConfig::default(),
        ))
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn board(&self) -> &Board {
        &self.board
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn current_player(&self) -> Player {
        self.current_player
    }

    /// `None` while the game is in progress.
    #[must_use]
    pub const fn result(&self) -> Option<GameResult> {
        self.result
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn is_game_over(&self) -> bool {
        self.result.is_some()
    }

    /// Plies since the last capture or pawn move.
    #[must_use]
    pub const fn no_progress_plies(&self) -> u16 {
        self.no_progress_plies
    }

    /// Key of the current position.
    #[must_use]
    pub const fn state_key(&self) -> &StateKey {
        &self.state_key
    }

    /// How many times the current position occurred since the last capture or
    /// pawn move.
    #[must_use]
    pub fn repetition_count(&self) -> u8 {
        self.repetitions.count(&self.state_key)
    }

    #[allow(missing_docs)]
    #[must_use]
    pub const fn captures(&self) -> &CapturedPieces {
        &self.captures
    }

    /// `None` if the game is played without time control.
    #[must_use]
    pub const fn clock(&self) -> Option<&ChessClock> {
        self.clock.as_ref()
    }

    /// Legal moves of the piece on `position`. Empty if the square is empty or
    /// holds a piece of the player who is not to move.
    #[must_use]
    pub fn legal_moves_for_piece(&self, position: Position) -> MoveList {
        match self.board.at(position) {
            Some(piece) if piece.owner == self.current_player => piece
                .moves(position, &self.board)
                .into_iter()
                .filter(|candidate| candidate.is_legal(&self.board))
                .collect(),
            _ => MoveList::new(),
        }
    }

    /// Legal moves of all pieces of the player.
    #[must_use]
    pub fn all_legal_moves_for(&self, player: Player) -> Vec<Move> {
        self.board
            .pieces(player)
            .flat_map(|(position, piece)| piece.moves(position, &self.board))
            .filter(|candidate| candidate.is_legal(&self.board))
            .collect()
    }

    fn has_legal_moves(&self, player: Player) -> bool {
        self.board.pieces(player).any(|(position, piece)| {
            piece
                .moves(position, &self.board)
                .iter()
                .any(|candidate| candidate.is_legal(&self.board))
        })
    }

    /// Finds the legal move spelled in UCI notation (e.g. "e2e4", "e7e8q",
    /// "e1g1" for castling).
    ///
    /// # Errors
    ///
    /// If the text is malformed or there is no such legal move.
    pub fn parse_move(&self, uci: &str) -> anyhow::Result<Move> {
        if !uci.is_ascii() || !(4..=5).contains(&uci.len()) {
            bail!("move should be in UCI format (e.g. e2e4 or e7e8q), got {uci}");
        }
        let from = Position::try_from(&uci[0..2]).with_context(|| format!("incorrect move {uci}"))?;
        let to = Position::try_from(&uci[2..4]).with_context(|| format!("incorrect move {uci}"))?;
        let promotion = match uci[4..].chars().next() {
            Some(symbol) => Some(Promotion::try_from(symbol)?),
            None => None,
        };
        self.legal_moves_for_piece(from)
            .into_iter()
            .find(|candidate| {
                candidate.to() == to
                    && match candidate {
                        Move::PawnPromotion {
                            promotion: chosen, ..
                        } => promotion == Some(*chosen),
                        _ => promotion.is_none(),
                    }
            })
            .ok_or_else(|| anyhow!("{uci} is not a legal move for {:?}", self.current_player))
    }

    /// Plays the move of the current player and checks whether the game is
    /// over afterwards.
    ///
    /// # Errors
    ///
    /// If the game is already over or the move is not legal for the current
    /// player. The state is left untouched in both cases.
    pub fn make_move(&mut self, next: Move) -> anyhow::Result<()> {
        self.make_move_at(next, Instant::now())
    }

    /// Same as [`GameState::make_move`] with an explicit time for the clock.
    ///
    /// # Errors
    ///
    /// Same as [`GameState::make_move`].
    pub fn make_move_at(&mut self, next: Move, now: Instant) -> anyhow::Result<()> {
        if let Some(result) = self.result {
            bail!("the game is over: {result}");
        }
        if !self.legal_moves_for_piece(next.from()).contains(&next) {
            bail!("{next} is not a legal move for {:?}", self.current_player);
        }
        let mover = self.current_player;
        let captured = next
            .captured_position(&self.board)
            .and_then(|position| self.board.at(position));
        if let Some(piece) = captured {
            self.captures.record(Some(piece), mover);
            self.publish(GameEvent::Captured {
                piece,
                by: mover,
                balance: self.captures.material_balance(),
            });
        }
        self.board.set_pawn_skip_position(mover, None);
        if next.execute(&mut self.board) {
            self.no_progress_plies = 0;
            self.repetitions.clear();
        } else {
            self.no_progress_plies = self.no_progress_plies.saturating_add(1);
        }
        self.current_player = mover.opponent();
        if let Some(clock) = &mut self.clock {
            match clock.active() {
                // The first move starts the clock of a game that was not
                // started explicitly.
                None => clock.start_at(self.current_player, now),
                Some(_) => clock.switch_to_next_player_at(now),
            }
        }
        self.state_key = StateKey::new(&self.board, self.current_player);
        let threefold = self.repetitions.record(self.state_key.clone());
        if let Some(result) = self.evaluate(threefold, now) {
            self.conclude(result, now);
        }
        Ok(())
    }

    /// Termination conditions in the order of priority.
    fn evaluate(&mut self, threefold: bool, now: Instant) -> Option<GameResult> {
        if let Some(loser) = self.clock.as_mut().and_then(|clock| clock.timed_out_at(now)) {
            return Some(GameResult::win(loser.opponent(), EndReason::TimeOut));
        }
        let player = self.current_player;
        if !self.has_legal_moves(player) {
            return Some(if self.board.is_in_check(player) {
                GameResult::win(player.opponent(), EndReason::Checkmate)
            } else {
                GameResult::draw(EndReason::Stalemate)
            });
        }
        if self.board.insufficient_material() {
            return Some(GameResult::draw(EndReason::InsufficientMaterial));
        }
        if self.no_progress_plies >= FIFTY_MOVE_RULE_PLIES {
            return Some(GameResult::draw(EndReason::FiftyMoveRule));
        }
        if threefold {
            return Some(GameResult::draw(EndReason::ThreefoldRepetition));
        }
        None
    }

    fn conclude(&mut self, result: GameResult, now: Instant) {
        self.result = Some(result);
        if let Some(clock) = &mut self.clock {
            clock.pause_at(now);
        }
        self.publish(GameEvent::Concluded(result));
    }

    /// Ends the game as lost on time by `loser`. Returns false and does
    /// nothing if the game is already over.
    pub fn time_out(&mut self, loser: Player) -> bool {
        if self.result.is_some() {
            return false;
        }
        self.conclude(
            GameResult::win(loser.opponent(), EndReason::TimeOut),
            Instant::now(),
        );
        true
    }

    /// Checks the clock and ends the game if a player ran out of time. Returns
    /// the result of the game, if it is over.
    pub fn poll_clock(&mut self) -> Option<GameResult> {
        self.poll_clock_at(Instant::now())
    }

    #[allow(missing_docs)]
    pub fn poll_clock_at(&mut self, now: Instant) -> Option<GameResult> {
        if self.result.is_none() {
            if let Some(loser) = self.clock.as_mut().and_then(|clock| clock.timed_out_at(now)) {
                self.conclude(GameResult::win(loser.opponent(), EndReason::TimeOut), now);
            }
        }
        self.result
    }

    /// Starts the clock of the current player, if the game has one.
    pub fn start_game(&mut self) {
        self.start_game_at(Instant::now());
    }

    #[allow(missing_docs)]
    pub fn start_game_at(&mut self, now: Instant) {
        let player = self.current_player;
        if let Some(clock) = &mut self.clock {
            clock.start_at(player, now);
        }
    }

    #[allow(missing_docs)]
    pub fn pause_game(&mut self) {
        self.pause_game_at(Instant::now());
    }

    #[allow(missing_docs)]
    pub fn pause_game_at(&mut self, now: Instant) {
        if let Some(clock) = &mut self.clock {
            clock.pause_at(now);
        }
    }

    /// Resumes a paused clock. A concluded game stays paused.
    pub fn resume_game(&mut self) {
        self.resume_game_at(Instant::now());
    }

    #[allow(missing_docs)]
    pub fn resume_game_at(&mut self, now: Instant) {
        if self.result.is_some() {
            return;
        }
        let player = self.current_player;
        if let Some(clock) = &mut self.clock {
            // Moves made while paused do not switch the clock, so it resumes
            // for the side to move.
            if clock.active().is_some() && !clock.is_running() {
                clock.start_at(player, now);
            }
        }
    }

    /// Replaces the clock with a fresh one. The new clock is not running.
    pub fn set_time_control(&mut self, control: TimeControl) {
        self.clock = Some(ChessClock::new(control));
    }

    /// Returns a receiver of the events happening in this game. Dropping the
    /// receiver unsubscribes.
    pub fn subscribe(&mut self) -> Receiver<GameEvent> {
        let (sender, receiver) = mpsc::channel();
        self.listeners.push(sender);
        receiver
    }

    fn publish(&mut self, event: GameEvent) {
        self.listeners
            .retain(|listener| listener.send(event).is_ok());
    }
}

fn validate_en_passant(
    board: &Board,
    current_player: Player,
    target: Position,
) -> anyhow::Result<()> {
    let opponent = current_player.opponent();
    if target.row() != opponent.pawn_skip_row() {
        bail!("en passant square {target} is not on the row {current_player:?} can capture on");
    }
    let direction = opponent.pawn_direction();
    let pawn_moved = target.offset(direction, 0).is_some_and(|square| {
        board.at(square).is_some_and(|piece| {
            piece.owner == opponent && piece.kind == PieceKind::Pawn
        })
    });
    let path_empty = board.is_empty(target)
        && target
            .offset(-direction, 0)
            .is_some_and(|square| board.is_empty(square));
    if !pawn_moved || !path_empty {
        bail!("en passant square {target} does not match a pawn double advance");
    }
    Ok(())
}

impl Default for GameState {
    fn default() -> Self {
        Self::starting()
    }
}

impl Clone for GameState {
    /// Copies the game without its subscribers.
    fn clone(&self) -> Self {
        Self {
            board: self.board.clone(),
            current_player: self.current_player,
            result: self.result,
            no_progress_plies: self.no_progress_plies,
            state_key: self.state_key.clone(),
            repetitions: self.repetitions.clone(),
            captures: self.captures.clone(),
            clock: self.clock.clone(),
            listeners: Vec::new(),
        }
    }
}

impl fmt::Debug for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:?}", &self.board)?;
        writeln!(f, "Player to move: {:?}", &self.current_player)?;
        writeln!(f, "Plies without progress: {}", &self.no_progress_plies)?;
        writeln!(
            f,
            "En Passant: {:?}",
            &self.board.pawn_skip_position(self.current_player.opponent())
        )?;
        // bitflags' default fmt::Debug implementation is not very convenient:
        // dump FEN instead.
        writeln!(f, "Castling rights: {}", &self.board.castle_rights())?;
        writeln!(f, "Placement: {}", &self.board)?;
        match self.result {
            Some(result) => writeln!(f, "Result: {result}"),
            None => writeln!(f, "Result: in progress"),
        }
    }
}

#[cfg(test)]
mod test {
    use std::time::Duration;

    use itertools::Itertools;
    use pretty_assertions::assert_eq;

    use super::*;

    fn play(game: &mut GameState, moves: &[&str]) {
        for uci in moves {
            let next = game.parse_move(uci).unwrap();
            game.make_move(next).unwrap();
        }
    }

    #[test]
    fn starting_state() {
        let game = GameState::starting();
        assert_eq!(game.current_player(), Player::White);
        assert_eq!(game.result(), None);
        assert!(!game.is_game_over());
        assert_eq!(game.no_progress_plies(), 0);
        assert_eq!(game.repetition_count(), 1);
        assert_eq!(game.all_legal_moves_for(Player::White).len(), 20);
        assert_eq!(game.all_legal_moves_for(Player::Black).len(), 20);
        assert!(game.clock().is_none());
        // Opponent's pieces and empty squares have no moves.
        assert!(game
            .legal_moves_for_piece(Position::try_from("e7").unwrap())
            .is_empty());
        assert!(game
            .legal_moves_for_piece(Position::try_from("e4").unwrap())
            .is_empty());
    }

    #[test]
    fn results() {
        assert_eq!(
            GameResult::win(Player::White, EndReason::Checkmate).to_string(),
            "1-0 (checkmate)"
        );
        assert_eq!(
            GameResult::win(Player::Black, EndReason::TimeOut).to_string(),
            "0-1 (time out)"
        );
        assert_eq!(
            GameResult::draw(EndReason::FiftyMoveRule).to_string(),
            "1/2-1/2 (fifty-move rule)"
        );
        assert_eq!(GameResult::draw(EndReason::Stalemate).winner(), None);
        assert_eq!(
            GameResult::draw(EndReason::Stalemate).reason(),
            EndReason::Stalemate
        );
    }

    #[test]
    fn parse_moves() {
        let game = GameState::starting();
        assert_eq!(
            game.parse_move("e2e4").unwrap(),
            Move::DoublePawnAdvance {
                from: Position::try_from("e2").unwrap(),
                to: Position::try_from("e4").unwrap()
            }
        );
        assert!(game.parse_move("e2e5").is_err());
        assert!(game.parse_move("e7e5").is_err());
        assert!(game.parse_move("e2").is_err());
        assert!(game.parse_move("e2e4q").is_err());
        assert!(game.parse_move("z2e4").is_err());
        assert!(game.parse_move("e2e4e4").is_err());
        assert!(game.parse_move("ё2e4").is_err());

        let game = GameState::from_fen("4k3/1P6/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        assert_eq!(
            game.parse_move("b7b8n").unwrap(),
            Move::PawnPromotion {
                from: Position::try_from("b7").unwrap(),
                to: Position::try_from("b8").unwrap(),
                promotion: Promotion::Knight
            }
        );
        assert!(game.parse_move("b7b8").is_err());
        assert!(game.parse_move("b7b8k").is_err());
    }

    #[test]
    fn fen_setup() {
        let game = GameState::from_fen(
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
        )
        .unwrap();
        assert_eq!(game.board().castle_rights(), CastleRights::ALL);
        assert_eq!(game.all_legal_moves_for(Player::White).len(), 48);

        let game =
            GameState::from_fen("rnbqkbnr/ppp1pppp/8/3pP3/8/8/PPPP1PPP/RNBQKBNR w Kq d6 0 3")
                .unwrap();
        assert_eq!(
            game.board().castle_rights(),
            CastleRights::WHITE_SHORT | CastleRights::BLACK_LONG
        );
        assert_eq!(
            game.board().pawn_skip_position(Player::Black),
            Position::try_from("d6").ok()
        );
        assert!(game.parse_move("e5d6").is_ok());
        assert_eq!(
            game.state_key().en_passant(),
            Position::try_from("d6").ok()
        );

        // Half-move clock and full-move counter are optional.
        let game = GameState::from_fen("4k3/8/8/8/8/8/4P3/4K3 b - -").unwrap();
        assert_eq!(game.current_player(), Player::Black);
        let game = GameState::from_fen("4k3/8/8/8/8/8/4P3/4K3 b - - 42").unwrap();
        assert_eq!(game.no_progress_plies(), 42);
    }

    #[test]
    fn incorrect_fen() {
        for fen in [
            "",
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR",
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR x KQkq - 0 1",
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w",
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq",
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq e3 0 1",
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - x 1",
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1 extra",
            // Castling rights without the rook.
            "rnbqkbn1/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
            // En passant square without a pawn that just advanced.
            "4k3/8/8/8/8/8/8/4K3 w - e6 0 1",
            "4k3/8/8/4p3/8/8/8/4K3 w - e3 0 1",
            // Missing king.
            "8/8/8/8/8/8/8/4K3 w - - 0 1",
            // The side which is not to move is in check.
            "4k3/8/8/8/8/8/8/4R1K1 w - - 0 1",
        ] {
            assert!(GameState::from_fen(fen).is_err(), "{fen}");
        }
    }

    #[test]
    fn rejects_illegal_moves() {
        let mut game = GameState::starting();
        let knight_jump = Move::Normal {
            from: Position::try_from("g1").unwrap(),
            to: Position::try_from("g3").unwrap(),
        };
        assert!(game.make_move(knight_jump).is_err());
        // Right squares, wrong kind of move.
        let pawn = Move::Normal {
            from: Position::try_from("e2").unwrap(),
            to: Position::try_from("e4").unwrap(),
        };
        assert!(game.make_move(pawn).is_err());
        assert_eq!(game.board(), &Board::initial());
        assert_eq!(game.current_player(), Player::White);
    }

    #[test]
    fn rejects_moves_after_the_end() {
        let mut game = GameState::starting();
        play(&mut game, &["f2f3", "e7e5", "g2g4", "d8h4"]);
        assert_eq!(
            game.result(),
            Some(GameResult::win(Player::Black, EndReason::Checkmate))
        );
        let board = game.board().clone();
        let king = Move::Normal {
            from: Position::try_from("e1").unwrap(),
            to: Position::try_from("f2").unwrap(),
        };
        assert!(game.make_move(king).is_err());
        assert_eq!(game.board(), &board);
        assert!(!game.time_out(Player::Black));
    }

    #[test]
    fn events() {
        let mut game = GameState::starting();
        let events = game.subscribe();
        let dropped = game.subscribe();
        drop(dropped);
        play(&mut game, &["e2e4", "d7d5", "e4d5", "d8d5"]);
        assert_eq!(
            events.try_iter().collect_vec(),
            vec![
                GameEvent::Captured {
                    piece: Piece {
                        owner: Player::Black,
                        kind: PieceKind::Pawn,
                        has_moved: true
                    },
                    by: Player::White,
                    balance: 1
                },
                GameEvent::Captured {
                    piece: Piece {
                        owner: Player::White,
                        kind: PieceKind::Pawn,
                        has_moved: true
                    },
                    by: Player::Black,
                    balance: 0
                },
            ]
        );
        assert_eq!(game.captures().captured_by(Player::Black).len(), 1);
        assert!(game.time_out(Player::White));
        assert_eq!(
            events.try_iter().collect_vec(),
            vec![GameEvent::Concluded(GameResult::win(
                Player::Black,
                EndReason::TimeOut
            ))]
        );
        // Clones do not notify the original subscribers.
        let mut copy = GameState::starting();
        let copy_events = copy.subscribe();
        let mut clone = copy.clone();
        play(&mut clone, &["e2e4", "d7d5", "e4d5"]);
        assert!(copy_events.try_recv().is_err());
    }

    #[test]
    fn clock() {
        let start = Instant::now();
        let second = Duration::from_secs(1);
        let mut game = GameState::with_config(
            Board::initial(),
            Player::White,
            GameConfig {
                time_control: Some(TimeControl::from_secs(10, 1)),
                ..GameConfig::default()
            },
        );
        game.start_game_at(start);
        let next = game.parse_move("e2e4").unwrap();
        game.make_move_at(next, start + 3 * second).unwrap();
        let clock = game.clock().unwrap();
        assert_eq!(clock.remaining(Player::White), Duration::from_secs(8));
        assert_eq!(clock.active(), Some(Player::Black));

        game.pause_game_at(start + 4 * second);
        assert_eq!(game.poll_clock_at(start + 100 * second), None);
        game.resume_game_at(start + 100 * second);
        assert_eq!(game.poll_clock_at(start + 105 * second), None);
        assert_eq!(
            game.poll_clock_at(start + 110 * second),
            Some(GameResult::win(Player::White, EndReason::TimeOut))
        );
        assert!(!game.clock().unwrap().is_running());
        assert!(game.parse_move("e7e5").is_ok());
        let next = game.parse_move("e7e5").unwrap();
        assert!(game.make_move_at(next, start + 111 * second).is_err());
    }

    #[test]
    fn late_move_loses_on_time_despite_increment() {
        let start = Instant::now();
        let mut game = GameState::with_config(
            Board::initial(),
            Player::White,
            GameConfig {
                time_control: Some(TimeControl::from_secs(5, 3)),
                ..GameConfig::default()
            },
        );
        game.start_game_at(start);
        let next = game.parse_move("e2e4").unwrap();
        game.make_move_at(next, start + Duration::from_secs(60)).unwrap();
        assert_eq!(
            game.result(),
            Some(GameResult::win(Player::Black, EndReason::TimeOut))
        );
        assert_eq!(game.clock().unwrap().remaining(Player::White), Duration::ZERO);
    }

    #[test]
    fn moves_while_paused() {
        let start = Instant::now();
        let second = Duration::from_secs(1);
        let mut game = GameState::with_config(
            Board::initial(),
            Player::White,
            GameConfig {
                time_control: Some(TimeControl::from_secs(60, 2)),
                ..GameConfig::default()
            },
        );
        game.start_game_at(start);
        game.pause_game_at(start + 5 * second);
        let next = game.parse_move("e2e4").unwrap();
        game.make_move_at(next, start + 30 * second).unwrap();
        let clock = game.clock().unwrap();
        // No increment and no switch while the clock is stopped.
        assert_eq!(clock.remaining(Player::White), Duration::from_secs(55));
        assert_eq!(clock.active(), Some(Player::White));
        assert!(!clock.is_running());

        // Resuming runs the clock of the side to move.
        game.resume_game_at(start + 40 * second);
        assert_eq!(game.poll_clock_at(start + 50 * second), None);
        let clock = game.clock().unwrap();
        assert_eq!(clock.active(), Some(Player::Black));
        assert_eq!(clock.remaining(Player::Black), Duration::from_secs(50));
        assert_eq!(clock.remaining(Player::White), Duration::from_secs(55));
    }

    #[test]
    fn time_out_during_the_move() {
        let start = Instant::now();
        let mut game = GameState::starting();
        game.set_time_control(TimeControl::from_secs(5, 0));
        game.start_game_at(start);
        let next = game.parse_move("e2e4").unwrap();
        // The move arrives after the flag fell: the clock decides.
        game.make_move_at(next, start + Duration::from_secs(6))
            .unwrap();
        assert_eq!(
            game.result(),
            Some(GameResult::win(Player::Black, EndReason::TimeOut))
        );
    }

    #[test]
    fn clock_starts_with_the_first_move() {
        let start = Instant::now();
        let mut game = GameState::starting();
        game.set_time_control(TimeControl::from_secs(60, 0));
        let next = game.parse_move("e2e4").unwrap();
        game.make_move_at(next, start).unwrap();
        assert_eq!(game.clock().unwrap().active(), Some(Player::Black));
        assert!(game.clock().unwrap().is_running());
    }

    #[test]
    fn debug_dump() {
        let dump = format!("{:?}", GameState::starting());
        assert!(dump.contains("Player to move: White"));
        assert!(dump.contains("Castling rights: KQkq"));
        assert!(dump.contains("Result: in progress"));
    }
}
