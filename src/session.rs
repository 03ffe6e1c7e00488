//! Text interface to a game: reads one command per line and writes responses
//! to the output stream.
//!
//! [`Session::run`] is the "main loop" of the binary. The protocol borrows the
//! position setup from the [Universal Chess Interface] (UCI): moves are
//! written as "e2e4" and `position` accepts the same arguments.
//!
//! [Universal Chess Interface]: https://www.chessprogramming.org/UCI

use std::io::{BufRead, Write};

use anyhow::{bail, Context};
use itertools::Itertools;

use crate::chess::board::Board;
use crate::chess::clock::{format_duration, TimeControl};
use crate::chess::core::{Player, Position};
use crate::chess::game::{GameConfig, GameState};

/// Plays a single game at a time, driven by text commands.
pub struct Session {
    game: GameState,
    time_control: Option<TimeControl>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// Starts with the standard position and no time control.
    #[must_use]
    pub fn new() -> Self {
        Self {
            game: GameState::starting(),
            time_control: None,
        }
    }

    /// The game being played.
    #[must_use]
    pub const fn game(&self) -> &GameState {
        &self.game
    }

    /// Continuously reads the input stream and executes commands until "quit"
    /// is sent or the input is exhausted.
    ///
    /// Supported commands:
    ///     - info
    ///     - new
    ///     - position [startpos | fen <fenstring>] [moves <move1> ...]
    ///     - moves [square]
    ///     - move <move>
    ///     - d
    ///     - result
    ///     - captures
    ///     - clock [seconds [increment]]
    ///     - quit
    ///
    /// Malformed commands and rejected moves are reported with
    /// `info string` lines and do not stop the session.
    ///
    /// # Errors
    ///
    /// If reading the input or writing the output fails.
    pub fn run(&mut self, input: &mut impl BufRead, output: &mut impl Write) -> anyhow::Result<()> {
        loop {
            let mut line = String::new();
            // EOF reached.
            if input
                .read_line(&mut line)
                .context("reading the next command")?
                == 0
            {
                break;
            }
            let tokens: Vec<&str> = line.split_whitespace().collect();
            match tokens.first() {
                Some(&"info") => {
                    writeln!(output, "id name {} {}", env!("CARGO_PKG_NAME"), crate::version())?;
                    writeln!(output, "id author {}", env!("CARGO_PKG_AUTHORS"))?;
                },
                Some(&"new") => self.game = self.fresh_game(Board::initial(), Player::White),
                // Sets up the position, optionally followed by moves played
                // from it.
                Some(&"position") => {
                    if let Err(e) = self.set_position(&tokens[1..]) {
                        writeln!(output, "info string {e:#}")?;
                    }
                },
                Some(&"moves") => {
                    let moves = match tokens.get(1) {
                        Some(square) => match Position::try_from(*square) {
                            Ok(square) => self
                                .game
                                .legal_moves_for_piece(square)
                                .iter()
                                .map(ToString::to_string)
                                .sorted()
                                .join(" "),
                            Err(e) => {
                                writeln!(output, "info string {e:#}")?;
                                continue;
                            },
                        },
                        None => self
                            .game
                            .all_legal_moves_for(self.game.current_player())
                            .iter()
                            .map(ToString::to_string)
                            .sorted()
                            .join(" "),
                    };
                    writeln!(output, "moves {moves}")?;
                },
                Some(&"move") => {
                    let Some(uci) = tokens.get(1) else {
                        writeln!(output, "info string Missing move")?;
                        continue;
                    };
                    match self.play(uci) {
                        Ok(()) => {
                            if let Some(result) = self.game.result() {
                                writeln!(output, "result {result}")?;
                            }
                        },
                        Err(e) => writeln!(output, "info string Rejected move: {e:#}")?,
                    }
                },
                // Dumps the state in human-readable form.
                Some(&"d") => write!(output, "{:?}", self.game)?,
                Some(&"result") => match self.game.result() {
                    Some(result) => writeln!(output, "result {result}")?,
                    None => writeln!(output, "result *")?,
                },
                Some(&"captures") => {
                    let captures = self.game.captures();
                    for player in Player::BOTH {
                        writeln!(
                            output,
                            "captures {player} {}",
                            captures.captured_by(player).iter().join("")
                        )?;
                    }
                    writeln!(output, "balance {}", captures.material_balance())?;
                },
                Some(&"clock") => {
                    if tokens.len() > 1 {
                        match parse_time_control(&tokens[1..]) {
                            Ok(control) => {
                                self.time_control = Some(control);
                                self.game = self.fresh_game(Board::initial(), Player::White);
                            },
                            Err(e) => {
                                writeln!(output, "info string {e:#}")?;
                                continue;
                            },
                        }
                    }
                    match self.game.clock() {
                        Some(clock) => writeln!(
                            output,
                            "clock {} {}",
                            format_duration(clock.remaining(Player::White)),
                            format_duration(clock.remaining(Player::Black))
                        )?,
                        None => writeln!(output, "info string No time control")?,
                    }
                },
                Some(&"quit") => break,
                Some(&command) => {
                    writeln!(output, "info string Unsupported command: {command}")?;
                },
                None => {},
            }
        }
        Ok(())
    }

    fn fresh_game(&self, board: Board, player: Player) -> GameState {
        GameState::with_config(
            board,
            player,
            GameConfig {
                time_control: self.time_control,
                ..GameConfig::default()
            },
        )
    }

    fn play(&mut self, uci: &str) -> anyhow::Result<()> {
        if let Some(result) = self.game.result() {
            bail!("the game is over: {result}");
        }
        let next = self.game.parse_move(uci)?;
        self.game.make_move(next)
    }

    fn set_position(&mut self, arguments: &[&str]) -> anyhow::Result<()> {
        let (setup, moves) = match arguments.iter().position(|token| *token == "moves") {
            Some(index) => (&arguments[..index], &arguments[index + 1..]),
            None => (arguments, &arguments[arguments.len()..]),
        };
        self.game = match setup.split_first() {
            Some((&"startpos", [])) => self.fresh_game(Board::initial(), Player::White),
            Some((&"fen", fen)) if !fen.is_empty() => {
                let mut game = GameState::from_fen(&fen.join(" "))?;
                if let Some(control) = self.time_control {
                    game.set_time_control(control);
                }
                game
            },
            _ => bail!(
                "expected position [fen <fenstring> | startpos] moves <move1> ... <move_i>, \
                 got: {}",
                arguments.join(" ")
            ),
        };
        for uci in moves {
            self.play(uci)
                .with_context(|| format!("playing {uci} from the given position"))?;
        }
        Ok(())
    }
}

fn parse_time_control(arguments: &[&str]) -> anyhow::Result<TimeControl> {
    let initial = arguments[0]
        .parse::<u64>()
        .with_context(|| {
            format!("clock time should be a number of seconds, got {}", arguments[0])
        })?;
    let increment = match arguments.get(1) {
        Some(value) => value
            .parse::<u64>()
            .with_context(|| {
                format!("clock increment should be a number of seconds, got {value}")
            })?,
        None => 0,
    };
    if arguments.len() > 2 {
        bail!("expected clock <seconds> [increment], got {}", arguments.join(" "));
    }
    Ok(TimeControl::from_secs(initial, increment))
}
