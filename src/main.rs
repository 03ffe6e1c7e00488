//! Plays a game of chess through text commands on the standard input. See
//! [`gambit::Session::run`] for the list of commands.

use std::io;

fn main() -> anyhow::Result<()> {
    gambit::print_engine_info();
    gambit::print_binary_info();

    let mut session = gambit::Session::new();
    session.run(&mut io::stdin().lock(), &mut io::stdout().lock())
}
