use assert_cmd::Command;
use predicates::boolean::PredicateBooleanExt;
use predicates::str::contains;

const BINARY_NAME: &str = "gambit";

#[test]
fn info() {
    let mut cmd = Command::cargo_bin(BINARY_NAME).expect("Binary should be built");

    drop(
        cmd.write_stdin("info\n")
            .assert()
            .success()
            .stdout(contains("id name gambit").and(contains("id author"))),
    );
}

#[test]
fn play_to_checkmate() {
    let mut cmd = Command::cargo_bin(BINARY_NAME).expect("Binary should be built");

    drop(
        cmd.write_stdin("move f2f3\nmove e7e5\nmove g2g4\nmove d8h4\nmoves\nquit\n")
            .assert()
            .success()
            .stdout(contains("result 0-1 (checkmate)").and(contains("moves \n"))),
    );
}

#[test]
fn bad_input_keeps_the_session_alive() {
    let mut cmd = Command::cargo_bin(BINARY_NAME).expect("Binary should be built");

    drop(
        cmd.write_stdin("go\nmove e2e5\nposition fen 8/8/8/8 w - - 0 1\nmoves e2\n")
            .assert()
            .success()
            .stdout(
                contains("info string Unsupported command: go")
                    .and(contains("info string Rejected move"))
                    .and(contains("info string"))
                    .and(contains("moves e2e3 e2e4")),
            ),
    );
}

#[test]
fn position_with_moves() {
    let mut cmd = Command::cargo_bin(BINARY_NAME).expect("Binary should be built");

    drop(
        cmd.write_stdin("position startpos moves e2e4 d7d5 e4d5\ncaptures\nresult\n")
            .assert()
            .success()
            .stdout(
                contains("captures w p\n")
                    .and(contains("balance 1\n"))
                    .and(contains("result *")),
            ),
    );
}
