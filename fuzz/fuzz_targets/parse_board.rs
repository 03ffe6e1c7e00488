#![no_main]
use gambit::chess::board::Board;
use gambit::chess::game::GameState;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        if let Ok(board) = Board::from_placement(s) {
            // Printing the placement back gives the same board.
            assert_eq!(Board::from_placement(&board.to_string()).ok(), Some(board));
        }
        let _ = GameState::from_fen(s);
    }
});
