//! Board engine scenarios exercised through the public API

use chomp::config::GameConfig;
use chomp::client::parse_board_size;
use chomp::{ChompError, GameBoard, GameSession, MatchResult, Player};

fn eaten_squares(board: &GameBoard) -> Vec<(usize, usize)> {
    let mut eaten = Vec::new();
    for row in 0..board.rows() {
        for col in 0..board.cols() {
            if !board.is_uneaten(row, col) {
                eaten.push((row, col));
            }
        }
    }
    eaten
}

#[test]
fn test_corner_move_eats_single_square() {
    let mut board = GameBoard::with_first_mover(2, 2, Player::Zero);
    board.apply(1, 1).unwrap();

    assert_eq!(eaten_squares(&board), vec![(1, 1)]);
    assert_eq!(board.active_player(), Player::One);
    assert_eq!(board.result(), MatchResult::Active);
}

#[test]
fn test_eating_poison_hands_win_to_opponent() {
    let mut board = GameBoard::with_first_mover(2, 2, Player::Zero);
    board.apply(1, 1).unwrap();
    board.apply(0, 0).unwrap();

    assert_eq!(board.remaining(), 0);
    assert_eq!(board.result(), MatchResult::Won(Player::Zero));
    assert_eq!(board.result().winner(), Some(Player::Zero));
}

#[test]
fn test_board_size_answers() {
    let limits = GameConfig::default();

    assert!(matches!(
        parse_board_size("1 5", &limits),
        Err(ChompError::InvalidBoardSize { rows: 1, cols: 5, .. })
    ));

    let (rows, cols) = parse_board_size("3 4", &limits).unwrap();
    let session = GameSession::new(rows, cols, Player::Zero);
    assert_eq!(session.board().rows(), 3);
    assert_eq!(session.board().cols(), 4);
    assert_eq!(session.board().remaining(), 12);
    assert!(eaten_squares(session.board()).is_empty());
}

#[test]
fn test_out_of_bounds_moves_are_illegal() {
    let mut board = GameBoard::new(3, 4);
    assert!(!board.is_legal(3, 0));
    assert!(!board.is_legal(0, 4));
    assert!(matches!(board.apply(3, 0), Err(ChompError::InvalidMove { .. })));
    assert_eq!(board.remaining(), 12);
    assert_eq!(board.active_player(), Player::One);
}

#[test]
fn test_full_game_alternates_players() {
    let mut board = GameBoard::new(3, 3);
    let moves = [(2, 2), (1, 2), (2, 0), (0, 1), (1, 0), (0, 0)];
    let mut mover = board.active_player();

    for (row, col) in moves {
        assert_eq!(board.active_player(), mover);
        board.apply(row, col).unwrap();
        mover = mover.opponent();
    }

    // Player 0 made the sixth move and ate the poison.
    assert_eq!(board.result(), MatchResult::Won(Player::One));
}
