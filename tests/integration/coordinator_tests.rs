//! Turn coordinator behaviour against scripted events and keyboard input

use chomp::client::{Event, Outcome};
use chomp::protocol::{Message, RoomId};
use chomp::{GameBoard, Player};
use crate::mocks::harness::finish;
use crate::mocks::CoordinatorHarness;

fn matched(role: Player) -> Event {
    Event::Matched { room: RoomId::Number(7), role }
}

/// Queue the events seat 1 sees up to its first turn on a `rows x cols` board
fn responder_ready(harness: &CoordinatorHarness, rows: usize, cols: usize) {
    harness.event(matched(Player::One));
    harness.event(Event::OpponentBoardSize { rows, cols });
    harness.event(Event::YourTurn);
}

#[tokio::test]
async fn test_responder_plays_until_eating_poison() {
    let mut harness = CoordinatorHarness::new();
    responder_ready(&harness, 2, 2);
    harness.type_line("0 1");
    let handle = harness.start();

    assert_eq!(harness.next_sent().await, Some(Message::Join));
    assert_eq!(harness.next_sent().await, Some(Message::Move { row: 0, col: 1 }));

    harness.event(Event::OpponentMove { row: 1, col: 0 });
    harness.type_line("0 0");
    assert_eq!(harness.next_sent().await, Some(Message::Move { row: 0, col: 0 }));

    let outcome = finish(handle).await;
    assert_eq!(
        outcome,
        Outcome::Finished { winner: Player::Zero, local_role: Player::One }
    );
    assert!(!outcome.local_won());

    let console = harness.console.contents();
    assert!(console.contains("Matched! Room: 7, Role: 1"));
    assert!(console.contains("Game started: 2x2"));
    assert!(console.contains("Opponent moved at (1,0)"));
    assert!(console.contains("Game over! Winner: Player 0"));
}

#[tokio::test]
async fn test_chooser_rejects_small_board_then_announces_size() {
    let mut harness = CoordinatorHarness::new();
    harness.event(matched(Player::Zero));
    harness.event(Event::WaitTurn);
    harness.type_line("1 5");
    harness.type_line("3 4");
    let handle = harness.start();

    assert_eq!(harness.next_sent().await, Some(Message::Join));
    assert_eq!(harness.next_sent().await, Some(Message::BoardSize { rows: 3, cols: 4 }));

    harness.console.wait_for("Game started: 3x4", 1).await;
    harness.event(Event::End);
    assert_eq!(finish(handle).await, Outcome::Disconnected);

    let console = harness.console.contents();
    assert!(console.contains("Invalid board size 1x5"));
    assert!(console.contains(&GameBoard::new(3, 4).render()));
    assert_eq!(harness.console.count("Enter board size (rows cols): "), 2);
    assert!(!console.contains("Enter move"));
}

#[tokio::test]
async fn test_chooser_wins_when_opponent_eats_poison() {
    let mut harness = CoordinatorHarness::new();
    harness.event(matched(Player::Zero));
    harness.event(Event::WaitTurn);
    harness.type_line("2 2");
    let handle = harness.start();

    assert_eq!(harness.next_sent().await, Some(Message::Join));
    assert_eq!(harness.next_sent().await, Some(Message::BoardSize { rows: 2, cols: 2 }));

    harness.event(Event::OpponentMove { row: 0, col: 0 });
    let outcome = finish(handle).await;

    assert_eq!(
        outcome,
        Outcome::Finished { winner: Player::Zero, local_role: Player::Zero }
    );
    assert!(outcome.local_won());
    assert_eq!(harness.next_sent().await, None);
}

#[tokio::test]
async fn test_end_of_stream_on_local_turn_returns_quietly() {
    let mut harness = CoordinatorHarness::new();
    responder_ready(&harness, 3, 3);
    harness.event(Event::End);
    let handle = harness.start();

    assert_eq!(finish(handle).await, Outcome::Disconnected);
    assert_eq!(harness.next_sent().await, Some(Message::Join));
    assert_eq!(harness.next_sent().await, None);

    let console = harness.console.contents();
    assert!(console.ends_with(&format!("{}\n", GameBoard::new(3, 3).render())));
}

#[tokio::test]
async fn test_end_of_stream_on_opponent_turn_returns_quietly() {
    let mut harness = CoordinatorHarness::new();
    responder_ready(&harness, 2, 3);
    harness.type_line("1 2");
    let handle = harness.start();

    assert_eq!(harness.next_sent().await, Some(Message::Join));
    assert_eq!(harness.next_sent().await, Some(Message::Move { row: 1, col: 2 }));

    let mut after_move = GameBoard::new(2, 3);
    after_move.apply(1, 2).unwrap();
    harness.console.wait_for(&after_move.render(), 1).await;

    let before = harness.console.contents();
    harness.event(Event::End);
    assert_eq!(finish(handle).await, Outcome::Disconnected);
    assert_eq!(harness.console.contents(), before);
}

#[tokio::test]
async fn test_dropped_listener_counts_as_end() {
    let mut harness = CoordinatorHarness::new();
    responder_ready(&harness, 2, 2);
    let handle = harness.start();

    harness.console.wait_for("Enter move (row col): ", 1).await;
    let (replacement, _) = tokio::sync::mpsc::unbounded_channel();
    harness.events = replacement;

    assert_eq!(finish(handle).await, Outcome::Disconnected);
}

#[tokio::test]
async fn test_opponent_left_interrupts_board_size_prompt() {
    let mut harness = CoordinatorHarness::new();
    harness.event(matched(Player::Zero));
    harness.event(Event::WaitTurn);
    let handle = harness.start();

    harness.console.wait_for("Enter board size (rows cols): ", 1).await;
    harness.event(Event::OpponentLeft);

    assert_eq!(finish(handle).await, Outcome::OpponentLeft);
    assert!(harness.console.contents().contains("Opponent disconnected."));
    assert_eq!(harness.next_sent().await, Some(Message::Join));
    assert_eq!(harness.next_sent().await, None);
}

#[tokio::test]
async fn test_opponent_left_interrupts_move_prompt() {
    let mut harness = CoordinatorHarness::new();
    responder_ready(&harness, 4, 4);
    let handle = harness.start();

    harness.console.wait_for("Enter move (row col): ", 1).await;
    harness.event(Event::OpponentLeft);

    assert_eq!(finish(handle).await, Outcome::OpponentLeft);
}

#[tokio::test]
async fn test_bad_and_illegal_moves_are_resolicited() {
    let mut harness = CoordinatorHarness::new();
    responder_ready(&harness, 3, 3);
    harness.type_line("two two");
    harness.type_line("5 5");
    harness.type_line("2 2");
    let handle = harness.start();

    assert_eq!(harness.next_sent().await, Some(Message::Join));
    assert_eq!(harness.next_sent().await, Some(Message::Move { row: 2, col: 2 }));

    harness.event(Event::OpponentMove { row: 1, col: 1 });
    harness.type_line("2 2");
    harness.type_line("0 2");
    assert_eq!(harness.next_sent().await, Some(Message::Move { row: 0, col: 2 }));

    harness.event(Event::End);
    assert_eq!(finish(handle).await, Outcome::Disconnected);

    let console = harness.console.contents();
    assert!(console.contains("Bad input, try again."));
    assert_eq!(harness.console.count("Invalid move, try again."), 2);
    assert_eq!(harness.console.count("Enter move (row col): "), 5);
}

#[tokio::test]
async fn test_input_off_turn_is_discarded() {
    let mut harness = CoordinatorHarness::new();
    harness.event(matched(Player::Zero));
    harness.event(Event::WaitTurn);
    harness.type_line("3 3");
    harness.type_line("1 1");
    let handle = harness.start();

    assert_eq!(harness.next_sent().await, Some(Message::Join));
    assert_eq!(harness.next_sent().await, Some(Message::BoardSize { rows: 3, cols: 3 }));

    harness.console.wait_for("Not your turn yet", 1).await;
    harness.event(Event::OpponentMove { row: 2, col: 2 });
    harness.console.wait_for("Enter move (row col): ", 1).await;
    harness.event(Event::End);

    assert_eq!(finish(handle).await, Outcome::Disconnected);
    assert_eq!(harness.next_sent().await, None);
}

#[tokio::test]
async fn test_illegal_opponent_move_is_dropped() {
    let mut harness = CoordinatorHarness::new();
    responder_ready(&harness, 3, 3);
    harness.type_line("1 1");
    let handle = harness.start();

    assert_eq!(harness.next_sent().await, Some(Message::Join));
    assert_eq!(harness.next_sent().await, Some(Message::Move { row: 1, col: 1 }));

    harness.event(Event::OpponentMove { row: 2, col: 2 });
    harness.event(Event::OpponentMove { row: 9, col: 0 });
    harness.event(Event::End);

    assert_eq!(finish(handle).await, Outcome::Disconnected);
    assert!(!harness.console.contents().contains("Opponent moved"));
}

#[tokio::test]
async fn test_shutdown_sends_leave_and_closes() {
    let mut harness = CoordinatorHarness::new();
    responder_ready(&harness, 2, 2);
    let handle = harness.start();

    harness.console.wait_for("Enter move (row col): ", 1).await;
    harness.shutdown.cancel();

    assert_eq!(finish(handle).await, Outcome::Interrupted);
    assert_eq!(harness.next_sent().await, Some(Message::Join));
    assert_eq!(harness.next_sent().await, Some(Message::Leave));
    assert_eq!(harness.next_sent().await, None);
}

#[tokio::test]
async fn test_closed_input_leaves_match() {
    let mut harness = CoordinatorHarness::new();
    harness.event(matched(Player::Zero));
    let handle = harness.start();

    harness.console.wait_for("Enter board size (rows cols): ", 1).await;
    let (replacement, _) = tokio::sync::mpsc::unbounded_channel();
    harness.input = replacement;

    assert_eq!(finish(handle).await, Outcome::InputClosed);
    assert_eq!(harness.next_sent().await, Some(Message::Join));
    assert_eq!(harness.next_sent().await, Some(Message::Leave));
}

#[tokio::test]
async fn test_second_match_announcement_is_ignored() {
    let mut harness = CoordinatorHarness::new();
    responder_ready(&harness, 2, 2);
    harness.event(matched(Player::Zero));
    harness.event(Event::End);
    let handle = harness.start();

    assert_eq!(finish(handle).await, Outcome::Disconnected);
    assert_eq!(harness.console.count("Matched!"), 1);
    assert!(!harness.console.contents().contains("Enter board size"));
}

#[tokio::test]
async fn test_unplayable_board_sizes_from_opponent_are_ignored() {
    let mut harness = CoordinatorHarness::new();
    harness.event(matched(Player::One));
    harness.event(Event::OpponentBoardSize { rows: 1 << 62, cols: 1 });
    harness.event(Event::OpponentBoardSize { rows: 1, cols: 5 });
    harness.event(Event::YourTurn);
    harness.type_line("0 1");
    harness.event(Event::End);
    let handle = harness.start();

    assert_eq!(finish(handle).await, Outcome::Disconnected);
    assert_eq!(harness.next_sent().await, Some(Message::Join));
    assert_eq!(harness.next_sent().await, None);

    let console = harness.console.contents();
    assert!(!console.contains("Game started"));
    assert!(!console.contains("Enter move"));
}
