use battleship_server::{Leaderboard, WinnerEntry};

#[test]
fn test_record_and_count() {
    let mut board = Leaderboard::new();
    assert_eq!(board.wins_of("alice"), 0);
    assert_eq!(board.record_win("alice"), 1);
    assert_eq!(board.record_win("alice"), 2);
    assert_eq!(board.wins_of("alice"), 2);
}

#[test]
fn test_standings_order() {
    let mut board = Leaderboard::new();
    board.record_win("carol");
    board.record_win("bob");
    board.record_win("alice");
    board.record_win("bob");

    assert_eq!(
        board.standings(),
        vec![
            WinnerEntry { name: "bob".into(), wins: 2 },
            WinnerEntry { name: "alice".into(), wins: 1 },
            WinnerEntry { name: "carol".into(), wins: 1 },
        ]
    );
}

#[test]
fn test_empty_standings() {
    assert!(Leaderboard::new().standings().is_empty());
}
