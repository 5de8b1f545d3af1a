use battleship_server::{GameError, Matchmaker, Player, RoomView};

#[test]
fn test_first_join_opens_room() {
    let mut mm = Matchmaker::new();
    let alice = Player::new("alice");

    let view = mm.join(alice.clone());
    let room = match view {
        RoomView::Waiting(room) => room,
        other => panic!("expected a waiting room, got {:?}", other),
    };
    assert_eq!(room.occupants, vec![alice]);
    assert_eq!(mm.list_waiting_rooms(), vec![room]);
}

#[test]
fn test_second_join_fills_room() {
    let mut mm = Matchmaker::new();
    let alice = Player::new("alice");
    let bob = Player::new("bob");

    let opened = mm.join(alice.clone());
    let view = mm.join(bob.clone());
    let room = match view {
        RoomView::Filled(room) => room,
        other => panic!("expected a filled room, got {:?}", other),
    };
    assert_eq!(room.id, opened.room().id);
    assert_eq!(room.occupants, vec![alice, bob]);
    assert!(mm.list_waiting_rooms().is_empty());
    assert!(mm.room(room.id).is_none());
}

#[test]
fn test_join_while_waiting_returns_own_room() {
    let mut mm = Matchmaker::new();
    let alice = Player::new("alice");

    let first = mm.join(alice.clone());
    let again = mm.join(alice);
    assert!(matches!(again, RoomView::Waiting(_)));
    assert_eq!(first.room().id, again.room().id);
    assert_eq!(mm.list_waiting_rooms().len(), 1);
}

#[test]
fn test_pairs_form_in_arrival_order() {
    let mut mm = Matchmaker::new();
    let players: Vec<Player> = ["a", "b", "c", "d", "e"].into_iter().map(|n| Player::new(n)).collect();

    let views: Vec<RoomView> = players.iter().cloned().map(|p| mm.join(p)).collect();
    assert!(matches!(views[0], RoomView::Waiting(_)));
    assert!(matches!(views[1], RoomView::Filled(_)));
    assert!(matches!(views[2], RoomView::Waiting(_)));
    assert!(matches!(views[3], RoomView::Filled(_)));
    assert_eq!(views[3].room().occupants, vec![players[2].clone(), players[3].clone()]);

    let waiting = mm.list_waiting_rooms();
    assert_eq!(waiting.len(), 1);
    assert_eq!(waiting[0].occupants, vec![players[4].clone()]);
}

#[test]
fn test_join_specific_room() {
    let mut mm = Matchmaker::new();
    let alice = Player::new("alice");
    let bob = Player::new("bob");

    let room_id = mm.join(alice.clone()).room().id;
    let view = mm.join_room(room_id, bob.clone()).unwrap();
    assert!(matches!(view, RoomView::Filled(_)));
    assert_eq!(view.room().occupants, vec![alice, bob]);

    // the room left the lobby with its second player
    let carol = Player::new("carol");
    assert_eq!(mm.join_room(room_id, carol).unwrap_err(), GameError::RoomNotFound);
}

#[test]
fn test_join_own_room_rejected() {
    let mut mm = Matchmaker::new();
    let alice = Player::new("alice");
    let room_id = mm.join(alice.clone()).room().id;

    assert_eq!(mm.join_room(room_id, alice).unwrap_err(), GameError::AlreadyInRoom);
    assert_eq!(mm.list_waiting_rooms().len(), 1);
}

#[test]
fn test_leave_drops_waiting_room() {
    let mut mm = Matchmaker::new();
    let alice = Player::new("alice");
    mm.join(alice.clone());

    assert!(mm.leave(alice.id));
    assert!(mm.list_waiting_rooms().is_empty());
    assert!(!mm.leave(alice.id));
}
