use battleship_server::protocol::decode_event_data;
use battleship_server::{Broadcaster, Event, PlayerId};
use tokio::sync::mpsc;

fn turn(player: PlayerId) -> Event {
    Event::Turn {
        current_player: player,
    }
}

#[test]
fn test_send_to_player_reaches_every_connection() {
    let mut clients = Broadcaster::new();
    let alice = PlayerId::new();
    let (tx1, mut rx1) = mpsc::unbounded_channel();
    let (tx2, mut rx2) = mpsc::unbounded_channel();
    let (tx3, mut rx3) = mpsc::unbounded_channel();
    clients.register(1, tx1);
    clients.register(2, tx2);
    clients.register(3, tx3);
    assert_eq!(clients.bind(1, alice), None);
    assert_eq!(clients.bind(2, alice), None);

    assert_eq!(clients.send_to_player(alice, &turn(alice)), 2);
    let (kind, _) = decode_event_data(&rx1.try_recv().unwrap()).unwrap();
    assert_eq!(kind, "turn");
    assert!(rx2.try_recv().is_ok());
    assert!(rx3.try_recv().is_err());
}

#[test]
fn test_send_to_all_includes_unregistered() {
    let mut clients = Broadcaster::new();
    let (tx1, mut rx1) = mpsc::unbounded_channel();
    let (tx2, mut rx2) = mpsc::unbounded_channel();
    clients.register(1, tx1);
    clients.register(2, tx2);
    clients.bind(1, PlayerId::new());

    assert_eq!(clients.send_to_all(&Event::UpdateWinners(Vec::new())), 2);
    assert!(rx1.try_recv().is_ok());
    assert!(rx2.try_recv().is_ok());
}

#[test]
fn test_closed_connection_is_skipped() {
    let mut clients = Broadcaster::new();
    let a = PlayerId::new();
    let b = PlayerId::new();
    let (tx1, rx1) = mpsc::unbounded_channel();
    let (tx2, mut rx2) = mpsc::unbounded_channel();
    clients.register(1, tx1);
    clients.register(2, tx2);
    clients.bind(1, a);
    clients.bind(2, b);
    drop(rx1);

    assert!(!clients.is_connected(a));
    assert!(clients.is_connected(b));
    assert_eq!(clients.send_to_players(&[a, b], &turn(b)), 1);
    assert!(rx2.try_recv().is_ok());
}

#[test]
fn test_frames_keep_send_order() {
    let mut clients = Broadcaster::new();
    let a = PlayerId::new();
    let b = PlayerId::new();
    let (tx, mut rx) = mpsc::unbounded_channel();
    clients.register(7, tx);
    clients.bind(7, a);

    clients.send_to_client(7, &turn(a));
    clients.send_to_client(7, &turn(b));
    let first = decode_event_data(&rx.try_recv().unwrap()).unwrap().1;
    let second = decode_event_data(&rx.try_recv().unwrap()).unwrap().1;
    assert_eq!(first["currentPlayer"], serde_json::json!(a.to_string()));
    assert_eq!(second["currentPlayer"], serde_json::json!(b.to_string()));
}

#[test]
fn test_unregister_returns_bound_player() {
    let mut clients = Broadcaster::new();
    let a = PlayerId::new();
    let (tx, _rx) = mpsc::unbounded_channel();
    clients.register(1, tx);
    assert_eq!(clients.player_of(1), None);
    clients.bind(1, a);
    assert_eq!(clients.player_of(1), Some(a));

    assert_eq!(clients.unregister(1), Some(a));
    assert!(clients.is_empty());
    assert_eq!(clients.bind(1, a), None);
    assert_eq!(clients.player_of(1), None);
    assert_eq!(clients.send_to_client(1, &turn(a)), 0);
}

#[test]
fn test_rebind_returns_previous_player() {
    let mut clients = Broadcaster::new();
    let a = PlayerId::new();
    let b = PlayerId::new();
    let (tx, _rx) = mpsc::unbounded_channel();
    clients.register(1, tx);

    assert_eq!(clients.bind(1, a), None);
    assert_eq!(clients.bind(1, b), Some(a));
    assert_eq!(clients.player_of(1), Some(b));
    assert!(!clients.is_connected(a));
    assert!(clients.is_connected(b));
}
