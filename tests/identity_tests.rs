use battleship_server::{GameError, UserDirectory};

#[test]
fn test_new_name_creates_player() {
    let mut users = UserDirectory::new();
    assert!(users.is_empty());

    let alice = users.login_or_create("alice", "secret").unwrap();
    assert_eq!(alice.display_name, "alice");
    assert_eq!(users.len(), 1);
    assert_eq!(users.player(alice.id), Some(&alice));
}

#[test]
fn test_same_credentials_return_same_player() {
    let mut users = UserDirectory::new();
    let first = users.login_or_create("alice", "secret").unwrap();
    let second = users.login_or_create("  alice ", "secret").unwrap();
    assert_eq!(first.id, second.id);
    assert_eq!(users.len(), 1);
}

#[test]
fn test_wrong_password_rejected() {
    let mut users = UserDirectory::new();
    users.login_or_create("alice", "secret").unwrap();
    assert_eq!(
        users.login_or_create("alice", "guess").unwrap_err(),
        GameError::WrongPassword
    );
}

#[test]
fn test_blank_name_rejected() {
    let mut users = UserDirectory::new();
    assert_eq!(users.login_or_create("   ", "pw").unwrap_err(), GameError::InvalidName);
    assert!(users.is_empty());
}

#[test]
fn test_distinct_names_get_distinct_ids() {
    let mut users = UserDirectory::new();
    let a = users.login_or_create("a", "pw").unwrap();
    let b = users.login_or_create("b", "pw").unwrap();
    assert_ne!(a.id, b.id);
}
