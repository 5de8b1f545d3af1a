//! Lobby rooms and pairing of waiting players.
//!
//! Rooms are kept in creation order. A room that receives its second player
//! leaves the lobby immediately; the caller turns it into a session.

use core::fmt;

use log::debug;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::common::GameError;
use crate::player::{Player, PlayerId};

/// Seats per room.
pub const ROOM_CAPACITY: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomId(Uuid);

impl RoomId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A lobby placeholder holding up to two players.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    #[serde(rename = "roomId")]
    pub id: RoomId,
    #[serde(rename = "roomUsers")]
    pub occupants: Vec<Player>,
}

impl Room {
    fn open(player: Player) -> Self {
        Self {
            id: RoomId::new(),
            occupants: vec![player],
        }
    }

    pub fn is_waiting(&self) -> bool {
        self.occupants.len() == 1
    }

    pub fn has(&self, player_id: PlayerId) -> bool {
        self.occupants.iter().any(|p| p.id == player_id)
    }

    fn seat(&mut self, player: Player) -> Result<(), GameError> {
        if self.has(player.id) {
            return Err(GameError::AlreadyInRoom);
        }
        if self.occupants.len() >= ROOM_CAPACITY {
            return Err(GameError::RoomFull);
        }
        self.occupants.push(player);
        Ok(())
    }
}

/// Outcome of a join.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoomView {
    /// The player sits alone and waits for an opponent.
    Waiting(Room),
    /// The room now seats two players and has left the lobby.
    Filled(Room),
}

impl RoomView {
    pub fn room(&self) -> &Room {
        match self {
            RoomView::Waiting(room) | RoomView::Filled(room) => room,
        }
    }
}

#[derive(Debug, Default)]
pub struct Matchmaker {
    rooms: Vec<Room>,
}

impl Matchmaker {
    pub fn new() -> Self {
        Self::default()
    }

    /// First-fit: seat the player in the earliest waiting room held by someone
    /// else, or open a new room. A player already waiting gets their own room
    /// back.
    pub fn join(&mut self, player: Player) -> RoomView {
        if let Some(own) = self.rooms.iter().find(|r| r.has(player.id)) {
            return RoomView::Waiting(own.clone());
        }
        match self.rooms.iter().position(Room::is_waiting) {
            Some(idx) => match self.fill(idx, player.clone()) {
                Ok(view) => view,
                // only reachable if a full room lingered in the lobby
                Err(_) => self.open(player),
            },
            None => self.open(player),
        }
    }

    /// Seat the player in a specific room.
    pub fn join_room(&mut self, room_id: RoomId, player: Player) -> Result<RoomView, GameError> {
        let idx = self
            .rooms
            .iter()
            .position(|r| r.id == room_id)
            .ok_or(GameError::RoomNotFound)?;
        self.fill(idx, player)
    }

    fn open(&mut self, player: Player) -> RoomView {
        let room = Room::open(player);
        debug!("opened room {}", room.id);
        self.rooms.push(room.clone());
        RoomView::Waiting(room)
    }

    fn fill(&mut self, idx: usize, player: Player) -> Result<RoomView, GameError> {
        self.rooms[idx].seat(player)?;
        let room = self.rooms.remove(idx);
        // neither occupant keeps waiting anywhere else
        self.rooms
            .retain(|r| !room.occupants.iter().any(|p| r.has(p.id)));
        debug!("room {} filled", room.id);
        Ok(RoomView::Filled(room))
    }

    /// Rooms with exactly one occupant, oldest first.
    pub fn list_waiting_rooms(&self) -> Vec<Room> {
        self.rooms.iter().filter(|r| r.is_waiting()).cloned().collect()
    }

    /// Drop every room the player waits in. Returns `true` if any was removed.
    pub fn leave(&mut self, player_id: PlayerId) -> bool {
        let before = self.rooms.len();
        self.rooms.retain(|r| !r.has(player_id));
        before != self.rooms.len()
    }

    pub fn room(&self, room_id: RoomId) -> Option<&Room> {
        self.rooms.iter().find(|r| r.id == room_id)
    }
}
