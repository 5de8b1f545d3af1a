//! JSON wire protocol: envelopes, incoming commands and outgoing events.
//!
//! Every frame is an envelope `{type, data, id}`. Outgoing `data` is itself a
//! JSON document encoded as a string; incoming `data` may be either that or an
//! inline JSON value. `id` is always 0.

use core::fmt;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::common::ShotOutcome;
use crate::leaderboard::WinnerEntry;
use crate::matchmaker::{Room, RoomId};
use crate::player::PlayerId;
use crate::session::SessionId;
use crate::ship::{Cell, Orientation, Ship, ShipKind};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub data: Value,
    #[serde(default)]
    pub id: u32,
}

#[derive(Debug)]
pub enum DecodeError {
    /// The frame is not a JSON envelope.
    Envelope(serde_json::Error),
    /// The envelope's `data` does not match its `type`.
    Payload {
        kind: String,
        source: serde_json::Error,
    },
    UnknownType(String),
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeError::Envelope(e) => write!(f, "Malformed message: {}", e),
            DecodeError::Payload { kind, source } => {
                write!(f, "Malformed data for {}: {}", kind, source)
            }
            DecodeError::UnknownType(kind) => write!(f, "Unknown command type: {}", kind),
        }
    }
}

impl std::error::Error for DecodeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DecodeError::Envelope(e) | DecodeError::Payload { source: e, .. } => Some(e),
            DecodeError::UnknownType(_) => None,
        }
    }
}

/// Ship as exchanged with clients. `direction` is `true` for vertical ships.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireShip {
    pub position: Cell,
    pub direction: bool,
    pub length: usize,
    #[serde(rename = "type")]
    pub kind: ShipKind,
}

impl From<WireShip> for Ship {
    fn from(w: WireShip) -> Self {
        let orientation = if w.direction {
            Orientation::Vertical
        } else {
            Orientation::Horizontal
        };
        Ship::new(w.kind, w.length, w.position, orientation)
    }
}

impl From<&Ship> for WireShip {
    fn from(ship: &Ship) -> Self {
        WireShip {
            position: ship.anchor,
            direction: ship.orientation == Orientation::Vertical,
            length: ship.length,
            kind: ship.kind,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinRoomRequest {
    pub index_room: RoomId,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddShipsRequest {
    pub game_id: SessionId,
    pub ships: Vec<WireShip>,
    pub index_player: PlayerId,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttackRequest {
    pub game_id: SessionId,
    pub x: usize,
    pub y: usize,
    pub index_player: PlayerId,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RandomAttackRequest {
    pub game_id: SessionId,
    pub index_player: PlayerId,
}

/// Decoded client command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Register(RegisterRequest),
    CreateRoom,
    AddUserToRoom(JoinRoomRequest),
    AddShips(AddShipsRequest),
    Attack(AttackRequest),
    RandomAttack(RandomAttackRequest),
}

impl Command {
    pub fn parse(frame: &str) -> Result<Self, DecodeError> {
        let envelope: Envelope = serde_json::from_str(frame).map_err(DecodeError::Envelope)?;
        Self::from_envelope(envelope)
    }

    pub fn from_envelope(envelope: Envelope) -> Result<Self, DecodeError> {
        let Envelope { kind, data, .. } = envelope;
        match kind.as_str() {
            "reg" => payload(&kind, data).map(Command::Register),
            "create_room" => Ok(Command::CreateRoom),
            "add_user_to_room" => payload(&kind, data).map(Command::AddUserToRoom),
            "add_ships" => payload(&kind, data).map(Command::AddShips),
            "attack" => payload(&kind, data).map(Command::Attack),
            "randomAttack" => payload(&kind, data).map(Command::RandomAttack),
            _ => Err(DecodeError::UnknownType(kind)),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Command::Register(_) => "reg",
            Command::CreateRoom => "create_room",
            Command::AddUserToRoom(_) => "add_user_to_room",
            Command::AddShips(_) => "add_ships",
            Command::Attack(_) => "attack",
            Command::RandomAttack(_) => "randomAttack",
        }
    }
}

fn payload<T: DeserializeOwned>(kind: &str, data: Value) -> Result<T, DecodeError> {
    let result = match data {
        Value::String(text) => serde_json::from_str(&text),
        other => serde_json::from_value(other),
    };
    result.map_err(|source| DecodeError::Payload {
        kind: kind.to_string(),
        source,
    })
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterReply {
    pub name: String,
    pub index: Option<PlayerId>,
    pub error: bool,
    pub error_text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoomUser {
    pub name: String,
    pub index: PlayerId,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomEntry {
    pub room_id: RoomId,
    pub room_users: Vec<RoomUser>,
}

impl From<&Room> for RoomEntry {
    fn from(room: &Room) -> Self {
        RoomEntry {
            room_id: room.id,
            room_users: room
                .occupants
                .iter()
                .map(|p| RoomUser {
                    name: p.display_name.clone(),
                    index: p.id,
                })
                .collect(),
        }
    }
}

/// Notification sent to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Event {
    Registered(RegisterReply),
    UpdateRoom(Vec<RoomEntry>),
    #[serde(rename_all = "camelCase")]
    CreateGame {
        id_game: SessionId,
        id_player: PlayerId,
    },
    #[serde(rename_all = "camelCase")]
    StartGame {
        ships: Vec<WireShip>,
        current_player_index: PlayerId,
    },
    #[serde(rename_all = "camelCase")]
    Turn { current_player: PlayerId },
    #[serde(rename_all = "camelCase")]
    Attack {
        position: Cell,
        current_player: PlayerId,
        status: ShotOutcome,
    },
    #[serde(rename_all = "camelCase")]
    Finish { win_player: PlayerId },
    UpdateWinners(Vec<WinnerEntry>),
    #[serde(rename_all = "camelCase")]
    Error { error_text: String },
}

impl Event {
    pub fn update_room(rooms: &[Room]) -> Self {
        Event::UpdateRoom(rooms.iter().map(RoomEntry::from).collect())
    }

    pub fn start_game(ships: &[Ship], player: PlayerId) -> Self {
        Event::StartGame {
            ships: ships.iter().map(WireShip::from).collect(),
            current_player_index: player,
        }
    }

    pub fn error(err: &dyn fmt::Display) -> Self {
        Event::Error {
            error_text: err.to_string(),
        }
    }

    /// Envelope `type` for this event.
    pub fn kind(&self) -> &'static str {
        match self {
            Event::Registered(_) => "reg",
            Event::UpdateRoom(_) => "update_room",
            Event::CreateGame { .. } => "create_game",
            Event::StartGame { .. } => "start_game",
            Event::Turn { .. } => "turn",
            Event::Attack { .. } => "attack",
            Event::Finish { .. } => "finish",
            Event::UpdateWinners(_) => "update_winners",
            Event::Error { .. } => "error",
        }
    }

    /// Serialize into an envelope frame with `data` as a JSON string.
    pub fn encode(&self) -> Result<String, serde_json::Error> {
        let data = serde_json::to_string(self)?;
        serde_json::to_string(&Envelope {
            kind: self.kind().to_string(),
            data: Value::String(data),
            id: 0,
        })
    }
}

/// Decode an outgoing frame's payload; used by clients and tests.
pub fn decode_event_data(frame: &str) -> Result<(String, Value), DecodeError> {
    let Envelope { kind, data, .. } = serde_json::from_str(frame).map_err(DecodeError::Envelope)?;
    let value = payload::<Value>(&kind, data)?;
    Ok((kind, value))
}
