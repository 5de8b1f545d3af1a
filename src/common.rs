//! Shot outcomes and the error types shared by the game modules.

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::bitboard::BitBoardError;
use crate::ship::Cell;

/// Result of resolving a shot against a board. Derived, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShotOutcome {
    #[serde(rename = "miss")]
    Miss,
    #[serde(rename = "shot")]
    Hit,
    #[serde(rename = "killed")]
    Sunk,
}

impl ShotOutcome {
    /// Hits and sinks let the shooter fire again.
    pub fn keeps_turn(&self) -> bool {
        !matches!(self, ShotOutcome::Miss)
    }
}

/// Errors returned by Board operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    /// Underlying bitboard error.
    BitBoardError(BitBoardError),
    /// Ship at `ship` (index in the submitted fleet) leaves the grid.
    OutOfBounds { ship: usize },
    /// Two ships of the submitted fleet share `cell`.
    OverlappingShips { cell: Cell },
    /// Ship at `ship` has a length outside the allowed range.
    InvalidShipLength { ship: usize, length: usize },
    /// The fleet holds no ships.
    EmptyFleet,
    /// The board already carries a fleet.
    ShipsAlreadyPlaced,
    /// Shot target is off the grid.
    CellOutOfBounds(Cell),
    /// Shot target was fired upon before.
    AlreadyTargeted(Cell),
}

impl From<BitBoardError> for BoardError {
    fn from(err: BitBoardError) -> Self {
        BoardError::BitBoardError(err)
    }
}

impl fmt::Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoardError::BitBoardError(e) => write!(f, "BitBoard error: {}", e),
            BoardError::OutOfBounds { ship } => {
                write!(f, "Ship #{} does not fit on the board", ship)
            }
            BoardError::OverlappingShips { cell } => {
                write!(f, "Ships overlap at {}", cell)
            }
            BoardError::InvalidShipLength { ship, length } => {
                write!(f, "Ship #{} has invalid length {}", ship, length)
            }
            BoardError::EmptyFleet => write!(f, "No ships submitted"),
            BoardError::ShipsAlreadyPlaced => write!(f, "Ships are already placed on this board"),
            BoardError::CellOutOfBounds(cell) => write!(f, "Cell {} is outside the board", cell),
            BoardError::AlreadyTargeted(cell) => write!(f, "Cell {} was already targeted", cell),
        }
    }
}

impl std::error::Error for BoardError {}

/// Error classes reported to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Bad ship placement; session state unchanged.
    Validation,
    /// Command not allowed in the current game state.
    Protocol,
    /// Unknown session, room or player.
    NotFound,
}

/// Errors returned by matchmaking, session and turn operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    Board(BoardError),
    SessionNotFound,
    UnknownPlayerInSession,
    RoomNotFound,
    /// Room already seats two players.
    RoomFull,
    /// A player tried to join a room they wait in.
    AlreadyInRoom,
    NotYourTurn,
    CellAlreadyTargeted(Cell),
    CellOutOfBounds(Cell),
    /// Ships can only be submitted while the session is placing.
    PlacementClosed,
    /// Both fleets are required before shots are accepted.
    GameNotStarted,
    GameFinished,
    /// The connection has no player bound to it.
    NotRegistered,
    /// `indexPlayer` does not match the connection's player.
    PlayerMismatch,
    WrongPassword,
    InvalidName,
}

impl GameError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            GameError::Board(BoardError::AlreadyTargeted(_))
            | GameError::Board(BoardError::CellOutOfBounds(_))
            | GameError::Board(BoardError::ShipsAlreadyPlaced) => ErrorKind::Protocol,
            GameError::Board(_) | GameError::InvalidName => ErrorKind::Validation,
            GameError::SessionNotFound
            | GameError::UnknownPlayerInSession
            | GameError::RoomNotFound => ErrorKind::NotFound,
            GameError::RoomFull
            | GameError::AlreadyInRoom
            | GameError::NotYourTurn
            | GameError::CellAlreadyTargeted(_)
            | GameError::CellOutOfBounds(_)
            | GameError::PlacementClosed
            | GameError::GameNotStarted
            | GameError::GameFinished
            | GameError::NotRegistered
            | GameError::PlayerMismatch
            | GameError::WrongPassword => ErrorKind::Protocol,
        }
    }
}

impl From<BoardError> for GameError {
    fn from(err: BoardError) -> Self {
        GameError::Board(err)
    }
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::Board(e) => write!(f, "{}", e),
            GameError::SessionNotFound => write!(f, "Game not found"),
            GameError::UnknownPlayerInSession => write!(f, "Player is not part of this game"),
            GameError::RoomNotFound => write!(f, "Room not found"),
            GameError::RoomFull => write!(f, "Room is full"),
            GameError::AlreadyInRoom => write!(f, "Player is already in this room"),
            GameError::NotYourTurn => write!(f, "It is not your turn"),
            GameError::CellAlreadyTargeted(cell) => {
                write!(f, "Cell {} was already targeted", cell)
            }
            GameError::CellOutOfBounds(cell) => write!(f, "Cell {} is outside the board", cell),
            GameError::PlacementClosed => write!(f, "Ships can no longer be placed"),
            GameError::GameNotStarted => write!(f, "Game has not started yet"),
            GameError::GameFinished => write!(f, "Game is already finished"),
            GameError::NotRegistered => write!(f, "Register before sending commands"),
            GameError::PlayerMismatch => write!(f, "Player does not match this connection"),
            GameError::WrongPassword => write!(f, "Wrong password"),
            GameError::InvalidName => write!(f, "Name must not be empty"),
        }
    }
}

impl std::error::Error for GameError {}
