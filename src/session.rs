//! Sessions and the registry that owns them.
//!
//! A session seats exactly the two players it was created with, each with
//! their own board. Phase only moves forward:
//! `Lobby → Placing → InProgress → Finished`.

use core::fmt;
use std::collections::HashMap;

use log::{debug, info};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::board::Board;
use crate::common::GameError;
use crate::player::{Player, PlayerId};
use crate::ship::Ship;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(Uuid);

impl SessionId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Session lifecycle. Players wait in `Lobby` while still in a matchmaker
/// room; a `Session` itself is created already `Placing`, so it never
/// reports `Lobby`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Phase {
    Lobby,
    Placing,
    InProgress,
    Finished,
}

/// Turn state as seen by the turn coordinator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnState {
    AwaitingPlacement,
    TurnOf(PlayerId),
    Finished { winner: PlayerId },
}

/// Whether a ship submission completed the placement phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnReadiness {
    /// The opponent has not placed yet.
    Waiting,
    /// Both fleets are down; `last_placed` completed placement.
    BothPlaced { last_placed: PlayerId },
}

#[derive(Debug, Clone)]
pub struct Seat {
    pub player: Player,
    pub board: Board,
}

#[derive(Debug)]
pub struct Session {
    id: SessionId,
    seats: [Seat; 2],
    phase: Phase,
    turn: Option<PlayerId>,
    winner: Option<PlayerId>,
}

impl Session {
    fn new(a: Player, b: Player) -> Self {
        Self {
            id: SessionId::new(),
            seats: [
                Seat {
                    player: a,
                    board: Board::new(),
                },
                Seat {
                    player: b,
                    board: Board::new(),
                },
            ],
            phase: Phase::Placing,
            turn: None,
            winner: None,
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn current_turn(&self) -> Option<PlayerId> {
        self.turn
    }

    pub fn winner(&self) -> Option<PlayerId> {
        self.winner
    }

    pub fn turn_state(&self) -> TurnState {
        match (self.phase, self.turn, self.winner) {
            (Phase::Finished, _, Some(winner)) => TurnState::Finished { winner },
            (Phase::InProgress, Some(holder), _) => TurnState::TurnOf(holder),
            _ => TurnState::AwaitingPlacement,
        }
    }

    pub fn players(&self) -> [&Player; 2] {
        [&self.seats[0].player, &self.seats[1].player]
    }

    pub fn player_ids(&self) -> [PlayerId; 2] {
        [self.seats[0].player.id, self.seats[1].player.id]
    }

    pub fn has_player(&self, player_id: PlayerId) -> bool {
        self.seat_index(player_id).is_some()
    }

    fn seat_index(&self, player_id: PlayerId) -> Option<usize> {
        self.seats.iter().position(|s| s.player.id == player_id)
    }

    pub fn seat(&self, player_id: PlayerId) -> Result<&Seat, GameError> {
        let idx = self
            .seat_index(player_id)
            .ok_or(GameError::UnknownPlayerInSession)?;
        Ok(&self.seats[idx])
    }

    pub fn board_of(&self, player_id: PlayerId) -> Result<&Board, GameError> {
        Ok(&self.seat(player_id)?.board)
    }

    pub fn opponent_of(&self, player_id: PlayerId) -> Result<&Player, GameError> {
        let idx = self
            .seat_index(player_id)
            .ok_or(GameError::UnknownPlayerInSession)?;
        Ok(&self.seats[1 - idx].player)
    }

    pub(crate) fn opponent_board_mut(&mut self, player_id: PlayerId) -> Result<&mut Board, GameError> {
        let idx = self
            .seat_index(player_id)
            .ok_or(GameError::UnknownPlayerInSession)?;
        Ok(&mut self.seats[1 - idx].board)
    }

    pub fn both_placed(&self) -> bool {
        self.seats.iter().all(|s| s.board.is_placed())
    }

    pub(crate) fn start(&mut self, first: PlayerId) {
        self.phase = Phase::InProgress;
        self.turn = Some(first);
    }

    pub(crate) fn pass_turn_to(&mut self, holder: PlayerId) {
        self.turn = Some(holder);
    }

    pub(crate) fn finish(&mut self, winner: PlayerId) {
        self.phase = Phase::Finished;
        self.turn = None;
        self.winner = Some(winner);
    }

    fn submit_ships(&mut self, player_id: PlayerId, ships: &[Ship]) -> Result<TurnReadiness, GameError> {
        let idx = self
            .seat_index(player_id)
            .ok_or(GameError::UnknownPlayerInSession)?;
        match self.phase {
            Phase::Placing => {}
            Phase::Finished => return Err(GameError::GameFinished),
            Phase::Lobby | Phase::InProgress => return Err(GameError::PlacementClosed),
        }
        self.seats[idx].board.place(ships)?;
        if self.both_placed() {
            Ok(TurnReadiness::BothPlaced {
                last_placed: player_id,
            })
        } else {
            Ok(TurnReadiness::Waiting)
        }
    }
}

/// Owns every live session, keyed by id.
#[derive(Debug, Default)]
pub struct SessionRegistry {
    sessions: HashMap<SessionId, Session>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// New session in `Placing` with two empty boards.
    pub fn create_session(&mut self, a: Player, b: Player) -> SessionId {
        let session = Session::new(a, b);
        let id = session.id;
        info!(
            "game {} created for {} and {}",
            id, session.seats[0].player.display_name, session.seats[1].player.display_name
        );
        self.sessions.insert(id, session);
        id
    }

    /// Place `player_id`'s fleet. Reports whether both players are now ready;
    /// starting the game is left to the turn coordinator.
    pub fn submit_ships(
        &mut self,
        session_id: SessionId,
        player_id: PlayerId,
        ships: &[Ship],
    ) -> Result<TurnReadiness, GameError> {
        let session = self.get_session_mut(session_id)?;
        let readiness = session.submit_ships(player_id, ships)?;
        debug!("game {}: {} placed {} ships", session_id, player_id, ships.len());
        Ok(readiness)
    }

    pub fn get_session(&self, session_id: SessionId) -> Option<&Session> {
        self.sessions.get(&session_id)
    }

    pub(crate) fn get_session_mut(&mut self, session_id: SessionId) -> Result<&mut Session, GameError> {
        self.sessions
            .get_mut(&session_id)
            .ok_or(GameError::SessionNotFound)
    }

    /// Tear a session down; later commands for it fail with `SessionNotFound`.
    pub fn remove_session(&mut self, session_id: SessionId) -> Option<Session> {
        let removed = self.sessions.remove(&session_id);
        if removed.is_some() {
            info!("game {} removed", session_id);
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
