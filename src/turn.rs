//! Turn ownership, attack resolution and end-of-game detection.
//!
//! The player who completes placement last fires first. A miss passes the
//! turn; a hit or sink keeps it. Sinking the last ship finishes the session
//! and no further turn is handed out.

use log::{debug, info};
use rand::Rng;

use crate::common::{BoardError, GameError, ShotOutcome};
use crate::player::PlayerId;
use crate::session::{Phase, Session, SessionId, SessionRegistry};
use crate::ship::Cell;

/// What happens after a shot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextTurn {
    /// Play continues with this turn holder.
    Continue(PlayerId),
    /// The opponent's fleet is gone.
    Finished { winner: PlayerId },
}

/// A resolved attack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttackReport {
    pub shooter: PlayerId,
    pub cell: Cell,
    pub outcome: ShotOutcome,
    pub next: NextTurn,
}

pub struct TurnCoordinator<R: Rng> {
    rng: R,
}

impl<R: Rng> TurnCoordinator<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Move a fully placed session into play. `last_placed` takes the first
    /// turn. Returns the first turn holder.
    pub fn on_both_placed(
        &mut self,
        sessions: &mut SessionRegistry,
        session_id: SessionId,
        last_placed: PlayerId,
    ) -> Result<PlayerId, GameError> {
        let session = sessions.get_session_mut(session_id)?;
        if !session.has_player(last_placed) {
            return Err(GameError::UnknownPlayerInSession);
        }
        match session.phase() {
            Phase::Placing if session.both_placed() => {}
            Phase::Finished => return Err(GameError::GameFinished),
            Phase::InProgress => return Err(GameError::PlacementClosed),
            Phase::Lobby | Phase::Placing => return Err(GameError::GameNotStarted),
        }
        session.start(last_placed);
        info!("game {} started, {} fires first", session_id, last_placed);
        Ok(last_placed)
    }

    /// Fire at `cell` on the opponent's board.
    pub fn attack(
        &mut self,
        sessions: &mut SessionRegistry,
        session_id: SessionId,
        player_id: PlayerId,
        cell: Cell,
    ) -> Result<AttackReport, GameError> {
        let session = sessions.get_session_mut(session_id)?;
        check_turn(session, player_id)?;
        if !cell.in_bounds() {
            return Err(GameError::CellOutOfBounds(cell));
        }
        if session.opponent_board_mut(player_id)?.is_called(cell) {
            return Err(GameError::CellAlreadyTargeted(cell));
        }
        fire(session, player_id, cell)
    }

    /// Fire at a random cell the player has not targeted yet.
    pub fn random_attack(
        &mut self,
        sessions: &mut SessionRegistry,
        session_id: SessionId,
        player_id: PlayerId,
    ) -> Result<AttackReport, GameError> {
        let session = sessions.get_session_mut(session_id)?;
        check_turn(session, player_id)?;
        let cell = session
            .opponent_board_mut(player_id)?
            .pick_uncalled_cell(&mut self.rng)
            .ok_or(GameError::GameFinished)?;
        fire(session, player_id, cell)
    }
}

fn check_turn(session: &Session, player_id: PlayerId) -> Result<(), GameError> {
    if !session.has_player(player_id) {
        return Err(GameError::UnknownPlayerInSession);
    }
    match session.phase() {
        Phase::InProgress => {}
        Phase::Finished => return Err(GameError::GameFinished),
        Phase::Lobby | Phase::Placing => return Err(GameError::GameNotStarted),
    }
    if session.current_turn() != Some(player_id) {
        return Err(GameError::NotYourTurn);
    }
    Ok(())
}

fn fire(session: &mut Session, player_id: PlayerId, cell: Cell) -> Result<AttackReport, GameError> {
    let opponent = session.opponent_of(player_id)?.id;
    let board = session.opponent_board_mut(player_id)?;
    let outcome = board.resolve_shot(cell).map_err(|e| match e {
        BoardError::AlreadyTargeted(cell) => GameError::CellAlreadyTargeted(cell),
        BoardError::CellOutOfBounds(cell) => GameError::CellOutOfBounds(cell),
        other => GameError::Board(other),
    })?;
    let defeated = board.is_defeated();
    debug!(
        "game {}: {} fired at {} -> {:?}",
        session.id(),
        player_id,
        cell,
        outcome
    );

    let next = if defeated {
        session.finish(player_id);
        info!("game {} finished, winner {}", session.id(), player_id);
        NextTurn::Finished { winner: player_id }
    } else if outcome.keeps_turn() {
        NextTurn::Continue(player_id)
    } else {
        session.pass_turn_to(opponent);
        NextTurn::Continue(opponent)
    };

    Ok(AttackReport {
        shooter: player_id,
        cell,
        outcome,
        next,
    })
}
