//! The game server actor.
//!
//! All state lives in one `GameServer` that handles `ServerCommand`s strictly
//! one after another. A command mutates state to completion and only then
//! queues its notifications, so every session sees its events in the order
//! its commands were accepted.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use log::{debug, info, warn};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::broadcast::{Broadcaster, ClientId};
use crate::common::{ErrorKind, GameError};
use crate::config::ServerConfig;
use crate::identity::UserDirectory;
use crate::leaderboard::Leaderboard;
use crate::matchmaker::{Matchmaker, RoomView};
use crate::player::{Player, PlayerId};
use crate::protocol::{
    AddShipsRequest, AttackRequest, Command, Event, RandomAttackRequest, RegisterReply,
    RegisterRequest,
};
use crate::session::{SessionId, SessionRegistry, TurnReadiness};
use crate::ship::{Cell, Ship};
use crate::turn::{AttackReport, NextTurn, TurnCoordinator};

#[derive(Debug)]
pub enum ServerCommand {
    Connect {
        client_id: ClientId,
        outbound: UnboundedSender<String>,
    },
    Frame {
        client_id: ClientId,
        frame: String,
    },
    Disconnect {
        client_id: ClientId,
    },
}

/// Cloneable front door to a running [`GameServer`].
#[derive(Clone)]
pub struct ServerHandle {
    commands: UnboundedSender<ServerCommand>,
    next_client: Arc<AtomicU64>,
}

impl ServerHandle {
    /// Open a connection. Frames for it arrive on the returned receiver.
    pub fn connect(&self) -> anyhow::Result<(ClientId, UnboundedReceiver<String>)> {
        let client_id = self.next_client.fetch_add(1, Ordering::Relaxed);
        let (outbound, inbound) = mpsc::unbounded_channel();
        self.commands
            .send(ServerCommand::Connect {
                client_id,
                outbound,
            })
            .map_err(|_| anyhow::anyhow!("Server is shut down"))?;
        Ok((client_id, inbound))
    }

    pub fn send_frame(&self, client_id: ClientId, frame: String) -> anyhow::Result<()> {
        self.commands
            .send(ServerCommand::Frame { client_id, frame })
            .map_err(|_| anyhow::anyhow!("Server is shut down"))
    }

    pub fn disconnect(&self, client_id: ClientId) {
        let _ = self.commands.send(ServerCommand::Disconnect { client_id });
    }
}

pub struct GameServer {
    commands: UnboundedReceiver<ServerCommand>,
    clients: Broadcaster,
    users: UserDirectory,
    matchmaker: Matchmaker,
    sessions: SessionRegistry,
    turns: TurnCoordinator<SmallRng>,
    leaderboard: Leaderboard,
}

impl GameServer {
    pub fn new(config: &ServerConfig) -> (Self, ServerHandle) {
        let rng = match config.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => {
                let mut seed_rng = rand::rng();
                SmallRng::from_rng(&mut seed_rng)
            }
        };
        let (tx, rx) = mpsc::unbounded_channel();
        let server = Self {
            commands: rx,
            clients: Broadcaster::new(),
            users: UserDirectory::new(),
            matchmaker: Matchmaker::new(),
            sessions: SessionRegistry::new(),
            turns: TurnCoordinator::new(rng),
            leaderboard: Leaderboard::new(),
        };
        let handle = ServerHandle {
            commands: tx,
            next_client: Arc::new(AtomicU64::new(1)),
        };
        (server, handle)
    }

    /// Process commands until every handle is dropped.
    pub async fn run(mut self) {
        while let Some(command) = self.commands.recv().await {
            self.handle(command);
        }
        info!("all handles dropped, server stopping");
    }

    /// Process a single command to completion.
    pub fn handle(&mut self, command: ServerCommand) {
        match command {
            ServerCommand::Connect {
                client_id,
                outbound,
            } => {
                debug!("connection {} opened", client_id);
                self.clients.register(client_id, outbound);
            }
            ServerCommand::Frame { client_id, frame } => self.on_frame(client_id, &frame),
            ServerCommand::Disconnect { client_id } => self.on_disconnect(client_id),
        }
    }

    pub fn sessions(&self) -> &SessionRegistry {
        &self.sessions
    }

    pub fn matchmaker(&self) -> &Matchmaker {
        &self.matchmaker
    }

    pub fn leaderboard(&self) -> &Leaderboard {
        &self.leaderboard
    }

    fn on_frame(&mut self, client_id: ClientId, frame: &str) {
        let command = match Command::parse(frame) {
            Ok(command) => command,
            Err(e) => {
                debug!("connection {} sent an undecodable frame: {}", client_id, e);
                self.clients.send_to_client(client_id, &Event::error(&e));
                return;
            }
        };
        let name = command.name();
        debug!("connection {} -> {}", client_id, name);
        if let Err(e) = self.dispatch(client_id, command) {
            match e.kind() {
                ErrorKind::NotFound => warn!("{} from connection {} rejected: {}", name, client_id, e),
                ErrorKind::Validation | ErrorKind::Protocol => {
                    debug!("{} from connection {} rejected: {}", name, client_id, e)
                }
            }
            self.clients.send_to_client(client_id, &Event::error(&e));
        }
    }

    fn on_disconnect(&mut self, client_id: ClientId) {
        debug!("connection {} closed", client_id);
        let Some(player_id) = self.clients.unregister(client_id) else {
            return;
        };
        if !self.clients.is_connected(player_id) && self.matchmaker.leave(player_id) {
            self.broadcast_rooms();
        }
    }

    fn dispatch(&mut self, client_id: ClientId, command: Command) -> Result<(), GameError> {
        match command {
            Command::Register(req) => {
                self.register(client_id, req);
                Ok(())
            }
            Command::CreateRoom => {
                let player = self.player_for(client_id)?;
                let view = self.matchmaker.join(player);
                self.on_room_view(view);
                Ok(())
            }
            Command::AddUserToRoom(req) => {
                let player = self.player_for(client_id)?;
                let view = self.matchmaker.join_room(req.index_room, player)?;
                self.on_room_view(view);
                Ok(())
            }
            Command::AddShips(req) => self.add_ships(client_id, req),
            Command::Attack(req) => self.attack(client_id, req),
            Command::RandomAttack(req) => self.random_attack(client_id, req),
        }
    }

    fn player_for(&self, client_id: ClientId) -> Result<Player, GameError> {
        self.clients
            .player_of(client_id)
            .and_then(|id| self.users.player(id))
            .cloned()
            .ok_or(GameError::NotRegistered)
    }

    /// The connection's player, which must be the one named in the request.
    fn acting_player(&self, client_id: ClientId, named: PlayerId) -> Result<PlayerId, GameError> {
        let player = self.player_for(client_id)?;
        if player.id != named {
            return Err(GameError::PlayerMismatch);
        }
        Ok(player.id)
    }

    fn register(&mut self, client_id: ClientId, req: RegisterRequest) {
        let mut abandoned = None;
        let reply = match self.users.login_or_create(&req.name, &req.password) {
            Ok(player) => {
                abandoned = self
                    .clients
                    .bind(client_id, player.id)
                    .filter(|prev| *prev != player.id);
                RegisterReply {
                    name: player.display_name,
                    index: Some(player.id),
                    error: false,
                    error_text: String::new(),
                }
            }
            Err(e) => {
                debug!("registration of {} refused: {}", req.name, e);
                RegisterReply {
                    name: req.name,
                    index: None,
                    error: true,
                    error_text: e.to_string(),
                }
            }
        };
        // the connection switched players; drop the old one's rooms if it is gone
        let lobby_changed = abandoned.is_some_and(|prev| {
            !self.clients.is_connected(prev) && self.matchmaker.leave(prev)
        });
        let accepted = !reply.error;
        self.clients
            .send_to_client(client_id, &Event::Registered(reply));
        if accepted {
            self.clients.send_to_client(
                client_id,
                &Event::update_room(&self.matchmaker.list_waiting_rooms()),
            );
            self.clients.send_to_client(
                client_id,
                &Event::UpdateWinners(self.leaderboard.standings()),
            );
        }
        if lobby_changed {
            debug!("connection {} re-registered, dropped the previous player's rooms", client_id);
            self.broadcast_rooms();
        }
    }

    fn on_room_view(&mut self, view: RoomView) {
        if let RoomView::Filled(room) = view {
            let mut seats = room.occupants.into_iter();
            if let (Some(a), Some(b)) = (seats.next(), seats.next()) {
                let ids = [a.id, b.id];
                let session_id = self.sessions.create_session(a, b);
                for id in ids {
                    self.clients.send_to_player(
                        id,
                        &Event::CreateGame {
                            id_game: session_id,
                            id_player: id,
                        },
                    );
                }
            }
        }
        self.broadcast_rooms();
    }

    fn broadcast_rooms(&self) {
        let rooms = self.matchmaker.list_waiting_rooms();
        self.clients.send_to_all(&Event::update_room(&rooms));
    }

    fn add_ships(&mut self, client_id: ClientId, req: AddShipsRequest) -> Result<(), GameError> {
        let player_id = self.acting_player(client_id, req.index_player)?;
        let ships: Vec<Ship> = req.ships.into_iter().map(Ship::from).collect();
        let readiness = self.sessions.submit_ships(req.game_id, player_id, &ships)?;
        let TurnReadiness::BothPlaced { last_placed } = readiness else {
            debug!("game {} waits for the second fleet", req.game_id);
            return Ok(());
        };
        let first = self
            .turns
            .on_both_placed(&mut self.sessions, req.game_id, last_placed)?;

        let session = self
            .sessions
            .get_session(req.game_id)
            .ok_or(GameError::SessionNotFound)?;
        let ids = session.player_ids();
        for id in ids {
            let ships = session.board_of(id)?.ships();
            self.clients
                .send_to_player(id, &Event::start_game(&ships, id));
        }
        self.clients.send_to_players(
            &ids,
            &Event::Turn {
                current_player: first,
            },
        );
        Ok(())
    }

    fn attack(&mut self, client_id: ClientId, req: AttackRequest) -> Result<(), GameError> {
        let player_id = self.acting_player(client_id, req.index_player)?;
        let report = self.turns.attack(
            &mut self.sessions,
            req.game_id,
            player_id,
            Cell::new(req.x, req.y),
        )?;
        self.announce(req.game_id, report)
    }

    fn random_attack(&mut self, client_id: ClientId, req: RandomAttackRequest) -> Result<(), GameError> {
        let player_id = self.acting_player(client_id, req.index_player)?;
        let report = self
            .turns
            .random_attack(&mut self.sessions, req.game_id, player_id)?;
        self.announce(req.game_id, report)
    }

    fn announce(&mut self, session_id: SessionId, report: AttackReport) -> Result<(), GameError> {
        let session = self
            .sessions
            .get_session(session_id)
            .ok_or(GameError::SessionNotFound)?;
        let ids = session.player_ids();
        self.clients.send_to_players(
            &ids,
            &Event::Attack {
                position: report.cell,
                current_player: report.shooter,
                status: report.outcome,
            },
        );

        match report.next {
            NextTurn::Continue(holder) => {
                self.clients.send_to_players(
                    &ids,
                    &Event::Turn {
                        current_player: holder,
                    },
                );
            }
            NextTurn::Finished { winner } => {
                let winner_name = session.seat(winner)?.player.display_name.clone();
                self.clients
                    .send_to_players(&ids, &Event::Finish { win_player: winner });
                let wins = self.leaderboard.record_win(&winner_name);
                info!("{} now has {} win(s)", winner_name, wins);
                self.clients
                    .send_to_all(&Event::UpdateWinners(self.leaderboard.standings()));
                self.sessions.remove_session(session_id);
            }
        }
        Ok(())
    }
}
