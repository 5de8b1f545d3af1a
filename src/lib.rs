mod bitboard;
mod board;
pub mod broadcast;
mod common;
pub mod config;
pub mod connection;
mod identity;
mod leaderboard;
mod logging;
pub mod matchmaker;
mod player;
pub mod protocol;
pub mod server;
pub mod session;
mod ship;
pub mod transport;
pub mod turn;

pub use bitboard::{BitBoard, BitBoardError, MaskWord};
pub use board::*;
pub use broadcast::{Broadcaster, ClientId};
pub use common::*;
pub use config::*;
pub use connection::serve_connection;
pub use identity::UserDirectory;
pub use leaderboard::{Leaderboard, WinnerEntry};
pub use logging::init_logging;
pub use matchmaker::{Matchmaker, Room, RoomId, RoomView};
pub use player::*;
pub use protocol::{Command, DecodeError, Envelope, Event};
pub use server::{GameServer, ServerCommand, ServerHandle};
pub use session::{Phase, Seat, Session, SessionId, SessionRegistry, TurnReadiness, TurnState};
pub use ship::*;
pub use transport::in_memory::InMemoryTransport;
pub use transport::ws::WsTransport;
pub use transport::Transport;
pub use turn::{AttackReport, NextTurn, TurnCoordinator};
