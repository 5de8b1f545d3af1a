//! Fan-out of events to open client connections.
//!
//! Each connection owns an unbounded outbound channel, so queuing a frame
//! never waits on the network. A closed connection is skipped and logged;
//! nothing is retried.

use std::collections::BTreeMap;

use log::{debug, error, warn};
use tokio::sync::mpsc::UnboundedSender;

use crate::player::PlayerId;
use crate::protocol::Event;

/// Server-assigned connection identifier.
pub type ClientId = u64;

struct Client {
    player: Option<PlayerId>,
    outbound: UnboundedSender<String>,
}

#[derive(Default)]
pub struct Broadcaster {
    clients: BTreeMap<ClientId, Client>,
}

impl Broadcaster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, client_id: ClientId, outbound: UnboundedSender<String>) {
        self.clients.insert(
            client_id,
            Client {
                player: None,
                outbound,
            },
        );
    }

    /// Associate a connection with the player who registered on it.
    /// Returns the player the connection was bound to before, if any.
    pub fn bind(&mut self, client_id: ClientId, player_id: PlayerId) -> Option<PlayerId> {
        let client = self.clients.get_mut(&client_id)?;
        client.player.replace(player_id)
    }

    /// Forget a connection. Returns the player it was bound to.
    pub fn unregister(&mut self, client_id: ClientId) -> Option<PlayerId> {
        self.clients.remove(&client_id).and_then(|c| c.player)
    }

    pub fn player_of(&self, client_id: ClientId) -> Option<PlayerId> {
        self.clients.get(&client_id).and_then(|c| c.player)
    }

    /// Whether any open connection belongs to `player_id`.
    pub fn is_connected(&self, player_id: PlayerId) -> bool {
        self.clients
            .values()
            .any(|c| c.player == Some(player_id) && !c.outbound.is_closed())
    }

    pub fn len(&self) -> usize {
        self.clients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
    }

    /// Reply to one connection only.
    pub fn send_to_client(&self, client_id: ClientId, event: &Event) -> usize {
        let Some(frame) = encode(event) else {
            return 0;
        };
        match self.clients.get(&client_id) {
            Some(client) => deliver(client_id, client, &frame) as usize,
            None => 0,
        }
    }

    /// One frame per open connection of `player_id`.
    pub fn send_to_player(&self, player_id: PlayerId, event: &Event) -> usize {
        self.send_where(event, |c| c.player == Some(player_id))
    }

    /// One frame per open connection of any of `players`.
    pub fn send_to_players(&self, players: &[PlayerId], event: &Event) -> usize {
        self.send_where(event, |c| c.player.is_some_and(|p| players.contains(&p)))
    }

    /// One frame per open connection.
    pub fn send_to_all(&self, event: &Event) -> usize {
        self.send_where(event, |_| true)
    }

    fn send_where(&self, event: &Event, filter: impl Fn(&Client) -> bool) -> usize {
        let Some(frame) = encode(event) else {
            return 0;
        };
        let delivered = self
            .clients
            .iter()
            .filter(|(_, c)| filter(*c))
            .filter(|(id, c)| deliver(**id, *c, &frame))
            .count();
        debug!("{} delivered to {} connection(s)", event.kind(), delivered);
        delivered
    }
}

fn encode(event: &Event) -> Option<String> {
    match event.encode() {
        Ok(frame) => Some(frame),
        Err(e) => {
            error!("failed to encode {} event: {}", event.kind(), e);
            None
        }
    }
}

fn deliver(client_id: ClientId, client: &Client, frame: &str) -> bool {
    if client.outbound.send(frame.to_string()).is_err() {
        warn!("connection {} is closed, dropping frame", client_id);
        return false;
    }
    true
}
