//! In-memory account store issuing player identities.

use std::collections::HashMap;

use log::info;

use crate::common::GameError;
use crate::player::{Player, PlayerId};

struct Account {
    player: Player,
    password: String,
}

/// Registers players by name; the first registration sets the password.
#[derive(Default)]
pub struct UserDirectory {
    accounts: HashMap<String, Account>,
    names: HashMap<PlayerId, String>,
}

impl UserDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the existing player for `name` when the password matches, or
    /// creates a new one when the name is unknown.
    pub fn login_or_create(&mut self, name: &str, password: &str) -> Result<Player, GameError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(GameError::InvalidName);
        }
        if let Some(account) = self.accounts.get(name) {
            if account.password == password {
                return Ok(account.player.clone());
            }
            return Err(GameError::WrongPassword);
        }
        let player = Player::new(name);
        info!("registered player {} as {}", name, player.id);
        self.names.insert(player.id, name.to_string());
        self.accounts.insert(
            name.to_string(),
            Account {
                player: player.clone(),
                password: password.to_string(),
            },
        );
        Ok(player)
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        let name = self.names.get(&id)?;
        self.accounts.get(name).map(|a| &a.player)
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}
