//! Win counts per player name.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WinnerEntry {
    pub name: String,
    pub wins: u32,
}

#[derive(Debug, Default)]
pub struct Leaderboard {
    wins: HashMap<String, u32>,
}

impl Leaderboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_win(&mut self, name: &str) -> u32 {
        let wins = self.wins.entry(name.to_string()).or_insert(0);
        *wins += 1;
        *wins
    }

    pub fn wins_of(&self, name: &str) -> u32 {
        self.wins.get(name).copied().unwrap_or(0)
    }

    /// Most wins first; ties ordered by name.
    pub fn standings(&self) -> Vec<WinnerEntry> {
        let mut entries: Vec<WinnerEntry> = self
            .wins
            .iter()
            .map(|(name, wins)| WinnerEntry {
                name: name.clone(),
                wins: *wins,
            })
            .collect();
        entries.sort_by(|a, b| b.wins.cmp(&a.wins).then_with(|| a.name.cmp(&b.name)));
        entries
    }
}
