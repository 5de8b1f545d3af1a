//! Grid dimensions, fleet limits and server defaults.

/// Width and height of every board.
pub const BOARD_SIZE: usize = 10;

/// Number of cells on a board.
pub const CELL_COUNT: usize = BOARD_SIZE * BOARD_SIZE;

/// Shortest ship accepted on a board.
pub const MIN_SHIP_LENGTH: usize = 1;

/// Longest ship accepted on a board.
pub const MAX_SHIP_LENGTH: usize = 4;

/// Address the server listens on when none is given.
pub const DEFAULT_BIND: &str = "0.0.0.0:3000";

/// Environment variable holding the log level filter.
pub const LOG_ENV: &str = "BATTLESHIP_LOG";

/// Runtime settings for a server instance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub bind: String,
    /// Fixes the RNG used for random attacks.
    pub seed: Option<u64>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND.to_string(),
            seed: None,
        }
    }
}

impl ServerConfig {
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::default()
        }
    }
}
