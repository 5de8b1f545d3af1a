use env_logger::Env;

use crate::config::LOG_ENV;

/// Initialize logging with a level taken from the `BATTLESHIP_LOG` environment variable.
/// Defaults to `info` if the variable is not set. Calling it twice is harmless.
pub fn init_logging() {
    let _ = env_logger::Builder::from_env(Env::new().filter_or(LOG_ENV, "info"))
        .format_target(false)
        .try_init();
}
