//! crates/logging/src/subscriber.rs
//! Formatting subscriber installation.

use std::error::Error;

use tracing_subscriber::EnvFilter;

/// Filter directives used when the caller does not supply any.
pub const DEFAULT_DIRECTIVES: &str = "sha2=info";

/// Install a global formatting subscriber filtered by `directives`.
///
/// Directives use the `EnvFilter` syntax, e.g. `"sha2::dispatch=debug"`.
/// Fails if the directives do not parse or a global subscriber is already
/// installed.
pub fn try_init(directives: &str) -> Result<(), Box<dyn Error + Send + Sync + 'static>> {
    let filter = EnvFilter::try_new(directives)?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
}

/// Install a global formatting subscriber with [`DEFAULT_DIRECTIVES`],
/// ignoring the error when one is already installed.
pub fn init() {
    let _ = try_init(DEFAULT_DIRECTIVES);
}
