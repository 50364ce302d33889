#![forbid(unsafe_code)]

//! Logging setup.
//!
//! Every crate in the workspace logs through `tracing` macros. Installing a
//! subscriber is left to the embedding application; [`init`] is a convenience
//! for hosts that want JSON lines filtered by `HEATGRID_LOG`.

/// Environment variable holding the `EnvFilter` directive.
pub const LOG_ENV: &str = "HEATGRID_LOG";

/// Default directive when `HEATGRID_LOG` is unset.
pub const DEFAULT_DIRECTIVE: &str = "warn";

/// Install a global JSON subscriber.
///
/// Returns `false` if a global subscriber was already installed.
#[cfg(feature = "tracing-json")]
pub fn init() -> bool {
    use tracing_subscriber::EnvFilter;

    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE));
    tracing_subscriber::fmt()
        .json()
        .with_env_filter(filter)
        .with_target(true)
        .try_init()
        .is_ok()
}
