use crate::helpers::env_bool;
use crate::LogFlags;
use fleet_catalog_core::{ENV_FLEET_LOG_JSON, ENV_FLEET_LOG_LEVEL};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Installs the stderr subscriber. `FLEET_LOG_LEVEL` wins over the
/// verbosity flags; a second installation attempt is ignored.
pub(crate) fn init_tracing(flags: LogFlags) {
    let default_level = if flags.trace {
        "trace"
    } else if flags.verbose > 0 {
        "debug"
    } else if flags.quiet {
        "error"
    } else {
        "info"
    };
    let filter = std::env::var(ENV_FLEET_LOG_LEVEL)
        .ok()
        .and_then(|level| EnvFilter::try_new(level.trim()).ok())
        .unwrap_or_else(|| EnvFilter::new(default_level));

    let installed = if env_bool(ENV_FLEET_LOG_JSON, false) {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .try_init()
    };
    if installed.is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
}
