//! Tracing setup, grounded on the teacher's `main.rs` registry/EnvFilter
//! pattern (`tracing_subscriber::registry().with(EnvFilter).with(fmt layer)`).

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Installs the global tracing subscriber. Safe to call once at process
/// startup; a second call returns `Err` from `try_init`, which callers in
/// tests ignore.
pub fn init_tracing() {
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "outbreak_engine=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}
