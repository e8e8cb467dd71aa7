use std::sync::Once;

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

static INIT: Once = Once::new();

/// Installs the global subscriber. `RUST_LOG` wins over `default_filter`.
///
/// Safe to call more than once; later calls do nothing.
pub fn init_tracing(default_filter: &str) {
  INIT.call_once(|| {
    let env_filter =
      EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    // another subscriber may already be installed (tests)
    let _ = tracing_subscriber::registry().with(env_filter).with(fmt::layer()).try_init();
  });
}
