use std::env::{self, VarError};

use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;

pub const LOG_ENV: &str = "FLOATX_LOG";

struct LoggerConfig {
    filter: Result<String, VarError>,
}

impl LoggerConfig {
    fn from_env() -> Self {
        let filter = env::var(LOG_ENV);
        Self { filter }
    }
}

/// Installs a hierarchical stderr subscriber filtered by `FLOATX_LOG`.
///
/// Does nothing when the variable is unset or a global subscriber is
/// already installed.
pub fn init_tracing() {
    let cfg = LoggerConfig::from_env();
    let filter = match cfg.filter {
        Ok(filter) => EnvFilter::new(filter),
        _ => return,
    };
    let layer = tracing_tree::HierarchicalLayer::default().with_writer(std::io::stderr);
    let subscriber = tracing_subscriber::Registry::default()
        .with(filter)
        .with(layer);
    if tracing::subscriber::set_global_default(subscriber).is_err() {
        tracing::debug!("global tracing subscriber already set");
    }
}
