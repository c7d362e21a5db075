pub mod time;

use tracing_subscriber::EnvFilter;

use crate::config::settings::{LogTimezone, LoggingConfig};

/// `RUST_LOG` wins over `[logging].level`.
pub fn init(cfg: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cfg.level.as_str()));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    match cfg.timezone {
        LogTimezone::Utc => builder.with_timer(time::UtcTimer).init(),
        LogTimezone::Beijing => builder.with_timer(time::BeijingTimer).init(),
    }
}
