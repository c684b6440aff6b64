use tracing::{warn, Level};
use tracing_subscriber::FmtSubscriber;

/// Installs a console subscriber printing events up to `level`.
///
/// Does nothing but warn if a global subscriber is already set.
pub fn init_logging(level: Level) {
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        warn!(cause = %e, "logging already initialized");
    }
}
