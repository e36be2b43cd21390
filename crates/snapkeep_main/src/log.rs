use std::path::PathBuf;

use tracing_appender::non_blocking::WorkerGuard;

/// Keeps the non-blocking writer alive for the lifetime of the process.
pub struct Guard(#[allow(dead_code)] WorkerGuard);

/// Initializes JSON file logging. The filter is taken from `SNAPKEEP_LOG`
/// when set, otherwise everything at info and above is recorded.
pub fn init_tracing(log_path: PathBuf) -> anyhow::Result<Guard> {
    let append = tracing_appender::rolling::daily(log_path, "snapkeep.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(append);

    tracing_subscriber::fmt()
        .json()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_env("SNAPKEEP_LOG")
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("snapkeep=info")),
        )
        .with_timer(tracing_subscriber::fmt::time::uptime())
        .with_target(true)
        .with_ansi(false)
        .with_writer(non_blocking)
        .init();

    Ok(Guard(guard))
}
