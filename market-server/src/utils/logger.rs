//! Logging infrastructure
//!
//! Structured logging setup for development (stdout) and production
//! (stdout + daily rolling file).

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,tower_http=info"))
}

/// Initialize stdout logging
pub fn init_logger() {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_target(false)
        .init();
}

/// Initialize logging with a daily rolling file in `log_dir`.
///
/// The returned guard must be kept alive for the lifetime of the process or
/// buffered log lines are lost.
pub fn init_logger_with_file(log_dir: &str) -> std::io::Result<WorkerGuard> {
    std::fs::create_dir_all(log_dir)?;
    let file_appender = tracing_appender::rolling::daily(log_dir, "market-server.log");
    let (writer, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_target(false)
        .with_writer(writer)
        .with_ansi(false)
        .init();

    Ok(guard)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_logger_creates_directory() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("logs");
        // The global subscriber can only be installed once per process, so
        // this is the single test that calls init
        let guard = init_logger_with_file(nested.to_str().unwrap()).unwrap();
        assert!(nested.exists());
        drop(guard);
    }
}
