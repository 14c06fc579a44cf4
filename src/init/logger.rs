use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;

/// Installs the global subscriber. The returned guard must live as long as the process.
///
/// `LOG_LEVEL` sets the max level (default `info`), `LOG_FORMAT=json` switches to JSON lines
/// and `LOG_DIR` writes a daily rolling file instead of stdout.
pub fn init_tracing() -> anyhow::Result<WorkerGuard> {
    let level: Level = match std::env::var("LOG_LEVEL") {
        Ok(raw) => raw
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid LOG_LEVEL {raw:?}: {e}"))?,
        Err(_) => Level::INFO,
    };
    let json = std::env::var("LOG_FORMAT").is_ok_and(|format| format.eq_ignore_ascii_case("json"));
    let log_dir = std::env::var("LOG_DIR").ok();

    let (writer, guard) = match &log_dir {
        Some(dir) => tracing_appender::non_blocking(tracing_appender::rolling::daily(
            dir,
            "comments-api.log",
        )),
        None => tracing_appender::non_blocking(std::io::stdout()),
    };

    let builder = tracing_subscriber::fmt()
        .with_writer(writer)
        .with_max_level(level)
        .with_ansi(log_dir.is_none());

    let result = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
    result.map_err(|e| anyhow::anyhow!("Could not initialize tracing: {e}"))?;

    Ok(guard)
}
