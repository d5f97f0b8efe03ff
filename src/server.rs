//! Tracing setup and the HTTP server for `jobhound serve`.

use std::path::Path;
use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;
use tracing_appender::non_blocking::NonBlocking;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use jobhound_config::Config;

use crate::adapters::{jobhound_dir, ChromeDriverLauncher};
use crate::web::{self, WebState};

/// Initialize tracing with console and file output.
///
/// Console lines go to stderr so table and JSON output on stdout stay clean.
/// Log files are written to ~/.jobhound/logs/ with daily rotation. The
/// console layer is always installed; a log directory that cannot be
/// opened only drops the file layer, and its error is returned.
pub(crate) fn init_tracing() -> Result<(), Box<dyn std::error::Error>> {
    let file_writer = open_log_writer(&jobhound_dir().join("logs"));
    let (file_layer, file_error) = match file_writer {
        Ok(writer) => (Some(fmt::layer().with_writer(writer).with_ansi(false)), None),
        Err(e) => (None, Some(e)),
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_target(true)
                .with_ansi(true)
                .with_writer(std::io::stderr),
        )
        .with(file_layer)
        .try_init()?;

    match file_error {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

fn open_log_writer(log_dir: &Path) -> Result<NonBlocking, Box<dyn std::error::Error>> {
    std::fs::create_dir_all(log_dir)?;

    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix("jobhound")
        .filename_suffix("log")
        .max_log_files(30)
        .build(log_dir)?;

    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    // The guard flushes the file writer on drop; keep it for the whole run.
    static GUARD: std::sync::OnceLock<tracing_appender::non_blocking::WorkerGuard> =
        std::sync::OnceLock::new();
    let _ = GUARD.set(guard);

    Ok(non_blocking)
}

/// Run the web interface in the foreground until the process is stopped.
pub(crate) async fn run_server(
    host: String,
    port: u16,
    config: Config,
) -> Result<(), Box<dyn std::error::Error>> {
    info!("Starting jobhound v{}", env!("CARGO_PKG_VERSION"));

    let state = Arc::new(WebState::new(Arc::new(ChromeDriverLauncher), config));
    let app = web::router(state);

    let listener = bind(&host, port).await?;
    info!("Search form available at http://{}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}

/// Bind `host:port`; `host` may be a name such as `localhost`.
async fn bind(host: &str, port: u16) -> std::io::Result<TcpListener> {
    TcpListener::bind((host, port)).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_bind_accepts_host_name() {
        let listener = bind("localhost", 0).await.unwrap();
        assert!(listener.local_addr().unwrap().ip().is_loopback());
    }

    #[tokio::test]
    async fn test_bind_accepts_ip() {
        let listener = bind("127.0.0.1", 0).await.unwrap();
        assert_ne!(listener.local_addr().unwrap().port(), 0);
    }

    #[test]
    fn test_log_writer_in_new_directory() {
        let dir = tempfile::tempdir().unwrap();
        let log_dir = dir.path().join("logs");
        assert!(open_log_writer(&log_dir).is_ok());
        assert!(log_dir.is_dir());
    }

    #[test]
    fn test_log_writer_fails_when_path_is_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("logs");
        std::fs::write(&blocker, "not a directory").unwrap();
        assert!(open_log_writer(&blocker.join("nested")).is_err());
    }
}
