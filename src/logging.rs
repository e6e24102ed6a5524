//! File-based logging module for Second Brain
//!
//! This module sets up tracing-based logging that writes to a file instead of stdout,
//! since the application uses a TUI that occupies the terminal.

use std::future::Future;
use std::path::Path;

use tracing::{Instrument, Subscriber};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{
    fmt::{self, format::FmtSpan, MakeWriter},
    layer::SubscriberExt,
    registry::LookupSpan,
    util::SubscriberInitExt,
    EnvFilter, Layer,
};

const LOG_DIR: &str = ".logs";
const LOG_FILE_PREFIX: &str = "second-brain";
const DEFAULT_FILTER: &str = "second_brain=debug,reqwest=info,warn";

/// Initialize the logging system.
///
/// Logs are written to `.logs/second-brain.YYYY-MM-DD.log` with daily rotation.
/// The log level can be controlled via the `RUST_LOG` environment variable.
///
/// Default log levels:
/// - `second_brain` modules: DEBUG
/// - `reqwest`: INFO
/// - Other crates: WARN
pub fn init_logging() -> anyhow::Result<()> {
    let log_dir = Path::new(LOG_DIR);
    if !log_dir.exists() {
        std::fs::create_dir_all(log_dir)?;
    }

    let file_appender = RollingFileAppender::new(Rotation::DAILY, LOG_DIR, LOG_FILE_PREFIX);

    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    // The guard flushes on drop; it has to live as long as the process
    Box::leak(Box::new(guard));

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::registry()
        .with(filter)
        .with(file_layer(non_blocking))
        .init();

    tracing::info!("Logging initialized - logs written to {}/", LOG_DIR);

    Ok(())
}

/// Plain-text layer; closing an `api` span writes how long the call took
fn file_layer<S, W>(writer: W) -> impl Layer<S>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    fmt::layer()
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(false)
        .with_thread_names(false)
        .with_span_events(FmtSpan::CLOSE)
}

/// Run one backend call inside an `api` span.
///
/// Everything logged by `call` carries the operation name. The HTTP status is
/// recorded on the span once a response arrives (see [`record_status`]).
pub async fn api_call<T, E, F>(operation: &'static str, call: F) -> Result<T, E>
where
    E: std::fmt::Display,
    F: Future<Output = Result<T, E>>,
{
    let span = tracing::info_span!("api", operation, status = tracing::field::Empty);
    let result = call.instrument(span.clone()).await;
    span.in_scope(|| crate::log_api_result!(operation, result));
    result
}

/// Attach the response status to the enclosing `api` span
pub fn record_status(status: u16) {
    tracing::Span::current().record("status", status);
}

/// Log a backend API request and its result
#[macro_export]
macro_rules! log_api_result {
    ($operation:expr, $result:expr) => {
        match &$result {
            Ok(_) => tracing::info!(operation = $operation, "API request successful"),
            Err(e) => tracing::error!(operation = $operation, error = %e, "API request failed"),
        }
    };
}

/// Log a backend API request with additional context
#[macro_export]
macro_rules! log_api_request {
    ($operation:expr) => {
        tracing::debug!(operation = $operation, "API request started");
    };
    ($operation:expr, $($field:tt)*) => {
        tracing::debug!(operation = $operation, $($field)*, "API request started");
    };
}

#[cfg(test)]
mod tests {
    use std::io;
    use std::sync::{Arc, Mutex};

    use reqwest::StatusCode;
    use tracing_subscriber::layer::SubscriberExt;

    use super::*;
    use crate::error::ApiError;

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl Captured {
        fn text(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    fn capture() -> (Captured, tracing::subscriber::DefaultGuard) {
        let captured = Captured::default();
        let writer = captured.clone();
        let subscriber = tracing_subscriber::registry()
            .with(EnvFilter::new("trace"))
            .with(file_layer(move || writer.clone()));
        (captured, tracing::subscriber::set_default(subscriber))
    }

    #[tokio::test]
    async fn call_logs_carry_operation_and_timing() {
        let (captured, _guard) = capture();

        let result = api_call("list_content", async {
            record_status(200);
            tracing::debug!(count = 2, "Content list fetched");
            Ok::<_, ApiError>(2)
        })
        .await;

        assert_eq!(result.unwrap(), 2);
        let text = captured.text();
        assert!(text.contains("api{operation=\"list_content\" status=200}"), "{text}");
        assert!(text.contains("Content list fetched"));
        assert!(text.contains("API request successful"));
        assert!(text.contains("close time.busy"));
    }

    #[tokio::test]
    async fn failed_call_is_logged_with_its_status() {
        let (captured, _guard) = capture();

        let result: Result<(), ApiError> = api_call("delete_content", async {
            record_status(404);
            Err(ApiError::Status {
                operation: "delete_content",
                status: StatusCode::NOT_FOUND,
            })
        })
        .await;

        assert!(result.is_err());
        let text = captured.text();
        assert!(text.contains("operation=\"delete_content\" status=404"), "{text}");
        assert!(text.contains("API request failed"));
    }
}
