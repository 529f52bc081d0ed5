//! Logging setup. The terminal belongs to the UI, so logs only go to a file.

use std::path::Path;

use color_eyre::eyre::{eyre, Result as EyreResult};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

/// Install a file logger when `log_file` is given.
///
/// `RUST_LOG` overrides the default filter. The returned guard flushes the
/// writer when dropped, so keep it alive for the whole run.
pub fn init(log_file: Option<&Path>, verbose: bool) -> EyreResult<Option<WorkerGuard>> {
    let Some(path) = log_file else {
        return Ok(None);
    };

    let default_filter = if verbose {
        "klaviatur=debug,warn"
    } else {
        "klaviatur=info,warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let file_name = path
        .file_name()
        .ok_or_else(|| eyre!("log file path has no file name: {}", path.display()))?;
    let dir = path.parent().filter(|p| !p.as_os_str().is_empty()).unwrap_or(Path::new("."));

    let appender = tracing_appender::rolling::never(dir, file_name);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(true).with_writer(writer).with_ansi(false))
        .try_init()?;

    Ok(Some(guard))
}
