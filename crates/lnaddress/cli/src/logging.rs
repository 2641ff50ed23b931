use std::{fs::OpenOptions, path::Path, sync::Arc, sync::Mutex};

use lnaddress_core::{Logger, NoopLogger, TracingLogger};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Installs the requested sinks and returns the logger the client should use.
///
/// Without `--verbose` or `--logfile` nothing is installed and logging is disabled.
pub fn init_logging(
    verbose: bool,
    logfile: Option<&Path>,
    filter: &str,
) -> anyhow::Result<Arc<dyn Logger>> {
    if !verbose && logfile.is_none() {
        return Ok(Arc::new(NoopLogger));
    }

    let stderr_layer = verbose.then(|| fmt::layer().with_writer(std::io::stderr));
    let file_layer = match logfile {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            Some(
                fmt::layer()
                    .with_ansi(false)
                    .with_line_number(true)
                    .with_writer(Mutex::new(file)),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(EnvFilter::new(filter))
        .with(stderr_layer)
        .with(file_layer)
        .try_init()?;

    Ok(Arc::new(TracingLogger))
}
