use std::fs::OpenOptions;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer, Registry};

/// Logging options for [`init_logging`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
    /// Default level when `RUST_LOG` is not set
    pub level: String,
    /// Emit JSON lines instead of human readable text
    pub json: bool,
    /// Append to this file instead of writing to stderr
    pub file: Option<PathBuf>,
}

/// Initialize structured logging
///
/// Log level can be controlled via the `RUST_LOG` environment variable, which takes
/// precedence over `settings.level`. Examples:
/// - `RUST_LOG=debug` - Debug level and above
/// - `RUST_LOG=netmon=trace` - Trace level for netmon only
///
/// The frame is repainted on stdout every tick, so logs go to stderr or to a file.
pub fn init_logging(settings: &LogSettings) -> io::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(settings.level.to_lowercase()));

    let layer = match &settings.file {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            output_layer(settings.json, Mutex::new(file), false)
        }
        None => output_layer(settings.json, io::stderr, true),
    };

    tracing_subscriber::registry().with(layer).with(filter).init();
    Ok(())
}

fn output_layer<W>(json: bool, writer: W, ansi: bool) -> Box<dyn Layer<Registry> + Send + Sync>
where
    W: for<'w> fmt::MakeWriter<'w> + Send + Sync + 'static,
{
    if json {
        fmt::layer()
            .json()
            .with_target(false)
            .with_writer(writer)
            .boxed()
    } else {
        fmt::layer()
            .with_target(false)
            .with_line_number(true)
            .with_file(true)
            .with_ansi(ansi)
            .with_writer(writer)
            .boxed()
    }
}
