use std::path::Path;
use std::sync::Arc;

use clap::ValueEnum;
use tracing_subscriber::fmt::writer::BoxMakeWriter;

#[derive(Copy, Clone, Debug, ValueEnum)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn as_filter(self) -> tracing::level_filters::LevelFilter {
        match self {
            LogLevel::Error => tracing::level_filters::LevelFilter::ERROR,
            LogLevel::Warn => tracing::level_filters::LevelFilter::WARN,
            LogLevel::Info => tracing::level_filters::LevelFilter::INFO,
            LogLevel::Debug => tracing::level_filters::LevelFilter::DEBUG,
            LogLevel::Trace => tracing::level_filters::LevelFilter::TRACE,
        }
    }
}

/// Initialize logging to `log_file` in append mode, falling back to stderr
/// if the file cannot be opened. stdout is never a log sink: it carries the
/// framed protocol stream and a single stray log line would corrupt it.
pub fn init_logging(format: LogFormat, level: LogLevel, log_file: &Path) {
    let writer = match std::fs::OpenOptions::new()
        .append(true)
        .create(true)
        .open(log_file)
    {
        Ok(file) => BoxMakeWriter::new(Arc::new(file)),
        Err(err) => {
            eprintln!(
                "unable to open log file {}: {err}; logging to stderr",
                log_file.display()
            );
            BoxMakeWriter::new(std::io::stderr)
        }
    };

    let builder = tracing_subscriber::fmt()
        .with_writer(writer)
        .with_max_level(level.as_filter())
        .with_ansi(false)
        .with_target(false);

    match format {
        LogFormat::Text => {
            let _ = builder.try_init();
        }
        LogFormat::Json => {
            let _ = builder.json().try_init();
        }
    }
}
