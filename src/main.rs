//! Lendscore: Lending risk dashboard
//!
//! Main entry point for the terminal application.

use anyhow::Result;
use std::io::IsTerminal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use lendscore::adapters::sanitize::SanitizingMakeWriter;
use lendscore::tui::App;

fn main() -> Result<()> {
    // Logs written to the terminal would corrupt the alternate screen.
    // - interactive TTY: log to a file
    // - non-interactive: log to stdout
    let log_mode = std::env::var("LENDSCORE_LOG_MODE").unwrap_or_else(|_| "auto".to_string());

    let interactive = std::io::stdout().is_terminal();
    let use_file = match log_mode.as_str() {
        "file" => true,
        "stdout" => false,
        // auto
        _ => interactive,
    };

    let (writer, _guard) = if use_file {
        let log_file =
            std::env::var("LENDSCORE_LOG_FILE").unwrap_or_else(|_| "lendscore.log".to_string());

        if let Some(parent) = std::path::Path::new(&log_file).parent() {
            // Best-effort: a missing directory surfaces in the open below.
            let _ = std::fs::create_dir_all(parent);
        }

        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_file)?;
        tracing_appender::non_blocking(file)
    } else {
        tracing_appender::non_blocking(std::io::stdout())
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(SanitizingMakeWriter::new(writer)))
        .init();

    tracing::info!("Starting Lendscore...");

    let mut app = App::new();
    app.run()?;

    tracing::info!("Lendscore shutdown complete.");
    Ok(())
}
