//! ET Light - space-themed financial assistant dashboard
//!
//! Main entry point. Pass `--script <path>` to drive the page from a
//! session script.

use anyhow::{Context, Result};
use eframe::egui;
use etlight::config::AppConfig;
use etlight::script::SessionScript;
use etlight::ui::EtLightApp;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "etlight=debug,info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting ET Light");

    let config = AppConfig::resolve().context("failed to resolve configuration")?;

    let script = match script_path_from_args()? {
        Some(path) => Some(SessionScript::load(&path).context("failed to load session script")?),
        None => None,
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.window.width, config.window.height])
            .with_min_inner_size([360.0, 600.0])
            .with_title("ET Light"),
        ..Default::default()
    };

    eframe::run_native(
        "ET Light",
        options,
        Box::new(move |cc| Ok(Box::new(EtLightApp::new(cc, &config, script)))),
    )
    .map_err(|e| anyhow::anyhow!("eframe error: {e}"))
}

/// Parse `--script <path>` from the command line
fn script_path_from_args() -> Result<Option<String>> {
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        if arg == "--script" {
            let path = args
                .next()
                .context("--script requires a path argument")?;
            return Ok(Some(path));
        }
    }
    Ok(None)
}
