//! featuregate - configuration-driven feature toggles over HTTP
//!
//! Entry point for the featuregate daemon. Responsible for:
//! - Loading configuration from file or environment variables
//! - Building the toggle registry and serving the API
//! - Reloading configuration on SIGHUP
//! - Handling graceful shutdown via SIGINT

use anyhow::Result;
use featuregate_common::SysMessage;
use featuregate_config::AppConfig;
mod app;
use app::App;
use log::info;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let argv: Vec<String> = std::env::args().collect();

    // Load configuration from file if provided, otherwise use defaults/environment variables
    let config = match argv.len() {
        1 => AppConfig::new()?,
        _ => AppConfig::from_file(&argv[1])?,
    };
    let app = App::new(config)?;

    let shutdown = app.update_channel();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("featuregate shutting down...");
            shutdown.send(SysMessage::Shutdown).ok();
        }
    });

    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        let reload = app.update_channel();
        let mut hangup = signal(SignalKind::hangup())?;
        tokio::spawn(async move {
            while hangup.recv().await.is_some() {
                reload.send(SysMessage::Reload).ok();
            }
        });
    }

    println!(".:: Starting featuregate ::.");
    app.run().await?;
    println!(".:: featuregate Stopped. Goodbye ::.");

    Ok(())
}
