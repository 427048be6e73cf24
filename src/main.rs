//! splitwm
//!
//! A minimal X11 tiling window manager. Every new window splits the focused
//! window in half along its longer side; a closing window is absorbed by a
//! neighbor sharing its edge.

mod config;
mod error;
mod shared;
mod wm;
mod x11_async;

use anyhow::{Context, Result, bail};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use wm::WindowManager;
use wm::events::Notification;
use wm::x11::X11Display;
use x11_async::X11EventStream;

const USAGE: &str = "usage: splitwm [--display NAME] [--config PATH]";

/// Command line arguments
#[derive(Debug, Default, PartialEq)]
struct Args {
    display: Option<String>,
    config: Option<PathBuf>,
}

impl Args {
    fn parse(mut args: impl Iterator<Item = String>) -> Result<Self> {
        let mut parsed = Self::default();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--display" | "-d" => {
                    parsed.display = Some(args.next().context("--display needs a value")?);
                }
                "--config" | "-c" => {
                    parsed.config = Some(args.next().context("--config needs a value")?.into());
                }
                "--help" | "-h" => {
                    println!("{USAGE}");
                    std::process::exit(0);
                }
                other => bail!("unknown argument '{other}'\n{USAGE}"),
            }
        }
        Ok(parsed)
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "splitwm=debug,info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting splitwm");

    let args = Args::parse(std::env::args().skip(1))?;

    let config = config::Config::load(args.config.as_deref())
        .context("Failed to load configuration")?;

    let (conn, screen_num) = x11rb::connect(args.display.as_deref())
        .map_err(error::WmError::from)
        .context("Failed to connect to X server")?;
    let conn = Arc::new(conn);
    info!("Connected to X server, screen {}", screen_num);

    let screen = wm::x11::become_wm(&conn, screen_num)?;

    let mut events = X11EventStream::new(conn.clone())
        .context("Failed to initialize X11 event stream")?;

    let existing = wm::x11::existing_windows(&conn, screen.root)?;

    let mut manager = WindowManager::new(X11Display::new(conn), screen, &config);

    info!("Adopting {} existing windows", existing.len());
    for window in existing {
        manager.handle_event(Notification::MapRequest { window });
    }

    use tokio::signal::unix::{SignalKind, signal};
    let mut sigterm = signal(SignalKind::terminate())?;
    let mut sigint = signal(SignalKind::interrupt())?;

    tokio::select! {
        result = manager.run(&mut events) => {
            if let Err(e) = result {
                error!("Event loop failed: {:#}", e);
                return Err(e);
            }
        }
        _ = sigterm.recv() => {
            info!("Received SIGTERM, shutting down");
        }
        _ = sigint.recv() => {
            info!("Received SIGINT, shutting down");
        }
    }

    Ok(())
}
