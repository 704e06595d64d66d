//! TabNav: drive a bookmarkable panel region from the terminal.
//!
//! Usage: `tabnav [CONFIG] [LOCATION]`
//!
//! Reads commands from stdin (see `help`), prints what the region renders
//! to stdout, and logs to stderr (`RUST_LOG` overrides the filter).

mod app;
mod fetcher;
mod input;
mod page;
mod render;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tabnav_core::{parse_location, Command, Config, InMemoryHistory, NavigationController};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::app::{App, Flow};
use crate::fetcher::FileBodyFetcher;
use crate::page::Page;
use crate::render::TextRenderer;

const DEFAULT_LOCATION: &str = "https://example.com/";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tabnav_core=info,tabnav_cli=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let mut args = std::env::args().skip(1);
    let config_path = args.next().map(PathBuf::from);
    let location = args.next().unwrap_or_else(|| DEFAULT_LOCATION.to_string());

    let config = load_config(config_path.as_deref())?;
    let content_root = resolve_content_dir(&config, config_path.as_deref());
    let location = parse_location(&location)?;
    let panels = config.panel_set()?;
    tracing::info!(
        "starting with {} panels at {location}, content from {}",
        panels.len(),
        content_root.display()
    );

    let page = Page::new(&panels, &config.sticky);
    let controller = NavigationController::new(
        panels,
        config.navigation.clone(),
        InMemoryHistory::new(location),
        TextRenderer::new(),
    );
    let (tx, rx) = mpsc::unbounded_channel::<Command>();
    let fetcher = Arc::new(FileBodyFetcher::new(content_root));
    let app = App::new(controller, fetcher, tx, page);

    run(app, rx).await
}

fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    match path {
        Some(path) => Ok(Config::load(path)?),
        None => {
            tracing::info!("no config given; using built-in defaults");
            Ok(Config::default())
        }
    }
}

/// A relative `content_dir` is taken relative to the config file.
fn resolve_content_dir(config: &Config, config_path: Option<&Path>) -> PathBuf {
    if config.content_dir.is_absolute() {
        return config.content_dir.clone();
    }
    match config_path.and_then(Path::parent) {
        Some(dir) => dir.join(&config.content_dir),
        None => config.content_dir.clone(),
    }
}

async fn run(mut app: App, mut rx: mpsc::UnboundedReceiver<Command>) -> anyhow::Result<()> {
    let mut history_rx = app.controller_mut().subscribe();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    print_lines(app.pump());
    loop {
        tokio::select! {
            line = lines.next_line() => {
                match line? {
                    Some(line) => {
                        if app.handle_line(&line) == Flow::Quit {
                            break;
                        }
                    }
                    None => break,
                }
            }
            Some(event) = history_rx.recv() => {
                app.handle_command(Command::HistoryChanged(event));
            }
            Some(command) = rx.recv() => {
                app.handle_command(command);
            }
        }
        print_lines(app.pump());
    }

    tracing::info!("input closed; shutting down");
    Ok(())
}

fn print_lines(lines: Vec<String>) {
    for line in lines {
        println!("{line}");
    }
}
