use clap::{Parser, Subcommand};
use dialgauge::{Gauge, Rect, Scene};
use gauge::config;
use gauge::events::{self, AppEvent};
use gauge::gui::app::AppModel;
use gauge::sys::{SOCKET_PATH, runtime};
use relm4::prelude::*;
use std::io::Write;
use std::os::unix::net::UnixStream;

#[derive(Parser, Debug)]
#[command(name = "gauge", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Loop a short progress script in the window
    #[arg(long)]
    demo: bool,
}

#[derive(Subcommand, Debug, Clone)]
enum Commands {
    /// Set the progress of the running gauge.
    Progress { value: f64 },
    /// Animate the running gauge to a new progress.
    Animate {
        value: f64,
        /// Duration in seconds (defaults to the configured duration)
        #[arg(short = 'd', long)]
        duration: Option<String>,
    },
    /// Move the limit dial of the running gauge.
    Limit { value: f64 },
    /// Make the running gauge re-read its config file.
    Reload,
    /// Write the default config file and print its path.
    Init,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let event = match cli.command {
        None => return run(cli.demo),
        Some(Commands::Init) => {
            let path = config::write_default_config()?;
            println!("{}", path.display());
            return Ok(());
        }
        Some(Commands::Progress { value }) => AppEvent::SetProgress(value),
        Some(Commands::Animate { value, duration }) => AppEvent::AnimateProgress {
            progress: value,
            duration: duration.as_deref().map(events::parse_duration).transpose()?,
        },
        Some(Commands::Limit { value }) => AppEvent::SetLimit(value),
        Some(Commands::Reload) => AppEvent::ConfigReload,
    };

    send_command(&event)
}

fn run(demo: bool) -> anyhow::Result<()> {
    let config = config::load_or_default();
    let bounds = Rect::new(
        0.0,
        0.0,
        config.window.width as f64,
        config.window.height as f64,
    );
    let gauge = Gauge::new(
        config.gauge.clone(),
        bounds,
        Scene::new(config.animation.easing),
    )?;

    let (tx, rx) = async_channel::bounded(32);

    // Start Background Services
    runtime::start_background_services(tx, demo);

    let app = RelmApp::new("org.dialgauge.gauge");

    app.run::<AppModel>((gauge, config, rx));
    Ok(())
}

fn send_command(event: &AppEvent) -> anyhow::Result<()> {
    let mut stream = UnixStream::connect(SOCKET_PATH).map_err(|e| {
        anyhow::anyhow!(
            "Failed to connect to gauge at {}: {}. Is gauge running?",
            SOCKET_PATH,
            e
        )
    })?;

    writeln!(stream, "{}", event)?;
    Ok(())
}
