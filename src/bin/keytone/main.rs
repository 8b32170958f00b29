//! keytone - play a sine tone from the computer keyboard
//!
//! Run with: cargo run -- --help

mod app;
mod audio;
mod keymap;
mod ui;

use std::{fs::File, path::PathBuf, sync::Mutex};

use clap::Parser;
use color_eyre::eyre::{Result as EyreResult, WrapErr};
use keytone::{DEFAULT_BUFFER_PERIODS, DEFAULT_PERIOD_FRAMES};
use tracing_subscriber::EnvFilter;

use app::App;

#[derive(Debug, Parser)]
#[command(name = "keytone", version, about = "Keyboard-driven sine tone")]
struct Args {
    /// Frames generated per producer cycle (clamped to what the device supports)
    #[arg(long, default_value_t = DEFAULT_PERIOD_FRAMES)]
    period: usize,

    /// Ring buffer size, in periods
    #[arg(long, default_value_t = DEFAULT_BUFFER_PERIODS)]
    buffer_periods: usize,

    /// Starting note index (A4 = 57)
    #[arg(long, default_value_t = keytone::sequencing::notes::A4)]
    note: u8,

    /// Write logs here; the terminal belongs to the UI so they are dropped otherwise
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> EyreResult<()> {
    color_eyre::install()?;
    let args = Args::parse();
    init_logging(args.log_file.as_ref())?;

    // Device trouble is fatal before the terminal is touched.
    let app = App::new(args.period, args.buffer_periods, args.note)?;

    let mut terminal = ratatui::init();
    let res = app.run(&mut terminal);
    ratatui::restore();
    res
}

fn init_logging(path: Option<&PathBuf>) -> EyreResult<()> {
    let Some(path) = path else {
        return Ok(());
    };
    let file = File::create(path)
        .wrap_err_with(|| format!("failed to create log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("keytone=info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}
