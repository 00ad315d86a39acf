use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use snake_arcade::audio::{AudioAdapter, TerminalBell};
use snake_arcade::game::{FieldSize, GameConfig};
use snake_arcade::modes::{HeadlessMode, HumanMode};
use std::fs::File;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "snake_arcade")]
#[command(version, about = "Grid-based snake arcade game")]
struct Cli {
    /// Game mode
    #[arg(long, default_value = "human")]
    mode: Mode,

    /// JSON config file; missing keys use the defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// Write logs to this file (filtered by RUST_LOG)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Field units per grid cell
    #[arg(long)]
    cell_size: Option<u32>,

    /// Number of apples on the field
    #[arg(long)]
    apples: Option<usize>,

    /// Milliseconds between movement ticks
    #[arg(long)]
    tick_ms: Option<u64>,

    /// Milliseconds between frames
    #[arg(long)]
    frame_ms: Option<u64>,

    /// Seed for apple placement
    #[arg(long)]
    seed: Option<u64>,

    /// Field width (headless mode; the terminal decides in human mode)
    #[arg(long)]
    width: Option<u32>,

    /// Field height (headless mode; the terminal decides in human mode)
    #[arg(long)]
    height: Option<u32>,

    /// Tick limit for headless mode
    #[arg(long, default_value = "1000")]
    ticks: u64,

    /// Disable the terminal bell
    #[arg(long)]
    mute: bool,
}

#[derive(Clone, ValueEnum)]
enum Mode {
    /// Play snake with keyboard controls
    Human,
    /// Run the simulation without a terminal and print a JSON summary
    Headless,
}

impl Cli {
    /// Defaults, then the config file, then command line overrides
    fn game_config(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => GameConfig::load(path)?,
            None => GameConfig::default(),
        };

        if let Some(cell_size) = self.cell_size {
            config.cell_size = cell_size;
        }
        if let Some(apples) = self.apples {
            config.apple_count = apples;
        }
        if let Some(tick_ms) = self.tick_ms {
            config.tick_interval_ms = tick_ms;
        }
        if let Some(frame_ms) = self.frame_ms {
            config.frame_interval_ms = frame_ms;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        config.field = FieldSize::new(
            self.width.unwrap_or(config.field.width),
            self.height.unwrap_or(config.field.height),
        );

        config.validate()?;
        Ok(config)
    }
}

fn init_tracing(log_file: Option<&PathBuf>) -> Result<()> {
    // The terminal belongs to the game, so logs only go to a file
    let Some(path) = log_file else {
        return Ok(());
    };

    let file =
        File::create(path).with_context(|| format!("Failed to create log file {:?}", path))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_file.as_ref())?;

    let mut config = cli.game_config()?;

    match cli.mode {
        Mode::Human => {
            config.field = HumanMode::terminal_field(config.cell_size)?;
            let audio = if cli.mute {
                AudioAdapter::silent()
            } else {
                AudioAdapter::new(Box::new(TerminalBell::new(std::io::stdout())))
            };
            let mut human_mode = HumanMode::new(config, audio);
            human_mode.run().await?;
        }
        Mode::Headless => {
            let mut headless_mode = HeadlessMode::new(config);
            let summary = headless_mode.run(cli.ticks);
            let json =
                serde_json::to_string_pretty(&summary).context("Failed to serialize summary")?;
            println!("{}", json);
        }
    }

    Ok(())
}
