use clap::Parser;
use dual_rasterizer::app;
use dual_rasterizer::io::config::Config;
use log::info;

/// Headless driver of the dual-backend renderer.
#[derive(Parser, Debug)]
#[command(name = "dual-rasterizer")]
#[command(about = "CPU software rasterizer with a pluggable hardware backend")]
struct Cli {
    /// Scene configuration (TOML)
    #[arg(short, long, value_name = "FILE")]
    config: Option<String>,

    /// Overrides the number of frames to render
    #[arg(short, long)]
    frames: Option<usize>,

    /// Overrides the output image path
    #[arg(short, long, value_name = "FILE")]
    output: Option<String>,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .format_timestamp(None)
        .format_level(true)
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => {
            info!("Loading configuration: {}", path);
            Config::load(path)?
        }
        None => {
            info!("No configuration given, using defaults");
            Config::default()
        }
    };

    if let Some(frames) = cli.frames {
        config.render.frames = frames;
    }
    if let Some(output) = cli.output {
        config.render.output = output;
    }

    app::run(&config)
}
