#[cfg(feature = "gui")]
mod app;
#[cfg(feature = "gui")]
mod display;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use phibar::{export, Command, Controls, PaletteBuffer, Settings, StopPool};

#[derive(Parser)]
#[command(name = "phibar")]
#[command(about = "Pick a color and its golden-ratio companions")]
struct Cli {
    /// Settings file (JSON); defaults apply when omitted
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Load a pre-rendered palette PNG instead of generating one
    #[arg(long, global = true)]
    palette: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the interactive picker window
    Run {
        /// Where the E key writes the palette (.gpl or .pal)
        #[arg(short, long, default_value = "phibar.gpl")]
        export: PathBuf,
    },
    /// Write the generated palette as a PNG asset
    Generate {
        #[arg(short, long)]
        output: PathBuf,

        /// Palette width (defaults to the settings value)
        #[arg(long)]
        width: Option<u32>,

        /// Palette height (defaults to the settings value)
        #[arg(long)]
        height: Option<u32>,
    },
    /// Evaluate stops without a window and write them to a palette file
    Export {
        /// Output file; the extension picks GPL or PAL
        #[arg(short, long)]
        output: PathBuf,

        #[arg(long, allow_hyphen_values = true)]
        primary: Option<i32>,

        #[arg(long, allow_hyphen_values = true)]
        distance: Option<i32>,

        #[arg(long)]
        brightness: Option<i32>,

        #[arg(long)]
        stops: Option<usize>,

        /// Extra picker commands applied in order (e.g. "right" "darker")
        #[arg(long = "then", num_args = 1..)]
        then: Vec<String>,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "phibar=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();

    let cli = Cli::parse();
    let settings = load_settings(cli.config.as_deref())?;

    match cli.command.unwrap_or(Commands::Run {
        export: PathBuf::from("phibar.gpl"),
    }) {
        Commands::Run { export } => {
            let palette = load_palette(&settings, cli.palette.as_deref())?;
            run_picker(settings, palette, export)
        },
        Commands::Generate {
            output,
            width,
            height,
        } => {
            let palette = PaletteBuffer::generate(
                width.unwrap_or(settings.width),
                height.unwrap_or(settings.height),
            )?;
            palette.save_png(&output)?;
            Ok(())
        },
        Commands::Export {
            output,
            primary,
            distance,
            brightness,
            stops,
            then,
        } => {
            let palette = load_palette(&settings, cli.palette.as_deref())?;
            let mut config = settings.engine_config();
            let mut controls = Controls::new(settings);

            let overrides = [
                primary.map(Command::SetPrimary),
                distance.map(Command::SetDistance),
                brightness.map(Command::SetBrightness),
                stops.map(Command::SetStops),
            ];
            for command in overrides.into_iter().flatten() {
                controls.apply(&mut config, command);
            }
            for line in &then {
                let command = Command::parse(line)
                    .ok_or_else(|| anyhow::anyhow!("Unknown picker command: {line}"))?;
                controls.apply(&mut config, command);
            }

            let mut pool = StopPool::new(controls.settings().stop_max);
            pool.evaluate(&config, &palette);
            export::write(&output, pool.active(), controls.settings().pal_slots)?;
            println!("{}", pool.copy_text());
            Ok(())
        },
    }
}

fn load_settings(path: Option<&Path>) -> anyhow::Result<Settings> {
    match path {
        Some(path) => {
            let settings = Settings::load(path)?;
            tracing::info!(path = %path.display(), "Loaded settings");
            Ok(settings)
        },
        None => Ok(Settings::default()),
    }
}

/// Load the palette asset if given, otherwise generate it from settings
fn load_palette(settings: &Settings, asset: Option<&Path>) -> anyhow::Result<PaletteBuffer> {
    let palette = match asset {
        Some(path) => PaletteBuffer::load_png(path)?,
        None => PaletteBuffer::generate(settings.width, settings.height)?,
    };
    if (palette.width(), palette.height()) != (settings.width, settings.height) {
        tracing::warn!(
            palette_width = palette.width(),
            palette_height = palette.height(),
            settings_width = settings.width,
            settings_height = settings.height,
            "Palette size differs from settings; sampling is clamped to the palette"
        );
    }
    Ok(palette)
}

#[cfg(feature = "gui")]
fn run_picker(settings: Settings, palette: PaletteBuffer, export: PathBuf) -> anyhow::Result<()> {
    app::run(settings, palette, export)
}

#[cfg(not(feature = "gui"))]
fn run_picker(_settings: Settings, _palette: PaletteBuffer, _export: PathBuf) -> anyhow::Result<()> {
    anyhow::bail!("phibar was built without the `gui` feature; use `generate` or `export`")
}
