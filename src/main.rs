use std::io::{self, IsTerminal, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use image::RgbImage;
use log::{info, warn};

use bvatar::{Bvatar, Config, ContactSheet, Discipline, display, encode_png};

/// Generate a bvatar (a randomart avatar).
///
/// Without TEXT or --hash a random bvatar is generated.
#[derive(Parser)]
#[command(name = "bvatar", version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// bvatar source text, SHA-1 hashed before walking
    text: Option<String>,

    /// Hex encoded SHA-1 hash to use directly instead of hashing TEXT
    #[arg(long, conflicts_with = "text")]
    hash: Option<String>,

    /// Output ASCII rather than a bitmap image
    #[arg(long)]
    ascii: bool,

    /// A lighter ASCII alternative
    #[arg(long)]
    spaced: bool,

    /// Don't add a border around the ASCII art
    #[arg(long)]
    no_border: bool,

    /// Color saturation (0 for greyscale)
    #[arg(long)]
    saturation: Option<f64>,

    /// Fill the background with the lightest shade of the bvatar's color
    #[arg(long)]
    fill: bool,

    /// Busier cells get lighter instead of darker
    #[arg(long)]
    invert: bool,

    /// Actual size of each pixel
    #[arg(long = "px-size")]
    px_size: Option<u32>,

    #[command(flatten)]
    shared: SharedArgs,
}

#[derive(clap::Args)]
struct SharedArgs {
    /// Bits per side (3 gives an 8x8 bvatar)
    #[arg(long, global = true)]
    bits: Option<u32>,

    /// Generate horizontally mirrored bvatars
    #[arg(long, global = true)]
    mirror: bool,

    /// Walk strictly diagonally
    #[arg(long, global = true)]
    no_king: bool,

    /// Stop walking once the digest's bits run out instead of cycling
    #[arg(long, global = true)]
    finite: bool,

    /// JSON config file; flags override its values
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Write the PNG here instead of stdout or a window
    #[arg(short, long, global = true)]
    output: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Command {
    /// Render a grid of example bvatars
    Sheet {
        /// Pixel multiplier
        #[arg(long, default_value_t = bvatar::sheet::DEFAULT_MULTIPLIER)]
        multiplier: u32,

        /// One sheet column per character
        #[arg(long, default_value = bvatar::sheet::DEFAULT_COLUMNS)]
        columns: String,

        /// One sheet row per character
        #[arg(long, default_value = bvatar::sheet::DEFAULT_ROWS)]
        rows: String,
    },
}

impl Cli {
    fn resolve_config(&self) -> anyhow::Result<Config> {
        let mut config = match &self.shared.config {
            Some(path) => Config::load(path)
                .with_context(|| format!("failed to load config {}", path.display()))?,
            None => Config::default(),
        };

        if let Some(bits) = self.shared.bits {
            config.walk.bits = bits;
        }
        config.walk.mirror |= self.shared.mirror;
        if self.shared.no_king {
            config.walk.king = false;
        }
        if self.shared.finite {
            config.walk.discipline = Discipline::Finite;
        }

        config.ascii.spaced |= self.spaced;
        if self.no_border {
            config.ascii.border = false;
        }

        if let Some(saturation) = self.saturation {
            config.raster.saturation = saturation;
        }
        config.raster.fill |= self.fill;
        config.raster.invert |= self.invert;
        if let Some(px_size) = self.px_size {
            config.raster.pixel_scale = px_size;
        }

        config.validate()?;
        Ok(config)
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let config = cli.resolve_config()?;

    match &cli.command {
        Some(Command::Sheet {
            multiplier,
            columns,
            rows,
        }) => {
            let sheet = ContactSheet {
                columns: columns.clone(),
                rows: rows.clone(),
                multiplier: *multiplier,
            };
            info!("rendering contact sheet for {:?}", sheet.labels());
            let img = sheet
                .render(&config.walk, &config.raster)
                .context("failed to render contact sheet")?;
            emit_image(&img, cli.shared.output.as_deref(), "bvatar sheet")
        }
        None => run_single(&cli, &config),
    }
}

fn run_single(cli: &Cli, config: &Config) -> anyhow::Result<()> {
    let bvatar = match (&cli.hash, &cli.text) {
        (Some(hash), _) => Bvatar::from_hex(hash, config.walk).context("invalid --hash")?,
        (None, Some(text)) => Bvatar::from_source(text.as_bytes(), config.walk)?,
        (None, None) => Bvatar::random(&mut rand::thread_rng(), config.walk)?,
    };
    info!("digest {}", bvatar.digest());

    if cli.ascii {
        return print_ascii(&bvatar, config);
    }

    let img = bvatar.image(&config.raster)?;
    let title = format!("bvatar {}", bvatar.digest());
    if cli.shared.output.is_none() && io::stdout().is_terminal() {
        if let Err(e) = display::show(&img, &title) {
            warn!("could not open a window ({e}), falling back to ASCII");
            return print_ascii(&bvatar, config);
        }
        return Ok(());
    }
    emit_image(&img, cli.shared.output.as_deref(), &title)
}

fn print_ascii(bvatar: &Bvatar, config: &Config) -> anyhow::Result<()> {
    let mut stdout = io::stdout().lock();
    stdout.write_all(bvatar.ascii(&config.ascii).as_bytes())?;
    stdout.flush()?;
    Ok(())
}

/// Save to `output`, else show a window on a terminal, else PNG to stdout.
fn emit_image(img: &RgbImage, output: Option<&Path>, title: &str) -> anyhow::Result<()> {
    if let Some(path) = output {
        img.save(path)
            .with_context(|| format!("failed to write {}", path.display()))?;
        info!("wrote {}", path.display());
        return Ok(());
    }

    if io::stdout().is_terminal() {
        return display::show(img, title).context("failed to open a window");
    }

    let bytes = encode_png(img)?;
    let mut stdout = io::stdout().lock();
    stdout.write_all(&bytes)?;
    stdout.flush()?;
    Ok(())
}
