use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use sha2::Digest as _;

#[derive(Parser, Debug)]
#[command(name = "arcbadge", version)]
struct Cli {
    /// Log more (repeat for trace output). `RUST_LOG` takes precedence.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a badge PNG from an avatar image.
    Render(RenderArgs),
    /// Print the computed arc and glyph layout as JSON.
    Metrics(MetricsArgs),
}

#[derive(Parser, Debug)]
struct BadgeArgs {
    /// Status text drawn along the arc.
    #[arg(long, default_value = arcbadge::DEFAULT_TEXT)]
    text: String,

    /// Side length of the square output in pixels.
    #[arg(long, default_value_t = arcbadge::DEFAULT_SURFACE_SIZE)]
    size: u32,

    /// Font file to use instead of the system bold sans-serif.
    #[arg(long)]
    font: Option<PathBuf>,

    /// JSON file overriding badge style constants.
    #[arg(long)]
    style: Option<PathBuf>,

    /// Print the resolved font family and SHA-256 of its bytes.
    #[arg(long)]
    dump_font: bool,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    #[command(flatten)]
    badge: BadgeArgs,

    /// Avatar image (PNG, JPEG, ...).
    #[arg(long)]
    image: PathBuf,

    /// Accent color of the arc (any CSS color).
    #[arg(long, default_value = arcbadge::DEFAULT_COLOR)]
    color: String,

    /// Output PNG path.
    #[arg(long, default_value = arcbadge::DOWNLOAD_FILENAME)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct MetricsArgs {
    #[command(flatten)]
    badge: BadgeArgs,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Metrics(args) => cmd_metrics(args),
    }
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_style(path: Option<&Path>) -> anyhow::Result<arcbadge::BadgeStyle> {
    Ok(match path {
        Some(p) => arcbadge::BadgeStyle::from_path(p)?,
        None => arcbadge::BadgeStyle::default(),
    })
}

fn load_font(args: &BadgeArgs) -> anyhow::Result<arcbadge::BadgeFont> {
    let font = match &args.font {
        Some(path) => arcbadge::BadgeFont::from_path(path)?,
        None => arcbadge::BadgeFont::system_sans_bold()
            .context("no --font given and no system sans-serif font found")?,
    };
    if args.dump_font {
        eprintln!("font diagnostics:");
        eprintln!("  family: {}", font.family_name());
        eprintln!("  sha256: {}", sha256_hex(font.font_bytes()));
    }
    Ok(font)
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let style = load_style(args.badge.style.as_deref())?;
    let mut font = load_font(&args.badge)?;

    let image = arcbadge::load_image(&args.image)
        .with_context(|| format!("load avatar '{}'", args.image.display()))?;
    let color = arcbadge::parse_color(&args.color)?;

    let mut surface = arcbadge::BadgeSurface::new(args.badge.size)?;
    let input = arcbadge::BadgeInput {
        image: &image,
        text: &args.badge.text,
        color,
    };
    arcbadge::render_badge(&mut surface, &input, &style, &mut font)?;
    surface.save_png(&args.out)?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_metrics(args: MetricsArgs) -> anyhow::Result<()> {
    let style = load_style(args.badge.style.as_deref())?;
    let mut font = load_font(&args.badge)?;

    let layout = arcbadge::layout_badge(args.badge.size, &args.badge.text, &style, &mut font)?;
    println!("{}", serde_json::to_string_pretty(&layout)?);
    Ok(())
}

fn sha256_hex(bytes: &[u8]) -> String {
    let digest = sha2::Sha256::digest(bytes);
    let mut out = String::with_capacity(digest.len() * 2);
    for b in digest {
        out.push_str(&format!("{:02x}", b));
    }
    out
}
