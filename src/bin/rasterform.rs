use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use rasterform::{Engine, FieldSize, PRESETS, PixelField, RenderConfig, presets};

#[derive(Parser, Debug)]
#[command(name = "rasterform", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a single field as a PNG.
    Frame(FrameArgs),
    /// Render an animated PNG sequence driven by the animation clock.
    Animate(AnimateArgs),
    /// List the built-in formula presets.
    Presets(PresetsArgs),
}

#[derive(Parser, Debug)]
struct FrameArgs {
    #[command(flatten)]
    source: ConfigSource,

    /// Animation time value for this frame.
    #[arg(long, default_value_t = 1)]
    t: i64,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct AnimateArgs {
    #[command(flatten)]
    source: ConfigSource,

    /// Number of frames to render.
    #[arg(long, default_value_t = 40)]
    frames: u32,

    /// Output directory for frame_NNNN.png files.
    #[arg(long)]
    out_dir: PathBuf,
}

#[derive(Parser, Debug)]
struct ConfigSource {
    /// Render config JSON (formulas, channel ops, size).
    #[arg(long = "in", conflicts_with = "preset")]
    in_path: Option<PathBuf>,

    /// Built-in preset name (alternative to --in).
    #[arg(long)]
    preset: Option<String>,

    /// Square field side: 256, 512, or 640.
    #[arg(long)]
    size: Option<u32>,
}

#[derive(Parser, Debug)]
struct PresetsArgs {
    /// Emit the preset table as JSON.
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Frame(args) => cmd_frame(args),
        Command::Animate(args) => cmd_animate(args),
        Command::Presets(args) => cmd_presets(args),
    }
}

fn load_config(source: &ConfigSource) -> anyhow::Result<RenderConfig> {
    let mut config = match (&source.in_path, &source.preset) {
        (Some(path), _) => read_config_json(path)?,
        (None, Some(name)) => {
            let preset = presets::find(name).with_context(|| {
                format!("unknown preset '{name}' (try `rasterform presets`)")
            })?;
            RenderConfig {
                formulas: preset.formula_set(),
                ..RenderConfig::default()
            }
        }
        (None, None) => anyhow::bail!("either --in or --preset is required"),
    };

    if let Some(side) = source.size {
        config.size = FieldSize::new(side)?;
    }

    // Malformed formulas would silently render as zeros; at the CLI
    // boundary that is a user error, so fail loudly up front.
    config
        .formulas
        .compile()
        .context("invalid formula in config")?;

    Ok(config)
}

fn read_config_json(path: &Path) -> anyhow::Result<RenderConfig> {
    let f = File::open(path).with_context(|| format!("open config '{}'", path.display()))?;
    let r = BufReader::new(f);
    let config: RenderConfig = serde_json::from_reader(r).context("parse config JSON")?;
    Ok(config)
}

fn cmd_frame(args: FrameArgs) -> anyhow::Result<()> {
    let config = load_config(&args.source)?;
    let compiled = config.formulas.compile()?;
    let field = rasterform::render_field(config.size.get(), &compiled, config.ops, args.t);
    write_png(&field, &args.out)?;
    println!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_animate(args: AnimateArgs) -> anyhow::Result<()> {
    let config = load_config(&args.source)?;
    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("create output dir '{}'", args.out_dir.display()))?;

    let mut engine = Engine::from_config(&config);
    engine.set_animate(true);

    // Drive the clock with synthetic timestamps one interval apart; the
    // gate opens once per step, so every tick yields a frame.
    let mut now = 0u64;
    for index in 0..args.frames {
        let field = engine
            .tick(now)
            .context("animation gate unexpectedly closed")?;
        let path = args.out_dir.join(format!("frame_{index:04}.png"));
        write_png(&field, &path)?;
        now += rasterform::clock::FRAME_INTERVAL_MS;
    }
    println!("wrote {} frames to {}", args.frames, args.out_dir.display());
    Ok(())
}

fn cmd_presets(args: PresetsArgs) -> anyhow::Result<()> {
    if args.json {
        println!("{}", serde_json::to_string_pretty(PRESETS)?);
        return Ok(());
    }
    for preset in PRESETS {
        println!("{}", preset.name);
        println!("  x: {}", display_formula(preset.x));
        println!("  r: {}", display_formula(preset.r));
        println!("  g: {}", display_formula(preset.g));
        println!("  b: {}", display_formula(preset.b));
    }
    Ok(())
}

fn display_formula(src: &str) -> &str {
    if src.trim().is_empty() { "(empty)" } else { src }
}

fn write_png(field: &PixelField, path: &Path) -> anyhow::Result<()> {
    let side = field.side();
    let img = image::RgbaImage::from_raw(side, side, field.to_rgba8())
        .ok_or_else(|| anyhow::anyhow!("pixel field bytes do not match its dimensions"))?;
    img.save(path)
        .with_context(|| format!("write PNG '{}'", path.display()))?;
    Ok(())
}
