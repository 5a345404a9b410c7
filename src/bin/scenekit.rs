use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "scenekit", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a scene to SVG, PNG or PDF.
    Render(RenderArgs),
    /// Check a scene document without rendering it.
    Validate(ValidateArgs),
    /// Render a small opaque PNG preview.
    Thumbnail(ThumbnailArgs),
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Input scene JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output path.
    #[arg(long)]
    out: PathBuf,

    /// Output format; inferred from the output extension when omitted.
    #[arg(long, value_enum)]
    format: Option<FormatChoice>,

    /// PNG scale factor.
    #[arg(long, default_value_t = scenekit::DEFAULT_PNG_SCALE)]
    scale: f64,

    /// Transparent PNG background.
    #[arg(long)]
    transparent: bool,
}

#[derive(Parser, Debug)]
struct ValidateArgs {
    /// Input scene JSON.
    #[arg(long = "in")]
    in_path: PathBuf,
}

#[derive(Parser, Debug)]
struct ThumbnailArgs {
    /// Input scene JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FormatChoice {
    Svg,
    Png,
    Pdf,
}

impl From<FormatChoice> for scenekit::ExportFormat {
    fn from(choice: FormatChoice) -> Self {
        match choice {
            FormatChoice::Svg => Self::Svg,
            FormatChoice::Png => Self::Png,
            FormatChoice::Pdf => Self::Pdf,
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Validate(args) => cmd_validate(args),
        Command::Thumbnail(args) => cmd_thumbnail(args),
    }
}

fn read_scene_json(path: &Path) -> anyhow::Result<scenekit::SceneDocument> {
    let s = std::fs::read_to_string(path)
        .with_context(|| format!("read scene '{}'", path.display()))?;
    let scene = scenekit::SceneDocument::from_json(&s)
        .with_context(|| format!("parse scene '{}'", path.display()))?;
    Ok(scene)
}

fn write_output(path: &Path, bytes: &[u8]) -> anyhow::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(path, bytes).with_context(|| format!("write output '{}'", path.display()))?;
    Ok(())
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let format = match args.format {
        Some(choice) => choice.into(),
        None => args
            .out
            .extension()
            .and_then(|e| e.to_str())
            .and_then(scenekit::ExportFormat::from_extension)
            .with_context(|| {
                format!(
                    "cannot infer format from '{}', pass --format",
                    args.out.display()
                )
            })?,
    };

    let scene = read_scene_json(&args.in_path)?;
    let renderer = scenekit::Renderer::from_env();
    let export = renderer.export(
        &scene,
        format,
        &scenekit::ExportOptions {
            scale: args.scale,
            transparent: args.transparent,
        },
    )?;
    write_output(&args.out, &export.bytes)?;
    println!(
        "wrote {} ({}, {} bytes)",
        args.out.display(),
        format.content_type(),
        export.bytes.len()
    );
    Ok(())
}

fn cmd_validate(args: ValidateArgs) -> anyhow::Result<()> {
    let scene = read_scene_json(&args.in_path)?;
    scene.validate()?;

    let mut counts = std::collections::BTreeMap::<&str, usize>::new();
    for el in &scene.elements {
        *counts.entry(el.kind()).or_default() += 1;
    }
    let summary = counts
        .iter()
        .map(|(kind, n)| format!("{kind}={n}"))
        .collect::<Vec<_>>()
        .join(" ");
    println!(
        "ok: {}x{} canvas, {} elements {}",
        scene.width,
        scene.height,
        scene.elements.len(),
        summary
    );
    Ok(())
}

fn cmd_thumbnail(args: ThumbnailArgs) -> anyhow::Result<()> {
    let scene = read_scene_json(&args.in_path)?;
    let png = scenekit::Renderer::from_env().thumbnail(&scene)?;
    write_output(&args.out, &png)?;
    println!("wrote {} ({} bytes)", args.out.display(), png.len());
    Ok(())
}
