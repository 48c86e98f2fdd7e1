use std::path::{Path, PathBuf};

use adframe::{Color, Compositor, FsImageLoader, ImageSource, RenderInputs, TemplateDescriptor};
use anyhow::Context as _;
use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "adframe", version)]
struct Cli {
    /// Log per-layer progress to stderr.
    #[arg(long, short, global = true, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render one ad frame as a PNG.
    Render(RenderArgs),
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Template JSON.
    #[arg(long)]
    template: PathBuf,

    /// Caption text (defaults to the template's).
    #[arg(long)]
    caption: Option<String>,

    /// CTA label (defaults to the template's).
    #[arg(long)]
    cta: Option<String>,

    /// Background color, e.g. `#0369A1`.
    #[arg(long, value_parser = parse_color)]
    background: Option<Color>,

    /// Photo to place in the mask region (file path or `data:` URL).
    #[arg(long)]
    upload: Option<String>,

    /// Directory template image references resolve against (defaults to the template's directory).
    #[arg(long)]
    assets: Option<PathBuf>,

    /// Font file for caption and CTA (defaults to the template's `font`).
    #[arg(long)]
    font: Option<PathBuf>,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Downscale the PNG to this square size.
    #[arg(long)]
    preview_size: Option<u32>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .with_target(false)
        .init();
}

fn parse_color(s: &str) -> Result<Color, String> {
    s.parse::<Color>().map_err(|e| e.to_string())
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let template = TemplateDescriptor::from_path(&args.template)?;
    let template_dir = args
        .template
        .parent()
        .unwrap_or_else(|| Path::new("."))
        .to_path_buf();

    let font_path = match (&args.font, &template.font) {
        (Some(path), _) => path.clone(),
        (None, Some(rel)) => template_dir.join(rel),
        (None, None) => anyhow::bail!("no font: pass --font or set `font` in the template"),
    };
    let font_bytes = std::fs::read(&font_path)
        .with_context(|| format!("read font '{}'", font_path.display()))?;

    let assets_root = args.assets.clone().unwrap_or(template_dir);
    let mut inputs = RenderInputs::from_template(&template);
    if let Some(caption) = args.caption {
        inputs = inputs.with_caption(caption);
    }
    if let Some(cta) = args.cta {
        inputs = inputs.with_cta(cta);
    }
    if let Some(color) = args.background {
        inputs = inputs.with_background(color);
    }
    if let Some(upload) = args.upload.as_deref() {
        inputs = inputs.with_upload(Some(upload_source(upload)?));
    }

    let compositor = Compositor::new(template, font_bytes, FsImageLoader::new(assets_root))?;
    let report = pollster::block_on(compositor.render(inputs));
    for omitted in &report.omitted {
        eprintln!("omitted {}: {}", omitted.layer.name(), omitted.reason);
    }

    let frame = compositor.frame();
    let mut image = image::RgbaImage::from_raw(frame.width, frame.height, frame.to_display_rgba8())
        .context("frame buffer does not match its dimensions")?;
    if let Some(size) = args.preview_size {
        anyhow::ensure!(size > 0, "--preview-size must be > 0");
        image = image::imageops::resize(&image, size, size, image::imageops::FilterType::Triangle);
    }

    if let Some(parent) = args.out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    image::save_buffer_with_format(
        &args.out,
        image.as_raw(),
        image.width(),
        image.height(),
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn upload_source(upload: &str) -> anyhow::Result<ImageSource> {
    if upload.starts_with("data:") {
        return Ok(ImageSource::parse(upload)?);
    }
    let bytes =
        std::fs::read(upload).with_context(|| format!("read upload '{upload}'"))?;
    Ok(ImageSource::encoded(bytes))
}
