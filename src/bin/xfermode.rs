use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use xfermode::{BlendMode, DispatchOpts};

#[derive(Parser, Debug)]
#[command(name = "xfermode", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List blend modes and whether a batched kernel is available for each.
    Modes(ModesArgs),
    /// Composite one PNG onto another.
    Blend(BlendArgs),
}

#[derive(Parser, Debug)]
struct OptsArgs {
    /// Dispatch options JSON.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Withhold the batched non-separable modes (hard_light, overlay, darken, lighten).
    #[arg(long, default_value_t = false)]
    legacy_non_separable: bool,
}

#[derive(Parser, Debug)]
struct ModesArgs {
    #[command(flatten)]
    opts: OptsArgs,
}

#[derive(Parser, Debug)]
struct BlendArgs {
    /// Source image (straight-alpha RGBA PNG).
    #[arg(long)]
    src: PathBuf,

    /// Destination image, same size as the source.
    #[arg(long)]
    dst: PathBuf,

    /// Blend mode name, e.g. `src_over`, `screen`, `hard_light`.
    #[arg(long)]
    mode: BlendMode,

    /// Optional coverage mask; its luma is used per pixel.
    #[arg(long)]
    coverage: Option<PathBuf>,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Split the work across the rayon pool.
    #[arg(long, default_value_t = false)]
    parallel: bool,

    /// Pixels per parallel chunk.
    #[arg(long, default_value_t = 16 * 1024)]
    chunk_pixels: usize,

    /// Fail if any composited pixel has a color channel above its alpha.
    #[arg(long, default_value_t = false)]
    check: bool,

    #[command(flatten)]
    opts: OptsArgs,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::Modes(args) => cmd_modes(args),
        Command::Blend(args) => cmd_blend(args),
    }
}

fn load_opts(args: &OptsArgs) -> anyhow::Result<DispatchOpts> {
    let mut opts = match &args.config {
        Some(path) => DispatchOpts::from_path(path)?,
        None => DispatchOpts::default(),
    };
    opts = opts.with_env_overrides();
    if args.legacy_non_separable {
        opts = opts.with_legacy_non_separable_modes(true);
    }
    Ok(opts)
}

fn cmd_modes(args: ModesArgs) -> anyhow::Result<()> {
    let opts = load_opts(&args.opts)?;
    for mode in BlendMode::ALL {
        let status = match xfermode::dispatch(mode, &opts) {
            Some(p) if p.has_coverage_override() => "batched (aa override)",
            Some(_) => "batched",
            None => "unsupported",
        };
        println!("{:>2}  {:<12} {status}", mode.index(), mode.name());
    }
    Ok(())
}

fn cmd_blend(args: BlendArgs) -> anyhow::Result<()> {
    let opts = load_opts(&args.opts)?;
    let processor = xfermode::dispatch(args.mode, &opts)
        .with_context(|| format!("no batched kernel for blend mode '{}'", args.mode))?;

    let src = load_rgba(&args.src)?;
    let dst = load_rgba(&args.dst)?;
    if src.dimensions() != dst.dimensions() {
        anyhow::bail!(
            "source is {:?} but destination is {:?}",
            src.dimensions(),
            dst.dimensions()
        );
    }
    let (width, height) = dst.dimensions();

    let coverage = match &args.coverage {
        Some(path) => {
            let mask = image::open(path)
                .with_context(|| format!("read coverage '{}'", path.display()))?
                .to_luma8();
            if mask.dimensions() != (width, height) {
                anyhow::bail!(
                    "coverage is {:?} but destination is {:?}",
                    mask.dimensions(),
                    (width, height)
                );
            }
            Some(mask.into_raw())
        }
        None => None,
    };

    let mut src_bytes = src.into_raw();
    let mut dst_bytes = dst.into_raw();
    xfermode::premultiply_in_place(&mut src_bytes)?;
    xfermode::premultiply_in_place(&mut dst_bytes)?;
    let src_px = xfermode::pixels_from_bytes(&src_bytes)?;
    let mut dst_px = xfermode::pixels_from_bytes(&dst_bytes)?;

    if args.parallel {
        processor.process_par(
            &mut dst_px,
            &src_px,
            coverage.as_deref(),
            args.chunk_pixels,
        )?;
    } else {
        processor.process(&mut dst_px, &src_px, coverage.as_deref())?;
    }

    if args.check {
        check_premultiplied(&dst_px, width)?;
        eprintln!("checked {} pixels: all premultiplied", dst_px.len());
    }

    let mut out = xfermode::pixels_to_bytes(&dst_px);
    xfermode::unpremultiply_in_place(&mut out)?;

    if let Some(parent) = args.out.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    image::save_buffer_with_format(
        &args.out,
        &out,
        width,
        height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn check_premultiplied(pixels: &[xfermode::PremulRgba8], width: u32) -> anyhow::Result<()> {
    let bad = pixels.iter().filter(|&&p| !xfermode::is_premultiplied(p)).count();
    if let Some(i) = pixels.iter().position(|&p| !xfermode::is_premultiplied(p)) {
        let w = width.max(1) as usize;
        anyhow::bail!(
            "{bad} pixels break the premultiplied invariant; first at ({}, {}): {:?}",
            i % w,
            i / w,
            pixels[i]
        );
    }
    Ok(())
}

fn load_rgba(path: &Path) -> anyhow::Result<image::RgbaImage> {
    Ok(image::open(path)
        .with_context(|| format!("read image '{}'", path.display()))?
        .to_rgba8())
}
