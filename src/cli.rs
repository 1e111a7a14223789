use crate::config::load_config;
use crate::fonts::FontSet;
use crate::layout_dump::write_layout_dump;
use crate::parser::parse_tree;
use crate::render::write_output_svg;
use crate::render_tree_svg;
use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::io::{self, Read};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(
    name = "dtr",
    version,
    about = "Render a tiered decision-tree diagram from a JSON definition"
)]
pub struct Args {
    /// Definition file (.json / .json5) or '-' for stdin
    #[arg(short = 'i', long = "input")]
    pub input: PathBuf,

    /// Output file (png/svg)
    #[arg(short = 'o', long = "output")]
    pub output: PathBuf,

    /// Resolution written into the PNG metadata [default: 150]
    #[arg(long = "dpi")]
    pub dpi: Option<u32>,

    /// Output format. Inferred from the output extension if omitted.
    #[arg(short = 'e', long = "format", value_enum)]
    pub format: Option<OutputFormat>,

    /// Config JSON file (layout constants, tier colors, fonts)
    #[arg(short = 'c', long = "config")]
    pub config: Option<PathBuf>,

    /// Measure labels with the built-in width table instead of font files
    #[arg(long = "fast-text")]
    pub fast_text: bool,

    /// Also write the computed geometry as JSON
    #[arg(long = "dump-layout")]
    pub dump_layout: Option<PathBuf>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Svg,
    Png,
}

impl OutputFormat {
    fn from_path(path: &Path) -> Self {
        let is_svg = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|ext| ext.eq_ignore_ascii_case("svg"))
            .unwrap_or(false);
        if is_svg { Self::Svg } else { Self::Png }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderSummary {
    pub output: PathBuf,
    pub format: OutputFormat,
    pub width: u32,
    pub height: u32,
    pub dpi: u32,
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    let summary = execute(&args)?;
    println!(
        "Saved {}  ({}x{} px, {} DPI)",
        summary.output.display(),
        summary.width,
        summary.height,
        summary.dpi
    );
    Ok(())
}

/// Everything `run` does except argument parsing and reporting. Nothing is
/// written unless the definition builds.
pub fn execute(args: &Args) -> Result<RenderSummary> {
    let mut config = load_config(args.config.as_deref())?;
    if let Some(dpi) = args.dpi {
        config.render.dpi = dpi;
    }
    if args.fast_text {
        config.layout.fast_text_metrics = true;
    }

    let input = read_input(&args.input)?;
    let tree = parse_tree(&input)?;
    let fonts = FontSet::resolve(&config.fonts);
    let rendered = render_tree_svg(&tree, &config, &fonts);
    let (width, height) = rendered.size();

    let format = args
        .format
        .unwrap_or_else(|| OutputFormat::from_path(&args.output));
    match format {
        OutputFormat::Svg => write_output_svg(&rendered.svg, &args.output)?,
        OutputFormat::Png => write_png(&rendered.svg, &args.output, config.render.dpi, &fonts)?,
    }
    tracing::info!(output = %args.output.display(), width, height, "wrote diagram");

    if let Some(path) = &args.dump_layout {
        write_layout_dump(path, &rendered.layout)?;
    }

    Ok(RenderSummary {
        output: args.output.clone(),
        format,
        width,
        height,
        dpi: config.render.dpi,
    })
}

#[cfg(feature = "png")]
fn write_png(svg: &str, output: &Path, dpi: u32, fonts: &FontSet) -> Result<()> {
    crate::render::write_output_png(svg, output, dpi, fonts)?;
    Ok(())
}

#[cfg(not(feature = "png"))]
fn write_png(_svg: &str, _output: &Path, _dpi: u32, _fonts: &FontSet) -> Result<()> {
    Err(anyhow::anyhow!(
        "PNG output requires the `png` feature; use --format svg"
    ))
}

fn read_input(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        return Ok(buf);
    }
    Ok(std::fs::read_to_string(path)?)
}
