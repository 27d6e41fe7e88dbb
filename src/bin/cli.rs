use clap::{ArgAction, Parser};
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::metadata::LevelFilter;

use paletteviz::canvas::save_canvas;
use paletteviz::*;

#[derive(Parser)]
#[command(author, version, about)]
struct Cli {
    /// Path to palette file (.json, .ron, .yaml or .yml), or '-' to read JSON from stdin.
    input: PathBuf,
    /// Directory to write one PNG per palette into.
    ///
    /// With --sheet, the path of the single output image instead (extension must be PNG or JPEG).
    output: PathBuf,
    /// Dimensions (in pixels) of each palette's plane.
    #[arg(short, long, num_args = 2, default_values_t = [480, 480])]
    #[arg(value_names = ["WIDTH", "HEIGHT"])]
    dims: Vec<u32>,
    /// Stack every palette into one image.
    #[arg(short, long)]
    sheet: bool,
    /// Write only the plane, without the title and step summary.
    #[arg(short, long, conflicts_with = "sheet")]
    bare: bool,
    /// Also write a JSON report of every palette's stops to this path.
    #[arg(short, long, value_name = "PATH")]
    report: Option<PathBuf>,
    /// Log verbosity: -v = info, -vv = debug, -vvv = trace.
    #[arg(short, long, action = ArgAction::Count)]
    verbosity: u8,
}

impl Cli {
    fn render_config(&self) -> RenderConfig {
        RenderConfig {
            width: self.dims[0],
            height: self.dims[1],
            ..RenderConfig::default()
        }
    }

    fn level_filter(&self) -> LevelFilter {
        match self.verbosity {
            0 => LevelFilter::WARN,
            1 => LevelFilter::INFO,
            2 => LevelFilter::DEBUG,
            _ => LevelFilter::TRACE,
        }
    }

    fn read_input(&self) -> Result<PaletteSet, VizError> {
        if self.input.as_os_str() == "-" {
            let mut src = String::new();
            std::io::stdin().read_to_string(&mut src)?;
            Ok(PaletteSet::from_json(&src)?)
        } else {
            PaletteSet::from_file(&self.input)
        }
    }
}

/// File name for a palette's image, keeping only portable characters.
fn file_name(title: &str) -> String {
    let stem: String = title
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect();
    format!("{stem}.png")
}

fn write_blocks(viz: &Visualization, dir: &Path, bare: bool) -> Result<(), VizError> {
    std::fs::create_dir_all(dir)?;
    for block in &viz.blocks {
        let path = dir.join(file_name(&block.title));
        if bare {
            save_canvas(&block.canvas, &path)?;
        } else {
            save_canvas(&block.to_image()?, &path)?;
        }
    }
    Ok(())
}

fn write_report(viz: &Visualization, path: &Path) -> Result<(), VizError> {
    let file = std::fs::File::create(path)?;
    serde_json::to_writer_pretty(std::io::BufWriter::new(file), &viz.report())
        .map_err(VizError::ReportError)
}

fn run() -> Result<(), VizError> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .without_time()
        .with_max_level(cli.level_filter())
        .init();

    let set = cli.read_input()?;
    if set.is_empty() {
        return Err(VizError::NothingToRender);
    }

    println!("Rendering {} palettes...", set.len());

    let before_run = std::time::Instant::now();

    let viz = Visualization::render(&set, &cli.render_config())?;

    if cli.sheet {
        save_canvas(&viz.to_sheet()?, &cli.output)?;
    } else {
        write_blocks(&viz, &cli.output, cli.bare)?;
    }

    if let Some(report) = &cli.report {
        write_report(&viz, report)?;
    }

    let dur = before_run.elapsed();

    for block in &viz.blocks {
        println!("{}: {}", block.title, block.summary);
    }

    println!(
        "Completed! Rendered in {}.{:03} seconds. Output written to '{}'",
        dur.as_secs(),
        dur.subsec_millis(),
        cli.output.display()
    );

    Ok(())
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
