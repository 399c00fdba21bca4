use std::{fs, path::PathBuf};

use anyhow::{ensure, Context as _, Result};
use clap::Parser;

use chunk_combo::{grid::Grid, split::split};

/// Split an image into a grid of chunk_<N>.png tiles, numbered row by row.
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Number of columns
    cols: u16,

    /// Number of rows
    rows: u16,

    /// Image to split
    source: PathBuf,

    /// Directory the chunks are written to
    output: PathBuf,
}

fn main() -> Result<()> {
    let args = Args::parse();
    ensure!(args.cols != 0, "the splitting columns must be positive");
    ensure!(args.rows != 0, "the splitting rows must be positive");

    let image = image::open(&args.source)
        .with_context(|| format!("failed to open {}", args.source.display()))?
        .into_rgba8();
    let (width, height) = image.dimensions();
    ensure!(
        args.cols as u32 <= width && args.rows as u32 <= height,
        "cannot split a {}x{} image into {}x{} chunks",
        width,
        height,
        args.cols,
        args.rows
    );

    fs::create_dir_all(&args.output)
        .with_context(|| format!("failed to create {}", args.output.display()))?;

    let grid = Grid::new(args.cols, args.rows);
    for (index, chunk) in split(&image, grid).into_iter().enumerate() {
        let path = args.output.join(format!("chunk_{}.png", index));
        chunk
            .save(&path)
            .with_context(|| format!("failed to save {}", path.display()))?;
    }

    println!(
        "saved {} chunks of {}x{} to {}",
        grid.len(),
        width,
        height,
        args.output.display()
    );
    Ok(())
}
