use std::{
    fs,
    path::{Path, PathBuf},
};

use chrono::{DateTime, Utc};
use image::{ImageFormat, RgbaImage};
use tracing::info;

use crate::{
    basis, chunk,
    combine::{self, Geometry},
    error::{CombineError, CombineResult},
    grid::Grid,
    naming,
};


/// `Job` は一回の結合の入力と出力先を表す.
#[derive(Debug, Clone)]
pub struct Job {
    pub source_dir: PathBuf,
    pub output_dir: PathBuf,
    pub grid: Grid,
}

impl Job {
    /// `basis::CHUNK_COLS` × `basis::CHUNK_ROWS` で結合する `Job` を作る.
    pub fn new(source_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            source_dir: source_dir.into(),
            output_dir: output_dir.into(),
            grid: basis::default_grid(),
        }
    }
}

/// 断片画像を列挙, 検証, デコードし, 一枚に貼り合わせて `output_dir` に保存する. 保存したパスを返す.
///
/// 途中で失敗した場合は何も書き出さない.
pub fn reassemble(job: &Job, now: DateTime<Utc>) -> CombineResult<PathBuf> {
    let chunks = chunk::discover(&job.source_dir, job.grid)?;
    info!(
        count = chunks.len(),
        dir = %job.source_dir.display(),
        "discovered chunks"
    );

    let tiles = chunk::load_all(&chunks, job.grid)?;
    let geometry = Geometry::compute(&tiles);
    let (width, height) = geometry.canvas_size();
    info!(
        width,
        height,
        columns = ?geometry.column_widths(),
        rows = ?geometry.row_heights(),
        "composing canvas"
    );

    let canvas = combine::compose(&tiles, &geometry);
    persist(&canvas, &job.output_dir, now)
}

fn persist(canvas: &RgbaImage, output_dir: &Path, now: DateTime<Utc>) -> CombineResult<PathBuf> {
    fs::create_dir_all(output_dir).map_err(|e| CombineError::write_io(output_dir, e))?;

    let names =
        naming::file_names_in(output_dir).map_err(|e| CombineError::write_io(output_dir, e))?;
    let prefix = naming::pick_prefix(&naming::used_prefixes(&names));
    info!(%prefix, "picked output prefix");

    let path = output_dir.join(naming::output_file_name(&prefix, now));
    canvas
        .save_with_format(&path, ImageFormat::Png)
        .map_err(|source| CombineError::Write {
            path: path.clone(),
            source,
        })?;

    info!(path = %path.display(), "saved combo");
    Ok(path)
}
