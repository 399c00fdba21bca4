use std::{
    fs, io,
    path::{Path, PathBuf},
    sync::OnceLock,
};

use image::{ImageError, ImageReader};
use regex::Regex;
use tracing::debug;

use crate::{
    basis::Tile,
    error::{CombineError, CombineResult},
    grid::{Grid, VecOnGrid},
};


/// `ChunkFile` はディレクトリ上の断片画像ファイルと, そのファイル名から取り出した通し番号を表す.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkFile {
    pub index: u64,
    pub path: PathBuf,
}

fn chunk_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^chunk_(\d+)\.png$").expect("chunk pattern is valid"))
}

/// `chunk_<N>.png` の `N` を取り出す. 形が違うか `u64` に収まらなければ `None`.
pub fn parse_chunk_index(file_name: &str) -> Option<u64> {
    chunk_pattern()
        .captures(file_name)
        .and_then(|caps| caps[1].parse().ok())
}

/// `dir` にある断片画像を列挙し, 通し番号が `0..grid.len()` を欠けも重複もなく埋めている時だけ成功する.
pub fn discover(dir: &Path, grid: Grid) -> CombineResult<Vec<ChunkFile>> {
    let chunks = list_chunks(dir)?;
    validate(&chunks, grid)?;
    Ok(chunks)
}

/// `dir` にある `chunk_<N>.png` を通し番号の昇順 (数値順) に並べて返す. それ以外のファイルは無視する.
pub fn list_chunks(dir: &Path) -> CombineResult<Vec<ChunkFile>> {
    let source_dir = |source: io::Error| CombineError::SourceDir {
        path: dir.to_path_buf(),
        source,
    };

    let mut chunks = vec![];
    for entry in fs::read_dir(dir).map_err(source_dir)? {
        let entry = entry.map_err(source_dir)?;
        let index = match entry.file_name().to_str().and_then(parse_chunk_index) {
            Some(index) => index,
            None => continue,
        };
        if entry.file_type().map_err(source_dir)?.is_dir() {
            continue;
        }
        debug!(index, path = %entry.path().display(), "found chunk");
        chunks.push(ChunkFile {
            index,
            path: entry.path(),
        });
    }

    if chunks.is_empty() {
        return Err(CombineError::NoTilesFound {
            dir: dir.to_path_buf(),
        });
    }

    // read_dir の順序は不定なので, 番号が同じ時もパスで順序を固定する
    chunks.sort_by(|a, b| a.index.cmp(&b.index).then_with(|| a.path.cmp(&b.path)));
    Ok(chunks)
}

/// 並べ替え済みの `chunks` が `grid` をちょうど埋めるか確かめる.
pub(crate) fn validate(chunks: &[ChunkFile], grid: Grid) -> CombineResult<()> {
    if chunks.len() != grid.len() {
        return Err(CombineError::TileCountMismatch {
            expected: grid.len(),
            found: chunks.len(),
        });
    }

    for (position, chunk) in chunks.iter().enumerate() {
        if chunk.index != position as u64 {
            return Err(CombineError::IndexGap {
                expected: grid.len(),
                position,
                index: chunk.index,
            });
        }
    }
    Ok(())
}

/// 並べ替え済みの `chunks` を全てデコードし, 行優先で `grid` に配置する.
pub fn load_all(chunks: &[ChunkFile], grid: Grid) -> CombineResult<VecOnGrid<Tile>> {
    let tiles = chunks.iter().map(load).collect::<CombineResult<Vec<_>>>()?;

    VecOnGrid::from_vec(grid, tiles).ok_or(CombineError::TileCountMismatch {
        expected: grid.len(),
        found: chunks.len(),
    })
}

fn load(chunk: &ChunkFile) -> CombineResult<Tile> {
    let decode = |source: ImageError| CombineError::Decode {
        path: chunk.path.clone(),
        source,
    };

    // 拡張子ではなく中身から形式を判定する
    let image = ImageReader::open(&chunk.path)
        .and_then(|reader| reader.with_guessed_format())
        .map_err(|e| decode(ImageError::IoError(e)))?
        .decode()
        .map_err(decode)?
        .into_rgba8();

    debug!(
        index = chunk.index,
        width = image.width(),
        height = image.height(),
        "loaded chunk"
    );

    Ok(Tile {
        index: chunk.index,
        image,
    })
}
