//! 結合処理で起こるエラー. いずれも致命的で, 起きた時点で出力を書かずに終了する.

use std::{io, path::PathBuf};

use thiserror::Error;

pub type CombineResult<T> = Result<T, CombineError>;

#[derive(Debug, Error)]
pub enum CombineError {
    /// 断片画像ディレクトリを読めなかった.
    #[error("failed to read chunk directory {}", path.display())]
    SourceDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// `chunk_<N>.png` が一つも無かった.
    #[error("no chunk_<N>.png files found in {}", dir.display())]
    NoTilesFound { dir: PathBuf },

    /// 断片画像の数がグリッドのマスの数と合わない.
    #[error("expected {expected} chunks, but found {found}")]
    TileCountMismatch { expected: usize, found: usize },

    /// 数は合っているが通し番号に抜けか重複がある.
    #[error(
        "chunk indices must be 0..{expected} without gaps or duplicates, \
         but chunk_{index}.png sorted into position {position}"
    )]
    IndexGap {
        expected: usize,
        position: usize,
        index: u64,
    },

    /// 断片画像を開けなかったか, デコードできなかった. 開けなかった時は `ImageError::IoError` に包む.
    #[error("failed to decode chunk {}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// 出力先ディレクトリか出力ファイルに書き込めなかった. ディレクトリ操作の失敗は `ImageError::IoError` に包む.
    #[error("failed to write {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

impl CombineError {
    pub(crate) fn write_io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        CombineError::Write {
            path: path.into(),
            source: image::ImageError::IoError(source),
        }
    }
}
