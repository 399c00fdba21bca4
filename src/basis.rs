use image::RgbaImage;

use crate::grid::Grid;

/// 分割グリッドの列数. 断片画像を作る側の分割設定と一致していなければならない.
pub const CHUNK_COLS: u16 = 4;

/// 分割グリッドの行数.
pub const CHUNK_ROWS: u16 = 3;

/// 断片画像ディレクトリが指定されなかった時に使う.
pub const DEFAULT_CHUNK_DIR: &str = "chunks";

/// 結合した画像の書き出し先.
pub const DEFAULT_OUTPUT_DIR: &str = "combo";

/// `CHUNK_COLS` × `CHUNK_ROWS` の `Grid`.
pub fn default_grid() -> Grid {
    Grid::new(CHUNK_COLS, CHUNK_ROWS)
}

/// `Tile` はデコード済みの断片画像を表す. ファイル名 `chunk_<N>.png` の `N` を通し番号 `index` として持つ.
#[derive(Clone)]
pub struct Tile {
    pub index: u64,
    pub image: RgbaImage,
}

impl Tile {
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }
}

impl std::fmt::Debug for Tile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}({}x{})", self.index, self.width(), self.height())
    }
}

/// 不透明なランダムノイズの画像を作る.
#[cfg(test)]
pub(crate) fn noise_image(rng: &mut impl rand::Rng, width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_fn(width, height, |_, _| {
        image::Rgba([rng.gen(), rng.gen(), rng.gen(), rng.gen_range(1..=255)])
    })
}

#[test]
fn test_defaults() {
    assert_eq!(DEFAULT_CHUNK_DIR, "chunks");
    assert_eq!(DEFAULT_OUTPUT_DIR, "combo");
    assert_eq!(default_grid(), Grid::new(4, 3));
}
