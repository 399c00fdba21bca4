use image::{imageops, RgbaImage};

use crate::grid::{Grid, VecOnGrid};

/// `image` を `grid` で分割する. 割り切れない端数は右端の列と下端の行が受け持つ.
///
/// `image` の幅と高さはそれぞれ `grid` の列数と行数以上でなければならない.
pub fn split(image: &RgbaImage, grid: Grid) -> VecOnGrid<RgbaImage> {
    let (width, height) = image.dimensions();
    let columns = spans(width, grid.width() as u32);
    let rows = spans(height, grid.height() as u32);

    let pieces = grid
        .all_pos()
        .map(|pos| {
            let (x, w) = columns[pos.x() as usize];
            let (y, h) = rows[pos.y() as usize];
            imageops::crop_imm(image, x, y, w, h).to_image()
        })
        .collect();

    VecOnGrid::from_vec(grid, pieces).expect("one piece per grid cell")
}

/// `extent` を `count` 個の `(開始, 長さ)` に分ける.
fn spans(extent: u32, count: u32) -> Vec<(u32, u32)> {
    assert!(count <= extent, "cannot split {} pixels into {} parts", extent, count);
    let base = extent / count;
    (0..count)
        .map(|i| {
            let start = i * base;
            let len = if i + 1 == count { extent - start } else { base };
            (start, len)
        })
        .collect()
}
