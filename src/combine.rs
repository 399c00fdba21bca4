use image::{imageops, Rgba, RgbaImage};

use crate::{
    basis::Tile,
    grid::{Pos, VecOnGrid},
};

#[cfg(test)]
mod tests;

/// `Geometry` は結合後の画像における各列の幅と各行の高さ, およびそれぞれの開始座標を表す.
///
/// 断片画像の大きさは揃っているとは限らないので, 列の幅はその列で最も幅の広い断片に,
/// 行の高さはその行で最も高い断片に合わせる. 小さい断片の余白は透明のまま残る.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Geometry {
    column_widths: Vec<u32>,
    row_heights: Vec<u32>,
    x_offsets: Vec<u32>,
    y_offsets: Vec<u32>,
}

impl Geometry {
    pub fn compute(tiles: &VecOnGrid<Tile>) -> Self {
        let grid = tiles.grid();
        let mut column_widths = vec![0; grid.width() as usize];
        let mut row_heights = vec![0; grid.height() as usize];

        for (pos, tile) in tiles.iter_with_pos() {
            let width = &mut column_widths[pos.x() as usize];
            *width = tile.width().max(*width);
            let height = &mut row_heights[pos.y() as usize];
            *height = tile.height().max(*height);
        }

        Self {
            x_offsets: exclusive_prefix_sum(&column_widths),
            y_offsets: exclusive_prefix_sum(&row_heights),
            column_widths,
            row_heights,
        }
    }

    pub fn column_widths(&self) -> &[u32] {
        &self.column_widths
    }

    pub fn row_heights(&self) -> &[u32] {
        &self.row_heights
    }

    pub fn x_offsets(&self) -> &[u32] {
        &self.x_offsets
    }

    pub fn y_offsets(&self) -> &[u32] {
        &self.y_offsets
    }

    /// 結合後の画像の `(幅, 高さ)`.
    pub fn canvas_size(&self) -> (u32, u32) {
        (
            self.column_widths.iter().sum(),
            self.row_heights.iter().sum(),
        )
    }

    /// `pos` に置く断片の左上の座標.
    pub fn origin_of(&self, pos: Pos) -> (u32, u32) {
        (
            self.x_offsets[pos.x() as usize],
            self.y_offsets[pos.y() as usize],
        )
    }
}

fn exclusive_prefix_sum(extents: &[u32]) -> Vec<u32> {
    extents
        .iter()
        .scan(0, |next, &extent| {
            let start = *next;
            *next += extent;
            Some(start)
        })
        .collect()
}

/// 透明な画像を用意し, 各断片を `geometry` が示す位置にそのまま上書きで貼り付ける.
pub fn compose(tiles: &VecOnGrid<Tile>, geometry: &Geometry) -> RgbaImage {
    let (width, height) = geometry.canvas_size();
    let mut canvas = RgbaImage::from_pixel(width, height, Rgba([0, 0, 0, 0]));

    for (pos, tile) in tiles.iter_with_pos() {
        let (x, y) = geometry.origin_of(pos);
        imageops::replace(&mut canvas, &tile.image, x as i64, y as i64);
    }
    canvas
}
