use image::{Rgba, RgbaImage};
use proptest::{
    collection::vec,
    prop_assert_eq, proptest,
    strategy::{Just, Strategy},
};
use rand::prelude::*;

use super::{compose, exclusive_prefix_sum, Geometry};
use crate::{
    basis::{noise_image, Tile},
    grid::{Grid, VecOnGrid},
};

fn blank_tiles(grid: Grid, sizes: &[(u32, u32)]) -> VecOnGrid<Tile> {
    let tiles = sizes
        .iter()
        .enumerate()
        .map(|(index, &(width, height))| Tile {
            index: index as u64,
            image: RgbaImage::new(width, height),
        })
        .collect();
    VecOnGrid::from_vec(grid, tiles).unwrap()
}

fn noise_tiles(rng: &mut StdRng, grid: Grid, max_extent: u32) -> VecOnGrid<Tile> {
    let tiles = (0..grid.len())
        .map(|index| {
            let (width, height) = (rng.gen_range(1..=max_extent), rng.gen_range(1..=max_extent));
            Tile {
                index: index as u64,
                image: noise_image(rng, width, height),
            }
        })
        .collect();
    VecOnGrid::from_vec(grid, tiles).unwrap()
}

#[test]
fn test_exclusive_prefix_sum() {
    assert_eq!(exclusive_prefix_sum(&[10, 12, 7]), vec![0, 10, 22]);
    assert_eq!(exclusive_prefix_sum(&[5]), vec![0]);
    assert!(exclusive_prefix_sum(&[]).is_empty());
}

#[test]
fn uneven_tiles() {
    // (10x5) (12x4) (7x6)
    // (9x8)  (12x8) (6x7)
    let grid = Grid::new(3, 2);
    let tiles = blank_tiles(
        grid,
        &[(10, 5), (12, 4), (7, 6), (9, 8), (12, 8), (6, 7)],
    );
    let geometry = Geometry::compute(&tiles);

    assert_eq!(geometry.column_widths(), &[10, 12, 7]);
    assert_eq!(geometry.row_heights(), &[6, 8]);
    assert_eq!(geometry.x_offsets(), &[0, 10, 22]);
    assert_eq!(geometry.y_offsets(), &[0, 6]);
    assert_eq!(geometry.canvas_size(), (29, 14));
    assert_eq!(geometry.origin_of(grid.pos(0, 0)), (0, 0));
    assert_eq!(geometry.origin_of(grid.pos(2, 1)), (22, 6));
}

#[test]
fn single_tile_is_copied_as_is() {
    let mut rng = StdRng::seed_from_u64(0);
    let grid = Grid::new(1, 1);
    let tiles = noise_tiles(&mut rng, grid, 16);

    let geometry = Geometry::compute(&tiles);
    let canvas = compose(&tiles, &geometry);
    assert_eq!(canvas, tiles[grid.pos(0, 0)].image);
}

#[test]
fn compose_places_tiles_and_keeps_gaps_transparent() {
    // fixed rng for stabilize test results
    let mut rng = StdRng::seed_from_u64(0);

    for _ in 0..20 {
        let grid = Grid::new(rng.gen_range(1..6), rng.gen_range(1..6));
        let tiles = noise_tiles(&mut rng, grid, 12);
        let geometry = Geometry::compute(&tiles);
        let canvas = compose(&tiles, &geometry);

        let (width, height) = geometry.canvas_size();
        assert_eq!(canvas.dimensions(), (width, height));

        let mut covered = vec![false; width as usize * height as usize];
        for (pos, tile) in tiles.iter_with_pos() {
            let (ox, oy) = geometry.origin_of(pos);
            for (tx, ty, pixel) in tile.image.enumerate_pixels() {
                let (x, y) = (ox + tx, oy + ty);
                assert_eq!(canvas.get_pixel(x, y), pixel, "tile {:?} at ({}, {})", tile, tx, ty);
                let cell = &mut covered[y as usize * width as usize + x as usize];
                assert!(!*cell, "tiles overlap at ({}, {})", x, y);
                *cell = true;
            }
        }

        for (x, y, pixel) in canvas.enumerate_pixels() {
            if !covered[y as usize * width as usize + x as usize] {
                assert_eq!(pixel, &Rgba([0, 0, 0, 0]), "padding at ({}, {})", x, y);
            }
        }
    }
}

fn grid_and_sizes() -> impl Strategy<Value = (Grid, Vec<(u32, u32)>)> {
    (1u16..6, 1u16..6).prop_flat_map(|(cols, rows)| {
        let grid = Grid::new(cols, rows);
        (Just(grid), vec((1u32..40, 1u32..40), grid.len()))
    })
}

proptest! {
    #[test]
    fn canvas_size_is_sum_of_maxima((grid, sizes) in grid_and_sizes()) {
        let tiles = blank_tiles(grid, &sizes);
        let geometry = Geometry::compute(&tiles);

        let cols = grid.width() as usize;
        let rows = grid.height() as usize;
        let expected_width: u32 = (0..cols)
            .map(|c| (0..rows).map(|r| sizes[r * cols + c].0).max().unwrap())
            .sum();
        let expected_height: u32 = (0..rows)
            .map(|r| (0..cols).map(|c| sizes[r * cols + c].1).max().unwrap())
            .sum();

        prop_assert_eq!(geometry.canvas_size(), (expected_width, expected_height));
        prop_assert_eq!(geometry.column_widths().len(), cols);
        prop_assert_eq!(geometry.row_heights().len(), rows);
    }

    #[test]
    fn geometry_is_idempotent((grid, sizes) in grid_and_sizes()) {
        let tiles = blank_tiles(grid, &sizes);
        prop_assert_eq!(Geometry::compute(&tiles), Geometry::compute(&tiles));
    }
}
