mod vec_on_grid;

pub use vec_on_grid::VecOnGrid;

/// `Pos` は `Grid` に存在する座標を表す.
///
/// `x` が列, `y` が行に対応する. それぞれは必ず `Grid` の `width` と `height` 未満になる.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Pos {
    x: u16,
    y: u16,
}

impl std::fmt::Debug for Pos {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl Pos {
    fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }

    pub fn x(&self) -> u16 {
        self.x
    }

    pub fn y(&self) -> u16 {
        self.y
    }
}

/// `RangePos` は `Grid` 上の全ての `Pos` を行優先で走査する `Iterator`.
pub struct RangePos {
    width: u16,
    height: u16,
    x: u16,
    y: u16,
}

impl Iterator for RangePos {
    type Item = Pos;

    fn next(&mut self) -> Option<Self::Item> {
        if self.height <= self.y {
            return None;
        }
        let ret = Pos::new(self.x, self.y);
        self.x += 1;
        if self.width <= self.x {
            self.y += 1;
            self.x = 0;
        }
        Some(ret)
    }
}

/// `Grid` は原画像を断片画像に分けた時の分割グリッドを表す. `Pos` はこれを介してのみ作成できる.
///
/// `width` が列数 (chunk_cols), `height` が行数 (chunk_rows) に当たる.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    width: u16,
    height: u16,
}

impl Grid {
    pub fn new(width: u16, height: u16) -> Self {
        assert!(width != 0, "grid must have at least one column");
        assert!(height != 0, "grid must have at least one row");
        Self { width, height }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// グリッド上のマスの総数.
    pub fn len(&self) -> usize {
        self.width as usize * self.height as usize
    }

    pub fn pos(&self, x: u16, y: u16) -> Pos {
        assert!(x < self.width, "x out of grid: {} >= {}", x, self.width);
        assert!(y < self.height, "y out of grid: {} >= {}", y, self.height);
        Pos::new(x, y)
    }

    pub fn all_pos(&self) -> RangePos {
        RangePos {
            width: self.width,
            height: self.height,
            x: 0,
            y: 0,
        }
    }

    fn pos_as_index(&self, pos: Pos) -> usize {
        pos.y() as usize * self.width as usize + pos.x() as usize
    }
}

#[test]
fn test_all_pos_is_row_major() {
    let grid = Grid::new(3, 2);
    let all = grid.all_pos().collect::<Vec<_>>();
    assert_eq!(
        all,
        vec![
            grid.pos(0, 0),
            grid.pos(1, 0),
            grid.pos(2, 0),
            grid.pos(0, 1),
            grid.pos(1, 1),
            grid.pos(2, 1),
        ]
    );
    for (index, pos) in all.into_iter().enumerate() {
        assert_eq!(grid.pos_as_index(pos), index);
    }
}

#[test]
fn test_index_maps_to_row_and_column() {
    // 4 列 3 行: 行は index / 4, 列は index % 4
    let grid = Grid::new(4, 3);
    let all = grid.all_pos().collect::<Vec<_>>();
    assert_eq!(all.len(), 12);
    assert_eq!(all[3], grid.pos(3, 0));
    assert_eq!(all[4], grid.pos(0, 1));
    assert_eq!(all[11], grid.pos(3, 2));
    for (index, pos) in all.into_iter().enumerate() {
        assert_eq!((pos.x() as usize, pos.y() as usize), (index % 4, index / 4));
    }
}
