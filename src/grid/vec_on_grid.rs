use std::ops;

use super::{Grid, Pos};

/// `VecOnGrid` は `Grid` 上の `Pos` に対応付けた値を格納し `Pos` でアクセスできるコンテナを提供する.
#[derive(Clone, PartialEq, Eq)]
pub struct VecOnGrid<T> {
    vec: Vec<T>,
    grid: Grid,
}

impl<T> VecOnGrid<T> {
    /// 行優先に並んだ `vec` から作る. 長さが `Grid` のマスの数と異なれば `None`.
    pub fn from_vec(grid: Grid, vec: Vec<T>) -> Option<Self> {
        if vec.len() != grid.len() {
            return None;
        }

        Some(Self { grid, vec })
    }

    pub fn grid(&self) -> Grid {
        self.grid
    }

    /// 借用のイテレータを作る.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.into_iter()
    }

    /// 各 Pos のタプルとなるイテレータを作る.
    pub fn iter_with_pos(&self) -> impl Iterator<Item = (Pos, &T)> {
        self.grid.all_pos().zip(self.iter())
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for VecOnGrid<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if f.alternate() {
            writeln!(f, "[")?;
            for y in 0..self.grid.height() as usize {
                write!(f, "    ")?;
                for x in 0..self.grid.width() as usize {
                    if x != 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{:?}", self.vec[y * self.grid.width() as usize + x])?;
                }
                writeln!(f)?;
            }
            write!(f, "]")
        } else {
            self.vec.fmt(f)
        }
    }
}

impl<T> std::iter::IntoIterator for VecOnGrid<T> {
    type Item = T;

    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.vec.into_iter()
    }
}

impl<'a, T> std::iter::IntoIterator for &'a VecOnGrid<T> {
    type Item = &'a T;

    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.vec.iter()
    }
}

impl<T> ops::Index<Pos> for VecOnGrid<T> {
    type Output = T;

    fn index(&self, index: Pos) -> &Self::Output {
        &self.vec[self.grid.pos_as_index(index)]
    }
}

#[test]
fn test_index_by_pos() {
    // 0 1 2
    // 3 4 5
    let grid = Grid::new(3, 2);
    let field = VecOnGrid::from_vec(grid, (0..6).collect::<Vec<u32>>()).unwrap();
    assert_eq!(field[grid.pos(0, 0)], 0);
    assert_eq!(field[grid.pos(2, 0)], 2);
    assert_eq!(field[grid.pos(0, 1)], 3);
    assert_eq!(field[grid.pos(2, 1)], 5);
    assert_eq!(field[grid.pos(1, 1)], 4);
    assert_eq!(format!("{:#?}", field), "[\n    0 1 2\n    3 4 5\n]");

    let with_pos = field.iter_with_pos().map(|(p, &v)| (p, v)).collect::<Vec<_>>();
    assert_eq!(with_pos[4], (grid.pos(1, 1), 4));
}

#[test]
fn test_from_vec_rejects_wrong_length() {
    let grid = Grid::new(2, 2);
    assert!(VecOnGrid::from_vec(grid, vec![0u8; 3]).is_none());
    assert!(VecOnGrid::from_vec(grid, vec![0u8; 5]).is_none());
    assert!(VecOnGrid::from_vec(grid, vec![0u8; 4]).is_some());
}
