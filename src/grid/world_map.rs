use crate::types::{GridcastError, OPEN, VOID, WALL};
use crate::validate::ValidatedMap;

/// Rectangular numeric grid consumed by the ray engine.
///
/// Cells are stored row-major, `y` outer and `x` inner, so `(x, y)` maps to
/// `data[y * width + x]`. Only [`WALL`] stops a ray; every other value is
/// walked through.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorldMap {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl WorldMap {
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> Result<Self, GridcastError> {
        let expected_len = (width as usize) * (height as usize);
        if data.len() != expected_len {
            return Err(GridcastError::InvalidMap(format!(
                "data length {} does not match map size {}",
                data.len(),
                expected_len
            )));
        }

        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Build from nested rows, `rows[y][x]`. Rows must all share one length.
    pub fn from_rows<R: AsRef<[u8]>>(rows: &[R]) -> Result<Self, GridcastError> {
        let width = rows.first().map(|row| row.as_ref().len()).unwrap_or(0);
        let mut data = Vec::with_capacity(width * rows.len());
        for (y, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != width {
                return Err(GridcastError::InvalidMap(format!(
                    "row {} has {} cells, expected {}",
                    y,
                    row.len(),
                    width
                )));
            }
            data.extend_from_slice(row);
        }

        Self::new(width as u32, rows.len() as u32, data)
    }

    /// The 8x7 lesson map: walls on every border and four pillars.
    pub fn demo() -> Self {
        const ROWS: [[u8; 8]; 7] = [
            [1, 1, 1, 1, 1, 1, 1, 1],
            [1, 0, 0, 0, 0, 0, 0, 1],
            [1, 0, 1, 0, 0, 1, 0, 1],
            [1, 0, 0, 0, 0, 0, 0, 1],
            [1, 0, 1, 0, 0, 1, 0, 1],
            [1, 0, 0, 0, 0, 0, 0, 1],
            [1, 1, 1, 1, 1, 1, 1, 1],
        ];

        Self {
            width: 8,
            height: 7,
            data: ROWS.iter().flatten().copied().collect(),
        }
    }

    /// Convert a structurally valid cub map: walls and void block, floor and
    /// spawn markers are open.
    pub fn from_validated(map: &ValidatedMap) -> Result<Self, GridcastError> {
        if !map.is_valid() {
            return Err(GridcastError::MapIssues(map.issues.len()));
        }

        let data = map
            .grid
            .iter()
            .flatten()
            .map(|&ch| match ch {
                '1' | VOID => WALL,
                _ => OPEN,
            })
            .collect();

        Self::new(map.width as u32, map.height as u32, data)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Cell value at `(x, y)`, or `None` outside the grid.
    pub fn lookup(&self, x: i32, y: i32) -> Option<u8> {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return None;
        }
        Some(self.data[self.index(x as u32, y as u32)])
    }

    #[inline]
    pub fn is_wall(&self, x: i32, y: i32) -> bool {
        self.lookup(x, y) == Some(WALL)
    }

    /// Walkable for movement. Cells outside the grid are not open.
    #[inline]
    pub fn is_open(&self, x: i32, y: i32) -> bool {
        self.lookup(x, y) == Some(OPEN)
    }

    pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
        self.data.chunks(self.width.max(1) as usize)
    }

    fn index(&self, x: u32, y: u32) -> usize {
        (y as usize) * (self.width as usize) + (x as usize)
    }
}
