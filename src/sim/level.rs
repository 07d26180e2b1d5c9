//! Bit-packed solid/empty level grid
//!
//! Cells are stored row-major, eight per byte (bit `x % 8` of byte `x / 8`).
//! With [`Addressing::Wrapping`] the grid tiles the plane toroidally; with
//! [`Addressing::Absolute`] everything outside the grid is empty space.

use glam::IVec2;
use thiserror::Error;

use crate::wrap_mod;

/// How coordinates outside `[0, width) x [0, height)` are treated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Addressing {
    /// Both axes wrap with true modulo (infinite tiling of the pattern)
    Wrapping,
    /// Outside cells read as empty and ignore writes
    Absolute,
}

/// Level construction errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LevelError {
    #[error("level dimensions must be positive, got {width}x{height}")]
    EmptyDimensions { width: u32, height: u32 },
    #[error("level row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        found: usize,
        expected: usize,
    },
}

/// Fixed-size bit grid
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelStore {
    width: u32,
    height: u32,
    addressing: Addressing,
    /// Bytes per row
    stride: usize,
    bits: Vec<u8>,
}

impl LevelStore {
    /// Create an empty level
    pub fn new(width: u32, height: u32, addressing: Addressing) -> Result<Self, LevelError> {
        if width == 0 || height == 0 || width > i32::MAX as u32 || height > i32::MAX as u32 {
            return Err(LevelError::EmptyDimensions { width, height });
        }
        let stride = (width as usize).div_ceil(8);
        Ok(Self {
            width,
            height,
            addressing,
            stride,
            bits: vec![0; stride * height as usize],
        })
    }

    /// Parse a level from text rows, `#` marks a solid cell
    pub fn from_rows(rows: &[&str], addressing: Addressing) -> Result<Self, LevelError> {
        let width = rows.first().map(|r| r.chars().count()).unwrap_or(0);
        let mut level = Self::new(width as u32, rows.len() as u32, addressing)?;
        for (y, row) in rows.iter().enumerate() {
            let found = row.chars().count();
            if found != width {
                return Err(LevelError::RaggedRow {
                    row: y,
                    found,
                    expected: width,
                });
            }
            for (x, c) in row.chars().enumerate() {
                if c == '#' {
                    level.set(IVec2::new(x as i32, y as i32), true);
                }
            }
        }
        Ok(level)
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn addressing(&self) -> Addressing {
        self.addressing
    }

    /// Map a cell to its in-grid coordinate, if it has one
    fn locate(&self, cell: IVec2) -> Option<(usize, usize)> {
        let (w, h) = (self.width as i32, self.height as i32);
        match self.addressing {
            Addressing::Wrapping => {
                Some((wrap_mod(cell.x, w) as usize, wrap_mod(cell.y, h) as usize))
            }
            Addressing::Absolute => {
                if (0..w).contains(&cell.x) && (0..h).contains(&cell.y) {
                    Some((cell.x as usize, cell.y as usize))
                } else {
                    None
                }
            }
        }
    }

    /// Whether a cell is solid
    pub fn get(&self, cell: IVec2) -> bool {
        match self.locate(cell) {
            Some((x, y)) => (self.bits[y * self.stride + x / 8] >> (x % 8)) & 1 == 1,
            None => false,
        }
    }

    /// Set a cell's solid flag. Returns false if the cell is outside an absolute grid.
    pub fn set(&mut self, cell: IVec2, solid: bool) -> bool {
        let Some((x, y)) = self.locate(cell) else {
            return false;
        };
        let byte = &mut self.bits[y * self.stride + x / 8];
        let mask = 1u8 << (x % 8);
        *byte = (*byte & !mask) | ((solid as u8) << (x % 8));
        true
    }

    /// All solid cells in row-major order (grid coordinates)
    pub fn iter_solid(&self) -> impl Iterator<Item = IVec2> + '_ {
        (0..self.height as i32).flat_map(move |y| {
            (0..self.width as i32)
                .map(move |x| IVec2::new(x, y))
                .filter(move |&cell| self.get(cell))
        })
    }
}
