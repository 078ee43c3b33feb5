// Copyright (c) 2026 rezky_nightky

use crate::cell::Cell;
use crate::error::{try_vec, EngineError, Result};

/// Row-major logical grid snapshot.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    pub width: u16,
    pub height: u16,
    cells: Vec<Cell>,
}

impl Frame {
    /// Allocates a blank grid, refusing anything larger than `max_cells`.
    pub fn allocate(width: u16, height: u16, max_cells: usize) -> Result<Self> {
        let len = width as usize * height as usize;
        if len > max_cells {
            return Err(EngineError::Allocation {
                what: "grid buffer",
                cells: len,
            });
        }
        let mut cells = try_vec(len, "grid buffer", len)?;
        cells.resize(len, Cell::BLANK);
        Ok(Self {
            width,
            height,
            cells,
        })
    }

    /// Marks every cell as different from anything the grid builder can produce.
    pub fn poison(&mut self) {
        self.cells.fill(Cell::POISON);
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn same_shape(&self, other: &Frame) -> bool {
        self.width == other.width && self.height == other.height
    }

    pub fn index(&self, x: u16, y: u16) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    #[cfg(test)]
    pub fn get(&self, x: u16, y: u16) -> Option<&Cell> {
        self.index(x, y).map(|i| &self.cells[i])
    }

    pub fn set(&mut self, x: u16, y: u16, cell: Cell) {
        if let Some(i) = self.index(x, y) {
            self.cells[i] = cell;
        }
    }

    pub fn row(&self, y: u16) -> &[Cell] {
        let w = self.width as usize;
        let start = y as usize * w;
        &self.cells[start..start + w]
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::StyleClass;

    #[test]
    fn allocate_is_blank_and_sized() {
        let f = Frame::allocate(3, 2, 100).unwrap();
        assert_eq!(f.len(), 6);
        assert!(f.cells().iter().all(|c| *c == Cell::BLANK));
    }

    #[test]
    fn allocate_respects_ceiling() {
        let err = Frame::allocate(10, 10, 99).unwrap_err();
        assert!(matches!(err, EngineError::Allocation { cells: 100, .. }));
    }

    #[test]
    fn set_get_and_rows_are_row_major() {
        let mut f = Frame::allocate(3, 2, 100).unwrap();
        let c = Cell::styled('q', StyleClass::Head);
        f.set(2, 1, c);
        f.set(3, 1, c);
        assert_eq!(f.get(2, 1), Some(&c));
        assert_eq!(f.get(3, 1), None);
        assert_eq!(f.row(1)[2], c);
        assert_eq!(f.cells()[5], c);
    }

    #[test]
    fn poison_touches_every_cell() {
        let mut f = Frame::allocate(4, 4, 100).unwrap();
        f.poison();
        assert!(f.cells().iter().all(|c| *c == Cell::POISON));
    }
}
