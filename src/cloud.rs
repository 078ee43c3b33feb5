// Copyright (c) 2026 rezky_nightky

use rand::Rng;

use crate::{
    cell::Cell,
    column::Column,
    error::{try_vec, Result},
    frame::Frame,
};

/// Every column of the logical grid.
#[derive(Clone, Debug, PartialEq)]
pub struct Cloud {
    pub cols: u16,
    pub lines: u16,
    columns: Vec<Column>,
    chars: Vec<char>,
}

impl Cloud {
    /// Builds `cols` freshly seeded columns. Nothing is returned unless every
    /// column got its storage.
    pub fn allocate<R: Rng>(cols: u16, lines: u16, chars: &[char], rng: &mut R) -> Result<Self> {
        let cells = cols as usize * lines as usize;
        let mut columns = try_vec(cols as usize, "column set", cells)?;
        for _ in 0..cols {
            columns.push(Column::spawn(lines, chars, rng)?);
        }
        let mut pool = try_vec(chars.len(), "glyph pool", cells)?;
        pool.extend_from_slice(chars);
        Ok(Self {
            cols,
            lines,
            columns,
            chars: pool,
        })
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    #[cfg(test)]
    pub fn columns_mut(&mut self) -> &mut [Column] {
        &mut self.columns
    }

    /// One simulation tick for every column.
    pub fn advance<R: Rng>(&mut self, rng: &mut R) {
        for col in &mut self.columns {
            col.advance(self.lines, &self.chars, rng);
        }
    }

    /// Writes the full snapshot for the current simulation state into `frame`.
    pub fn draw(&self, frame: &mut Frame) {
        debug_assert!(frame.width == self.cols && frame.height == self.lines);
        for (x, col) in self.columns.iter().enumerate() {
            let x = x as u16;
            for y in 0..self.lines {
                let style = col.style_at(y);
                let glyph = col.glyphs.get(y as usize).copied().unwrap_or(' ');
                frame.set(x, y, Cell::styled(glyph, style));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::Cloud;
    use crate::cell::{Cell, StyleClass};
    use crate::frame::Frame;

    fn make_cloud(cols: u16, lines: u16, seed: u64) -> Cloud {
        let mut rng = StdRng::seed_from_u64(seed);
        Cloud::allocate(cols, lines, &['0', '1'], &mut rng).unwrap()
    }

    #[test]
    fn allocate_gives_one_column_per_logical_column() {
        let cloud = make_cloud(7, 5, 1);
        assert_eq!(cloud.columns().len(), 7);
        assert!(cloud.columns().iter().all(|c| c.glyphs.len() == 5));
        assert!(cloud.columns().iter().all(|c| c.head == 0.0));
    }

    #[test]
    fn same_seed_same_simulation() {
        let mut a = make_cloud(6, 8, 42);
        let mut b = make_cloud(6, 8, 42);
        let mut ra = StdRng::seed_from_u64(5);
        let mut rb = StdRng::seed_from_u64(5);
        for _ in 0..100 {
            a.advance(&mut ra);
            b.advance(&mut rb);
        }
        assert_eq!(a, b);
    }

    #[test]
    fn draw_fills_every_cell_for_all_small_sizes() {
        let mut rng = StdRng::seed_from_u64(9);
        for w in 1..=6u16 {
            for h in 1..=6u16 {
                let mut cloud = make_cloud(w, h, (w * 10 + h) as u64);
                let mut frame = Frame::allocate(w, h, usize::MAX).unwrap();
                frame.poison();
                for _ in 0..20 {
                    cloud.advance(&mut rng);
                }
                cloud.draw(&mut frame);
                assert_eq!(frame.len(), w as usize * h as usize);
                assert!(frame.cells().iter().all(|c| *c != Cell::POISON));
                for c in frame.cells() {
                    assert!(StyleClass::ALL.contains(&c.style));
                    if c.style == StyleClass::Blank {
                        assert_eq!(c.glyph, ' ');
                    }
                }
            }
        }
    }

    #[test]
    fn draw_scenario_head_between_rows() {
        let mut cloud = make_cloud(4, 2, 3);
        for col in cloud.columns_mut() {
            col.head = 0.0;
        }
        let c0 = &mut cloud.columns_mut()[0];
        c0.head = 1.5;
        c0.trail = 2;
        c0.glyphs = vec!['A', 'B'];

        let mut frame = Frame::allocate(4, 2, usize::MAX).unwrap();
        cloud.draw(&mut frame);

        assert_eq!(frame.get(0, 0), Some(&Cell::styled('A', StyleClass::NearHead)));
        assert_eq!(frame.get(0, 1), Some(&Cell::styled('B', StyleClass::Head)));
        for x in 1..4 {
            assert_eq!(frame.get(x, 0), Some(&Cell::BLANK));
            assert_eq!(frame.get(x, 1), Some(&Cell::BLANK));
        }
    }

    #[test]
    fn draw_has_no_memory_of_previous_frames() {
        let cloud = make_cloud(5, 5, 4);
        let mut a = Frame::allocate(5, 5, usize::MAX).unwrap();
        let mut b = Frame::allocate(5, 5, usize::MAX).unwrap();
        b.poison();
        cloud.draw(&mut a);
        cloud.draw(&mut b);
        assert_eq!(a, b);
    }
}
