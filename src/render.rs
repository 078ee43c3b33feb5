// Copyright (c) 2026 rezky_nightky

//! Diff renderer: turns the difference between two grid snapshots into the
//! shortest run-grouped stream of cursor moves, style changes and glyphs.
//!
//! Each logical cell occupies two physical columns (glyph, then a space), so
//! logical column `x` starts at physical column `2x`.

use std::io::Write;

use crossterm::{
    cursor,
    style::{Attribute, ResetColor, SetAttribute},
    terminal, QueueableCommand,
};
use log::trace;

use crate::cell::{Cell, StyleClass};
use crate::error::{try_vec, EngineError, Result};
use crate::frame::Frame;
use crate::palette::queue_style;

/// Worst case for one cell: cursor move, style activation, a 4-byte glyph and a space.
pub const BYTES_PER_CELL: usize = 64;
/// Clear/home prefix and the trailing reset.
pub const HEADER_BYTES: usize = 4096;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
    pub runs: usize,
    pub cells: usize,
    pub bytes: usize,
}

pub struct DiffRenderer {
    previous: Frame,
    out: Vec<u8>,
    budget: usize,
    phys_cols: u16,
    full_repaint: bool,
}

impl DiffRenderer {
    /// Allocates the history snapshot (poisoned) and the output buffer for a
    /// `cols` x `rows` logical grid shown on a terminal `phys_cols` wide.
    pub fn allocate(cols: u16, rows: u16, phys_cols: u16, max_cells: usize) -> Result<Self> {
        let mut previous = Frame::allocate(cols, rows, max_cells)?;
        previous.poison();

        let cells = previous.len();
        let budget = cells
            .checked_mul(BYTES_PER_CELL)
            .and_then(|b| b.checked_add(HEADER_BYTES))
            .ok_or(EngineError::Allocation {
                what: "render output buffer",
                cells,
            })?;
        let out = try_vec(budget, "render output buffer", cells)?;

        Ok(Self {
            previous,
            out,
            budget,
            phys_cols,
            full_repaint: true,
        })
    }

    #[cfg(test)]
    pub fn previous(&self) -> &Frame {
        &self.previous
    }

    pub fn force_full_repaint(&mut self) {
        self.full_repaint = true;
    }

    pub fn needs_full_repaint(&self) -> bool {
        self.full_repaint
    }

    #[cfg(test)]
    pub fn output(&self) -> &[u8] {
        &self.out
    }

    /// Encodes the update for `current` into the internal buffer without
    /// touching the history.
    pub fn encode(&mut self, current: &Frame) -> Result<RenderStats> {
        debug_assert!(current.same_shape(&self.previous));
        self.out.clear();
        let force = self.full_repaint;
        let mut stats = RenderStats::default();

        if force {
            self.out.queue(terminal::Clear(terminal::ClearType::All))?;
            self.out.queue(cursor::MoveTo(0, 0))?;
        }

        let width = current.width as usize;
        for y in 0..current.height {
            let cur = current.row(y);
            let prev = self.previous.row(y);
            let mut x = 0usize;

            while x < width {
                if !force && !cur[x].needs_update(&prev[x]) {
                    x += 1;
                    continue;
                }

                let style = cur[x].style;
                let start = x;
                let mut end = x + 1;
                while end < width
                    && cur[end].style == style
                    && (force || cur[end].needs_update(&prev[end]))
                {
                    end += 1;
                }

                emit_run(&mut self.out, self.phys_cols, y, start, &cur[start..end], style)?;
                stats.runs += 1;
                stats.cells += end - start;

                if self.out.len() > self.budget {
                    return Err(EngineError::OutputOverflow {
                        len: self.out.len(),
                        cap: self.budget,
                    });
                }
                x = end;
            }
        }

        if stats.runs > 0 {
            self.out.queue(SetAttribute(Attribute::Reset))?;
            self.out.queue(ResetColor)?;
        }
        stats.bytes = self.out.len();
        Ok(stats)
    }

    /// Adopts `current` as history by swapping buffers. `current` is left
    /// holding stale cells and must be fully rebuilt before the next encode.
    pub fn commit(&mut self, current: &mut Frame) {
        std::mem::swap(&mut self.previous, current);
        self.full_repaint = false;
    }

    /// Encode, write in a single call, then commit.
    pub fn render<W: Write>(&mut self, current: &mut Frame, w: &mut W) -> Result<RenderStats> {
        let stats = self.encode(current)?;
        if !self.out.is_empty() {
            w.write_all(&self.out)?;
            w.flush()?;
        }
        self.commit(current);
        trace!(
            "frame: {} runs, {} cells, {} bytes",
            stats.runs,
            stats.cells,
            stats.bytes
        );
        Ok(stats)
    }
}

fn emit_run(
    out: &mut Vec<u8>,
    phys_cols: u16,
    y: u16,
    start: usize,
    run: &[Cell],
    style: StyleClass,
) -> Result<()> {
    out.queue(cursor::MoveTo((start * 2) as u16, y))?;
    queue_style(out, style)?;

    let mut utf8 = [0u8; 4];
    for (i, cell) in run.iter().enumerate() {
        let glyph = if style.is_blank() { ' ' } else { cell.glyph };
        out.extend_from_slice(glyph.encode_utf8(&mut utf8).as_bytes());

        // 1-based physical column of the trailing space is 2x + 2.
        let x = start + i;
        if 2 * x + 2 <= phys_cols as usize {
            out.push(b' ');
        }
    }
    Ok(())
}
