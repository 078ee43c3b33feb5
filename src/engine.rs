// Copyright (c) 2026 rezky_nightky

use std::io::Write;

use log::info;
use rand::rngs::StdRng;

use crate::{
    cloud::Cloud,
    error::{EngineError, Result},
    frame::Frame,
    render::{DiffRenderer, RenderStats},
    terminal::{LogicalSize, PhysicalSize},
};

/// Default ceiling on logical grid cells.
pub const DEFAULT_MAX_CELLS: usize = 1 << 22;

/// Everything one run of the animation owns: simulation, the grid being
/// built, and the renderer holding the previous grid.
pub struct Engine {
    size: PhysicalSize,
    rng: StdRng,
    glyphs: Vec<char>,
    max_cells: usize,
    cloud: Cloud,
    frame: Frame,
    renderer: DiffRenderer,
}

struct Parts {
    cloud: Cloud,
    frame: Frame,
    renderer: DiffRenderer,
}

impl Engine {
    pub fn new(
        size: PhysicalSize,
        glyphs: Vec<char>,
        mut rng: StdRng,
        max_cells: usize,
    ) -> Result<Self> {
        let parts = Self::allocate_parts(size, &glyphs, &mut rng, max_cells)?;
        Ok(Self {
            size,
            rng,
            glyphs,
            max_cells,
            cloud: parts.cloud,
            frame: parts.frame,
            renderer: parts.renderer,
        })
    }

    fn allocate_parts(
        size: PhysicalSize,
        glyphs: &[char],
        rng: &mut StdRng,
        max_cells: usize,
    ) -> Result<Parts> {
        if !size.is_valid() {
            return Err(EngineError::InvalidTerminalSize {
                cols: size.cols,
                rows: size.rows,
            });
        }
        let LogicalSize { cols, rows } = size.logical();
        let cloud = Cloud::allocate(cols, rows, glyphs, rng)?;
        let frame = Frame::allocate(cols, rows, max_cells)?;
        let renderer = DiffRenderer::allocate(cols, rows, size.cols, max_cells)?;
        Ok(Parts {
            cloud,
            frame,
            renderer,
        })
    }

    /// Replaces the column set and both grids for `size`. On error nothing
    /// changes and the current state keeps rendering.
    pub fn resize(&mut self, size: PhysicalSize) -> Result<()> {
        let parts = Self::allocate_parts(size, &self.glyphs, &mut self.rng, self.max_cells)?;
        self.cloud = parts.cloud;
        self.frame = parts.frame;
        self.renderer = parts.renderer;
        self.renderer.force_full_repaint();
        let logical = size.logical();
        info!(
            "resized to {}x{} ({}x{} logical)",
            size.cols, size.rows, logical.cols, logical.rows
        );
        self.size = size;
        Ok(())
    }

    pub fn physical_size(&self) -> PhysicalSize {
        self.size
    }

    pub fn logical_size(&self) -> LogicalSize {
        LogicalSize {
            cols: self.cloud.cols,
            rows: self.cloud.lines,
        }
    }

    pub fn has_extent(&self) -> bool {
        !self.frame.is_empty()
    }

    #[cfg(test)]
    pub fn cloud(&self) -> &Cloud {
        &self.cloud
    }

    #[cfg(test)]
    pub fn renderer(&self) -> &DiffRenderer {
        &self.renderer
    }

    /// Build the grid and push the diff to `out` without advancing the simulation.
    pub fn present<W: Write>(&mut self, out: &mut W) -> Result<RenderStats> {
        self.cloud.draw(&mut self.frame);
        self.renderer.render(&mut self.frame, out)
    }

    /// One frame: build, render, then advance the simulation.
    pub fn step<W: Write>(&mut self, out: &mut W) -> Result<RenderStats> {
        let stats = self.present(out)?;
        self.cloud.advance(&mut self.rng);
        Ok(stats)
    }
}
