// Copyright (c) 2026 rezky_nightky

use rand::Rng;

use crate::cell::StyleClass;
use crate::error::{try_vec, Result};

/// Chance per row per tick that a glyph flickers to a new character.
pub const FLICKER_CHANCE: f64 = 0.01;
/// Chance that a fresh column uses the bright trail.
pub const EMPHASIS_CHANCE: f64 = 0.4;

/// One falling trail bound to a logical screen column.
#[derive(Clone, Debug, PartialEq)]
pub struct Column {
    pub glyphs: Vec<char>,
    /// Rows advanced per tick, in `[0.05, 0.55)`.
    pub speed: f32,
    /// Rows behind the head that are still lit.
    pub trail: u16,
    /// Fractional row of the leading edge. Starts at 0 and only grows until reseed.
    pub head: f32,
    pub emphasized: bool,
}

/// Inclusive trail length bounds for a grid of `rows` rows.
pub fn trail_bounds(rows: u16) -> (u16, u16) {
    let rows = rows as f32;
    let min = ((rows * 0.30).round() as u16).max(1);
    let max = ((rows * 0.90).round() as u16).max(min);
    (min, max)
}

fn pick_glyph<R: Rng>(chars: &[char], rng: &mut R) -> char {
    if chars.is_empty() {
        return '0';
    }
    chars[rng.random_range(0..chars.len())]
}

impl Column {
    pub fn spawn<R: Rng>(rows: u16, chars: &[char], rng: &mut R) -> Result<Self> {
        let mut glyphs = try_vec(rows as usize, "column glyphs", rows as usize)?;
        glyphs.resize(rows as usize, ' ');
        let mut col = Self {
            glyphs,
            speed: 0.0,
            trail: 1,
            head: 0.0,
            emphasized: false,
        };
        col.reseed(rows, chars, rng);
        Ok(col)
    }

    /// Restarts the column at the top with fresh parameters, reusing its glyph storage.
    pub fn reseed<R: Rng>(&mut self, rows: u16, chars: &[char], rng: &mut R) {
        self.speed = (rng.random::<f32>() + 0.1) / 2.0;
        let (lo, hi) = trail_bounds(rows);
        self.trail = rng.random_range(lo..=hi);
        self.emphasized = rng.random_bool(EMPHASIS_CHANCE);
        self.head = 0.0;
        for g in &mut self.glyphs {
            *g = pick_glyph(chars, rng);
        }
    }

    pub fn is_exhausted(&self, rows: u16) -> bool {
        self.head > rows as f32 + self.trail as f32
    }

    pub fn advance<R: Rng>(&mut self, rows: u16, chars: &[char], rng: &mut R) {
        for g in &mut self.glyphs {
            if rng.random_bool(FLICKER_CHANCE) {
                *g = pick_glyph(chars, rng);
            }
        }
        self.head += self.speed;
        if self.is_exhausted(rows) {
            self.reseed(rows, chars, rng);
        }
    }

    /// Band of `row` for the current head position.
    ///
    /// Every comparison is strict, so a row sitting exactly on a band edge is
    /// left blank and no row can fall into two bands.
    pub fn style_at(&self, row: u16) -> StyleClass {
        let r = row as f32;
        let h = self.head;
        let t = h - self.trail as f32;

        if r < h - 2.0 {
            if r - 3.0 > t {
                return if self.emphasized {
                    StyleClass::TailBright
                } else {
                    StyleClass::TailMid
                };
            }
            if r - 1.0 > t {
                return StyleClass::TailMid;
            }
            if r > t {
                return StyleClass::TailDim;
            }
            return StyleClass::Blank;
        }

        if h > r + 1.0 && h < r + 2.0 {
            StyleClass::NearHead
        } else if h > r && h < r + 1.0 {
            StyleClass::Head
        } else {
            StyleClass::Blank
        }
    }
}
