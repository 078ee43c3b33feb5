// Copyright (c) 2026 rezky_nightky

/// Brightness band of a grid cell, ordered from the far end of a trail to the head.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StyleClass {
    Blank,
    TailDim,
    TailMid,
    TailBright,
    NearHead,
    Head,
}

impl StyleClass {
    #[cfg(test)]
    pub const ALL: [StyleClass; 6] = [
        StyleClass::Blank,
        StyleClass::TailDim,
        StyleClass::TailMid,
        StyleClass::TailBright,
        StyleClass::NearHead,
        StyleClass::Head,
    ];

    pub fn is_blank(self) -> bool {
        self == StyleClass::Blank
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cell {
    pub glyph: char,
    pub style: StyleClass,
}

impl Cell {
    pub const BLANK: Cell = Cell {
        glyph: ' ',
        style: StyleClass::Blank,
    };

    /// Never produced by the grid builder; compares unequal to every built cell.
    pub const POISON: Cell = Cell {
        glyph: '\0',
        style: StyleClass::Head,
    };

    pub fn styled(glyph: char, style: StyleClass) -> Self {
        if style.is_blank() {
            return Self::BLANK;
        }
        Self { glyph, style }
    }

    /// Whether drawing `self` over a terminal showing `prev` changes anything.
    pub fn needs_update(&self, prev: &Cell) -> bool {
        self.style != prev.style || (!self.style.is_blank() && self.glyph != prev.glyph)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_cells_ignore_glyph_differences() {
        let a = Cell::BLANK;
        let b = Cell {
            glyph: 'x',
            style: StyleClass::Blank,
        };
        assert!(!a.needs_update(&b));
    }

    #[test]
    fn poison_differs_from_every_built_cell() {
        for style in StyleClass::ALL {
            let c = Cell::styled('A', style);
            assert!(c.needs_update(&Cell::POISON), "{:?}", style);
        }
    }
}
