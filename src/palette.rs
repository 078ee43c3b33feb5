// Copyright (c) 2026 rezky_nightky

use std::io::{Result, Write};

use crossterm::{
    style::{Attribute, Color, SetAttribute, SetForegroundColor},
    QueueableCommand,
};

use crate::cell::StyleClass;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Shade {
    pub fg: Color,
    pub bold: bool,
}

const fn ansi(v: u8, bold: bool) -> Option<Shade> {
    Some(Shade {
        fg: Color::AnsiValue(v),
        bold,
    })
}

/// Fixed 256-color shade for each band. Blank cells carry no style.
pub fn shade_for(style: StyleClass) -> Option<Shade> {
    match style {
        StyleClass::Blank => None,
        StyleClass::TailDim => ansi(22, false),
        StyleClass::TailMid => ansi(40, false),
        StyleClass::TailBright => ansi(82, false),
        StyleClass::NearHead => ansi(194, false),
        StyleClass::Head => ansi(15, true),
    }
}

/// Queues the activation sequence for `style`. Intensity is always set so bold
/// from a head run never bleeds into the next run.
pub fn queue_style<W: Write>(out: &mut W, style: StyleClass) -> Result<()> {
    let Some(shade) = shade_for(style) else {
        return Ok(());
    };
    out.queue(SetAttribute(if shade.bold {
        Attribute::Bold
    } else {
        Attribute::NormalIntensity
    }))?;
    out.queue(SetForegroundColor(shade.fg))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_emits_nothing() {
        let mut buf: Vec<u8> = Vec::new();
        queue_style(&mut buf, StyleClass::Blank).unwrap();
        assert!(buf.is_empty());
    }

    #[test]
    fn head_is_bold_white() {
        let mut buf: Vec<u8> = Vec::new();
        queue_style(&mut buf, StyleClass::Head).unwrap();
        let s = String::from_utf8(buf).unwrap();
        assert!(s.contains("\x1b[1m"));
        assert!(s.contains("38;5;15m"));
    }

    #[test]
    fn every_band_but_blank_has_a_distinct_color() {
        let mut seen = Vec::new();
        for style in StyleClass::ALL {
            if let Some(s) = shade_for(style) {
                assert!(!seen.contains(&s.fg));
                seen.push(s.fg);
            }
        }
        assert_eq!(seen.len(), 5);
    }
}
