// Copyright (c) 2026 rezky_nightky

use std::io::{stdout, Result, Stdout, Write};

use crossterm::{
    cursor,
    style::{Attribute, ResetColor, SetAttribute},
    terminal, ExecutableCommand,
};

/// Size used when the terminal cannot be queried.
pub const FALLBACK_SIZE: PhysicalSize = PhysicalSize { cols: 80, rows: 24 };

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PhysicalSize {
    pub cols: u16,
    pub rows: u16,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LogicalSize {
    pub cols: u16,
    pub rows: u16,
}

impl PhysicalSize {
    pub fn is_valid(self) -> bool {
        self.cols > 0 && self.rows > 0
    }

    /// One logical column per glyph-plus-space pair; an odd last column still
    /// gets a glyph.
    pub fn logical(self) -> LogicalSize {
        LogicalSize {
            cols: self.cols.div_ceil(2),
            rows: self.rows,
        }
    }
}

pub trait SizeOracle {
    fn physical_size(&self) -> PhysicalSize;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct TerminalSizeOracle;

impl SizeOracle for TerminalSizeOracle {
    fn physical_size(&self) -> PhysicalSize {
        match terminal::size() {
            Ok((cols, rows)) => PhysicalSize { cols, rows },
            Err(_) => FALLBACK_SIZE,
        }
    }
}

/// Owns stdout for the lifetime of the animation. Dropping it restores the
/// cursor and leaves the alternate screen.
pub struct Terminal {
    stdout: Stdout,
}

impl Terminal {
    pub fn new() -> Result<Self> {
        let mut out = stdout();
        let init_res: Result<()> = (|| {
            out.execute(terminal::EnterAlternateScreen)?;
            out.execute(cursor::Hide)?;
            let _ = out.execute(terminal::DisableLineWrap);
            out.execute(SetAttribute(Attribute::Reset))?;
            out.execute(ResetColor)?;
            out.execute(cursor::MoveTo(0, 0))?;
            out.flush()?;
            Ok(())
        })();
        if let Err(e) = init_res {
            restore_terminal_best_effort();
            return Err(e);
        }
        Ok(Self { stdout: out })
    }

    pub fn writer(&mut self) -> &mut Stdout {
        &mut self.stdout
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        restore(&mut self.stdout);
    }
}

/// Homing happens after leaving the alternate screen so it lands on the
/// main screen's cursor.
fn restore<W: Write>(out: &mut W) {
    let _ = out.execute(SetAttribute(Attribute::Reset));
    let _ = out.execute(ResetColor);
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::EnableLineWrap);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = out.execute(cursor::MoveTo(0, 0));
    let _ = out.flush();
}

/// Used from the panic hook and fatal paths where the `Terminal` may not unwind.
pub fn restore_terminal_best_effort() {
    restore(&mut stdout());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn logical_columns_round_up() {
        let s = PhysicalSize { cols: 81, rows: 24 };
        assert_eq!(s.logical(), LogicalSize { cols: 41, rows: 24 });
        let s = PhysicalSize { cols: 80, rows: 24 };
        assert_eq!(s.logical().cols, 40);
        let s = PhysicalSize { cols: 1, rows: 1 };
        assert_eq!(s.logical().cols, 1);
    }

    #[test]
    fn restore_homes_cursor_on_the_main_screen() {
        let mut buf: Vec<u8> = Vec::new();
        restore(&mut buf);
        let s = String::from_utf8(buf).unwrap();
        let leave = s.find("\x1b[?1049l").unwrap();
        let home = s.find("\x1b[1;1H").unwrap();
        assert!(leave < home);
        assert!(s.contains("\x1b[?25h"));
        assert!(s.ends_with("\x1b[1;1H"));
    }

    #[test]
    fn zero_extent_is_invalid() {
        assert!(!PhysicalSize { cols: 0, rows: 24 }.is_valid());
        assert!(!PhysicalSize { cols: 80, rows: 0 }.is_valid());
        assert!(FALLBACK_SIZE.is_valid());
    }
}
