// Copyright (c) 2026 rezky_nightky

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("failed to allocate {what} for {cells} cells")]
    Allocation { what: &'static str, cells: usize },

    #[error("invalid terminal size {cols}x{rows}")]
    InvalidTerminalSize { cols: u16, rows: u16 },

    #[error("render output overflowed its buffer ({len} > {cap} bytes)")]
    OutputOverflow { len: usize, cap: usize },

    #[error("terminal i/o: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, EngineError>;

/// Reserves exactly `n` slots, mapping failure to [`EngineError::Allocation`].
pub fn try_vec<T>(n: usize, what: &'static str, cells: usize) -> Result<Vec<T>> {
    let mut v = Vec::new();
    v.try_reserve_exact(n)
        .map_err(|_| EngineError::Allocation { what, cells })?;
    Ok(v)
}
