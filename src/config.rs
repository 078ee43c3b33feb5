// Copyright (c) 2026 rezky_nightky

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::charset::{build_chars, charset_from_str, parse_user_chars};
use crate::engine::DEFAULT_MAX_CELLS;

#[derive(Parser, Debug, Clone)]
#[command(name = "catrix", version, disable_version_flag = true)]
pub struct Args {
    #[arg(
        short = 'f',
        long = "fps",
        default_value_t = 60.0,
        help_heading = "GENERAL",
        help = "Target frame rate (min 1 max 240)"
    )]
    pub fps: f64,

    #[arg(
        long = "duration",
        help_heading = "GENERAL",
        help = "Stop after N seconds (min 0.1 max 86400; <=0 disables)"
    )]
    pub duration: Option<f64>,

    #[arg(
        long = "seed",
        help_heading = "GENERAL",
        help = "Seed the simulation for a reproducible run"
    )]
    pub seed: Option<u64>,

    #[arg(
        long = "charset",
        default_value = "catrix",
        help_heading = "CHARSET",
        help = "Charset preset (see --list-charsets)"
    )]
    pub charset: String,

    #[arg(
        long = "chars",
        help_heading = "CHARSET",
        help = "Custom characters override, e.g. \"01\""
    )]
    pub chars: Option<String>,

    #[arg(
        long = "max-cells",
        default_value_t = DEFAULT_MAX_CELLS,
        help_heading = "PERFORMANCE",
        help = "Largest logical grid (columns x rows) to allocate"
    )]
    pub max_cells: usize,

    #[arg(
        long = "perf-stats",
        help_heading = "PERFORMANCE",
        help = "Print performance statistics summary on exit"
    )]
    pub perf_stats: bool,

    #[arg(
        long = "log-file",
        help_heading = "GENERAL",
        help = "Append log records to this file (RUST_LOG sets the filter; without it, logs only go to a redirected stderr)"
    )]
    pub log_file: Option<PathBuf>,

    #[arg(
        long = "list-charsets",
        help_heading = "HELP",
        help = "List available charset presets and exit"
    )]
    pub list_charsets: bool,

    #[arg(
        long = "info",
        short = 'i',
        help_heading = "HELP",
        help = "Print version info and exit"
    )]
    pub info: bool,

    #[arg(
        long = "version",
        short = 'v',
        help_heading = "HELP",
        help = "Print version and exit"
    )]
    pub version: bool,
}

/// Validated run configuration.
#[derive(Clone, Debug, PartialEq)]
pub struct Settings {
    pub fps: f64,
    pub frame_period: Duration,
    pub duration: Option<Duration>,
    pub seed: Option<u64>,
    pub glyphs: Vec<char>,
    pub max_cells: usize,
    pub perf_stats: bool,
    pub log_file: Option<PathBuf>,
}

fn require_f64_range(name: &str, v: f64, min: f64, max: f64) -> Result<f64, String> {
    if !v.is_finite() {
        return Err(format!(
            "failed to apply {} {} (must be a finite number)",
            name, v
        ));
    }
    if v < min || v > max {
        return Err(format!(
            "failed to apply {} {} (min {} max {})",
            name, v, min, max
        ));
    }
    Ok(v)
}

impl Settings {
    pub fn from_args(args: &Args) -> Result<Self, String> {
        let fps = require_f64_range("--fps", args.fps, 1.0, 240.0)?;

        let duration = match args.duration {
            Some(s) if !s.is_finite() => {
                return Err(format!(
                    "failed to apply --duration {} (must be a finite number)",
                    s
                ))
            }
            Some(s) if s > 0.0 => Some(Duration::from_secs_f64(require_f64_range(
                "--duration",
                s,
                0.1,
                86400.0,
            )?)),
            _ => None,
        };

        let glyphs = match &args.chars {
            Some(spec) => parse_user_chars(spec)?,
            None => build_chars(charset_from_str(&args.charset)?),
        };

        if args.max_cells == 0 {
            return Err("failed to apply --max-cells 0 (min 1)".to_string());
        }

        Ok(Self {
            fps,
            frame_period: Duration::from_secs_f64(1.0 / fps),
            duration,
            seed: args.seed,
            glyphs,
            max_cells: args.max_cells,
            perf_stats: args.perf_stats,
            log_file: args.log_file.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charset::CATRIX_GLYPHS;

    fn parse(argv: &[&str]) -> Result<Settings, String> {
        let mut full = vec!["catrix"];
        full.extend_from_slice(argv);
        let args = Args::try_parse_from(full).map_err(|e| e.to_string())?;
        Settings::from_args(&args)
    }

    #[test]
    fn defaults_run_at_sixty_hz_with_catrix_glyphs() {
        let s = parse(&[]).unwrap();
        assert_eq!(s.fps, 60.0);
        assert_eq!(s.frame_period, Duration::from_secs_f64(1.0 / 60.0));
        assert_eq!(s.glyphs, CATRIX_GLYPHS.chars().collect::<Vec<_>>());
        assert_eq!(s.duration, None);
        assert_eq!(s.seed, None);
        assert_eq!(s.max_cells, DEFAULT_MAX_CELLS);
    }

    #[test]
    fn fps_out_of_range_is_rejected() {
        let err = parse(&["--fps", "0"]).unwrap_err();
        assert!(err.contains("failed to apply --fps"));
        assert!(parse(&["--fps", "500"]).is_err());
    }

    #[test]
    fn non_positive_duration_disables_the_limit() {
        assert_eq!(parse(&["--duration", "0"]).unwrap().duration, None);
        assert_eq!(
            parse(&["--duration", "2.5"]).unwrap().duration,
            Some(Duration::from_millis(2500))
        );
        assert!(parse(&["--duration", "0.01"]).is_err());
    }

    #[test]
    fn custom_chars_override_charset() {
        let s = parse(&["--charset", "hex", "--chars", "xy"]).unwrap();
        assert_eq!(s.glyphs, vec!['x', 'y']);
        assert!(parse(&["--charset", "nope"]).is_err());
    }

    #[test]
    fn seed_and_log_file_are_carried() {
        let s = parse(&["--seed", "42", "--log-file", "/tmp/catrix.log"]).unwrap();
        assert_eq!(s.seed, Some(42));
        assert_eq!(s.log_file, Some(PathBuf::from("/tmp/catrix.log")));
    }
}
