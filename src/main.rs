// Copyright (c) 2026 rezky_nightky

mod cell;
mod charset;
mod cloud;
mod column;
mod config;
mod engine;
mod error;
mod frame;
mod palette;
mod render;
mod resize;
mod scheduler;
mod stats;
mod terminal;

use std::fs::OpenOptions;
use std::io::IsTerminal;
use std::path::Path;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};
use std::time::Instant;

use clap::Parser;
use log::{error, info};
use rand::{rngs::StdRng, SeedableRng};

#[cfg(unix)]
use signal_hook::consts::{SIGHUP, SIGINT, SIGTERM, SIGWINCH};

use crate::charset::print_list_charsets;
use crate::config::{Args, Settings};
use crate::engine::Engine;
use crate::error::EngineError;
use crate::resize::ResizeCoordinator;
use crate::scheduler::FrameClock;
use crate::stats::PerfStats;
use crate::terminal::{restore_terminal_best_effort, SizeOracle, Terminal, TerminalSizeOracle};

fn build_info() -> &'static str {
    env!("CATRIX_BUILD")
}

fn git_sha() -> &'static str {
    match env!("CATRIX_GIT_SHA") {
        "" => "unknown",
        sha => sha,
    }
}

#[derive(Debug, PartialEq, Eq)]
enum LogSink<'a> {
    File(&'a Path),
    Stderr,
    Disabled,
}

/// stdout and a terminal stderr share the animated screen, so stderr only
/// receives records when it is redirected away from the terminal.
fn choose_log_sink(path: Option<&Path>, stderr_is_terminal: bool) -> LogSink<'_> {
    match path {
        Some(path) => LogSink::File(path),
        None if stderr_is_terminal => LogSink::Disabled,
        None => LogSink::Stderr,
    }
}

/// Default filter is `info` for a log file and `off` for redirected stderr;
/// `RUST_LOG` overrides either.
fn init_logger(path: Option<&Path>) -> std::io::Result<()> {
    let sink = choose_log_sink(path, std::io::stderr().is_terminal());
    let default_filter = match sink {
        LogSink::File(_) => "info",
        LogSink::Stderr => "off",
        LogSink::Disabled => return Ok(()),
    };
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter));
    builder.format_timestamp_millis();
    if let LogSink::File(path) = sink {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }
    builder.init();
    Ok(())
}

fn install_signal_handlers(shutdown: &Arc<AtomicBool>, resized: &Arc<AtomicBool>) {
    #[cfg(unix)]
    {
        for sig in [SIGINT, SIGTERM, SIGHUP] {
            if let Err(e) = signal_hook::flag::register(sig, Arc::clone(shutdown)) {
                eprintln!("failed to install handler for signal {}: {}", sig, e);
            }
        }
        if let Err(e) = signal_hook::flag::register(SIGWINCH, Arc::clone(resized)) {
            eprintln!("failed to install resize handler: {}", e);
        }
    }

    #[cfg(windows)]
    {
        // No resize signal here; the coordinator's size poll covers it.
        let _ = resized;
        let flag = Arc::clone(shutdown);
        if let Err(e) = ctrlc::set_handler(move || flag.store(true, Ordering::Release)) {
            eprintln!("failed to install Ctrl-C handler: {}", e);
        }
    }
}

fn main() -> std::io::Result<()> {
    std::panic::set_hook(Box::new(|info| {
        restore_terminal_best_effort();
        eprintln!("{}", info);
    }));

    let args = Args::parse();

    if args.list_charsets {
        print_list_charsets();
        return Ok(());
    }

    if args.version {
        println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    if args.info {
        println!("Version: v{}", env!("CARGO_PKG_VERSION"));
        println!("Build: {}", build_info());
        println!("Commit: {}", git_sha());
        println!("Authors: {}", env!("CARGO_PKG_AUTHORS"));
        println!("License: {}", env!("CARGO_PKG_LICENSE"));
        return Ok(());
    }

    let settings = match Settings::from_args(&args) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = init_logger(settings.log_file.as_deref()) {
        eprintln!("failed to open log file: {}", e);
        std::process::exit(1);
    }

    let shutdown = Arc::new(AtomicBool::new(false));
    let mut resize = ResizeCoordinator::new();
    install_signal_handlers(&shutdown, &resize.flag());

    let rng = match settings.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let oracle = TerminalSizeOracle;
    let size = oracle.physical_size();
    let mut engine = match Engine::new(size, settings.glyphs.clone(), rng, settings.max_cells) {
        Ok(e) => e,
        Err(e) => {
            error!("startup failed: {}", e);
            eprintln!("catrix: {}", e);
            std::process::exit(1);
        }
    };
    info!(
        "starting at {}x{} ({} fps, {} glyphs, seed {})",
        size.cols,
        size.rows,
        settings.fps,
        settings.glyphs.len(),
        settings
            .seed
            .map_or_else(|| "os".to_string(), |s| s.to_string())
    );

    let mut term = Terminal::new()?;
    let mut clock = FrameClock::new(settings.frame_period);
    let mut stats = PerfStats::default();
    let start_time = Instant::now();
    let end_time = settings.duration.map(|d| start_time + d);

    loop {
        if shutdown.load(Ordering::Acquire) {
            break;
        }
        if end_time.is_some_and(|end| Instant::now() >= end) {
            break;
        }

        let outcome = resize.at_safe_point(&oracle, &mut engine);
        if outcome.skips_frame() || !engine.has_extent() {
            stats.record_skip();
            clock.wait();
            continue;
        }

        let work_start = Instant::now();
        match engine.step(term.writer()) {
            Ok(frame) => stats.record(work_start.elapsed(), clock.period(), frame),
            Err(e @ EngineError::OutputOverflow { .. }) => {
                error!("{}", e);
                restore_terminal_best_effort();
                eprintln!("catrix: {}", e);
                std::process::abort();
            }
            Err(EngineError::Io(e)) => {
                drop(term);
                return Err(e);
            }
            Err(e) => {
                drop(term);
                eprintln!("catrix: {}", e);
                std::process::exit(1);
            }
        }

        clock.wait();
    }

    info!("shutting down after {} frames", stats.frames);
    drop(term);

    if settings.perf_stats {
        stats.print_summary(start_time.elapsed(), settings.fps);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_file_always_wins() {
        let path = Path::new("/tmp/catrix.log");
        assert_eq!(choose_log_sink(Some(path), true), LogSink::File(path));
        assert_eq!(choose_log_sink(Some(path), false), LogSink::File(path));
    }

    #[test]
    fn info_authors_match_the_source_header() {
        let header = include_str!("main.rs").lines().next().unwrap_or_default();
        assert!(header.ends_with(env!("CARGO_PKG_AUTHORS")), "{}", header);
    }

    #[test]
    fn terminal_stderr_never_receives_logs() {
        assert_eq!(choose_log_sink(None, true), LogSink::Disabled);
        assert_eq!(choose_log_sink(None, false), LogSink::Stderr);
    }
}
