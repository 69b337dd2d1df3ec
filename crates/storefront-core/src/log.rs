//! User-facing log lines
//!
//! With the `tui` feature these render through `cliclack::log` so they line up
//! with the prompts; otherwise they fall back to colored lines on stderr.

use std::fmt::Display;
use std::sync::atomic::{AtomicBool, Ordering};

static VERBOSE: AtomicBool = AtomicBool::new(false);

/// Enable or disable `debug` output
pub fn set_verbose(verbose: bool) {
    VERBOSE.store(verbose, Ordering::Relaxed);
}

pub fn is_verbose() -> bool {
    VERBOSE.load(Ordering::Relaxed)
}

#[cfg(feature = "tui")]
mod sink {
    use std::fmt::Display;

    pub fn info(msg: impl Display) {
        let _ = cliclack::log::info(msg);
    }

    pub fn success(msg: impl Display) {
        let _ = cliclack::log::success(msg);
    }

    pub fn warning(msg: impl Display) {
        let _ = cliclack::log::warning(msg);
    }

    pub fn error(msg: impl Display) {
        let _ = cliclack::log::error(msg);
    }

    pub fn debug(msg: impl Display) {
        let _ = cliclack::log::remark(msg);
    }
}

#[cfg(not(feature = "tui"))]
mod sink {
    use colored::Colorize;
    use std::fmt::Display;

    pub fn info(msg: impl Display) {
        eprintln!("{} {}", "->".blue(), msg);
    }

    pub fn success(msg: impl Display) {
        eprintln!("{} {}", "ok".green(), msg);
    }

    pub fn warning(msg: impl Display) {
        eprintln!("{} {}", "Warning:".yellow(), msg);
    }

    pub fn error(msg: impl Display) {
        eprintln!("{} {}", "Error:".red().bold(), msg);
    }

    pub fn debug(msg: impl Display) {
        eprintln!("{}", msg.to_string().dimmed());
    }
}

pub fn info(msg: impl Display) {
    sink::info(msg);
}

pub fn success(msg: impl Display) {
    sink::success(msg);
}

pub fn warning(msg: impl Display) {
    sink::warning(msg);
}

pub fn error(msg: impl Display) {
    sink::error(msg);
}

/// Only printed when verbose output was requested
pub fn debug(msg: impl Display) {
    if is_verbose() {
        sink::debug(msg);
    }
}
