//! Logging setup plus macros gated on a module-level `ENABLE_LOGS` flag.
//!
//! A module opts in by declaring the flag and importing the macros from the
//! crate root:
//! ```ignore
//! const ENABLE_LOGS: bool = true;
//!
//! use crate::{log_info, log_warn};
//!
//! log_info!("generation started for {}", day);
//! ```
//! Flipping the flag to `false` silences one noisy module without touching
//! `RUST_LOG`.

/// Initializes `env_logger`. `RUST_LOG` overrides the `info` default.
pub fn init() {
    let mut builder = env_logger::Builder::new();
    builder.filter_level(log::LevelFilter::Info);
    builder.parse_default_env();
    // A second init (tests, hot reload) keeps the first logger.
    let _ = builder.try_init();
}

#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {
        if ENABLE_LOGS {
            log::info!($($arg)*);
        }
    };
}

#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {
        if ENABLE_LOGS {
            log::warn!($($arg)*);
        }
    };
}

/// Like `log_info!`, at error level.
#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {
        if ENABLE_LOGS {
            log::error!($($arg)*);
        }
    };
}
