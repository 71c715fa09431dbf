/*
    Level-gated diagnostics written to stderr
*/

use std::fmt::{self, Display};
use std::sync::atomic::{AtomicU8, Ordering};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    Error = 1,
    Warn = 2,
    Info = 3,
    Debug = 4,
    Trace = 5,
}

impl Level {
    // Maps the number of `-v` flags onto a level, starting from warnings
    pub fn from_verbosity(count: u8) -> Self {
        match count {
            0 => Level::Warn,
            1 => Level::Info,
            2 => Level::Debug,
            _ => Level::Trace,
        }
    }
}

impl Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Level::Error => write!(f, "ERROR"),
            Level::Warn => write!(f, "WARN"),
            Level::Info => write!(f, "INFO"),
            Level::Debug => write!(f, "DEBUG"),
            Level::Trace => write!(f, "TRACE"),
        }
    }
}

static MAX_LEVEL: AtomicU8 = AtomicU8::new(Level::Warn as u8);

pub fn set_level(level: Level) {
    MAX_LEVEL.store(level as u8, Ordering::Relaxed);
}

pub fn enabled(level: Level) -> bool {
    level as u8 <= MAX_LEVEL.load(Ordering::Relaxed)
}

macro_rules! log {
    ($level:expr, $($arg:tt)*) => {
        if $crate::logging::enabled($level) {
            eprintln!("[{}] {}", $level, format!($($arg)*));
        }
    };
}

macro_rules! log_error {
    ($($arg:tt)*) => { log!($crate::logging::Level::Error, $($arg)*) };
}

macro_rules! log_warn {
    ($($arg:tt)*) => { log!($crate::logging::Level::Warn, $($arg)*) };
}

macro_rules! log_info {
    ($($arg:tt)*) => { log!($crate::logging::Level::Info, $($arg)*) };
}

macro_rules! log_debug {
    ($($arg:tt)*) => { log!($crate::logging::Level::Debug, $($arg)*) };
}

macro_rules! log_trace {
    ($($arg:tt)*) => { log!($crate::logging::Level::Trace, $($arg)*) };
}
