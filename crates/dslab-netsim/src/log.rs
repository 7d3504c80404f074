//! Logging facilities.
//!
//! The macros take any value with `name()` and `time()` methods (e.g. [`NetworkSimulator`](crate::NetworkSimulator))
//! and prefix the message with the current simulation time, level and the simulator name.
//!
//! ```rust
//! use std::io::Write;
//! use env_logger::Builder;
//! use dslab_netsim::{log_debug, log_info, NetworkSimulator};
//!
//! Builder::from_default_env()
//!     .format(|buf, record| writeln!(buf, "{}", record.args()))
//!     .init();
//!
//! let mut sim = NetworkSimulator::new();
//! sim.add_node_default("a");
//! log_info!(sim, "started with {} nodes", sim.nodes().count());
//! log_debug!(sim, "idle");
//! ```

use atty::Stream;
use colored::{Color, ColoredString, Colorize};

/// Applies the color to the string if stderr (log) goes to console.
pub fn get_colored(s: &str, color: Color) -> ColoredString {
    if atty::is(Stream::Stderr) {
        s.color(color)
    } else {
        s.normal()
    }
}

#[doc(hidden)]
#[macro_export]
macro_rules! log_sim {
    ($level:ident, $label:literal, $color:ident, $sim:expr, $msg:expr) => (
        ::log::$level!(
            target: $sim.name(),
            "[{} {} {}] {}",
            $sim.time(), $crate::log::get_colored($label, $crate::colored::Color::$color), $sim.name(), $msg
        )
    );
    ($level:ident, $label:literal, $color:ident, $sim:expr, $format:expr, $($arg:tt)+) => (
        ::log::$level!(
            target: $sim.name(),
            concat!("[{} {} {}] ", $format),
            $sim.time(), $crate::log::get_colored($label, $crate::colored::Color::$color), $sim.name(), $($arg)+
        )
    );
}

/// Logs a message at the info level.
#[macro_export]
macro_rules! log_info {
    ($sim:expr, $($arg:tt)+) => ($crate::log_sim!(info, "INFO ", Green, $sim, $($arg)+));
}

/// Logs a message at the debug level.
#[macro_export]
macro_rules! log_debug {
    ($sim:expr, $($arg:tt)+) => ($crate::log_sim!(debug, "DEBUG", Blue, $sim, $($arg)+));
}

/// Logs a message at the trace level.
#[macro_export]
macro_rules! log_trace {
    ($sim:expr, $($arg:tt)+) => ($crate::log_sim!(trace, "TRACE", Cyan, $sim, $($arg)+));
}

/// Logs a message at the warn level.
#[macro_export]
macro_rules! log_warn {
    ($sim:expr, $($arg:tt)+) => ($crate::log_sim!(warn, "WARN ", Yellow, $sim, $($arg)+));
}
