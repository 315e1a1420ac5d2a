//! Diagnostics for `cbook`.
//!
//! Listings, the form and command results are the program's output and go to
//! stdout. Everything logged through `tracing` goes to stderr, so
//! `cbook list -o json | jq` keeps working at any verbosity.
//!
//! At the default level the only message a user sees is the warning emitted
//! when a submit fails the presence check. Store loads, slot writes and shell
//! input are logged at `info`, `debug` and `trace` for `-v`, `-vv` and `-vvv`.

use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// How much diagnostic output `cbook` writes to stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    /// `-q`: errors only. The incomplete-form warning is dropped too.
    Quiet,
    /// No flag: warnings, which in practice means rejected submits.
    #[default]
    Normal,
    /// `-v`: also record counts at load time.
    Verbose,
    /// `-vv` and up: every slot read, write and parsed shell line.
    Trace,
}

impl Verbosity {
    /// The most detailed level this verbosity lets through.
    #[must_use]
    pub fn level(&self) -> Level {
        match self {
            Self::Quiet => Level::ERROR,
            Self::Normal => Level::WARN,
            Self::Verbose => Level::INFO,
            Self::Trace => Level::TRACE,
        }
    }
}

/// Install the stderr subscriber.
///
/// Call once from `main`. When `RUST_LOG` is set it replaces the filter
/// derived from `verbosity`, which makes it possible to raise the level for
/// a single module, e.g. `RUST_LOG=contactbook::repository=trace`.
///
/// # Examples
///
/// ```no_run
/// use contactbook::{init_logging, logging::Verbosity};
///
/// init_logging(Verbosity::Verbose);
/// ```
pub fn init_logging(verbosity: Verbosity) {
    let default_filter = format!("contactbook={}", verbosity.level());

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&default_filter));

    let subscriber = tracing_subscriber::registry().with(env_filter).with(
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_thread_ids(false)
            .with_file(false)
            .with_line_number(false),
    );

    // A second call (tests, embedding) keeps the first subscriber.
    let _ = subscriber.try_init();
}

/// Route log output through the test harness so it shows only on failure.
#[cfg(test)]
pub fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("warn")
        .with_test_writer()
        .try_init();
}
