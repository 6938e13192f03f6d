//! Tracing subscriber initialisation.
//!
//! `plinth-core` only emits spans and events. Whatever process embeds
//! Plinth calls [`init_logging`] once at startup.
//!
//! # Verbosity mapping
//!
//! | Setting        | Filter level |
//! |----------------|--------------|
//! | `verbose = 0`  | WARN         |
//! | `verbose = 1`  | INFO         |
//! | `verbose = 2`  | DEBUG        |
//! | `verbose >= 3` | TRACE        |
//! | `quiet`        | ERROR        |
//!
//! `RUST_LOG` overrides all of the above if set.

use std::io::IsTerminal as _;

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Subscriber settings, usually filled from command-line flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LogSettings {
    pub verbose: u8,
    pub quiet: bool,
    pub no_color: bool,
}

/// Initialise the global tracing subscriber, writing to stderr.
///
/// Returns an error if a subscriber is already registered in this process.
///
/// ```rust,no_run
/// use plinth_adapters::logging::{LogSettings, init_logging};
///
/// # fn main() -> anyhow::Result<()> {
/// init_logging(&LogSettings { verbose: 1, ..LogSettings::default() })?;
/// let plinth = plinth_adapters::Plinth::from_env()?;
/// plinth.deploy()?;
/// # Ok(())
/// # }
/// ```
pub fn init_logging(settings: &LogSettings) -> anyhow::Result<()> {
    let level = derive_level(settings);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "plinth_core={level},plinth_adapters={level}"
        ))
    });

    let use_ansi = !settings.no_color && std::io::stderr().is_terminal();

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_ansi(use_ansi)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialise tracing: {e}"))?;

    Ok(())
}

/// Translate the verbosity counter + quiet flag to a level string.
fn derive_level(settings: &LogSettings) -> &'static str {
    if settings.quiet {
        return "error";
    }
    match settings.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(verbose: u8, quiet: bool) -> LogSettings {
        LogSettings {
            verbose,
            quiet,
            no_color: true,
        }
    }

    #[test]
    fn level_default() {
        assert_eq!(derive_level(&settings(0, false)), "warn");
    }

    #[test]
    fn level_follows_verbosity() {
        assert_eq!(derive_level(&settings(1, false)), "info");
        assert_eq!(derive_level(&settings(2, false)), "debug");
        assert_eq!(derive_level(&settings(3, false)), "trace");
        assert_eq!(derive_level(&settings(10, false)), "trace");
    }

    #[test]
    fn init_registers_once() {
        init_logging(&settings(2, false)).unwrap();
        tracing::debug!("subscriber installed");
        assert!(init_logging(&settings(0, false)).is_err());
    }

    #[test]
    fn quiet_overrides_verbose() {
        assert_eq!(derive_level(&settings(0, true)), "error");
        assert_eq!(derive_level(&settings(3, true)), "error");
    }
}
