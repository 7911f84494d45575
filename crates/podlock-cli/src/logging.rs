//! Logging setup for the CLI.

use clap::Args;
use std::str::FromStr;
use tracing_subscriber::filter::{EnvFilter, LevelFilter};
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Verbosity flags shared by every command.
#[derive(Args, Debug, Clone, Copy, Default)]
pub struct LogArgs {
    /// Increase logging verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbosity: u8,

    /// Decrease logging verbosity (-q warnings only, -qq errors only)
    #[arg(
        short,
        long,
        global = true,
        action = clap::ArgAction::Count,
        conflicts_with = "verbosity"
    )]
    pub quiet: u8,
}

/// Initializes the global tracing subscriber, writing to stderr.
pub fn init_global_subscriber(args: &LogArgs) {
    let env_filter = EnvFilter::from_default_env().add_directive(log_level(args).into());

    let fmt = fmt::layer()
        .without_time()
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact();

    tracing_subscriber::registry()
        .with(fmt)
        .with(env_filter)
        .init();
}

fn log_level(args: &LogArgs) -> LevelFilter {
    match args.quiet {
        0 => (),
        1 => return LevelFilter::WARN,
        _ => return LevelFilter::ERROR,
    }

    if let Ok(rust_log) = std::env::var(EnvFilter::DEFAULT_ENV) {
        if let Ok(level) = LevelFilter::from_str(&rust_log) {
            return level;
        }
    }

    match args.verbosity {
        0 => LevelFilter::INFO,
        1 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quiet_wins() {
        let args = LogArgs {
            verbosity: 0,
            quiet: 2,
        };
        assert_eq!(log_level(&args), LevelFilter::ERROR);
    }

    #[test]
    fn test_quiet_once_is_warn() {
        let args = LogArgs {
            verbosity: 0,
            quiet: 1,
        };
        assert_eq!(log_level(&args), LevelFilter::WARN);
    }
}
