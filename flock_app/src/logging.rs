use env_logger::{Builder, Env};
use log::{LevelFilter, SetLoggerError};

/// Level every module logs at before `RUST_LOG` is applied.
fn base_level(verbose: bool) -> LevelFilter {
    if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    }
}

/// Installs `env_logger` as the global logger.
///
/// `--verbose` picks the base level (debug, else info). `RUST_LOG` directives
/// are parsed afterwards: a bare level there replaces the base level, and
/// per-module directives such as `flock_lib::flock=trace` refine it.
///
/// Fails if a logger is already installed.
pub fn init(verbose: bool) -> Result<(), SetLoggerError> {
    Builder::new()
        .filter_level(base_level(verbose))
        .parse_env(Env::default())
        .try_init()
}
