//! File-backed logger setup for the binary.

use std::fs::File;
use std::path::{Path, PathBuf};

use env_logger::{Builder, Env, Target};
use log::LevelFilter;

/// Where log output goes when no `--log-file` is given.
///
/// The game owns the terminal in raw alternate-screen mode, so anything
/// written to stderr would land on top of the playfield.
pub fn default_log_path() -> PathBuf {
    std::env::temp_dir().join("galaxia.log")
}

/// Initializes the global logger, writing to `path`.
///
/// When `verbose` is `true`, all debug messages are recorded. Otherwise only
/// info level and above are kept. `RUST_LOG` overrides both.
pub fn init(verbose: bool, path: &Path) -> std::io::Result<()> {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };

    let file = File::create(path)?;
    let env = Env::default().default_filter_or(level.to_string());
    let mut builder = Builder::from_env(env);
    builder.target(Target::Pipe(Box::new(file)));

    // `try_init` only fails if a logger was already set. Ignore that case so
    // tests can call `init` multiple times without panicking.
    let _ = builder.try_init();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_creates_log_file_and_tolerates_repeats() {
        let path = std::env::temp_dir().join("galaxia-logging-test.log");
        init(true, &path).unwrap();
        init(false, &path).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn unwritable_path_is_an_error() {
        let path = std::env::temp_dir().join("no-such-dir").join("x").join("galaxia.log");
        assert!(init(false, &path).is_err());
    }
}
