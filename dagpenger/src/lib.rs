//! Calculation of Norwegian unemployment benefits (dagpenger).

pub mod base_amount;
pub mod calculator;
pub mod caseworker;
pub mod income;

use anyhow::Error;
use std::path::{Path, PathBuf};

/// Install a logger which prints to stderr, filtered by `RUST_LOG`.
///
/// Calling this more than once is harmless; only the first call installs a subscriber.
pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init();
}

/// Load variables from a `.env` file in the working directory or one of its parents.
///
/// Variables already present in the environment are not overridden. A missing `.env` file is not
/// an error.
///
/// # Returns
///
/// The path of the file that was loaded, or [`None`] if there is no `.env` file.
pub fn load_env() -> Result<Option<PathBuf>, Error> {
    found_env(dotenvy::dotenv())
}

/// Load variables from the env file at `path`, following the same rules as [`load_env`].
pub fn load_env_from(path: impl AsRef<Path>) -> Result<Option<PathBuf>, Error> {
    let path = path.as_ref();
    found_env(dotenvy::from_path(path).map(|()| path.to_path_buf()))
}

fn found_env(res: Result<PathBuf, dotenvy::Error>) -> Result<Option<PathBuf>, Error> {
    match res {
        Ok(path) => Ok(Some(path)),
        Err(err) if err.not_found() => Ok(None),
        Err(err) => Err(Error::msg(format!("malformed env file: {err}"))),
    }
}
