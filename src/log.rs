// src/log.rs
//! Subscriber bootstrap for the `logf!` / `logd!` / `loge!` macros.
//!
//! The library only emits events. Hosts (the CLI, a poller) call [`init`] once.

use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};

use tracing_subscriber::EnvFilter;

use crate::config::consts::LOG_FILE;
use crate::error::HoursError;

#[doc(hidden)]
pub use tracing;

static INSTALLED: OnceLock<()> = OnceLock::new();

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LogTarget {
    Stderr,
    File(PathBuf),
}

impl Default for LogTarget {
    fn default() -> Self {
        LogTarget::File(PathBuf::from(LOG_FILE))
    }
}

fn filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Install the global subscriber. Later calls are no-ops.
pub fn init(target: LogTarget) -> Result<(), HoursError> {
    if INSTALLED.get().is_some() {
        return Ok(());
    }

    match target {
        LogTarget::Stderr => {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter())
                .with_writer(std::io::stderr)
                .try_init();
        }
        LogTarget::File(path) => {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    fs::create_dir_all(parent)
                        .map_err(|source| HoursError::Io { path: parent.to_path_buf(), source })?;
                }
            }
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .map_err(|source| HoursError::Io { path: path.clone(), source })?;

            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter())
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init();
        }
    }

    let _ = INSTALLED.set(());
    Ok(())
}
