// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Tracing subscriber setup

use crate::config::{HostConfig, HostError};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Install the global subscriber.
///
/// `RUST_LOG` wins over the configured level. Logs go to stderr, or to
/// `log_path` when set; stdout stays reserved for transport output. The
/// returned guard must be held until exit when logging to a file.
pub fn setup_logging(config: &HostConfig) -> Result<Option<WorkerGuard>, HostError> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .map_err(|e| HostError::Logging(e.to_string()))?;

    let Some(log_path) = &config.log_path else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_writer(std::io::stderr))
            .try_init()
            .map_err(|e| HostError::Logging(e.to_string()))?;
        return Ok(None);
    };

    let (dir, file) = match (log_path.parent(), log_path.file_name()) {
        (Some(dir), Some(file)) => (dir, file),
        _ => {
            return Err(HostError::Logging(format!(
                "invalid log path: {}",
                log_path.display()
            )))
        }
    };
    if !dir.as_os_str().is_empty() {
        std::fs::create_dir_all(dir).map_err(|source| HostError::Io {
            path: dir.to_path_buf(),
            source,
        })?;
    }

    let file_appender = tracing_appender::rolling::never(dir, file);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(non_blocking).with_ansi(false))
        .try_init()
        .map_err(|e| HostError::Logging(e.to_string()))?;

    Ok(Some(guard))
}
