//! Subprocess adapter for the external pathfinding executable.
//!
//! The backend is an opaque oracle: `<executable> <mode> <start> [end]` in,
//! text out. No structured status exists, so failures are folded into the
//! returned text with a sentinel prefix and the parser never sees an `Err`.

use std::path::PathBuf;
use std::process::Command;

use tracing::debug;

use crate::traits::{PathfindingBackend, RouteQuery};

#[derive(Debug, Clone)]
pub struct BackendConfig {
    /// Path to the pathfinding executable.
    pub executable: PathBuf,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            executable: PathBuf::from("./evacuation"),
        }
    }
}

/// Runs the evacuation pathfinding executable and captures its stdout.
#[derive(Debug, Clone)]
pub struct EvacuationBackend {
    config: BackendConfig,
}

impl EvacuationBackend {
    pub fn new(config: BackendConfig) -> Self {
        Self { config }
    }
}

impl PathfindingBackend for EvacuationBackend {
    fn query(&self, query: &RouteQuery) -> String {
        let args = query.to_args();
        debug!(
            executable = %self.config.executable.display(),
            ?args,
            "invoking pathfinding backend"
        );

        let output = match Command::new(&self.config.executable).args(&args).output() {
            Ok(output) => output,
            Err(err) => return format!("Error running backend: {err}"),
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return format!(
                "Error running backend: exited with {}: {}",
                output.status,
                stderr.trim()
            );
        }

        String::from_utf8_lossy(&output.stdout).into_owned()
    }
}
