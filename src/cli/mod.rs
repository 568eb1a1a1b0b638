//! Command-line front end

pub mod commands;
pub mod output;
pub mod types;

pub use types::{AskArgs, ChunksArgs, Cli, Commands, RetrieveArgs};

use crate::domain::errors::PipelineError;

/// Report a failed command on stderr and exit non-zero
pub fn handle_error(err: anyhow::Error, json_mode: bool) -> ! {
    let kind = err
        .downcast_ref::<PipelineError>()
        .map_or("error", PipelineError::kind);

    if json_mode {
        let payload = serde_json::json!({
            "error": {
                "kind": kind,
                "message": format!("{err:#}"),
            }
        });
        eprintln!("{payload}");
    } else {
        eprintln!("{} {err:#}", console::style("Error:").red().bold());
    }

    std::process::exit(1);
}
