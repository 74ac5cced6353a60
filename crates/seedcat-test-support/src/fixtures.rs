//! Test fixtures and environment helpers.

use std::process::{Command, Stdio};

/// Returns `true` if a Graphviz `dot` binary can be executed.
///
/// Honours `SEEDCAT_GRAPHVIZ_DOT` the same way the renderer does.
#[must_use]
pub fn graphviz_available() -> bool {
    graphviz_available_with_program(std::env::var("SEEDCAT_GRAPHVIZ_DOT").ok())
}

fn graphviz_available_with_program(program: Option<String>) -> bool {
    let program = program
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| "dot".to_string());
    Command::new(program)
        .arg("-V")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .is_ok_and(|status| status.success())
}
