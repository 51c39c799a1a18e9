use std::fs;
use std::process::Command;

use anyhow::{Context, Result};

use crate::command::escalated_command;
use crate::{ProjectLayout, StageOutcome};

pub fn ensure_hosts_entry_with_runner<RunCommand>(
    layout: &ProjectLayout,
    mut run: RunCommand,
) -> Result<StageOutcome>
where
    RunCommand: FnMut(&mut Command, &str) -> Result<()>,
{
    let hosts_path = layout.hosts_path();
    let contents = fs::read_to_string(hosts_path)
        .with_context(|| format!("failed to read hosts file: {}", hosts_path.display()))?;
    let line = &layout.config().hosts_line;
    if hosts_contains_entry(&contents, line) {
        return Ok(StageOutcome::skipped("DNS entry already exists"));
    }

    // An unreadable file above is fatal; only a failed append is tolerated.
    let mut append = build_hosts_append_command(layout, &contents);
    if let Err(err) = run(&mut append, "failed to append hosts entry") {
        return Ok(StageOutcome::degraded(vec![
            format!("{err:#}"),
            manual_hosts_hint(layout),
        ]));
    }

    Ok(StageOutcome::completed("DNS entry added successfully"))
}

/// Substring match, so `127.0.0.1 go` is also satisfied by `127.0.0.1 golinks`.
pub fn hosts_contains_entry(contents: &str, line: &str) -> bool {
    contents.contains(line)
}

pub fn manual_hosts_hint(layout: &ProjectLayout) -> String {
    format!(
        "Please manually add '{}' to {}",
        layout.config().hosts_line,
        layout.hosts_path().display()
    )
}

// The line and path travel as positional parameters, never spliced into the script.
pub(crate) fn build_hosts_append_command(layout: &ProjectLayout, current: &str) -> Command {
    let format = if current.is_empty() || current.ends_with('\n') {
        "%s\\n"
    } else {
        "\\n%s\\n"
    };

    let mut command = escalated_command(layout.config(), "sh");
    command
        .arg("-c")
        .arg("printf \"$1\" \"$2\" >> \"$3\"")
        .arg("sh")
        .arg(format)
        .arg(&layout.config().hosts_line)
        .arg(layout.hosts_path());
    command
}
