use std::process::Command;

use anyhow::{anyhow, Context, Result};
use golinks_core::SetupConfig;
use tracing::debug;

pub fn run_command(command: &mut Command, context_message: &str) -> Result<()> {
    let rendered = describe_command(command);
    debug!(
        command = %rendered,
        env = ?env_keys(command),
        cwd = ?command.get_current_dir(),
        "running command"
    );

    let output = command
        .output()
        .with_context(|| format!("{context_message}: command failed to start: {rendered}"))?;
    if output.status.success() {
        return Ok(());
    }

    let stderr = String::from_utf8_lossy(&output.stderr);
    let stdout = String::from_utf8_lossy(&output.stdout);
    Err(anyhow!(
        "{context_message}: command='{}' status={} stdout='{}' stderr='{}'",
        rendered,
        output.status,
        stdout.trim(),
        stderr.trim()
    ))
}

/// Renders `program arg1 arg2 ...` for messages.
pub fn describe_command(command: &Command) -> String {
    std::iter::once(command.get_program())
        .chain(command.get_args())
        .map(|part| part.to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Builds `<escalation_program> <program>`, e.g. `sudo systemctl`.
pub(crate) fn escalated_command(config: &SetupConfig, program: &str) -> Command {
    let mut command = Command::new(&config.escalation_program);
    command.arg(program);
    command
}

fn env_keys(command: &Command) -> Vec<String> {
    command
        .get_envs()
        .map(|(key, _)| key.to_string_lossy().into_owned())
        .collect()
}
