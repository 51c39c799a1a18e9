use std::fs;
use std::process::Command;

use anyhow::{Context, Result};
use golinks_core::{ServiceUnit, SetupConfig};

use crate::command::escalated_command;
use crate::{ProjectLayout, StageOutcome};

/// Writes the unit to the temp path, moves it into the unit directory, then
/// reloads, enables and starts it. The first failing step aborts the rest;
/// earlier steps are not undone.
pub fn install_service_with_runner<RunCommand>(
    layout: &ProjectLayout,
    env_user: Option<String>,
    mut run: RunCommand,
) -> Result<StageOutcome>
where
    RunCommand: FnMut(&mut Command, &str) -> Result<()>,
{
    let user = resolve_service_user(layout.config(), env_user)?;
    let unit = build_service_unit(layout, user)?;

    let tmp_path = layout.unit_tmp_path();
    fs::write(&tmp_path, unit.render().as_bytes())
        .with_context(|| format!("failed to write service unit: {}", tmp_path.display()))?;

    let mut install = escalated_command(layout.config(), "mv");
    install.arg(&tmp_path).arg(layout.unit_install_path());
    run(&mut install, "failed to install service unit")?;

    let unit_name = &layout.config().unit_name;
    for (args, context_message) in [
        (vec!["daemon-reload"], "failed to reload systemd units"),
        (vec!["enable", unit_name.as_str()], "failed to enable service"),
        (vec!["start", unit_name.as_str()], "failed to start service"),
    ] {
        let mut systemctl = escalated_command(layout.config(), "systemctl");
        systemctl.args(args);
        run(&mut systemctl, context_message)?;
    }

    Ok(StageOutcome::completed(
        "Service installed and started successfully",
    ))
}

pub fn build_service_unit(layout: &ProjectLayout, user: String) -> Result<ServiceUnit> {
    ServiceUnit::new(
        user,
        layout.root(),
        layout.venv_python(),
        layout.app_path(),
    )
}

/// `service_user` from config wins over `USER`.
pub fn resolve_service_user(config: &SetupConfig, env_user: Option<String>) -> Result<String> {
    config
        .service_user
        .clone()
        .or(env_user.filter(|user| !user.trim().is_empty()))
        .context("USER is not set; cannot resolve service user")
}
