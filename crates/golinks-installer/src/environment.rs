use std::process::Command;

use anyhow::Result;

use crate::{ProjectLayout, StageOutcome};

/// Creates the venv and installs the manifest into it. An existing venv
/// directory counts as already set up; its contents are not inspected.
pub fn setup_environment_with_runner<RunCommand>(
    layout: &ProjectLayout,
    mut run: RunCommand,
) -> Result<StageOutcome>
where
    RunCommand: FnMut(&mut Command, &str) -> Result<()>,
{
    if layout.venv_dir().exists() {
        return Ok(StageOutcome::skipped("Virtual environment already exists"));
    }

    let mut create = build_venv_create_command(layout);
    run(&mut create, "failed to create virtual environment")?;

    let mut install = build_pip_install_command(layout);
    run(&mut install, "failed to install dependencies")?;

    Ok(StageOutcome::completed(
        "Virtual environment created and dependencies installed",
    ))
}

pub(crate) fn build_venv_create_command(layout: &ProjectLayout) -> Command {
    let mut command = Command::new(&layout.config().python);
    command
        .args(["-m", "venv"])
        .arg(layout.venv_dir())
        .current_dir(layout.root());
    command
}

pub(crate) fn build_pip_install_command(layout: &ProjectLayout) -> Command {
    let mut command = Command::new(layout.venv_pip());
    command
        .args(["install", "-r"])
        .arg(layout.requirements_path())
        .current_dir(layout.root());
    command
}
