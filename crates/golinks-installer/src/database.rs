use std::fs;
use std::process::Command;

use anyhow::{Context, Result};

use crate::{ProjectLayout, StageOutcome};

pub const FLASK_APP_ENV: &str = "FLASK_APP";

pub fn initialize_database_with_runner<RunCommand>(
    layout: &ProjectLayout,
    mut run: RunCommand,
) -> Result<StageOutcome>
where
    RunCommand: FnMut(&mut Command, &str) -> Result<()>,
{
    let data_dir = layout.data_dir();
    fs::create_dir_all(&data_dir)
        .with_context(|| format!("failed to create data directory: {}", data_dir.display()))?;

    let mut upgrade = build_migration_command(layout);
    run(&mut upgrade, "failed to run database migrations")?;

    Ok(StageOutcome::completed("Database initialized successfully"))
}

/// `FLASK_APP` is scoped to the child; this process's environment is untouched.
pub(crate) fn build_migration_command(layout: &ProjectLayout) -> Command {
    let mut command = Command::new(layout.venv_flask());
    command
        .args(["db", "upgrade"])
        .env(FLASK_APP_ENV, layout.app_path())
        .current_dir(layout.root());
    command
}
