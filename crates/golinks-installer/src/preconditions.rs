use anyhow::{anyhow, Result};

use crate::{ProjectLayout, StageOutcome};

pub fn is_privileged() -> bool {
    nix::unistd::geteuid().is_root()
}

pub fn check_preconditions(layout: &ProjectLayout, privileged: bool) -> Result<StageOutcome> {
    if !privileged {
        return Err(anyhow!(
            "This tool requires sudo privileges for DNS and service setup.\nPlease run: sudo golinks-setup"
        ));
    }

    let requirements = layout.requirements_path();
    if !requirements.is_file() {
        return Err(anyhow!(
            "{} not found in the root directory: {}",
            layout.config().requirements_file,
            layout.root().display()
        ));
    }

    Ok(StageOutcome::completed(format!(
        "running as root with {}",
        requirements.display()
    )))
}
