use std::fs;

use crate::hosts::hosts_contains_entry;
use crate::{DoctorCheck, ProjectLayout};

/// Read-only snapshot of what a setup run would find on this machine.
pub fn inspect_setup(layout: &ProjectLayout, privileged: bool) -> Vec<DoctorCheck> {
    let requirements = layout.requirements_path();
    let venv = layout.venv_dir();
    let data_dir = layout.data_dir();
    let unit_path = layout.unit_install_path();

    let hosts_check = match fs::read_to_string(layout.hosts_path()) {
        Ok(contents) => DoctorCheck {
            label: "hosts entry",
            ok: hosts_contains_entry(&contents, &layout.config().hosts_line),
            detail: format!(
                "'{}' in {}",
                layout.config().hosts_line,
                layout.hosts_path().display()
            ),
        },
        Err(err) => DoctorCheck {
            label: "hosts entry",
            ok: false,
            detail: format!("cannot read {}: {err}", layout.hosts_path().display()),
        },
    };

    vec![
        DoctorCheck {
            label: "privileges",
            ok: privileged,
            detail: if privileged {
                "running as root".to_string()
            } else {
                "not running as root".to_string()
            },
        },
        DoctorCheck {
            label: "requirements",
            ok: requirements.is_file(),
            detail: requirements.display().to_string(),
        },
        DoctorCheck {
            label: "virtualenv",
            ok: venv.is_dir(),
            detail: venv.display().to_string(),
        },
        hosts_check,
        DoctorCheck {
            label: "data dir",
            ok: data_dir.is_dir(),
            detail: data_dir.display().to_string(),
        },
        DoctorCheck {
            label: "service unit",
            ok: unit_path.is_file(),
            detail: unit_path.display().to_string(),
        },
    ]
}
