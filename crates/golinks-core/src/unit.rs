use std::path::{Path, PathBuf};

use anyhow::anyhow;

/// The four values substituted into the GoLinks systemd unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceUnit {
    pub user: String,
    pub working_directory: PathBuf,
    pub python: PathBuf,
    pub app_path: PathBuf,
}

impl ServiceUnit {
    pub fn new(
        user: impl Into<String>,
        working_directory: impl Into<PathBuf>,
        python: impl Into<PathBuf>,
        app_path: impl Into<PathBuf>,
    ) -> anyhow::Result<Self> {
        let unit = Self {
            user: user.into(),
            working_directory: working_directory.into(),
            python: python.into(),
            app_path: app_path.into(),
        };
        if unit.user.trim().is_empty() {
            return Err(anyhow!("service user must not be empty"));
        }
        for (field, path) in [
            ("working directory", &unit.working_directory),
            ("python", &unit.python),
            ("app path", &unit.app_path),
        ] {
            reject_line_breaks(field, &path.display().to_string())?;
        }
        reject_line_breaks("user", &unit.user)?;
        Ok(unit)
    }

    pub fn render(&self) -> String {
        format!(
            "[Unit]\n\
             Description=GoLinks Local Service\n\
             After=network.target\n\
             \n\
             [Service]\n\
             Type=simple\n\
             User={user}\n\
             WorkingDirectory={root}\n\
             Environment=PATH=/usr/local/bin:/usr/bin:/bin\n\
             ExecStart={python} {app}\n\
             Restart=always\n\
             \n\
             [Install]\n\
             WantedBy=multi-user.target\n",
            user = self.user,
            root = display(&self.working_directory),
            python = display(&self.python),
            app = display(&self.app_path),
        )
    }
}

fn display(path: &Path) -> String {
    path.display().to_string()
}

fn reject_line_breaks(field: &str, value: &str) -> anyhow::Result<()> {
    if value.contains('\n') || value.contains('\r') {
        return Err(anyhow!(
            "service unit {field} must not contain line breaks: {value:?}"
        ));
    }
    Ok(())
}
