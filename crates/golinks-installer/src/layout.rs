use anyhow::{anyhow, Context, Result};
use golinks_core::SetupConfig;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectLayout {
    root: PathBuf,
    home: PathBuf,
    config: SetupConfig,
}

impl ProjectLayout {
    pub fn new(root: impl Into<PathBuf>, home: impl Into<PathBuf>, config: SetupConfig) -> Self {
        Self {
            root: root.into(),
            home: home.into(),
            config,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn config(&self) -> &SetupConfig {
        &self.config
    }

    pub fn requirements_path(&self) -> PathBuf {
        self.root.join(&self.config.requirements_file)
    }

    pub fn app_path(&self) -> PathBuf {
        self.root.join(&self.config.app_entry)
    }

    pub fn venv_dir(&self) -> PathBuf {
        self.root.join(&self.config.venv_dir)
    }

    pub fn venv_bin_dir(&self) -> PathBuf {
        self.venv_dir().join("bin")
    }

    pub fn venv_pip(&self) -> PathBuf {
        self.venv_bin_dir().join("pip")
    }

    pub fn venv_flask(&self) -> PathBuf {
        self.venv_bin_dir().join("flask")
    }

    pub fn venv_python(&self) -> PathBuf {
        self.venv_bin_dir().join("python3")
    }

    pub fn data_dir(&self) -> PathBuf {
        self.home.join(&self.config.data_dir_name)
    }

    pub fn hosts_path(&self) -> &Path {
        &self.config.hosts_path
    }

    pub fn unit_tmp_path(&self) -> PathBuf {
        self.config.unit_tmp_dir.join(self.config.unit_file_name())
    }

    pub fn unit_install_path(&self) -> PathBuf {
        self.config.unit_dir.join(self.config.unit_file_name())
    }
}

/// Project root for an installed binary: the parent of the directory holding
/// the executable, e.g. `<root>/bin/golinks-setup` resolves to `<root>`.
pub fn default_project_root() -> Result<PathBuf> {
    let exe = std::env::current_exe().context("failed to resolve current executable path")?;
    let exe = exe.canonicalize().unwrap_or(exe);
    project_root_for_executable(&exe)
}

pub(crate) fn project_root_for_executable(exe: &Path) -> Result<PathBuf> {
    exe.parent()
        .and_then(Path::parent)
        .map(Path::to_path_buf)
        .ok_or_else(|| {
            anyhow!(
                "cannot derive project root from executable path: {}",
                exe.display()
            )
        })
}

pub fn default_home_dir() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME is not set; cannot resolve data directory")?;
    Ok(PathBuf::from(home))
}
