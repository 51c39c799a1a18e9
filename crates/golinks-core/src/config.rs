use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context};
use serde::{Deserialize, Serialize};

pub const CONFIG_FILE_NAME: &str = "golinks-setup.toml";

const DEFAULT_HOSTS_LINE: &str = "127.0.0.1 go";
const DEFAULT_HOSTS_PATH: &str = "/etc/hosts";
const DEFAULT_VENV_DIR: &str = "venv";
const DEFAULT_REQUIREMENTS_FILE: &str = "requirements.txt";
const DEFAULT_APP_ENTRY: &str = "app.py";
const DEFAULT_DATA_DIR_NAME: &str = ".golinks";
const DEFAULT_UNIT_NAME: &str = "golinks";
const DEFAULT_UNIT_DIR: &str = "/etc/systemd/system";
const DEFAULT_UNIT_TMP_DIR: &str = "/tmp";
const DEFAULT_PYTHON: &str = "python3";
const DEFAULT_ESCALATION_PROGRAM: &str = "sudo";
const DEFAULT_ACCESS_URL: &str = "http://go/go";

/// Host setup settings. Every field falls back to the stock GoLinks layout.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default, deny_unknown_fields)]
pub struct SetupConfig {
    pub hosts_line: String,
    pub hosts_path: PathBuf,
    pub venv_dir: String,
    pub requirements_file: String,
    pub app_entry: String,
    pub data_dir_name: String,
    pub unit_name: String,
    pub unit_dir: PathBuf,
    pub unit_tmp_dir: PathBuf,
    pub python: String,
    pub escalation_program: String,
    pub access_url: String,
    pub service_user: Option<String>,
}

impl Default for SetupConfig {
    fn default() -> Self {
        Self {
            hosts_line: DEFAULT_HOSTS_LINE.to_string(),
            hosts_path: PathBuf::from(DEFAULT_HOSTS_PATH),
            venv_dir: DEFAULT_VENV_DIR.to_string(),
            requirements_file: DEFAULT_REQUIREMENTS_FILE.to_string(),
            app_entry: DEFAULT_APP_ENTRY.to_string(),
            data_dir_name: DEFAULT_DATA_DIR_NAME.to_string(),
            unit_name: DEFAULT_UNIT_NAME.to_string(),
            unit_dir: PathBuf::from(DEFAULT_UNIT_DIR),
            unit_tmp_dir: PathBuf::from(DEFAULT_UNIT_TMP_DIR),
            python: DEFAULT_PYTHON.to_string(),
            escalation_program: DEFAULT_ESCALATION_PROGRAM.to_string(),
            access_url: DEFAULT_ACCESS_URL.to_string(),
            service_user: None,
        }
    }
}

impl SetupConfig {
    pub fn from_toml_str(input: &str) -> anyhow::Result<Self> {
        let config: Self = toml::from_str(input).context("failed to parse golinks setup config")?;
        config.validate()?;
        Ok(config)
    }

    /// Loads `path` when it is given, otherwise `<project_root>/golinks-setup.toml`
    /// if present, otherwise the defaults.
    pub fn load(explicit_path: Option<&Path>, project_root: &Path) -> anyhow::Result<Self> {
        let path = match explicit_path {
            Some(path) => path.to_path_buf(),
            None => {
                let candidate = project_root.join(CONFIG_FILE_NAME);
                if !candidate.exists() {
                    return Ok(Self::default());
                }
                candidate
            }
        };

        let raw = fs::read_to_string(&path)
            .with_context(|| format!("failed to read setup config: {}", path.display()))?;
        Self::from_toml_str(&raw)
            .with_context(|| format!("invalid setup config: {}", path.display()))
    }

    pub fn unit_file_name(&self) -> String {
        format!("{}.service", self.unit_name)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        for (field, value) in [
            ("hosts_line", &self.hosts_line),
            ("venv_dir", &self.venv_dir),
            ("requirements_file", &self.requirements_file),
            ("app_entry", &self.app_entry),
            ("data_dir_name", &self.data_dir_name),
            ("python", &self.python),
            ("escalation_program", &self.escalation_program),
        ] {
            if value.trim().is_empty() {
                return Err(anyhow!("config field '{field}' must not be empty"));
            }
        }

        if self.hosts_line.contains('\n') {
            return Err(anyhow!("config field 'hosts_line' must be a single line"));
        }
        validate_unit_name(&self.unit_name)?;

        for (field, value) in [
            ("hosts_path", &self.hosts_path),
            ("unit_dir", &self.unit_dir),
            ("unit_tmp_dir", &self.unit_tmp_dir),
        ] {
            if !value.is_absolute() {
                return Err(anyhow!(
                    "config field '{field}' must be an absolute path: {}",
                    value.display()
                ));
            }
        }

        if let Some(user) = &self.service_user {
            if user.trim().is_empty() {
                return Err(anyhow!("config field 'service_user' must not be empty"));
            }
        }

        Ok(())
    }
}

fn validate_unit_name(name: &str) -> anyhow::Result<()> {
    if name.trim().is_empty() {
        return Err(anyhow!("config field 'unit_name' must not be empty"));
    }
    if name.ends_with(".service") {
        return Err(anyhow!(
            "unit_name must not include the '.service' suffix: {name}"
        ));
    }
    if name
        .chars()
        .any(|ch| !(ch.is_ascii_alphanumeric() || matches!(ch, '-' | '_' | '.' | '@')))
    {
        return Err(anyhow!("unit_name contains invalid character(s): {name}"));
    }
    Ok(())
}
