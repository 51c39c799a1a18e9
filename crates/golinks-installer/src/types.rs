use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Every failure aborts the run.
    Fatal,
    /// The stage may finish degraded; the run continues.
    Advisory,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageName {
    Preconditions,
    Environment,
    HostsEntry,
    Database,
    Service,
}

impl StageName {
    pub const ALL: [StageName; 5] = [
        StageName::Preconditions,
        StageName::Environment,
        StageName::HostsEntry,
        StageName::Database,
        StageName::Service,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Preconditions => "preconditions",
            Self::Environment => "environment",
            Self::HostsEntry => "hosts-entry",
            Self::Database => "database",
            Self::Service => "service",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::Preconditions => "Checking preconditions",
            Self::Environment => "Setting up virtual environment",
            Self::HostsEntry => "Setting up DNS",
            Self::Database => "Initializing database",
            Self::Service => "Setting up systemd service",
        }
    }

    pub fn severity(self) -> Severity {
        match self {
            Self::HostsEntry => Severity::Advisory,
            _ => Severity::Fatal,
        }
    }
}

impl fmt::Display for StageName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageStatus {
    Completed,
    Skipped,
    /// Finished with a tolerated failure.
    Degraded,
    Failed,
}

impl StageStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Completed => "completed",
            Self::Skipped => "skipped",
            Self::Degraded => "degraded",
            Self::Failed => "failed",
        }
    }
}

/// What a stage function reports when it returns normally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageOutcome {
    pub status: StageStatus,
    pub messages: Vec<String>,
}

impl StageOutcome {
    pub fn completed(message: impl Into<String>) -> Self {
        Self {
            status: StageStatus::Completed,
            messages: vec![message.into()],
        }
    }

    pub fn skipped(message: impl Into<String>) -> Self {
        Self {
            status: StageStatus::Skipped,
            messages: vec![message.into()],
        }
    }

    pub fn degraded(messages: Vec<String>) -> Self {
        Self {
            status: StageStatus::Degraded,
            messages,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageReport {
    pub stage: StageName,
    pub status: StageStatus,
    pub messages: Vec<String>,
}

#[derive(Debug)]
pub struct StageFailure {
    pub stage: StageName,
    pub error: anyhow::Error,
}

#[derive(Debug, Default)]
pub struct SetupReport {
    pub stages: Vec<StageReport>,
    pub fatal: Option<StageFailure>,
}

impl SetupReport {
    pub fn is_success(&self) -> bool {
        self.fatal.is_none()
    }

    pub fn exit_code(&self) -> u8 {
        if self.is_success() {
            0
        } else {
            1
        }
    }

    pub fn stage(&self, stage: StageName) -> Option<&StageReport> {
        self.stages.iter().find(|report| report.stage == stage)
    }

    pub fn advisory_failures(&self) -> impl Iterator<Item = &StageReport> {
        self.stages
            .iter()
            .filter(|report| report.status == StageStatus::Degraded)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DoctorCheck {
    pub label: &'static str,
    pub ok: bool,
    pub detail: String,
}
