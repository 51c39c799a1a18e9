mod command;
mod database;
mod doctor;
mod environment;
mod hosts;
mod layout;
mod pipeline;
mod preconditions;
mod service;
mod types;

pub use command::{describe_command, run_command};
pub use database::{initialize_database_with_runner, FLASK_APP_ENV};
pub use doctor::inspect_setup;
pub use environment::setup_environment_with_runner;
pub use hosts::{ensure_hosts_entry_with_runner, hosts_contains_entry, manual_hosts_hint};
pub use layout::{default_home_dir, default_project_root, ProjectLayout};
pub use pipeline::{run_setup, SetupHost, StageEvent, SystemHost};
pub use preconditions::{check_preconditions, is_privileged};
pub use service::{build_service_unit, install_service_with_runner, resolve_service_user};
pub use types::{
    DoctorCheck, SetupReport, Severity, StageFailure, StageName, StageOutcome, StageReport,
    StageStatus,
};
