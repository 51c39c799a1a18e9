use std::process::Command;

use anyhow::{anyhow, Result};
use tracing::{debug, warn};

use crate::command::{describe_command, run_command};
use crate::database::initialize_database_with_runner;
use crate::environment::setup_environment_with_runner;
use crate::hosts::ensure_hosts_entry_with_runner;
use crate::preconditions::{check_preconditions, is_privileged};
use crate::service::install_service_with_runner;
use crate::{
    ProjectLayout, SetupReport, Severity, StageFailure, StageName, StageOutcome, StageReport,
    StageStatus,
};

/// Everything the stages need from the machine they run on.
pub trait SetupHost {
    fn is_privileged(&self) -> bool;

    fn user(&self) -> Option<String>;

    fn run_command(&mut self, command: &mut Command, context_message: &str) -> Result<()>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemHost;

impl SetupHost for SystemHost {
    fn is_privileged(&self) -> bool {
        is_privileged()
    }

    fn user(&self) -> Option<String> {
        std::env::var("USER").ok()
    }

    fn run_command(&mut self, command: &mut Command, context_message: &str) -> Result<()> {
        run_command(command, context_message)
    }
}

#[derive(Debug)]
pub enum StageEvent<'a> {
    Started(StageName),
    /// A stage is about to run this command line.
    Command(&'a str),
    Finished(&'a StageReport),
}

/// Runs every stage in order. Stops at the first stage error; a degraded
/// advisory stage is recorded and the run continues.
pub fn run_setup<Host, OnEvent>(
    layout: &ProjectLayout,
    host: &mut Host,
    mut on_event: OnEvent,
) -> SetupReport
where
    Host: SetupHost + ?Sized,
    OnEvent: FnMut(StageEvent<'_>),
{
    let mut report = SetupReport::default();

    for stage in StageName::ALL {
        on_event(StageEvent::Started(stage));
        debug!(stage = %stage, "starting setup stage");

        let result = run_stage(stage, layout, host, &mut on_event)
            .and_then(|outcome| ensure_tolerated(stage, outcome));
        let stage_report = match result {
            Ok(outcome) => {
                if outcome.status == StageStatus::Degraded {
                    let message = outcome.messages.join("; ");
                    warn!(stage = %stage, error = %message, "advisory stage degraded");
                }
                StageReport {
                    stage,
                    status: outcome.status,
                    messages: outcome.messages,
                }
            }
            Err(err) => {
                let stage_report = StageReport {
                    stage,
                    status: StageStatus::Failed,
                    messages: format!("{err:#}").lines().map(str::to_string).collect(),
                };
                on_event(StageEvent::Finished(&stage_report));
                report.stages.push(stage_report);
                report.fatal = Some(StageFailure { stage, error: err });
                return report;
            }
        };

        on_event(StageEvent::Finished(&stage_report));
        report.stages.push(stage_report);
    }

    report
}

fn run_stage<Host, OnEvent>(
    stage: StageName,
    layout: &ProjectLayout,
    host: &mut Host,
    on_event: &mut OnEvent,
) -> Result<StageOutcome>
where
    Host: SetupHost + ?Sized,
    OnEvent: FnMut(StageEvent<'_>),
{
    match stage {
        StageName::Preconditions => check_preconditions(layout, host.is_privileged()),
        StageName::Environment => {
            setup_environment_with_runner(layout, announced_runner(host, on_event))
        }
        StageName::HostsEntry => {
            ensure_hosts_entry_with_runner(layout, announced_runner(host, on_event))
        }
        StageName::Database => {
            initialize_database_with_runner(layout, announced_runner(host, on_event))
        }
        StageName::Service => {
            let user = host.user();
            install_service_with_runner(layout, user, announced_runner(host, on_event))
        }
    }
}

fn announced_runner<'a, Host, OnEvent>(
    host: &'a mut Host,
    on_event: &'a mut OnEvent,
) -> impl FnMut(&mut Command, &str) -> Result<()> + 'a
where
    Host: SetupHost + ?Sized,
    OnEvent: FnMut(StageEvent<'_>),
{
    move |command: &mut Command, context_message: &str| {
        on_event(StageEvent::Command(&describe_command(command)));
        host.run_command(command, context_message)
    }
}

// Only advisory stages may finish degraded.
pub(crate) fn ensure_tolerated(stage: StageName, outcome: StageOutcome) -> Result<StageOutcome> {
    if outcome.status == StageStatus::Degraded && stage.severity() == Severity::Fatal {
        return Err(anyhow!(outcome.messages.join("\n")));
    }
    Ok(outcome)
}
