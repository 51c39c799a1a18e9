use super::*;
use crate::render::{
    format_install_summary, render_progress_line, resolve_output_style, stage_status_badge,
};
use anyhow::anyhow;
use clap::error::ErrorKind;
use golinks_installer::{SetupReport, StageFailure, StageReport, StageStatus};

fn report(stage: StageName, status: StageStatus, messages: &[&str]) -> StageReport {
    StageReport {
        stage,
        status,
        messages: messages.iter().map(|message| message.to_string()).collect(),
    }
}

#[test]
fn cli_without_command_defaults_to_install() {
    let cli = Cli::try_parse_from(["golinks-setup"]).expect("bare invocation parses");
    assert!(cli.command.is_none());
    assert!(cli.project_root.is_none());
    assert!(cli.config.is_none());
}

#[test]
fn cli_parses_global_overrides_after_subcommand() {
    let cli = Cli::try_parse_from([
        "golinks-setup",
        "doctor",
        "--project-root",
        "/srv/golinks",
        "--config",
        "/etc/golinks-setup.toml",
    ])
    .expect("command parses");
    assert!(matches!(cli.command, Some(Commands::Doctor)));
    assert_eq!(cli.project_root, Some(PathBuf::from("/srv/golinks")));
    assert_eq!(cli.config, Some(PathBuf::from("/etc/golinks-setup.toml")));
}

#[test]
fn cli_parses_render_unit() {
    let cli = Cli::try_parse_from(["golinks-setup", "render-unit"]).expect("command parses");
    assert!(matches!(cli.command, Some(Commands::RenderUnit)));
}

#[test]
fn cli_parses_completions_for_each_supported_shell() {
    let cases = vec![
        ("bash", CliCompletionShell::Bash),
        ("zsh", CliCompletionShell::Zsh),
        ("fish", CliCompletionShell::Fish),
    ];

    for (shell, expected) in cases {
        let cli = Cli::try_parse_from(["golinks-setup", "completions", shell])
            .expect("command parses");
        match cli.command {
            Some(Commands::Completions { shell }) => assert_eq!(shell, expected),
            other => panic!("unexpected command: {other:?}"),
        }
    }
}

#[test]
fn cli_rejects_unsupported_completion_shell() {
    let err = Cli::try_parse_from(["golinks-setup", "completions", "elvish"])
        .expect_err("unsupported shell must fail");
    assert_eq!(err.kind(), ErrorKind::InvalidValue);
    assert!(err.to_string().contains("elvish"));
}

#[test]
fn cli_rejects_unknown_flag() {
    let err = Cli::try_parse_from(["golinks-setup", "--force"]).expect_err("unknown flag");
    assert_eq!(err.kind(), ErrorKind::UnknownArgument);
}

#[test]
fn completions_script_names_binary() {
    let mut generated = Vec::new();
    write_completions_script(CliCompletionShell::Bash, &mut generated)
        .expect("must generate completions");
    let script = String::from_utf8(generated).expect("utf8 script");
    assert!(script.contains("golinks-setup"));
    assert!(script.contains("render-unit"));
}

#[test]
fn output_style_is_plain_without_terminal_or_with_no_color() {
    assert_eq!(resolve_output_style(false, true), OutputStyle::Rich);
    assert_eq!(resolve_output_style(true, true), OutputStyle::Plain);
    assert_eq!(resolve_output_style(false, false), OutputStyle::Plain);
}

#[test]
fn render_status_line_plain_is_unadorned() {
    assert_eq!(
        render_status_line(OutputStyle::Plain, "ok", "DNS entry added successfully"),
        "DNS entry added successfully"
    );
}

#[test]
fn render_status_line_rich_includes_ascii_badge() {
    assert_eq!(
        render_status_line(OutputStyle::Rich, "ok", "Database initialized successfully"),
        "[OK] Database initialized successfully"
    );
    assert_eq!(
        render_status_line(OutputStyle::Rich, "skip", "Virtual environment already exists"),
        "[..] Virtual environment already exists"
    );
}

fn install_layout() -> ProjectLayout {
    ProjectLayout::new(
        "/nonexistent/golinks-cli-test",
        "/nonexistent/golinks-cli-home",
        SetupConfig::default(),
    )
}

#[test]
fn stage_badges_follow_status() {
    assert_eq!(
        stage_status_badge(&report(StageName::Environment, StageStatus::Skipped, &[])),
        "skip"
    );
    assert_eq!(
        stage_status_badge(&report(StageName::HostsEntry, StageStatus::Degraded, &[])),
        "warn"
    );
    assert_eq!(
        stage_status_badge(&report(StageName::HostsEntry, StageStatus::Failed, &[])),
        "err"
    );
    assert_eq!(
        stage_status_badge(&report(StageName::Database, StageStatus::Failed, &[])),
        "err"
    );
}

#[test]
fn advisory_failure_renders_warning_then_hint() {
    let stage = report(
        StageName::HostsEntry,
        StageStatus::Degraded,
        &[
            "failed to append hosts entry: status=exit status: 1",
            "Please manually add '127.0.0.1 go' to /etc/hosts",
        ],
    );
    assert_eq!(
        format_stage_report_lines(&stage, OutputStyle::Rich),
        vec![
            "[WARN] failed to append hosts entry: status=exit status: 1",
            "[..] Please manually add '127.0.0.1 go' to /etc/hosts",
        ]
    );
    assert_eq!(
        format_stage_report_lines(&stage, OutputStyle::Plain),
        stage.messages
    );
}

#[test]
fn fatal_failure_renders_error_badge() {
    let stage = report(
        StageName::Service,
        StageStatus::Failed,
        &["failed to enable service: status=exit status: 1"],
    );
    assert_eq!(
        format_stage_report_lines(&stage, OutputStyle::Rich),
        vec!["[ERR] failed to enable service: status=exit status: 1"]
    );
}

#[test]
fn privilege_failure_renders_error_then_guidance() {
    let stage = report(
        StageName::Preconditions,
        StageStatus::Failed,
        &[
            "This tool requires sudo privileges for DNS and service setup.",
            "Please run: sudo golinks-setup",
        ],
    );
    assert_eq!(
        format_stage_report_lines(&stage, OutputStyle::Rich),
        vec![
            "[ERR] This tool requires sudo privileges for DNS and service setup.",
            "[..] Please run: sudo golinks-setup",
        ]
    );
}

#[test]
fn install_summary_prints_access_url_after_success() {
    let setup = SetupReport {
        stages: StageName::ALL
            .iter()
            .map(|stage| report(*stage, StageStatus::Completed, &[]))
            .collect(),
        fatal: None,
    };

    assert_eq!(setup.exit_code(), 0);
    assert_eq!(
        format_install_summary(&setup, &install_layout(), OutputStyle::Plain),
        vec![
            String::new(),
            "Installation complete! Access golinks at http://go/go".to_string(),
        ]
    );
    assert_eq!(
        format_install_summary(&setup, &install_layout(), OutputStyle::Rich)[1],
        "[OK] Installation complete! Access golinks at http://go/go"
    );
}

#[test]
fn install_summary_still_prints_after_degraded_hosts_entry() {
    let setup = SetupReport {
        stages: StageName::ALL
            .iter()
            .map(|stage| {
                let status = if *stage == StageName::HostsEntry {
                    StageStatus::Degraded
                } else {
                    StageStatus::Completed
                };
                report(*stage, status, &[])
            })
            .collect(),
        fatal: None,
    };

    assert_eq!(setup.exit_code(), 0);
    let lines = format_install_summary(&setup, &install_layout(), OutputStyle::Plain);
    assert_eq!(
        lines.last().map(String::as_str),
        Some("Installation complete! Access golinks at http://go/go")
    );
}

#[test]
fn install_summary_is_empty_after_fatal_failure() {
    let setup = SetupReport {
        stages: vec![report(
            StageName::Database,
            StageStatus::Failed,
            &["failed to run database migrations"],
        )],
        fatal: Some(StageFailure {
            stage: StageName::Database,
            error: anyhow!("failed to run database migrations"),
        }),
    };

    assert_eq!(setup.exit_code(), 1);
    assert!(format_install_summary(&setup, &install_layout(), OutputStyle::Rich).is_empty());
}

#[test]
fn stage_header_plain_uses_title_with_ellipsis() {
    let renderer = TerminalRenderer::from_style(OutputStyle::Plain);
    assert_eq!(
        renderer.render_stage_header(StageName::HostsEntry.title()),
        "Setting up DNS..."
    );
}

#[test]
fn progress_line_is_suppressed_in_plain_mode() {
    assert!(render_progress_line(OutputStyle::Plain, "setup", 5, 5, None).is_none());
    let line = render_progress_line(OutputStyle::Rich, "setup", 5, 5, None)
        .expect("rich mode renders progress");
    assert!(line.contains("100% 5/5"));
}

#[test]
fn doctor_lines_list_layout_and_checks() {
    let layout = install_layout();
    let lines = format_doctor_lines(&layout, false, OutputStyle::Rich);
    assert_eq!(lines[0], "root: /nonexistent/golinks-cli-test");
    assert_eq!(lines[1], "venv: /nonexistent/golinks-cli-test/venv");
    assert_eq!(lines[2], "unit: /etc/systemd/system/golinks.service");
    assert!(lines.contains(&"[WARN] privileges: not running as root".to_string()));
    assert!(lines.contains(
        &"[WARN] requirements: /nonexistent/golinks-cli-test/requirements.txt".to_string()
    ));
}
