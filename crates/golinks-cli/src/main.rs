use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};
use golinks_core::SetupConfig;
use golinks_installer::{
    build_service_unit, default_home_dir, default_project_root, inspect_setup, is_privileged,
    resolve_service_user, run_setup, ProjectLayout, StageEvent, StageName, SystemHost,
};
use tracing::debug;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod completion;
mod render;

use completion::{write_completions_script, CliCompletionShell};
use render::{
    current_output_style, format_install_summary, format_stage_report_lines, render_status_line,
    OutputStyle, TerminalRenderer,
};

const LOG_ENV: &str = "GOLINKS_LOG";

#[derive(Parser, Debug)]
#[command(name = "golinks-setup")]
#[command(about = "Set up the local GoLinks service on a Linux host", long_about = None)]
struct Cli {
    /// Project checkout holding requirements.txt and app.py
    #[arg(long, global = true)]
    project_root: Option<PathBuf>,
    /// Setup config file (defaults to <project-root>/golinks-setup.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the full setup (the default when no command is given)
    Install,
    /// Show what a setup run would find, without changing anything
    Doctor,
    /// Print the systemd unit that would be installed
    RenderUnit,
    Completions {
        #[arg(value_enum)]
        shell: CliCompletionShell,
    },
}

fn main() -> ExitCode {
    init_logging();
    let cli = Cli::parse();
    let output_style = current_output_style();

    match run_cli(cli, output_style) {
        Ok(code) => ExitCode::from(code),
        Err(err) => {
            eprintln!(
                "{}",
                render_status_line(output_style, "err", &format!("{err:#}"))
            );
            ExitCode::from(1)
        }
    }
}

fn init_logging() {
    let env_filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .try_init();
}

fn run_cli(cli: Cli, output_style: OutputStyle) -> Result<u8> {
    match cli.command.unwrap_or(Commands::Install) {
        Commands::Install => {
            let layout = resolve_layout(cli.project_root, cli.config.as_deref())?;
            Ok(run_install(&layout, output_style))
        }
        Commands::Doctor => {
            let layout = resolve_layout(cli.project_root, cli.config.as_deref())?;
            let renderer = TerminalRenderer::from_style(output_style);
            for line in format_doctor_lines(&layout, is_privileged(), renderer.style()) {
                println!("{line}");
            }
            Ok(0)
        }
        Commands::RenderUnit => {
            let layout = resolve_layout(cli.project_root, cli.config.as_deref())?;
            let user = resolve_service_user(layout.config(), std::env::var("USER").ok())?;
            print!("{}", build_service_unit(&layout, user)?.render());
            Ok(0)
        }
        Commands::Completions { shell } => {
            let mut stdout = std::io::stdout();
            write_completions_script(shell, &mut stdout)?;
            Ok(0)
        }
    }
}

fn resolve_layout(
    project_root: Option<PathBuf>,
    config_path: Option<&std::path::Path>,
) -> Result<ProjectLayout> {
    let root = match project_root {
        Some(root) => root,
        None => default_project_root()?,
    };
    let config = SetupConfig::load(config_path, &root)?;
    let home = default_home_dir()?;
    debug!(root = %root.display(), home = %home.display(), "resolved project layout");
    Ok(ProjectLayout::new(root, home, config))
}

fn run_install(layout: &ProjectLayout, output_style: OutputStyle) -> u8 {
    let renderer = TerminalRenderer::from_style(output_style);
    let mut progress = renderer.start_progress("setup", StageName::ALL.len() as u64);
    let mut host = SystemHost;

    let report = run_setup(layout, &mut host, |event| match event {
        StageEvent::Started(stage) => {
            progress.set_message(stage.as_str());
            progress.println(&renderer.render_stage_header(stage.title()));
        }
        StageEvent::Command(line) => {
            progress.set_message(line);
            if output_style == OutputStyle::Plain {
                progress.println(&format!("Running: {line}"));
            }
        }
        StageEvent::Finished(stage_report) => {
            for line in format_stage_report_lines(stage_report, output_style) {
                progress.println(&line);
            }
            progress.advance();
        }
    });

    if !report.is_success() {
        progress.finish_abandon();
        return report.exit_code();
    }

    progress.finish_success();
    for line in format_install_summary(&report, layout, output_style) {
        println!("{line}");
    }
    report.exit_code()
}

fn format_doctor_lines(
    layout: &ProjectLayout,
    privileged: bool,
    output_style: OutputStyle,
) -> Vec<String> {
    let mut lines = vec![
        format!("root: {}", layout.root().display()),
        format!("venv: {}", layout.venv_dir().display()),
        format!("unit: {}", layout.unit_install_path().display()),
    ];
    for check in inspect_setup(layout, privileged) {
        let status = if check.ok { "ok" } else { "warn" };
        lines.push(render_status_line(
            output_style,
            status,
            &format!("{}: {}", check.label, check.detail),
        ));
    }
    lines
}

#[cfg(test)]
mod tests;
