use std::io::IsTerminal;
use std::time::{Duration, Instant};

use anstyle::{AnsiColor, Effects, Style};
use golinks_installer::{ProjectLayout, SetupReport, StageReport, StageStatus};
use indicatif::{ProgressBar, ProgressStyle};

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) enum OutputStyle {
    Plain,
    Rich,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum UiMode {
    Plain,
    Interactive,
}

#[derive(Copy, Clone, Debug)]
pub(crate) struct TerminalRenderer {
    style: OutputStyle,
    mode: UiMode,
}

pub(crate) struct TerminalProgress {
    style: OutputStyle,
    label: String,
    total: u64,
    current: u64,
    progress_bar: Option<ProgressBar>,
    started_at: Instant,
}

pub(crate) fn current_output_style() -> OutputStyle {
    resolve_output_style(
        std::env::var_os("NO_COLOR").is_some(),
        std::io::stdout().is_terminal(),
    )
}

pub(crate) fn resolve_output_style(no_color: bool, stdout_is_terminal: bool) -> OutputStyle {
    if no_color || !stdout_is_terminal {
        OutputStyle::Plain
    } else {
        OutputStyle::Rich
    }
}

pub(crate) fn render_status_line(style: OutputStyle, status: &str, message: &str) -> String {
    match style {
        OutputStyle::Plain => message.to_string(),
        OutputStyle::Rich => format!("{} {message}", status_badge(status)),
    }
}

fn status_badge(status: &str) -> &'static str {
    match status {
        "ok" => "[OK]",
        "warn" => "[WARN]",
        "err" => "[ERR]",
        _ => "[..]",
    }
}

/// Badge name for a finished stage.
pub(crate) fn stage_status_badge(report: &StageReport) -> &'static str {
    match report.status {
        StageStatus::Completed => "ok",
        StageStatus::Skipped => "skip",
        StageStatus::Degraded => "warn",
        StageStatus::Failed => "err",
    }
}

pub(crate) fn format_stage_report_lines(report: &StageReport, style: OutputStyle) -> Vec<String> {
    let status = stage_status_badge(report);
    report
        .messages
        .iter()
        .enumerate()
        .map(|(index, message)| {
            // follow-up lines of a failure are guidance
            let status = if index > 0 && matches!(status, "warn" | "err") {
                "step"
            } else {
                status
            };
            render_status_line(style, status, message)
        })
        .collect()
}

/// Closing lines of an install run; empty unless every fatal stage succeeded.
pub(crate) fn format_install_summary(
    report: &SetupReport,
    layout: &ProjectLayout,
    style: OutputStyle,
) -> Vec<String> {
    if !report.is_success() {
        return Vec::new();
    }

    vec![
        String::new(),
        render_status_line(
            style,
            "ok",
            &format!(
                "Installation complete! Access golinks at {}",
                layout.config().access_url
            ),
        ),
    ]
}

impl TerminalRenderer {
    pub(crate) fn from_style(style: OutputStyle) -> Self {
        Self {
            style,
            mode: ui_mode_from_style(style),
        }
    }

    pub(crate) fn style(self) -> OutputStyle {
        self.style
    }

    pub(crate) fn render_stage_header(self, title: &str) -> String {
        match render_section_header(self.mode, title) {
            Some(line) => match self.style {
                OutputStyle::Plain => line,
                OutputStyle::Rich => colorize(section_style(), &line),
            },
            None => format!("{title}..."),
        }
    }

    pub(crate) fn start_progress(self, label: &str, total: u64) -> TerminalProgress {
        let progress_bar = if self.style == OutputStyle::Rich {
            let progress_bar = ProgressBar::new(total.max(1));
            if let Ok(style) = ProgressStyle::with_template(
                "{spinner:.cyan.bold} {msg:<12} [{bar:20.cyan/blue}] {pos:>1}/{len:1} {elapsed_precise}",
            ) {
                progress_bar.set_style(style.tick_chars("|/-\\ ").progress_chars("=>-"));
            }
            progress_bar.set_message(label.to_string());
            progress_bar.enable_steady_tick(Duration::from_millis(80));
            Some(progress_bar)
        } else {
            None
        };

        TerminalProgress {
            style: self.style,
            label: label.to_string(),
            total,
            current: 0,
            progress_bar,
            started_at: Instant::now(),
        }
    }
}

impl TerminalProgress {
    /// Prints above the bar when one is drawn.
    pub(crate) fn println(&self, line: &str) {
        match &self.progress_bar {
            Some(progress_bar) => progress_bar.suspend(|| println!("{line}")),
            None => println!("{line}"),
        }
    }

    pub(crate) fn set_message(&self, message: &str) {
        if let Some(progress_bar) = &self.progress_bar {
            progress_bar.set_message(message.to_string());
        }
    }

    pub(crate) fn advance(&mut self) {
        self.current = (self.current + 1).min(self.total);
        if let Some(progress_bar) = &self.progress_bar {
            progress_bar.set_position(self.current);
        }
    }

    pub(crate) fn finish_success(mut self) {
        let Some(progress_bar) = self.progress_bar.take() else {
            return;
        };

        progress_bar.finish_and_clear();
        if let Some(line) = render_progress_line(
            self.style,
            &self.label,
            self.current,
            self.total,
            Some(self.started_at.elapsed()),
        ) {
            println!("{line}");
        }
    }

    pub(crate) fn finish_abandon(mut self) {
        if let Some(progress_bar) = self.progress_bar.take() {
            progress_bar.abandon();
        }
    }
}

fn format_elapsed(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    let millis = elapsed.subsec_millis();
    format!("{secs}.{millis:03}s")
}

fn section_style() -> Style {
    Style::new()
        .fg_color(Some(AnsiColor::BrightBlue.into()))
        .effects(Effects::BOLD)
}

fn progress_label_style() -> Style {
    Style::new()
        .fg_color(Some(AnsiColor::BrightCyan.into()))
        .effects(Effects::BOLD)
}

fn progress_bar_style() -> Style {
    Style::new().fg_color(Some(AnsiColor::BrightBlue.into()))
}

fn colorize(style: Style, text: &str) -> String {
    format!("{}{}{}", style.render(), text, style.render_reset())
}

fn ui_mode_from_style(style: OutputStyle) -> UiMode {
    match style {
        OutputStyle::Plain => UiMode::Plain,
        OutputStyle::Rich => UiMode::Interactive,
    }
}

fn render_section_header(mode: UiMode, title: &str) -> Option<String> {
    match mode {
        UiMode::Plain => None,
        UiMode::Interactive => Some(format!("== {title} ==")),
    }
}

pub(crate) fn render_progress_line(
    style: OutputStyle,
    label: &str,
    current: u64,
    total: u64,
    elapsed: Option<Duration>,
) -> Option<String> {
    if style == OutputStyle::Plain {
        return None;
    }

    let width = 10_usize;
    let safe_total = total.max(1);
    let bounded_current = current.min(safe_total);
    let filled = ((bounded_current as usize) * width) / (safe_total as usize);
    let bar = format!(
        "{}{}",
        "=".repeat(filled),
        "-".repeat(width.saturating_sub(filled))
    );
    let percent = (bounded_current * 100) / safe_total;
    let suffix = elapsed
        .map(|value| format!(" complete in {}", format_elapsed(value)))
        .unwrap_or_default();

    Some(format!(
        "{} [{}] {:>3}% {}/{}{}",
        colorize(progress_label_style(), label),
        colorize(progress_bar_style(), &bar),
        percent,
        current,
        total,
        suffix
    ))
}
